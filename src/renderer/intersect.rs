use nalgebra::{Point3, Unit, Vector3};

use crate::renderer::ray::Ray;
use crate::renderer::scene::{Primitive, PrimitiveRef, Scene, Sphere, Triangle};

// 평면과 거의 평행한 광선은 맞지 않은 것으로 처리
const PARALLEL_EPSILON: f32 = 1.0e-8;

// HitPayload와 마찬가지로 빛의 경로에 대한 정보만 담음. 색은 나중에 sampler가 계산
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub distance: f32,
    pub position: Point3<f32>,
    pub normal: Unit<Vector3<f32>>,
    pub primitive: PrimitiveRef,
}

/// Linear scan over every primitive; returns the closest hit with a positive
/// distance. Ties keep the primitive that comes first in scan order.
pub fn find_nearest_hit(scene: &Scene, ray: &Ray) -> Option<HitRecord> {
    let mut closest: Option<(PrimitiveRef, f32)> = None;

    for (reference, primitive) in scene.primitives() {
        let limit = closest.map_or(f32::INFINITY, |(_, distance)| distance);

        let distance = match primitive {
            Primitive::Sphere(sphere) => intersect_sphere(ray, sphere),
            Primitive::Triangle { model, triangle } => {
                intersect_triangle(ray, model.position, triangle)
            }
        };

        if let Some(distance) = distance {
            if distance < limit {
                closest = Some((reference, distance));
            }
        }
    }

    closest.map(|(reference, distance)| closest_hit(scene, ray, distance, reference))
}

// a = 광선 시작, b = 광선 방향, r = 반지름, t = 만나는 지점까지의 길이
// (b.b) t^2 + 2 (a.b) t + (a.a - r^2) = 0
// 구가 원점에 있다고 가정하고 푼 식이라 광선 쪽을 구 위치만큼 옮겨서 계산함
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let origin = ray.origin.coords - sphere.position;

    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * origin.dot(&ray.direction);
    let c = origin.dot(&origin) - sphere.radius * sphere.radius;

    // 판별식. 접하는 경우(0)도 안 맞은 걸로 침
    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let distance = (-b - discriminant.sqrt()) / (2.0 * a);
    (distance > 0.0).then_some(distance)
}

// 삼각형 꼭짓점은 모델 기준이라 광선을 모델 좌표로 옮김
pub fn intersect_triangle(ray: &Ray, model_position: Vector3<f32>, triangle: &Triangle) -> Option<f32> {
    let origin = ray.origin.coords - model_position;
    let normal = triangle.normal.as_ref();

    let denominator = normal.dot(&ray.direction);
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let distance = normal.dot(&(triangle.a - origin)) / denominator;
    if !(distance > 0.0) {
        return None;
    }

    let point = origin + ray.direction * distance;
    let edges = [
        (triangle.a, triangle.b),
        (triangle.b, triangle.c),
        (triangle.c, triangle.a),
    ];
    let inside = edges
        .iter()
        .all(|(from, to)| (to - from).cross(&(point - from)).dot(normal) >= 0.0);

    inside.then_some(distance)
}

pub fn closest_hit(scene: &Scene, ray: &Ray, distance: f32, primitive: PrimitiveRef) -> HitRecord {
    let (translation, normal) = match scene.primitive(primitive) {
        Primitive::Sphere(sphere) => {
            let local = ray.origin.coords - sphere.position + ray.direction * distance;
            (sphere.position, Unit::new_normalize(local))
        }
        Primitive::Triangle { model, triangle } => (model.position, triangle.normal),
    };

    let local_origin = ray.origin - translation;
    let position = local_origin + ray.direction * distance + translation;

    HitRecord {
        distance,
        position,
        normal,
        primitive,
    }
}
