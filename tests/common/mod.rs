#![allow(dead_code)]

use ember::camera::CameraRays;
use ember::renderer::scene::{Material, Scene, Sphere};
use nalgebra::{Point3, Vector3};

// 모든 픽셀이 같은 방향을 보는 카메라
pub struct FixedCamera {
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub width: u32,
    pub height: u32,
}

impl FixedCamera {
    pub fn new(position: Point3<f32>, direction: Vector3<f32>, width: u32, height: u32) -> Self {
        Self {
            position,
            direction,
            width,
            height,
        }
    }
}

impl CameraRays for FixedCamera {
    fn position(&self) -> Point3<f32> {
        self.position
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn ray_direction(&self, x: u32, y: u32) -> Vector3<f32> {
        assert!(x < self.width && y < self.height);
        self.direction
    }
}

pub fn emissive_sphere_scene() -> Scene {
    Scene {
        spheres: vec![Sphere {
            position: Vector3::zeros(),
            radius: 0.5,
            material_index: 0,
        }],
        materials: vec![Material {
            albedo: Vector3::new(1.0, 1.0, 1.0),
            emission_color: Vector3::new(1.0, 1.0, 1.0),
            emission_power: 1.0,
            ..Default::default()
        }],
        ..Default::default()
    }
}

// 빛나는 바닥 위의 거친 구. 튕긴 방향이 바닥이냐 하늘이냐에 따라 결과가 달라짐
pub fn diffuse_sphere_scene() -> Scene {
    Scene {
        spheres: vec![
            Sphere {
                position: Vector3::zeros(),
                radius: 1.0,
                material_index: 0,
            },
            Sphere {
                position: Vector3::new(0.0, -101.0, 0.0),
                radius: 100.0,
                material_index: 1,
            },
        ],
        materials: vec![
            Material {
                albedo: Vector3::new(0.5, 0.6, 0.7),
                roughness: 1.0,
                ..Default::default()
            },
            Material {
                albedo: Vector3::new(0.2, 0.8, 0.3),
                roughness: 1.0,
                emission_color: Vector3::new(1.0, 1.0, 1.0),
                emission_power: 0.5,
                ..Default::default()
            },
        ],
        background_color: Vector3::new(1.0, 1.0, 1.0),
        ..Default::default()
    }
}

pub fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}
