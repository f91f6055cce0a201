use nalgebra::{Reflection3, Unit, Vector3, Vector4};

use crate::camera::CameraRays;
use crate::renderer::intersect::find_nearest_hit;
use crate::renderer::ray::Ray;
use crate::renderer::scene::Scene;
use crate::util::{random_in_unit_sphere, random_vec, PcgHash};

// 표면에서 살짝 띄워서 다음 광선을 쏨. 안 그러면 자기 자신과 다시 부딪힘
pub const SURFACE_OFFSET: f32 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadingMode {
    // 발광하는 재질만 빛을 냄
    Emissive,
    // 방향성 조명 하나로 골고루 비춤
    Directional { direction: Unit<Vector3<f32>> },
}

impl ShadingMode {
    pub fn for_scene(scene: &Scene) -> Self {
        match scene.active_light() {
            Some(light) => Self::Directional {
                direction: Unit::try_new(light.direction, f32::EPSILON)
                    .unwrap_or_else(|| -Vector3::y_axis()),
            },
            None => Self::Emissive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSampler {
    pub bounce_limit: u32,
    pub mode: ShadingMode,
}

impl PathSampler {
    pub fn new(bounce_limit: u32, mode: ShadingMode) -> Self {
        Self { bounce_limit, mode }
    }

    // DirectX의 RayGen 쉐이더와 같음
    pub fn sample<C: CameraRays + ?Sized>(
        &self,
        scene: &Scene,
        camera: &C,
        x: u32,
        y: u32,
        seed: u32,
    ) -> Vector4<f32> {
        let ray = Ray::new(camera.position(), camera.ray_direction(x, y));
        self.trace_path(scene, ray, seed)
    }

    pub fn trace_path(&self, scene: &Scene, mut ray: Ray, seed: u32) -> Vector4<f32> {
        let mut rng = PcgHash::new(seed);
        let mut light = Vector3::zeros();
        let mut throughput = Vector3::new(1.0, 1.0, 1.0);

        for _ in 0..self.bounce_limit {
            let Some(hit) = find_nearest_hit(scene, &ray) else {
                // 발광 모드에서는 하늘이 빛을 내지 않음
                if let ShadingMode::Directional { .. } = self.mode {
                    light += scene.background_color.component_mul(&throughput);
                }
                break;
            };

            let material = scene.material(hit.primitive);

            match self.mode {
                ShadingMode::Emissive => {
                    light += throughput.component_mul(&material.emission());
                    throughput.component_mul_assign(&material.albedo);

                    // 반구로 자르지 않는 느슨한 확산 반사
                    let scatter = hit.normal.as_ref()
                        + random_in_unit_sphere(&mut rng).as_ref() * material.roughness;
                    ray.direction = Unit::try_new(scatter, f32::EPSILON)
                        .unwrap_or(hit.normal)
                        .into_inner();
                }
                ShadingMode::Directional { direction } => {
                    // cos(v1, v2) = v1 . v2 (둘 다 단위 벡터일 때)
                    let intensity = hit.normal.dot(&-direction.as_ref()).max(0.0);
                    light += throughput.component_mul(&(material.albedo * intensity));
                    throughput.component_mul_assign(&material.albedo);

                    let axis = Unit::try_new(
                        hit.normal.as_ref() + random_vec(&mut rng, -0.5f32..0.5) * material.roughness,
                        f32::EPSILON,
                    )
                    .unwrap_or(hit.normal);
                    Reflection3::new(axis, 0.0).reflect(&mut ray.direction);
                }
            }

            ray.origin = hit.position + hit.normal.as_ref() * SURFACE_OFFSET;
        }

        Vector4::new(light.x, light.y, light.z, 1.0)
    }
}
