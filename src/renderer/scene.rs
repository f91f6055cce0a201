use std::fmt;

use nalgebra::{Unit, Vector3};

use crate::error::SceneError;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub albedo: Vector3<f32>,
    pub roughness: f32,
    pub metallic: f32,
    pub emission_color: Vector3<f32>,
    pub emission_power: f32,
}

impl Material {
    pub fn emission(&self) -> Vector3<f32> {
        self.emission_color * self.emission_power
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vector3::new(1.0, 1.0, 1.0),
            roughness: 1.0,
            metallic: 0.0,
            emission_color: Vector3::zeros(),
            emission_power: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub position: Vector3<f32>,
    pub radius: f32,
    pub material_index: usize,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            radius: 0.5,
            material_index: 0,
        }
    }
}

// 꼭짓점은 Model 기준 좌표. normal은 생성할 때 한 번만 계산함
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub a: Vector3<f32>,
    pub b: Vector3<f32>,
    pub c: Vector3<f32>,
    pub normal: Unit<Vector3<f32>>,
}

impl Triangle {
    /// Face normal follows the `a -> b -> c` winding (counter-clockwise seen
    /// from the side the normal points to).
    pub fn new(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) -> Self {
        let normal = Unit::new_normalize((b - a).cross(&(c - a)));
        Self { a, b, c, normal }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub position: Vector3<f32>,
    pub material_index: usize,
    pub triangles: Vec<Triangle>,
}

impl Model {
    pub fn new(position: Vector3<f32>, material_index: usize, triangles: Vec<Triangle>) -> Self {
        Self {
            position,
            material_index,
            triangles,
        }
    }

    // 닫힌 상자. 모든 면의 법선이 바깥을 향함
    pub fn cuboid(position: Vector3<f32>, half_extents: Vector3<f32>, material_index: usize) -> Self {
        let corner = |x: f32, y: f32, z: f32| {
            Vector3::new(x * half_extents.x, y * half_extents.y, z * half_extents.z)
        };

        let faces = [
            [corner(1.0, -1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, 1.0, 1.0), corner(1.0, -1.0, 1.0)],
            [corner(-1.0, -1.0, -1.0), corner(-1.0, -1.0, 1.0), corner(-1.0, 1.0, 1.0), corner(-1.0, 1.0, -1.0)],
            [corner(-1.0, 1.0, -1.0), corner(-1.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), corner(1.0, 1.0, -1.0)],
            [corner(-1.0, -1.0, -1.0), corner(1.0, -1.0, -1.0), corner(1.0, -1.0, 1.0), corner(-1.0, -1.0, 1.0)],
            [corner(-1.0, -1.0, 1.0), corner(1.0, -1.0, 1.0), corner(1.0, 1.0, 1.0), corner(-1.0, 1.0, 1.0)],
            [corner(-1.0, -1.0, -1.0), corner(-1.0, 1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, -1.0, -1.0)],
        ];

        let triangles = faces
            .iter()
            .flat_map(|[p0, p1, p2, p3]| [Triangle::new(*p0, *p1, *p2), Triangle::new(*p0, *p2, *p3)])
            .collect();

        Self::new(position, material_index, triangles)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub enabled: bool,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vector3::new(-1.0, -1.0, -1.0),
            enabled: false,
        }
    }
}

// 프레임을 그리는 동안에는 읽기 전용. 수정은 프레임 사이에만
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub models: Vec<Model>,
    pub materials: Vec<Material>,
    pub background_color: Vector3<f32>,
    pub directional_light: Option<DirectionalLight>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            spheres: vec![],
            models: vec![],
            materials: vec![],
            background_color: Vector3::zeros(),
            directional_light: None,
        }
    }
}

/// Which primitive a hit came from. Only valid for the scene it was
/// produced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveRef {
    Sphere(usize),
    Triangle { model: usize, triangle: usize },
}

impl fmt::Display for PrimitiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveRef::Sphere(index) => write!(f, "sphere {}", index),
            PrimitiveRef::Triangle { model, triangle } => {
                write!(f, "triangle {} of model {}", triangle, model)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    Sphere(&'a Sphere),
    Triangle { model: &'a Model, triangle: &'a Triangle },
}

impl Scene {
    // 구 먼저, 그 다음 모델 순서대로 삼각형. 교차 검사 순서와 같음
    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveRef, Primitive<'_>)> {
        let spheres = self
            .spheres
            .iter()
            .enumerate()
            .map(|(index, sphere)| (PrimitiveRef::Sphere(index), Primitive::Sphere(sphere)));

        let triangles = self.models.iter().enumerate().flat_map(|(model_index, model)| {
            model.triangles.iter().enumerate().map(move |(triangle_index, triangle)| {
                (
                    PrimitiveRef::Triangle {
                        model: model_index,
                        triangle: triangle_index,
                    },
                    Primitive::Triangle { model, triangle },
                )
            })
        });

        spheres.chain(triangles)
    }

    pub fn primitive(&self, reference: PrimitiveRef) -> Primitive<'_> {
        match reference {
            PrimitiveRef::Sphere(index) => Primitive::Sphere(&self.spheres[index]),
            PrimitiveRef::Triangle { model, triangle } => {
                let model = &self.models[model];
                Primitive::Triangle {
                    model,
                    triangle: &model.triangles[triangle],
                }
            }
        }
    }

    pub fn material_index(&self, reference: PrimitiveRef) -> usize {
        match reference {
            PrimitiveRef::Sphere(index) => self.spheres[index].material_index,
            PrimitiveRef::Triangle { model, .. } => self.models[model].material_index,
        }
    }

    // 잘못된 참조는 씬을 잘못 만든 것. 조용히 넘어가지 않고 바로 패닉
    pub fn material(&self, reference: PrimitiveRef) -> &Material {
        &self.materials[self.material_index(reference)]
    }

    pub fn active_light(&self) -> Option<&DirectionalLight> {
        self.directional_light.as_ref().filter(|light| light.enabled)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let count = self.materials.len();

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            if sphere.material_index >= count {
                return Err(SceneError::MaterialOutOfRange {
                    primitive: PrimitiveRef::Sphere(index),
                    index: sphere.material_index,
                    count,
                });
            }
        }

        for (index, model) in self.models.iter().enumerate() {
            if model.triangles.is_empty() {
                continue;
            }
            if model.material_index >= count {
                return Err(SceneError::MaterialOutOfRange {
                    primitive: PrimitiveRef::Triangle {
                        model: index,
                        triangle: 0,
                    },
                    index: model.material_index,
                    count,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene {
            spheres: vec![Sphere::default()],
            models: vec![Model::cuboid(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), 0)],
            materials: vec![Material::default()],
            ..Default::default()
        }
    }

    #[test]
    fn primitives_are_scanned_spheres_first() {
        let scene = scene();
        let references = scene.primitives().map(|(reference, _)| reference).collect::<Vec<_>>();

        assert_eq!(references.len(), 13);
        assert_eq!(references[0], PrimitiveRef::Sphere(0));
        assert_eq!(references[1], PrimitiveRef::Triangle { model: 0, triangle: 0 });
        assert_eq!(references[12], PrimitiveRef::Triangle { model: 0, triangle: 11 });
    }

    #[test]
    fn model_material_is_checked() {
        let mut scene = scene();
        scene.models[0].material_index = 3;

        assert_eq!(
            scene.validate(),
            Err(SceneError::MaterialOutOfRange {
                primitive: PrimitiveRef::Triangle { model: 0, triangle: 0 },
                index: 3,
                count: 1,
            })
        );
    }

    #[test]
    fn empty_material_list_is_rejected() {
        let mut scene = scene();
        scene.materials.clear();
        assert!(scene.validate().is_err());

        assert!(Scene::default().validate().is_ok());
    }

    #[test]
    #[should_panic]
    fn material_lookup_panics_on_bad_reference() {
        let scene = scene();
        scene.material(PrimitiveRef::Sphere(4));
    }

    #[test]
    fn references_describe_themselves() {
        assert_eq!(PrimitiveRef::Sphere(2).to_string(), "sphere 2");
        assert_eq!(
            PrimitiveRef::Triangle { model: 1, triangle: 5 }.to_string(),
            "triangle 5 of model 1"
        );
    }

    #[test]
    fn light_must_be_enabled() {
        let mut scene = scene();
        scene.directional_light = Some(DirectionalLight::default());
        assert!(scene.active_light().is_none());

        if let Some(light) = scene.directional_light.as_mut() {
            light.enabled = true;
        }
        assert!(scene.active_light().is_some());
    }
}
