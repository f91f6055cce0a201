use nalgebra::{Point3, Vector3};

// direction은 단위 벡터가 아니어도 됨. 교차 계산에서 길이의 제곱으로 나눔
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }
}
