use nalgebra::{Isometry3, Perspective3, Point3, Unit, UnitQuaternion, Vector3};
use rayon::prelude::*;

// 정확히 위나 아래를 보면 오른쪽 축을 정할 수 없음
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// What the sampler needs from a camera: where primary rays start and one
/// precomputed direction per pixel of the current resolution.
pub trait CameraRays {
    fn position(&self) -> Point3<f32>;

    fn resolution(&self) -> (u32, u32);

    fn ray_direction(&self, x: u32, y: u32) -> Vector3<f32>;
}

pub struct Camera {
    projection: Perspective3<f32>,
    view: Isometry3<f32>,

    vertical_fov: f32,
    near: f32,
    far: f32,

    position: Point3<f32>,
    forward: Unit<Vector3<f32>>,

    rays: Vec<Vector3<f32>>,
    width: u32,
    height: u32,
}

impl Camera {
    // vertical_fov는 도 단위
    pub fn new(vertical_fov: f32, near: f32, far: f32) -> Self {
        let position = Point3::new(0.0, 0.0, 6.0);
        let forward = -Vector3::z_axis();

        Self {
            projection: Perspective3::new(1.0, vertical_fov.to_radians(), near, far),
            view: Self::look(&position, &forward),
            vertical_fov,
            near,
            far,
            position,
            forward,
            rays: vec![],
            width: 0,
            height: 0,
        }
    }

    pub fn forward(&self) -> Unit<Vector3<f32>> {
        self.forward
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }

        self.width = width;
        self.height = height;

        self.reevaluate_projection();
        self.reevaluate_rays();
    }

    // 시점이 바뀌었으면 true. 호출한 쪽에서 누적을 초기화해야 함
    pub fn move_to(&mut self, position: Point3<f32>, forward: Vector3<f32>) -> bool {
        let Some(forward) = Unit::try_new(forward, f32::EPSILON) else {
            return false;
        };
        if elevation(&forward).abs() > PITCH_LIMIT {
            return false;
        }
        if position == self.position && forward == self.forward {
            return false;
        }

        self.position = position;
        self.forward = forward;

        self.reevaluate_view();
        self.reevaluate_rays();

        true
    }

    // 라디안 단위. yaw는 오른쪽이 양수, pitch는 위쪽이 양수
    // pitch는 PITCH_LIMIT을 넘지 않게 잘림
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) -> bool {
        let current = elevation(&self.forward);
        let pitch_delta = (current + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT) - current;

        if yaw_delta == 0.0 && pitch_delta == 0.0 {
            return false;
        }

        let up: Unit<Vector3<f32>> = Vector3::y_axis();
        let right = Unit::new_normalize(self.forward.cross(up.as_ref()));

        let q = UnitQuaternion::from_axis_angle(&right, pitch_delta)
            * UnitQuaternion::from_axis_angle(&up, -yaw_delta);

        self.forward = q * self.forward;
        self.forward.renormalize_fast();

        self.reevaluate_view();
        self.reevaluate_rays();

        true
    }

    fn look(position: &Point3<f32>, forward: &Unit<Vector3<f32>>) -> Isometry3<f32> {
        let target = position + forward.as_ref();
        Isometry3::look_at_rh(position, &target, &Vector3::y_axis())
    }

    fn reevaluate_projection(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let aspect = self.width as f32 / self.height as f32;
        self.projection = Perspective3::new(aspect, self.vertical_fov.to_radians(), self.near, self.far);
    }

    fn reevaluate_view(&mut self) {
        self.view = Self::look(&self.position, &self.forward);
    }

    // 픽셀 중심을 지나는 광선. 0번 줄이 화면 아래쪽
    fn reevaluate_rays(&mut self) {
        let (width, height) = (self.width, self.height);
        let projection = &self.projection;
        let view = &self.view;

        self.rays = (0..width as usize * height as usize)
            .into_par_iter()
            .map(|index| {
                let x = (index % width as usize) as u32;
                let y = (index / width as usize) as u32;

                let ndc = Point3::new(
                    (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
                    (y as f32 + 0.5) / height as f32 * 2.0 - 1.0,
                    1.0,
                );

                // 뷰 좌표계의 먼 평면 위 점 -> 월드 좌표계 방향
                let target = projection.unproject_point(&ndc);
                view.inverse_transform_vector(&target.coords.normalize())
            })
            .collect();
    }
}

// 수평면에서 위로 올려다본 각도
fn elevation(forward: &Unit<Vector3<f32>>) -> f32 {
    forward.y.clamp(-1.0, 1.0).asin()
}

impl CameraRays for Camera {
    fn position(&self) -> Point3<f32> {
        self.position
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn ray_direction(&self, x: u32, y: u32) -> Vector3<f32> {
        self.rays[y as usize * self.width as usize + x as usize]
    }
}
