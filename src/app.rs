use std::time::Instant;

use log::debug;
use nalgebra::{Point3, Vector3};

use crate::camera::Camera;
use crate::error::RenderError;
use crate::renderer::output::OutputImage;
use crate::renderer::scene::{DirectionalLight, Material, Model, Scene, Sphere};
use crate::renderer::{Renderer, Settings};

// 창 없이 돌아가는 앱 레이어. 렌더러, 카메라, 씬을 묶어서 관리함
pub struct Application {
    pub renderer: Renderer,
    // 고칠 때는 move_camera, edit_scene을 거쳐야 누적이 초기화됨
    camera: Camera,
    scene: Scene,
    width: u32,
    height: u32,
    last_render_ms: f64,
    average_render_ms: f64,
    timed_frames: u32,
}

impl Application {
    pub fn new(renderer: Renderer, scene: Scene, width: u32, height: u32) -> Self {
        Self {
            renderer,
            camera: Camera::new(45.0, 0.1, 100.0),
            scene,
            width,
            height,
            last_render_ms: 0.0,
            average_render_ms: 0.0,
            timed_frames: 0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    // 카메라가 움직였으면 누적을 처음부터 다시 함
    pub fn move_camera(&mut self, position: Point3<f32>, forward: Vector3<f32>) -> bool {
        let moved = self.camera.move_to(position, forward);
        if moved {
            self.reset();
        }
        moved
    }

    // 씬을 고친 뒤에는 반드시 호출해야 이전 결과가 섞이지 않음
    pub fn edit_scene<F: FnOnce(&mut Scene)>(&mut self, edit: F) {
        edit(&mut self.scene);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.renderer.reset_accumulation();
        self.average_render_ms = 0.0;
        self.timed_frames = 0;
    }

    pub fn render(&mut self) -> Result<&OutputImage, RenderError> {
        let start = Instant::now();

        self.renderer.on_resize(self.width, self.height);
        self.camera.on_resize(self.width, self.height);
        self.renderer.render_frame(&self.scene, &self.camera)?;

        self.last_render_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.timed_frames += 1;
        self.average_render_ms +=
            (self.last_render_ms - self.average_render_ms) / self.timed_frames as f64;

        debug!(
            "frame rendered in {:.3}ms (average {:.3}ms)",
            self.last_render_ms, self.average_render_ms
        );

        Ok(self.renderer.output_image())
    }

    pub fn last_render_ms(&self) -> f64 {
        self.last_render_ms
    }

    pub fn average_render_ms(&self) -> f64 {
        self.average_render_ms
    }
}

pub fn demo_scene() -> Scene {
    let pink = Material {
        albedo: Vector3::new(1.0, 0.0, 1.0),
        roughness: 0.3,
        ..Default::default()
    };
    let blue = Material {
        albedo: Vector3::new(0.2, 0.3, 1.0),
        roughness: 0.9,
        ..Default::default()
    };
    let orange = Material {
        albedo: Vector3::new(0.8, 0.5, 0.2),
        roughness: 0.1,
        emission_color: Vector3::new(0.8, 0.5, 0.2),
        emission_power: 2.0,
        ..Default::default()
    };

    Scene {
        spheres: vec![
            Sphere {
                position: Vector3::zeros(),
                radius: 1.0,
                material_index: 0,
            },
            Sphere {
                position: Vector3::new(-2.0, 1.0, -2.0),
                radius: 1.0,
                material_index: 2,
            },
            // 바닥 역할을 하는 큰 구
            Sphere {
                position: Vector3::new(0.0, -101.0, 0.0),
                radius: 100.0,
                material_index: 1,
            },
        ],
        models: vec![Model::cuboid(
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.5, 0.5, 0.5),
            2,
        )],
        materials: vec![pink, blue, orange],
        background_color: Vector3::new(0.6, 0.7, 0.9),
        directional_light: Some(DirectionalLight::default()),
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new(Renderer::new(Settings::default()), demo_scene(), 0, 0)
    }
}
