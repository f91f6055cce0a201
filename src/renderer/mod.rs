use log::{debug, trace};

use crate::camera::CameraRays;
use crate::error::RenderError;
use crate::renderer::accumulation::AccumulationBuffer;
use crate::renderer::output::OutputImage;
use crate::renderer::sampler::{PathSampler, ShadingMode};
use crate::renderer::scene::Scene;
use crate::renderer::schedule::FrameScheduler;

pub mod accumulation;
pub mod intersect;
pub mod output;
pub mod ray;
pub mod sampler;
pub mod scene;
pub mod schedule;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // 끄면 매 프레임이 1번 프레임
    pub accumulate: bool,
    pub bounce_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accumulate: true,
            bounce_limit: 5,
        }
    }
}

pub struct Renderer {
    output: OutputImage,
    accumulation: AccumulationBuffer,
    scheduler: FrameScheduler,
    pub settings: Settings,
}

impl Renderer {
    pub fn new(settings: Settings) -> Self {
        Self {
            output: OutputImage::new(0, 0),
            accumulation: AccumulationBuffer::new(0, 0),
            scheduler: FrameScheduler::global(),
            settings,
        }
    }

    pub fn with_threads(settings: Settings, threads: usize) -> Result<Self, RenderError> {
        Ok(Self {
            scheduler: FrameScheduler::new(threads)?,
            ..Self::new(settings)
        })
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.output.size() == (width, height) {
            return;
        }

        debug!("resizing renderer to {}x{}", width, height);

        // 해상도가 바뀌면 이전에 쌓은 값은 의미가 없으니 새로 만듦
        self.output = OutputImage::new(width, height);
        self.accumulation = AccumulationBuffer::new(width, height);
    }

    /// Renders one full frame. Nothing is written and the frame counter does
    /// not move when the scene or camera is rejected.
    pub fn render_frame<C: CameraRays + Sync + ?Sized>(
        &mut self,
        scene: &Scene,
        camera: &C,
    ) -> Result<(), RenderError> {
        scene.validate()?;

        let expected = self.output.size();
        let actual = camera.resolution();
        if expected != actual {
            return Err(RenderError::CameraMismatch { expected, actual });
        }

        let sampler = PathSampler::new(self.settings.bounce_limit, ShadingMode::for_scene(scene));
        trace!(
            "frame {} ({}x{}, {:?})",
            self.accumulation.frame_index(),
            expected.0,
            expected.1,
            sampler.mode
        );

        self.accumulation.begin_frame();
        self.scheduler
            .dispatch(&sampler, scene, camera, &mut self.accumulation, &mut self.output);
        self.accumulation.end_frame(self.settings.accumulate);

        Ok(())
    }

    pub fn reset_accumulation(&mut self) {
        debug!("accumulation reset at frame {}", self.accumulation.frame_index());
        self.accumulation.reset();
    }

    pub fn output_image(&self) -> &OutputImage {
        &self.output
    }

    pub fn accumulation(&self) -> &AccumulationBuffer {
        &self.accumulation
    }

    pub fn frame_index(&self) -> u32 {
        self.accumulation.frame_index()
    }

    pub fn threads(&self) -> usize {
        self.scheduler.threads()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
