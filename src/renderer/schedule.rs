use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::camera::CameraRays;
use crate::error::RenderError;
use crate::renderer::accumulation::AccumulationBuffer;
use crate::renderer::output::{vec4_to_rgba, OutputImage};
use crate::renderer::sampler::PathSampler;
use crate::renderer::scene::Scene;
use crate::util::pixel_seed;

/// Fans one frame out over worker threads, one row per task.
///
/// Every pixel only touches its own accumulation slot and output slot, so
/// rows are handed out as disjoint mutable chunks and nothing is locked.
pub struct FrameScheduler {
    // None이면 rayon 전역 스레드 풀 사용
    pool: Option<ThreadPool>,
}

impl FrameScheduler {
    pub fn new(threads: usize) -> Result<Self, RenderError> {
        if threads == 0 {
            return Ok(Self::global());
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("ember-worker-{}", index))
            .build()?;

        Ok(Self { pool: Some(pool) })
    }

    pub fn global() -> Self {
        Self { pool: None }
    }

    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, ThreadPool::current_num_threads)
    }

    // 모든 픽셀이 다 끝나야 돌아옴
    pub fn dispatch<C: CameraRays + Sync + ?Sized>(
        &self,
        sampler: &PathSampler,
        scene: &Scene,
        camera: &C,
        accumulation: &mut AccumulationBuffer,
        output: &mut OutputImage,
    ) {
        let width = accumulation.width();
        let frame_index = accumulation.frame_index();
        if width == 0 || accumulation.height() == 0 {
            return;
        }

        let samples = accumulation.samples_mut();
        let pixels = output.pixels_mut();

        let mut pass = || {
            samples
                .par_chunks_mut(width as usize)
                .zip(pixels.par_chunks_mut(width as usize))
                .enumerate()
                .for_each(|(y, (sample_row, pixel_row))| {
                    let y = y as u32;
                    for (x, (sum, pixel)) in sample_row.iter_mut().zip(pixel_row.iter_mut()).enumerate() {
                        let x = x as u32;
                        let seed = pixel_seed(x, y, width, frame_index);

                        *sum += sampler.sample(scene, camera, x, y, seed);

                        let accumulated = *sum / frame_index as f32;
                        let displayed = accumulated.map(|channel| channel.clamp(0.0, 1.0));
                        *pixel = vec4_to_rgba(&displayed);
                    }
                });
        };

        match &self.pool {
            Some(pool) => pool.install(pass),
            None => pass(),
        }
    }
}
