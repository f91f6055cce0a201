use thiserror::Error;

use crate::renderer::scene::PrimitiveRef;

/// Scene construction mistakes. These can never happen for a scene built
/// correctly, so a frame is refused instead of rendered with garbage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("{primitive} uses material {index}, but the scene only has {count} materials")]
    MaterialOutOfRange {
        primitive: PrimitiveRef,
        index: usize,
        count: usize,
    },

    #[error("sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("camera provides {actual:?} rays, renderer expects {expected:?}")]
    CameraMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
