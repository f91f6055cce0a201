use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::app::{demo_scene, Application};
use crate::renderer::{Renderer, Settings};

pub mod app;
pub mod camera;
pub mod error;
pub mod renderer;
pub mod util;

pub use error::{RenderError, SceneError};

// 한 변의 최대 픽셀 수
pub const MAX_DIMENSION: u32 = 16384;

#[derive(Parser, Debug)]
#[command(name = "ember", version, about = "Progressive CPU path tracer")]
pub struct Cli {
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    pub width: u32,

    #[arg(long, default_value_t = 360, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    pub height: u32,

    // 누적할 프레임 수
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    #[arg(long, default_value_t = 5)]
    pub bounces: u32,

    // 0이면 rayon 기본값
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    #[arg(long)]
    pub no_accumulate: bool,

    // 발광 재질 대신 방향성 조명으로 그리기
    #[arg(long)]
    pub directional: bool,

    #[arg(long, default_value = "ember.png")]
    pub output: PathBuf,
}

pub fn run() -> Result<()> {
    // 로거 초기화. RUST_LOG로 출력 수준 조절
    env_logger::init();

    let cli = Cli::parse();
    render(&cli)
}

pub fn render(cli: &Cli) -> Result<()> {
    let settings = Settings {
        accumulate: !cli.no_accumulate,
        bounce_limit: cli.bounces,
    };
    let renderer = Renderer::with_threads(settings, cli.threads)
        .context("failed to create renderer")?;

    let mut scene = demo_scene();
    if let Some(light) = scene.directional_light.as_mut() {
        light.enabled = cli.directional;
    }

    let mut app = Application::new(renderer, scene, cli.width, cli.height);
    info!(
        "rendering {} frames at {}x{} on {} threads",
        cli.frames,
        cli.width,
        cli.height,
        app.renderer.threads()
    );

    for _ in 0..cli.frames {
        app.render().context("frame render failed")?;
    }
    info!(
        "last frame {:.3}ms, average {:.3}ms",
        app.last_render_ms(),
        app.average_render_ms()
    );

    app.renderer
        .output_image()
        .save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("wrote {}", cli.output.display());

    Ok(())
}
