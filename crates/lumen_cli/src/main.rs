use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render, PinholeCamera};
use std::time::Instant;

mod cli;
mod description;
mod encode;

use cli::Args;
use description::SceneDescription;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Lumen");

    // Build the scene
    let start = Instant::now();
    let description = match &args.scene {
        Some(path) => SceneDescription::load(path)?,
        None => SceneDescription::reference(),
    };
    let scene = description.build().context("Failed to build scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    // Set up camera
    let mut camera = PinholeCamera::new(args.width, args.height);
    if let Some(origin) = args.camera_origin.or_else(|| description.camera_origin()) {
        camera = camera.with_origin(origin);
    }

    let config = args.render_config();
    let (image, stats) = render(&scene, &camera, &config).context("Render failed")?;

    encode::save(&image, &args.output)?;
    log::info!(
        "Saved {} ({} workers, {:?})",
        args.output.display(),
        stats.workers,
        stats.elapsed
    );

    Ok(())
}
