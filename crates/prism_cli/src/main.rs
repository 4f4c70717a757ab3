mod cli;
mod demo;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Args;
use prism_renderer::{
    load_scene, render_aov, tonemap::to_rgb8, write_image, Aov, RenderConfig, Scene, ToneMap,
};
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Prism");

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker thread pool")?;
    }

    let (mut scene, mut config) = match &args.scene {
        Some(path) => load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the demo room");
            (demo::demo_scene(), demo::demo_config())
        }
    };
    apply_overrides(&args, &mut scene, &mut config)?;

    let camera = scene.camera();
    log::info!(
        "Rendering {}x{} @ {} spp, max recursion {}",
        camera.width,
        camera.height,
        camera.anti_aliasing_amount,
        config.max_recursion
    );

    let start = Instant::now();
    let aov = Aov::from(args.aov);
    let image = render_aov(&scene, aov, &config);

    // Diagnostic passes are already in [0, 1] and stay linear
    let rgb = match aov {
        Aov::Beauty => to_rgb8(&image, ToneMap::from(args.tonemap), args.gamma),
        _ => to_rgb8(&image, ToneMap::Clamp, 1.0),
    };

    write_image(&args.output, rgb, image.width, image.height)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Done in {:.2?}", start.elapsed());
    Ok(())
}

fn apply_overrides(args: &Args, scene: &mut Scene, config: &mut RenderConfig) -> Result<()> {
    if args.width == Some(0) || args.height == Some(0) {
        bail!("Image width and height must be non-zero");
    }
    if args.samples == Some(0) {
        bail!("Sample count must be at least 1");
    }
    if args.gamma <= 0.0 {
        bail!("Gamma must be positive, got {}", args.gamma);
    }

    let camera = scene.camera_mut();
    if let Some(width) = args.width {
        camera.width = width;
    }
    if let Some(height) = args.height {
        camera.height = height;
    }
    if let Some(samples) = args.samples {
        camera.anti_aliasing_amount = samples;
    }

    if let Some(max_recursion) = args.max_recursion {
        config.max_recursion = max_recursion;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    Ok(())
}
