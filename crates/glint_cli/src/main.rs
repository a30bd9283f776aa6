use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::load_scene;
use glint_renderer::{Progressive, Scene};

mod cli;

use cli::{output_path, Args};

/// Load, render and save one scene file.
fn render_file(infile: &Path, args: &Args) -> Result<()> {
    let description = load_scene(infile, args.factor)
        .with_context(|| format!("Failed to load scene {}", infile.display()))?;

    let samples = args.samples.unwrap_or(description.samples);
    let mut scene = Scene::new(description);
    log::info!(
        "Rendering {} at {}x{}",
        infile.display(),
        scene.camera.width,
        scene.camera.height
    );

    Progressive::new(&mut scene).run(samples);

    let image = scene.image();
    let path = output_path(&args.outdir, infile);
    image::save_buffer(
        &path,
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Saved {}", path.display());
    Ok(())
}

/// Render every scene, carrying on past failures. Returns the failure count.
fn render_all(args: &Args) -> usize {
    let mut failures = 0;
    for infile in &args.infiles {
        if let Err(err) = render_file(infile, args) {
            log::error!("{:#}", err);
            failures += 1;
        }
    }
    failures
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    std::fs::create_dir_all(&args.outdir)
        .with_context(|| format!("Failed to create {}", args.outdir.display()))?;

    let failures = match args.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build render thread pool")?;
            log::info!("Rendering with {} threads", pool.current_num_threads());
            pool.install(|| render_all(&args))
        }
        None => render_all(&args),
    };

    if failures > 0 {
        anyhow::bail!("{} of {} scenes failed", failures, args.infiles.len());
    }
    Ok(())
}
