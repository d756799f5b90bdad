use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use spheretrace::*;

/// Renders a scene of spheres to an ASCII PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Scene file (TOML). Renders the built-in demo scene if omitted.
    scene: Option<PathBuf>,

    /// Write the image here instead of to stdout.
    #[clap(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write a numbered capture (`render0.ppm`, ...) into this directory.
    #[clap(long)]
    output_dir: Option<PathBuf>,

    #[clap(long)]
    seed: Option<u64>,

    /// Samples per pixel.
    #[clap(short, long)]
    samples: Option<usize>,

    /// Maximum number of bounces.
    #[clap(short, long)]
    depth: Option<u32>,

    #[clap(long)]
    width: Option<usize>,

    #[clap(long)]
    height: Option<usize>,

    /// Render on a single thread.
    #[clap(long)]
    serial: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut file = match &args.scene {
        Some(path) => SceneFile::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => {
            info!("no scene file given, rendering the demo scene");
            demo_scene().context("parsing built-in demo scene")?
        }
    };

    let render_settings = &mut file.render;
    if let Some(seed) = args.seed {
        render_settings.seed = seed;
    }
    if let Some(samples) = args.samples {
        render_settings.samples = samples;
    }
    if let Some(depth) = args.depth {
        render_settings.max_depth = depth;
    }
    if let Some(width) = args.width {
        render_settings.width = width;
    }
    if let Some(height) = args.height {
        render_settings.height = height;
    }

    let Setup {
        scene,
        camera,
        settings,
    } = file.build().context("building scene")?;

    let image = if args.serial {
        render_serial(&scene, &camera, &settings)?
    } else {
        render(&scene, &camera, &settings)?
    };

    if let Some(dir) = args.output_dir {
        PpmSink::new(dir, "render")
            .write(&image)
            .context("writing capture")?;
    } else if let Some(path) = args.output {
        let mut out = BufWriter::new(
            File::create(&path).with_context(|| format!("creating {}", path.display()))?,
        );
        write_ppm(&image, &mut out)?;
        out.flush()?;
        info!("wrote {}", path.display());
    } else {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_ppm(&image, &mut out)?;
        out.flush()?;
    }

    Ok(())
}
