// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boot splash: draws the logo on the framebuffer, or into a PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use splash::{Canvas, QuarterTurn, Splash, SplashConfig};
use splash_fbdev::{display_rotation, Framebuffer, DEFAULT_DEVICE, DEVICE_TREE_ROOT};
use tracing_subscriber::prelude::*;

/// Draw the boot logo.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Framebuffer device to draw on.
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Device tree searched for the panel rotation.
    #[arg(long, default_value = DEVICE_TREE_ROOT)]
    device_tree: PathBuf,

    /// Rotation in degrees, overriding the device tree.
    #[arg(long, allow_negative_numbers = true)]
    rotation: Option<i32>,

    /// Share of the screen the logo occupies.
    #[arg(long, default_value_t = splash::layout::DEFAULT_FRACTION)]
    fraction: f64,

    /// Background color as hex RGB, e.g. `000000`.
    #[arg(long, default_value = "000000", value_parser = parse_hex_rgb)]
    background: u32,

    /// Render offscreen into this PNG instead of the framebuffer.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Width of the offscreen image.
    #[arg(long, default_value_t = 1280, requires = "png")]
    width: u32,

    /// Height of the offscreen image.
    #[arg(long, default_value_t = 720, requires = "png")]
    height: u32,
}

fn parse_hex_rgb(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches('#');
    if digits.len() != 6 {
        return Err(format!("expected 6 hex digits, got {s:?}"));
    }
    u32::from_str_radix(digits, 16).map_err(|e| e.to_string())
}

impl Args {
    fn config(&self) -> SplashConfig {
        let rotation = match self.rotation {
            Some(degrees) => QuarterTurn::from_degrees(degrees),
            None => display_rotation(&self.device_tree),
        };
        SplashConfig {
            background: self.background,
            fraction: self.fraction,
            rotation,
        }
    }
}

fn render_png(splash: &Splash<'_>, args: &Args, path: &Path) -> Result<()> {
    let mut canvas = Canvas::new(args.width, args.height);
    splash.render(&mut canvas);
    let image = image::RgbImage::from_fn(args.width, args.height, |x, y| {
        let [_, r, g, b] = canvas.pixel(x, y).unwrap_or_default().to_be_bytes();
        image::Rgb([r, g, b])
    });
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))
}

fn render_device(splash: &Splash<'_>, args: &Args) -> Result<()> {
    let mut fb = Framebuffer::open(&args.device)
        .with_context(|| format!("opening {}", args.device.display()))?;
    splash.render(&mut fb);
    fb.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let config = args.config();
    tracing::info!(rotation = config.rotation.degrees(), "starting splash");
    let splash = Splash::new(config);

    match &args.png {
        Some(path) => render_png(&splash, &args, path),
        None => render_device(&splash, &args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_background() {
        assert_eq!(parse_hex_rgb("ff5555"), Ok(0x00ff_5555));
        assert_eq!(parse_hex_rgb("#000000"), Ok(0));
        assert!(parse_hex_rgb("fff").is_err());
        assert!(parse_hex_rgb("gggggg").is_err());
    }

    #[test]
    fn rotation_flag_overrides_device_tree() {
        let args = Args::parse_from([
            "fbsplash",
            "--rotation",
            "-90",
            "--device-tree",
            "/nonexistent",
        ]);
        assert_eq!(args.config().rotation, QuarterTurn::Deg270);
    }

    #[test]
    fn arguments_are_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
