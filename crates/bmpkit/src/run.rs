use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bmpkit_core::{codec, transform, BmpHeader, BmpImage};
use log::info;
use serde::Serialize;

use crate::args::{Command, Invocation, USAGE};
use crate::config::CliConfig;

/// Header plus the layout values derived from it, as printed by `info`.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    row_stride: usize,
    pixel_bytes: usize,
    gap_bytes: usize,
    header: &'a BmpHeader,
}

pub fn run(invocation: Invocation) -> anyhow::Result<()> {
    if invocation.command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = CliConfig::load(invocation.config.as_deref())?;

    match invocation.command {
        Command::Help => {}
        Command::Info { input } => {
            let image = load(&input)?;
            println!("{}", describe(&image)?);
        }
        Command::Rotate {
            direction,
            input,
            output,
        } => {
            let image = load(&input)?;
            let rotated = transform::rotate(&image, direction)?;
            save(&output, &rotated)?;
        }
        Command::Blur {
            sigma,
            input,
            output,
        } => {
            let mut image = load(&input)?;
            transform::gaussian_blur_in_place(&mut image, sigma.unwrap_or(config.sigma))?;
            save(&output, &image)?;
        }
        Command::BoxBlur { input, output } => {
            let image = load(&input)?;
            save(&output, &transform::box_blur(&image))?;
        }
        Command::All {
            sigma,
            out_dir,
            input,
        } => {
            let dir = out_dir
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| input.parent().map(Path::to_path_buf).unwrap_or_default());
            run_all(&config, sigma.unwrap_or(config.sigma), &dir, &input)?;
        }
    }
    Ok(())
}

/// Rotate both ways, box blur, and Gaussian blur `input`, writing each
/// result into `dir`.
pub fn run_all(config: &CliConfig, sigma: f64, dir: &Path, input: &Path) -> anyhow::Result<()> {
    // Reject a bad sigma before any output exists
    transform::gaussian_kernel(sigma)?;

    let names = &config.outputs;
    let mut image = load(input)?;

    let right = transform::rotate_clockwise(&image)?;
    save(&output_path(dir, &names.rotated_right, input)?, &right)?;
    drop(right);

    let left = transform::rotate_counterclockwise(&image)?;
    save(&output_path(dir, &names.rotated_left, input)?, &left)?;
    drop(left);

    let boxed = transform::box_blur(&image);
    save(&output_path(dir, &names.box_blurred, input)?, &boxed)?;
    drop(boxed);

    transform::gaussian_blur_in_place(&mut image, sigma)?;
    save(&output_path(dir, &names.blurred, input)?, &image)?;

    Ok(())
}

/// `<dir>/<prefix><file name of input>`
pub fn output_path(dir: &Path, prefix: &str, input: &Path) -> anyhow::Result<PathBuf> {
    let name = input
        .file_name()
        .with_context(|| format!("{} has no file name", input.display()))?;
    let mut file = OsString::from(prefix);
    file.push(name);
    Ok(dir.join(file))
}

fn describe(image: &BmpImage) -> anyhow::Result<String> {
    let header = image.header();
    let summary = Summary {
        row_stride: image.pixels().stride(),
        pixel_bytes: image.pixels().as_bytes().len(),
        gap_bytes: header.gap.len(),
        header,
    };
    toml::to_string(&summary).context("failed to format header")
}

fn load(path: &Path) -> anyhow::Result<BmpImage> {
    codec::load(path).with_context(|| format!("failed to load {}", path.display()))
}

fn save(path: &Path, image: &BmpImage) -> anyhow::Result<()> {
    codec::save(path, image).with_context(|| format!("failed to save {}", path.display()))?;
    info!(
        "wrote {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(())
}
