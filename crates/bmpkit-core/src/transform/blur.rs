//! Gaussian and box blur.
//!
//! The Gaussian blur is a one-dimensional convolution along each row only.
//! It does not run a vertical pass, so it smooths horizontally and leaves
//! vertical detail untouched.
//!
//! The box blur is a 3x3 mean over interior pixels; the outermost ring of
//! pixels is copied through unchanged.

use log::{debug, trace};

use crate::bitmap::BmpImage;
use crate::error::{BmpError, Result};

/// Largest kernel [`gaussian_kernel`] will build.
const MAX_KERNEL_LEN: usize = 1 << 20;

/// Build a normalized 1-D Gaussian kernel.
///
/// The kernel has `floor(6 * sigma) + 1` taps, centered on index
/// `(len - 1) / 2`, with weights `exp(-x^2 / (2 * sigma^2))` for offset `x`
/// from the center, scaled to sum to 1. Even lengths are not corrected, so
/// such kernels extend one tap further to the right than to the left.
pub fn gaussian_kernel(sigma: f64) -> Result<Vec<f64>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BmpError::invalid(format!(
            "sigma must be a positive finite number, got {sigma}"
        )));
    }

    let span = (6.0 * sigma).floor();
    if span >= MAX_KERNEL_LEN as f64 {
        return Err(BmpError::invalid(format!(
            "sigma {sigma} needs a kernel wider than {MAX_KERNEL_LEN} taps"
        )));
    }

    let len = span as usize + 1;
    let center = ((len - 1) / 2) as f64;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut kernel: Vec<f64> = (0..len)
        .map(|i| {
            let x = i as f64 - center;
            (-(x * x) / two_sigma_sq).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }

    trace!("gaussian kernel sigma={} len={} center={}", sigma, len, center);
    Ok(kernel)
}

/// Blur each row with a Gaussian kernel, returning a new image.
///
/// Samples past either end of a row are clamped to the first or last
/// pixel. Results are truncated toward zero when stored as bytes. Row
/// padding is carried over from the source.
pub fn gaussian_blur(image: &BmpImage, sigma: f64) -> Result<BmpImage> {
    let kernel = gaussian_kernel(sigma)?;
    let src = image.pixels();
    let (width, height, bpp) = (src.width(), src.height(), src.bytes_per_pixel());

    debug!(
        "gaussian blur {}x{} sigma={} ({} taps)",
        width,
        height,
        sigma,
        kernel.len()
    );

    let mut output = image.clone();
    let dst = output.pixels_mut();

    let half = ((kernel.len() - 1) / 2) as isize;
    let last = width as isize - 1;
    let mut acc = vec![0.0f64; bpp];

    for y in 0..height {
        let row = src.row(y);
        for x in 0..width {
            acc.fill(0.0);
            for (i, weight) in kernel.iter().enumerate() {
                let pos = (x as isize + i as isize - half).clamp(0, last) as usize;
                let sample = &row[pos * bpp..(pos + 1) * bpp];
                for (sum, &value) in acc.iter_mut().zip(sample) {
                    *sum += value as f64 * weight;
                }
            }
            for (out, sum) in dst.pixel_mut(x, y).iter_mut().zip(&acc) {
                *out = *sum as u8;
            }
        }
    }

    Ok(output)
}

/// Blur each row with a Gaussian kernel, replacing the caller's pixels.
///
/// The blur is computed from an untouched copy, so every output pixel sees
/// original neighbours. On error the image is left unchanged.
pub fn gaussian_blur_in_place(image: &mut BmpImage, sigma: f64) -> Result<()> {
    let (_, pixels) = gaussian_blur(image, sigma)?.into_parts();
    image.replace_pixels(pixels)?;
    Ok(())
}

/// Apply a 3x3 mean filter to every interior pixel.
///
/// Each channel of an interior pixel becomes the truncated mean of its
/// 3x3 neighbourhood. Pixels in the first and last row and column keep
/// their source values. Images narrower or shorter than 3 pixels are
/// returned unchanged.
pub fn box_blur(image: &BmpImage) -> BmpImage {
    let src = image.pixels();
    let (width, height, bpp) = (src.width(), src.height(), src.bytes_per_pixel());

    debug!("box blur {}x{}", width, height);

    let mut output = image.clone();
    if width < 3 || height < 3 {
        return output;
    }

    let data = src.as_bytes();
    let dst = output.pixels_mut();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            for c in 0..bpp {
                let mut sum = 0u16;
                for ny in y - 1..=y + 1 {
                    for nx in x - 1..=x + 1 {
                        sum += data[src.offset(nx, ny) + c] as u16;
                    }
                }
                dst.pixel_mut(x, y)[c] = (sum / 9) as u8;
            }
        }
    }

    output
}
