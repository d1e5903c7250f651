//! Quarter-turn rotation.
//!
//! Both directions share one loop that visits every source pixel exactly
//! once and copies its channels to the mapped destination:
//!
//! ```text
//! clockwise:          (x, y) -> (y,             new_h - 1 - x)
//! counter-clockwise:  (x, y) -> (new_w - 1 - y, x)
//! ```
//!
//! where `(x, y)` is column, row and `new_w = old_h`, `new_h = old_w`.

use log::debug;

use crate::bitmap::BmpImage;
use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Direction of a 90-degree rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The direction that undoes this one.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }

    /// Destination `(column, row)` of source pixel `(x, y)` in an output of
    /// `new_w` by `new_h` pixels.
    #[inline]
    fn map(self, x: usize, y: usize, new_w: usize, new_h: usize) -> (usize, usize) {
        match self {
            RotationDirection::Clockwise => (y, new_h - 1 - x),
            RotationDirection::CounterClockwise => (new_w - 1 - y, x),
        }
    }
}

/// Rotate an image by 90 degrees.
///
/// The output has width and height swapped, a stride computed for the new
/// width, and recomputed `data_size`/`file_size` header fields. All other
/// header fields, including the gap, are carried over.
///
/// # Example
///
/// ```ignore
/// use bmpkit_core::transform::{rotate, RotationDirection};
///
/// let rotated = rotate(&image, RotationDirection::Clockwise)?;
/// assert_eq!(rotated.width(), image.height());
/// ```
pub fn rotate(image: &BmpImage, direction: RotationDirection) -> Result<BmpImage> {
    let src = image.pixels();
    let (old_w, old_h) = (src.width(), src.height());
    let (new_w, new_h) = (old_h, old_w);
    let bpp = src.bytes_per_pixel();

    debug!(
        "rotating {}x{} image {:?} to {}x{}",
        old_w, old_h, direction, new_w, new_h
    );

    let source_header = image.header();
    let header = source_header.with_dimensions(source_header.height, source_header.width)?;
    let mut dst = PixelBuffer::zeroed(new_w, new_h, bpp);

    for y in 0..old_h {
        for x in 0..old_w {
            let (dx, dy) = direction.map(x, y, new_w, new_h);
            dst.pixel_mut(dx, dy).copy_from_slice(src.pixel(x, y));
        }
    }

    BmpImage::new(header, dst)
}

/// Rotate an image 90 degrees clockwise.
pub fn rotate_clockwise(image: &BmpImage) -> Result<BmpImage> {
    rotate(image, RotationDirection::Clockwise)
}

/// Rotate an image 90 degrees counter-clockwise.
pub fn rotate_counterclockwise(image: &BmpImage) -> Result<BmpImage> {
    rotate(image, RotationDirection::CounterClockwise)
}
