//! bmpkit Core - Uncompressed bitmap codec and pixel-buffer transforms
//!
//! This crate reads uncompressed bitmap files into a header plus a padded,
//! row-major pixel buffer, transforms the buffer, and writes it back.
//!
//! # Module Structure
//!
//! - `layout` - Row padding arithmetic shared by everything else
//! - `header` - The 54-byte fixed header and the opaque gap after it
//! - `buffer` - Padded pixel storage and addressing
//! - `bitmap` - `BmpImage`, a header paired with its buffer
//! - `codec` - Load/save and stream encode/decode
//! - `transform` - Quarter-turn rotation, Gaussian blur, box blur
//!
//! # Pipeline
//!
//! ```ignore
//! use bmpkit_core::{codec, transform};
//!
//! let image = codec::load("input.bmp")?;
//! let rotated = transform::rotate_clockwise(&image)?;
//! codec::save("rotated.bmp", &rotated)?;
//! ```
//!
//! All operations are synchronous and single-threaded. Every value returned
//! by a transform owns its buffer outright.

pub mod bitmap;
pub mod buffer;
pub mod codec;
pub mod error;
pub mod header;
pub mod layout;
pub mod transform;

pub use bitmap::BmpImage;
pub use buffer::PixelBuffer;
pub use codec::{load, read_from, save, write_to};
pub use error::{BmpError, Result};
pub use header::{BmpHeader, FIXED_HEADER_LEN};
pub use layout::{padded_buffer_bytes, padded_row_bytes};
pub use transform::{
    box_blur, gaussian_blur, gaussian_blur_in_place, gaussian_kernel, rotate, rotate_clockwise,
    rotate_counterclockwise, RotationDirection,
};
