//! Pixel-buffer transforms: quarter-turn rotation and blurring.
//!
//! Every transform reads a `&BmpImage` and returns a freshly allocated,
//! independently owned result. The one exception is
//! [`gaussian_blur_in_place`], which computes into a copy and then swaps
//! the copy into the caller's image.
//!
//! # Coordinate System
//!
//! - `(x, y)` is column, row in stored row order
//! - Channels are moved or averaged independently; their order is never changed

mod blur;
mod rotation;

pub use blur::{box_blur, gaussian_blur, gaussian_blur_in_place, gaussian_kernel};
pub use rotation::{rotate, rotate_clockwise, rotate_counterclockwise, RotationDirection};
