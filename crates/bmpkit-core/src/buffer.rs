//! Padded, row-major pixel storage.

use crate::error::{BmpError, Result};
use crate::layout::{padded_buffer_bytes, padded_row_bytes};

/// A contiguous pixel buffer addressed through a padded row stride.
///
/// Pixel `(x, y)`, channel `c` lives at `y * stride + x * bytes_per_pixel + c`.
/// The buffer length is always `stride * height`. Channel order is whatever
/// the file stores (BGR for 24-bit bitmaps); nothing here reorders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer for the given layout.
    pub fn zeroed(width: usize, height: usize, bytes_per_pixel: usize) -> Self {
        PixelBuffer {
            width,
            height,
            bytes_per_pixel,
            stride: padded_row_bytes(width, bytes_per_pixel),
            data: vec![0u8; padded_buffer_bytes(width, height, bytes_per_pixel)],
        }
    }

    /// Wrap existing padded bytes, checking the length against the layout.
    pub fn from_padded(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = padded_buffer_bytes(width, height, bytes_per_pixel);
        if data.len() != expected {
            return Err(BmpError::invalid(format!(
                "pixel buffer for {width}x{height} at {bytes_per_pixel} bytes/pixel \
                 needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(PixelBuffer {
            width,
            height,
            bytes_per_pixel,
            stride: padded_row_bytes(width, bytes_per_pixel),
            data,
        })
    }

    /// Build a padded buffer from tightly packed rows (no padding).
    pub fn from_packed(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        packed: &[u8],
    ) -> Result<Self> {
        let row_len = width * bytes_per_pixel;
        if packed.len() != row_len * height {
            return Err(BmpError::invalid(format!(
                "packed pixels for {width}x{height} at {bytes_per_pixel} bytes/pixel \
                 need {} bytes, got {}",
                row_len * height,
                packed.len()
            )));
        }
        let mut buffer = Self::zeroed(width, height, bytes_per_pixel);
        if row_len > 0 {
            for (y, src) in packed.chunks_exact(row_len).enumerate() {
                buffer.row_mut(y).copy_from_slice(src);
            }
        }
        Ok(buffer)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Padded bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The whole padded buffer, padding included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * self.bytes_per_pixel
    }

    /// Channels of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.offset(x, y);
        &self.data[start..start + self.bytes_per_pixel]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = self.offset(x, y);
        let bpp = self.bytes_per_pixel;
        &mut self.data[start..start + bpp]
    }

    /// Pixel bytes of row `y`, without the trailing padding.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width * self.bytes_per_pixel]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let len = self.width * self.bytes_per_pixel;
        &mut self.data[start..start + len]
    }

    /// Padded row `y`, as written to disk.
    #[inline]
    pub fn padded_row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.stride]
    }
}
