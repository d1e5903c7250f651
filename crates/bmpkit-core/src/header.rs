//! Fixed-size bitmap header model.
//!
//! The header is the 14-byte file header followed by the 40-byte
//! BITMAPINFOHEADER, 54 bytes in total. Every field is parsed into a typed
//! value so the header can be written back unchanged. Anything between the
//! end of these 54 bytes and `data_offset` (palettes, larger info headers)
//! is kept as opaque gap bytes.
//!
//! # Layout
//!
//! ```text
//! offset  size  field
//!      0     2  signature ("BM")
//!      2     4  file_size
//!      6     4  reserved
//!     10     4  data_offset
//!     14     4  info_header_size
//!     18     4  width  (i32)
//!     22     4  height (i32)
//!     26     2  planes
//!     28     2  bits_per_pixel
//!     30     4  compression
//!     34     4  data_size
//!     38     4  x_pixels_per_meter (i32)
//!     42     4  y_pixels_per_meter (i32)
//!     46     4  colors_used
//!     50     4  colors_important
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BmpError, Result};
use crate::layout::{padded_buffer_bytes, padded_row_bytes};

/// Size of the file header plus BITMAPINFOHEADER.
pub const FIXED_HEADER_LEN: usize = 54;

/// Size of a BITMAPINFOHEADER.
pub const INFO_HEADER_LEN: u32 = 40;

/// Default resolution written by [`BmpHeader::new`] (~72 DPI).
const DEFAULT_PIXELS_PER_METER: i32 = 2835;

/// Parsed bitmap header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmpHeader {
    /// File signature, `b"BM"` for Windows bitmaps.
    pub signature: [u8; 2],
    /// Total file size in bytes as declared by the file.
    pub file_size: u32,
    /// Reserved words, carried through unchanged.
    pub reserved: u32,
    /// Byte offset of the first pixel row.
    pub data_offset: u32,
    /// Size of the info header that starts at offset 14.
    pub info_header_size: u32,
    /// Image width in pixels.
    pub width: i32,
    /// Image height in pixels. Rows are taken in stored order; the sign
    /// convention for top-down images is not interpreted.
    pub height: i32,
    /// Color planes, always 1 in practice.
    pub planes: u16,
    /// Bits per pixel: 8, 16, 24 or 32.
    pub bits_per_pixel: u16,
    /// Compression method, carried through unchanged.
    pub compression: u32,
    /// Size of the padded pixel data in bytes.
    pub data_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
    /// Opaque bytes between the fixed header and `data_offset`.
    #[serde(skip)]
    pub gap: Vec<u8>,
}

#[inline]
fn read_u16(bytes: &[u8; FIXED_HEADER_LEN], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32(bytes: &[u8; FIXED_HEADER_LEN], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_i32(bytes: &[u8; FIXED_HEADER_LEN], offset: usize) -> i32 {
    read_u32(bytes, offset) as i32
}

#[inline]
fn write_slice(out: &mut [u8; FIXED_HEADER_LEN], offset: usize, value: &[u8]) {
    out[offset..offset + value.len()].copy_from_slice(value);
}

impl BmpHeader {
    /// Create a minimal header for an uncompressed image with no gap.
    ///
    /// Sizes and offsets are computed from the dimensions.
    pub fn new(width: i32, height: i32, bits_per_pixel: u16) -> Result<Self> {
        let mut header = BmpHeader {
            signature: *b"BM",
            file_size: 0,
            reserved: 0,
            data_offset: FIXED_HEADER_LEN as u32,
            info_header_size: INFO_HEADER_LEN,
            width,
            height,
            planes: 1,
            bits_per_pixel,
            compression: 0,
            data_size: 0,
            x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            colors_used: 0,
            colors_important: 0,
            gap: Vec::new(),
        };
        header.validate()?;
        header.refresh_sizes()?;
        Ok(header)
    }

    /// Parse the 54 fixed header bytes.
    ///
    /// No validation happens here; call [`BmpHeader::validate`] before
    /// using the dimensions. The gap is left empty.
    pub fn from_bytes(bytes: &[u8; FIXED_HEADER_LEN]) -> Self {
        BmpHeader {
            signature: [bytes[0], bytes[1]],
            file_size: read_u32(bytes, 2),
            reserved: read_u32(bytes, 6),
            data_offset: read_u32(bytes, 10),
            info_header_size: read_u32(bytes, 14),
            width: read_i32(bytes, 18),
            height: read_i32(bytes, 22),
            planes: read_u16(bytes, 26),
            bits_per_pixel: read_u16(bytes, 28),
            compression: read_u32(bytes, 30),
            data_size: read_u32(bytes, 34),
            x_pixels_per_meter: read_i32(bytes, 38),
            y_pixels_per_meter: read_i32(bytes, 42),
            colors_used: read_u32(bytes, 46),
            colors_important: read_u32(bytes, 50),
            gap: Vec::new(),
        }
    }

    /// Serialize the 54 fixed header bytes.
    pub fn to_bytes(&self) -> [u8; FIXED_HEADER_LEN] {
        let mut out = [0u8; FIXED_HEADER_LEN];
        write_slice(&mut out, 0, &self.signature);
        write_slice(&mut out, 2, &self.file_size.to_le_bytes());
        write_slice(&mut out, 6, &self.reserved.to_le_bytes());
        write_slice(&mut out, 10, &self.data_offset.to_le_bytes());
        write_slice(&mut out, 14, &self.info_header_size.to_le_bytes());
        write_slice(&mut out, 18, &self.width.to_le_bytes());
        write_slice(&mut out, 22, &self.height.to_le_bytes());
        write_slice(&mut out, 26, &self.planes.to_le_bytes());
        write_slice(&mut out, 28, &self.bits_per_pixel.to_le_bytes());
        write_slice(&mut out, 30, &self.compression.to_le_bytes());
        write_slice(&mut out, 34, &self.data_size.to_le_bytes());
        write_slice(&mut out, 38, &self.x_pixels_per_meter.to_le_bytes());
        write_slice(&mut out, 42, &self.y_pixels_per_meter.to_le_bytes());
        write_slice(&mut out, 46, &self.colors_used.to_le_bytes());
        write_slice(&mut out, 50, &self.colors_important.to_le_bytes());
        out
    }

    /// Check the fields needed to compute offsets.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(BmpError::invalid(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !matches!(self.bits_per_pixel, 8 | 16 | 24 | 32) {
            return Err(BmpError::invalid(format!(
                "unsupported bit depth {} (expected 8, 16, 24 or 32)",
                self.bits_per_pixel
            )));
        }
        if (self.data_offset as usize) < FIXED_HEADER_LEN {
            return Err(BmpError::invalid(format!(
                "data offset {} points inside the {FIXED_HEADER_LEN}-byte header",
                self.data_offset
            )));
        }
        Ok(())
    }

    /// Width in pixels. Only meaningful after [`BmpHeader::validate`].
    #[inline]
    pub fn pixel_width(&self) -> usize {
        self.width.max(0) as usize
    }

    /// Height in pixels. Only meaningful after [`BmpHeader::validate`].
    #[inline]
    pub fn pixel_height(&self) -> usize {
        self.height.max(0) as usize
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel / 8) as usize
    }

    /// Padded bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        padded_row_bytes(self.pixel_width(), self.bytes_per_pixel())
    }

    /// Padded bytes of pixel data for the whole image.
    #[inline]
    pub fn pixel_data_len(&self) -> usize {
        padded_buffer_bytes(
            self.pixel_width(),
            self.pixel_height(),
            self.bytes_per_pixel(),
        )
    }

    /// Number of bytes between the fixed header and the pixel data.
    #[inline]
    pub fn gap_len(&self) -> usize {
        (self.data_offset as usize).saturating_sub(FIXED_HEADER_LEN)
    }

    /// Gap bytes to emit on save.
    ///
    /// Returns the retained gap when it matches `data_offset`, otherwise a
    /// zero-filled gap of the right length.
    pub fn gap_bytes(&self) -> std::borrow::Cow<'_, [u8]> {
        if self.gap.len() == self.gap_len() {
            std::borrow::Cow::Borrowed(&self.gap)
        } else {
            std::borrow::Cow::Owned(vec![0u8; self.gap_len()])
        }
    }

    /// Recompute `data_size` and `file_size` from the current dimensions.
    pub fn refresh_sizes(&mut self) -> Result<()> {
        let too_large = || {
            BmpError::invalid(format!(
                "{}x{} at {} bpp does not fit a 32-bit file size",
                self.width, self.height, self.bits_per_pixel
            ))
        };
        let data_size = u32::try_from(self.pixel_data_len()).map_err(|_| too_large())?;
        let file_size = data_size
            .checked_add(self.data_offset)
            .ok_or_else(too_large)?;
        self.data_size = data_size;
        self.file_size = file_size;
        Ok(())
    }

    /// Copy of this header with new dimensions and recomputed sizes.
    ///
    /// Every other field, including the gap, is kept.
    pub fn with_dimensions(&self, width: i32, height: i32) -> Result<Self> {
        let mut header = self.clone();
        header.width = width;
        header.height = height;
        header.validate()?;
        header.refresh_sizes()?;
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_header_fields() {
        let header = BmpHeader::new(4, 2, 24).unwrap();
        assert_eq!(&header.signature, b"BM");
        assert_eq!(header.data_offset, 54);
        assert_eq!(header.info_header_size, 40);
        assert_eq!(header.row_stride(), 12);
        assert_eq!(header.data_size, 24);
        assert_eq!(header.file_size, 54 + 24);
        assert_eq!(header.gap_len(), 0);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let mut header = BmpHeader::new(3, 5, 32).unwrap();
        header.x_pixels_per_meter = 3780;
        header.reserved = 0xDEAD_BEEF;
        let parsed = BmpHeader::from_bytes(&header.to_bytes());
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_fixed_offsets() {
        let header = BmpHeader::new(0x0102, 0x0304, 24).unwrap();
        let bytes = header.to_bytes();
        assert_eq!(&bytes[18..22], &[0x02, 0x01, 0, 0]);
        assert_eq!(&bytes[22..26], &[0x04, 0x03, 0, 0]);
        assert_eq!(&bytes[28..30], &[24, 0]);
        assert_eq!(&bytes[10..14], &[54, 0, 0, 0]);
    }

    #[test]
    fn test_negative_width_rejected() {
        let result = BmpHeader::new(-4, 2, 24);
        assert!(matches!(result, Err(BmpError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_height_rejected() {
        let result = BmpHeader::new(4, 0, 24);
        assert!(matches!(result, Err(BmpError::InvalidArgument(_))));
    }

    #[test]
    fn test_unsupported_bit_depth_rejected() {
        for bpp in [0u16, 1, 4, 12, 48] {
            let result = BmpHeader::new(4, 4, bpp);
            assert!(
                matches!(result, Err(BmpError::InvalidArgument(_))),
                "bpp {} should be rejected",
                bpp
            );
        }
    }

    #[test]
    fn test_data_offset_inside_header_rejected() {
        let mut header = BmpHeader::new(2, 2, 24).unwrap();
        header.data_offset = 40;
        assert!(matches!(
            header.validate(),
            Err(BmpError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_gap_bytes_zero_filled_when_not_retained() {
        let mut header = BmpHeader::new(2, 2, 24).unwrap();
        header.data_offset = 58;
        assert_eq!(header.gap_bytes().as_ref(), &[0, 0, 0, 0]);

        header.gap = vec![1, 2, 3, 4];
        assert_eq!(header.gap_bytes().as_ref(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_with_dimensions_recomputes_sizes() {
        let mut header = BmpHeader::new(4, 2, 24).unwrap();
        header.data_offset = 58;
        header.gap = vec![9; 4];

        let swapped = header.with_dimensions(2, 4).unwrap();
        assert_eq!(swapped.width, 2);
        assert_eq!(swapped.height, 4);
        assert_eq!(swapped.row_stride(), 8);
        assert_eq!(swapped.data_size, 32);
        assert_eq!(swapped.file_size, 58 + 32);
        assert_eq!(swapped.gap, vec![9; 4]);
    }

    #[test]
    fn test_oversized_image_rejected() {
        let result = BmpHeader::new(i32::MAX, 4, 32);
        assert!(matches!(result, Err(BmpError::InvalidArgument(_))));
    }
}
