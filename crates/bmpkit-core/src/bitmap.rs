//! A header and the pixel buffer it describes, as one owned value.

use crate::buffer::PixelBuffer;
use crate::error::{BmpError, Result};
use crate::header::BmpHeader;

/// A loaded or transformed bitmap.
///
/// The header and the buffer always agree on width, height, and bytes per
/// pixel; both constructors enforce this. Transforms take a `&BmpImage` and
/// hand back a new, independently owned value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpImage {
    header: BmpHeader,
    pixels: PixelBuffer,
}

impl BmpImage {
    /// Pair a header with a buffer, checking that their layouts match.
    pub fn new(header: BmpHeader, pixels: PixelBuffer) -> Result<Self> {
        header.validate()?;
        if header.pixel_width() != pixels.width()
            || header.pixel_height() != pixels.height()
            || header.bytes_per_pixel() != pixels.bytes_per_pixel()
        {
            return Err(BmpError::invalid(format!(
                "header describes {}x{} at {} bytes/pixel, buffer is {}x{} at {}",
                header.pixel_width(),
                header.pixel_height(),
                header.bytes_per_pixel(),
                pixels.width(),
                pixels.height(),
                pixels.bytes_per_pixel()
            )));
        }
        Ok(BmpImage { header, pixels })
    }

    /// Build an image with a fresh minimal header from packed pixel rows.
    ///
    /// `packed` holds `width * height` pixels of `bits_per_pixel / 8`
    /// channels each, row after row, in file channel order.
    pub fn from_pixels(
        width: i32,
        height: i32,
        bits_per_pixel: u16,
        packed: &[u8],
    ) -> Result<Self> {
        let header = BmpHeader::new(width, height, bits_per_pixel)?;
        let pixels = PixelBuffer::from_packed(
            header.pixel_width(),
            header.pixel_height(),
            header.bytes_per_pixel(),
            packed,
        )?;
        Ok(BmpImage { header, pixels })
    }

    #[inline]
    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Mutable access to the pixels. The layout itself cannot change
    /// through this handle, only the bytes.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.pixels.bytes_per_pixel()
    }

    /// Swap in a buffer of the same layout, returning the old one.
    pub fn replace_pixels(&mut self, pixels: PixelBuffer) -> Result<PixelBuffer> {
        if pixels.width() != self.pixels.width()
            || pixels.height() != self.pixels.height()
            || pixels.bytes_per_pixel() != self.pixels.bytes_per_pixel()
        {
            return Err(BmpError::invalid(
                "replacement buffer layout differs from the image layout",
            ));
        }
        Ok(std::mem::replace(&mut self.pixels, pixels))
    }

    pub fn into_parts(self) -> (BmpHeader, PixelBuffer) {
        (self.header, self.pixels)
    }

    /// Convert to an `image::RgbImage`, swapping BGR storage order to RGB.
    ///
    /// Only 24- and 32-bit images have a defined color mapping; the alpha
    /// or fourth channel of 32-bit images is dropped. Rows are taken in
    /// stored order.
    pub fn to_rgb_image(&self) -> Result<::image::RgbImage> {
        let bpp = self.bytes_per_pixel();
        if bpp < 3 {
            return Err(BmpError::invalid(format!(
                "cannot map {} bits per pixel to RGB",
                bpp * 8
            )));
        }

        let mut rgb = Vec::with_capacity(self.width() * self.height() * 3);
        for y in 0..self.height() {
            for px in self.pixels.row(y).chunks_exact(bpp) {
                rgb.extend_from_slice(&[px[2], px[1], px[0]]);
            }
        }

        ::image::RgbImage::from_raw(self.width() as u32, self.height() as u32, rgb)
            .ok_or_else(|| BmpError::invalid("image dimensions exceed u32"))
    }
}
