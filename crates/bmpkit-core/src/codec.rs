//! Reading and writing bitmap files.
//!
//! The codec works on any `Read`/`Write` stream; [`load`] and [`save`] are
//! the path-based entry points.
//!
//! # File structure
//!
//! ```text
//! [ 54-byte fixed header ][ gap: data_offset - 54 bytes ][ padded rows ... ]
//! ```
//!
//! The gap is kept verbatim on load and written back on save. Rows are
//! written exactly as stored, padding included, with no channel reordering.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, warn};

use crate::bitmap::BmpImage;
use crate::buffer::PixelBuffer;
use crate::error::{BmpError, Result};
use crate::header::{BmpHeader, FIXED_HEADER_LEN};

/// Read exactly `len` bytes, reporting a short read as truncation.
///
/// The buffer grows with the data actually read, so a corrupt length field
/// cannot force a huge allocation up front.
fn read_section<R: Read>(reader: &mut R, len: usize, section: &'static str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() < len {
        return Err(BmpError::Truncated {
            section,
            expected: len,
            actual: buf.len(),
        });
    }
    Ok(buf)
}

/// Decode a bitmap from a stream.
pub fn read_from<R: Read>(reader: &mut R) -> Result<BmpImage> {
    let raw = read_section(reader, FIXED_HEADER_LEN, "header")?;
    let mut fixed = [0u8; FIXED_HEADER_LEN];
    fixed.copy_from_slice(&raw);

    let mut header = BmpHeader::from_bytes(&fixed);
    header.validate()?;

    if header.compression != 0 {
        warn!(
            "compression method {} is not decoded; pixel data is read as-is",
            header.compression
        );
    }

    header.gap = read_section(reader, header.gap_len(), "gap bytes")?;

    let expected = header.pixel_data_len();
    if header.data_size != 0 && header.data_size as usize != expected {
        warn!(
            "declared data size {} differs from computed {} for {}x{}",
            header.data_size, expected, header.width, header.height
        );
    }
    if header.file_size as usize != header.data_offset as usize + expected {
        debug!(
            "declared file size {} differs from computed {}",
            header.file_size,
            header.data_offset as usize + expected
        );
    }

    let data = read_section(reader, expected, "pixel data")?;
    let pixels = PixelBuffer::from_padded(
        header.pixel_width(),
        header.pixel_height(),
        header.bytes_per_pixel(),
        data,
    )?;

    debug!(
        "decoded {}x{} bitmap, {} bpp, stride {}, {} gap bytes",
        header.width,
        header.height,
        header.bits_per_pixel,
        pixels.stride(),
        header.gap.len()
    );

    BmpImage::new(header, pixels)
}

/// Encode a bitmap to a stream.
///
/// Writes the fixed header, the gap (zero-filled when the header carries no
/// retained gap of the right length), then every padded row.
pub fn write_to<W: Write>(writer: &mut W, image: &BmpImage) -> Result<()> {
    let header = image.header();
    writer.write_all(&header.to_bytes())?;
    writer.write_all(&header.gap_bytes())?;

    let pixels = image.pixels();
    for y in 0..pixels.height() {
        writer.write_all(pixels.padded_row(y))?;
    }
    Ok(())
}

/// Load a bitmap file.
pub fn load(path: impl AsRef<Path>) -> Result<BmpImage> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| BmpError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loading {}", path.display());
    read_from(&mut BufReader::new(file))
}

/// Save a bitmap file, replacing any existing file at `path`.
pub fn save(path: impl AsRef<Path>, image: &BmpImage) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| BmpError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, image)?;
    writer.flush()?;
    debug!(
        "saved {}x{} bitmap to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// 3x2 24-bit image with a distinct value in every pixel byte.
    fn sample_image() -> BmpImage {
        let packed: Vec<u8> = (1..=18).collect();
        BmpImage::from_pixels(3, 2, 24, &packed).unwrap()
    }

    fn encode(image: &BmpImage) -> Vec<u8> {
        let mut out = Vec::new();
        write_to(&mut out, image).unwrap();
        out
    }

    #[test]
    fn test_encoded_size() {
        let bytes = encode(&sample_image());
        // 54 header + 2 rows * 12 padded bytes
        assert_eq!(bytes.len(), 54 + 24);
        assert_eq!(&bytes[0..2], b"BM");
    }

    #[test]
    fn test_rows_written_with_padding() {
        let bytes = encode(&sample_image());
        assert_eq!(&bytes[54..63], &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(&bytes[63..66], &[0, 0, 0]);
        assert_eq!(&bytes[66..75], &[10, 11, 12, 13, 14, 15, 16, 17, 18]);
    }

    #[test]
    fn test_stream_roundtrip() {
        let image = sample_image();
        let bytes = encode(&image);
        let decoded = read_from(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(decoded, image);
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn test_gap_preserved() {
        let (mut header, pixels) = sample_image().into_parts();
        header.data_offset = 54 + 6;
        header.gap = vec![0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
        header.refresh_sizes().unwrap();
        let image = BmpImage::new(header, pixels).unwrap();

        let bytes = encode(&image);
        assert_eq!(&bytes[54..60], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

        let decoded = read_from(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(decoded.header().gap, vec![0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(decoded.pixels().pixel(0, 0), &[1, 2, 3]);
    }

    #[test]
    fn test_gap_zero_filled_without_retained_bytes() {
        let (mut header, pixels) = sample_image().into_parts();
        header.data_offset = 54 + 4;
        let image = BmpImage::new(header, pixels).unwrap();

        let bytes = encode(&image);
        assert_eq!(bytes.len(), 58 + 24);
        assert_eq!(&bytes[54..58], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_truncated_header() {
        let bytes = encode(&sample_image());
        let result = read_from(&mut Cursor::new(&bytes[..30]));
        assert!(matches!(
            result,
            Err(BmpError::Truncated {
                section: "header",
                expected: 54,
                actual: 30
            })
        ));
    }

    #[test]
    fn test_truncated_pixel_data() {
        let bytes = encode(&sample_image());
        let result = read_from(&mut Cursor::new(&bytes[..54 + 20]));
        assert!(matches!(
            result,
            Err(BmpError::Truncated {
                section: "pixel data",
                expected: 24,
                actual: 20
            })
        ));
    }

    #[test]
    fn test_truncated_gap() {
        let mut bytes = encode(&sample_image());
        // Point the data far beyond the end of the file
        bytes[10..14].copy_from_slice(&1_000_000u32.to_le_bytes());
        let result = read_from(&mut Cursor::new(&bytes));
        assert!(matches!(
            result,
            Err(BmpError::Truncated {
                section: "gap bytes",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_height_rejected() {
        let mut bytes = encode(&sample_image());
        bytes[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        let result = read_from(&mut Cursor::new(&bytes));
        assert!(matches!(result, Err(BmpError::InvalidArgument(_))));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let image = sample_image();
        let mut bytes = encode(&image);
        bytes.extend_from_slice(&[1, 2, 3]);
        let decoded = read_from(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load("/nonexistent/dir/missing.bmp");
        assert!(matches!(result, Err(BmpError::Open { .. })));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let result = save("/nonexistent/dir/out.bmp", &sample_image());
        assert!(matches!(result, Err(BmpError::Open { .. })));
    }
}
