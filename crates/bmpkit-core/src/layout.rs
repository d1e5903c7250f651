//! Row padding arithmetic.
//!
//! Bitmap rows are stored padded up to the next multiple of 4 bytes. Every
//! offset computed elsewhere in the crate goes through these two functions.

/// Bytes occupied by one padded row of `width` pixels.
///
/// ```ignore
/// assert_eq!(padded_row_bytes(3, 3), 12); // 9 pixel bytes + 3 padding
/// ```
#[inline]
pub fn padded_row_bytes(width: usize, bytes_per_pixel: usize) -> usize {
    (width * bytes_per_pixel).div_ceil(4) * 4
}

/// Bytes occupied by `height` padded rows.
#[inline]
pub fn padded_buffer_bytes(width: usize, height: usize, bytes_per_pixel: usize) -> usize {
    padded_row_bytes(width, bytes_per_pixel) * height
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: rows are always 4-byte aligned.
        #[test]
        fn prop_row_is_aligned(width in 1usize..=5000, bpp in 1usize..=4) {
            prop_assert_eq!(padded_row_bytes(width, bpp) % 4, 0);
        }

        /// Property: padding never drops pixel bytes and adds at most 3.
        #[test]
        fn prop_row_covers_pixels(width in 1usize..=5000, bpp in 1usize..=4) {
            let row = padded_row_bytes(width, bpp);
            prop_assert!(row >= width * bpp);
            prop_assert!(row - width * bpp < 4);
        }

        /// Property: buffer size is rows times stride.
        #[test]
        fn prop_buffer_is_rows_times_stride(
            width in 1usize..=500,
            height in 1usize..=500,
            bpp in 1usize..=4,
        ) {
            prop_assert_eq!(
                padded_buffer_bytes(width, height, bpp),
                padded_row_bytes(width, bpp) * height
            );
        }
    }
}
