//! Block-grid decompression.

use cgtex_common::{blocks, BinaryReader};
use image::{Rgba, RgbaImage};
use tracing::{trace, warn};

use crate::alpha::{explicit_alpha, interpolated_alpha, ExplicitAlpha};
use crate::checker::checkerboard;
use crate::color::palette;
use crate::{Error, Result, FORMAT_BC1, FORMAT_BC2, FORMAT_BC3};

/// Settings for [`decompress_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Mapping of BC2 explicit alpha onto pixels.
    pub explicit_alpha: ExplicitAlpha,
}

/// Alpha source of a block format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlphaMode {
    /// Implied by the color palette.
    Palette,
    /// 4-bit values, BC2.
    Explicit(ExplicitAlpha),
    /// Endpoint ramp with 3-bit indices, BC3.
    Interpolated,
}

/// Bytes per 4x4 block for a format code, or `None` if the code is unknown.
pub const fn block_size(format: u8) -> Option<usize> {
    match format {
        FORMAT_BC1 => Some(8),
        FORMAT_BC2 | FORMAT_BC3 => Some(16),
        _ => None,
    }
}

/// Decompress a block-compressed surface with default options.
///
/// See [`decompress_with`].
pub fn decompress(width: u32, height: u32, format: u8, data: &[u8]) -> Result<RgbaImage> {
    decompress_with(width, height, format, data, &DecodeOptions::default())
}

/// Decompress a block-compressed surface into an RGBA8 image.
///
/// Unknown format codes yield a [`checkerboard`] of the requested size
/// instead of an error. Zero dimensions and buffers shorter than the block
/// grid are rejected before any pixel is written.
pub fn decompress_with(
    width: u32,
    height: u32,
    format: u8,
    data: &[u8],
    options: &DecodeOptions,
) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if (width as u64) * (height as u64) * 4 > isize::MAX as u64 {
        return Err(Error::TooLarge { width, height });
    }

    let (block_size, alpha) = match format {
        FORMAT_BC1 => (8, AlphaMode::Palette),
        FORMAT_BC2 => (16, AlphaMode::Explicit(options.explicit_alpha)),
        FORMAT_BC3 => (16, AlphaMode::Interpolated),
        _ => {
            warn!(format, width, height, "unknown block format, using placeholder");
            return Ok(checkerboard(width, height));
        }
    };

    let needed = blocks::compressed_size(width, height, block_size).ok_or(Error::TooLarge { width, height })?;
    if data.len() < needed {
        return Err(Error::Truncated {
            format,
            needed,
            available: data.len(),
        });
    }

    let (blocks_x, blocks_y) = blocks::block_count(width, height);
    trace!(format, blocks_x, blocks_y, "decoding block grid");

    let mut image = RgbaImage::new(width, height);
    let mut reader = BinaryReader::new(data);

    for block_y in 0..blocks_y as u32 {
        for block_x in 0..blocks_x as u32 {
            let pixels = match alpha {
                AlphaMode::Palette => decode_color_block(reader.read_array::<8>()?, None),
                AlphaMode::Explicit(mode) => {
                    let alpha = explicit_alpha(&reader.read_array::<8>()?, mode);
                    decode_color_block(reader.read_array::<8>()?, Some(&alpha))
                }
                AlphaMode::Interpolated => {
                    let alpha = interpolated_alpha(&reader.read_array::<8>()?);
                    decode_color_block(reader.read_array::<8>()?, Some(&alpha))
                }
            };
            write_block(&mut image, block_x, block_y, &pixels);
        }
    }

    Ok(image)
}

/// Decode the 8-byte color half of a block, optionally replacing alpha.
fn decode_color_block(block: [u8; 8], alpha: Option<&[u8; 16]>) -> [[u8; 4]; 16] {
    let color0 = u16::from_le_bytes([block[0], block[1]]);
    let color1 = u16::from_le_bytes([block[2], block[3]]);
    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    let palette = palette(color0, color1);

    let mut pixels = [[0u8; 4]; 16];
    for (i, pixel) in pixels.iter_mut().enumerate() {
        *pixel = palette[((indices >> (2 * i)) & 0b11) as usize];
        if let Some(alpha) = alpha {
            pixel[3] = alpha[i];
        }
    }
    pixels
}

/// Store a decoded block, clipping at the right and bottom edges.
fn write_block(image: &mut RgbaImage, block_x: u32, block_y: u32, pixels: &[[u8; 4]; 16]) {
    let (width, height) = image.dimensions();
    for (i, rgba) in pixels.iter().enumerate() {
        let x = block_x * 4 + (i as u32 & 3);
        let y = block_y * 4 + (i as u32 >> 2);
        if x < width && y < height {
            image.put_pixel(x, y, Rgba(*rgba));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CHECKER_CELL;

    fn bc1_block(color0: u16, color1: u16, indices: u32) -> Vec<u8> {
        let mut block = Vec::with_capacity(8);
        block.extend_from_slice(&color0.to_le_bytes());
        block.extend_from_slice(&color1.to_le_bytes());
        block.extend_from_slice(&indices.to_le_bytes());
        block
    }

    fn bc3_block(alpha0: u8, alpha1: u8, alpha_indices: u64, color: &[u8]) -> Vec<u8> {
        let mut block = vec![alpha0, alpha1];
        block.extend_from_slice(&alpha_indices.to_le_bytes()[..6]);
        block.extend_from_slice(color);
        block
    }

    /// Alpha index `p % 8` for pixel `p`.
    fn cycling_alpha_indices() -> u64 {
        (0..16u64).fold(0, |bits, p| bits | ((p & 7) << (3 * p)))
    }

    fn distinct_alpha(img: &RgbaImage) -> Vec<u8> {
        let mut values: Vec<u8> = img.pixels().map(|p| p[3]).collect();
        values.sort_unstable();
        values.dedup();
        values
    }

    #[test]
    fn test_bc1_equal_endpoints_are_solid_and_opaque() {
        // Indices cycle through 2, 1 - never the transparent slot.
        let data = bc1_block(0xF800, 0xF800, 0x6666_6666);
        let img = decompress(4, 4, 1, &data).unwrap();

        assert_eq!(img.dimensions(), (4, 4));
        assert!(img.pixels().all(|p| p.0 == [248, 0, 0, 255]));
    }

    #[test]
    fn test_bc1_four_color_block() {
        // Each row selects palette entries 0, 1, 2, 3 from left to right.
        let data = bc1_block(0xFFFF, 0x0000, 0xE4E4_E4E4);
        let img = decompress(4, 4, 1, &data).unwrap();

        for y in 0..4 {
            assert_eq!(img.get_pixel(0, y).0, [248, 252, 248, 255]);
            assert_eq!(img.get_pixel(1, y).0, [0, 0, 0, 255]);
            assert_eq!(img.get_pixel(2, y).0, [165, 168, 165, 255]);
            assert_eq!(img.get_pixel(3, y).0, [82, 84, 82, 255]);
        }
    }

    #[test]
    fn test_bc1_transparent_slot() {
        let data = bc1_block(0x0000, 0xFFFF, 0xFFFF_FFFF);
        let img = decompress(4, 4, 1, &data).unwrap();
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_bc3_eight_step_ramp() {
        let data = bc3_block(255, 0, cycling_alpha_indices(), &bc1_block(0xFFFF, 0x0000, 0));
        let img = decompress(4, 4, 5, &data).unwrap();

        assert_eq!(distinct_alpha(&img), vec![0, 36, 72, 109, 145, 182, 218, 255]);
        assert_eq!(img.get_pixel(0, 0)[3], 255);
        assert_eq!(img.get_pixel(1, 0)[3], 0);
        assert_eq!(img.get_pixel(2, 0)[3], 218);
        // Color comes from the color block regardless of alpha.
        assert_eq!(&img.get_pixel(3, 3).0[..3], &[248, 252, 248]);
    }

    #[test]
    fn test_bc3_six_step_ramp_has_exact_extremes() {
        let data = bc3_block(0, 255, cycling_alpha_indices(), &bc1_block(0x001F, 0x001F, 0));
        let img = decompress(4, 4, 5, &data).unwrap();

        let values = distinct_alpha(&img);
        assert_eq!(values, vec![0, 51, 102, 153, 204, 255]);
        // Indices 6 and 7 map to the fixed 0 and 255.
        assert_eq!(img.get_pixel(2, 1)[3], 0);
        assert_eq!(img.get_pixel(3, 1)[3], 255);
    }

    #[test]
    fn test_bc2_broadcast_alpha() {
        let mut data = vec![0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE];
        data.extend(bc1_block(0xF800, 0xF800, 0));
        let img = decompress(4, 4, 3, &data).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(img.get_pixel(x, y).0, [248, 0, 0, y as u8 * 0x11]);
            }
        }
    }

    #[test]
    fn test_bc2_per_pixel_alpha() {
        let mut data = vec![0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE];
        data.extend(bc1_block(0xF800, 0xF800, 0));
        let options = DecodeOptions {
            explicit_alpha: ExplicitAlpha::PerPixel,
        };
        let img = decompress_with(4, 4, 3, &data, &options).unwrap();

        assert_eq!(img.get_pixel(0, 0)[3], 0x00);
        assert_eq!(img.get_pixel(1, 0)[3], 0x11);
        assert_eq!(img.get_pixel(3, 3)[3], 0xFF);
    }

    #[test]
    fn test_bc2_blocks_advance_sixteen_bytes() {
        // Two blocks side by side: the second must start at byte 16.
        let mut data = vec![0xFF; 8];
        data.extend(bc1_block(0xF800, 0xF800, 0));
        data.extend([0x00; 8]);
        data.extend(bc1_block(0x001F, 0x001F, 0));
        let img = decompress(8, 4, 3, &data).unwrap();

        assert_eq!(img.get_pixel(0, 0).0, [248, 0, 0, 255]);
        assert_eq!(img.get_pixel(4, 0).0, [0, 0, 248, 0]);
    }

    #[test]
    fn test_partial_blocks_are_clipped() {
        // 5x3 needs a 2x1 grid of blocks.
        let mut data = bc1_block(0xF800, 0xF800, 0);
        data.extend(bc1_block(0x07E0, 0x07E0, 0));
        let img = decompress(5, 3, 1, &data).unwrap();

        assert_eq!(img.dimensions(), (5, 3));
        assert_eq!(img.get_pixel(3, 2).0, [248, 0, 0, 255]);
        assert_eq!(img.get_pixel(4, 0).0, [0, 252, 0, 255]);
        assert_eq!(img.get_pixel(4, 2).0, [0, 252, 0, 255]);
    }

    #[test]
    fn test_block_grid_is_row_major() {
        let mut data = Vec::new();
        for color in [0xF800u16, 0x07E0, 0x001F, 0xFFFF] {
            data.extend(bc1_block(color, color, 0));
        }
        let img = decompress(8, 8, 1, &data).unwrap();

        assert_eq!(img.get_pixel(0, 0).0, [248, 0, 0, 255]);
        assert_eq!(img.get_pixel(7, 0).0, [0, 252, 0, 255]);
        assert_eq!(img.get_pixel(0, 7).0, [0, 0, 248, 255]);
        assert_eq!(img.get_pixel(7, 7).0, [248, 252, 248, 255]);
    }

    #[test]
    fn test_unknown_format_gives_checkerboard() {
        for format in [0u8, 2, 4, 6, 255] {
            let img = decompress(50, 30, format, &[]).unwrap();
            assert_eq!(img.dimensions(), (50, 30));
            assert_eq!(img.get_pixel(0, 0).0, [128, 0, 128, 255]);
            assert_eq!(img.get_pixel(CHECKER_CELL, 0).0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_truncated_data_rejected() {
        let data = vec![0u8; 31];
        match decompress(8, 8, 1, &data) {
            Err(Error::Truncated {
                format,
                needed,
                available,
            }) => {
                assert_eq!(format, 1);
                assert_eq!(needed, 32);
                assert_eq!(available, 31);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(matches!(
            decompress(4, 4, 5, &[0u8; 8]),
            Err(Error::Truncated { needed: 16, .. })
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            decompress(0, 4, 1, &[0u8; 8]),
            Err(Error::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(1), Some(8));
        assert_eq!(block_size(3), Some(16));
        assert_eq!(block_size(5), Some(16));
        assert_eq!(block_size(7), None);
    }
}
