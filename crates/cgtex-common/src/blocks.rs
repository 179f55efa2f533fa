//! 4x4 block-compression size arithmetic.

/// Edge length of a compressed block in pixels.
pub const BLOCK_DIM: u32 = 4;

/// Number of blocks along each axis for a surface of the given size.
#[inline]
pub const fn block_count(width: u32, height: u32) -> (usize, usize) {
    (
        width.div_ceil(BLOCK_DIM) as usize,
        height.div_ceil(BLOCK_DIM) as usize,
    )
}

/// Size in bytes of a compressed surface with the given block size.
///
/// Returns `None` if the size does not fit in `usize`.
#[inline]
pub fn compressed_size(width: u32, height: u32, block_size: usize) -> Option<usize> {
    let (blocks_x, blocks_y) = block_count(width, height);
    blocks_x.checked_mul(blocks_y)?.checked_mul(block_size)
}

/// Dimensions of mip `level` for a base surface, clamped to 1.
#[inline]
pub fn level_dimensions(width: u32, height: u32, level: u32) -> (u32, u32) {
    (
        width.checked_shr(level).unwrap_or(0).max(1),
        height.checked_shr(level).unwrap_or(0).max(1),
    )
}

/// Number of levels in a full mip chain down to 1x1.
#[inline]
pub const fn max_mip_levels(width: u32, height: u32) -> u32 {
    let largest = if width > height { width } else { height };
    if largest == 0 {
        1
    } else {
        u32::BITS - largest.leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_size() {
        // 4x4 block minimum
        assert_eq!(compressed_size(1, 1, 16), Some(16));
        assert_eq!(compressed_size(4, 4, 8), Some(8));
        assert_eq!(compressed_size(5, 4, 8), Some(16));
        assert_eq!(compressed_size(8, 8, 16), Some(64));
        assert_eq!(compressed_size(1024, 1024, 16), Some(1024 * 1024));
    }

    #[test]
    fn test_level_dimensions() {
        assert_eq!(level_dimensions(256, 64, 0), (256, 64));
        assert_eq!(level_dimensions(256, 64, 3), (32, 8));
        assert_eq!(level_dimensions(256, 64, 7), (2, 1));
        assert_eq!(level_dimensions(256, 64, 40), (1, 1));
    }

    #[test]
    fn test_max_mip_levels() {
        assert_eq!(max_mip_levels(1, 1), 1);
        assert_eq!(max_mip_levels(4, 4), 3);
        assert_eq!(max_mip_levels(256, 64), 9);
        assert_eq!(max_mip_levels(5, 3), 3);
        assert_eq!(max_mip_levels(u16::MAX as u32, 1), 16);
    }
}
