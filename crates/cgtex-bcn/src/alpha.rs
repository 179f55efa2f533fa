//! Alpha block decoding for BC2 and BC3.

/// How the explicit 4-bit alpha of BC2 blocks is mapped onto pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExplicitAlpha {
    /// Decode the first four nibbles and repeat each across one row of the
    /// block. This reproduces the preview produced by earlier CGTEX tools.
    #[default]
    Broadcast,
    /// Decode all sixteen nibbles, one per pixel.
    PerPixel,
}

#[inline]
fn expand_nibble(value: u8) -> u8 {
    (value << 4) | (value & 0x0F)
}

/// Decode an 8-byte BC2 alpha block into per-pixel alpha.
pub(crate) fn explicit_alpha(block: &[u8; 8], mode: ExplicitAlpha) -> [u8; 16] {
    let mut out = [0u8; 16];
    match mode {
        ExplicitAlpha::Broadcast => {
            let row_bits = u16::from_le_bytes([block[0], block[1]]);
            for (pixel, alpha) in out.iter_mut().enumerate() {
                let row = pixel / 4;
                *alpha = expand_nibble(((row_bits >> (row * 4)) & 0x0F) as u8);
            }
        }
        ExplicitAlpha::PerPixel => {
            let bits = u64::from_le_bytes(*block);
            for (pixel, alpha) in out.iter_mut().enumerate() {
                *alpha = expand_nibble(((bits >> (pixel * 4)) & 0x0F) as u8);
            }
        }
    }
    out
}

/// Build the eight-entry BC3 alpha ramp.
pub(crate) fn interpolated_palette(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let a0 = alpha0 as u32;
    let a1 = alpha1 as u32;
    let mut palette = [alpha0, alpha1, 0, 0, 0, 0, 0, 255];

    if alpha0 > alpha1 {
        for i in 2..8u32 {
            palette[i as usize] = (((8 - i) * a0 + (i - 1) * a1) / 7) as u8;
        }
    } else {
        for i in 2..6u32 {
            palette[i as usize] = (((6 - i) * a0 + (i - 1) * a1) / 5) as u8;
        }
    }
    palette
}

/// Decode an 8-byte BC3 alpha block into per-pixel alpha.
pub(crate) fn interpolated_alpha(block: &[u8; 8]) -> [u8; 16] {
    let palette = interpolated_palette(block[0], block[1]);
    let mut index_bytes = [0u8; 8];
    index_bytes[..6].copy_from_slice(&block[2..8]);
    let bits = u64::from_le_bytes(index_bytes);

    let mut out = [0u8; 16];
    for (pixel, alpha) in out.iter_mut().enumerate() {
        *alpha = palette[((bits >> (pixel * 3)) & 0x07) as usize];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_value_ramp() {
        assert_eq!(
            interpolated_palette(255, 0),
            [255, 0, 218, 182, 145, 109, 72, 36]
        );
    }

    #[test]
    fn test_six_value_ramp() {
        assert_eq!(
            interpolated_palette(0, 255),
            [0, 255, 51, 102, 153, 204, 0, 255]
        );
        assert_eq!(interpolated_palette(10, 10)[2..6], [10, 10, 10, 10]);
    }

    #[test]
    fn test_explicit_broadcast_uses_first_four_nibbles() {
        let block = [0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE];
        let alpha = explicit_alpha(&block, ExplicitAlpha::Broadcast);
        assert_eq!(&alpha[0..4], &[0x00; 4]);
        assert_eq!(&alpha[4..8], &[0x11; 4]);
        assert_eq!(&alpha[8..12], &[0x22; 4]);
        assert_eq!(&alpha[12..16], &[0x33; 4]);
    }

    #[test]
    fn test_explicit_per_pixel() {
        let block = [0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE];
        let alpha = explicit_alpha(&block, ExplicitAlpha::PerPixel);
        for (pixel, value) in alpha.iter().enumerate() {
            assert_eq!(*value as usize, pixel * 17);
        }
    }
}
