//! RGB565 endpoint expansion and the four-entry color palette.

/// Expand a packed RGB565 value to 8 bits per channel.
///
/// Fields are shifted into the high bits; the low bits stay zero, so full
/// intensity is 248 (red, blue) or 252 (green).
#[inline]
pub(crate) fn rgb565_to_rgb888(color: u16) -> [u8; 3] {
    let r = ((color >> 11) & 0x1F) as u8;
    let g = ((color >> 5) & 0x3F) as u8;
    let b = (color & 0x1F) as u8;
    [r << 3, g << 2, b << 3]
}

#[inline]
fn mix(a: [u8; 3], b: [u8; 3], weight_a: u32, weight_b: u32) -> [u8; 4] {
    let total = weight_a + weight_b;
    let channel = |i: usize| ((a[i] as u32 * weight_a + b[i] as u32 * weight_b) / total) as u8;
    [channel(0), channel(1), channel(2), 255]
}

/// Build the four palette entries selected by the 2-bit color indices.
///
/// When `color0 > color1` the block has two interpolated colors at thirds.
/// Otherwise it has a single midpoint color and the fourth entry is
/// transparent black.
pub(crate) fn palette(color0: u16, color1: u16) -> [[u8; 4]; 4] {
    let c0 = rgb565_to_rgb888(color0);
    let c1 = rgb565_to_rgb888(color1);

    let first = [c0[0], c0[1], c0[2], 255];
    let second = [c1[0], c1[1], c1[2], 255];

    if color0 > color1 {
        [first, second, mix(c0, c1, 2, 1), mix(c0, c1, 1, 2)]
    } else {
        [first, second, mix(c0, c1, 1, 1), [0, 0, 0, 0]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_expansion() {
        assert_eq!(rgb565_to_rgb888(0xF800), [248, 0, 0]);
        assert_eq!(rgb565_to_rgb888(0x07E0), [0, 252, 0]);
        assert_eq!(rgb565_to_rgb888(0x001F), [0, 0, 248]);
        assert_eq!(rgb565_to_rgb888(0x0000), [0, 0, 0]);
    }

    #[test]
    fn test_four_color_palette() {
        let p = palette(0xFFFF, 0x0000);
        assert_eq!(p[0], [248, 252, 248, 255]);
        assert_eq!(p[1], [0, 0, 0, 255]);
        assert_eq!(p[2], [165, 168, 165, 255]);
        assert_eq!(p[3], [82, 84, 82, 255]);
    }

    #[test]
    fn test_three_color_palette() {
        let p = palette(0x0000, 0xFFFF);
        assert_eq!(p[2], [124, 126, 124, 255]);
        assert_eq!(p[3], [0, 0, 0, 0]);

        let solid = palette(0x1234, 0x1234);
        assert_eq!(solid[0], solid[1]);
        assert_eq!(solid[0], solid[2]);
    }
}
