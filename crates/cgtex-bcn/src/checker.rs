//! Placeholder image for data that cannot be decoded.

use image::{Rgba, RgbaImage};

/// Edge length of one checkerboard cell in pixels.
pub const CHECKER_CELL: u32 = 20;

const PURPLE: Rgba<u8> = Rgba([128, 0, 128, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Purple and black checkerboard of the requested size.
pub fn checkerboard(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / CHECKER_CELL + y / CHECKER_CELL) % 2 == 0 {
            PURPLE
        } else {
            BLACK
        }
    })
}
