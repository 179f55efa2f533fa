//! BC1/BC2/BC3 block decompression for texture previews.
//!
//! Turns a format code, a compressed payload and the surface size into an
//! [`image::RgbaImage`]. Decoding is a pure function of its inputs and may be
//! run on many textures in parallel.
//!
//! | Code | Format | Block | Alpha |
//! |------|--------|-------|-------|
//! | 1 | BC1 / DXT1 | 8 bytes | implied by the color palette |
//! | 3 | BC2 / DXT3 | 16 bytes | explicit 4-bit, see [`ExplicitAlpha`] |
//! | 5 | BC3 / DXT5 | 16 bytes | interpolated 8-value ramp |
//!
//! Any other code decodes to a purple and black [`checkerboard`].
//!
//! # Example
//!
//! ```
//! // One BC1 block, both endpoints pure red.
//! let block = [0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0];
//! let image = cgtex_bcn::decompress(4, 4, 1, &block)?;
//! assert_eq!(image.get_pixel(0, 0).0, [248, 0, 0, 255]);
//! # Ok::<(), cgtex_bcn::Error>(())
//! ```

mod alpha;
mod checker;
mod color;
mod decode;
mod error;

pub use alpha::ExplicitAlpha;
pub use checker::{checkerboard, CHECKER_CELL};
pub use decode::{block_size, decompress, decompress_with, DecodeOptions};
pub use error::{Error, Result};

/// Re-export of the output image type.
pub use image::RgbaImage;

/// BC1 / DXT1 format code.
pub const FORMAT_BC1: u8 = 1;
/// BC2 / DXT3 format code.
pub const FORMAT_BC2: u8 = 3;
/// BC3 / DXT5 format code.
pub const FORMAT_BC3: u8 = 5;
