//! Decoding single mip levels of container entries.

use cgtex_bcn::{DecodeOptions, RgbaImage};
use cgtex_container::TextureEntry;

use crate::{Error, Result};

/// Decode one mip level of `entry` with default options.
pub fn decompress_level(entry: &TextureEntry, level: usize) -> Result<RgbaImage> {
    decompress_level_with(entry, level, &DecodeOptions::default())
}

/// Decode one mip level of `entry`.
///
/// The level's size is derived from the base size by halving per level.
pub fn decompress_level_with(entry: &TextureEntry, level: usize, options: &DecodeOptions) -> Result<RgbaImage> {
    let data = entry.level(level).ok_or_else(|| Error::LevelOutOfRange {
        name: entry.name().to_string(),
        level,
        available: entry.levels().len(),
    })?;
    let (width, height) = entry.level_dimensions(level as u32);
    Ok(cgtex_bcn::decompress_with(width, height, entry.format(), data, options)?)
}
