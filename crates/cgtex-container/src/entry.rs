//! In-memory texture records.

use std::fmt;

use cgtex_common::blocks;

/// Block-compression formats a texture entry can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum TextureFormat {
    /// BC1 / DXT1: opaque or one-bit alpha, 8 bytes per block.
    Bc1 = 1,
    /// BC2 / DXT3: explicit 4-bit alpha, 16 bytes per block.
    Bc2 = 3,
    /// BC3 / DXT5: interpolated alpha, 16 bytes per block.
    Bc3 = 5,
}

impl TextureFormat {
    /// Look up a format by its on-disk code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Bc1),
            3 => Some(Self::Bc2),
            5 => Some(Self::Bc3),
            _ => None,
        }
    }

    /// On-disk format code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Bytes per 4x4 block.
    pub const fn block_size(self) -> usize {
        match self {
            Self::Bc1 => 8,
            Self::Bc2 | Self::Bc3 => 16,
        }
    }

    /// DirectDraw four-character code.
    pub const fn four_cc(self) -> [u8; 4] {
        match self {
            Self::Bc1 => *b"DXT1",
            Self::Bc2 => *b"DXT3",
            Self::Bc3 => *b"DXT5",
        }
    }

    /// Look up a format by its DirectDraw four-character code.
    pub fn from_four_cc(four_cc: [u8; 4]) -> Option<Self> {
        match &four_cc {
            b"DXT1" => Some(Self::Bc1),
            b"DXT3" => Some(Self::Bc2),
            b"DXT5" => Some(Self::Bc3),
            _ => None,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bc1 => "DXT1",
            Self::Bc2 => "DXT3",
            Self::Bc3 => "DXT5",
        }
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named texture and its mip chain.
///
/// Level 0 is the base level. The declared mip count is kept separately from
/// the level list; the writer rejects entries where the two disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    width: u16,
    height: u16,
    name: String,
    format: u8,
    mip_map_count: u32,
    levels: Vec<Vec<u8>>,
}

impl TextureEntry {
    /// Create an entry whose mip count matches `levels`.
    pub fn new(width: u16, height: u16, name: impl Into<String>, format: u8, levels: Vec<Vec<u8>>) -> Self {
        Self {
            width,
            height,
            name: name.into(),
            format,
            mip_map_count: levels.len() as u32,
            levels,
        }
    }

    /// Create an entry holding only a base level.
    pub fn with_base_level(width: u16, height: u16, name: impl Into<String>, format: u8, data: Vec<u8>) -> Self {
        Self::new(width, height, name, format, vec![data])
    }

    /// Base level width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Base level height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Texture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the texture.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Raw format code.
    pub fn format(&self) -> u8 {
        self.format
    }

    /// Format, if the code is one the decoder understands.
    pub fn texture_format(&self) -> Option<TextureFormat> {
        TextureFormat::from_code(self.format)
    }

    /// Declared number of mip levels.
    pub fn mip_map_count(&self) -> u32 {
        self.mip_map_count
    }

    /// Override the declared mip count without touching the levels.
    pub fn set_mip_map_count(&mut self, count: u32) {
        self.mip_map_count = count;
    }

    /// All level payloads, base level first.
    pub fn levels(&self) -> &[Vec<u8>] {
        &self.levels
    }

    /// Payload of one level.
    pub fn level(&self, level: usize) -> Option<&[u8]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Consume the entry, returning its level payloads.
    pub fn into_levels(self) -> Vec<Vec<u8>> {
        self.levels
    }

    /// Pixel dimensions of a level.
    pub fn level_dimensions(&self, level: u32) -> (u32, u32) {
        blocks::level_dimensions(self.width as u32, self.height as u32, level)
    }

    /// Compressed size a well-formed level would have.
    ///
    /// Returns `None` for unknown formats. Not enforced by the codec.
    pub fn expected_level_size(&self, level: u32) -> Option<usize> {
        let format = self.texture_format()?;
        let (width, height) = self.level_dimensions(level);
        blocks::compressed_size(width, height, format.block_size())
    }

    /// Sum of all level payload sizes.
    pub fn payload_len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Lightweight description without payloads.
    pub fn summary(&self) -> TextureSummary {
        TextureSummary {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            format: self.format,
            format_name: self.texture_format().map(TextureFormat::name),
            mip_map_count: self.mip_map_count,
            payload_len: self.payload_len(),
        }
    }
}

impl fmt::Display for TextureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} format={} mips={}",
            self.name, self.width, self.height, self.format, self.mip_map_count
        )
    }
}

/// Listing row for a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextureSummary {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub format: u8,
    pub format_name: Option<&'static str>,
    pub mip_map_count: u32,
    pub payload_len: usize,
}
