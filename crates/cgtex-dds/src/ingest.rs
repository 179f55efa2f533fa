//! Recognising DDS blobs and turning them into texture entries.

use std::fs;
use std::path::Path;

use cgtex_common::{blocks, BinaryReader};
use cgtex_container::{TextureEntry, TextureFormat};
use tracing::debug;

use crate::header::{DdsHeader, FourCC};
use crate::{Error, Result, DDS_MAGIC};

/// Size of the magic plus the fixed header; the payload starts here.
pub const PAYLOAD_OFFSET: usize = 128;

/// Offset of the 8-byte texture name written by CGTEX authoring tools.
pub const NAME_OFFSET: usize = 88;

/// Length of the embedded name field.
pub const NAME_LEN: usize = 8;

/// How a DDS payload becomes mip levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Split the payload into the levels declared by the header instead of
    /// storing it whole as the base level.
    pub split_mipmaps: bool,
}

/// What the ingest adapter extracts from a DDS blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsTexture {
    pub width: u16,
    pub height: u16,
    pub four_cc: FourCC,
    pub format: TextureFormat,
    /// Embedded name, trimmed. Often empty.
    pub name: String,
    /// Declared level count, at least 1.
    pub mip_map_count: u32,
    /// Everything after the header, verbatim.
    pub payload: Vec<u8>,
}

/// Check whether data starts with the DDS signature.
pub fn is_dds(data: &[u8]) -> bool {
    data.starts_with(DDS_MAGIC)
}

impl DdsTexture {
    /// Read a DDS file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&fs::read(path)?)
    }

    /// Parse a DDS blob.
    ///
    /// The payload length is not checked against the dimensions.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        let magic = reader.read_array::<4>().map_err(|_| Error::NotRecognized(leading(data)))?;
        if &magic != DDS_MAGIC {
            return Err(Error::NotRecognized(magic));
        }

        if data.len() < PAYLOAD_OFFSET {
            return Err(Error::Truncated {
                section: "header",
                needed: PAYLOAD_OFFSET,
                available: data.len(),
            });
        }

        let header: DdsHeader = reader.read_struct()?;
        let (raw_width, raw_height, raw_mips) = (header.width, header.height, header.mipmap_count);
        let four_cc = header.pixel_format.four_cc;

        let format = TextureFormat::from_four_cc(four_cc.0).ok_or(Error::UnsupportedCodec(four_cc))?;

        let invalid = || Error::InvalidDimensions {
            width: raw_width,
            height: raw_height,
        };
        let width = u16::try_from(raw_width).map_err(|_| invalid())?;
        let height = u16::try_from(raw_height).map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        let name = BinaryReader::new_at(data, NAME_OFFSET)
            .read_string_in_buffer(NAME_LEN)?
            .trim_matches(|c: char| c <= ' ')
            .to_string();

        let texture = Self {
            width,
            height,
            four_cc,
            format,
            name,
            mip_map_count: raw_mips.max(1),
            payload: data[PAYLOAD_OFFSET..].to_vec(),
        };
        debug!(
            width,
            height,
            codec = %four_cc,
            mips = texture.mip_map_count,
            payload = texture.payload.len(),
            "parsed DDS header"
        );
        Ok(texture)
    }

    /// The embedded name, or `fallback` if it is empty.
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.name.is_empty() {
            fallback
        } else {
            &self.name
        }
    }

    /// Convert into a single-level entry holding the whole payload.
    pub fn into_entry(self) -> TextureEntry {
        TextureEntry::with_base_level(self.width, self.height, self.name, self.format.code(), self.payload)
    }

    /// Convert into an entry according to `options`.
    pub fn into_entry_with(self, options: &IngestOptions) -> Result<TextureEntry> {
        if !options.split_mipmaps || self.mip_map_count <= 1 {
            return Ok(self.into_entry());
        }

        let levels = self.split_levels()?;
        Ok(TextureEntry::new(self.width, self.height, self.name, self.format.code(), levels))
    }

    fn split_levels(&self) -> Result<Vec<Vec<u8>>> {
        let max = blocks::max_mip_levels(self.width as u32, self.height as u32);
        if self.mip_map_count > max {
            return Err(Error::TooManyMipLevels {
                declared: self.mip_map_count,
                max,
            });
        }

        let block_size = self.format.block_size();
        let mut sizes = Vec::with_capacity(self.mip_map_count as usize);
        for level in 0..self.mip_map_count {
            let (width, height) = blocks::level_dimensions(self.width as u32, self.height as u32, level);
            // compressed_size only overflows for dimensions far beyond u16.
            sizes.push(blocks::compressed_size(width, height, block_size).unwrap_or(usize::MAX));
        }

        let needed = sizes.iter().fold(0usize, |total, size| total.saturating_add(*size));
        if needed > self.payload.len() {
            return Err(Error::Truncated {
                section: "mip chain",
                needed,
                available: self.payload.len(),
            });
        }
        if needed < self.payload.len() {
            debug!(
                trailing = self.payload.len() - needed,
                "ignoring bytes after the mip chain"
            );
        }

        let mut offset = 0;
        Ok(sizes
            .into_iter()
            .map(|size| {
                let level = self.payload[offset..offset + size].to_vec();
                offset += size;
                level
            })
            .collect())
    }
}

fn leading(data: &[u8]) -> [u8; 4] {
    let mut out = [0u8; 4];
    let len = data.len().min(4);
    out[..len].copy_from_slice(&data[..len]);
    out
}
