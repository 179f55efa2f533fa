//! CGTEX container reading.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use cgtex_common::{align, SeekExt};
use tracing::{debug, warn};

use crate::entry::TextureEntry;
use crate::metadata::{ContainerMetadata, ContainerVersion, HEADER_SIZE, MAGIC, RECORD_ALIGNMENT};
use crate::{Error, Result};

/// Reads a CGTEX container from a seekable source.
///
/// The reader tracks its own position so that every length prefix can be
/// checked against the bytes that remain before anything is allocated.
#[derive(Debug)]
pub struct CgtexReader<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<R: Read + Seek> CgtexReader<R> {
    /// Wrap a source. The container is expected to start at offset 0.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.total_len()?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner,
            position: 0,
            len,
        })
    }

    /// Total length of the source.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the source is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read and validate the header.
    pub fn read_header(&mut self) -> Result<ContainerMetadata> {
        if self.len < HEADER_SIZE {
            return Err(Error::TruncatedHeader {
                needed: HEADER_SIZE,
                available: self.len,
            });
        }

        let mut magic = [0u8; 4];
        self.inner.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(Error::BadMagic {
                expected: MAGIC,
                actual: magic,
            });
        }

        let version = self.inner.read_u32::<LittleEndian>()?;
        let texture_count = self.inner.read_i32::<LittleEndian>()?;
        let data_offset = self.inner.read_i64::<LittleEndian>()?;
        self.position = HEADER_SIZE;

        let version = ContainerVersion::from_u32(version).ok_or(Error::UnsupportedVersion(version))?;
        if texture_count < 0 {
            return Err(Error::NegativeCount(texture_count));
        }
        if data_offset < 0 || data_offset as u64 > self.len {
            return Err(Error::OffsetOutOfRange {
                offset: data_offset,
                file_size: self.len,
            });
        }

        let metadata = ContainerMetadata::new(version, texture_count as u32, data_offset as u64, self.len);
        debug!(?metadata, "parsed CGTEX header");
        Ok(metadata)
    }

    /// Read every texture record described by `metadata`.
    ///
    /// The first malformed record aborts the whole read: once a length is
    /// wrong the positions of all following records are unknown.
    pub fn read_textures(&mut self, metadata: &ContainerMetadata) -> Result<Vec<TextureEntry>> {
        self.inner.seek(SeekFrom::Start(metadata.data_offset()))?;
        self.position = metadata.data_offset();

        let count = metadata.texture_count() as usize;
        let mut textures = Vec::with_capacity(count.min(1024));
        for index in 0..count {
            let entry = match metadata.version() {
                ContainerVersion::Mipmapped => self.read_mipmapped_record(index)?,
                ContainerVersion::Legacy => self.read_legacy_record(index)?,
            };
            debug!(index, texture = %entry, "read texture record");
            textures.push(entry);
        }

        Ok(textures)
    }

    /// Read the header followed by all texture records.
    pub fn read_all(mut self) -> Result<(ContainerMetadata, Vec<TextureEntry>)> {
        let metadata = self.read_header()?;
        let textures = self.read_textures(&metadata)?;
        Ok((metadata, textures))
    }

    fn read_mipmapped_record(&mut self, index: usize) -> Result<TextureEntry> {
        let (width, height) = self.read_dimensions(index)?;

        let mip_map_count = self.read_i32_field(index, "mip_map_count")?;
        if mip_map_count <= 0 {
            return Err(Error::CorruptRecord {
                index,
                field: "mip_map_count",
                value: mip_map_count as i64,
            });
        }

        let name = self.read_name(index)?;
        let format = self.read_u8_field(index, "format")?;

        let padding = align::padding_for(self.position, RECORD_ALIGNMENT) as usize;
        let mut pad = [0u8; 3];
        self.read_exact_field(index, "padding", &mut pad[..padding])?;

        // Every level needs at least its 4-byte length prefix.
        self.require(index, "level table", mip_map_count as u64 * 4)?;
        let mut levels = Vec::with_capacity(mip_map_count as usize);
        for _ in 0..mip_map_count {
            levels.push(self.read_len_prefixed(index, "level data")?);
        }

        Ok(TextureEntry::new(width, height, name, format, levels))
    }

    fn read_legacy_record(&mut self, index: usize) -> Result<TextureEntry> {
        let (width, height) = self.read_dimensions(index)?;
        let name = self.read_name(index)?;
        let format = self.read_u8_field(index, "format")?;
        let data = self.read_len_prefixed(index, "level data")?;
        Ok(TextureEntry::with_base_level(width, height, name, format, data))
    }

    fn read_dimensions(&mut self, index: usize) -> Result<(u16, u16)> {
        self.require(index, "dimensions", 4)?;
        let width = self.inner.read_u16::<LittleEndian>()?;
        let height = self.inner.read_u16::<LittleEndian>()?;
        self.position += 4;
        Ok((width, height))
    }

    fn read_name(&mut self, index: usize) -> Result<String> {
        let bytes = self.read_len_prefixed(index, "name")?;
        if bytes.is_empty() {
            let name = format!("UnnamedTexture_{}", index);
            warn!(index, %name, "texture has an empty name, using placeholder");
            return Ok(name);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_len_prefixed(&mut self, index: usize, field: &'static str) -> Result<Vec<u8>> {
        let len = self.read_i32_field(index, field)?;
        if len < 0 {
            return Err(Error::CorruptRecord {
                index,
                field,
                value: len as i64,
            });
        }

        let mut data = vec![0u8; self.checked_len(index, field, len as u64)?];
        self.read_exact_field(index, field, &mut data)?;
        Ok(data)
    }

    fn read_i32_field(&mut self, index: usize, field: &'static str) -> Result<i32> {
        self.require(index, field, 4)?;
        let value = self.inner.read_i32::<LittleEndian>()?;
        self.position += 4;
        Ok(value)
    }

    fn read_u8_field(&mut self, index: usize, field: &'static str) -> Result<u8> {
        self.require(index, field, 1)?;
        let value = self.inner.read_u8()?;
        self.position += 1;
        Ok(value)
    }

    fn read_exact_field(&mut self, index: usize, field: &'static str, buf: &mut [u8]) -> Result<()> {
        self.require(index, field, buf.len() as u64)?;
        self.inner.read_exact(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn checked_len(&self, index: usize, field: &'static str, needed: u64) -> Result<usize> {
        self.require(index, field, needed)?;
        Ok(needed as usize)
    }

    fn require(&self, index: usize, field: &'static str, needed: u64) -> Result<()> {
        let available = self.len.saturating_sub(self.position);
        if needed > available {
            return Err(Error::Truncated {
                index,
                field,
                position: self.position,
                needed,
                available,
            });
        }
        Ok(())
    }
}
