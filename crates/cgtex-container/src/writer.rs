//! CGTEX container writing.

use std::io::{Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use cgtex_common::align;
use tracing::{debug, info};

use crate::entry::TextureEntry;
use crate::metadata::{ContainerMetadata, ContainerVersion, HEADER_SIZE, MAGIC, RECORD_ALIGNMENT};
use crate::{Error, Result};

/// Collects textures and writes them as a mipmapped CGTEX container.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use cgtex_container::{CgtexWriter, TextureEntry};
///
/// let mut writer = CgtexWriter::new(Cursor::new(Vec::new()));
/// writer.add_texture(TextureEntry::with_base_level(4, 4, "white", 1, vec![0xFF; 8]));
/// let metadata = writer.finish()?;
/// assert_eq!(metadata.data_offset(), 20);
/// # Ok::<(), cgtex_container::Error>(())
/// ```
#[derive(Debug)]
pub struct CgtexWriter<W> {
    inner: W,
    textures: Vec<TextureEntry>,
}

impl<W: Write + Seek> CgtexWriter<W> {
    /// Create a writer over a seekable sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            textures: Vec::new(),
        }
    }

    /// Queue a texture for writing.
    pub fn add_texture(&mut self, entry: TextureEntry) -> &mut Self {
        self.textures.push(entry);
        self
    }

    /// Number of queued textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Write all queued textures and return the header that was written.
    pub fn finish(mut self) -> Result<ContainerMetadata> {
        write_container(&mut self.inner, &self.textures)
    }
}

/// Write `textures` to `sink` as a mipmapped container.
///
/// All entries are validated before the first byte is written. Offsets are
/// relative to the sink position on entry; the sink is left positioned at the
/// end of the container.
pub fn write_container<W: Write + Seek>(sink: &mut W, textures: &[TextureEntry]) -> Result<ContainerMetadata> {
    if textures.is_empty() {
        return Err(Error::EmptyInput);
    }
    for (index, entry) in textures.iter().enumerate() {
        validate(index, entry)?;
    }
    let texture_count = u32::try_from(textures.len()).map_err(|_| Error::FieldTooLarge {
        index: textures.len() - 1,
        field: "texture count",
        len: textures.len(),
    })?;

    let base = sink.stream_position()?;

    sink.write_all(&MAGIC)?;
    sink.write_u32::<LittleEndian>(ContainerVersion::CURRENT.as_u32())?;
    sink.write_u32::<LittleEndian>(texture_count)?;
    let offset_field = sink.stream_position()?;
    sink.write_u64::<LittleEndian>(0)?;

    let data_offset = sink.stream_position()? - base;
    debug_assert_eq!(data_offset, HEADER_SIZE);

    for (index, entry) in textures.iter().enumerate() {
        info!(index, name = entry.name(), mips = entry.mip_map_count(), "writing texture");
        write_record(sink, base, entry)?;
    }

    let end = sink.stream_position()?;
    sink.seek(SeekFrom::Start(offset_field))?;
    sink.write_u64::<LittleEndian>(data_offset)?;
    sink.seek(SeekFrom::Start(end))?;
    sink.flush()?;
    debug!(data_offset, offset_field, "patched data offset");

    let metadata = ContainerMetadata::new(ContainerVersion::CURRENT, texture_count, data_offset, end - base);
    info!(
        data_offset,
        texture_count,
        file_size = metadata.file_size(),
        "CGTEX written"
    );
    Ok(metadata)
}

fn validate(index: usize, entry: &TextureEntry) -> Result<()> {
    let declared = entry.mip_map_count();
    if declared == 0 || declared > i32::MAX as u32 {
        return Err(Error::InvalidMipCount {
            index,
            count: declared as u64,
        });
    }
    if declared as usize != entry.levels().len() {
        return Err(Error::MipCountMismatch {
            index,
            declared,
            actual: entry.levels().len(),
        });
    }

    length_prefix(index, "name", entry.name().len())?;
    for level in entry.levels() {
        length_prefix(index, "level data", level.len())?;
    }
    Ok(())
}

fn length_prefix(index: usize, field: &'static str, len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::FieldTooLarge { index, field, len })
}

fn write_record<W: Write + Seek>(sink: &mut W, base: u64, entry: &TextureEntry) -> Result<()> {
    sink.write_u16::<LittleEndian>(entry.width())?;
    sink.write_u16::<LittleEndian>(entry.height())?;
    sink.write_i32::<LittleEndian>(entry.mip_map_count() as i32)?;

    let name = entry.name().as_bytes();
    sink.write_i32::<LittleEndian>(name.len() as i32)?;
    sink.write_all(name)?;
    sink.write_u8(entry.format())?;

    let position = sink.stream_position()? - base;
    let padding = align::padding_for(position, RECORD_ALIGNMENT) as usize;
    if padding > 0 {
        sink.write_all(&[0u8; 3][..padding])?;
        debug!(padding, offset = position + padding as u64, "added record padding");
    }

    for (level, data) in entry.levels().iter().enumerate() {
        sink.write_i32::<LittleEndian>(data.len() as i32)?;
        sink.write_all(data)?;
        debug!(level, len = data.len(), "wrote mip level");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    fn write(textures: &[TextureEntry]) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        write_container(&mut cursor, textures)?;
        Ok(cursor.into_inner())
    }

    #[test]
    fn test_empty_input() {
        let err = write(&[]).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_zero_mip_count() {
        let entry = TextureEntry::new(4, 4, "none", 1, Vec::new());
        assert!(matches!(
            write(&[entry]),
            Err(Error::InvalidMipCount { index: 0, count: 0 })
        ));
    }

    #[test]
    fn test_mip_count_mismatch() {
        let ok = TextureEntry::with_base_level(4, 4, "ok", 1, vec![0; 8]);
        let mut bad = TextureEntry::new(8, 8, "bad", 1, vec![vec![0; 32], vec![0; 8]]);
        bad.set_mip_map_count(4);

        assert!(matches!(
            write(&[ok, bad]),
            Err(Error::MipCountMismatch {
                index: 1,
                declared: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_nothing_written_on_validation_failure() {
        let mut cursor = Cursor::new(Vec::new());
        let entry = TextureEntry::new(4, 4, "none", 1, Vec::new());
        assert!(write_container(&mut cursor, &[entry]).is_err());
        assert!(cursor.into_inner().is_empty());
    }

    #[test]
    fn test_byte_layout() {
        // Name "ab": format byte ends at 20 + 4 + 4 + 4 + 2 + 1 = 35, one padding byte.
        let entry = TextureEntry::with_base_level(4, 8, "ab", 5, vec![7u8; 3]);
        let bytes = write(&[entry]).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(b"CGTX");
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&20u64.to_le_bytes());
        expected.extend_from_slice(&4u16.to_le_bytes());
        expected.extend_from_slice(&8u16.to_le_bytes());
        expected.extend_from_slice(&1i32.to_le_bytes());
        expected.extend_from_slice(&2i32.to_le_bytes());
        expected.extend_from_slice(b"ab");
        expected.push(5);
        expected.push(0);
        expected.extend_from_slice(&3i32.to_le_bytes());
        expected.extend_from_slice(&[7, 7, 7]);

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_padding_for_each_name_length() {
        for name_len in 0..8usize {
            let name = "x".repeat(name_len);
            let entry = TextureEntry::with_base_level(4, 4, name, 1, vec![0; 8]);
            let bytes = write(&[entry]).unwrap();

            let format_end = 20 + 12 + name_len + 1;
            let level_prefix = format_end.next_multiple_of(4);
            assert!(bytes[format_end..level_prefix].iter().all(|&b| b == 0));
            assert_eq!(&bytes[level_prefix..level_prefix + 4], &8i32.to_le_bytes());
            assert_eq!(bytes.len(), level_prefix + 4 + 8);
        }
    }

    #[test]
    fn test_writer_builder_reports_metadata() {
        let mut writer = CgtexWriter::new(Cursor::new(Vec::new()));
        writer
            .add_texture(TextureEntry::with_base_level(4, 4, "a", 1, vec![0; 8]))
            .add_texture(TextureEntry::with_base_level(4, 4, "b", 3, vec![0; 16]));
        assert_eq!(writer.texture_count(), 2);

        let metadata = writer.finish().unwrap();
        assert_eq!(metadata.texture_count(), 2);
        assert_eq!(metadata.data_offset(), HEADER_SIZE);
        assert_eq!(metadata.version(), ContainerVersion::Mipmapped);
        // a: 12 + 1 + 1 -> 14 + 2 pad + 4 + 8; b: 12 + 1 + 1 + 2 pad + 4 + 16
        assert_eq!(metadata.file_size(), 20 + 28 + 36);
    }
}
