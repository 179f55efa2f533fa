//! Whole-container convenience API.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek};
use std::path::Path;

use tracing::info;

use crate::entry::TextureEntry;
use crate::metadata::ContainerMetadata;
use crate::reader::CgtexReader;
use crate::writer::write_container;
use crate::Result;

/// A fully loaded CGTEX container.
#[derive(Debug, Clone)]
pub struct CgtexFile {
    metadata: ContainerMetadata,
    textures: Vec<TextureEntry>,
}

impl CgtexFile {
    /// Read a container from any seekable source.
    pub fn read<R: Read + Seek>(source: R) -> Result<Self> {
        let (metadata, textures) = CgtexReader::new(source)?.read_all()?;
        Ok(Self { metadata, textures })
    }

    /// Read a container from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = Self::read(BufReader::new(File::open(path)?))?;
        info!(
            path = %path.display(),
            textures = file.textures.len(),
            "loaded CGTEX container"
        );
        Ok(file)
    }

    /// Parse a container held in memory.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read(Cursor::new(data))
    }

    /// Serialize textures into an in-memory container.
    pub fn to_bytes(textures: &[TextureEntry]) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        write_container(&mut cursor, textures)?;
        Ok(cursor.into_inner())
    }

    /// Write textures to a container file on disk, replacing any existing file.
    pub fn write_to_path<P: AsRef<Path>>(path: P, textures: &[TextureEntry]) -> Result<ContainerMetadata> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let metadata = write_container(&mut writer, textures)?;
        info!(path = %path.display(), "saved CGTEX container");
        Ok(metadata)
    }

    /// Header as read.
    pub fn metadata(&self) -> &ContainerMetadata {
        &self.metadata
    }

    /// Textures in file order.
    pub fn textures(&self) -> &[TextureEntry] {
        &self.textures
    }

    /// First texture with the given name.
    pub fn find(&self, name: &str) -> Option<&TextureEntry> {
        self.textures.iter().find(|t| t.name() == name)
    }

    /// Consume the container, returning its textures.
    pub fn into_textures(self) -> Vec<TextureEntry> {
        self.textures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::HEADER_SIZE;

    fn entry(index: usize) -> TextureEntry {
        let mips = index % 4 + 1;
        let side = 4u16 << (mips - 1);
        let levels = (0..mips)
            .map(|level| vec![(index + level) as u8; 16 << (2 * (mips - 1 - level))])
            .collect();
        TextureEntry::new(side, side, format!("texture_{index}"), [1, 3, 5][index % 3], levels)
    }

    fn round_trip(count: usize) {
        let textures: Vec<_> = (0..count).map(entry).collect();
        let bytes = CgtexFile::to_bytes(&textures).unwrap();
        let file = CgtexFile::parse(&bytes).unwrap();

        assert_eq!(file.metadata().texture_count() as usize, count);
        assert_eq!(file.metadata().data_offset(), HEADER_SIZE);
        assert_eq!(file.metadata().file_size(), bytes.len() as u64);
        assert_eq!(file.textures(), textures.as_slice());
    }

    #[test]
    fn test_round_trip_one() {
        round_trip(1);
    }

    #[test]
    fn test_round_trip_five() {
        round_trip(5);
    }

    #[test]
    fn test_round_trip_hundred() {
        round_trip(100);
    }

    #[test]
    fn test_empty_name_replaced_on_read() {
        let textures = vec![
            TextureEntry::with_base_level(4, 4, "first", 1, vec![1; 8]),
            TextureEntry::with_base_level(4, 4, "", 1, vec![2; 8]),
        ];
        let file = CgtexFile::parse(&CgtexFile::to_bytes(&textures).unwrap()).unwrap();

        assert_eq!(file.textures()[1].name(), "UnnamedTexture_1");
        assert_eq!(file.textures()[1].level(0), Some(&[2u8; 8][..]));
        assert!(file.find("first").is_some());
        assert!(file.find("missing").is_none());
    }

    #[test]
    fn test_duplicate_names_preserved() {
        let textures = vec![
            TextureEntry::with_base_level(4, 4, "same", 1, vec![1; 8]),
            TextureEntry::with_base_level(4, 4, "same", 5, vec![2; 16]),
        ];
        let file = CgtexFile::parse(&CgtexFile::to_bytes(&textures).unwrap()).unwrap();
        assert_eq!(file.into_textures(), textures);
    }
}
