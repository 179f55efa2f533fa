//! Container header model.

/// Container signature.
pub const MAGIC: [u8; 4] = *b"CGTX";

/// Size of the fixed header: magic, version, texture count and data offset.
pub const HEADER_SIZE: u64 = 4 + 4 + 4 + 8;

/// Alignment applied after each mipmapped record's format byte.
pub const RECORD_ALIGNMENT: u64 = 4;

/// Record layout selected by the header version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ContainerVersion {
    /// Base level only; name, format and data laid out without padding.
    Legacy,
    /// Per-texture mip count, word-aligned level table.
    Mipmapped,
}

impl ContainerVersion {
    /// Version number written by this crate.
    pub const CURRENT: Self = Self::Mipmapped;

    /// Map a header version number to a layout.
    pub const fn from_u32(version: u32) -> Option<Self> {
        match version {
            1 => Some(Self::Legacy),
            2 => Some(Self::Mipmapped),
            _ => None,
        }
    }

    /// Header version number.
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::Legacy => 1,
            Self::Mipmapped => 2,
        }
    }

    /// Whether records carry a mip count and level table.
    pub const fn has_mip_levels(self) -> bool {
        matches!(self, Self::Mipmapped)
    }
}

/// Header of a CGTEX container as read from (or written to) storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerMetadata {
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_magic"))]
    magic: [u8; 4],
    version: ContainerVersion,
    texture_count: u32,
    data_offset: u64,
    file_size: u64,
}

impl ContainerMetadata {
    pub(crate) const fn new(version: ContainerVersion, texture_count: u32, data_offset: u64, file_size: u64) -> Self {
        Self {
            magic: MAGIC,
            version,
            texture_count,
            data_offset,
            file_size,
        }
    }

    /// Signature bytes.
    pub const fn magic(&self) -> [u8; 4] {
        self.magic
    }

    /// Record layout.
    pub const fn version(&self) -> ContainerVersion {
        self.version
    }

    /// Number of texture records.
    pub const fn texture_count(&self) -> u32 {
        self.texture_count
    }

    /// Offset where texture records begin.
    pub const fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Total size of the container in bytes.
    pub const fn file_size(&self) -> u64 {
        self.file_size
    }
}

#[cfg(feature = "serde")]
fn serialize_magic<S: serde::Serializer>(magic: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(magic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_numbers() {
        assert_eq!(ContainerVersion::from_u32(1), Some(ContainerVersion::Legacy));
        assert_eq!(ContainerVersion::from_u32(2), Some(ContainerVersion::Mipmapped));
        assert_eq!(ContainerVersion::from_u32(0), None);
        assert_eq!(ContainerVersion::from_u32(3), None);
        assert_eq!(ContainerVersion::CURRENT.as_u32(), 2);
        assert!(!ContainerVersion::Legacy.has_mip_levels());
    }
}
