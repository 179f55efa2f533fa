//! Error types for CGTEX container handling.

use thiserror::Error;

/// Errors that can occur when reading or writing CGTEX containers.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Attempted to write a container without textures.
    #[error("refusing to write a container with no textures")]
    EmptyInput,

    /// A texture declares a non-positive or unrepresentable mip count.
    #[error("texture {index}: invalid mip count {count}")]
    InvalidMipCount { index: usize, count: u64 },

    /// The declared mip count disagrees with the number of level buffers.
    #[error("texture {index}: declared {declared} mip levels but has {actual}")]
    MipCountMismatch {
        index: usize,
        declared: u32,
        actual: usize,
    },

    /// A name or level payload is too large for its 32-bit length prefix.
    #[error("texture {index}: {field} length {len} exceeds the 32-bit length prefix")]
    FieldTooLarge {
        index: usize,
        field: &'static str,
        len: usize,
    },

    /// Invalid container magic.
    #[error("invalid CGTEX magic: expected {expected:?}, got {actual:?}")]
    BadMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Source is shorter than the fixed header.
    #[error("CGTEX header needs {needed} bytes but the source has {available}")]
    TruncatedHeader { needed: u64, available: u64 },

    /// Header version is neither the legacy nor the mipmapped layout.
    #[error("unsupported CGTEX version {0}")]
    UnsupportedVersion(u32),

    /// Header texture count is negative.
    #[error("negative texture count {0}")]
    NegativeCount(i32),

    /// Header data offset lies outside the source.
    #[error("data offset {offset} outside of {file_size}-byte source")]
    OffsetOutOfRange { offset: i64, file_size: u64 },

    /// A record field holds a value that cannot be valid.
    #[error("texture {index}: corrupt {field} value {value}")]
    CorruptRecord {
        index: usize,
        field: &'static str,
        value: i64,
    },

    /// A record field extends past the end of the source.
    #[error(
        "texture {index}: {field} at offset {position} needs {needed} bytes but only {available} remain"
    )]
    Truncated {
        index: usize,
        field: &'static str,
        position: u64,
        needed: u64,
        available: u64,
    },
}

/// Coarse classification of container errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source is not a container this crate understands.
    Format,
    /// An offset, count or length points outside the source.
    Bounds,
    /// The caller supplied textures that cannot be written.
    State,
    /// The underlying stream failed.
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::BadMagic { .. } | Error::UnsupportedVersion(_) => ErrorKind::Format,
            Error::TruncatedHeader { .. }
            | Error::NegativeCount(_)
            | Error::OffsetOutOfRange { .. }
            | Error::CorruptRecord { .. }
            | Error::Truncated { .. } => ErrorKind::Bounds,
            Error::EmptyInput
            | Error::InvalidMipCount { .. }
            | Error::MipCountMismatch { .. }
            | Error::FieldTooLarge { .. } => ErrorKind::State,
        }
    }
}

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, Error>;
