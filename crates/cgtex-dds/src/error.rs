//! Error types for DDS handling.

use thiserror::Error;

use crate::header::FourCC;

/// Errors that can occur when working with DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] cgtex_common::Error),

    /// Input does not start with the DDS signature.
    #[error("not a DDS file: expected 'DDS ', got {0:?}")]
    NotRecognized([u8; 4]),

    /// Compression codec other than DXT1, DXT3 or DXT5.
    #[error("unsupported DDS codec {0}")]
    UnsupportedCodec(FourCC),

    /// Texture format code with no DDS equivalent.
    #[error("format code {0} has no DDS four-character code")]
    UnsupportedFormat(u8),

    /// Width or height is zero or does not fit a CGTEX entry.
    #[error("unsupported DDS dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Declared mip count is longer than a full chain for the dimensions.
    #[error("DDS declares {declared} mip levels but a full chain has {max}")]
    TooManyMipLevels { declared: u32, max: u32 },

    /// Input ends before the named section is complete.
    #[error("DDS {section} truncated: needed {needed} bytes, got {available}")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
