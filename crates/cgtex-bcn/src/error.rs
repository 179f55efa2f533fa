//! Error types for block decompression.

use thiserror::Error;

/// Errors that can occur while decompressing block data.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] cgtex_common::Error),

    /// Width or height is zero.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The output or input size does not fit in memory.
    #[error("{width}x{height} surface is too large to decode")]
    TooLarge { width: u32, height: u32 },

    /// The compressed buffer is shorter than the block grid requires.
    #[error("format {format} data truncated: needed {needed} bytes, got {available}")]
    Truncated {
        format: u8,
        needed: usize,
        available: usize,
    },
}

/// Result type for decompression.
pub type Result<T> = std::result::Result<T, Error>;
