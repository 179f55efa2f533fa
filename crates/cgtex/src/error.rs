//! Error types for the toolkit facade.

use thiserror::Error;

/// Errors from previewing and exporting textures.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container error.
    #[error(transparent)]
    Container(#[from] cgtex_container::Error),

    /// Decompression error.
    #[error(transparent)]
    Decode(#[from] cgtex_bcn::Error),

    /// DDS error.
    #[error(transparent)]
    Dds(#[from] cgtex_dds::Error),

    /// Image encoding error.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Requested mip level does not exist.
    #[error("texture '{name}' has {available} level(s), level {level} requested")]
    LevelOutOfRange {
        name: String,
        level: usize,
        available: usize,
    },

    /// No exporter registered for an extension.
    #[error("no exporter registered for '{0}'")]
    UnknownExportFormat(String),
}

/// Result type for toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;
