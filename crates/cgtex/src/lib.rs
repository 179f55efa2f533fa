//! CGTEX - texture container toolkit.
//!
//! This crate provides a unified interface to the CGTEX crates.
//!
//! # Crates
//!
//! - [`cgtex_common`] - Binary reading, alignment and block-grid helpers
//! - [`cgtex_container`] - CGTEX container reading and writing
//! - [`cgtex_bcn`] - BC1/BC2/BC3 decompression to RGBA8
//! - [`cgtex_dds`] - DDS ingest and export
//!
//! # Example
//!
//! ```no_run
//! use cgtex::prelude::*;
//!
//! let texture = DdsTexture::open("grass.dds")?;
//! let entry = texture.into_entry();
//! CgtexFile::write_to_path("terrain.cgtex", &[entry])?;
//!
//! let file = CgtexFile::open("terrain.cgtex")?;
//! for entry in file.textures() {
//!     let image = decompress_level(entry, 0)?;
//!     println!("{} -> {}x{}", entry.name(), image.width(), image.height());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod export;
mod preview;

pub use cgtex_bcn as bcn;
pub use cgtex_common as common;
pub use cgtex_container as container;
pub use cgtex_dds as dds;

pub use error::{Error, Result};
pub use export::{DdsExporter, ExportRegistry, Exporter, PngExporter};
pub use preview::{decompress_level, decompress_level_with};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{decompress_level, decompress_level_with, ExportRegistry, Exporter};
    pub use cgtex_bcn::{decompress, decompress_with, DecodeOptions, ExplicitAlpha, RgbaImage};
    pub use cgtex_container::{CgtexFile, CgtexReader, CgtexWriter, ContainerMetadata, TextureEntry, TextureFormat};
    pub use cgtex_dds::{DdsTexture, IngestOptions};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
