//! DDS handling for CGTEX.
//!
//! DirectDraw Surface files are the interchange format textures arrive in
//! and can be exported back to:
//!
//! - [`DdsTexture`] recognises a DDS blob and pulls out the size, codec,
//!   embedded name, mip count and payload needed to build a
//!   [`TextureEntry`](cgtex_container::TextureEntry).
//! - [`write_dds`] writes an entry with a standard 128-byte header.
//!
//! Only the DXT1, DXT3 and DXT5 codecs are accepted.
//!
//! # Example
//!
//! ```no_run
//! use cgtex_dds::{DdsTexture, IngestOptions};
//!
//! let texture = DdsTexture::open("grass.dds")?;
//! let entry = texture.into_entry_with(&IngestOptions { split_mipmaps: true })?;
//! println!("{}", entry);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod export;
mod header;
mod ingest;

pub use error::{Error, Result};
pub use export::{to_dds_bytes, write_dds};
pub use header::{caps, flags, DdsHeader, DdsPixelFormat, FourCC, PIXEL_FORMAT_FOURCC};
pub use ingest::{is_dds, DdsTexture, IngestOptions, NAME_LEN, NAME_OFFSET, PAYLOAD_OFFSET};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
