//! CGTEX texture container reader and writer.
//!
//! A CGTEX file stores any number of named, block-compressed textures, each
//! with its own mip chain, behind a small versioned header.
//!
//! # File Format
//!
//! All integers are little-endian.
//!
//! ```text
//! Header:  magic "CGTX"  version:u32  textureCount:u32  dataOffset:u64
//! Record*: width:u16 height:u16 mipMapCount:i32 nameLen:i32 name[nameLen]
//!          format:u8  pad[0..3]   (to the next multiple of 4)
//!          { dataLen:i32 data[dataLen] } x mipMapCount
//! ```
//!
//! Version 1 files use an older record shape without the mip count and the
//! padding (`width height nameLen name format dataLen data`); they can be read
//! but are never written.
//!
//! # Example
//!
//! ```no_run
//! use cgtex_container::{CgtexFile, TextureEntry};
//!
//! let textures = vec![TextureEntry::with_base_level(4, 4, "white", 1, vec![0xFF; 8])];
//! CgtexFile::write_to_path("textures.cgtex", &textures)?;
//!
//! let file = CgtexFile::open("textures.cgtex")?;
//! for texture in file.textures() {
//!     println!("{}", texture);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod entry;
mod error;
mod file;
mod metadata;
mod reader;
mod writer;

pub use entry::{TextureEntry, TextureFormat, TextureSummary};
pub use error::{Error, ErrorKind, Result};
pub use file::CgtexFile;
pub use metadata::{ContainerMetadata, ContainerVersion, HEADER_SIZE, MAGIC, RECORD_ALIGNMENT};
pub use reader::CgtexReader;
pub use writer::{write_container, CgtexWriter};
