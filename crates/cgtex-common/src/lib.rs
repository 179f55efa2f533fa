//! Common utilities for CGTEX.
//!
//! This crate provides foundational types and utilities used across all CGTEX crates:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`SeekExt`] - Length and remaining-byte queries for seekable streams
//! - [`align`] - Word alignment arithmetic shared by the container reader and writer
//! - [`blocks`] - 4x4 block size and mip dimension arithmetic

mod error;
mod reader;
mod stream;

pub mod align;
pub mod blocks;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use stream::SeekExt;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
