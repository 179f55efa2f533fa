//! DDS header structures.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// `dwFlags` bits of [`DdsHeader`].
pub mod flags {
    pub const CAPS: u32 = 0x1;
    pub const HEIGHT: u32 = 0x2;
    pub const WIDTH: u32 = 0x4;
    pub const PIXEL_FORMAT: u32 = 0x1000;
    pub const MIPMAP_COUNT: u32 = 0x2_0000;
    pub const LINEAR_SIZE: u32 = 0x8_0000;
}

/// `dwCaps` bits of [`DdsHeader`].
pub mod caps {
    pub const COMPLEX: u32 = 0x8;
    pub const TEXTURE: u32 = 0x1000;
    pub const MIPMAP: u32 = 0x40_0000;
}

/// `dwFlags` bit of [`DdsPixelFormat`] marking a valid four-character code.
pub const PIXEL_FORMAT_FOURCC: u32 = 0x4;

/// The 124-byte `DDS_HEADER` that follows the magic.
///
/// Packed, so copy fields into locals before borrowing them.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    pub size: u32,
    /// See [`flags`].
    pub flags: u32,
    pub height: u32,
    pub width: u32,
    /// Byte size of the top level for compressed surfaces.
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    /// Level count; only meaningful with [`flags::MIPMAP_COUNT`] set.
    pub mipmap_count: u32,
    pub reserved1: [u32; 11],
    pub pixel_format: DdsPixelFormat,
    /// See [`caps`].
    pub caps: u32,
    pub caps2: u32,
    pub caps3: u32,
    pub caps4: u32,
    pub reserved2: u32,
}

impl DdsHeader {
    /// Value of the `size` field.
    pub const SIZE: u32 = 124;

    /// Header for a 2D block-compressed surface.
    ///
    /// The mip-chain flag and caps are set only when `mip_count > 1`.
    pub fn compressed(width: u32, height: u32, four_cc: FourCC, mip_count: u32, linear_size: u32) -> Self {
        let mut header_flags = flags::CAPS | flags::HEIGHT | flags::WIDTH | flags::PIXEL_FORMAT | flags::LINEAR_SIZE;
        let mut surface_caps = caps::TEXTURE;
        if mip_count > 1 {
            header_flags |= flags::MIPMAP_COUNT;
            surface_caps |= caps::COMPLEX | caps::MIPMAP;
        }

        Self {
            size: Self::SIZE,
            flags: header_flags,
            height,
            width,
            pitch_or_linear_size: linear_size,
            depth: 0,
            mipmap_count: mip_count,
            reserved1: [0; 11],
            pixel_format: DdsPixelFormat::four_cc(four_cc),
            caps: surface_caps,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }
}

/// The 32-byte `DDS_PIXELFORMAT` embedded in [`DdsHeader`].
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    pub size: u32,
    pub flags: u32,
    pub four_cc: FourCC,
    // Bit count and channel masks, zero for compressed formats. CGTEX
    // authoring tools reuse the first two for an 8-byte texture name.
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Value of the `size` field.
    pub const SIZE: u32 = 32;

    /// Pixel format identified only by a four-character code.
    pub const fn four_cc(four_cc: FourCC) -> Self {
        Self {
            size: Self::SIZE,
            flags: PIXEL_FORMAT_FOURCC,
            four_cc,
            rgb_bit_count: 0,
            r_bit_mask: 0,
            g_bit_mask: 0,
            b_bit_mask: 0,
            a_bit_mask: 0,
        }
    }
}

/// Codec tag of a compressed surface, as stored on disk.
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const DXT1: Self = Self(*b"DXT1");
    pub const DXT3: Self = Self(*b"DXT3");
    pub const DXT5: Self = Self(*b"DXT5");
    /// Marks a DX10 extension header; never accepted for ingest.
    pub const DX10: Self = Self(*b"DX10");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC(\"{}\")", self)
    }
}
