//! Writing texture entries back out as DDS files.

use std::io::Write;

use cgtex_container::{TextureEntry, TextureFormat};
use zerocopy::IntoBytes;

use crate::header::{DdsHeader, FourCC};
use crate::{Error, Result, DDS_MAGIC};

/// Write `entry` as a DDS file with every mip level it holds.
pub fn write_dds<W: Write + ?Sized>(writer: &mut W, entry: &TextureEntry) -> Result<()> {
    let format = entry.texture_format().ok_or(Error::UnsupportedFormat(entry.format()))?;
    let header = header_for(entry, format);

    writer.write_all(DDS_MAGIC)?;
    writer.write_all(header.as_bytes())?;
    for level in entry.levels() {
        writer.write_all(level)?;
    }
    Ok(())
}

/// Serialize `entry` as an in-memory DDS file.
pub fn to_dds_bytes(entry: &TextureEntry) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(DDS_MAGIC.len() + DdsHeader::SIZE as usize + entry.payload_len());
    write_dds(&mut out, entry)?;
    Ok(out)
}

fn header_for(entry: &TextureEntry, format: TextureFormat) -> DdsHeader {
    let linear_size = entry
        .expected_level_size(0)
        .and_then(|size| u32::try_from(size).ok())
        .unwrap_or(0);
    let mip_count = entry.levels().len().max(1) as u32;

    DdsHeader::compressed(
        entry.width() as u32,
        entry.height() as u32,
        FourCC(format.four_cc()),
        mip_count,
        linear_size,
    )
}
