//! Bounds-checked cursor over an in-memory byte slice.
//!
//! Used for fixed-layout data that is already fully in memory: DDS headers
//! and compressed block streams. A read that would run past the end fails
//! with [`Error::UnexpectedEof`] and leaves the cursor untouched.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Little-endian reader over a borrowed byte slice.
///
/// ```
/// use cgtex_common::BinaryReader;
///
/// // One BC1 block: two RGB565 endpoints, then 32 bits of indices.
/// let block = [0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0xE4, 0xE4];
/// let mut reader = BinaryReader::new(&block);
///
/// assert_eq!(reader.read_u16()?, 0xF800);
/// assert_eq!(reader.read_u16()?, 0x001F);
/// assert_eq!(reader.read_u32()?, 0xE4E4_E4E4);
/// assert_eq!(reader.remaining(), 0);
/// # Ok::<(), cgtex_common::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Reader positioned at the start of `data`.
    pub const fn new(data: &'a [u8]) -> Self {
        Self::new_at(data, 0)
    }

    /// Reader positioned at `position`, which may lie past the end.
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Offset of the next byte to be read.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Bytes left before the end of the slice.
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Borrow the next `count` bytes and step over them.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or(Error::UnexpectedEof {
                position: self.position,
                needed: count,
                available: self.remaining(),
            })?;

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Copy the next `N` bytes out as an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a NUL-padded text field of `width` bytes.
    ///
    /// Everything from the first NUL on is dropped; invalid UTF-8 is
    /// replaced.
    pub fn read_string_in_buffer(&mut self, width: usize) -> Result<String> {
        let field = self.read_bytes(width)?;
        let text = match memchr::memchr(0, field) {
            Some(nul) => &field[..nul],
            None => field,
        };
        Ok(String::from_utf8_lossy(text).into_owned())
    }

    /// Copy a plain-old-data struct out of the slice.
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let position = self.position;
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            position,
            needed: size,
            available: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_name_field() {
        let header = b"DDS rock\0\0\0\0tail";
        let mut reader = BinaryReader::new_at(header, 4);

        assert_eq!(reader.read_string_in_buffer(8).unwrap(), "rock");
        assert_eq!(reader.position(), 12);
        assert_eq!(reader.read_string_in_buffer(4).unwrap(), "tail");
    }

    #[test]
    fn test_short_read_leaves_position() {
        let mut reader = BinaryReader::new_at(&[1, 2, 3], 1);

        match reader.read_u32() {
            Err(Error::UnexpectedEof {
                position,
                needed,
                available,
            }) => {
                assert_eq!((position, needed, available), (1, 4, 2));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_array::<2>().unwrap(), [2, 3]);
    }

    #[test]
    fn test_start_past_end() {
        let mut reader = BinaryReader::new_at(&[0; 4], 9);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.read_bytes(0).is_err());
    }
}
