//! Helpers for seekable byte streams.

use std::io::{self, Seek, SeekFrom};

/// Extends [`Seek`] with a length query that leaves the cursor where it was.
pub trait SeekExt: Seek {
    /// Total length of the stream in bytes.
    fn total_len(&mut self) -> io::Result<u64> {
        let position = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        if len != position {
            self.seek(SeekFrom::Start(position))?;
        }
        Ok(len)
    }
}

impl<S: Seek + ?Sized> SeekExt for S {}
