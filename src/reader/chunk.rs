#![doc = r#"
Chunk framing

# Overview

A project file holds exactly two chunks, each a four byte ASCII tag
followed by a 32-bit little endian length and then that many bytes:

```text
[ "FLhd" ][ 6 ][ format:u16 | channel_count:u16 | ppq:u16 ]
[ "FLdt" ][ N ][ N bytes of tagged records                 ]
```

The header chunk always has a length of 6 bytes. The data chunk must be
the last thing in the file: its declared length has to match the bytes
that follow it exactly.
"#]

use super::{FormatError, ReadResult, Reader, ReaderError};
use crate::file::Header;

/// Tag of the header chunk
pub const HEADER_MAGIC: [u8; 4] = *b"FLhd";
/// Tag of the data chunk
pub const DATA_MAGIC: [u8; 4] = *b"FLdt";
/// Length of the header chunk's body
pub const HEADER_LEN: u32 = 6;

/// The body of the data chunk.
///
/// Borrowed from the source, together with the absolute offset of its
/// first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunk<'slc> {
    bytes: &'slc [u8],
    offset: usize,
}

impl<'slc> DataChunk<'slc> {
    /// Wrap the body of a data chunk that starts at `offset` in its file
    pub const fn new(bytes: &'slc [u8], offset: usize) -> Self {
        Self { bytes, offset }
    }
    /// The record bytes
    pub const fn bytes(&self) -> &'slc [u8] {
        self.bytes
    }
    /// Absolute offset of the first record
    pub const fn offset(&self) -> usize {
        self.offset
    }
    /// Declared length of the chunk
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }
    /// True if the chunk holds no records
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<'slc> Reader<'slc> {
    fn read_magic(&mut self, expected: [u8; 4]) -> ReadResult<()> {
        let position = self.buffer_position();
        let found = self.read_exact_size()?;
        if found != expected {
            return Err(ReaderError::format(
                position,
                FormatError::Magic { expected, found },
            ));
        }
        Ok(())
    }

    fn read_chunk_body(&mut self, declared: u32) -> ReadResult<&'slc [u8]> {
        let available = self.remaining();
        if declared as usize > available {
            return Err(ReaderError::format(
                self.buffer_position(),
                FormatError::Truncated {
                    declared,
                    available,
                },
            ));
        }
        self.read_slice(declared as usize)
    }

    /// Read and validate the `FLhd` chunk.
    pub fn read_header_chunk(&mut self) -> ReadResult<Header> {
        self.read_magic(HEADER_MAGIC)?;
        let position = self.buffer_position();
        let len = self.read_u32_le()?;
        if len != HEADER_LEN {
            return Err(ReaderError::format(position, FormatError::HeaderLength(len)));
        }
        let body = self.read_chunk_body(len)?;
        Ok(Header::from_le_bytes([
            body[0], body[1], body[2], body[3], body[4], body[5],
        ]))
    }

    /// Read the `FLdt` chunk and return its body.
    ///
    /// The chunk must end exactly where the source does.
    pub fn read_data_chunk(&mut self) -> ReadResult<DataChunk<'slc>> {
        self.read_magic(DATA_MAGIC)?;
        let len = self.read_u32_le()?;
        let offset = self.buffer_position();
        let bytes = self.read_chunk_body(len)?;
        if !self.is_empty() {
            return Err(ReaderError::format(
                self.buffer_position(),
                FormatError::TrailingBytes(self.remaining()),
            ));
        }
        Ok(DataChunk::new(bytes, offset))
    }
}
