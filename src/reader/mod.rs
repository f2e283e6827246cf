#![doc = r#"
Forward-only cursor over the bytes of a project file.

The [`Reader`] never seeks backwards. Chunk framing, the length prefixes
of variable width records and the records themselves are all read by
advancing the same cursor, so every error can name the absolute byte
offset where it happened.
"#]

mod error;
pub use error::*;

mod vlq;
pub use vlq::*;

mod chunk;
pub use chunk::*;

/// A cursor over a byte slice.
///
/// Positions reported by the reader are absolute offsets into the file,
/// even when the reader only covers the data chunk.
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
    offset: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader at the start of the file
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self {
            data,
            position: 0,
            offset: 0,
        }
    }

    /// Create a reader over a part of a file that begins at `offset`
    pub const fn with_offset(data: &'slc [u8], offset: usize) -> Self {
        Self {
            data,
            position: 0,
            offset,
        }
    }

    /// The absolute position of the next byte to be read
    pub const fn buffer_position(&self) -> usize {
        self.offset + self.position
    }

    /// Number of bytes that haven't been read yet
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True once every byte has been read
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read the next byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size()?;
        Ok(byte)
    }

    /// Read a little endian `u16`
    pub fn read_u16_le(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_le_bytes)
    }

    /// Read a little endian `u32`
    pub fn read_u32_le(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_le_bytes)
    }

    /// Read exactly `N` bytes
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut bytes = [0; N];
        bytes.copy_from_slice(slice);
        Ok(bytes)
    }

    /// Borrow the next `len` bytes and advance past them
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        if len > self.remaining() {
            return Err(ReaderError::oob(self.buffer_position()));
        }
        let start = self.position;
        self.position += len;
        Ok(&self.data[start..self.position])
    }
}

#[test]
fn reads_little_endian() {
    use pretty_assertions::assert_eq;
    let bytes = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u8().unwrap(), 1);
    assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
    assert_eq!(reader.read_u32_le().unwrap(), 0x1234_5678);
    assert!(reader.is_empty());
}

#[test]
fn out_of_bounds_reports_absolute_position() {
    let bytes = [0x00, 0x01];
    let mut reader = Reader::with_offset(&bytes, 100);
    reader.read_u8().unwrap();
    let err = reader.read_u32_le().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 101);
    // a failed read doesn't move the cursor
    assert_eq!(reader.remaining(), 1);
}
