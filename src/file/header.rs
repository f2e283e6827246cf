use crate::event::TextEncoding;

#[doc = r#"
   The contents of the `FLhd` chunk
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    format: u16,
    channel_count: u16,
    ppq: u16,
}

impl Header {
    /// Create a new header
    pub const fn new(format: u16, channel_count: u16, ppq: u16) -> Self {
        Self {
            format,
            channel_count,
            ppq,
        }
    }
    /// Read the six byte body of the header chunk
    pub const fn from_le_bytes(bytes: [u8; 6]) -> Self {
        Self {
            format: u16::from_le_bytes([bytes[0], bytes[1]]),
            channel_count: u16::from_le_bytes([bytes[2], bytes[3]]),
            ppq: u16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }
    /// The format version
    pub const fn format(&self) -> u16 {
        self.format
    }
    /// Number of channels the file claims to hold
    pub const fn channel_count(&self) -> u16 {
        self.channel_count
    }
    /// Ticks per quarter note
    pub const fn ppq(&self) -> u16 {
        self.ppq
    }
    /// The text encoding the format version selects
    pub const fn text_encoding(&self) -> TextEncoding {
        TextEncoding::for_format(self.format)
    }
}

#[test]
fn header_fields_are_little_endian() {
    use pretty_assertions::assert_eq;
    let header = Header::from_le_bytes([0x0B, 0x00, 0x10, 0x00, 0x60, 0x00]);
    assert_eq!(header, Header::new(11, 16, 96));
    assert_eq!(header.text_encoding(), TextEncoding::Utf16Le);
}
