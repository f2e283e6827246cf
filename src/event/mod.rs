#![doc = r#"
Records of the data chunk

# Overview

The data chunk is a flat sequence of records, each `[tag:u8][payload]`.
The tag alone decides how long the payload is:

```text
  0..=63    one byte
 64..=127   two bytes, little endian
128..=191   four bytes, little endian
192..=255   length prefix (see [`decode_vlq`](crate::reader::decode_vlq)) then that many bytes
```

[`EventStream`] splits the chunk into [`RawEvent`]s. [`EventDecoder`]
looks each tag up in [`EVENT_TABLE`] and turns the payload into an
[`EventValue`], producing a [`TypedEvent`].
"#]

mod id;
pub use id::*;

mod stream;
pub use stream::*;

mod decoder;
pub use decoder::*;

/// How a record's payload is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WidthClass {
    /// One byte
    Byte,
    /// Two bytes
    Word,
    /// Four bytes
    Dword,
    /// Length prefixed
    Variable,
}

impl WidthClass {
    /// The width class of a tag, from its numeric range alone
    pub const fn of(tag: u8) -> Self {
        match tag {
            0..=63 => Self::Byte,
            64..=127 => Self::Word,
            128..=191 => Self::Dword,
            192..=255 => Self::Variable,
        }
    }

    /// Payload size for fixed widths
    pub const fn fixed_len(&self) -> Option<usize> {
        match self {
            Self::Byte => Some(1),
            Self::Word => Some(2),
            Self::Dword => Some(4),
            Self::Variable => None,
        }
    }
}

/// One record as it appears in the data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent<'slc> {
    offset: usize,
    tag: u8,
    prefix_len: usize,
    payload: &'slc [u8],
}

impl<'slc> RawEvent<'slc> {
    /// Create a raw event.
    ///
    /// `prefix_len` is the number of length-prefix bytes between the tag
    /// and the payload, zero for fixed width tags.
    pub const fn new(offset: usize, tag: u8, prefix_len: usize, payload: &'slc [u8]) -> Self {
        Self {
            offset,
            tag,
            prefix_len,
            payload,
        }
    }
    /// Absolute offset of the tag byte
    pub const fn offset(&self) -> usize {
        self.offset
    }
    /// The tag byte
    pub const fn tag(&self) -> u8 {
        self.tag
    }
    /// The width class implied by the tag
    pub const fn width(&self) -> WidthClass {
        WidthClass::of(self.tag)
    }
    /// The payload bytes, without any length prefix
    pub const fn payload(&self) -> &'slc [u8] {
        self.payload
    }
    /// Bytes this record occupies in the chunk: tag, length prefix and payload
    pub const fn size(&self) -> usize {
        1 + self.prefix_len + self.payload.len()
    }
}

#[test]
fn width_class_ranges() {
    use pretty_assertions::assert_eq;
    assert_eq!(WidthClass::of(0), WidthClass::Byte);
    assert_eq!(WidthClass::of(63), WidthClass::Byte);
    assert_eq!(WidthClass::of(64), WidthClass::Word);
    assert_eq!(WidthClass::of(127), WidthClass::Word);
    assert_eq!(WidthClass::of(128), WidthClass::Dword);
    assert_eq!(WidthClass::of(191), WidthClass::Dword);
    assert_eq!(WidthClass::of(192), WidthClass::Variable);
    assert_eq!(WidthClass::of(255), WidthClass::Variable);
}
