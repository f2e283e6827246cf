use super::{EventId, EventInfo, RawEvent, Target, ValueKind, lookup};
use crate::file::{Header, Version};
use alloc::{string::String, vec::Vec};

/// Header format values from this one on store text as UTF-16.
pub const UNICODE_FORMAT_VERSION: u16 = 11;

/// How text payloads are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TextEncoding {
    /// One byte per character (Latin-1)
    #[default]
    SingleByte,
    /// Two bytes per character, little endian
    Utf16Le,
}

impl TextEncoding {
    /// The encoding a header's format field selects
    pub const fn for_format(format: u16) -> Self {
        if format >= UNICODE_FORMAT_VERSION {
            Self::Utf16Le
        } else {
            Self::SingleByte
        }
    }

    /// The encoding used by a given FL Studio release (UTF-16 since 11.5)
    pub const fn for_version(version: &Version) -> Self {
        if version.major > 11 || (version.major == 11 && version.minor >= 5) {
            Self::Utf16Le
        } else {
            Self::SingleByte
        }
    }

    /// Decode text, stopping at the first NUL unit.
    ///
    /// An odd trailing byte in UTF-16 text is ignored and unpaired
    /// surrogates become U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::SingleByte => bytes
                .iter()
                .take_while(|&&b| b != 0)
                .map(|&b| char::from(b))
                .collect(),
            Self::Utf16Le => {
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .take_while(|&unit| unit != 0);
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
        }
    }
}

/// A decoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EventValue {
    /// An unsigned integer of any fixed width
    Unsigned(u32),
    /// A signed integer of any fixed width
    Signed(i32),
    /// A flag byte
    Flag(bool),
    /// Decoded text
    Text(String),
    /// Bytes kept as they are
    Blob(Vec<u8>),
}

impl EventValue {
    /// The value as an unsigned integer, if it is one
    pub const fn as_unsigned(&self) -> Option<u32> {
        match self {
            Self::Unsigned(v) => Some(*v),
            _ => None,
        }
    }
    /// The value as a signed integer, if it is one
    pub const fn as_signed(&self) -> Option<i32> {
        match self {
            Self::Signed(v) => Some(*v),
            _ => None,
        }
    }
    /// The value as a flag, if it is one
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(v) => Some(*v),
            _ => None,
        }
    }
    /// The value as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
    /// The bytes, if the value is a blob
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// A record with its payload interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedEvent {
    offset: usize,
    tag: u8,
    info: Option<&'static EventInfo>,
    value: EventValue,
}

impl TypedEvent {
    /// Create a typed event
    pub const fn new(
        offset: usize,
        tag: u8,
        info: Option<&'static EventInfo>,
        value: EventValue,
    ) -> Self {
        Self {
            offset,
            tag,
            info,
            value,
        }
    }
    /// Absolute offset of the record's tag byte
    pub const fn offset(&self) -> usize {
        self.offset
    }
    /// The tag byte
    pub const fn tag(&self) -> u8 {
        self.tag
    }
    /// The event, if the tag is known
    pub fn id(&self) -> Option<EventId> {
        self.info.map(|info| info.id)
    }
    /// The table row, if the tag is known
    pub const fn info(&self) -> Option<&'static EventInfo> {
        self.info
    }
    /// Which entity this event belongs to, if the tag is known
    pub fn target(&self) -> Option<Target> {
        self.info.map(|info| info.target)
    }
    /// The decoded payload
    pub const fn value(&self) -> &EventValue {
        &self.value
    }
    /// Take the decoded payload
    pub fn into_value(self) -> EventValue {
        self.value
    }
}

/// Turns [`RawEvent`]s into [`TypedEvent`]s.
///
/// Holds the text encoding, which starts from the header and follows any
/// [`EventId::Version`] event seen later.
#[derive(Debug, Clone)]
pub struct EventDecoder {
    encoding: TextEncoding,
}

impl EventDecoder {
    /// A decoder for a file with this header
    pub const fn new(header: &Header) -> Self {
        Self {
            encoding: TextEncoding::for_format(header.format()),
        }
    }

    /// A decoder with a fixed starting encoding
    pub const fn with_encoding(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    /// The encoding the next text payload will be read with
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Interpret one record.
    ///
    /// Never fails: unknown tags come back as a blob with no
    /// [`EventInfo`].
    pub fn decode(&mut self, raw: &RawEvent<'_>) -> TypedEvent {
        let info = lookup(raw.tag());
        let value = match info {
            Some(info) => self.decode_known(info, raw.payload()),
            None => EventValue::Blob(raw.payload().to_vec()),
        };
        TypedEvent::new(raw.offset(), raw.tag(), info, value)
    }

    fn decode_known(&mut self, info: &EventInfo, payload: &[u8]) -> EventValue {
        let value = match info.kind {
            ValueKind::U8 => EventValue::Unsigned(fixed(payload) as u32),
            ValueKind::I8 => EventValue::Signed(fixed(payload) as u8 as i8 as i32),
            ValueKind::Bool => EventValue::Flag(fixed(payload) != 0),
            ValueKind::U16 => EventValue::Unsigned(fixed(payload) as u32),
            ValueKind::I16 => EventValue::Signed(fixed(payload) as u16 as i16 as i32),
            ValueKind::U32 => EventValue::Unsigned(fixed(payload) as u32),
            ValueKind::I32 => EventValue::Signed(fixed(payload) as u32 as i32),
            ValueKind::Text => EventValue::Text(self.encoding.decode(payload)),
            ValueKind::Ascii => EventValue::Text(TextEncoding::SingleByte.decode(payload)),
            ValueKind::Blob => EventValue::Blob(payload.to_vec()),
        };
        if info.id == EventId::Version {
            if let Some(version) = value.as_text().and_then(Version::parse) {
                self.encoding = TextEncoding::for_version(&version);
            }
        }
        value
    }
}

/// Little endian value of a fixed width payload
fn fixed(payload: &[u8]) -> u64 {
    payload
        .iter()
        .rev()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64)
}
