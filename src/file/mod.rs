#![doc = r#"
The decoded [`Project`] and the entities it owns
"#]

/// Contains the [`ProjectBuilder`](builder::ProjectBuilder) and the
/// attachment [`Context`] it tracks.
pub mod builder;
pub use builder::Context;

mod header;
pub use header::*;

mod version;
pub use version::*;

mod diagnostic;
pub use diagnostic::*;

mod channel;
pub use channel::*;

mod pattern;
pub use pattern::*;

mod playlist;
pub use playlist::*;

mod mixer;
pub use mixer::*;

use crate::{
    Tempo,
    event::{EventDecoder, EventId, EventStream, EventValue},
    file::builder::ProjectBuilder,
    reader::{ReadResult, Reader},
};
use alloc::{collections::BTreeMap, vec::Vec};

#[doc = r#"
A decoded FL Studio project.

Built once by [`Project::parse`] and never changed afterwards, so it can be
shared between threads freely.

# Example
```rust
# fn demo(bytes: &[u8]) -> Result<(), flpx::reader::ReaderError> {
use flpx::prelude::*;

let project = Project::parse(bytes)?;
if let Some(tempo) = project.tempo() {
    println!("{tempo} at {} ppq", project.header().ppq());
}
if let Some(kick) = project.channel_by_name("Kick") {
    println!("kick feeds insert {:?}", kick.routed_to());
}
# Ok(())
# }
```
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Project {
    header: Header,
    version: Option<Version>,
    tempo: Option<Tempo>,
    attributes: BTreeMap<EventId, EventValue>,
    channels: Vec<Channel>,
    patterns: Vec<Pattern>,
    playlist: Playlist,
    mixer: Vec<MixerSlot>,
    unknown: UnknownAttributes,
    diagnostics: Vec<Diagnostic>,
}

impl Project {
    pub(crate) fn new(header: Header) -> Self {
        Self {
            header,
            version: None,
            tempo: None,
            attributes: BTreeMap::new(),
            channels: Vec::new(),
            patterns: Vec::new(),
            playlist: Playlist::default(),
            mixer: Vec::new(),
            unknown: UnknownAttributes::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Parse a set of bytes into a project
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = reader.read_header_chunk()?;
        let data = reader.read_data_chunk()?;

        let mut decoder = EventDecoder::new(&header);
        let mut builder = ProjectBuilder::new(header);
        let mut stream = EventStream::new(data);

        for raw in stream.by_ref() {
            let raw = raw?;
            builder.handle_event(decoder.decode(&raw));
        }
        debug_assert_eq!(stream.consumed(), data.len());

        Ok(builder.build())
    }

    /// Read a whole source, then parse it
    #[cfg(feature = "std")]
    pub fn from_reader<R: std::io::Read>(mut source: R) -> ReadResult<Self> {
        use crate::reader::{ReaderError, ReaderErrorKind};

        let mut bytes = Vec::new();
        source
            .read_to_end(&mut bytes)
            .map_err(|e| ReaderError::new(bytes.len(), ReaderErrorKind::Io(e)))?;
        Self::parse(&bytes)
    }

    pub(crate) fn apply(&mut self, id: EventId, value: EventValue) {
        match (id, &value) {
            (EventId::Version, EventValue::Text(text)) => self.version = Version::parse(text),
            (EventId::Tempo, EventValue::Unsigned(millibeats)) => {
                self.tempo = Some(Tempo::from_millibeats(*millibeats))
            }
            (EventId::LegacyTempo, EventValue::Unsigned(bpm)) => {
                self.tempo = Some(Tempo::from_bpm(*bpm as u16))
            }
            _ => {}
        }
        self.attributes.insert(id, value);
    }

    /// The file header
    pub fn header(&self) -> &Header {
        &self.header
    }
    /// The FL Studio release that saved the project
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }
    /// The project tempo
    pub fn tempo(&self) -> Option<Tempo> {
        self.tempo
    }
    /// Any project level attribute, by event
    pub fn project_attribute(&self, id: EventId) -> Option<&EventValue> {
        self.attributes.get(&id)
    }
    /// All project level attributes
    pub fn project_attributes(&self) -> &BTreeMap<EventId, EventValue> {
        &self.attributes
    }
    fn text(&self, id: EventId) -> Option<&str> {
        self.project_attribute(id).and_then(EventValue::as_text)
    }
    /// Project title
    pub fn title(&self) -> Option<&str> {
        self.text(EventId::Title)
    }
    /// Project comments
    pub fn comments(&self) -> Option<&str> {
        self.text(EventId::Comments)
    }
    /// Project URL
    pub fn url(&self) -> Option<&str> {
        self.text(EventId::Url)
    }
    /// Project genre
    pub fn genre(&self) -> Option<&str> {
        self.text(EventId::Genre)
    }
    /// Project artists
    pub fn artists(&self) -> Option<&str> {
        self.text(EventId::Artists)
    }
    /// Project data folder
    pub fn data_path(&self) -> Option<&str> {
        self.text(EventId::DataPath)
    }
    /// Time signature as numerator and beat
    pub fn time_signature(&self) -> Option<(u8, u8)> {
        let numerator = self.project_attribute(EventId::TimeSigNumerator)?.as_unsigned()?;
        let beat = self.project_attribute(EventId::TimeSigBeat)?.as_unsigned()?;
        Some((numerator as u8, beat as u8))
    }

    /// Channels in file order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
    /// The channel with this index
    pub fn channel(&self, index: u16) -> Option<&Channel> {
        by_index(&self.channels, index)
    }
    /// The first channel with exactly this name
    pub fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        by_name(&self.channels, name)
    }

    /// Patterns in file order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
    /// The pattern with this index
    pub fn pattern(&self, index: u16) -> Option<&Pattern> {
        by_index(&self.patterns, index)
    }
    /// The first pattern with exactly this name
    pub fn pattern_by_name(&self, name: &str) -> Option<&Pattern> {
        by_name(&self.patterns, name)
    }

    /// The playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Mixer slots in file order
    pub fn mixer(&self) -> &[MixerSlot] {
        &self.mixer
    }
    /// The mixer slot with this index
    pub fn mixer_slot(&self, index: u16) -> Option<&MixerSlot> {
        by_index(&self.mixer, index)
    }
    /// The first mixer slot with exactly this name
    pub fn mixer_slot_by_name(&self, name: &str) -> Option<&MixerSlot> {
        by_name(&self.mixer, name)
    }

    /// Unknown tags seen while no entity was in context
    pub fn unknown(&self) -> &UnknownAttributes {
        &self.unknown
    }
    /// Non-fatal problems found while building
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Payloads of tags missing from the event table, keyed by tag, in file
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnknownAttributes(BTreeMap<u8, Vec<Vec<u8>>>);

impl UnknownAttributes {
    pub(crate) fn push(&mut self, tag: u8, payload: Vec<u8>) {
        self.0.entry(tag).or_default().push(payload);
    }
    /// Every payload seen for `tag`
    pub fn get(&self, tag: u8) -> &[Vec<u8>] {
        self.0.get(&tag).map_or(&[], Vec::as_slice)
    }
    /// Tags and their payloads, by tag
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[Vec<u8>])> {
        self.0.iter().map(|(tag, payloads)| (*tag, payloads.as_slice()))
    }
    /// Number of distinct unknown tags
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// True if nothing unknown was kept
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the builder needs from every indexed entity
pub(crate) trait Entity {
    fn with_index(index: u16) -> Self;
    fn entity_index(&self) -> u16;
    fn entity_name(&self) -> Option<&str>;
    fn unknown_mut(&mut self) -> &mut UnknownAttributes;
}

fn by_index<T: Entity>(entities: &[T], index: u16) -> Option<&T> {
    entities.iter().find(|e| e.entity_index() == index)
}

fn by_name<'a, T: Entity>(entities: &'a [T], name: &str) -> Option<&'a T> {
    entities.iter().find(|e| e.entity_name() == Some(name))
}

/// Split a packed record list into whole records.
///
/// Leftover bytes are reported, not decoded.
pub(crate) fn split_records(
    bytes: &[u8],
    record_len: usize,
) -> (core::slice::ChunksExact<'_, u8>, Option<DiagnosticKind>) {
    let records = bytes.chunks_exact(record_len);
    let trailing = records.remainder().len();
    let diagnostic = (trailing != 0).then(|| DiagnosticKind::Malformed {
        record_len,
        records: bytes.len() / record_len,
        trailing,
    });
    (records, diagnostic)
}

pub(crate) fn u16_at(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

pub(crate) fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[test]
fn split_records_reports_leftovers() {
    use pretty_assertions::assert_eq;
    let bytes = [0u8; 10];
    let (records, diagnostic) = split_records(&bytes, 4);
    assert_eq!(records.count(), 2);
    assert_eq!(
        diagnostic,
        Some(DiagnosticKind::Malformed {
            record_len: 4,
            records: 2,
            trailing: 2
        })
    );
    let (_, diagnostic) = split_records(&bytes[..8], 4);
    assert_eq!(diagnostic, None);
}

#[test]
fn project_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Project>();
}
