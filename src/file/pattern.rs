use super::{DiagnosticKind, Entity, UnknownAttributes, split_records, u16_at, u32_at};
use crate::event::{EventId, EventValue};
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// A note of a pattern.
///
/// Stored as 24 bytes in the [`EventId::PatternNotes`] payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Note {
    /// Start, in ticks from the pattern start
    pub position: u32,
    /// Note flags (slide, porta)
    pub flags: u16,
    /// Index of the channel that plays the note
    pub channel: u16,
    /// Length in ticks
    pub length: u32,
    /// Key, 60 is C5
    pub key: u16,
    /// Note group, 0 for none
    pub group: u16,
    /// Fine pitch, 120 is centered
    pub fine_pitch: u8,
    /// Release velocity
    pub release: u8,
    /// MIDI channel (colour group in the piano roll)
    pub midi_channel: u8,
    /// Panning, 64 is centered
    pub pan: u8,
    /// Velocity
    pub velocity: u8,
    /// Filter cutoff
    pub mod_x: u8,
    /// Filter resonance
    pub mod_y: u8,
}

impl Note {
    /// Size of one packed note
    pub const LEN: usize = 24;

    fn from_record(record: &[u8]) -> Self {
        Self {
            position: u32_at(record, 0),
            flags: u16_at(record, 4),
            channel: u16_at(record, 6),
            length: u32_at(record, 8),
            key: u16_at(record, 12),
            group: u16_at(record, 14),
            fine_pitch: record[16],
            release: record[18],
            midi_channel: record[19],
            pan: record[20],
            velocity: record[21],
            mod_x: record[22],
            mod_y: record[23],
        }
    }
}

/// An automation point of a pattern.
///
/// Stored as 12 bytes in the [`EventId::PatternControllers`] payload.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Automation {
    /// Position in ticks from the pattern start
    pub position: u32,
    /// Index of the automated channel
    pub channel: u8,
    /// Point flags
    pub flags: u8,
    /// Normalised value
    pub value: f32,
}

impl Automation {
    /// Size of one packed point
    pub const LEN: usize = 12;

    fn from_record(record: &[u8]) -> Self {
        Self {
            position: u32_at(record, 0),
            channel: record[6],
            flags: record[7],
            value: f32::from_bits(u32_at(record, 8)),
        }
    }
}

/// One record of a pattern, in file order
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PatternRecord {
    /// A note
    Note(Note),
    /// An automation point
    Automation(Automation),
}

#[doc = r#"
A pattern.

Created by an [`EventId::NewPattern`] marker. FL Studio writes one section
per pattern for names and notes and a second one for automation, so a
marker with a known index re-enters the existing pattern.
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pattern {
    index: u16,
    name: Option<String>,
    color: Option<u32>,
    records: Vec<PatternRecord>,
    attributes: BTreeMap<EventId, EventValue>,
    unknown: UnknownAttributes,
}

impl Pattern {
    pub(crate) fn new(index: u16) -> Self {
        Self {
            index,
            name: None,
            color: None,
            records: Vec::new(),
            attributes: BTreeMap::new(),
            unknown: UnknownAttributes::default(),
        }
    }

    pub(crate) fn apply(&mut self, id: EventId, value: EventValue) -> Option<DiagnosticKind> {
        match (id, value) {
            (EventId::PatternName, EventValue::Text(name)) => self.name = Some(name),
            (EventId::PatternColor, EventValue::Unsigned(color)) => self.color = Some(color),
            (EventId::PatternNotes, EventValue::Blob(bytes)) => {
                let (records, diagnostic) = split_records(&bytes, Note::LEN);
                self.records
                    .extend(records.map(|r| PatternRecord::Note(Note::from_record(r))));
                return diagnostic;
            }
            (EventId::PatternControllers, EventValue::Blob(bytes)) => {
                let (records, diagnostic) = split_records(&bytes, Automation::LEN);
                self.records.extend(
                    records.map(|r| PatternRecord::Automation(Automation::from_record(r))),
                );
                return diagnostic;
            }
            (id, value) => {
                self.attributes.insert(id, value);
            }
        }
        None
    }

    /// The pattern's index
    pub fn index(&self) -> u16 {
        self.index
    }
    /// Pattern name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// Colour as `0x00BBGGRR`
    pub fn color(&self) -> Option<u32> {
        self.color
    }
    /// Notes and automation points in file order
    pub fn records(&self) -> &[PatternRecord] {
        &self.records
    }
    /// Only the notes
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.records.iter().filter_map(|r| match r {
            PatternRecord::Note(note) => Some(note),
            PatternRecord::Automation(_) => None,
        })
    }
    /// Only the automation points
    pub fn automation(&self) -> impl Iterator<Item = &Automation> {
        self.records.iter().filter_map(|r| match r {
            PatternRecord::Automation(point) => Some(point),
            PatternRecord::Note(_) => None,
        })
    }
    /// Any other pattern attribute, by event
    pub fn attribute(&self, id: EventId) -> Option<&EventValue> {
        self.attributes.get(&id)
    }
    /// Unknown tags seen while this pattern was in context
    pub fn unknown(&self) -> &UnknownAttributes {
        &self.unknown
    }
}

impl Entity for Pattern {
    fn with_index(index: u16) -> Self {
        Self::new(index)
    }
    fn entity_index(&self) -> u16 {
        self.index
    }
    fn entity_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn unknown_mut(&mut self) -> &mut UnknownAttributes {
        &mut self.unknown
    }
}
