use super::{DiagnosticKind, Entity, UnknownAttributes, Version, split_records, u16_at, u32_at};
use crate::event::{EventId, EventValue};
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// Item indices above this refer to patterns, the rest to channels.
pub const PATTERN_BASE: u16 = 20480;

/// Number of lanes in a playlist.
pub const MAX_PLAYLIST_TRACKS: u16 = 500;

/// What a playlist item plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ItemRef {
    /// A pattern, by index
    Pattern(u16),
    /// An audio or automation clip, by channel index
    Channel(u16),
}

/// One clip placed on the playlist
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlaylistItem {
    /// Start in ticks
    pub position: u32,
    /// What is played
    pub item: ItemRef,
    /// Length in ticks; old files don't store one
    pub length: Option<u32>,
    /// Playlist lane, from the top; old files don't store one
    pub track: Option<u16>,
}

impl PlaylistItem {
    /// Size of a packed item before FL Studio 21
    pub const LEN: usize = 32;
    /// Size of a packed item from FL Studio 21 on
    pub const LEN_21: usize = 60;

    /// Packed item size for projects saved by `version`
    pub fn record_len(version: Option<&Version>) -> usize {
        match version {
            Some(version) if version.major >= 21 => Self::LEN_21,
            _ => Self::LEN,
        }
    }

    fn from_record(record: &[u8]) -> Self {
        let pattern_base = u16_at(record, 4);
        let item_index = u16_at(record, 6);
        let item = if item_index > pattern_base {
            ItemRef::Pattern(item_index - pattern_base)
        } else {
            ItemRef::Channel(item_index)
        };
        let track_rvidx = u16_at(record, 12);
        Self {
            position: u32_at(record, 0),
            item,
            length: Some(u32_at(record, 8)),
            track: Some((MAX_PLAYLIST_TRACKS - 1).saturating_sub(track_rvidx)),
        }
    }

    /// Low word position, high word pattern
    fn from_legacy(packed: u32) -> Self {
        Self {
            position: packed & 0xFFFF,
            item: ItemRef::Pattern((packed >> 16) as u16),
            length: None,
            track: None,
        }
    }
}

#[doc = r#"
One arrangement of the playlist.

Created by an [`EventId::NewArrangement`] marker. Items stay in file order.
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlaylistTrack {
    index: u16,
    name: Option<String>,
    items: Vec<PlaylistItem>,
    attributes: BTreeMap<EventId, EventValue>,
    unknown: UnknownAttributes,
}

impl PlaylistTrack {
    pub(crate) fn new(index: u16) -> Self {
        Self {
            index,
            name: None,
            items: Vec::new(),
            attributes: BTreeMap::new(),
            unknown: UnknownAttributes::default(),
        }
    }

    pub(crate) fn apply(
        &mut self,
        id: EventId,
        value: EventValue,
        record_len: usize,
    ) -> Option<DiagnosticKind> {
        match (id, value) {
            (EventId::ArrangementName, EventValue::Text(name)) => self.name = Some(name),
            (EventId::PlaylistItems, EventValue::Blob(bytes)) => {
                let (records, diagnostic) = split_records(&bytes, record_len);
                self.items.extend(records.map(PlaylistItem::from_record));
                return diagnostic;
            }
            (EventId::LegacyPlaylistItem, EventValue::Unsigned(packed)) => {
                self.items.push(PlaylistItem::from_legacy(packed))
            }
            (id, value) => {
                self.attributes.insert(id, value);
            }
        }
        None
    }

    /// The arrangement index
    pub fn index(&self) -> u16 {
        self.index
    }
    /// Arrangement name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// Items in file order
    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }
    /// Any other attribute, by event
    pub fn attribute(&self, id: EventId) -> Option<&EventValue> {
        self.attributes.get(&id)
    }
    /// Unknown tags seen while this track was in context
    pub fn unknown(&self) -> &UnknownAttributes {
        &self.unknown
    }
}

impl Entity for PlaylistTrack {
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

/// The playlist: every arrangement in file order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Playlist {
    pub(crate) tracks: Vec<PlaylistTrack>,
}

impl Playlist {
    /// Tracks in file order
    pub fn tracks(&self) -> &[PlaylistTrack] {
        &self.tracks
    }
    /// The track with this index
    pub fn track(&self, index: u16) -> Option<&PlaylistTrack> {
        super::by_index(&self.tracks, index)
    }
    /// The first track with exactly this name
    pub fn track_by_name(&self, name: &str) -> Option<&PlaylistTrack> {
        super::by_name(&self.tracks, name)
    }
    /// Items of every track, in file order
    pub fn items(&self) -> impl Iterator<Item = &PlaylistItem> {
        self.tracks.iter().flat_map(|t| t.items.iter())
    }
    /// True if there are no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
