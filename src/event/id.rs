use super::WidthClass;
use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// How a payload is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValueKind {
    /// Unsigned byte
    U8,
    /// Signed byte
    I8,
    /// Byte where any non-zero value is `true`
    Bool,
    /// Unsigned little endian word
    U16,
    /// Signed little endian word
    I16,
    /// Unsigned little endian dword
    U32,
    /// Signed little endian dword
    I32,
    /// Text in the project's current [`TextEncoding`](super::TextEncoding)
    Text,
    /// Single byte text regardless of the project's encoding
    Ascii,
    /// Opaque bytes, usually a packed record list
    Blob,
}

impl ValueKind {
    /// The width class a tag must have to carry this kind
    pub const fn width(&self) -> WidthClass {
        match self {
            Self::U8 | Self::I8 | Self::Bool => WidthClass::Byte,
            Self::U16 | Self::I16 => WidthClass::Word,
            Self::U32 | Self::I32 => WidthClass::Dword,
            Self::Text | Self::Ascii | Self::Blob => WidthClass::Variable,
        }
    }
}

/// What an event does to the project being built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EventRole {
    /// Starts (or re-enters) an entity and makes it the current context
    Marker,
    /// Sets something on the entity in context, or on the project
    Attribute,
}

/// The entity an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Target {
    /// The project itself; never needs a context
    Project,
    /// A channel rack slot
    Channel,
    /// A pattern
    Pattern,
    /// A playlist track
    Playlist,
    /// A mixer slot
    Mixer,
    /// A plugin, hosted either by a channel or by a mixer slot
    Plugin,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Project => "project",
            Self::Channel => "channel",
            Self::Pattern => "pattern",
            Self::Playlist => "playlist track",
            Self::Mixer => "mixer slot",
            Self::Plugin => "plugin",
        };
        f.write_str(name)
    }
}

/// One row of [`EVENT_TABLE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInfo {
    /// The event
    pub id: EventId,
    /// Human readable name
    pub name: &'static str,
    /// How the payload decodes
    pub kind: ValueKind,
    /// Marker or attribute
    pub role: EventRole,
    /// Which entity the event belongs to
    pub target: Target,
}

impl EventInfo {
    /// The tag byte of this event
    pub fn tag(&self) -> u8 {
        self.id.into()
    }
    /// True for events that switch the builder's context
    pub const fn is_marker(&self) -> bool {
        matches!(self.role, EventRole::Marker)
    }
}

macro_rules! event_table {
    ($($(#[$doc:meta])* $tag:literal => $name:ident: $kind:ident, $role:ident, $target:ident;)*) => {
        #[doc = r#"
The events this crate understands, named after the FL Studio SDK.

Any tag not listed here is still decoded, by width alone, and kept as an
unknown attribute.
"#]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive, IntoPrimitive,
        )]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[repr(u8)]
        pub enum EventId {
            $($(#[$doc])* $name = $tag,)*
        }

        impl EventId {
            /// The table row for this event
            pub const fn info(self) -> &'static EventInfo {
                match self {
                    $(Self::$name => &EventInfo {
                        id: Self::$name,
                        name: stringify!($name),
                        kind: ValueKind::$kind,
                        role: EventRole::$role,
                        target: Target::$target,
                    },)*
                }
            }
        }

        /// Every known event, sorted by tag.
        pub static EVENT_TABLE: &[EventInfo] = &[
            $(*EventId::$name.info(),)*
        ];
    };
}

event_table! {
    /// Channel is switched on
    0 => ChannelEnabled: Bool, Attribute, Channel;
    /// Channel volume, pre FL 4 byte form
    2 => ChannelVolume: U8, Attribute, Channel;
    /// Channel panning, pre FL 4 byte form
    3 => ChannelPan: U8, Attribute, Channel;
    /// MIDI output channel
    4 => MidiChannel: U8, Attribute, Channel;
    /// MIDI root note
    5 => MidiNote: U8, Attribute, Channel;
    /// MIDI program
    6 => MidiPatch: U8, Attribute, Channel;
    /// MIDI bank
    7 => MidiBank: U8, Attribute, Channel;
    /// Pattern loop is on
    9 => LoopActive: Bool, Attribute, Project;
    /// Show the project info window on load
    10 => ShowInfo: Bool, Attribute, Project;
    /// Global swing
    11 => Shuffle: U8, Attribute, Project;
    /// Master volume, old byte form
    12 => MainVolume: U8, Attribute, Project;
    /// Sample is stored compressed
    15 => Zipped: Bool, Attribute, Channel;
    /// Time signature numerator
    17 => TimeSigNumerator: U8, Attribute, Project;
    /// Time signature beat
    18 => TimeSigBeat: U8, Attribute, Project;
    /// Sampler loop points are used
    19 => UseLoopPoints: Bool, Attribute, Channel;
    /// Sampler loop type
    20 => LoopType: U8, Attribute, Channel;
    /// Kind of channel, see [`ChannelKind`](crate::file::ChannelKind)
    21 => ChannelType: U8, Attribute, Channel;
    /// Mixer insert the channel feeds, -1 for none
    22 => RoutedTo: I8, Attribute, Channel;
    /// Project was saved by a registered copy
    28 => Registered: Bool, Attribute, Project;
    /// Channel is locked
    32 => ChannelLocked: Bool, Attribute, Channel;
    /// Starts a channel
    64 => NewChannel: U16, Marker, Channel;
    /// Starts a pattern
    65 => NewPattern: U16, Marker, Pattern;
    /// Tempo in whole beats per minute, before FL 3.4
    66 => LegacyTempo: U16, Attribute, Project;
    /// Selected pattern
    67 => CurrentPattern: U16, Attribute, Project;
    /// Master pitch in cents
    80 => MainPitch: I16, Attribute, Project;
    /// Fractional tempo that goes with [`EventId::LegacyTempo`]
    93 => FineTempo: U16, Attribute, Project;
    /// Closes an effect slot of a mixer slot
    98 => SlotIndex: U16, Attribute, Mixer;
    /// Starts a playlist track (an arrangement)
    99 => NewArrangement: U16, Marker, Playlist;
    /// Selected arrangement
    100 => CurrentArrangement: U16, Attribute, Project;
    /// Channel colour, `0x00BBGGRR`
    128 => ChannelColor: U32, Attribute, Channel;
    /// Playlist item, before FL 4: low word position, high word pattern
    129 => LegacyPlaylistItem: U32, Attribute, Playlist;
    /// Mixer slot output, -1 for none
    147 => InsertOutput: I32, Attribute, Mixer;
    /// Mixer slot colour
    149 => InsertColor: U32, Attribute, Mixer;
    /// Pattern colour
    150 => PatternColor: U32, Attribute, Pattern;
    /// Mixer slot input, -1 for none
    154 => InsertInput: I32, Attribute, Mixer;
    /// Tempo in thousandths of a beat per minute
    156 => Tempo: U32, Attribute, Project;
    /// Build number of the saving FL Studio
    159 => FlBuild: U32, Attribute, Project;
    /// Channel name, before plugin display names
    192 => LegacyChannelName: Text, Attribute, Channel;
    /// Pattern name
    193 => PatternName: Text, Attribute, Pattern;
    /// Project title
    194 => Title: Text, Attribute, Project;
    /// Project comments
    195 => Comments: Text, Attribute, Project;
    /// Sampler file path
    196 => SamplePath: Text, Attribute, Channel;
    /// Project URL
    197 => Url: Text, Attribute, Project;
    /// Project comments as RTF
    198 => RtfComments: Blob, Attribute, Project;
    /// Version of the saving FL Studio, e.g. `20.8.4.2576`
    199 => Version: Ascii, Attribute, Project;
    /// Plugin file name
    201 => PluginInternalName: Text, Attribute, Plugin;
    /// Project data folder
    202 => DataPath: Text, Attribute, Project;
    /// Plugin display name; the channel name for generators
    203 => PluginName: Text, Attribute, Plugin;
    /// Mixer slot name
    204 => InsertName: Text, Attribute, Mixer;
    /// Project genre
    206 => Genre: Text, Attribute, Project;
    /// Project artists
    207 => Artists: Text, Attribute, Project;
    /// Plugin wrapper state
    212 => PluginWrapper: Blob, Attribute, Plugin;
    /// Plugin parameters
    213 => PluginParams: Blob, Attribute, Plugin;
    /// Packed channel parameters
    215 => ChannelParams: Blob, Attribute, Channel;
    /// Automation points of a pattern
    223 => PatternControllers: Blob, Attribute, Pattern;
    /// Notes of a pattern
    224 => PatternNotes: Blob, Attribute, Pattern;
    /// Packed playlist items
    233 => PlaylistItems: Blob, Attribute, Playlist;
    /// Starts the next mixer slot
    236 => InsertFlags: Blob, Marker, Mixer;
    /// Arrangement name
    241 => ArrangementName: Text, Attribute, Playlist;
}

/// Look up a tag in [`EVENT_TABLE`]
pub fn lookup(tag: u8) -> Option<&'static EventInfo> {
    EventId::try_from(tag).ok().map(EventId::info)
}
