use super::{Entity, UnknownAttributes};
use crate::event::{EventId, EventValue};
use alloc::{collections::BTreeMap, string::String};
use num_enum::{FromPrimitive, IntoPrimitive};

/// What a channel rack slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum ChannelKind {
    /// An audio sample
    Sampler = 0,
    /// A native generator plugin
    Native = 2,
    /// A layer of other channels
    Layer = 3,
    /// A generator plugin
    Instrument = 4,
    /// An automation clip
    Automation = 5,
    /// A kind this crate doesn't name
    #[num_enum(catch_all)]
    Other(u8),
}

// `#[default]` can't sit next to num_enum's `catch_all`
impl Default for ChannelKind {
    fn default() -> Self {
        Self::Sampler
    }
}

#[doc = r#"
A slot of the channel rack.

Created by an [`EventId::NewChannel`] marker; every channel event after it
lands here until the next marker.
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Channel {
    index: u16,
    name: Option<String>,
    kind: ChannelKind,
    plugin: Option<String>,
    sample_path: Option<String>,
    color: Option<u32>,
    attributes: BTreeMap<EventId, EventValue>,
    unknown: UnknownAttributes,
}

impl Channel {
    pub(crate) fn new(index: u16) -> Self {
        Self {
            index,
            name: None,
            kind: ChannelKind::default(),
            plugin: None,
            sample_path: None,
            color: None,
            attributes: BTreeMap::new(),
            unknown: UnknownAttributes::default(),
        }
    }

    pub(crate) fn apply(&mut self, id: EventId, value: EventValue) {
        match (id, value) {
            (EventId::LegacyChannelName | EventId::PluginName, EventValue::Text(name)) => {
                self.name = Some(name)
            }
            (EventId::PluginInternalName, EventValue::Text(plugin)) => self.plugin = Some(plugin),
            (EventId::SamplePath, EventValue::Text(path)) => self.sample_path = Some(path),
            (EventId::ChannelType, EventValue::Unsigned(kind)) => {
                self.kind = ChannelKind::from(kind as u8)
            }
            (EventId::ChannelColor, EventValue::Unsigned(color)) => self.color = Some(color),
            (id, value) => {
                self.attributes.insert(id, value);
            }
        }
    }

    /// The channel's index in the rack
    pub fn index(&self) -> u16 {
        self.index
    }
    /// Display name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// What the channel holds
    pub fn kind(&self) -> ChannelKind {
        self.kind
    }
    /// File name of the generator plugin
    pub fn plugin(&self) -> Option<&str> {
        self.plugin.as_deref()
    }
    /// Sample path, relative to the project
    pub fn sample_path(&self) -> Option<&str> {
        self.sample_path.as_deref()
    }
    /// Colour as `0x00BBGGRR`
    pub fn color(&self) -> Option<u32> {
        self.color
    }
    /// Whether the channel is switched on
    pub fn enabled(&self) -> Option<bool> {
        self.attribute(EventId::ChannelEnabled)?.as_flag()
    }
    /// The mixer insert the channel feeds; negative for none
    pub fn routed_to(&self) -> Option<i32> {
        self.attribute(EventId::RoutedTo)?.as_signed()
    }
    /// Any other channel parameter, by event
    pub fn attribute(&self, id: EventId) -> Option<&EventValue> {
        self.attributes.get(&id)
    }
    /// Every other channel parameter
    pub fn attributes(&self) -> &BTreeMap<EventId, EventValue> {
        &self.attributes
    }
    /// Unknown tags seen while this channel was in context
    pub fn unknown(&self) -> &UnknownAttributes {
        &self.unknown
    }
}

impl Entity for Channel {
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

#[test]
fn channel_attributes() {
    use pretty_assertions::assert_eq;
    let mut channel = Channel::new(3);
    channel.apply(EventId::PluginName, EventValue::Text("Kick".into()));
    channel.apply(EventId::ChannelType, EventValue::Unsigned(4));
    channel.apply(EventId::RoutedTo, EventValue::Signed(-1));
    channel.apply(EventId::ChannelEnabled, EventValue::Flag(true));

    assert_eq!(channel.name(), Some("Kick"));
    assert_eq!(channel.kind(), ChannelKind::Instrument);
    assert_eq!(channel.routed_to(), Some(-1));
    assert_eq!(channel.enabled(), Some(true));
    assert_eq!(channel.attributes().len(), 2);
}

#[test]
fn unnamed_channel_kinds() {
    use pretty_assertions::assert_eq;
    assert_eq!(ChannelKind::from(1), ChannelKind::Other(1));
    assert_eq!(u8::from(ChannelKind::Other(9)), 9);
    assert_eq!(u8::from(ChannelKind::Automation), 5);
}
