use super::{Entity, UnknownAttributes};
use crate::event::{EventId, EventValue};
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// A plugin in one of a mixer slot's effect slots
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Effect {
    slot: Option<u16>,
    name: Option<String>,
    plugin: Option<String>,
    attributes: BTreeMap<EventId, EventValue>,
}

impl Effect {
    pub(crate) fn apply(&mut self, id: EventId, value: EventValue) {
        match (id, value) {
            (EventId::PluginName, EventValue::Text(name)) => self.name = Some(name),
            (EventId::PluginInternalName, EventValue::Text(plugin)) => self.plugin = Some(plugin),
            (id, value) => {
                self.attributes.insert(id, value);
            }
        }
    }

    /// True if no event has touched this effect yet
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none() && self.plugin.is_none() && self.attributes.is_empty()
    }

    /// Effect slot number; missing when the slot was never closed
    pub fn slot(&self) -> Option<u16> {
        self.slot
    }
    /// Display name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// Plugin file name
    pub fn plugin(&self) -> Option<&str> {
        self.plugin.as_deref()
    }
    /// Plugin state blobs and any other effect attribute
    pub fn attribute(&self, id: EventId) -> Option<&EventValue> {
        self.attributes.get(&id)
    }
}

#[doc = r#"
A mixer slot (insert) and its effect chain.

Each [`EventId::InsertFlags`] marker starts the next slot; slots are
numbered by appearance.
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MixerSlot {
    index: u16,
    flags: Vec<u8>,
    name: Option<String>,
    color: Option<u32>,
    input: Option<i32>,
    output: Option<i32>,
    effects: Vec<Effect>,
    attributes: BTreeMap<EventId, EventValue>,
    unknown: UnknownAttributes,
}

impl MixerSlot {
    pub(crate) fn new(index: u16) -> Self {
        Self {
            index,
            flags: Vec::new(),
            name: None,
            color: None,
            input: None,
            output: None,
            effects: Vec::new(),
            attributes: BTreeMap::new(),
            unknown: UnknownAttributes::default(),
        }
    }

    pub(crate) fn set_flags(&mut self, flags: Vec<u8>) {
        self.flags = flags;
    }

    pub(crate) fn apply(&mut self, id: EventId, value: EventValue) {
        match (id, value) {
            (EventId::InsertName, EventValue::Text(name)) => self.name = Some(name),
            (EventId::InsertColor, EventValue::Unsigned(color)) => self.color = Some(color),
            (EventId::InsertInput, EventValue::Signed(input)) => self.input = Some(input),
            (EventId::InsertOutput, EventValue::Signed(output)) => self.output = Some(output),
            (id, value) => {
                self.attributes.insert(id, value);
            }
        }
    }

    pub(crate) fn push_effect(&mut self, mut effect: Effect, slot: Option<u16>) {
        effect.slot = slot;
        self.effects.push(effect);
    }

    /// The slot's position on the mixer
    pub fn index(&self) -> u16 {
        self.index
    }
    /// Raw slot flags
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }
    /// Slot name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// Colour as `0x00BBGGRR`
    pub fn color(&self) -> Option<u32> {
        self.color
    }
    /// Audio input; negative for none
    pub fn input(&self) -> Option<i32> {
        self.input
    }
    /// Audio output; negative for none
    pub fn output(&self) -> Option<i32> {
        self.output
    }
    /// Effects in file order
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }
    /// Any other attribute, by event
    pub fn attribute(&self, id: EventId) -> Option<&EventValue> {
        self.attributes.get(&id)
    }
    /// Unknown tags seen while this slot was in context
    pub fn unknown(&self) -> &UnknownAttributes {
        &self.unknown
    }
}

impl Entity for MixerSlot {
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
fn effect_chain_order() {
    use pretty_assertions::assert_eq;
    let mut slot = MixerSlot::new(1);
    let mut eq = Effect::default();
    eq.apply(EventId::PluginInternalName, EventValue::Text("Fruity parametric EQ 2".into()));
    slot.push_effect(eq, Some(0));
    let mut limiter = Effect::default();
    limiter.apply(EventId::PluginName, EventValue::Text("Limiter".into()));
    slot.push_effect(limiter, Some(3));

    let slots = slot.effects().iter().map(Effect::slot).collect::<Vec<_>>();
    assert_eq!(slots, [Some(0), Some(3)]);
    assert_eq!(slot.effects()[0].plugin(), Some("Fruity parametric EQ 2"));
    assert_eq!(slot.effects()[1].name(), Some("Limiter"));
}
