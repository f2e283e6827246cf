mod context;
pub use context::*;

use super::{
    ContextError, Diagnostic, DiagnosticKind, Effect, Entity, MixerSlot, PlaylistItem, Project,
};
use crate::{
    event::{EventId, EventInfo, EventRole, EventValue, Target, TypedEvent},
    file::Header,
};
use alloc::{collections::BTreeMap, vec::Vec};

/// A builder used to create a new [`Project`].
///
/// Feed it every [`TypedEvent`] of a file, in order, then call
/// [`ProjectBuilder::build`]. The builder never fails: records it cannot
/// place become [`Diagnostic`]s.
pub struct ProjectBuilder {
    project: Project,
    context: Context,
    channel_ids: BTreeMap<u16, usize>,
    pattern_ids: BTreeMap<u16, usize>,
    track_ids: BTreeMap<u16, usize>,
    pending_effect: Option<Effect>,
}

impl ProjectBuilder {
    /// Start an empty project
    pub fn new(header: Header) -> Self {
        Self {
            project: Project::new(header),
            context: Context::None,
            channel_ids: BTreeMap::new(),
            pattern_ids: BTreeMap::new(),
            track_ids: BTreeMap::new(),
            pending_effect: None,
        }
    }

    /// The entity attachment events currently land on
    pub fn context(&self) -> Context {
        self.context
    }

    /// Handles one event of a project file.
    pub fn handle_event(&mut self, event: TypedEvent) {
        let (offset, tag) = (event.offset(), event.tag());
        let Some(info) = event.info() else {
            self.keep_unknown(event);
            return;
        };
        let diagnostic = match info.role {
            EventRole::Marker => self.enter(info, event.into_value()),
            EventRole::Attribute => self.attach(info, event.into_value()),
        };
        if let Some(kind) = diagnostic {
            self.diagnose(offset, tag, kind);
        }
    }

    /// Finish the project.
    pub fn build(mut self) -> Project {
        self.flush_effect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            channels = self.project.channels.len(),
            patterns = self.project.patterns.len(),
            playlist_tracks = self.project.playlist.tracks.len(),
            mixer_slots = self.project.mixer.len(),
            diagnostics = self.project.diagnostics.len(),
            "project built"
        );

        self.project
    }

    fn enter(&mut self, info: &EventInfo, value: EventValue) -> Option<DiagnosticKind> {
        self.flush_effect();
        let index = value.as_unsigned().unwrap_or_default() as u16;
        let (context, diagnostic) = match info.target {
            Target::Channel => {
                let (at, diagnostic) =
                    enter(&mut self.project.channels, &mut self.channel_ids, index);
                (Context::Channel(at), diagnostic)
            }
            Target::Pattern => {
                let (at, diagnostic) =
                    enter(&mut self.project.patterns, &mut self.pattern_ids, index);
                (Context::Pattern(at), diagnostic)
            }
            Target::Playlist => {
                let (at, diagnostic) =
                    enter(&mut self.project.playlist.tracks, &mut self.track_ids, index);
                (Context::PlaylistTrack(at), diagnostic)
            }
            Target::Mixer => {
                let at = self.project.mixer.len();
                match u16::try_from(at) {
                    Ok(index) => {
                        let mut slot = MixerSlot::new(index);
                        if let EventValue::Blob(flags) = value {
                            slot.set_flags(flags);
                        }
                        self.project.mixer.push(slot);
                        (Context::MixerSlot(at), None)
                    }
                    Err(_) => (
                        Context::None,
                        Some(DiagnosticKind::IndexOverflow(Target::Mixer)),
                    ),
                }
            }
            Target::Project | Target::Plugin => (self.context, None),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(event = info.name, %context, "entering");

        self.context = context;
        diagnostic
    }

    fn attach(&mut self, info: &EventInfo, value: EventValue) -> Option<DiagnosticKind> {
        let expected = info.target;
        if expected == Target::Project {
            self.project.apply(info.id, value);
            return None;
        }
        if expected == Target::Playlist
            && !self.context.is_none()
            && !self.context.accepts(expected)
        {
            return self.attach_to_first_track(info.id, value);
        }
        if !self.context.accepts(expected) {
            let error = match self.context {
                Context::None => ContextError::Orphaned { expected },
                found => ContextError::Mismatch { expected, found },
            };
            return Some(error.into());
        }

        match self.context {
            Context::Channel(at) => {
                self.project.channels[at].apply(info.id, value);
                None
            }
            Context::Pattern(at) => self.project.patterns[at].apply(info.id, value),
            Context::PlaylistTrack(at) => {
                let record_len = PlaylistItem::record_len(self.project.version.as_ref());
                self.project.playlist.tracks[at].apply(info.id, value, record_len)
            }
            Context::MixerSlot(at) => {
                if info.id == EventId::SlotIndex {
                    let effect = self.pending_effect.take().unwrap_or_default();
                    let slot = value.as_unsigned().map(|slot| slot as u16);
                    self.project.mixer[at].push_effect(effect, slot);
                } else if expected == Target::Plugin {
                    self.pending_effect
                        .get_or_insert_with(Effect::default)
                        .apply(info.id, value);
                } else {
                    self.project.mixer[at].apply(info.id, value);
                }
                None
            }
            // `accepts` is false for every non-project target here
            Context::None => None,
        }
    }

    /// Projects saved before arrangements existed have no playlist marker.
    /// Their items go to track 0 and the context stays where it was.
    fn attach_to_first_track(&mut self, id: EventId, value: EventValue) -> Option<DiagnosticKind> {
        let (at, _) = enter(&mut self.project.playlist.tracks, &mut self.track_ids, 0);
        let record_len = PlaylistItem::record_len(self.project.version.as_ref());
        self.project.playlist.tracks[at].apply(id, value, record_len)
    }

    /// A plugin whose effect slot was never closed still belongs to its
    /// mixer slot.
    fn flush_effect(&mut self) {
        let Some(effect) = self.pending_effect.take() else {
            return;
        };
        if let Context::MixerSlot(at) = self.context {
            if !effect.is_empty() {
                self.project.mixer[at].push_effect(effect, None);
            }
        }
    }

    fn keep_unknown(&mut self, event: TypedEvent) {
        let (offset, tag) = (event.offset(), event.tag());
        let payload = match event.into_value() {
            EventValue::Blob(bytes) => bytes,
            _ => Vec::new(),
        };
        let unknown = match self.context {
            Context::None => &mut self.project.unknown,
            Context::Channel(at) => self.project.channels[at].unknown_mut(),
            Context::Pattern(at) => self.project.patterns[at].unknown_mut(),
            Context::PlaylistTrack(at) => self.project.playlist.tracks[at].unknown_mut(),
            Context::MixerSlot(at) => self.project.mixer[at].unknown_mut(),
        };
        unknown.push(tag, payload);
        self.diagnose(offset, tag, DiagnosticKind::UnknownAttribute(self.context));
    }

    fn diagnose(&mut self, offset: usize, tag: u8, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(offset, tag, kind);

        #[cfg(feature = "tracing")]
        tracing::warn!(%diagnostic);

        self.project.diagnostics.push(diagnostic);
    }
}

/// Find or create the entity with `index`, returning its position.
///
/// A new index lower than the last one created is kept but reported.
fn enter<T: Entity>(
    entities: &mut Vec<T>,
    ids: &mut BTreeMap<u16, usize>,
    index: u16,
) -> (usize, Option<DiagnosticKind>) {
    if let Some(&at) = ids.get(&index) {
        return (at, None);
    }
    let diagnostic = entities
        .last()
        .map(Entity::entity_index)
        .filter(|&previous| index < previous)
        .map(|previous| DiagnosticKind::IndexOrder {
            previous,
            found: index,
        });
    entities.push(T::with_index(index));
    ids.insert(index, entities.len() - 1);
    (entities.len() - 1, diagnostic)
}
