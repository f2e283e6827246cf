use crate::event::Target;
use core::fmt;

/// The entity that attachment events currently land on.
///
/// Indices are positions in the project's entity lists, not the indices
/// stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Context {
    /// Nothing has been started yet
    #[default]
    None,
    /// A channel
    Channel(usize),
    /// A pattern
    Pattern(usize),
    /// A playlist track
    PlaylistTrack(usize),
    /// A mixer slot
    MixerSlot(usize),
}

impl Context {
    /// True if an attachment event for `target` may be applied here.
    ///
    /// Project events don't need a context at all. Plugin events belong
    /// to whichever channel or mixer slot hosts the plugin.
    pub const fn accepts(&self, target: Target) -> bool {
        matches!(
            (self, target),
            (_, Target::Project)
                | (Self::Channel(_), Target::Channel | Target::Plugin)
                | (Self::Pattern(_), Target::Pattern)
                | (Self::PlaylistTrack(_), Target::Playlist)
                | (Self::MixerSlot(_), Target::Mixer | Target::Plugin)
        )
    }

    /// True before the first marker
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("the project"),
            Self::Channel(i) => write!(f, "channel #{i}"),
            Self::Pattern(i) => write!(f, "pattern #{i}"),
            Self::PlaylistTrack(i) => write!(f, "playlist track #{i}"),
            Self::MixerSlot(i) => write!(f, "mixer slot #{i}"),
        }
    }
}
