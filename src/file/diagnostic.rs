use super::builder::Context;
use crate::event::Target;
use thiserror::Error;

/// An attachment event that couldn't be given to any entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ContextError {
    /// No entity was in context yet
    #[error("{expected} event with no entity in context")]
    Orphaned {
        /// The entity the event belongs to
        expected: Target,
    },
    /// The entity in context is of another kind
    #[error("{expected} event while {found} is in context")]
    Mismatch {
        /// The entity the event belongs to
        expected: Target,
        /// The context at the time
        found: Context,
    },
}

/// What a [`Diagnostic`] is about
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DiagnosticKind {
    /// The record was discarded
    #[error(transparent)]
    Context(#[from] ContextError),
    /// The tag isn't in the event table; its payload was kept as an
    /// unknown attribute of the context entity
    #[error("unknown tag kept as an attribute of {0}")]
    UnknownAttribute(Context),
    /// A packed record list didn't divide into whole records
    #[error("{trailing} bytes left over after {records} records of {record_len} bytes")]
    Malformed {
        /// Size of one record
        record_len: usize,
        /// Whole records decoded
        records: usize,
        /// Bytes ignored
        trailing: usize,
    },
    /// A new entity's index is lower than the one created before it
    #[error("index {found} follows index {previous}")]
    IndexOrder {
        /// Index of the entity created before
        previous: u16,
        /// Index of the new entity
        found: u16,
    },
    /// More entities of one kind than a 16 bit index can number; the
    /// marker was dropped
    #[error("too many {0}s to number")]
    IndexOverflow(Target),
}

/// A non-fatal problem found while building a project
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("At position {offset}, tag {tag}: {kind}")]
pub struct Diagnostic {
    offset: usize,
    tag: u8,
    kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a diagnostic for the record at `offset`
    pub fn new(offset: usize, tag: u8, kind: impl Into<DiagnosticKind>) -> Self {
        Self {
            offset,
            tag,
            kind: kind.into(),
        }
    }
    /// Absolute offset of the record
    pub const fn offset(&self) -> usize {
        self.offset
    }
    /// The record's tag
    pub const fn tag(&self) -> u8 {
        self.tag
    }
    /// What went wrong
    pub const fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }
    /// True for records that were discarded for lack of context
    pub const fn is_context_error(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Context(_))
    }
    /// True for unknown tags
    pub const fn is_unknown_attribute(&self) -> bool {
        matches!(self.kind, DiagnosticKind::UnknownAttribute(_))
    }
}
