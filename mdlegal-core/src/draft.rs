//! In-progress form state
//!
//! A modal form either is closed, creating a new record, or editing a copy
//! of an existing one. The copy is independent of the collection until the
//! draft is committed.

use crate::record::{Record, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub enum Draft<R> {
    /// No form open
    Closed,
    /// New-record form; the identifier is assigned on commit
    Creating(R),
    /// Edit form over a copy of the record with `id`
    Editing { id: RecordId, record: R },
}

impl<R> Default for Draft<R> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<R: Record> Draft<R> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Record being edited, if a form is open
    pub fn record(&self) -> Option<&R> {
        match self {
            Self::Closed => None,
            Self::Creating(record) | Self::Editing { record, .. } => Some(record),
        }
    }

    pub fn record_mut(&mut self) -> Option<&mut R> {
        match self {
            Self::Closed => None,
            Self::Creating(record) | Self::Editing { record, .. } => Some(record),
        }
    }

    /// Identifier of the record under edit (`None` when creating or closed)
    pub fn editing_id(&self) -> Option<RecordId> {
        match self {
            Self::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Close the form, returning what it held
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::Closed)
    }
}
