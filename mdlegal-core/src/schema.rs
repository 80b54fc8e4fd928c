//! Per-entity list configuration
//!
//! Declares which fields are shown, searched, filtered and sortable.

use crate::error::{ListError, Result};
use crate::record::FieldKind;

/// Default items per page when the entity does not pick one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Static description of an entity as seen by a list
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Machine name (e.g. `clients`)
    pub name: &'static str,
    /// Page title shown to users
    pub title: &'static str,
    /// Display columns in order, with their kinds
    pub fields: &'static [(&'static str, FieldKind)],
    /// Fields matched by the free-text search
    pub searchable: &'static [&'static str],
    /// Categorical filter fields
    pub filterable: &'static [&'static str],
    /// Fields the user may sort by
    pub sortable: &'static [&'static str],
    pub page_size: usize,
}

impl EntitySchema {
    /// Kind of a declared field
    pub fn field_kind(&self, field: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
    }

    /// Column names in display order
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn is_searchable(&self, field: &str) -> bool {
        self.searchable.contains(&field)
    }

    pub fn is_filterable(&self, field: &str) -> bool {
        self.filterable.contains(&field)
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.sortable.contains(&field)
    }

    /// Check that a field may be used as a categorical filter
    pub fn require_filterable(&self, field: &str) -> Result<()> {
        if self.is_filterable(field) {
            Ok(())
        } else {
            Err(ListError::unknown_field(self.name, field))
        }
    }

    /// Check that a field may be used for sorting
    pub fn require_sortable(&self, field: &str) -> Result<()> {
        if self.is_sortable(field) {
            Ok(())
        } else {
            Err(ListError::unknown_field(self.name, field))
        }
    }

    /// Look up a declared field's kind, failing for undeclared fields
    pub fn require_field(&self, field: &str) -> Result<FieldKind> {
        self.field_kind(field)
            .ok_or_else(|| ListError::unknown_field(self.name, field))
    }
}
