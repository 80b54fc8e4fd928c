//! Dashboard entities and their mock datasets
//!
//! Each page of the dashboard lists one of these. An entity pairs a typed
//! record with its [`EntitySchema`] and the fixed dataset the page starts
//! from.

/// Closed set of labelled values stored as text fields (status, role, ...)
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.label().to_lowercase() == wanted
                            || format!("{:?}", v).to_lowercase() == wanted
                    })
                    .ok_or_else(|| {
                        let options: Vec<&str> = Self::ALL.iter().map(|v| v.label()).collect();
                        format!("expected one of: {}", options.join(", "))
                    })
            }
        }

        impl From<$name> for $crate::record::FieldValue {
            fn from(value: $name) -> Self {
                $crate::record::FieldValue::Text(value.label().to_string())
            }
        }
    };
}

pub(crate) use labelled_enum;

pub mod cases;
pub mod clients;
pub mod finance;
pub mod staff;
pub mod tickets;

pub use cases::{CaseStatus, LegalCase, PracticeArea};
pub use clients::{Client, ClientKind};
pub use finance::{EntryKind, FinancialEntry, PaymentStatus};
pub use staff::{StaffMember, StaffRole};
pub use tickets::{SupportTicket, TicketPriority, TicketStatus};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ListError, Result};
use crate::record::{FieldValue, Record};
use crate::schema::EntitySchema;

/// A record type with a schema and a starting dataset
pub trait Entity: Record + Default + Serialize {
    fn schema() -> &'static EntitySchema;

    /// Fixed dataset the page is populated from
    fn fixtures() -> Vec<Self>;
}

// Field setters shared by the entity `set_field` implementations.

pub(crate) fn text(_field: &str, value: FieldValue) -> Result<String> {
    match value {
        FieldValue::Text(s) => Ok(s),
        FieldValue::Empty => Ok(String::new()),
        other => Ok(other.display()),
    }
}

pub(crate) fn optional_text(field: &str, value: FieldValue) -> Result<Option<String>> {
    text(field, value).map(|s| if s.is_empty() { None } else { Some(s) })
}

pub(crate) fn number(field: &str, value: FieldValue) -> Result<f64> {
    match value {
        FieldValue::Number(n) => Ok(n),
        FieldValue::Empty => Ok(0.0),
        other => Err(ListError::invalid_value(field, other.display(), "expected a number")),
    }
}

pub(crate) fn boolean(field: &str, value: FieldValue) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| ListError::invalid_value(field, value.display(), "expected sim/não"))
}

pub(crate) fn date(field: &str, value: FieldValue) -> Result<NaiveDate> {
    value
        .as_date()
        .ok_or_else(|| ListError::invalid_value(field, value.display(), "expected a date"))
}

pub(crate) fn label<E>(field: &str, value: FieldValue) -> Result<E>
where
    E: std::str::FromStr<Err = String>,
{
    let raw = text(field, value)?;
    raw.parse()
        .map_err(|reason| ListError::invalid_value(field, raw, reason))
}

/// Fixture date helper; a malformed literal falls back to the epoch
pub(crate) fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn check_entity<E: Entity>() {
        let schema = E::schema();
        let fixtures = E::fixtures();
        assert!(!fixtures.is_empty(), "{} has no fixtures", schema.name);

        let ids: HashSet<_> = fixtures.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), fixtures.len(), "{} fixture ids collide", schema.name);

        for field in schema
            .searchable
            .iter()
            .chain(schema.filterable)
            .chain(schema.sortable)
        {
            assert!(
                schema.field_kind(field).is_some(),
                "{}.{} is not a declared column",
                schema.name,
                field
            );
            assert!(
                fixtures[0].field(field).is_some(),
                "{}.{} is not readable",
                schema.name,
                field
            );
        }

        // every declared column can be written back with its own value
        let mut copy = fixtures[0].clone();
        for (name, _) in schema.fields {
            let value = fixtures[0].field(name).unwrap_or(FieldValue::Empty);
            copy.set_field(name, value).unwrap();
        }
        assert!(copy.set_field("no_such_field", FieldValue::Empty).is_err());
    }

    #[test]
    fn all_entities_are_consistent() {
        check_entity::<LegalCase>();
        check_entity::<Client>();
        check_entity::<StaffMember>();
        check_entity::<FinancialEntry>();
        check_entity::<SupportTicket>();
    }

    #[test]
    fn labels_parse_by_label_or_variant() {
        assert_eq!("Em andamento".parse::<TicketStatus>(), Ok(TicketStatus::EmAndamento));
        assert_eq!("emandamento".parse::<TicketStatus>(), Ok(TicketStatus::EmAndamento));
        assert!("nope".parse::<TicketStatus>().is_err());
    }
}
