//! Entity selection and field input shared by the commands

use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;

use mdlegal_core::{EntitySchema, FieldValue, ListManager, Record};

/// Dashboard page to operate on
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Processos
    Cases,
    /// Clientes
    Clients,
    /// Equipe
    Staff,
    /// Financeiro
    Finance,
    /// Suporte
    Tickets,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Cases,
        EntityKind::Clients,
        EntityKind::Staff,
        EntityKind::Finance,
        EntityKind::Tickets,
    ];
}

/// Run `$body` with `$ty` bound to the record type of `$kind`
#[macro_export]
macro_rules! with_entity {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            $crate::entity::EntityKind::Cases => {
                type $ty = ::mdlegal_core::entities::LegalCase;
                $body
            }
            $crate::entity::EntityKind::Clients => {
                type $ty = ::mdlegal_core::entities::Client;
                $body
            }
            $crate::entity::EntityKind::Staff => {
                type $ty = ::mdlegal_core::entities::StaffMember;
                $body
            }
            $crate::entity::EntityKind::Finance => {
                type $ty = ::mdlegal_core::entities::FinancialEntry;
                $body
            }
            $crate::entity::EntityKind::Tickets => {
                type $ty = ::mdlegal_core::entities::SupportTicket;
                $body
            }
        }
    };
}

/// Parse a raw value for a declared field of the schema
pub fn parse_value(schema: &EntitySchema, field: &str, raw: &str) -> Result<FieldValue> {
    let kind = schema.require_field(field)?;
    Ok(FieldValue::parse(field, kind, raw)?)
}

/// Parse `field=value` into a typed field value
pub fn parse_assignment(schema: &EntitySchema, input: &str) -> Result<(String, FieldValue)> {
    let (field, raw) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("expected field=value, got '{}'", input))?;
    let field = field.trim();
    if field.is_empty() {
        bail!("missing field name in '{}'", input);
    }
    let value = parse_value(schema, field, raw)?;
    Ok((field.to_string(), value))
}

/// Resolve raw filter input against the values present in the list.
///
/// Matching is case-insensitive on the display text, so `ativo` selects
/// `Ativo` and `sim` selects `true`. Values not present fall back to a typed
/// parse (and will simply match nothing).
pub fn resolve_filter<R: Record>(
    list: &ListManager<R>,
    field: &str,
    raw: &str,
) -> Result<FieldValue> {
    let options = list.filter_options(field)?;
    let wanted = raw.trim().to_lowercase();
    match options
        .into_iter()
        .find(|value| value.display().to_lowercase() == wanted)
    {
        Some(value) => Ok(value),
        None => parse_value(list.schema(), field, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdlegal_core::entities::finance;

    #[test]
    fn parses_typed_assignment() {
        let (field, value) = parse_assignment(&finance::SCHEMA, "amount=1.350,75").unwrap();
        assert_eq!(field, "amount");
        assert_eq!(value, FieldValue::Number(1350.75));

        let (_, value) = parse_assignment(&finance::SCHEMA, "due_on=05/06/2024").unwrap();
        assert_eq!(value.display(), "05/06/2024");
    }

    #[test]
    fn rejects_unknown_fields_and_missing_equals() {
        assert!(parse_assignment(&finance::SCHEMA, "color=red").is_err());
        assert!(parse_assignment(&finance::SCHEMA, "amount").is_err());
        assert!(parse_assignment(&finance::SCHEMA, "=1").is_err());
    }

    #[test]
    fn filter_input_matches_existing_labels() {
        use mdlegal_core::entities::{clients, Client};
        use mdlegal_core::Entity;

        let list = ListManager::with_records(clients::SCHEMA, Client::fixtures());
        assert_eq!(resolve_filter(&list, "active", "sim").unwrap(), FieldValue::Bool(true));
        assert_eq!(
            resolve_filter(&list, "kind", "pessoa jurídica").unwrap(),
            FieldValue::from("Pessoa Jurídica")
        );
        assert!(resolve_filter(&list, "name", "Ana").is_err());
    }

    #[test]
    fn dispatches_to_record_type() {
        use mdlegal_core::Entity;
        for kind in EntityKind::ALL {
            let name = crate::with_entity!(kind, E => E::schema().name);
            assert!(!name.is_empty());
        }
        let title = crate::with_entity!(EntityKind::Staff, E => E::schema().title);
        assert_eq!(title, "Equipe");
    }
}
