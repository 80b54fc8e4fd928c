//! Records and primitive field values
//!
//! A record is a mapping from field name to a primitive value plus one
//! stable identifier. Domain entities implement [`Record`] with typed
//! fields; [`DynamicRecord`] covers schema-less collections.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ListError, Result};
use crate::format::{format_bool, format_date, format_number, parse_bool, parse_date};

/// Stable record identifier, assigned once at creation
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(RecordId)
    }
}

/// Kind of a field, used to parse raw form input and pick a display format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    /// Number displayed as currency
    Money,
    Bool,
    Date,
}

/// A primitive field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Empty,
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    /// Rank used when comparing values of different kinds
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Date(_) => 3,
            Self::Text(_) => 4,
        }
    }

    /// Total order over values.
    ///
    /// Text compares case-insensitively with a byte-wise tiebreak, numbers
    /// use `f64::total_cmp`, `Empty` sorts first and mixed kinds order by kind.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Empty, Self::Empty) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// pt-BR display text, also the text searched by the free-text filter
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(b) => format_bool(*b).to_string(),
            Self::Number(n) => format_number(*n),
            Self::Date(d) => format_date(*d),
            Self::Text(s) => s.clone(),
        }
    }

    /// Whether the lower-cased display text contains an already lower-cased term
    pub fn contains_term(&self, term_lower: &str) -> bool {
        match self {
            Self::Empty => term_lower.is_empty(),
            Self::Text(s) => s.to_lowercase().contains(term_lower),
            other => other.display().to_lowercase().contains(term_lower),
        }
    }

    /// Parse raw form input for a field of the given kind
    pub fn parse(field: &str, kind: FieldKind, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::Empty);
        }

        match kind {
            FieldKind::Text => Ok(Self::Text(trimmed.to_string())),
            FieldKind::Number | FieldKind::Money => parse_number(trimmed)
                .map(Self::Number)
                .ok_or_else(|| ListError::invalid_value(field, raw, "expected a number")),
            FieldKind::Bool => parse_bool(trimmed)
                .map(Self::Bool)
                .ok_or_else(|| ListError::invalid_value(field, raw, "expected sim/não")),
            FieldKind::Date => parse_date(trimmed).map(Self::Date).ok_or_else(|| {
                ListError::invalid_value(field, raw, "expected yyyy-mm-dd or dd/mm/yyyy")
            }),
        }
    }

    /// Infer a kind from raw input (booleans, numbers, dates, then text)
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else if let Ok(b) = trimmed.parse::<bool>() {
            Self::Bool(b)
        } else if let Ok(n) = trimmed.parse::<f64>() {
            Self::Number(n)
        } else if let Some(d) = parse_date(trimmed) {
            Self::Date(d)
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Accepts `1234.5`, `1.234,50`, `1234,5` and `12.500` (dots as thousands
/// separators when every group after the first has three digits)
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim();
    let (sign, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest.trim_start()),
        None => ("", cleaned),
    };
    let digits = rest.trim_start_matches("R$").trim();

    let normalized = if digits.contains(',') {
        digits.replace('.', "").replace(',', ".")
    } else if is_thousands_grouped(digits) {
        digits.replace('.', "")
    } else {
        digits.to_string()
    };
    format!("{}{}", sign, normalized).parse().ok()
}

/// `5.000`, `1.250.000`: one to three leading digits, then `.ddd` groups
fn is_thousands_grouped(digits: &str) -> bool {
    let mut groups = digits.split('.');
    let Some(head) = groups.next() else {
        return false;
    };
    let mut tail = groups.peekable();
    tail.peek().is_some()
        && (1..=3).contains(&head.len())
        && head.bytes().all(|b| b.is_ascii_digit())
        && tail.all(|group| group.len() == 3 && group.bytes().all(|b| b.is_ascii_digit()))
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Empty)
    }
}

/// A record managed by a list: identifier plus named primitive fields
pub trait Record: Clone + Send + Sync + 'static {
    /// Stable identifier
    fn id(&self) -> RecordId;

    /// Overwrite the identifier (used only when the collection assigns one)
    fn set_id(&mut self, id: RecordId);

    /// Read a field by name; `None` when the record has no such field
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Write a field by name from an already parsed value
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()>;
}

/// Schema-less record backed by an ordered map
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DynamicRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl DynamicRecord {
    pub fn new(id: u64) -> Self {
        Self {
            id: RecordId(id),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

impl Record for DynamicRecord {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        if name == "id" {
            return Some(FieldValue::Number(self.id.0 as f64));
        }
        self.fields.get(name).cloned()
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        if name == "id" {
            return Err(ListError::invalid_value(
                name,
                value.display(),
                "identifier is assigned by the collection",
            ));
        }
        self.fields.insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_compares_case_insensitively() {
        let a = FieldValue::from("ana");
        let b = FieldValue::from("João");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(
            FieldValue::from("Ana").compare(&FieldValue::from("ana")),
            Ordering::Less
        );
    }

    #[test]
    fn empty_sorts_first() {
        assert_eq!(
            FieldValue::Empty.compare(&FieldValue::Number(-1.0)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::from("x").compare(&FieldValue::Empty),
            Ordering::Greater
        );
    }

    #[test]
    fn search_matches_display_text() {
        let date = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert!(date.contains_term("31/01"));
        assert!(FieldValue::Bool(true).contains_term("sim"));
        assert!(FieldValue::from("Ana Souza").contains_term("souza"));
    }

    #[test]
    fn parses_by_kind() {
        assert_eq!(
            FieldValue::parse("value", FieldKind::Money, "1.234,50").unwrap(),
            FieldValue::Number(1234.5)
        );
        assert_eq!(
            FieldValue::parse("active", FieldKind::Bool, "sim").unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            FieldValue::parse("number", FieldKind::Text, " 0001 ").unwrap(),
            FieldValue::from("0001")
        );
        assert!(FieldValue::parse("opened_on", FieldKind::Date, "soon").is_err());
        assert!(FieldValue::parse("x", FieldKind::Number, "").unwrap().is_empty());
    }

    #[test]
    fn money_dots_are_thousands_separators() {
        let money = |raw: &str| FieldValue::parse("salary", FieldKind::Money, raw).unwrap();
        assert_eq!(money("5.000"), FieldValue::Number(5000.0));
        assert_eq!(money("R$ 12.500"), FieldValue::Number(12500.0));
        assert_eq!(money("R$ 1.250.000"), FieldValue::Number(1_250_000.0));
        assert_eq!(money("-R$ 10,00"), FieldValue::Number(-10.0));
        assert_eq!(money("1234.5"), FieldValue::Number(1234.5));
        assert_eq!(money("12.50"), FieldValue::Number(12.5));
        assert_eq!(money("1500"), FieldValue::Number(1500.0));
    }

    #[test]
    fn infers_kinds() {
        assert_eq!(FieldValue::infer("true"), FieldValue::Bool(true));
        assert_eq!(FieldValue::infer("42"), FieldValue::Number(42.0));
        assert!(matches!(FieldValue::infer("2024-02-01"), FieldValue::Date(_)));
        assert_eq!(FieldValue::infer("Ana"), FieldValue::from("Ana"));
    }

    #[test]
    fn dynamic_record_refuses_id_writes() {
        let mut rec = DynamicRecord::new(1).with("name", "Ana");
        assert!(rec.set_field("id", FieldValue::Number(9.0)).is_err());
        assert_eq!(rec.field("name"), Some(FieldValue::from("Ana")));
        assert_eq!(rec.field("id"), Some(FieldValue::Number(1.0)));
    }

    #[test]
    fn record_id_parses_with_hash() {
        assert_eq!("#12".parse::<RecordId>().unwrap(), RecordId(12));
    }
}
