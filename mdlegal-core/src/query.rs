//! View parameters: free-text search, categorical filters and sort state
//!
//! Applying a query never touches the collection; it returns references
//! into it in display order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{FieldValue, Record};
use crate::schema::EntitySchema;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// Selected sort field and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

/// Search term, filters and sort selection for one list view
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewQuery {
    pub search: String,
    /// Active categorical filters; a field absent here matches everything
    pub filters: BTreeMap<String, FieldValue>,
    pub sort: Option<SortState>,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header click: same field toggles direction, new field sorts ascending
    pub fn click_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.field == field => Some(SortState {
                direction: current.direction.toggled(),
                field: current.field,
            }),
            _ => Some(SortState {
                field: field.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// Whether a record passes the search term and every active filter
    pub fn matches<R: Record>(&self, schema: &EntitySchema, record: &R) -> bool {
        let term = self.search.trim().to_lowercase();
        let search_ok = term.is_empty()
            || schema.searchable.iter().any(|field| {
                record
                    .field(field)
                    .map(|value| !value.is_empty() && value.contains_term(&term))
                    .unwrap_or(false)
            });

        search_ok
            && self.filters.iter().all(|(field, wanted)| {
                record.field(field).unwrap_or(FieldValue::Empty) == *wanted
            })
    }

    /// Filter then stable-sort, preserving collection order among ties
    pub fn apply<'a, R: Record>(&self, schema: &EntitySchema, records: &'a [R]) -> Vec<&'a R> {
        let mut rows: Vec<&R> = records
            .iter()
            .filter(|record| self.matches(schema, *record))
            .collect();

        if let Some(sort) = &self.sort {
            rows.sort_by(|a, b| {
                let ord = compare_by(&sort.field, *a, *b);
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        rows
    }

    /// Number of records passing the filter step
    pub fn count<R: Record>(&self, schema: &EntitySchema, records: &[R]) -> usize {
        records
            .iter()
            .filter(|record| self.matches(schema, *record))
            .count()
    }

    pub fn has_filters(&self) -> bool {
        !self.search.trim().is_empty() || !self.filters.is_empty()
    }
}

/// Compare two records by a field (ascending), treating absent as empty
pub fn compare_by<R: Record>(field: &str, a: &R, b: &R) -> Ordering {
    a.field(field)
        .unwrap_or(FieldValue::Empty)
        .compare(&b.field(field).unwrap_or(FieldValue::Empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DynamicRecord, FieldKind};

    const PEOPLE: EntitySchema = EntitySchema {
        name: "people",
        title: "Pessoas",
        fields: &[("name", FieldKind::Text), ("team", FieldKind::Text)],
        searchable: &["name"],
        filterable: &["team"],
        sortable: &["name", "team"],
        page_size: 10,
    };

    fn people() -> Vec<DynamicRecord> {
        vec![
            DynamicRecord::new(1).with("name", "João").with("team", "b"),
            DynamicRecord::new(2).with("name", "Ana").with("team", "a"),
            DynamicRecord::new(3).with("name", "Mariana").with("team", "a"),
        ]
    }

    fn ids(rows: &[&DynamicRecord]) -> Vec<u64> {
        rows.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = people();
        let mut query = ViewQuery::new();
        query.search = "AN".to_string();
        assert_eq!(ids(&query.apply(&PEOPLE, &records)), vec![2, 3]);
    }

    #[test]
    fn filters_combine_with_search() {
        let records = people();
        let mut query = ViewQuery::new();
        query.filters.insert("team".into(), FieldValue::from("a"));
        assert_eq!(ids(&query.apply(&PEOPLE, &records)), vec![2, 3]);

        query.search = "mari".into();
        assert_eq!(ids(&query.apply(&PEOPLE, &records)), vec![3]);
    }

    #[test]
    fn click_sort_toggles_then_resets() {
        let mut query = ViewQuery::new();
        query.click_sort("name");
        assert_eq!(query.sort.as_ref().unwrap().direction, SortDirection::Ascending);
        query.click_sort("name");
        assert_eq!(query.sort.as_ref().unwrap().direction, SortDirection::Descending);
        query.click_sort("team");
        let sort = query.sort.as_ref().unwrap();
        assert_eq!(sort.field, "team");
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn descending_sort_keeps_ties_in_collection_order() {
        let records = people();
        let mut query = ViewQuery::new();
        query.click_sort("team");
        assert_eq!(ids(&query.apply(&PEOPLE, &records)), vec![2, 3, 1]);
        query.click_sort("team");
        assert_eq!(ids(&query.apply(&PEOPLE, &records)), vec![1, 2, 3]);
    }

    #[test]
    fn apply_leaves_collection_untouched() {
        let records = people();
        let before = records.clone();
        let mut query = ViewQuery::new();
        query.click_sort("name");
        let _ = query.apply(&PEOPLE, &records);
        assert_eq!(records, before);
    }
}
