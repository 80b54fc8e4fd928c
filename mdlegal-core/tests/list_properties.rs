use std::collections::HashSet;

use mdlegal_core::{
    DynamicRecord, EntitySchema, FieldKind, FieldValue, ListManager, Record, RecordId,
};
use proptest::prelude::*;

const MATTERS: EntitySchema = EntitySchema {
    name: "matters",
    title: "Processos",
    fields: &[("title", FieldKind::Text), ("status", FieldKind::Text)],
    searchable: &["title"],
    filterable: &["status"],
    sortable: &["title"],
    page_size: 5,
};

const STATUSES: [&str; 3] = ["Ativo", "Arquivado", "Suspenso"];

fn matter(id: u64, title: &str, status: &str) -> DynamicRecord {
    DynamicRecord::new(id)
        .with("title", title)
        .with("status", status)
}

// Records with unique ids 1..=n, short titles and a status from STATUSES
fn arb_records() -> impl Strategy<Value = Vec<DynamicRecord>> {
    prop::collection::vec(("[a-zA-Z ]{0,8}", 0..STATUSES.len()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (title, status))| matter(i as u64 + 1, &title, STATUSES[status]))
            .collect()
    })
}

fn title_of(record: &DynamicRecord) -> String {
    record.field("title").map(|v| v.display()).unwrap_or_default()
}

proptest! {
    /// Property: every visible row contains the search term, and every
    /// record containing it is counted
    #[test]
    fn prop_search_is_exact(records in arb_records(), term in "[a-z]{1,2}") {
        let mut list = ListManager::with_records(MATTERS, records.clone());
        list.set_search(term.clone());

        let expected = records
            .iter()
            .filter(|r| title_of(r).to_lowercase().contains(&term))
            .count();
        prop_assert_eq!(list.filtered_count(), expected);

        for record in list.visible() {
            prop_assert!(title_of(record).to_lowercase().contains(&term));
        }
    }

    /// Property: filtered rows carry exactly the selected status
    #[test]
    fn prop_filter_is_exact(records in arb_records(), status in 0..STATUSES.len()) {
        let mut list = ListManager::with_records(MATTERS, records.clone()).with_page_size(100);
        list.set_filter("status", STATUSES[status]).unwrap();

        let expected: Vec<RecordId> = records
            .iter()
            .filter(|r| r.field("status") == Some(FieldValue::from(STATUSES[status])))
            .map(|r| r.id())
            .collect();
        let shown: Vec<RecordId> = list.visible().iter().map(|r| r.id()).collect();
        prop_assert_eq!(shown, expected);
    }

    /// Property: sorted output is ordered and descending is the stable reverse
    #[test]
    fn prop_sort_orders_rows(records in arb_records()) {
        let mut list = ListManager::with_records(MATTERS, records).with_page_size(100);
        list.click_sort("title").unwrap();
        let ascending: Vec<DynamicRecord> = list.view().items;
        for pair in ascending.windows(2) {
            let a = pair[0].field("title").unwrap();
            let b = pair[1].field("title").unwrap();
            prop_assert_ne!(a.compare(&b), std::cmp::Ordering::Greater);
        }

        list.click_sort("title").unwrap();
        let descending: Vec<DynamicRecord> = list.view().items;
        prop_assert_eq!(descending.len(), ascending.len());
        for pair in descending.windows(2) {
            let a = pair[0].field("title").unwrap();
            let b = pair[1].field("title").unwrap();
            prop_assert_ne!(a.compare(&b), std::cmp::Ordering::Less);
        }
    }

    /// Property: pages partition the filtered rows
    #[test]
    fn prop_pages_partition_rows(records in arb_records(), page_size in 1usize..8) {
        let mut list =
            ListManager::with_records(MATTERS, records.clone()).with_page_size(page_size);
        let total = list.filtered_count();
        let pages = list.total_pages();
        prop_assert_eq!(pages, std::cmp::max(1, total.div_ceil(page_size)));

        let mut seen = Vec::new();
        loop {
            let page = list.view();
            prop_assert!(page.items.len() <= page_size);
            prop_assert!(list.page() >= 1 && list.page() <= pages);
            seen.extend(page.items.iter().map(|r| r.id()));
            if !list.next_page() {
                break;
            }
        }
        let all: Vec<RecordId> = records.iter().map(|r| r.id()).collect();
        prop_assert_eq!(seen, all);
    }

    /// Property: create → update → delete leaves the collection as it was
    #[test]
    fn prop_create_update_delete_restores(records in arb_records(), title in "[a-z]{1,6}") {
        let mut list = ListManager::with_records(MATTERS, records.clone());
        let created = list.create(matter(0, "novo", "Ativo")).unwrap();
        prop_assert!(records.iter().all(|r| r.id() != created.id()));

        let updated = list.update(created.id(), matter(0, &title, "Suspenso")).unwrap();
        prop_assert_eq!(updated.id(), created.id());
        prop_assert_eq!(list.get(created.id()).map(title_of), Some(title));

        list.delete(created.id()).unwrap();
        prop_assert_eq!(list.records(), records.as_slice());
    }

    /// Property: identifiers stay unique across creates and deletes
    #[test]
    fn prop_ids_stay_unique(
        records in arb_records(),
        ops in prop::collection::vec(any::<bool>(), 1..30),
    ) {
        let mut list = ListManager::with_records(MATTERS, records);
        let mut issued = HashSet::new();

        for create in ops {
            if create || list.records().is_empty() {
                let record = list.create(matter(0, "x", "Ativo")).unwrap();
                prop_assert!(issued.insert(record.id()), "id {} reused", record.id());
            } else {
                let id = list.records()[0].id();
                list.delete(id).unwrap();
            }

            let ids: HashSet<RecordId> = list.records().iter().map(|r| r.id()).collect();
            prop_assert_eq!(ids.len(), list.records().len());
        }
    }
}

#[test]
fn missing_ids_leave_collection_untouched() {
    let records = vec![matter(1, "a", "Ativo"), matter(2, "b", "Arquivado")];
    let mut list = ListManager::with_records(MATTERS, records.clone());

    assert!(list.update(RecordId(9), matter(0, "z", "Ativo")).is_err());
    assert!(list.delete(RecordId(9)).is_err());
    assert_eq!(list.records(), records.as_slice());
}
