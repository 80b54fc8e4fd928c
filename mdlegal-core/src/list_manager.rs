//! Generic list manager
//!
//! Owns one page's collection and view parameters, derives the visible page
//! (filter → sort → paginate) and applies create/update/delete. Every page of
//! the dashboard is one `ListManager` configured with its entity schema.
//!
//! Page policy:
//! - search and filter changes go back to page 1
//! - sort changes, creates and deletes keep the current page, clamped to the
//!   new page count

use tracing::{debug, info, warn};

use crate::draft::Draft;
use crate::error::{ListError, Result};
use crate::ids::IdAllocator;
use crate::loader::{LoadOutcome, LoadState};
use crate::pagination::{Page, Pagination};
use crate::query::{SortState, ViewQuery};
use crate::record::{FieldValue, Record, RecordId};
use crate::schema::EntitySchema;

/// Collection plus view state for one list page
#[derive(Debug, Clone)]
pub struct ListManager<R> {
    schema: EntitySchema,
    records: Vec<R>,
    query: ViewQuery,
    pagination: Pagination,
    ids: IdAllocator,
    state: LoadState,
    draft: Draft<R>,
}

impl<R: Record> ListManager<R> {
    /// Empty, idle list using the schema's page size
    pub fn new(schema: EntitySchema) -> Self {
        Self {
            pagination: Pagination::new(1, schema.page_size),
            schema,
            records: Vec::new(),
            query: ViewQuery::new(),
            ids: IdAllocator::new(),
            state: LoadState::Idle,
            draft: Draft::Closed,
        }
    }

    /// Already loaded list over a fixed collection
    pub fn with_records(schema: EntitySchema, records: Vec<R>) -> Self {
        let mut manager = Self::new(schema);
        manager.begin_loading();
        manager.finish_loading(records);
        manager
    }

    /// Override the page size (clamped to 1..=100)
    pub fn with_page_size(mut self, per_page: usize) -> Self {
        self.pagination = Pagination::new(1, per_page);
        self
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Full collection in insertion order
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.query.sort.as_ref()
    }

    // --- loading -------------------------------------------------------

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Placeholder rows to render while loading
    pub fn skeleton_rows(&self) -> usize {
        if self.is_loading() {
            self.pagination.per_page
        } else {
            0
        }
    }

    /// Enter `Loading` (initial mount, retry after failure, or refresh)
    pub fn begin_loading(&mut self) {
        info!(entity = self.schema.name, from = ?self.state, "loading");
        self.state = LoadState::Loading;
    }

    /// Replace the collection with loaded records and enter `Loaded`.
    ///
    /// Records with an identifier already seen in the batch are dropped so
    /// identifiers stay unique.
    pub fn finish_loading(&mut self, records: Vec<R>) {
        let mut ids = IdAllocator::new();
        let mut unique: Vec<R> = Vec::with_capacity(records.len());
        for record in records {
            if unique.iter().any(|r| r.id() == record.id()) {
                warn!(entity = self.schema.name, id = %record.id(), "duplicate id dropped");
                continue;
            }
            ids.observe(record.id());
            unique.push(record);
        }

        // Never hand out an id this list already used before a refresh
        ids.observe(RecordId(self.ids.peek().0.saturating_sub(1)));

        info!(entity = self.schema.name, count = unique.len(), "loaded");
        self.records = unique;
        self.ids = ids;
        self.state = LoadState::Loaded;
        self.clamp_page();
    }

    /// Enter `Failed`; the collection is left as it was
    pub fn fail_loading(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(entity = self.schema.name, %reason, "load failed");
        self.state = LoadState::Failed(reason);
    }

    /// Apply a finished load task
    pub fn apply_outcome(&mut self, outcome: LoadOutcome<R>) {
        match outcome {
            LoadOutcome::Loaded(records) => self.finish_loading(records),
            LoadOutcome::Failed(reason) => self.fail_loading(reason),
            LoadOutcome::Cancelled => {
                if self.is_loading() {
                    self.state = if self.records.is_empty() {
                        LoadState::Idle
                    } else {
                        LoadState::Loaded
                    };
                }
            }
        }
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.state.is_loaded() {
            Ok(())
        } else {
            Err(ListError::NotLoaded)
        }
    }

    // --- view parameters -----------------------------------------------

    /// Change the free-text search and go back to page 1
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.pagination.page = 1;
    }

    /// Select a categorical filter value and go back to page 1
    pub fn set_filter(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.schema.require_filterable(field)?;
        self.query.filters.insert(field.to_string(), value.into());
        self.pagination.page = 1;
        Ok(())
    }

    /// Distinct values of a filterable field across the collection, in sort order
    pub fn filter_options(&self, field: &str) -> Result<Vec<FieldValue>> {
        self.schema.require_filterable(field)?;
        let mut options: Vec<FieldValue> = Vec::new();
        for record in &self.records {
            let value = record.field(field).unwrap_or(FieldValue::Empty);
            if !options.contains(&value) {
                options.push(value);
            }
        }
        options.sort_by(|a, b| a.compare(b));
        Ok(options)
    }

    /// Reset one filter to "match all"
    pub fn clear_filter(&mut self, field: &str) {
        if self.query.filters.remove(field).is_some() {
            self.pagination.page = 1;
        }
    }

    /// Reset search and all filters
    pub fn clear_filters(&mut self) {
        self.query.search.clear();
        self.query.filters.clear();
        self.pagination.page = 1;
    }

    /// Column header click
    pub fn click_sort(&mut self, field: &str) -> Result<()> {
        self.schema.require_sortable(field)?;
        self.query.click_sort(field);
        debug!(entity = self.schema.name, sort = ?self.query.sort, "sort changed");
        Ok(())
    }

    // --- pagination ----------------------------------------------------

    pub fn page(&self) -> usize {
        self.pagination.page
    }

    pub fn page_size(&self) -> usize {
        self.pagination.per_page
    }

    pub fn filtered_count(&self) -> usize {
        self.query.count(&self.schema, &self.records)
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered_count())
    }

    pub fn has_prev(&self) -> bool {
        self.pagination.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.pagination.page < self.total_pages()
    }

    /// Advance one page; refused on the last page
    pub fn next_page(&mut self) -> bool {
        if self.has_next() {
            self.pagination.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; refused on the first page
    pub fn prev_page(&mut self) -> bool {
        if self.has_prev() {
            self.pagination.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`; refused outside `1..=total_pages`
    pub fn goto_page(&mut self, page: usize) -> bool {
        if (1..=self.total_pages()).contains(&page) {
            self.pagination.page = page;
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) {
        self.pagination.page = 1;
    }

    pub fn last_page(&mut self) {
        self.pagination.page = self.total_pages();
    }

    fn clamp_page(&mut self) {
        self.pagination = self.pagination.clamped(self.filtered_count());
    }

    // --- derived view --------------------------------------------------

    /// Records visible on the current page, in display order
    pub fn visible(&self) -> Vec<&R> {
        let rows = self.query.apply(&self.schema, &self.records);
        let pagination = self.pagination.clamped(rows.len());
        let window = pagination.window(rows.len());
        rows[window].to_vec()
    }

    /// Current page with totals
    pub fn view(&self) -> Page<R> {
        let rows = self.query.apply(&self.schema, &self.records);
        let total = rows.len();
        let pagination = self.pagination.clamped(total);
        let items: Vec<R> = rows[pagination.window(total)]
            .iter()
            .map(|r| (*r).clone())
            .collect();

        debug!(
            entity = self.schema.name,
            total,
            page = pagination.page,
            shown = items.len(),
            "derived view"
        );

        Page {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
        }
    }

    // --- mutations -----------------------------------------------------

    /// Append a new record with a fresh identifier
    pub fn create(&mut self, mut record: R) -> Result<R> {
        self.ensure_loaded()?;
        let id = self.ids.allocate();
        record.set_id(id);
        self.records.push(record.clone());
        self.clamp_page();
        debug!(entity = self.schema.name, %id, "created");
        Ok(record)
    }

    /// Insert a record whose identifier was assigned elsewhere (e.g. a service).
    ///
    /// An existing record with the same identifier is replaced.
    pub fn insert(&mut self, record: R) -> Result<R> {
        self.ensure_loaded()?;
        let id = record.id();
        self.ids.observe(id);
        match self.records.iter().position(|r| r.id() == id) {
            Some(index) => self.records[index] = record.clone(),
            None => self.records.push(record.clone()),
        }
        self.clamp_page();
        Ok(record)
    }

    /// Replace the record with `id`; its identifier is kept
    pub fn update(&mut self, id: RecordId, mut patch: R) -> Result<R> {
        self.ensure_loaded()?;
        let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) else {
            warn!(entity = self.schema.name, %id, "update of missing record");
            return Err(ListError::not_found(id));
        };
        patch.set_id(id);
        *slot = patch.clone();
        self.clamp_page();
        debug!(entity = self.schema.name, %id, "updated");
        Ok(patch)
    }

    /// Remove the record with `id`
    pub fn delete(&mut self, id: RecordId) -> Result<R> {
        self.ensure_loaded()?;
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            warn!(entity = self.schema.name, %id, "delete of missing record");
            return Err(ListError::not_found(id));
        };
        let removed = self.records.remove(index);
        self.clamp_page();
        debug!(entity = self.schema.name, %id, "deleted");
        Ok(removed)
    }

    // --- drafts --------------------------------------------------------

    pub fn draft(&self) -> &Draft<R> {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft<R> {
        &mut self.draft
    }

    /// Open the new-record form from a blank template
    pub fn open_create(&mut self, template: R) {
        self.draft = Draft::Creating(template);
    }

    /// Open the edit form over a copy of the record with `id`
    pub fn open_edit(&mut self, id: RecordId) -> Result<()> {
        let record = self.get(id).cloned().ok_or_else(|| ListError::not_found(id))?;
        self.draft = Draft::Editing { id, record };
        Ok(())
    }

    /// Set a field on the open draft
    pub fn edit_draft(&mut self, field: &str, value: FieldValue) -> Result<()> {
        self.draft
            .record_mut()
            .ok_or(ListError::NoDraft)?
            .set_field(field, value)
    }

    /// Close the form without saving
    pub fn cancel_draft(&mut self) -> Result<()> {
        match self.draft.take() {
            Draft::Closed => Err(ListError::NoDraft),
            _ => Ok(()),
        }
    }

    /// Close the form and hand back its contents
    pub fn take_draft(&mut self) -> Draft<R> {
        self.draft.take()
    }

    /// Save the open form through create or update.
    ///
    /// On failure the draft stays open so the user can fix it.
    pub fn commit_draft(&mut self) -> Result<R> {
        let result = match &self.draft {
            Draft::Closed => return Err(ListError::NoDraft),
            Draft::Creating(record) => self.create(record.clone()),
            Draft::Editing { id, record } => self.update(*id, record.clone()),
        };
        if result.is_ok() {
            self.draft = Draft::Closed;
        }
        result
    }
}

#[cfg(feature = "rt")]
mod remote {
    use std::sync::Arc;

    use super::ListManager;
    use crate::error::{ListError, Result};
    use crate::draft::Draft;
    use crate::loader::LoadHandle;
    use crate::record::{Record, RecordId};
    use crate::service::RecordService;

    /// Service-backed operations: the service is the source of truth for
    /// identifiers, the manager mirrors what the service accepted.
    impl<R: Record> ListManager<R> {
        /// Start a load task and enter `Loading`
        pub fn start_load<S>(&mut self, service: Arc<S>) -> LoadHandle<R>
        where
            S: RecordService<R> + ?Sized + 'static,
        {
            self.begin_loading();
            LoadHandle::spawn(service)
        }

        /// Load to completion; `LoadFailed` when the service fails
        pub async fn load_from<S>(&mut self, service: Arc<S>) -> Result<usize>
        where
            S: RecordService<R> + ?Sized + 'static,
        {
            let handle = self.start_load(service);
            self.apply_outcome(handle.finish().await);
            match self.load_state().failure() {
                Some(reason) => Err(ListError::load_failed(reason)),
                None => Ok(self.records().len()),
            }
        }

        pub async fn create_with<S>(&mut self, service: &S, record: R) -> Result<R>
        where
            S: RecordService<R> + ?Sized,
        {
            self.ensure_loaded()?;
            let stored = service.create(record).await?;
            self.insert(stored)
        }

        pub async fn update_with<S>(&mut self, service: &S, id: RecordId, patch: R) -> Result<R>
        where
            S: RecordService<R> + ?Sized,
        {
            self.ensure_loaded()?;
            match service.update(id, patch).await? {
                Some(stored) => self.update(id, stored),
                None => Err(ListError::not_found(id)),
            }
        }

        pub async fn delete_with<S>(&mut self, service: &S, id: RecordId) -> Result<R>
        where
            S: RecordService<R> + ?Sized,
        {
            self.ensure_loaded()?;
            if service.delete(id).await? {
                self.delete(id)
            } else {
                Err(ListError::not_found(id))
            }
        }

        /// Save the open form through the service
        pub async fn commit_draft_with<S>(&mut self, service: &S) -> Result<R>
        where
            S: RecordService<R> + ?Sized,
        {
            let result = match self.draft() {
                Draft::Closed => return Err(ListError::NoDraft),
                Draft::Creating(record) => {
                    let record = record.clone();
                    self.create_with(service, record).await
                }
                Draft::Editing { id, record } => {
                    let (id, record) = (*id, record.clone());
                    self.update_with(service, id, record).await
                }
            };
            if result.is_ok() {
                self.take_draft();
            }
            result
        }
    }
}
