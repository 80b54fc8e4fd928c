//! Type-erased list pages shown as dashboard tabs

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use mdlegal_core::{
    Draft, Entity, EntitySchema, FieldKind, FieldValue, ListManager, LoadHandle, LoadState,
    MockService, Record, RecordId,
};

use crate::commands::Context;
use crate::entity::{parse_value, EntityKind};
use crate::ui;

/// Snapshot of a page, ready to render
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub title: &'static str,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub ids: Vec<RecordId>,
    pub summary: String,
    pub page: usize,
    pub total_pages: usize,
    pub loading: bool,
    pub failure: Option<String>,
    pub search: String,
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
}

/// One field of the create/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub value: String,
}

/// Dashboard tab operations, independent of the record type
#[async_trait]
pub trait ListPage: Send {
    fn schema(&self) -> &'static EntitySchema;

    fn view(&self) -> PageView;

    fn load_state(&self) -> &LoadState;

    /// Start loading from the service; a running load is cancelled first
    fn start_load(&mut self);

    /// Apply a finished load; `None` while it is still running
    async fn poll_load(&mut self) -> Option<std::result::Result<usize, String>>;

    fn set_search(&mut self, term: &str);

    /// Advance a filter to its next value; past the last value it is cleared
    fn cycle_filter(&mut self, field: &str) -> Result<Option<FieldValue>>;

    /// Sort by the next sortable field (ascending)
    fn cycle_sort(&mut self) -> Result<()>;

    /// Flip the direction of the current sort
    fn toggle_sort(&mut self) -> Result<()>;

    fn next_page(&mut self) -> bool;
    fn prev_page(&mut self) -> bool;
    fn first_page(&mut self);
    fn last_page(&mut self);

    fn open_create(&mut self);
    fn open_edit(&mut self, id: RecordId) -> Result<()>;

    /// Editable text of the open draft, one entry per schema field
    fn draft_fields(&self) -> Vec<FormField>;
    fn is_editing(&self) -> bool;
    fn cancel_draft(&mut self);

    /// Parse the form into the draft and save it through the service
    async fn submit_draft(&mut self, fields: &[FormField]) -> Result<RecordId>;

    async fn delete(&mut self, id: RecordId) -> Result<()>;
}

/// A list page for one entity, backed by the mock service
pub struct EntityPage<E: Entity> {
    list: ListManager<E>,
    service: Arc<MockService<E>>,
    load: Option<LoadHandle<E>>,
}

impl<E: Entity> EntityPage<E> {
    pub fn new(ctx: &Context) -> Self {
        Self::with_parts(ctx.list_manager(None), ctx.service::<E>())
    }

    pub fn with_parts(list: ListManager<E>, service: Arc<MockService<E>>) -> Self {
        Self {
            list,
            service,
            load: None,
        }
    }

    pub fn list(&self) -> &ListManager<E> {
        &self.list
    }
}

/// Text a field shows in the edit form
fn form_text(kind: FieldKind, value: &FieldValue) -> String {
    match (kind, value) {
        (FieldKind::Money, FieldValue::Number(n)) => format!("{:.2}", n),
        _ => value.display(),
    }
}

#[async_trait]
impl<E: Entity> ListPage for EntityPage<E> {
    fn schema(&self) -> &'static EntitySchema {
        E::schema()
    }

    fn view(&self) -> PageView {
        let schema = E::schema();
        let query = self.list.query();
        let page = self.list.view();
        let (header, mut rows) = ui::table_rows(schema, &page.items);
        let ids = page.items.iter().map(Record::id).collect();

        let loading = self.list.is_loading();
        if loading {
            rows = ui::skeleton_rows(schema, self.list.skeleton_rows());
        }

        PageView {
            title: schema.title,
            header,
            rows,
            ids: if loading { Vec::new() } else { ids },
            summary: page.summary(),
            page: page.page,
            total_pages: page.total_pages(),
            loading,
            failure: self.list.load_state().failure().map(str::to_string),
            search: query.search.clone(),
            filters: query
                .filters
                .iter()
                .map(|(field, value)| (field.clone(), value.display()))
                .collect(),
            sort: self
                .list
                .sort()
                .map(|sort| format!("{} {}", sort.field, sort.direction.arrow())),
        }
    }

    fn load_state(&self) -> &LoadState {
        self.list.load_state()
    }

    fn start_load(&mut self) {
        if let Some(mut previous) = self.load.take() {
            previous.cancel();
        }
        self.load = Some(self.list.start_load(self.service.clone()));
    }

    async fn poll_load(&mut self) -> Option<std::result::Result<usize, String>> {
        if !self.load.as_ref()?.is_finished() {
            return None;
        }
        let handle = self.load.take()?;
        self.list.apply_outcome(handle.finish().await);
        Some(match self.list.load_state().failure() {
            Some(reason) => Err(reason.to_string()),
            None => Ok(self.list.records().len()),
        })
    }

    fn set_search(&mut self, term: &str) {
        self.list.set_search(term);
    }

    fn cycle_filter(&mut self, field: &str) -> Result<Option<FieldValue>> {
        let options = self.list.filter_options(field)?;
        let next = match self.list.query().filters.get(field) {
            None => options.first().cloned(),
            Some(current) => options
                .iter()
                .position(|value| value == current)
                .and_then(|i| options.get(i + 1).cloned()),
        };
        match &next {
            Some(value) => self.list.set_filter(field, value.clone())?,
            None => self.list.clear_filter(field),
        }
        Ok(next)
    }

    fn cycle_sort(&mut self) -> Result<()> {
        let sortable = E::schema().sortable;
        let next = match self.list.sort() {
            None => sortable.first(),
            Some(current) => sortable
                .iter()
                .position(|field| *field == current.field)
                .map(|i| &sortable[(i + 1) % sortable.len()]),
        };
        let field = next.ok_or_else(|| anyhow!("{} has no sortable fields", E::schema().name))?;
        // Moving to a new field starts ascending; a single field just toggles
        Ok(self.list.click_sort(field)?)
    }

    fn toggle_sort(&mut self) -> Result<()> {
        let field = self
            .list
            .sort()
            .map(|sort| sort.field.clone())
            .ok_or_else(|| anyhow!("no sort selected"))?;
        Ok(self.list.click_sort(&field)?)
    }

    fn next_page(&mut self) -> bool {
        self.list.next_page()
    }

    fn prev_page(&mut self) -> bool {
        self.list.prev_page()
    }

    fn first_page(&mut self) {
        self.list.first_page();
    }

    fn last_page(&mut self) {
        self.list.last_page();
    }

    fn open_create(&mut self) {
        self.list.open_create(E::default());
    }

    fn open_edit(&mut self, id: RecordId) -> Result<()> {
        Ok(self.list.open_edit(id)?)
    }

    fn draft_fields(&self) -> Vec<FormField> {
        let Some(record) = self.list.draft().record() else {
            return Vec::new();
        };
        E::schema()
            .fields
            .iter()
            .map(|&(name, kind)| FormField {
                name,
                value: record
                    .field(name)
                    .map(|value| form_text(kind, &value))
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn is_editing(&self) -> bool {
        matches!(self.list.draft(), Draft::Editing { .. })
    }

    fn cancel_draft(&mut self) {
        self.list.take_draft();
    }

    async fn submit_draft(&mut self, fields: &[FormField]) -> Result<RecordId> {
        let schema = E::schema();
        for field in fields {
            let value = parse_value(schema, field.name, &field.value)?;
            self.list.edit_draft(field.name, value)?;
        }
        let saved = self.list.commit_draft_with(self.service.as_ref()).await?;
        Ok(saved.id())
    }

    async fn delete(&mut self, id: RecordId) -> Result<()> {
        self.list.delete_with(self.service.as_ref(), id).await?;
        Ok(())
    }
}

/// Build the tab for an entity
pub fn build_page(kind: EntityKind, ctx: &Context) -> Box<dyn ListPage> {
    crate::with_entity!(kind, E => Box::new(EntityPage::<E>::new(ctx)) as Box<dyn ListPage>)
}
