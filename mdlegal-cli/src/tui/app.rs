//! Core application state and mode management

use mdlegal_core::RecordId;

use super::page::{FormField, ListPage};

/// Input mode for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigate rows, pages and tabs
    #[default]
    Normal,
    /// Typing a search term
    Search,
    /// Create/edit form is open
    Form,
    /// Waiting for delete confirmation
    ConfirmDelete,
}

/// Create/edit form state over the open draft
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected: usize,
    /// Editing an existing record (vs. creating)
    pub editing: Option<RecordId>,
}

impl FormState {
    pub fn select_next(&mut self) {
        if !self.fields.is_empty() {
            self.selected = (self.selected + 1) % self.fields.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.fields.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.fields.len() - 1);
        }
    }

    pub fn insert(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            field.value.pop();
        }
    }
}

/// Main application state
pub struct App {
    /// One tab per entity page
    pub pages: Vec<Box<dyn ListPage>>,
    /// Active tab
    pub active: usize,
    pub mode: Mode,
    /// Selected row on the current page
    pub selected_row: usize,
    /// Search input while in search mode
    pub search_input: String,
    /// Index into the active schema's filterable fields used by `f`
    pub filter_field: usize,
    pub form: Option<FormState>,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    pub help_visible: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(pages: Vec<Box<dyn ListPage>>, active: usize) -> Self {
        let active = active.min(pages.len().saturating_sub(1));
        Self {
            pages,
            active,
            mode: Mode::Normal,
            selected_row: 0,
            search_input: String::new(),
            filter_field: 0,
            form: None,
            status_message: None,
            help_visible: false,
            should_quit: false,
        }
    }

    pub fn page(&self) -> &dyn ListPage {
        self.pages[self.active].as_ref()
    }

    pub fn page_mut(&mut self) -> &mut dyn ListPage {
        self.pages[self.active].as_mut()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Switch to a tab, starting its first load if it never loaded
    pub fn switch_tab(&mut self, index: usize) {
        if index >= self.pages.len() {
            return;
        }
        self.active = index;
        self.selected_row = 0;
        self.filter_field = 0;
        self.mode = Mode::Normal;
        if matches!(self.page().load_state(), mdlegal_core::LoadState::Idle) {
            self.page_mut().start_load();
        }
    }

    pub fn next_tab(&mut self) {
        self.switch_tab((self.active + 1) % self.pages.len().max(1));
    }

    pub fn prev_tab(&mut self) {
        let len = self.pages.len().max(1);
        self.switch_tab((self.active + len - 1) % len);
    }

    fn row_count(&self) -> usize {
        self.page().view().ids.len()
    }

    pub fn select_next(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.selected_row = (self.selected_row + 1) % rows;
        }
    }

    pub fn select_prev(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.selected_row = self.selected_row.checked_sub(1).unwrap_or(rows - 1);
        }
    }

    /// Keep the selection inside the current page after the view changed
    pub fn clamp_selection(&mut self) {
        let rows = self.row_count();
        if self.selected_row >= rows {
            self.selected_row = rows.saturating_sub(1);
        }
    }

    /// Identifier of the selected row
    pub fn selected_id(&self) -> Option<RecordId> {
        self.page().view().ids.get(self.selected_row).copied()
    }

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.search_input = self.page().view().search;
    }

    /// Filterable field `f` currently cycles
    pub fn current_filter_field(&self) -> Option<&'static str> {
        let filterable = self.page().schema().filterable;
        filterable.get(self.filter_field % filterable.len().max(1)).copied()
    }

    pub fn next_filter_field(&mut self) {
        let count = self.page().schema().filterable.len();
        if count > 0 {
            self.filter_field = (self.filter_field + 1) % count;
        }
    }

    /// Open the form over a new draft
    pub fn open_create_form(&mut self) {
        self.page_mut().open_create();
        self.form = Some(FormState {
            fields: self.page().draft_fields(),
            selected: 0,
            editing: None,
        });
        self.mode = Mode::Form;
    }

    /// Open the form over the selected record
    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_id() else {
            self.set_status("Nenhum registro selecionado");
            return;
        };
        if let Err(err) = self.page_mut().open_edit(id) {
            self.set_status(format!("Erro: {}", err));
            return;
        }
        self.form = Some(FormState {
            fields: self.page().draft_fields(),
            selected: 0,
            editing: Some(id),
        });
        self.mode = Mode::Form;
    }

    pub fn close_form(&mut self) {
        self.page_mut().cancel_draft();
        self.form = None;
        self.mode = Mode::Normal;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tui::page::tests::loaded_cases;

    pub(crate) fn app() -> App {
        App::new(vec![Box::new(loaded_cases()) as Box<dyn ListPage>], 0)
    }

    #[test]
    fn selection_wraps_within_page() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.selected_row, 9);
        app.select_next();
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.selected_id(), Some(RecordId(1)));
    }

    #[test]
    fn selection_clamps_after_page_change() {
        let mut app = app();
        app.selected_row = 9;
        app.page_mut().next_page();
        app.clamp_selection();
        assert_eq!(app.selected_row, 1);
    }

    #[test]
    fn edit_form_is_filled_from_record() {
        let mut app = app();
        app.select_next();
        app.open_edit_form();
        assert_eq!(app.mode, Mode::Form);
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.editing, Some(RecordId(2)));
        assert_eq!(form.fields[1].value, "Reclamação trabalhista");

        app.close_form();
        assert!(app.form.is_none());
        assert!(app.page().draft_fields().is_empty());
    }

    #[test]
    fn filter_field_cycles() {
        let mut app = app();
        assert_eq!(app.current_filter_field(), Some("status"));
        app.next_filter_field();
        assert_eq!(app.current_filter_field(), Some("area"));
        app.next_filter_field();
        assert_eq!(app.current_filter_field(), Some("status"));
    }
}
