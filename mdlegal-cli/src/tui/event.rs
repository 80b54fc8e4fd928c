//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use mdlegal_core::RecordId;

use super::app::{App, Mode};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Save the open form through the service
    Submit,
    /// Delete a record through the service
    Delete(RecordId),
    /// Load the active tab again
    Reload,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') | KeyCode::Char('q') = key.code {
            return HandleResult::Quit;
        }
    }

    if app.help_visible {
        app.help_visible = false;
        return HandleResult::Continue;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key),
        Mode::Form => handle_form_mode(app, key),
        Mode::ConfirmDelete => handle_confirm_delete(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    // Views are inert while the tab loads
    let loading = app.page().load_state().is_loading();

    match key.code {
        KeyCode::Char('q') => return HandleResult::Quit,
        KeyCode::Char('?') => app.help_visible = true,

        // Tabs
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(index) = c.to_digit(10) {
                app.switch_tab(index as usize - 1);
            }
        }

        KeyCode::Char('r') => return HandleResult::Reload,
        _ if loading => {}

        // Rows
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),

        // Pages
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
            if app.page_mut().next_page() {
                app.selected_row = 0;
            }
        }
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
            if app.page_mut().prev_page() {
                app.selected_row = 0;
            }
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.page_mut().first_page();
            app.selected_row = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.page_mut().last_page();
            app.selected_row = 0;
        }

        KeyCode::Char('/') => app.enter_search(),

        // Filters
        KeyCode::Char('f') => {
            if let Some(field) = app.current_filter_field() {
                match app.page_mut().cycle_filter(field) {
                    Ok(Some(value)) => app.set_status(format!("{} = {}", field, value)),
                    Ok(None) => app.set_status(format!("{}: todos", field)),
                    Err(err) => app.set_status(format!("Erro: {}", err)),
                }
                app.selected_row = 0;
            }
        }
        KeyCode::Char('F') => {
            app.next_filter_field();
            if let Some(field) = app.current_filter_field() {
                app.set_status(format!("Filtro: {}", field));
            }
        }

        // Sorting
        KeyCode::Char('s') => {
            if let Err(err) = app.page_mut().cycle_sort() {
                app.set_status(format!("Erro: {}", err));
            }
        }
        KeyCode::Char('S') => {
            if let Err(err) = app.page_mut().toggle_sort() {
                app.set_status(format!("Erro: {}", err));
            }
        }

        // CRUD
        KeyCode::Char('c') => app.open_create_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.selected_id().is_some() {
                app.mode = Mode::ConfirmDelete;
            }
        }

        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
    app.clamp_selection();
    HandleResult::Continue
}

/// Handle keys while typing a search; the view follows every keystroke
fn handle_search_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Enter => app.mode = Mode::Normal,
        KeyCode::Esc => {
            app.search_input.clear();
            app.page_mut().set_search("");
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            let term = app.search_input.clone();
            app.page_mut().set_search(&term);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            let term = app.search_input.clone();
            app.page_mut().set_search(&term);
        }
        _ => {}
    }
    app.selected_row = 0;
    HandleResult::Continue
}

/// Handle keys in the create/edit form
fn handle_form_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Normal;
        return HandleResult::Continue;
    };
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => return HandleResult::Submit,
        KeyCode::Tab | KeyCode::Down => form.select_next(),
        KeyCode::BackTab | KeyCode::Up => form.select_prev(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.insert(c),
        _ => {}
    }
    HandleResult::Continue
}

/// Handle the y/n delete prompt
fn handle_confirm_delete(app: &mut App, key: KeyEvent) -> HandleResult {
    app.mode = Mode::Normal;
    match (key.code, app.selected_id()) {
        (KeyCode::Char('y') | KeyCode::Char('s'), Some(id)) => HandleResult::Delete(id),
        _ => {
            app.set_status("Exclusão cancelada");
            HandleResult::Continue
        }
    }
}
