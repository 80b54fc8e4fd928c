//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context as _, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use super::app::{App, Mode};
use super::event::{handle_key, poll_event, HandleResult};
use super::page::build_page;
use super::ui;
use crate::commands::Context;
use crate::entity::EntityKind;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the dashboard, opening on `start`
pub async fn run(ctx: &Context, start: EntityKind) -> Result<()> {
    let pages = EntityKind::ALL
        .iter()
        .map(|&kind| build_page(kind, ctx))
        .collect();
    let active = EntityKind::ALL
        .iter()
        .position(|&kind| kind == start)
        .unwrap_or(0);

    let mut app = App::new(pages, active);
    app.page_mut().start_load();

    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, &mut app).await;

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
async fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Short timeout so finished loads show up promptly
        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(50))? {
            match handle_key(app, key) {
                HandleResult::Quit => break,
                HandleResult::Continue => {}
                HandleResult::Reload => {
                    app.page_mut().start_load();
                    app.set_status("Recarregando...");
                }
                HandleResult::Submit => submit_form(app).await,
                HandleResult::Delete(id) => match app.page_mut().delete(id).await {
                    Ok(()) => {
                        app.clamp_selection();
                        app.set_status(format!("Registro #{} excluído", id));
                    }
                    Err(err) => app.set_status(format!("Erro: {}", err)),
                },
            }
        }

        poll_loads(app).await;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Apply loads that finished since the last frame
async fn poll_loads(app: &mut App) {
    for index in 0..app.pages.len() {
        let Some(outcome) = app.pages[index].poll_load().await else {
            continue;
        };
        let title = app.pages[index].schema().title;
        match outcome {
            Ok(count) => {
                debug!(page = title, count, "load finished");
                if index == app.active {
                    app.set_status(format!("{}: {} registros", title, count));
                }
            }
            Err(reason) => {
                warn!(page = title, %reason, "load failed");
                if index == app.active {
                    app.set_status(format!("Falha ao carregar {}", title));
                }
            }
        }
        if index == app.active {
            app.clamp_selection();
        }
    }
}

/// Save the open form; on error the form and its draft stay open
async fn submit_form(app: &mut App) {
    let Some(form) = app.form.clone() else {
        return;
    };
    match app.page_mut().submit_draft(&form.fields).await {
        Ok(id) => {
            app.form = None;
            app.mode = Mode::Normal;
            let verb = if form.editing.is_some() { "atualizado" } else { "criado" };
            app.set_status(format!("Registro #{} {}", id, verb));
        }
        Err(err) => {
            app.set_status(format!("Erro: {}", err));
        }
    }
}
