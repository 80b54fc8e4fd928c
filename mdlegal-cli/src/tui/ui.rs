//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

use super::app::{App, Mode};
use super::page::PageView;

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
const DANGER: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

pub const HELP_TEXT: &str = "\
1-5 / Tab     trocar de página
j/k           selecionar linha
n/p  g/G      página seguinte/anterior, primeira/última
/             buscar
f / F         próximo valor do filtro / trocar campo filtrado
s / S         próxima coluna de ordenação / inverter direção
c  e  d       criar, editar, excluir
r             recarregar
q             sair";

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let view = app.page().view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab header
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Page footer
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    render_table(frame, app, &view, chunks[1]);
    render_footer(frame, &view, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    match app.mode {
        Mode::Search => render_search_input(frame, app),
        Mode::Form => render_form(frame, app),
        Mode::ConfirmDelete => render_confirm_delete(frame, app),
        Mode::Normal => {}
    }

    if app.help_visible {
        render_help_overlay(frame);
    }
}

/// Render the tab header
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = app
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("{}:{}", i + 1, page.schema().title))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" MD Legal Suite ")
                .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        )
        .select(app.active)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

/// Render the current page as a table (skeleton while loading)
fn render_table(frame: &mut Frame, app: &App, view: &PageView, area: Rect) {
    let mut title = format!(" {} ", view.title);
    if let Some(sort) = &view.sort {
        title.push_str(&format!("[{}] ", sort));
    }

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    if let Some(reason) = &view.failure {
        let text = vec![
            Line::from(Span::styled(
                format!("Falha ao carregar: {}", reason),
                Style::default().fg(DANGER),
            )),
            Line::from(""),
            Line::from(Span::styled("Pressione r para tentar novamente", Style::default().fg(DIM))),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    if view.rows.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "  Nenhum registro encontrado.",
            Style::default().fg(DIM),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let widths: Vec<Constraint> = view
        .header
        .iter()
        .enumerate()
        .map(|(i, _)| if i == 0 { Constraint::Length(4) } else { Constraint::Fill(1) })
        .collect();

    let header = Row::new(view.header.iter().map(|h| Cell::from(h.as_str())))
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let row_style = if view.loading {
        Style::default().fg(DIM)
    } else {
        Style::default().fg(Color::White)
    };
    let rows = view
        .rows
        .iter()
        .map(|row| Row::new(row.iter().map(|c| Cell::from(c.as_str()))).style(row_style));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if !view.loading {
        state.select(Some(app.selected_row));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render pagination summary with the active search and filters
fn render_footer(frame: &mut Frame, view: &PageView, area: Rect) {
    let mut spans = vec![Span::raw(format!(
        " {} · página {} de {}",
        view.summary,
        view.page,
        view.total_pages.max(1)
    ))];
    if !view.search.trim().is_empty() {
        spans.push(Span::styled(
            format!("  busca: '{}'", view.search.trim()),
            Style::default().fg(Color::Magenta),
        ));
    }
    for (field, value) in &view.filters {
        spans.push(Span::styled(
            format!("  {}={}", field, value),
            Style::default().fg(HIGHLIGHT),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Style::default().fg(DIM)), area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Normal => Span::styled(" NORMAL ", Style::default().bg(ACCENT).fg(Color::Black)),
        Mode::Search => Span::styled(
            " BUSCA ",
            Style::default().bg(Color::Magenta).fg(Color::Black),
        ),
        Mode::Form => Span::styled(" FORM ", Style::default().bg(Color::Green).fg(Color::Black)),
        Mode::ConfirmDelete => {
            Span::styled(" EXCLUIR ", Style::default().bg(DANGER).fg(Color::Black))
        }
    };

    let help_text = match app.mode {
        Mode::Normal => {
            "j/k:linha  n/p:página  /:buscar  f:filtro  s:ordenar  c/e/d:crud  ?:ajuda  q:sair"
        }
        Mode::Search => "Digite para buscar  Enter:aplicar  Esc:limpar",
        Mode::Form => "Tab:campo  Enter:salvar  Esc:cancelar",
        Mode::ConfirmDelete => "y:confirmar  qualquer tecla:cancelar",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let line = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Centered popup of the given size, clipped to the frame
fn popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Render search input overlay
fn render_search_input(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let width = 60.min(area.width.saturating_sub(4));
    let popup_area = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: 2,
        width,
        height: 3,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Buscar ")
        .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let paragraph = Paragraph::new(format!("{}|", app.search_input)).block(block);
    frame.render_widget(paragraph, popup_area);
}

/// Render the create/edit form
fn render_form(frame: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };
    let popup_area = popup(frame.area(), 70, form.fields.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let title = match form.editing {
        Some(id) => format!(" Editar {} #{} ", app.page().schema().title, id),
        None => format!(" Novo registro em {} ", app.page().schema().title),
    };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == form.selected;
            let value_style = if selected {
                Style::default().fg(Color::Black).bg(HIGHLIGHT)
            } else {
                Style::default().fg(Color::White)
            };
            let cursor = if selected { "|" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:>12}: ", field.name), Style::default().fg(DIM)),
                Span::styled(format!("{}{}", field.value, cursor), value_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Render the delete confirmation prompt
fn render_confirm_delete(frame: &mut Frame, app: &App) {
    let popup_area = popup(frame.area(), 50, 3);
    frame.render_widget(Clear, popup_area);

    let id = app
        .selected_id()
        .map(|id| format!("#{}", id))
        .unwrap_or_default();
    let block = Block::default()
        .title(" Confirmar exclusão ")
        .title_style(Style::default().fg(DANGER).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DANGER));

    let paragraph = Paragraph::new(format!("Excluir registro {}? (y/n)", id)).block(block);
    frame.render_widget(paragraph, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let height = HELP_TEXT.lines().count() as u16 + 2;
    let popup_area = popup(frame.area(), 70, height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Ajuda (qualquer tecla fecha) ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(HELP_TEXT)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, popup_area);
}
