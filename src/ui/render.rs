// Drawing of the main screen. Pure function of App state, except that the
// button areas are recorded back into App for mouse hit testing.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::actions::Action;
use crate::ui::app::{App, Status};

const BUTTON_WIDTH: u16 = 24;

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                        // Title
            Constraint::Length(Action::ALL.len() as u16), // Buttons
            Constraint::Min(3),                           // Results table
            Constraint::Length(1),                        // Status bar
        ])
        .split(f.area());

    let title = Paragraph::new(app.display().title.clone())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, chunks[0]);

    render_buttons(f, chunks[1], app);
    render_results(f, chunks[2], app);
    render_status(f, chunks[3], app);
}

fn render_buttons(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); Action::ALL.len()])
        .split(area);

    let width = BUTTON_WIDTH.min(area.width);
    let x = area.x + (area.width - width) / 2;
    let focused = app.focused();

    let mut areas = Vec::with_capacity(Action::ALL.len());
    for (action, row) in Action::ALL.iter().zip(rows.iter()) {
        let button_area = Rect::new(x, row.y, width, 1);
        let style = if *action == focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };

        let button = Paragraph::new(action.label())
            .alignment(Alignment::Center)
            .style(style);
        f.render_widget(button, button_area);
        areas.push(button_area);
    }
    app.set_button_areas(areas);
}

fn render_results(f: &mut Frame, area: Rect, app: &mut App) {
    let projection = app.projection();

    if projection.column_count() == 0 {
        let hint = Paragraph::new("Choose an action above and press Enter")
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .style(Style::default().fg(Color::Gray));
        f.render_widget(hint, area);
        return;
    }

    if projection.is_single_cell() {
        // Wrapped here rather than by the widget so scrolling can count the lines
        let inner_width = area.width.saturating_sub(2);
        let lines: Vec<Line> = wrap_text(projection.cell(0, 0).unwrap_or_default(), inner_width)
            .into_iter()
            .map(Line::from)
            .collect();
        app.set_text_width(inner_width);

        let style = match app.status() {
            Status::Failed { .. } => Style::default().fg(Color::Red),
            _ => Style::default(),
        };
        let response = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title("Response"))
            .style(style)
            .scroll((app.text_scroll(), 0));
        f.render_widget(response, area);
        return;
    }

    let show_row_numbers = app.display().show_row_numbers;
    let column_widths = projection.column_widths(app.display().max_column_width);

    let mut header_cells: Vec<Cell> = Vec::new();
    let mut widths: Vec<Constraint> = Vec::new();
    if show_row_numbers {
        header_cells.push(
            Cell::from("#").style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        );
        widths.push(Constraint::Length(6));
    }
    header_cells.extend(projection.headers().iter().map(|h| {
        Cell::from(h.clone()).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }));
    widths.extend(column_widths.into_iter().map(Constraint::Length));

    let rows: Vec<Row<'static>> = projection
        .rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let mut cells: Vec<Cell> = Vec::with_capacity(row.len() + 1);
            if show_row_numbers {
                cells.push(
                    Cell::from((row_idx + 1).to_string())
                        .style(Style::default().fg(Color::DarkGray)),
                );
            }
            cells.extend(row.iter().map(|value| Cell::from(value.clone())));
            Row::new(cells)
        })
        .collect();

    let title = format!("Results ({} rows)", projection.row_count());
    let table = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(table, area, app.table_state_mut());
}

/// Break `text` into lines of at most `width` characters. Width 0 only
/// splits on newlines.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = width as usize;
    let mut wrapped = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if width == 0 || chars.len() <= width {
            wrapped.push(line.to_string());
        } else {
            wrapped.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
        }
    }
    wrapped
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.status() {
        Status::Failed { .. } => Color::Red,
        Status::Loading(_) => Color::Yellow,
        _ => Color::White,
    };

    let status_line = Line::from(vec![
        Span::styled(app.status_text(), Style::default().fg(status_color)),
        Span::raw(" | "),
        Span::raw("Tab/↑↓=Select | Enter=Run | Esc=Cancel | PgUp/PgDn=Scroll"),
    ]);

    let status = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));
    f.render_widget(status, area);
}
