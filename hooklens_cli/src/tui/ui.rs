//! TUI rendering functions

use super::app::DashApp;
use crate::relay::UpdateStrategy;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

/// Draw the dashboard
pub fn draw(frame: &mut Frame, app: &DashApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header with relay info
            Constraint::Min(5),    // Table + detail pane
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_main(frame, app, chunks[1]);
    draw_footer(frame, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &DashApp, area: Rect) {
    let (status_text, status_color) = match app.strategy {
        None => ("probing", Color::Yellow),
        Some(UpdateStrategy::Push) => ("live", Color::Green),
        Some(UpdateStrategy::Polling) => ("polling (2s)", Color::Cyan),
    };

    let lines = vec![Line::from(vec![
        Span::styled("HOOKLENS", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled("  Relay ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            truncate_str(&app.relay_url, area.width.saturating_sub(30) as usize),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled("  Updates ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            status_text,
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        ),
    ])];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_main(frame: &mut Frame, app: &DashApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_request_table(frame, app, chunks[0]);
    draw_detail(frame, app, chunks[1]);
}

fn draw_request_table(frame: &mut Frame, app: &DashApp, area: Rect) {
    // Fixed columns: Id(10) + Method(7) + Time(9) + borders/padding
    let fixed_width = 10 + 7 + 9 + 8;
    let path_width = (area.width as usize).saturating_sub(fixed_width).max(10);

    let header = Row::new(vec!["Id", "Method", "Path", "Time"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .bottom_margin(0);

    let rows: Vec<Row> = app
        .requests
        .iter()
        .map(|record| {
            Row::new(vec![
                Cell::from(truncate_str(&record.id, 10)),
                Cell::from(format!("{:>6}", truncate_str(&record.method, 6)))
                    .style(method_style(&record.method)),
                Cell::from(truncate_str(&record.path, path_width)),
                Cell::from(record.time_label()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!(" Requests ({}) ", app.requests.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));

    let mut state = TableState::default();
    if !app.requests.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_detail(frame: &mut Frame, app: &DashApp, area: Rect) {
    let text = match app.detail.as_deref() {
        Some(detail) => detail.to_string(),
        None => "Select a row and press Enter to inspect a request.".to_string(),
    };

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Detail ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let text = Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::styled(" Navigate  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" Inspect  ", Style::default().fg(Color::DarkGray)),
        Span::styled("r", Style::default().fg(Color::Cyan)),
        Span::styled(" Refresh  ", Style::default().fg(Color::DarkGray)),
        Span::styled("o", Style::default().fg(Color::Cyan)),
        Span::styled(" Open relay  ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(text), area);
}

/// Get style for HTTP method
fn method_style(method: &str) -> Style {
    match method {
        "GET" => Style::default().fg(Color::Green),
        "POST" => Style::default().fg(Color::Yellow),
        "PUT" => Style::default().fg(Color::Blue),
        "PATCH" => Style::default().fg(Color::Magenta),
        "DELETE" => Style::default().fg(Color::Red),
        "HEAD" => Style::default().fg(Color::Cyan),
        "OPTIONS" => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::White),
    }
}

/// Truncate any string to max length
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() > max_len && max_len > 3 {
        format!("{}...", &s[..max_len - 3])
    } else if s.len() > max_len {
        s[..max_len].to_string()
    } else {
        s.to_string()
    }
}
