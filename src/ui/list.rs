use super::table;
use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let banner_height = if app.error.is_empty() { 0 } else { 3 };

    // Layout: header(3) + error banner(0|3) + table(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let add_style = if app.add_popover.is_open() {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Movie Admin ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{} movies]   ", app.movies.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" a ADD ", add_style.add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, chunks[0]);

    // ── Error banner ──
    if !app.error.is_empty() {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(" ✖ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(app.error.as_str(), Style::default().fg(Color::Red)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(banner, chunks[1]);
    }

    // ── Table ──
    table::render(
        &app.movies,
        app.selected,
        |i| app.row_popovers.get(i).is_some_and(|p| p.is_open()),
        frame,
        chunks[2],
    );

    // ── Status bar ──
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ↑↓", key_style),
        Span::raw(" Navigate  "),
        Span::styled("a", key_style),
        Span::raw(" Add  "),
        Span::styled("u", key_style),
        Span::raw(" Update  "),
        Span::styled("d", key_style),
        Span::raw(" Delete  "),
        Span::styled("r", key_style),
        Span::raw(" Reload  "),
        Span::styled("?", key_style),
        Span::raw(" Help  "),
        Span::styled("q", key_style),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}
