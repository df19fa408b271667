use super::centered_rect;
use crate::form::MovieForm;
use crate::movie::Field;
use crate::popover::Popover;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: u16 = 12;

/// Render an open popover and its form as a centered overlay.
pub fn render(popover: &Popover, frame: &mut Frame) {
    let Some(form) = popover.form() else {
        return;
    };
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", popover.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(Field::ALL.len() as u16),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let heading = Paragraph::new("Movie Details")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    if !form.error_msg().is_empty() {
        let alert = Paragraph::new(format!("✖ {}", form.error_msg()))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(alert, chunks[1]);
    }

    render_fields(form, frame, chunks[2]);

    let help = Paragraph::new("Enter: Submit | Tab: Next field | Esc: Close")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn render_fields(form: &MovieForm, frame: &mut Frame, area: Rect) {
    let input = form.input();
    let lines: Vec<Line> = Field::ALL
        .iter()
        .map(|&field| {
            let focused = field == form.focused();
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let value = input.get(field);
            let value_span = if value.is_empty() {
                Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(value, Style::default().fg(Color::White))
            };
            let label = format!("{}:", field.label());
            let width = LABEL_WIDTH as usize - 1;
            Line::from(vec![
                Span::styled(format!("{label:>width$} "), label_style),
                value_span,
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    let row = Field::ALL
        .iter()
        .position(|&f| f == form.focused())
        .unwrap_or(0) as u16;
    let value_width = input.get(form.focused()).width() as u16;
    let cursor_x = (area.x + LABEL_WIDTH + value_width).min(area.right().saturating_sub(1));
    frame.set_cursor_position((cursor_x, area.y + row));
}
