use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {keys:<10}"), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("Ctrl+C", "Quit from anywhere"),
        Line::from(""),
        section("Movie List"),
        binding("↑/k ↓/j", "Select row"),
        binding("a", "Open or close the ADD form"),
        binding("u/Enter", "Open or close the Update form for the row"),
        binding("d", "Delete the selected movie"),
        binding("r", "Reload the list"),
        Line::from(""),
        section("Form"),
        binding("Tab/↓", "Next field"),
        binding("S-Tab/↑", "Previous field"),
        binding("Enter", "Submit"),
        binding("Esc", "Close without saving"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(
                    Line::from(" Press any key to close ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
