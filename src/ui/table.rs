use crate::movie::Movie;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Row, Table, TableState},
};

pub const COLUMNS: [&str; 6] = ["ID", "Title", "Director", "IMDb", "Hollywood", "Bollywood"];

const WIDTHS: [Constraint; 7] = [
    Constraint::Length(6),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Length(6),
    Constraint::Length(10),
    Constraint::Length(10),
    Constraint::Length(20),
];

/// The six displayed fields of one movie, as text.
pub fn row_cells(movie: &Movie) -> [String; 6] {
    [
        movie.id_text(),
        movie.title.clone(),
        movie.director.clone(),
        movie.imdb_text(),
        movie.hollywood.clone(),
        movie.bollywood.clone(),
    ]
}

fn movie_row(movie: &Movie, updating: bool) -> Row<'static> {
    let actions = if updating {
        Line::styled("[d]elete ▸ Update", Style::default().fg(Color::Yellow))
    } else {
        Line::styled("[d]elete [u]pdate", Style::default().fg(Color::DarkGray))
    };
    let mut cells: Vec<Line> = row_cells(movie).into_iter().map(Line::from).collect();
    cells.push(actions);
    Row::new(cells)
}

/// Render the movie table. `updating(i)` reports whether row `i` has its
/// update popover open.
pub fn render(
    movies: &[Movie],
    selected: usize,
    updating: impl Fn(usize) -> bool,
    frame: &mut Frame,
    area: Rect,
) {
    let header = Row::new(COLUMNS).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    // Rows are keyed by position
    let rows: Vec<Row> = movies
        .iter()
        .enumerate()
        .map(|(i, movie)| movie_row(movie, updating(i)))
        .collect();

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Movie List "),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    if !movies.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
