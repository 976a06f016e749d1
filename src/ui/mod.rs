//! UI rendering module for fxtiers
//!
//! Draws the header (base currency, rate date, loading indicator), the three
//! tier tables side by side and a status line, using ratatui.

pub mod rate_table;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::classify::{Group, Tier};
use crate::report::header_line;

/// Key bindings listed in the help modal
const KEY_BINDINGS: [(&str, &str); 5] = [
    ("←/h", "Previous base currency"),
    ("→/l", "Next base currency"),
    ("r", "Reload rates"),
    ("?", "Toggle this help"),
    ("q/Esc", "Quit"),
];

/// Renders the whole screen for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_tables(frame, chunks[1], app);
    render_status(frame, chunks[2], app);

    if app.show_help {
        render_help(frame);
    }
}

/// Centered modal listing `KEY_BINDINGS`
fn render_help(frame: &mut Frame) {
    let height = KEY_BINDINGS.len() as u16 + 4;
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(42)])
        .flex(Flex::Center)
        .areas(row);

    let mut lines = vec![Line::from(Span::styled(
        "Keyboard Shortcuts",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(KEY_BINDINGS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("{:>6}  ", key), Style::default().fg(Color::Yellow)),
            Span::raw(*action),
        ])
    }));
    lines.push(Line::from(Span::styled(
        "Esc or ? closes",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Base currency selector line plus loading indicator
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    for (i, currency) in app.registry.all().iter().enumerate() {
        let style = if i == app.selected_index {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", currency.code.to_uppercase()), style));
        spans.push(Span::raw(" "));
    }

    if app.loading {
        spans.push(Span::styled(
            " Loading...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let title = match (app.selected_currency(), app.loaded.as_ref()) {
        (Some(currency), Some(loaded)) if loaded.base == currency.code => {
            format!(" {} ", header_line(currency, loaded.date.as_deref()))
        }
        (Some(currency), _) => format!(" {} ", header_line(currency, None)),
        (None, _) => " fxtiers ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// The three tier tables side by side
fn render_tables(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let empty = Group::new();
    for (tier, column) in Tier::ALL.iter().zip(columns.iter()) {
        let group = app
            .loaded
            .as_ref()
            .map(|loaded| loaded.classification.group(*tier))
            .unwrap_or(&empty);
        rate_table::render(frame, *column, *tier, group);
    }
}

/// Failure message or key hints
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "←/→ change currency  r reload  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}
