//! Rate group table
//!
//! One bordered table per tier: `PAIR | RATE` rows ascending by rate, with the
//! near-parity count in the footer.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::classify::{is_near_parity, Group, Tier};
use crate::report::table_rows;

/// Border color per tier
fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Group1 => Color::Cyan,
        Tier::Group2 => Color::Green,
        Tier::Group3 => Color::Yellow,
    }
}

/// Renders a group as a table into `area`
pub fn render(frame: &mut Frame, area: Rect, tier: Tier, group: &Group) {
    let near_parity_style = Style::default().add_modifier(Modifier::BOLD);

    let rows: Vec<Row> = group
        .sorted()
        .iter()
        .zip(table_rows(group))
        .map(|((_, value), (label, rate))| {
            let style = if is_near_parity(*value) {
                near_parity_style
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(label), Cell::from(rate)]).style(style)
        })
        .collect();

    let header = Row::new(vec!["Pair", "Rate"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let footer = Row::new(vec![
        Cell::from("Near parity"),
        Cell::from(group.near_parity_count().to_string()),
    ])
    .style(Style::default().fg(tier_color(tier)));

    let block = Block::default()
        .title(format!(" {} ", tier.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tier_color(tier)));

    let table = Table::new(rows, [Constraint::Min(11), Constraint::Length(10)])
        .header(header)
        .footer(footer)
        .block(block);

    frame.render_widget(table, area);
}
