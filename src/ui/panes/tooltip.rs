//! Hover tooltip and intro panes

use crate::session::Tooltip;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Shown until the first snapshot arrives
pub const INTRO_TEXT: &str = "No program state to show yet.\n\n\
Pause a program at a breakpoint, or start memviz with a snapshot file,\n\
to see its runtime stack and heap laid out cell by cell.";

pub fn render_tooltip_pane(frame: &mut Frame, area: Rect, tooltip: Option<&Tooltip>) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let paragraph = match tooltip {
        Some(tooltip) => {
            let lines: Vec<Line> = tooltip
                .text
                .lines()
                .map(|line| Line::from(Span::raw(line.to_string())))
                .collect();
            Paragraph::new(lines).style(Style::default().fg(DEFAULT_THEME.sa_white))
        }
        None => Paragraph::new("Select a row with ↑/↓ to inspect it")
            .style(Style::default().fg(DEFAULT_THEME.comment)),
    };

    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

pub fn render_intro_pane(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" memviz ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(2, 2, 1, 0));

    let paragraph = Paragraph::new(INTRO_TEXT)
        .block(block)
        .style(
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::ITALIC),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
