//! Status bar rendering with keybindings and mode indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub snapshot_id: Option<u64>,
    pub compact: bool,
    pub printable: bool,
    pub is_error: bool,
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let snapshot_text = match data.snapshot_id {
        Some(id) => format!(" Snapshot #{} ", id),
        None => " No snapshot ".to_string(),
    };

    let left_spans = vec![
        Span::styled(
            snapshot_text,
            Style::default()
                .bg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.sa_white
                }),
        ),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(DEFAULT_THEME.status_bg))
            .alignment(Alignment::Left),
        layout[0],
    );

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.sa_white);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.comment);
    let mode_style = Style::default()
        .bg(DEFAULT_THEME.secondary)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    let right_spans = vec![
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" select ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ⇥ ", key_style),
        Span::styled(" region ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" c ", key_style),
        Span::styled(" density ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" p ", key_style),
        Span::styled(" print ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" r ", key_style),
        Span::styled(" reload ", desc_style),
        Span::styled("│", sep_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(if data.compact { " COMPACT " } else { " FULL " }, mode_style),
        Span::styled(if data.printable { " PRINT " } else { " DARK " }, mode_style),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(Style::default().bg(DEFAULT_THEME.status_bg))
            .alignment(Alignment::Right),
        layout[1],
    );
}
