//! Memory grid pane
//!
//! Draws one region of a [`Diagram`] as a column of boxes:
//!
//! ```text
//! ┌ Runtime Stack ──────────────────────────┐
//! │     0 │     empty     │ main stack pointer│
//! │     1 │       5       │ main.x            │
//! │       │      ...      │                   │
//! │     5 │      99       │ main.y            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The owner column is only drawn when the diagram's density shows labels.

use crate::layout::diagram::{Diagram, StyleToken};
use crate::layout::{Region, Row};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

const ADDRESS_COLUMNS: usize = 6;
const CONTENT_COLUMNS: usize = 15;

/// Scroll state for a memory pane
#[derive(Debug, Default, Clone, Copy)]
pub struct GridScrollState {
    pub offset: usize,
}

impl GridScrollState {
    /// Shift the window so `selected` is visible
    pub fn follow(&mut self, selected: Option<usize>, visible: usize, total: usize) {
        if let Some(row) = selected {
            if row < self.offset {
                self.offset = row;
            } else if row >= self.offset + visible {
                self.offset = row + 1 - visible;
            }
        }
        self.offset = self.offset.min(total.saturating_sub(visible));
    }
}

/// Data needed to render one region
pub struct GridRenderData<'a> {
    pub diagram: &'a Diagram,
    pub region: Region,
    /// Stroke token for each row, hover included
    pub row_styles: &'a [StyleToken],
}

pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    data: GridRenderData,
    is_focused: bool,
    selected: Option<usize>,
    scroll_state: &mut GridScrollState,
) {
    let background = DEFAULT_THEME.token(data.diagram.background());
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", data.region.title()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(background));

    let grid = data.diagram.grid(data.region);
    let shows_labels = data.diagram.shows_labels();

    let all_items: Vec<ListItem> = if grid.rows.is_empty() {
        vec![ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment))]
    } else {
        grid.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let token = data
                    .row_styles
                    .get(index)
                    .copied()
                    .unwrap_or_else(|| data.diagram.foreground());
                let stroke = DEFAULT_THEME.token(token);
                let mut style = Style::default().fg(stroke);
                if selected == Some(index) {
                    style = style.add_modifier(Modifier::BOLD);
                }
                ListItem::new(row_line(row, shows_labels, style))
            })
            .collect()
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    scroll_state.follow(selected, visible_height, all_items.len());

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

fn row_line(row: &Row, shows_labels: bool, style: Style) -> Line<'static> {
    let address = row
        .address()
        .map(|addr| format!("{:>width$}", addr, width = ADDRESS_COLUMNS))
        .unwrap_or_else(|| " ".repeat(ADDRESS_COLUMNS));

    let mut spans = vec![
        Span::styled(address, style),
        Span::styled(" │", style),
        Span::styled(
            format!("{:^width$}", row.content(), width = CONTENT_COLUMNS),
            style,
        ),
        Span::styled("│", style),
    ];

    if shows_labels {
        if let Some(cell) = row.as_cell() {
            spans.push(Span::styled(format!(" {}", cell.annotation.label), style));
        }
    }

    Line::from(spans)
}
