use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub filters: Rect,
    pub stats: Rect,
    pub tabs: Rect,
    pub chart: Rect,
    pub details: Rect,
    pub footer: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(vertical[4]);

    UiAreas {
        size,
        header: vertical[0],
        filters: vertical[1],
        stats: vertical[2],
        tabs: vertical[3],
        chart: main_chunks[0],
        details: main_chunks[1],
        footer: vertical[5],
        status_line: vertical[6],
        command_line: vertical[7],
    }
}

/// Split the stats row into `count` equal cards
pub fn stat_cards(area: Rect, count: usize) -> Rc<[Rect]> {
    let count = count.max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
}

/// Left and right halves of the filter row
pub fn filter_slots(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    (chunks[0], chunks[1])
}
