//! Tab bar rendering and hit-testing

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs as RataTabs};
use ratatui::Frame;

use crate::core::{Tab, ViewState};

const DIVIDER: &str = " │ ";

fn tab_label(tab: Tab) -> String {
    format!("{}:{}", tab.shortcut(), tab.title())
}

/// Draw the tab bar
pub fn draw_tab_bar(f: &mut Frame, area: Rect, view: &ViewState) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", tab.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(tab.title()),
            ])
        })
        .collect();

    let selected = Tab::ALL
        .iter()
        .position(|t| *t == view.active_tab())
        .unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(DIVIDER);

    f.render_widget(tabs, area);
}

/// Tab under a mouse position inside the bordered tab bar at `area`
pub fn tab_at(area: Rect, column: u16, row: u16) -> Option<Tab> {
    if area.width < 3 || area.height < 3 {
        return None;
    }
    let inner_x = area.x + 1;
    let inner_end = area.x + area.width - 1;
    if row != area.y + 1 || column < inner_x || column >= inner_end {
        return None;
    }

    let divider_width = DIVIDER.chars().count() as u16;
    let mut x = inner_x;
    for tab in Tab::ALL {
        // One column of padding on each side of the title
        let width = tab_label(tab).chars().count() as u16 + 2;
        if column >= x && column < x + width {
            return Some(tab);
        }
        x += width + divider_width;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_hit_testing() {
        let area = Rect::new(0, 10, 80, 3);
        // "1:Performance" plus padding spans columns 1..16
        assert_eq!(tab_at(area, 1, 11), Some(Tab::Performance));
        assert_eq!(tab_at(area, 15, 11), Some(Tab::Performance));
        assert_eq!(tab_at(area, 17, 11), None);
        assert_eq!(tab_at(area, 19, 11), Some(Tab::Attendance));
        assert_eq!(tab_at(area, 60, 11), Some(Tab::Grades));
        assert_eq!(tab_at(area, 70, 11), None);
    }

    #[test]
    fn test_tab_hit_outside_row() {
        let area = Rect::new(0, 10, 80, 3);
        assert_eq!(tab_at(area, 5, 10), None);
        assert_eq!(tab_at(area, 5, 12), None);
        assert_eq!(tab_at(area, 0, 11), None);
    }
}
