//! Chart panel rendering for the active view

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, LegendPosition,
    Paragraph,
};
use ratatui::Frame;

use crate::core::{ActiveView, BarLayout, ChartKind};
use crate::data::share_percent;
use crate::ui::widgets::ShareBar;

const AXIS_COLOR: Color = Color::Rgb(0x6b, 0x72, 0x80);

/// Smallest inner area that still fits both axes and a plot
const MIN_PLOT_WIDTH: u16 = 20;
const MIN_PLOT_HEIGHT: u16 = 6;

/// Parse a `#rrggbb` colour, falling back to white
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Color::White;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

/// Axis bounds padded to the nearest multiple of five around `values`
pub fn value_bounds(values: impl IntoIterator<Item = u32>) -> [f64; 2] {
    let mut min = u32::MAX;
    let mut max = 0;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if min > max {
        return [0.0, 1.0];
    }
    let lower = (min.saturating_sub(1) / 5) * 5;
    let upper = (max / 5 + 1) * 5;
    [lower as f64, upper as f64]
}

pub fn draw_chart(f: &mut Frame, area: Rect, view: &ActiveView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", view.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));

    match view.chart {
        ChartKind::Line => draw_line_chart(f, area, block, view),
        ChartKind::Pie => draw_share_chart(f, area, block, view),
        ChartKind::Bar { layout } => draw_bar_chart(f, area, block, view, layout),
    }
}

fn draw_line_chart(f: &mut Frame, area: Rect, block: Block, view: &ActiveView) {
    let inner = block.inner(area);
    if inner.width < MIN_PLOT_WIDTH || inner.height < MIN_PLOT_HEIGHT {
        f.render_widget(block, area);
        return;
    }

    let categories = view.dataset.categories();
    let points: Vec<Vec<(f64, f64)>> = view
        .config
        .series
        .iter()
        .map(|series| {
            view.dataset
                .values(series.key)
                .into_iter()
                .enumerate()
                .map(|(i, (_, value))| (i as f64, value as f64))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = view
        .config
        .series
        .iter()
        .zip(points.iter())
        .map(|(series, data)| {
            Dataset::default()
                .name(series.key)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(hex_color(series.color)))
                .data(data)
        })
        .collect();

    let [y_min, y_max] = value_bounds(
        points
            .iter()
            .flatten()
            .map(|(_, value)| *value as u32),
    );
    let y_labels: Vec<Span> = [y_min, (y_min + y_max) / 2.0, y_max]
        .iter()
        .map(|value| Span::styled(format!("{value:.0}"), Style::default().fg(AXIS_COLOR)))
        .collect();
    let x_labels: Vec<Span> = categories
        .iter()
        .map(|label| Span::styled(*label, Style::default().fg(AXIS_COLOR)))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        .x_axis(
            Axis::default()
                .title(view.config.category_key)
                .style(Style::default().fg(AXIS_COLOR))
                .bounds([0.0, categories.len().saturating_sub(1).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(AXIS_COLOR))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn draw_share_chart(f: &mut Frame, area: Rect, block: Block, view: &ActiveView) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let series = view.config.series.first();
    let values = view.dataset.values(series.map(|s| s.key).unwrap_or_default());
    let fallback = series.map(|s| hex_color(s.color)).unwrap_or(Color::White);
    let colors: Vec<Color> = match view.dataset.record_colors() {
        Some(colors) => colors.into_iter().map(hex_color).collect(),
        None => vec![fallback; values.len()],
    };
    let total: u32 = values.iter().map(|(_, v)| v).sum();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let segments: Vec<(u64, Color)> = values
        .iter()
        .zip(colors.iter())
        .map(|((_, value), color)| (*value as u64, *color))
        .collect();
    f.render_widget(ShareBar::new(&segments), chunks[1]);

    let legend: Vec<Line> = values
        .iter()
        .zip(colors.iter())
        .map(|((label, value), color)| {
            let share = share_percent(*value, total);
            Line::from(vec![
                Span::styled(" ● ", Style::default().fg(*color)),
                Span::styled(format!("{label}: {value}"), Style::default().fg(Color::White)),
                Span::styled(format!("  {share:.1}%"), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(legend), chunks[3]);
}

fn draw_bar_chart(f: &mut Frame, area: Rect, block: Block, view: &ActiveView, layout: BarLayout) {
    let series = view.config.series.first();
    let values = view.dataset.values(series.map(|s| s.key).unwrap_or_default());
    let color = series.map(|s| hex_color(s.color)).unwrap_or(Color::White);

    let bars: Vec<Bar> = values
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .value(*value as u64)
                .label(Line::from(*label))
                .text_value(value.to_string())
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let inner = block.inner(area);
    let label_width = values
        .iter()
        .map(|(label, _)| label.chars().count() as u16)
        .max()
        .unwrap_or(0);
    if !bars_fit(inner, layout, label_width) {
        f.render_widget(block, area);
        return;
    }

    let count = bars.len().max(1) as u16;
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .label_style(Style::default().fg(AXIS_COLOR));

    let chart = match layout {
        BarLayout::Vertical => {
            let gap = 2;
            let width = (inner.width / count).saturating_sub(gap).max(1);
            chart
                .direction(Direction::Vertical)
                .bar_width(width)
                .bar_gap(gap)
        }
        BarLayout::Horizontal => {
            let gap = 1;
            let width = (inner.height / count).saturating_sub(gap).max(1);
            chart
                .direction(Direction::Horizontal)
                .bar_width(width)
                .bar_gap(gap)
        }
    };

    f.render_widget(chart, area);
}

/// Horizontal bars need a label column, a one-cell margin and at least one
/// cell of bar; ratatui panics when the inner area is narrower than that.
/// Vertical bars need a row each for bar, value and label.
fn bars_fit(inner: Rect, layout: BarLayout, label_width: u16) -> bool {
    if inner.width == 0 || inner.height == 0 {
        return false;
    }
    match layout {
        BarLayout::Vertical => inner.height >= 3,
        BarLayout::Horizontal => inner.width > label_width + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#3b82f6"), Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(hex_color("10b981"), Color::Rgb(0x10, 0xb9, 0x81));
        assert_eq!(hex_color("#zzzzzz"), Color::White);
        assert_eq!(hex_color("#fff"), Color::White);
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds([78, 96]), [75.0, 100.0]);
        assert_eq!(value_bounds([85, 90]), [80.0, 95.0]);
        assert_eq!(value_bounds(Vec::new()), [0.0, 1.0]);
    }

    #[test]
    fn test_horizontal_bars_need_room_for_labels() {
        let horizontal = BarLayout::Horizontal;
        assert!(!bars_fit(Rect::new(0, 0, 7, 5), horizontal, 7));
        assert!(!bars_fit(Rect::new(0, 0, 8, 5), horizontal, 7));
        assert!(bars_fit(Rect::new(0, 0, 9, 5), horizontal, 7));
        assert!(!bars_fit(Rect::new(0, 0, 40, 0), horizontal, 7));
        assert!(bars_fit(Rect::new(0, 0, 1, 3), BarLayout::Vertical, 7));
        assert!(!bars_fit(Rect::new(0, 0, 1, 2), BarLayout::Vertical, 7));
        assert!(!bars_fit(Rect::new(0, 0, 0, 5), BarLayout::Vertical, 7));
    }
}
