//! Proportional strip widget, the terminal stand-in for a pie chart

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A horizontal strip split into coloured segments by share of the total
pub struct ShareBar<'a> {
    segments: &'a [(u64, Color)],
    fill: char,
}

impl<'a> ShareBar<'a> {
    pub fn new(segments: &'a [(u64, Color)]) -> Self {
        Self {
            segments,
            fill: '█',
        }
    }
}

impl<'a> Widget for ShareBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.segments.is_empty() {
            return;
        }

        let values: Vec<u64> = self.segments.iter().map(|(v, _)| *v).collect();
        let widths = segment_widths(&values, area.width);

        let mut x = area.x;
        for ((_, color), width) in self.segments.iter().zip(widths) {
            for _ in 0..width {
                for y in area.y..area.y + area.height {
                    buf.get_mut(x, y)
                        .set_char(self.fill)
                        .set_style(Style::default().fg(*color));
                }
                x += 1;
            }
        }
    }
}

/// Split `width` columns across `values` proportionally.
///
/// Uses largest-remainder rounding so the widths always sum to `width`
/// when any value is non-zero.
pub fn segment_widths(values: &[u64], width: u16) -> Vec<u16> {
    let total: u64 = values.iter().sum();
    if total == 0 || values.is_empty() {
        return vec![0; values.len()];
    }

    let width = width as u64;
    let mut widths: Vec<u64> = values.iter().map(|v| v * width / total).collect();
    let assigned: u64 = widths.iter().sum();

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse((values[i] * width) % total));
    for &i in order.iter().take((width - assigned) as usize) {
        widths[i] += 1;
    }

    widths.into_iter().map(|w| w as u16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_widths_sum_to_width() {
        let widths = segment_widths(&[450, 30, 20], 50);
        assert_eq!(widths, vec![45, 3, 2]);
        let widths = segment_widths(&[1, 1, 1], 10);
        assert_eq!(widths.iter().sum::<u16>(), 10);
    }

    #[test]
    fn test_segment_widths_empty() {
        assert!(segment_widths(&[], 8).is_empty());
        assert_eq!(segment_widths(&[0, 0], 8), vec![0, 0]);
    }

    #[test]
    fn test_render_fills_row() {
        let segments = [(3, Color::Green), (1, Color::Red)];
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        ShareBar::new(&segments).render(area, &mut buf);
        assert_eq!(buf.get(0, 0).fg, Color::Green);
        assert_eq!(buf.get(2, 0).fg, Color::Green);
        assert_eq!(buf.get(3, 0).fg, Color::Red);
        assert_eq!(buf.get(3, 0).symbol(), "█");
    }
}
