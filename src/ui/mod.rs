use chrono::Local;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod charts;
pub mod layout;
pub mod tabs;
pub mod widgets;

use crate::app::{App, InputMode, StatusLevel};
use crate::core::{ActiveView, Tab};
use crate::data::{share_percent, Accent, MetricDataset, SummaryStat, SUMMARY_STATS};
use crate::modules::filters::FilterField;

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());
    let view = app.view.active_view();

    draw_header(f, areas.header);
    draw_filters(f, areas.filters, app);
    draw_stats(f, areas.stats);
    tabs::draw_tab_bar(f, areas.tabs, &app.view);
    charts::draw_chart(f, areas.chart, view);
    draw_detail_panel(f, areas.details, view);
    draw_footer(f, areas.footer);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.filter_bar.is_open() {
        draw_filter_dropdown(f, areas.filters, app);
    }
    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let title = Text::from(vec![
        Line::from(Span::styled(
            "EdFloor Analytics Dashboard",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Real-time student performance insights",
            Style::default().fg(Color::Gray),
        )),
    ]);
    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let buttons = Text::from(vec![
        Line::from(vec![
            Span::styled(" p ", Style::default().fg(Color::White).bg(Color::Red)),
            Span::raw(" Export PDF  "),
            Span::styled(" v ", Style::default().fg(Color::White).bg(Color::Green)),
            Span::raw(" Export CSV"),
        ]),
        Line::from(Span::styled(
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    let right = Paragraph::new(buttons)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Right);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn filter_line(title: &str, value: &str, active: bool) -> Line<'static> {
    let value_style = if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightBlue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{title} "), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("[{value} ▾]"), value_style),
    ])
}

fn draw_filters(f: &mut Frame, area: Rect, app: &App) {
    let (left, right) = layout::filter_slots(area);
    let open_field = app.filter_bar.is_open().then(|| app.filter_bar.field());

    let class = Paragraph::new(filter_line(
        FilterField::Class.title(),
        app.view.selected_class().label(),
        open_field == Some(FilterField::Class),
    ))
    .block(Block::default().borders(Borders::ALL).title("f: Filters"));
    let range = Paragraph::new(filter_line(
        FilterField::Range.title(),
        app.view.date_range().label(),
        open_field == Some(FilterField::Range),
    ))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(class, left);
    f.render_widget(range, right);
}

fn draw_filter_dropdown(f: &mut Frame, filters_area: Rect, app: &App) {
    let (left, right) = layout::filter_slots(filters_area);
    let field = app.filter_bar.field();
    let anchor = match field {
        FilterField::Class => left,
        FilterField::Range => right,
    };
    let options = field.options();
    let height = (options.len() as u16 + 2).min(f.size().height.saturating_sub(anchor.bottom()));
    let popup = Rect {
        x: anchor.x + 1,
        y: anchor.bottom(),
        width: anchor.width.saturating_sub(2).min(28),
        height,
    };
    if popup.height < 3 || popup.width == 0 {
        return;
    }
    f.render_widget(Clear, popup);

    let items: Vec<ListItem> = options.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightBlue))
                .title(field.title()),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.filter_bar.highlighted()));
    f.render_stateful_widget(list, popup, &mut state);
}

fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Blue => Color::Rgb(0x3b, 0x82, 0xf6),
        Accent::Green => Color::Rgb(0x22, 0xc5, 0x5e),
        Accent::Purple => Color::Rgb(0xa8, 0x55, 0xf7),
        Accent::Orange => Color::Rgb(0xf9, 0x73, 0x16),
    }
}

fn stat_card(stat: &SummaryStat) -> Paragraph<'static> {
    let color = accent_color(stat.accent);
    let lines = vec![
        Line::from(vec![
            Span::styled(stat.label, Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(stat.change, Style::default().fg(Color::LightGreen)),
        ]),
        Line::from(Span::styled(
            stat.value,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
}

fn draw_stats(f: &mut Frame, area: Rect) {
    let cards = layout::stat_cards(area, SUMMARY_STATS.len());
    for (stat, card) in SUMMARY_STATS.iter().zip(cards.iter()) {
        f.render_widget(stat_card(stat), *card);
    }
}

fn draw_detail_panel(f: &mut Frame, area: Rect, view: &ActiveView) {
    let (title, accent) = match view.tab {
        Tab::Performance => ("Key Insights", Color::LightBlue),
        Tab::Attendance => ("Attendance", Color::LightGreen),
        Tab::Comparison => ("Class Scores", Color::LightMagenta),
        Tab::Grades => ("Grade Summary", Color::LightGreen),
    };

    let mut lines = insight_lines(view, accent);
    let rows = dataset_lines(&view.dataset, accent);
    if !rows.is_empty() {
        lines.push(Line::default());
        lines.extend(rows);
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn insight_lines(view: &ActiveView, color: Color) -> Vec<Line<'static>> {
    view.insights
        .iter()
        .map(|text| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(color)),
                Span::raw(*text),
            ])
        })
        .collect()
}

/// Per-record rows for the view's dataset; the line chart already shows
/// every performance value, so that dataset adds none.
fn dataset_lines(dataset: &MetricDataset, accent: Color) -> Vec<Line<'static>> {
    let bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    match dataset {
        MetricDataset::Performance(_) => Vec::new(),
        MetricDataset::Attendance(_) => {
            let values = dataset.values("");
            let total: u32 = values.iter().map(|(_, value)| value).sum();
            let colors = dataset.record_colors().unwrap_or_default();
            values
                .iter()
                .enumerate()
                .map(|(i, (name, value))| {
                    let color = colors
                        .get(i)
                        .map(|hex| charts::hex_color(hex))
                        .unwrap_or(accent);
                    Line::from(vec![
                        Span::styled("● ", Style::default().fg(color)),
                        Span::styled(format!("{name:<8}"), Style::default().fg(Color::Gray)),
                        Span::styled(format!("{value:>5}"), bold),
                        Span::styled(
                            format!("  {:.1}%", share_percent(*value, total)),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ])
                })
                .collect()
        }
        MetricDataset::Comparison(_) => dataset
            .values("")
            .into_iter()
            .map(|(class, score)| {
                Line::from(vec![
                    Span::styled(format!("{class:<9}"), Style::default().fg(Color::Gray)),
                    Span::styled(format!("{score:>3}"), bold.fg(accent)),
                    Span::styled("  Avg Score", Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect(),
        MetricDataset::Grades(_) => dataset
            .values("")
            .into_iter()
            .map(|(grade, students)| {
                Line::from(vec![
                    Span::styled(format!("{students:>4}"), bold.fg(accent)),
                    Span::styled(format!("  Grade {grade}"), Style::default().fg(Color::Gray)),
                ])
            })
            .collect(),
    }
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        "Built with ratatui | Terminal data visualization",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let view = app.view.active_view();
    let spans = vec![
        Span::styled("Tab ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.view.active_tab().title())),
        Span::styled("Chart ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", view.chart.name())),
        Span::styled("Class ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.view.selected_class().label())),
        Span::styled("Range ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.view.date_range().label()),
    ];

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("tab", "Switch tab: performance|attendance|comparison|grades"),
        ("class", "Class filter: all|a|b|c"),
        ("range", "Date range: 5m|3m|1m|year"),
        ("export", "Export report: pdf|csv"),
        ("help", "Toggle help"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) || input.starts_with(cmd) {
            return Some(desc);
        }
    }
    None
}

fn action_hints() -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));
    Line::from(vec![
        key("1-4"),
        text(" tab  "),
        key("Tab"),
        text(" next  "),
        key("f"),
        text(" filters  "),
        key("p/v"),
        text(" export  "),
        key(":"),
        text(" command  "),
        key("?"),
        text(" help  "),
        key("q"),
        text(" quit"),
    ])
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input).unwrap_or("tab | class | range | export");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.clone()),
                Span::styled(format!("  {hint}"), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Filter => Line::from(Span::styled(
            "j/k move  Tab switch  Enter apply  Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text.to_string(), Style::default().fg(color)),
                ])
            } else {
                action_hints()
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-4          Jump to tab"),
        Line::from("  Tab / l      Next tab"),
        Line::from("  S-Tab / h    Previous tab"),
        Line::from("  Mouse        Click a tab"),
        Line::from(""),
        Line::from("Filters"),
        Line::from("  f            Open filter dropdowns"),
        Line::from("  c / C        Cycle class"),
        Line::from("  d / D        Cycle date range"),
        Line::from(""),
        Line::from("Reports"),
        Line::from("  p            Export PDF"),
        Line::from("  v            Export CSV"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :tab grades  :class b  :range 3m  :export csv"),
        Line::from(""),
        Line::from("  ?            Toggle help"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from(format!("Active tab: {}", app.view.active_tab().title())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_hint() {
        assert_eq!(
            command_hint("ex"),
            Some("Export report: pdf|csv")
        );
        assert_eq!(command_hint("class b"), Some("Class filter: all|a|b|c"));
        assert_eq!(command_hint(""), None);
        assert_eq!(command_hint("zzz"), None);
    }
}
