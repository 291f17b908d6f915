//! View-state controller: active tab, filter selections and the derived view

use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::data::{
    MetricDataset, ATTENDANCE, CLASS_COMPARISON, GRADE_DISTRIBUTION, PERFORMANCE,
};
use crate::error::DashboardError;

/// Main tabs of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Performance,
    Attendance,
    Comparison,
    Grades,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Performance, Tab::Attendance, Tab::Comparison, Tab::Grades];

    /// Key used on the command line and in config files
    pub fn key(&self) -> &'static str {
        match self {
            Tab::Performance => "performance",
            Tab::Attendance => "attendance",
            Tab::Comparison => "comparison",
            Tab::Grades => "grades",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Performance => "Performance",
            Tab::Attendance => "Attendance",
            Tab::Comparison => "Comparison",
            Tab::Grades => "Grades",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Performance => '1',
            Tab::Attendance => '2',
            Tab::Comparison => '3',
            Tab::Grades => '4',
        }
    }

    pub fn from_shortcut(ch: char) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.shortcut() == ch)
    }
}

impl FromStr for Tab {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "performance" | "perf" => Ok(Tab::Performance),
            "attendance" | "att" => Ok(Tab::Attendance),
            "comparison" | "cmp" | "compare" => Ok(Tab::Comparison),
            "grades" | "grade" => Ok(Tab::Grades),
            _ => Err(DashboardError::invalid("tab", value)),
        }
    }
}

/// Class dropdown options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassFilter {
    #[serde(rename = "All Classes")]
    AllClasses,
    #[serde(rename = "Class A")]
    ClassA,
    #[serde(rename = "Class B")]
    ClassB,
    #[serde(rename = "Class C")]
    ClassC,
}

impl ClassFilter {
    pub const ALL: [ClassFilter; 4] = [
        ClassFilter::AllClasses,
        ClassFilter::ClassA,
        ClassFilter::ClassB,
        ClassFilter::ClassC,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClassFilter::AllClasses => "All Classes",
            ClassFilter::ClassA => "Class A",
            ClassFilter::ClassB => "Class B",
            ClassFilter::ClassC => "Class C",
        }
    }
}

impl FromStr for ClassFilter {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "all classes" | "all" => Ok(ClassFilter::AllClasses),
            "class a" | "a" => Ok(ClassFilter::ClassA),
            "class b" | "b" => Ok(ClassFilter::ClassB),
            "class c" | "c" => Ok(ClassFilter::ClassC),
            _ => Err(DashboardError::invalid("class", value)),
        }
    }
}

/// Date-range dropdown options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateRange {
    #[serde(rename = "Last 5 Months")]
    LastFiveMonths,
    #[serde(rename = "Last 3 Months")]
    LastThreeMonths,
    #[serde(rename = "Last Month")]
    LastMonth,
    #[serde(rename = "This Year")]
    ThisYear,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::LastFiveMonths,
        DateRange::LastThreeMonths,
        DateRange::LastMonth,
        DateRange::ThisYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::LastFiveMonths => "Last 5 Months",
            DateRange::LastThreeMonths => "Last 3 Months",
            DateRange::LastMonth => "Last Month",
            DateRange::ThisYear => "This Year",
        }
    }
}

impl FromStr for DateRange {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "last 5 months" | "5m" => Ok(DateRange::LastFiveMonths),
            "last 3 months" | "3m" => Ok(DateRange::LastThreeMonths),
            "last month" | "1m" => Ok(DateRange::LastMonth),
            "this year" | "year" | "ytd" => Ok(DateRange::ThisYear),
            _ => Err(DashboardError::invalid("date range", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarLayout {
    Vertical,
    Horizontal,
}

/// Chart family used to draw a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Pie,
    Bar { layout: BarLayout },
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Bar { .. } => "bar",
        }
    }
}

/// One plotted value column and its colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesSpec {
    pub key: &'static str,
    pub color: &'static str,
}

/// Axis and series mapping for a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartConfig {
    /// Record field holding the category label
    pub category_key: &'static str,
    pub series: &'static [SeriesSpec],
}

/// Everything the renderer needs for one tab
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActiveView {
    pub tab: Tab,
    pub title: &'static str,
    pub dataset: MetricDataset,
    pub chart: ChartKind,
    pub config: ChartConfig,
    pub insights: &'static [&'static str],
}

const SUBJECT_SERIES: [SeriesSpec; 4] = [
    SeriesSpec { key: "Math", color: "#3b82f6" },
    SeriesSpec { key: "Science", color: "#10b981" },
    SeriesSpec { key: "English", color: "#f59e0b" },
    SeriesSpec { key: "History", color: "#8b5cf6" },
];

static PERFORMANCE_VIEW: ActiveView = ActiveView {
    tab: Tab::Performance,
    title: "Subject-wise Performance Trends",
    dataset: MetricDataset::Performance(&PERFORMANCE),
    chart: ChartKind::Line,
    config: ChartConfig {
        category_key: "month",
        series: &SUBJECT_SERIES,
    },
    insights: &[
        "Math scores improved by 10 points over 5 months",
        "English maintains consistently high performance (90+)",
        "Science shows steady upward trend (+13 points)",
    ],
};

// Slice colours come from the attendance records themselves.
static ATTENDANCE_VIEW: ActiveView = ActiveView {
    tab: Tab::Attendance,
    title: "Attendance Distribution",
    dataset: MetricDataset::Attendance(&ATTENDANCE),
    chart: ChartKind::Pie,
    config: ChartConfig {
        category_key: "name",
        series: &[SeriesSpec { key: "value", color: "#8884d8" }],
    },
    insights: &["Share of 500 recorded student-days by attendance status"],
};

static COMPARISON_VIEW: ActiveView = ActiveView {
    tab: Tab::Comparison,
    title: "Class-wise Average Score Comparison",
    dataset: MetricDataset::Comparison(&CLASS_COMPARISON),
    chart: ChartKind::Bar {
        layout: BarLayout::Vertical,
    },
    config: ChartConfig {
        category_key: "class",
        series: &[SeriesSpec { key: "avgScore", color: "#8b5cf6" }],
    },
    insights: &["Average score per class across all subjects"],
};

static GRADES_VIEW: ActiveView = ActiveView {
    tab: Tab::Grades,
    title: "Grade Distribution",
    dataset: MetricDataset::Grades(&GRADE_DISTRIBUTION),
    chart: ChartKind::Bar {
        layout: BarLayout::Horizontal,
    },
    config: ChartConfig {
        category_key: "grade",
        series: &[SeriesSpec { key: "students", color: "#10b981" }],
    },
    insights: &["Grade Summary: students per final grade"],
};

/// Static view table, keyed by tab
pub fn view_for(tab: Tab) -> &'static ActiveView {
    match tab {
        Tab::Performance => &PERFORMANCE_VIEW,
        Tab::Attendance => &ATTENDANCE_VIEW,
        Tab::Comparison => &COMPARISON_VIEW,
        Tab::Grades => &GRADES_VIEW,
    }
}

/// Selected tab and filters for one dashboard view.
///
/// The filters are recorded but never narrow a dataset: `active_view`
/// depends on the tab alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    active_tab: Tab,
    selected_class: ClassFilter,
    date_range: DateRange,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Performance,
            selected_class: ClassFilter::AllClasses,
            date_range: DateRange::LastFiveMonths,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn selected_class(&self) -> ClassFilter {
        self.selected_class
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Select a tab by name. Unknown names leave the current tab in place.
    pub fn set_active_tab(&mut self, value: &str) -> Result<(), DashboardError> {
        let tab = value.parse::<Tab>().inspect_err(|err| warn!("{err}"))?;
        self.select_tab(tab);
        Ok(())
    }

    pub fn set_selected_class(&mut self, value: &str) -> Result<(), DashboardError> {
        let class = value.parse::<ClassFilter>().inspect_err(|err| warn!("{err}"))?;
        self.select_class(class);
        Ok(())
    }

    pub fn set_date_range(&mut self, value: &str) -> Result<(), DashboardError> {
        let range = value.parse::<DateRange>().inspect_err(|err| warn!("{err}"))?;
        self.select_date_range(range);
        Ok(())
    }

    /// Apply a startup selection all at once: every value is validated
    /// before any is applied, so an error leaves the state untouched.
    pub fn apply_selection(
        &mut self,
        tab: Option<&str>,
        class: Option<&str>,
        range: Option<&str>,
    ) -> Result<(), DashboardError> {
        let tab = tab.map(str::parse::<Tab>).transpose()?;
        let class = class.map(str::parse::<ClassFilter>).transpose()?;
        let range = range.map(str::parse::<DateRange>).transpose()?;
        if let Some(tab) = tab {
            self.select_tab(tab);
        }
        if let Some(class) = class {
            self.select_class(class);
        }
        if let Some(range) = range {
            self.select_date_range(range);
        }
        Ok(())
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            debug!(from = self.active_tab.key(), to = tab.key(), "tab changed");
        }
        self.active_tab = tab;
    }

    pub fn select_class(&mut self, class: ClassFilter) {
        debug!(class = class.label(), "class filter selected");
        self.selected_class = class;
    }

    pub fn select_date_range(&mut self, range: DateRange) {
        debug!(range = range.label(), "date range selected");
        self.date_range = range;
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        self.select_tab(cycle(&Tab::ALL, self.active_tab, forward));
    }

    pub fn cycle_class(&mut self, forward: bool) {
        self.select_class(cycle(&ClassFilter::ALL, self.selected_class, forward));
    }

    pub fn cycle_date_range(&mut self, forward: bool) {
        self.select_date_range(cycle(&DateRange::ALL, self.date_range, forward));
    }

    /// Dataset, chart and insight text for the active tab
    pub fn active_view(&self) -> &'static ActiveView {
        view_for(self.active_tab)
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ViewState::new();
        assert_eq!(state.active_tab(), Tab::Performance);
        assert_eq!(state.selected_class(), ClassFilter::AllClasses);
        assert_eq!(state.date_range(), DateRange::LastFiveMonths);
    }

    #[test]
    fn test_view_table_is_total() {
        for tab in Tab::ALL {
            let view = view_for(tab);
            assert_eq!(view.tab, tab);
            assert!(!view.title.is_empty());
            assert!(!view.dataset.is_empty());
            assert!(!view.config.series.is_empty());
            assert!(!view.insights.is_empty());
        }
    }

    #[test]
    fn test_attendance_view() {
        let mut state = ViewState::new();
        state.set_active_tab("attendance").unwrap();
        let view = state.active_view();
        assert_eq!(view.chart, ChartKind::Pie);
        let MetricDataset::Attendance(rows) = view.dataset else {
            panic!("expected attendance dataset");
        };
        let pairs: Vec<(&str, u32)> = rows.iter().map(|r| (r.name, r.value)).collect();
        assert_eq!(pairs, vec![("Present", 450), ("Absent", 30), ("Leave", 20)]);
    }

    #[test]
    fn test_rejected_tab_keeps_state() {
        let mut state = ViewState::new();
        state.select_tab(Tab::Grades);
        let err = state.set_active_tab("bogus").unwrap_err();
        assert_eq!(
            err,
            DashboardError::InvalidSelection {
                field: "tab",
                value: "bogus".to_string()
            }
        );
        assert_eq!(state.active_tab(), Tab::Grades);
    }

    #[test]
    fn test_rejected_filters_keep_state() {
        let mut state = ViewState::new();
        state.select_class(ClassFilter::ClassB);
        assert!(state.set_selected_class("Class Z").is_err());
        assert!(state.set_date_range("Last Decade").is_err());
        assert_eq!(state.selected_class(), ClassFilter::ClassB);
        assert_eq!(state.date_range(), DateRange::LastFiveMonths);
    }

    #[test]
    fn test_parse_labels_and_aliases() {
        assert_eq!("Class A".parse::<ClassFilter>(), Ok(ClassFilter::ClassA));
        assert_eq!("all".parse::<ClassFilter>(), Ok(ClassFilter::AllClasses));
        assert_eq!("This Year".parse::<DateRange>(), Ok(DateRange::ThisYear));
        assert_eq!("3m".parse::<DateRange>(), Ok(DateRange::LastThreeMonths));
        assert_eq!(" Grades ".parse::<Tab>(), Ok(Tab::Grades));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut state = ViewState::new();
        state.cycle_tab(false);
        assert_eq!(state.active_tab(), Tab::Grades);
        state.cycle_tab(true);
        assert_eq!(state.active_tab(), Tab::Performance);

        state.cycle_date_range(false);
        assert_eq!(state.date_range(), DateRange::ThisYear);
        state.cycle_class(true);
        assert_eq!(state.selected_class(), ClassFilter::ClassA);
    }

    #[test]
    fn test_apply_selection_is_all_or_nothing() {
        let mut state = ViewState::new();
        let err = state
            .apply_selection(Some("grades"), Some("Class Z"), Some("1m"))
            .unwrap_err();
        assert_eq!(err, DashboardError::invalid("class", "Class Z"));
        assert_eq!(state, ViewState::new());

        state
            .apply_selection(Some("att"), None, Some("This Year"))
            .unwrap();
        assert_eq!(state.active_tab(), Tab::Attendance);
        assert_eq!(state.selected_class(), ClassFilter::AllClasses);
        assert_eq!(state.date_range(), DateRange::ThisYear);
    }
}
