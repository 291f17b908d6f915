//! Fixed sample datasets and summary cards
//!
//! Everything here is a process-wide constant. Nothing in the dashboard
//! mutates these tables; the view controller only selects among them.

use serde::Serialize;

/// Subject scores for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyScores {
    pub month: &'static str,
    #[serde(rename = "Math")]
    pub math: u32,
    #[serde(rename = "Science")]
    pub science: u32,
    #[serde(rename = "English")]
    pub english: u32,
    #[serde(rename = "History")]
    pub history: u32,
}

impl MonthlyScores {
    /// Score for a subject column, by the key used in chart series
    pub fn score(&self, subject: &str) -> Option<u32> {
        match subject {
            "Math" => Some(self.math),
            "Science" => Some(self.science),
            "English" => Some(self.english),
            "History" => Some(self.history),
            _ => None,
        }
    }
}

/// Head count for one attendance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceSlice {
    pub name: &'static str,
    pub value: u32,
    pub color: &'static str,
}

/// Average score of one class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassScore {
    pub class: &'static str,
    #[serde(rename = "avgScore")]
    pub avg_score: u32,
}

/// Number of students holding a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeCount {
    pub grade: &'static str,
    pub students: u32,
}

pub static PERFORMANCE: [MonthlyScores; 5] = [
    MonthlyScores { month: "Sep", math: 85, science: 78, english: 92, history: 88 },
    MonthlyScores { month: "Oct", math: 88, science: 82, english: 90, history: 85 },
    MonthlyScores { month: "Nov", math: 90, science: 85, english: 94, history: 89 },
    MonthlyScores { month: "Dec", math: 92, science: 88, english: 95, history: 91 },
    MonthlyScores { month: "Jan", math: 95, science: 91, english: 96, history: 93 },
];

pub static ATTENDANCE: [AttendanceSlice; 3] = [
    AttendanceSlice { name: "Present", value: 450, color: "#10b981" },
    AttendanceSlice { name: "Absent", value: 30, color: "#ef4444" },
    AttendanceSlice { name: "Leave", value: 20, color: "#f59e0b" },
];

pub static CLASS_COMPARISON: [ClassScore; 5] = [
    ClassScore { class: "Class A", avg_score: 88 },
    ClassScore { class: "Class B", avg_score: 85 },
    ClassScore { class: "Class C", avg_score: 90 },
    ClassScore { class: "Class D", avg_score: 87 },
    ClassScore { class: "Class E", avg_score: 92 },
];

pub static GRADE_DISTRIBUTION: [GradeCount; 5] = [
    GradeCount { grade: "A+", students: 45 },
    GradeCount { grade: "A", students: 78 },
    GradeCount { grade: "B+", students: 92 },
    GradeCount { grade: "B", students: 65 },
    GradeCount { grade: "C", students: 20 },
];

/// One of the four fixed datasets backing a chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum MetricDataset {
    Performance(&'static [MonthlyScores]),
    Attendance(&'static [AttendanceSlice]),
    Comparison(&'static [ClassScore]),
    Grades(&'static [GradeCount]),
}

impl MetricDataset {
    pub fn len(&self) -> usize {
        match self {
            MetricDataset::Performance(rows) => rows.len(),
            MetricDataset::Attendance(rows) => rows.len(),
            MetricDataset::Comparison(rows) => rows.len(),
            MetricDataset::Grades(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Category labels in record order (month, status, class or grade)
    pub fn categories(&self) -> Vec<&'static str> {
        match self {
            MetricDataset::Performance(rows) => rows.iter().map(|r| r.month).collect(),
            MetricDataset::Attendance(rows) => rows.iter().map(|r| r.name).collect(),
            MetricDataset::Comparison(rows) => rows.iter().map(|r| r.class).collect(),
            MetricDataset::Grades(rows) => rows.iter().map(|r| r.grade).collect(),
        }
    }

    /// `(category, value)` pairs for one value column.
    /// Single-column datasets ignore `key`; performance rows need a subject.
    pub fn values(&self, key: &str) -> Vec<(&'static str, u32)> {
        match self {
            MetricDataset::Performance(rows) => rows
                .iter()
                .filter_map(|r| r.score(key).map(|score| (r.month, score)))
                .collect(),
            MetricDataset::Attendance(rows) => rows.iter().map(|r| (r.name, r.value)).collect(),
            MetricDataset::Comparison(rows) => {
                rows.iter().map(|r| (r.class, r.avg_score)).collect()
            }
            MetricDataset::Grades(rows) => rows.iter().map(|r| (r.grade, r.students)).collect(),
        }
    }

    /// Per-record colours, for datasets that carry their own
    pub fn record_colors(&self) -> Option<Vec<&'static str>> {
        match self {
            MetricDataset::Attendance(rows) => Some(rows.iter().map(|r| r.color).collect()),
            _ => None,
        }
    }
}

/// `value` as a percentage of `total`; an empty total gives zero
pub fn share_percent(value: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    value as f64 / total as f64 * 100.0
}

/// Card colour group for a summary stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Blue,
    Green,
    Purple,
    Orange,
}

/// Decorative headline number shown above the tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryStat {
    pub label: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub accent: Accent,
}

pub static SUMMARY_STATS: [SummaryStat; 4] = [
    SummaryStat {
        label: "Total Students",
        value: "1,245",
        change: "+12%",
        accent: Accent::Blue,
    },
    SummaryStat {
        label: "Avg Attendance",
        value: "94.5%",
        change: "+3.2%",
        accent: Accent::Green,
    },
    SummaryStat {
        label: "Avg Score",
        value: "88.7",
        change: "+5.1%",
        accent: Accent::Purple,
    },
    SummaryStat {
        label: "Pass Rate",
        value: "96.2%",
        change: "+2.8%",
        accent: Accent::Orange,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_shares_sum_to_hundred() {
        let total: u32 = ATTENDANCE.iter().map(|s| s.value).sum();
        let shares: Vec<f64> = ATTENDANCE
            .iter()
            .map(|s| share_percent(s.value, total))
            .collect();
        assert!((shares.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert_eq!(format!("{:.1}", shares[0]), "90.0");
        assert_eq!(format!("{:.1}", shares[1]), "6.0");
        assert_eq!(format!("{:.1}", shares[2]), "4.0");
        assert_eq!(share_percent(3, 0), 0.0);
    }

    #[test]
    fn test_subject_lookup() {
        let sep = PERFORMANCE[0];
        assert_eq!(sep.score("Math"), Some(85));
        assert_eq!(sep.score("History"), Some(88));
        assert_eq!(sep.score("Art"), None);
    }

    #[test]
    fn test_dataset_categories() {
        let grades = MetricDataset::Grades(&GRADE_DISTRIBUTION);
        assert_eq!(grades.categories(), vec!["A+", "A", "B+", "B", "C"]);
        assert_eq!(MetricDataset::Performance(&PERFORMANCE).len(), 5);
        assert!(!MetricDataset::Attendance(&ATTENDANCE).is_empty());
    }

    #[test]
    fn test_dataset_values() {
        let perf = MetricDataset::Performance(&PERFORMANCE);
        assert_eq!(
            perf.values("Science"),
            vec![("Sep", 78), ("Oct", 82), ("Nov", 85), ("Dec", 88), ("Jan", 91)]
        );
        assert!(perf.values("Art").is_empty());

        let classes = MetricDataset::Comparison(&CLASS_COMPARISON);
        assert_eq!(classes.values("avgScore")[4], ("Class E", 92));
        assert!(classes.record_colors().is_none());

        let attendance = MetricDataset::Attendance(&ATTENDANCE);
        assert_eq!(
            attendance.record_colors(),
            Some(vec!["#10b981", "#ef4444", "#f59e0b"])
        );
    }
}
