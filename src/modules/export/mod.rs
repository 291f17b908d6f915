//! Export Module
//!
//! Report export is a placeholder: requesting a PDF or CSV report only
//! produces an acknowledgment for the status line. No file is written.
//!
//! - 'p' key / `:export pdf` → PDF
//! - 'v' key / `:export csv` → CSV

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::core::{Action, NotifyLevel};
use crate::error::DashboardError;

/// Report formats offered by the header buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Pdf,
    Csv,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Pdf, ReportKind::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Pdf => "PDF",
            ReportKind::Csv => "CSV",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "PDF" => Ok(ReportKind::Pdf),
            "CSV" => Ok(ReportKind::Csv),
            _ => Err(DashboardError::invalid("report", value)),
        }
    }
}

/// Acknowledgment returned for an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportAck {
    pub kind: ReportKind,
    pub message: String,
}

impl From<ExportAck> for Action {
    fn from(ack: ExportAck) -> Self {
        Action::Notify(ack.message, NotifyLevel::Info)
    }
}

/// Acknowledge a report request without producing a file
pub fn export_report(kind: ReportKind) -> ExportAck {
    info!(report = kind.as_str(), "export requested");
    ExportAck {
        kind,
        message: format!("Exporting {kind} report... (no file is written)"),
    }
}

/// Parse a report name and acknowledge it
pub fn export_named(value: &str) -> Result<ExportAck, DashboardError> {
    value.parse::<ReportKind>().map(export_report)
}
