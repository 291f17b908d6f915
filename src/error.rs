//! Error types for the view-state controller

use thiserror::Error;

/// Errors raised when a caller hands the dashboard a value outside its domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// A selection setter was given a value that is not one of its options
    #[error("invalid {field} selection: {value:?}")]
    InvalidSelection { field: &'static str, value: String },
}

impl DashboardError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSelection {
            field,
            value: value.into(),
        }
    }
}
