//! EdFloor: a terminal analytics dashboard over fixed school datasets.

pub mod app;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod logging;
pub mod modules;
pub mod ui;

pub use error::DashboardError;
