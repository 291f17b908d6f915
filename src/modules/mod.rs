//! Interactive modules
//!
//! - filters: class and date-range dropdowns (implements `Module`)
//! - export: PDF/CSV report acknowledgment

pub mod export;
pub mod filters;
