pub mod share_bar;

pub use share_bar::{segment_widths, ShareBar};
