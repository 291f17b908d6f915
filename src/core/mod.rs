pub mod action;
pub mod command;
pub mod module;
pub mod view;

pub use action::{Action, NotifyLevel};
pub use command::{parse_command, Command};
pub use module::Module;
pub use view::{
    view_for, ActiveView, BarLayout, ChartConfig, ChartKind, ClassFilter, DateRange, SeriesSpec,
    Tab, ViewState,
};
