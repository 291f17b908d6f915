use std::time::{Duration, Instant};

use tracing::warn;

use crate::core::{parse_command, Action, Command, Module, NotifyLevel, Tab, ViewState};
use crate::error::DashboardError;
use crate::modules::export::{self, ReportKind};
use crate::modules::filters::{FilterBar, FilterField};

const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandBar {
    pub input: String,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub created: Instant,
}

/// Dashboard application state
pub struct App {
    pub view: ViewState,
    pub filter_bar: FilterBar,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_view(ViewState::new())
    }

    pub fn with_view(view: ViewState) -> Self {
        Self {
            view,
            filter_bar: FilterBar::new(),
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            status: None,
            help_open: false,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            created: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    /// Show every startup problem at once in the status line
    pub fn report_warnings(&mut self, warnings: &[String]) {
        if !warnings.is_empty() {
            self.set_status(warnings.join("; "), StatusLevel::Warn);
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created.elapsed() >= STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.view.select_tab(tab);
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        self.view.cycle_tab(forward);
    }

    pub fn open_filter(&mut self, field: FilterField) {
        self.filter_bar.open(field, &self.view);
        self.input_mode = InputMode::Filter;
    }

    pub fn close_filter(&mut self) {
        self.filter_bar.close();
        self.input_mode = InputMode::Normal;
    }

    pub fn request_export(&mut self, kind: ReportKind) {
        let action = export::export_report(kind).into();
        self.apply_action(action);
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    /// Run the command currently typed into the command bar
    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        let cmd = parse_command(&input);
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Tab(name) => {
                let result = self.view.set_active_tab(name);
                selection_action(result, || {
                    format!("Tab: {}", self.view.active_tab().title())
                })
            }
            Command::Class(value) => {
                let result = self.view.set_selected_class(value);
                selection_action(result, || {
                    format!("Class: {}", self.view.selected_class().label())
                })
            }
            Command::Range(value) => {
                let result = self.view.set_date_range(value);
                selection_action(result, || {
                    format!("Date range: {}", self.view.date_range().label())
                })
            }
            Command::Export(kind) => match export::export_named(kind) {
                Ok(ack) => ack.into(),
                Err(err) => {
                    warn!("{err}");
                    Action::Notify(err.to_string(), NotifyLevel::Error)
                }
            },
            Command::Help => Action::ToggleHelp,
            Command::Quit => Action::Quit,
            Command::Unknown(input) => {
                Action::Notify(format!("Unknown command: {input}"), NotifyLevel::Warn)
            }
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Notify(text, level) => self.set_status(text, level.into()),
            Action::CloseOverlay => {
                self.help_open = false;
                self.close_filter();
            }
            Action::ToggleHelp => self.help_open = !self.help_open,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Route a key to the filter dropdowns while they are open
    pub fn handle_filter_key(&mut self, key: crossterm::event::KeyEvent) {
        let action = self.filter_bar.handle_key(key, &mut self.view);
        if !self.filter_bar.is_open() {
            self.input_mode = InputMode::Normal;
        }
        self.apply_action(action);
    }
}

fn selection_action(
    result: Result<(), DashboardError>,
    describe: impl FnOnce() -> String,
) -> Action {
    match result {
        Ok(()) => Action::Notify(describe(), NotifyLevel::Info),
        Err(err) => Action::Notify(err.to_string(), NotifyLevel::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClassFilter, DateRange};

    fn run(app: &mut App, input: &str) {
        app.enter_command();
        app.command.input = input.to_string();
        app.apply_command();
    }

    #[test]
    fn test_tab_command_switches_view() {
        let mut app = App::new();
        run(&mut app, "tab comparison");
        assert_eq!(app.view.active_tab(), Tab::Comparison);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            app.status_text(),
            Some(("Tab: Comparison", StatusLevel::Info))
        );
    }

    #[test]
    fn test_bad_tab_command_reports_error() {
        let mut app = App::new();
        run(&mut app, "tab bogus");
        assert_eq!(app.view.active_tab(), Tab::Performance);
        let (text, level) = app.status_text().unwrap();
        assert_eq!(level, StatusLevel::Error);
        assert!(text.contains("bogus"));
    }

    #[test]
    fn test_filter_commands() {
        let mut app = App::new();
        run(&mut app, "class b");
        run(&mut app, "range this year");
        assert_eq!(app.view.selected_class(), ClassFilter::ClassB);
        assert_eq!(app.view.date_range(), DateRange::ThisYear);
    }

    #[test]
    fn test_export_command_acknowledges() {
        let mut app = App::new();
        run(&mut app, "export pdf");
        let (text, level) = app.status_text().unwrap();
        assert_eq!(level, StatusLevel::Info);
        assert!(text.contains("PDF"));
    }

    #[test]
    fn test_help_and_quit_commands() {
        let mut app = App::new();
        run(&mut app, "help");
        assert!(app.help_open);
        run(&mut app, "q");
        assert!(app.should_quit);
    }

    #[test]
    fn test_empty_command_is_ignored() {
        let mut app = App::new();
        run(&mut app, "   ");
        assert!(app.status.is_none());
    }

    #[test]
    fn test_startup_warnings_are_joined() {
        let mut app = App::new();
        app.report_warnings(&[]);
        assert!(app.status.is_none());

        let warnings = vec![
            "Config: invalid tab selection: \"bogus\"".to_string(),
            "Config: invalid class selection: \"Class Z\"".to_string(),
        ];
        app.report_warnings(&warnings);
        let (text, level) = app.status_text().unwrap();
        assert_eq!(level, StatusLevel::Warn);
        assert!(text.contains("bogus"));
        assert!(text.contains("Class Z"));
    }

    #[test]
    fn test_expired_status_is_cleared() {
        let mut app = App::new();
        app.set_status("old", StatusLevel::Info);
        if let Some(status) = app.status.as_mut() {
            status.created = Instant::now() - STATUS_TTL - Duration::from_millis(1);
        }
        app.on_tick();
        assert!(app.status.is_none());
    }
}
