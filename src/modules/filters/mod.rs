//! Filter bar module - class and date-range dropdowns
//!
//! The selections are stored on the view state only; no dataset is narrowed
//! by them.

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, ClassFilter, DateRange, Module, NotifyLevel, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Class,
    Range,
}

impl FilterField {
    pub fn title(&self) -> &'static str {
        match self {
            FilterField::Class => "Class",
            FilterField::Range => "Date Range",
        }
    }

    pub fn options(&self) -> Vec<&'static str> {
        match self {
            FilterField::Class => ClassFilter::ALL.iter().map(|c| c.label()).collect(),
            FilterField::Range => DateRange::ALL.iter().map(|r| r.label()).collect(),
        }
    }

    fn current_index(&self, view: &ViewState) -> usize {
        match self {
            FilterField::Class => ClassFilter::ALL
                .iter()
                .position(|c| *c == view.selected_class())
                .unwrap_or(0),
            FilterField::Range => DateRange::ALL
                .iter()
                .position(|r| *r == view.date_range())
                .unwrap_or(0),
        }
    }

    fn other(&self) -> FilterField {
        match self {
            FilterField::Class => FilterField::Range,
            FilterField::Range => FilterField::Class,
        }
    }
}

/// Dropdown state for the two filter selectors
#[derive(Debug, Clone)]
pub struct FilterBar {
    open: bool,
    field: FilterField,
    highlighted: usize,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self {
            open: false,
            field: FilterField::Class,
            highlighted: 0,
        }
    }
}

impl FilterBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn field(&self) -> FilterField {
        self.field
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Open the dropdown for `field`, highlighting the current selection
    pub fn open(&mut self, field: FilterField, view: &ViewState) {
        self.open = true;
        self.field = field;
        self.highlighted = field.current_index(view);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn move_highlight(&mut self, forward: bool) {
        let len = self.field.options().len();
        self.highlighted = if forward {
            (self.highlighted + 1) % len
        } else {
            (self.highlighted + len - 1) % len
        };
    }

    fn apply(&mut self, view: &mut ViewState) -> Action {
        let message = match self.field {
            FilterField::Class => {
                let class = ClassFilter::ALL[self.highlighted % ClassFilter::ALL.len()];
                view.select_class(class);
                format!("Class: {}", class.label())
            }
            FilterField::Range => {
                let range = DateRange::ALL[self.highlighted % DateRange::ALL.len()];
                view.select_date_range(range);
                format!("Date range: {}", range.label())
            }
        };
        self.close();
        Action::Notify(message, NotifyLevel::Info)
    }
}

impl Module for FilterBar {
    fn handle_key(&mut self, key: KeyEvent, view: &mut ViewState) -> Action {
        if !self.open {
            return Action::None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('f') => {
                self.close();
                Action::CloseOverlay
            }
            KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                let next = self.field.other();
                self.open(next, view);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_highlight(true);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_highlight(false);
                Action::None
            }
            KeyCode::Enter => self.apply(view),
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(bar: &mut FilterBar, view: &mut ViewState, code: KeyCode) -> Action {
        bar.handle_key(KeyEvent::new(code, KeyModifiers::NONE), view)
    }

    #[test]
    fn test_closed_bar_ignores_keys() {
        let mut bar = FilterBar::new();
        let mut view = ViewState::new();
        assert_eq!(press(&mut bar, &mut view, KeyCode::Enter), Action::None);
        assert_eq!(view, ViewState::new());
    }

    #[test]
    fn test_select_class_from_dropdown() {
        let mut bar = FilterBar::new();
        let mut view = ViewState::new();
        bar.open(FilterField::Class, &view);
        press(&mut bar, &mut view, KeyCode::Char('j'));
        press(&mut bar, &mut view, KeyCode::Char('j'));
        let action = press(&mut bar, &mut view, KeyCode::Enter);
        assert_eq!(view.selected_class(), ClassFilter::ClassB);
        assert_eq!(
            action,
            Action::Notify("Class: Class B".to_string(), NotifyLevel::Info)
        );
        assert!(!bar.is_open());
    }

    #[test]
    fn test_switch_to_range_and_wrap() {
        let mut bar = FilterBar::new();
        let mut view = ViewState::new();
        bar.open(FilterField::Class, &view);
        press(&mut bar, &mut view, KeyCode::Tab);
        assert_eq!(bar.field(), FilterField::Range);
        press(&mut bar, &mut view, KeyCode::Up);
        press(&mut bar, &mut view, KeyCode::Enter);
        assert_eq!(view.date_range(), DateRange::ThisYear);
    }

    #[test]
    fn test_escape_leaves_selection() {
        let mut bar = FilterBar::new();
        let mut view = ViewState::new();
        bar.open(FilterField::Range, &view);
        press(&mut bar, &mut view, KeyCode::Down);
        assert_eq!(press(&mut bar, &mut view, KeyCode::Esc), Action::CloseOverlay);
        assert_eq!(view.date_range(), DateRange::LastFiveMonths);
    }
}
