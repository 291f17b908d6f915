//! Behaviour of the view-state controller as seen by the renderer

use edfloor::core::{ChartKind, ClassFilter, DateRange, Tab, ViewState};
use edfloor::data::MetricDataset;
use edfloor::modules::export::{export_named, ReportKind};
use edfloor::DashboardError;

#[test]
fn test_every_tab_has_a_complete_view() {
    let mut state = ViewState::new();
    for tab in Tab::ALL {
        state.select_tab(tab);
        let view = state.active_view();
        assert_eq!(view.tab, tab);
        assert!(!view.dataset.is_empty(), "{tab:?} has no records");
        assert!(!view.config.series.is_empty(), "{tab:?} has no series");
        assert!(!view.insights.is_empty(), "{tab:?} has no insight text");
    }
}

#[test]
fn test_view_depends_only_on_last_tab() {
    for from in Tab::ALL {
        for to in Tab::ALL {
            let mut state = ViewState::new();
            state.set_active_tab(from.key()).unwrap();
            state.set_active_tab(to.key()).unwrap();

            let mut fresh = ViewState::new();
            fresh.set_active_tab(to.key()).unwrap();

            assert_eq!(state.active_view(), fresh.active_view());
        }
    }
}

#[test]
fn test_filters_never_change_the_view() {
    let mut state = ViewState::new();
    for tab in Tab::ALL {
        state.select_tab(tab);
        let before = *state.active_view();
        for class in ClassFilter::ALL {
            state.set_selected_class(class.label()).unwrap();
            for range in DateRange::ALL {
                state.set_date_range(range.label()).unwrap();
                assert_eq!(*state.active_view(), before);
            }
        }
    }
}

#[test]
fn test_selecting_a_tab_twice_is_idempotent() {
    let mut once = ViewState::new();
    once.set_active_tab("comparison").unwrap();

    let mut twice = ViewState::new();
    twice.set_active_tab("comparison").unwrap();
    twice.set_active_tab("comparison").unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_switch_to_attendance() {
    let mut state = ViewState::new();
    assert_eq!(state.active_tab(), Tab::Performance);

    state.set_active_tab("attendance").unwrap();
    let view = state.active_view();
    assert_eq!(view.chart, ChartKind::Pie);
    assert_eq!(view.chart.name(), "pie");
    match view.dataset {
        MetricDataset::Attendance(rows) => {
            let pairs: Vec<_> = rows.iter().map(|r| (r.name, r.value)).collect();
            assert_eq!(pairs, [("Present", 450), ("Absent", 30), ("Leave", 20)]);
        }
        other => panic!("unexpected dataset: {other:?}"),
    }
}

#[test]
fn test_export_pdf_is_acknowledged() {
    let ack = export_named("PDF").expect("PDF export should be accepted");
    assert_eq!(ack.kind, ReportKind::Pdf);
    assert!(ack.message.contains("PDF"));
}

#[test]
fn test_out_of_domain_tab_is_rejected() {
    let mut state = ViewState::new();
    state.set_active_tab("grades").unwrap();

    let err = state.set_active_tab("bogus").unwrap_err();
    assert!(matches!(
        err,
        DashboardError::InvalidSelection { field: "tab", .. }
    ));
    assert_eq!(state.active_tab(), Tab::Grades);
}

#[test]
fn test_chart_kinds_per_tab() {
    let kinds: Vec<&str> = Tab::ALL
        .iter()
        .map(|tab| edfloor::core::view_for(*tab).chart.name())
        .collect();
    assert_eq!(kinds, ["line", "pie", "bar", "bar"]);
}

#[test]
fn test_startup_selection_layers_config_then_flags() {
    let config = edfloor::config::parse(
        r#"
default_tab = "bogus"
default_class = "Class B"
"#,
    )
    .unwrap();
    let mut view = ViewState::new();
    let warnings = config.apply_defaults(&mut view);
    assert_eq!(warnings.len(), 1);
    assert_eq!(view.selected_class(), ClassFilter::ClassB);

    let before = view;
    assert!(view
        .apply_selection(Some("grades"), None, Some("Last Decade"))
        .is_err());
    assert_eq!(view, before);

    view.apply_selection(Some("cmp"), None, None).unwrap();
    assert_eq!(view.active_tab(), Tab::Comparison);
    assert_eq!(view.selected_class(), ClassFilter::ClassB);
}
