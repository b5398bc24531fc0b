use element_picker::catalog::catalog_model::Element;
use element_picker::report::{
    console::{UNNAMED_PLACEHOLDER, display_name, format_console_report, format_output_vector},
    json::format_json_report,
    report_model::{GroupView, SessionSnapshot},
};

fn el(id: &str, name: &str, group: &str) -> Element {
    Element::new(id, name, group)
}

fn sample_snapshot() -> SessionSnapshot {
    SessionSnapshot {
        source: "data/user_input_vars.csv".into(),
        catalog_fingerprint: "abc123".into(),
        load_error: None,
        pool_size: 2,
        groups: vec![
            GroupView {
                group: "knowledge".into(),
                catalog_size: 3,
                offered: vec![el("k2", "Biology", "knowledge"), el("k3", "", "knowledge")],
            },
            GroupView {
                group: "skills".into(),
                catalog_size: 1,
                offered: vec![],
            },
        ],
        selected: vec![el("k1", "Algebra", "knowledge"), el("s1", "Speaking", "skills")],
        output: vec!["k1".into(), "s1".into()],
    }
}

// ============================================================================
// Console report
// ============================================================================

#[test]
fn console_report_lists_selection_pools_and_vector() {
    let out = format_console_report(&sample_snapshot());

    assert!(out.starts_with("=== Selected Items ===\n  k1  Algebra\n  s1  Speaking\n"));
    assert!(out.contains("=== knowledge (2 offered, 3 in catalog) ===\n  k2  Biology\n"));
    assert!(out.contains("=== skills (0 offered, 1 in catalog) ===\n  No more options\n"));
    assert!(out.ends_with("=== User Input Vector ===\n[\n  \"k1\",\n  \"s1\"\n]\n"));
}

#[test]
fn console_report_uses_placeholder_for_empty_names() {
    let out = format_console_report(&sample_snapshot());
    assert!(out.contains(&format!("  k3  {}\n", UNNAMED_PLACEHOLDER)));

    assert_eq!(display_name("   "), UNNAMED_PLACEHOLDER);
    assert_eq!(display_name("Named"), "Named");
}

#[test]
fn console_report_marks_empty_selection() {
    let mut snapshot = sample_snapshot();
    snapshot.selected.clear();
    snapshot.output.clear();

    let out = format_console_report(&snapshot);
    assert!(out.starts_with("=== Selected Items ===\n  (none)\n"));
    assert!(out.ends_with("=== User Input Vector ===\n[]\n"));
}

#[test]
fn console_report_shows_load_error_first() {
    let snapshot = SessionSnapshot {
        load_error: Some("Could not read 'x.csv'".into()),
        groups: vec![],
        selected: vec![],
        output: vec![],
        ..sample_snapshot()
    };

    let out = format_console_report(&snapshot);
    assert!(out.starts_with("=== Source unavailable: Could not read 'x.csv' ===\n"));
    assert!(!out.contains("offered"));
}

#[test]
fn output_vector_keeps_selection_order() {
    let out = format_output_vector(&["b".to_string(), "a".to_string()]);
    assert_eq!(out, "[\n  \"b\",\n  \"a\"\n]");
}

// ============================================================================
// JSON report
// ============================================================================

#[test]
fn json_report_round_trips_the_snapshot() {
    let snapshot = sample_snapshot();
    let json = format_json_report(&snapshot).unwrap();

    assert!(!json.contains("load_error"), "absent load error is omitted");
    let parsed: SessionSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);
}
