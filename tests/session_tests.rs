use element_picker::{
    catalog::normalize::NormalizeReport,
    selection::{invariants::check_invariants, selection_model::SelectionError},
    session::{
        intent::{Command, UserIntent, parse_command},
        session::{Session, SessionOptions},
    },
    source::record_source::{FileSource, InlineSource},
    trace::logger::TraceLogger,
};

use crate::common::utils::{fixture, temp_path, three_knowledge};

mod common;

fn options(pool_size: usize, seed: u64) -> SessionOptions {
    SessionOptions {
        pool_size,
        seed: Some(seed),
        verbose: 0,
    }
}

fn select(id: &str, group: Option<&str>) -> UserIntent {
    UserIntent::Select {
        id: id.to_string(),
        group: group.map(str::to_string),
    }
}

fn deselect(id: &str) -> UserIntent {
    UserIntent::Deselect { id: id.to_string() }
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn load_builds_catalog_and_pools() {
    let source = FileSource::new(&fixture("user_input_vars.csv"));
    let session = Session::load(&source, &options(2, 1), TraceLogger::disabled());

    assert!(session.is_available());
    assert_eq!(session.normalize_report().accepted, 8);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.groups.len(), 3);
    assert_eq!(snapshot.group("knowledge").unwrap().offered.len(), 2);
    assert_eq!(snapshot.group("knowledge").unwrap().catalog_size, 4);
    assert_eq!(snapshot.group("unknown").unwrap().offered.len(), 1);
    assert_eq!(snapshot.pool_size, 2);
    assert_eq!(snapshot.catalog_fingerprint.len(), 40);
    assert!(snapshot.output.is_empty());
}

#[test]
fn unavailable_source_leaves_an_empty_inert_session() {
    let source = FileSource::new("no/such/file.csv");
    let mut session = Session::load(&source, &options(10, 1), TraceLogger::disabled());

    assert!(!session.is_available());
    assert!(session.load_error().unwrap().contains("no/such/file.csv"));

    let snapshot = session.snapshot();
    assert!(snapshot.groups.is_empty());
    assert!(!snapshot.is_available());

    assert!(session.apply(&select("K001", Some("knowledge"))).is_err());
    assert!(session.apply(&deselect("K001")).is_err());
    assert!(session.output_vector().is_empty());
}

#[test]
fn malformed_source_is_unavailable_too() {
    let source = InlineSource::new("broken", "id,name\nk1,\"open quote\n");
    let session = Session::load(&source, &options(10, 1), TraceLogger::disabled());
    assert!(!session.is_available());
    assert!(session.load_error().unwrap().contains("broken"));
}

// =========================================================================
// Applying intents
// =========================================================================

#[test]
fn select_without_group_resolves_the_offering_pool() {
    let source = InlineSource::new("inline", "id,name,source\nk1,A,knowledge\ns1,S,skills\n");
    let mut session = Session::load(&source, &options(10, 1), TraceLogger::disabled());

    let update = session.apply(&select("s1", None)).unwrap();
    assert_eq!(update.element.group, "skills");
    assert_eq!(session.output_vector().to_vec(), vec!["s1".to_string()]);
}

#[test]
fn select_without_group_for_unknown_id_is_ignored() {
    let mut session = Session::from_catalog(
        "test",
        three_knowledge(),
        NormalizeReport::default(),
        &options(3, 1),
        TraceLogger::disabled(),
    );
    let before = session.snapshot();

    let err = session.apply(&select("nope", None)).unwrap_err();
    assert!(matches!(err, SelectionError::NotVisible { .. }));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn rejected_intents_do_not_change_the_snapshot() {
    let mut session = Session::from_catalog(
        "test",
        three_knowledge(),
        NormalizeReport::default(),
        &options(3, 2),
        TraceLogger::disabled(),
    );
    session.apply(&select("k1", Some("knowledge"))).unwrap();
    let before = session.snapshot();

    assert!(session.apply(&select("k1", Some("knowledge"))).is_err());
    assert!(session.apply(&deselect("k2")).is_err());
    assert_eq!(session.snapshot(), before);
    assert!(check_invariants(session.engine().state()).is_empty());
}

#[test]
fn snapshot_tracks_select_and_deselect() {
    let mut session = Session::from_catalog(
        "test",
        three_knowledge(),
        NormalizeReport::default(),
        &options(3, 2),
        TraceLogger::disabled(),
    );

    session.apply(&select("k2", Some("knowledge"))).unwrap();
    session.apply(&select("k3", Some("knowledge"))).unwrap();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.output, vec!["k2", "k3"]);
    assert_eq!(snapshot.group("knowledge").unwrap().offered.len(), 1);

    session.apply(&deselect("k2")).unwrap();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.output, vec!["k3"]);
    assert_eq!(snapshot.selected[0].name, "C");
    assert_eq!(snapshot.group("knowledge").unwrap().offered.len(), 2);
}

// =========================================================================
// Tracing
// =========================================================================

#[test]
fn trace_file_records_each_event() {
    let path = temp_path("session_trace.jsonl");
    {
        let mut session = Session::from_catalog(
            "test",
            three_knowledge(),
            NormalizeReport::default(),
            &options(3, 2),
            TraceLogger::new(&path),
        );
        session.apply(&select("k1", Some("knowledge"))).unwrap();
        let _ = session.apply(&deselect("missing"));
        session.apply(&deselect("k1")).unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["initialized", "select", "deselect_rejected", "deselect"]);

    assert_eq!(events[1]["element_id"], "k1");
    assert_eq!(events[1]["output"], serde_json::json!(["k1"]));
    assert_eq!(events[2]["element_id"], "missing");
    assert!(events[2]["rejection_reason"].as_str().unwrap().contains("missing"));
    assert_eq!(events[3]["restored"], true);
    assert_eq!(events[0]["catalog_fingerprint"], three_knowledge().fingerprint());
}

#[test]
fn unwritable_trace_path_disables_tracing() {
    let tracer = TraceLogger::new("/definitely/not/a/dir/trace.jsonl");
    assert!(!tracer.is_enabled());
}

// =========================================================================
// Command parsing
// =========================================================================

#[test]
fn parse_select_and_deselect_commands() {
    assert_eq!(
        parse_command("select K001 Knowledge").unwrap(),
        Some(Command::Intent(select("K001", Some("knowledge"))))
    );
    assert_eq!(
        parse_command("  pick K001 ").unwrap(),
        Some(Command::Intent(select("K001", None)))
    );
    assert_eq!(
        parse_command("rm K001").unwrap(),
        Some(Command::Intent(deselect("K001")))
    );
    assert_eq!(parse_command("DESELECT x").unwrap(), Some(Command::Intent(deselect("x"))));
}

#[test]
fn parse_presentation_commands() {
    assert_eq!(parse_command("show").unwrap(), Some(Command::Show));
    assert_eq!(parse_command("vector").unwrap(), Some(Command::Vector));
    assert_eq!(parse_command("help").unwrap(), Some(Command::Help));
    assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
    assert_eq!(parse_command("").unwrap(), None);
    assert_eq!(parse_command("   # comment").unwrap(), None);
}

#[test]
fn parse_rejects_bad_commands() {
    assert!(parse_command("select").is_err());
    assert!(parse_command("select a b c").is_err());
    assert!(parse_command("deselect").is_err());
    assert!(parse_command("deselect a b").is_err());
    assert!(parse_command("dance").unwrap_err().contains("dance"));
}
