use crate::report::report_model::SessionSnapshot;

/// Pretty-printed JSON of the full snapshot.
pub fn format_json_report(snapshot: &SessionSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}
