use crate::report::report_model::SessionSnapshot;

pub const UNNAMED_PLACEHOLDER: &str = "(unnamed)";

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a session snapshot for terminal output.
///
/// Produces output like:
/// ```text
/// === Selected Items ===
///   k1  Algebra
///
/// === knowledge (2 offered, 3 in catalog) ===
///   k2  Biology
///   k3  Chemistry
///
/// === User Input Vector ===
/// [
///   "k1"
/// ]
/// ```
pub fn format_console_report(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();

    if let Some(ref error) = snapshot.load_error {
        out.push_str(&format!("=== Source unavailable: {} ===\n\n", error));
    }

    out.push_str("=== Selected Items ===\n");
    if snapshot.selected.is_empty() {
        out.push_str("  (none)\n");
    }
    for el in &snapshot.selected {
        out.push_str(&format!("  {}  {}\n", el.id, display_name(&el.name)));
    }

    for group in &snapshot.groups {
        out.push_str(&format!(
            "\n=== {} ({} offered, {} in catalog) ===\n",
            group.group,
            group.offered.len(),
            group.catalog_size
        ));

        if group.offered.is_empty() {
            out.push_str("  No more options\n");
        }
        for el in &group.offered {
            out.push_str(&format!("  {}  {}\n", el.id, display_name(&el.name)));
        }
    }

    out.push_str("\n=== User Input Vector ===\n");
    out.push_str(&format_output_vector(&snapshot.output));
    out.push('\n');

    out
}

/// The output vector as a pretty-printed JSON array of ids.
pub fn format_output_vector(output: &[String]) -> String {
    serde_json::to_string_pretty(output).unwrap_or_else(|_| "[]".to_string())
}

pub fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        UNNAMED_PLACEHOLDER
    } else {
        name
    }
}
