use std::io::{BufRead, BufReader, Write};

use crate::catalog::normalize::normalize_with_report;
use crate::report::console::{format_console_report, format_output_vector};
use crate::report::json::format_json_report;
use crate::report::report_model::SessionSnapshot;
use crate::session::intent::{Command, HELP_TEXT, parse_command};
use crate::session::session::{Session, SessionOptions};
use crate::source::record_source::source_for;
use crate::trace::logger::TraceLogger;

// ============================================================================
// catalog subcommand
// ============================================================================

/// Print a per-group summary of the normalized catalog. Returns whether the
/// source could be loaded.
pub fn cmd_catalog(source: &str, verbose: u8) -> Result<bool, Box<dyn std::error::Error>> {
    let record_source = source_for(source);

    if verbose > 0 {
        eprintln!("Fetching records from {}...", record_source.location());
    }

    let records = match record_source.fetch() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: record source unavailable: {}", e);
            return Ok(false);
        }
    };

    let (catalog, report) = normalize_with_report(&records);

    println!("Catalog: {}", source);
    println!("Fingerprint: {}", catalog.fingerprint());
    println!(
        "Records: {} read, {} accepted, {} without id, {} duplicate ids",
        report.total_records, report.accepted, report.missing_id, report.duplicate_id
    );
    for group in catalog.groups() {
        println!("  {:<20} {} elements", group.name, group.elements.len());
    }

    Ok(true)
}

// ============================================================================
// sample subcommand
// ============================================================================

/// Load the catalog, draw the initial pools and render them.
pub fn cmd_sample(
    source: &str,
    options: &SessionOptions,
    format: &str,
    tracer: TraceLogger,
) -> Result<bool, Box<dyn std::error::Error>> {
    let session = Session::load(source_for(source).as_ref(), options, tracer);
    print!("{}", render(&session.snapshot(), format)?);
    Ok(session.is_available())
}

// ============================================================================
// pick subcommand
// ============================================================================

/// Run an interactive session over stdin or a script file. Returns whether
/// the source could be loaded.
pub fn cmd_pick(
    source: &str,
    options: &SessionOptions,
    script: Option<&str>,
    format: &str,
    tracer: TraceLogger,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut session = Session::load(source_for(source).as_ref(), options, tracer);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match script {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            run_pick_loop(&mut session, BufReader::new(file), &mut out, format)?;
        }
        None => {
            let stdin = std::io::stdin();
            run_pick_loop(&mut session, stdin.lock(), &mut out, format)?;
        }
    }

    Ok(session.is_available())
}

/// Drive a session from line-oriented input: render once, then apply each
/// command and re-render after every mutation. Rejected intents are reported
/// and leave the state unchanged.
pub fn run_pick_loop<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    write!(out, "{}", render(&session.snapshot(), format)?)?;

    for line in input.lines() {
        let line = line?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "Error: {}", msg)?;
                continue;
            }
        };

        match command {
            Command::Intent(intent) => match session.apply(&intent) {
                Ok(_) => write!(out, "{}", render(&session.snapshot(), format)?)?,
                Err(e) => writeln!(out, "Ignored: {}", e)?,
            },
            Command::Show => write!(out, "{}", render(&session.snapshot(), format)?)?,
            Command::Vector => writeln!(out, "{}", format_output_vector(session.output_vector()))?,
            Command::Help => write!(out, "{}", HELP_TEXT)?,
            Command::Quit => break,
        }
    }

    writeln!(out, "Final output vector: {}", format_output_vector(session.output_vector()))?;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Render a snapshot in the requested format (`json`, anything else is console).
pub fn render(snapshot: &SessionSnapshot, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        "json" => Ok(format_json_report(snapshot)? + "\n"),
        _ => Ok(format_console_report(snapshot)),
    }
}
