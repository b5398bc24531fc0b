use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::selection::selection_model::DEFAULT_POOL_SIZE;
use crate::session::session::SessionOptions;
use crate::source::record_source::DEFAULT_SOURCE;
use crate::trace::logger::{DEFAULT_TRACE_PATH, TraceLogger};

pub const DEFAULT_CONFIG_PATH: &str = "element-picker.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "element-picker",
    version,
    about = "Sample, pick and export element ids from a grouped catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: element-picker.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append JSONL trace events to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and normalize the catalog, then print a per-group summary
    Catalog {
        /// File path or http(s) URL of the record source
        #[arg(long)]
        source: Option<String>,
    },

    /// Draw the initial pools and render them
    Sample {
        /// File path or http(s) URL of the record source
        #[arg(long)]
        source: Option<String>,

        /// Elements offered per group
        #[arg(short = 'n', long)]
        pool_size: Option<usize>,

        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: console, json
        #[arg(long, default_value = "console")]
        format: String,
    },

    /// Interactive session: read select/deselect commands and re-render
    Pick {
        /// File path or http(s) URL of the record source
        #[arg(long)]
        source: Option<String>,

        /// Elements offered per group
        #[arg(short = 'n', long)]
        pool_size: Option<usize>,

        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,

        /// Read commands from this file instead of stdin
        #[arg(long)]
        script: Option<String>,

        /// Output format: console, json
        #[arg(long, default_value = "console")]
        format: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `element-picker.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    pub seed: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_trace_path")]
    pub path: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: DEFAULT_TRACE_PATH.to_string(),
        }
    }
}

// Serde default helpers
fn default_pool_size() -> usize { DEFAULT_POOL_SIZE }
fn default_trace_path() -> String { DEFAULT_TRACE_PATH.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Record source location: CLI > config > default path.
pub fn resolve_source(cli_source: Option<&str>, config: &AppConfig) -> String {
    cli_source
        .or(config.source.location.as_deref())
        .unwrap_or(DEFAULT_SOURCE)
        .to_string()
}

/// Build SessionOptions from resolved CLI/config values.
pub fn build_session_options(
    pool_size: Option<usize>,
    seed: Option<u64>,
    verbose: u8,
    config: &AppConfig,
) -> SessionOptions {
    SessionOptions {
        pool_size: pool_size.unwrap_or(config.selection.pool_size),
        seed: seed.or(config.selection.seed),
        verbose,
    }
}

/// `--trace` always enables tracing; otherwise the config decides.
pub fn build_tracer(cli_trace: Option<&str>, config: &AppConfig) -> TraceLogger {
    match cli_trace {
        Some(path) => TraceLogger::new(path),
        None if config.trace.enabled => TraceLogger::new(&config.trace.path),
        None => TraceLogger::disabled(),
    }
}
