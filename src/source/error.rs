use std::fmt;

/// Why a record source could not produce records. Any of these leaves the
/// session without a catalog.
#[derive(Debug)]
pub enum SourceError {
    /// Local file could not be read
    Io { location: String, source: std::io::Error },

    /// Remote fetch failed or returned a non-success status
    Http { location: String, source: reqwest::Error },

    /// JSON array input did not parse as a list of objects
    Json { location: String, source: serde_json::Error },

    /// Text was readable but not usable as tabular data
    Malformed { location: String, reason: String },
}

impl SourceError {
    pub fn malformed(location: &str, reason: impl Into<String>) -> Self {
        SourceError::Malformed {
            location: location.to_string(),
            reason: reason.into(),
        }
    }

    pub fn location(&self) -> &str {
        match self {
            SourceError::Io { location, .. }
            | SourceError::Http { location, .. }
            | SourceError::Json { location, .. }
            | SourceError::Malformed { location, .. } => location,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { location, source } => {
                write!(f, "Could not read '{}': {}", location, source)
            }
            SourceError::Http { location, source } => {
                write!(f, "Fetching '{}' failed: {}", location, source)
            }
            SourceError::Json { location, source } => {
                write!(f, "Invalid JSON records in '{}': {}", location, source)
            }
            SourceError::Malformed { location, reason } => {
                write!(f, "Malformed tabular data in '{}': {}", location, reason)
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            SourceError::Http { source, .. } => Some(source),
            SourceError::Json { source, .. } => Some(source),
            SourceError::Malformed { .. } => None,
        }
    }
}
