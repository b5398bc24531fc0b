use crate::catalog::catalog_model::RawRecord;
use crate::source::error::SourceError;
use crate::source::tabular::parse_records;

pub const DEFAULT_SOURCE: &str = "data/user_input_vars.csv";

// ============================================================================
// RecordSource trait: where raw catalog rows come from
// ============================================================================

/// Supplies the flat list of raw records a catalog is built from.
pub trait RecordSource {
    /// Human-readable location, used in logs and error messages.
    fn location(&self) -> &str;

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError>;
}

/// Pick a source implementation for a location string: `http://` and
/// `https://` are fetched over the network, anything else is a file path.
pub fn source_for(location: &str) -> Box<dyn RecordSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

// ============================================================================
// Implementations
// ============================================================================

pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

impl RecordSource for FileSource {
    fn location(&self) -> &str {
        &self.path
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            location: self.path.clone(),
            source,
        })?;
        parse_records(&text, &self.path)
    }
}

pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl RecordSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let to_error = |source: reqwest::Error| SourceError::Http {
            location: self.url.clone(),
            source,
        };

        let text = reqwest::blocking::get(&self.url)
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(to_error)?;

        parse_records(&text, &self.url)
    }
}

/// In-memory text, parsed exactly like a fetched file.
pub struct InlineSource {
    label: String,
    text: String,
}

impl InlineSource {
    pub fn new(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            text: text.to_string(),
        }
    }
}

impl RecordSource for InlineSource {
    fn location(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        parse_records(&self.text, &self.label)
    }
}
