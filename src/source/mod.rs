pub mod error;
pub mod record_source;
pub mod tabular;
