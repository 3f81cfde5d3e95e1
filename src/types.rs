use chrono::{DateTime, Utc};

/// A single record from the most recent stream of a log group.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: Option<DateTime<Utc>>,
    pub message: String,
}

/// Outcome of the resolve-and-fetch pipeline for a selected service.
///
/// Only `Failed` represents an actual error; the other non-`Lines` variants
/// are informational states a healthy service can be in.
#[derive(Debug, Clone)]
pub enum LogsOutcome {
    Lines(Vec<LogLine>),
    NoLogGroup,
    NoStreams,
    Failed(String),
}
