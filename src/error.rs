use serde::Serialize;
use thiserror::Error;

/// The only failure the allotment itself can report: the halls cannot hold every student.
/// No partial plan is ever produced alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error(
    "not enough benches: {total_students} students, {total_benches} benches, capacity {total_capacity}"
)]
pub struct CapacityError {
    pub total_students: usize,
    pub total_benches: usize,
    pub total_capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("seats per bench must be 1 or 2, got {0}")]
pub struct InvalidSeatsPerBench(pub u8);

/// Failures of the repositories and tabular importers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("spreadsheet error: {0}")]
    Sheet(#[from] calamine::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{table} table is missing columns: {}", .missing.join(", "))]
    MissingColumns { table: &'static str, missing: Vec<String> },

    #[error("row {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}
