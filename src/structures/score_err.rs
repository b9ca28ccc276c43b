use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScorecardError {
    /// thrown when an uploaded file has an extension we don't parse
    #[error("unsupported file format '{0}', expected .csv, .xls or .xlsx")]
    UnsupportedFormat(String),

    /// first is the file name, second is the cause
    #[error("could not parse '{0}': {1}")]
    ParseFailure(String, String),

    /// a required metric column is absent, null or non-numeric.
    /// row numbers are 1-based, matching what the user sees in a spreadsheet
    #[error("row {row}: column '{column}' is missing or not a number")]
    MissingColumn { row: usize, column: String },

    /// thrown when a recalculation or download names a token the store
    /// doesn't know (never stored, or already evicted)
    #[error("no session found for token '{0}'")]
    SessionNotFound(String),

    /// weights must each sit inside [0.0, 1.0]
    #[error("weight '{name}' is {value}, must be between 0.0 and 1.0")]
    WeightOutOfRange { name: &'static str, value: f64 },

    /// first is the export format, second is the cause
    #[error("failed to build {0} export: {1}")]
    ExportFailure(&'static str, String),

    /// first is the file name, second is the error message
    #[error("an error has occurred with file {0}: {1}")]
    IOFailure(String, String),
}
