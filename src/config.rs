//! Crate-wide constants. These used to live in a generated config file,
//! but nothing here depends on the environment anymore.

/// The three metric columns every uploaded sheet must carry for scoring.
pub const PRODUCTIVITY_COLUMN: &str = "Productivity";
pub const QUALITY_COLUMN: &str = "Quality";
pub const TIMELINESS_COLUMN: &str = "Timeliness";

/// Column appended by the calculator.
pub const COMPOSITE_COLUMN: &str = "CompositeScore";

/// Default weights applied when the user hasn't supplied any.
pub const DEFAULT_PRODUCTIVITY_WEIGHT: f64 = 0.4;
pub const DEFAULT_QUALITY_WEIGHT: f64 = 0.35;
pub const DEFAULT_TIMELINESS_WEIGHT: f64 = 0.25;

/// Sheet name used for spreadsheet downloads.
pub const EXPORT_SHEET_NAME: &str = "Scores";

/// File names offered for the two download formats.
pub const CSV_EXPORT_NAME: &str = "scorecard.csv";
pub const XLSX_EXPORT_NAME: &str = "scorecard.xlsx";

/// How many sessions the in-memory store keeps before evicting the
/// least recently touched one.
pub const SESSION_CAPACITY: usize = 64;

/// Length of a generated session token.
pub const SESSION_TOKEN_LENGTH: usize = 32;

/// Minimum column width (in characters) for spreadsheet exports.
pub const MIN_EXPORT_COLUMN_WIDTH: f64 = 10.0;
