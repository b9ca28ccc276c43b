pub mod config;
pub mod scoring;
pub mod session;
pub mod structures;
pub mod workbench;

pub use structures::column::{Column, DataType, FieldValue};
pub use structures::rowset::table::RowSet;
pub use structures::score_err::ScorecardError;
pub use scoring::weights::WeightVector;
pub use workbench::Workbench;
