pub mod column;
pub mod rowset;
pub mod score_err;
