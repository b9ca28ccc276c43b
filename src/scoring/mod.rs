pub mod calculator;
pub mod weights;
