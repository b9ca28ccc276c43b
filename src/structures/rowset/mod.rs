pub mod table;
pub mod io;
pub mod display;
pub mod utils;
