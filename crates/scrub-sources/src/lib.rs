//! Input handling for scrub: payload cells and CSV tables

pub mod literal;
pub mod payload;
pub mod table;

pub use payload::{PayloadNormalizer, PayloadParser};
pub use table::{RowInput, RowOutput, TableLayout, read_rows, write_rows};
