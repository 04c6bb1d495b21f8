//! CSV reading and writing

pub mod reader;
pub mod writer;

pub use reader::{parse_table, read_table};
pub use writer::{table_to_csv, write_table};
