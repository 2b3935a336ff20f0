//! Export of resolution results.

mod csv;

pub use csv::{write_csv, write_records};
