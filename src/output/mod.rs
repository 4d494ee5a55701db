//! Output module for enriched tables and run summaries
//!
//! This module handles:
//! - Reading the input CSV and writing it back with the enriched columns
//! - Tallying and printing per-run statistics

pub mod stats;
mod table;

pub use stats::{print_statistics, BatchStatistics};
pub use table::{read_table, write_enriched, InputTable};
