//! Output module for crawl results
//!
//! This module handles:
//! - The result table of extracted products
//! - Writing the table as CSV
//! - Recording and printing crawl statistics

pub mod stats;
mod table;

pub use stats::{print_statistics, CrawlStatistics, FailedPage};
pub use table::{write_csv, ResultTable, HEADER};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
