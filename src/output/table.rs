//! Result table and its CSV serialization

use crate::extract::ProductRecord;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Fixed header row of the result table
pub const HEADER: [&str; 4] = ["Url", "Image", "Name", "Price"];

/// Product records in the order their pages were processed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    records: Vec<ProductRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record after all previous ones
    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Number of rows including the header
    pub fn row_count(&self) -> usize {
        self.records.len() + 1
    }

    /// All rows, header first
    pub fn rows(&self) -> impl Iterator<Item = [&str; 4]> + '_ {
        std::iter::once(HEADER).chain(self.records.iter().map(ProductRecord::to_row))
    }

    /// Writes the table as CSV, header first
    pub fn write_to<W: Write>(&self, writer: W) -> OutputResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Writes the result table to a CSV file
///
/// Missing parent directories are created and an existing file is replaced.
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::output::{write_csv, ResultTable};
/// use std::path::Path;
///
/// write_csv(&ResultTable::new(), Path::new("results/products.csv")).unwrap();
/// ```
pub fn write_csv(table: &ResultTable, path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    table.write_to(file)?;

    tracing::info!(
        "Wrote {} rows to {}",
        table.row_count(),
        path.display()
    );
    Ok(())
}
