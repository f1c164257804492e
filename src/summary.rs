use crate::row::Table;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// End-of-run report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub detail_rows: usize,
    pub category_rows: usize,
    pub technology_rows: usize,
    pub merged_rows: usize,
    /// Distinct BOX IDs among detail rows; a missing key counts as the empty ID
    pub unique_box_ids: usize,
    /// Rows actually written, `None` if the output was not saved
    pub rows_written: Option<usize>,
}

impl RunSummary {
    pub fn new(
        details: &Table,
        categories: &Table,
        technologies: &Table,
        merged_rows: usize,
        key_column: &str,
    ) -> Self {
        let unique_box_ids = details
            .iter()
            .map(|row| row.get_or_empty(key_column))
            .collect::<HashSet<_>>()
            .len();

        Self {
            detail_rows: details.len(),
            category_rows: categories.len(),
            technology_rows: technologies.len(),
            merged_rows,
            unique_box_ids,
            rows_written: None,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Summary ===")?;
        writeln!(f, "details: {} rows", self.detail_rows)?;
        writeln!(f, "categories: {} rows", self.category_rows)?;
        writeln!(f, "technologies: {} rows", self.technology_rows)?;
        writeln!(f, "merged: {} rows", self.merged_rows)?;
        write!(f, "unique BOX IDs: {}", self.unique_box_ids)?;
        if self.rows_written.is_none() {
            write!(f, "\noutput: not written")?;
        }
        Ok(())
    }
}
