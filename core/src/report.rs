//! # Presence Table
//!
//! The logical report grid: one column per scanned network (in request
//! order), one row per rank position, cells filled by interleaving each
//! network's resolved-name list. Shorter columns are padded with empty
//! cells so the grid stays rectangular. Rendering to text is a
//! presentation detail; the grid itself is the contract.

use crate::resolver::NameBindings;
use crate::scanner::ScanResult;

/// Derived, read-only report grid.
#[derive(Debug, Clone)]
pub struct ReportTable {
    headers: Vec<String>,
    columns: Vec<Vec<String>>,
    row_count: usize,
}

impl ReportTable {
    /// Builds the grid from a scan and its name bindings. Addresses without
    /// a binding (resolution skipped) fall back to their dotted-quad text.
    pub fn build(scan: &ScanResult, bindings: &NameBindings) -> Self {
        let mut headers = Vec::with_capacity(scan.network_count());
        let mut columns = Vec::with_capacity(scan.network_count());

        for (network, live) in scan.entries() {
            headers.push(network.title());
            columns.push(
                live.iter()
                    .map(|addr| match bindings.get(addr) {
                        Some(name) => name.clone(),
                        None => addr.to_string(),
                    })
                    .collect::<Vec<String>>(),
            );
        }

        let row_count = columns.iter().map(Vec::len).max().unwrap_or(0);

        Self {
            headers,
            columns,
            row_count,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows; zero when no host was live anywhere.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Cell text at `(row, col)`; the empty string for padding cells.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.columns
            .get(col)
            .and_then(|column| column.get(row))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Rows of the grid, padded to the full column count.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.row_count)
            .map(|row| (0..self.column_count()).map(|col| self.cell(row, col)).collect())
    }

    /// Plain-text rendering: headers, a dash rule, then the data rows,
    /// each cell left-justified to `col_width` and joined with `" | "`.
    pub fn render(&self, col_width: usize) -> String {
        let mut out = String::new();

        let header = self
            .headers
            .iter()
            .map(|title| format!("{title:<col_width$}"))
            .collect::<Vec<String>>()
            .join(" | ");
        out.push_str(&header);
        out.push('\n');

        let rule_len = col_width * self.column_count() + 3 * self.column_count().saturating_sub(1);
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');

        for row in self.rows() {
            let line = row
                .iter()
                .map(|cell| format!("{cell:<col_width$}"))
                .collect::<Vec<String>>()
                .join(" | ");
            out.push_str(&line);
            out.push('\n');
        }

        out
    }
}
