//! The transient table aggregate: column definitions plus raw string rows.

use std::collections::BTreeMap;

use crate::domain::column::ColumnDef;
use crate::domain::error::DomainError;
use crate::domain::selection::ensure_unique_headers;
use crate::domain::sort::sort_rows;

/// One row of raw cells, positionally aligned with the table's columns.
pub type Row = Vec<String>;

/// Columns and rows for a single render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, checking header uniqueness and row widths.
    pub fn new(columns: Vec<ColumnDef>, rows: Vec<Row>) -> Result<Self, DomainError> {
        ensure_unique_headers(&columns)?;
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(DomainError::RowWidthMismatch {
                row,
                expected: columns.len(),
                actual: cells.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Build rows by looking up each column header in per-record cell maps.
    ///
    /// Headers missing from a record become empty cells.
    pub fn from_records(
        columns: Vec<ColumnDef>,
        records: &[BTreeMap<&'static str, String>],
    ) -> Result<Self, DomainError> {
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c.header()).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Stable multi-key sort; see [`sort_rows`].
    pub fn sort_by_keys<S: AsRef<str>>(&mut self, keys: &[S]) -> Result<(), DomainError> {
        sort_rows(&mut self.rows, &self.columns, keys)
    }

    /// Keep only `selected` columns, in the order given.
    ///
    /// Every selected header must exist in this table.
    pub fn narrow(self, selected: &[ColumnDef]) -> Result<Self, DomainError> {
        let positions = selected
            .iter()
            .map(|sel| {
                self.columns
                    .iter()
                    .position(|c| c.matches(sel.header()))
                    .ok_or_else(|| DomainError::UnknownColumn(sel.header().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .into_iter()
            .map(|row| positions.iter().map(|&p| row[p].clone()).collect())
            .collect();
        Ok(Self {
            columns: selected.to_vec(),
            rows,
        })
    }

    /// Indices of columns with at least one non-empty cell.
    pub fn visible_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&i| self.rows.iter().any(|row| !row[i].is_empty()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn given_short_row_when_building_then_reports_mismatch() {
        let err = Table::new(
            vec![ColumnDef::text("A"), ColumnDef::text("B")],
            vec![row(&["x", "y"]), row(&["z"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::RowWidthMismatch {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn given_records_when_building_then_missing_headers_are_empty() {
        let mut record = BTreeMap::new();
        record.insert("A", "1".to_string());
        let table = Table::from_records(
            vec![ColumnDef::text("A"), ColumnDef::text("B")],
            &[record],
        )
        .unwrap();
        assert_eq!(table.rows(), &[row(&["1", ""])]);
    }

    #[test]
    fn given_sparse_column_when_checking_visibility_then_it_is_hidden() {
        let table = Table::new(
            vec![ColumnDef::text("A"), ColumnDef::text("B")],
            vec![row(&["x", ""]), row(&["y", ""])],
        )
        .unwrap();
        assert_eq!(table.visible_columns(), vec![0]);
    }

    #[test]
    fn given_selection_when_narrowing_then_projects_cells() {
        let table = Table::new(
            vec![
                ColumnDef::text("A"),
                ColumnDef::text("B"),
                ColumnDef::text("C"),
            ],
            vec![row(&["1", "2", "3"])],
        )
        .unwrap();
        let narrowed = table
            .narrow(&[ColumnDef::text("A"), ColumnDef::text("C")])
            .unwrap();
        assert_eq!(narrowed.rows(), &[row(&["1", "3"])]);
        assert_eq!(narrowed.columns().len(), 2);
    }
}
