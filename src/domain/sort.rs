//! Multi-key stable row sorting.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::column::ColumnDef;
use crate::domain::error::DomainError;
use crate::domain::selection::find_column;
use crate::domain::table::Row;

/// A sort key resolved to a column position and its comparator.
#[derive(Debug, Clone)]
pub struct ResolvedKey {
    pub index: usize,
    pub column: ColumnDef,
}

/// Resolve every key before sorting; the first unknown key fails.
pub fn resolve_sort_keys<S: AsRef<str>>(
    keys: &[S],
    columns: &[ColumnDef],
) -> Result<Vec<ResolvedKey>, DomainError> {
    keys.iter()
        .map(|key| {
            let key = key.as_ref();
            find_column(key, columns)
                .map(|(index, column)| ResolvedKey {
                    index,
                    column: column.clone(),
                })
                .ok_or_else(|| DomainError::UnknownSortKey(key.trim().to_string()))
        })
        .collect()
}

/// Compare two rows key by key; the first decisive key wins.
pub fn compare_rows(left: &Row, right: &Row, keys: &[ResolvedKey]) -> Ordering {
    for key in keys {
        let (l, r) = (&left[key.index], &right[key.index]);
        if l == r {
            continue;
        }
        let ord = key.column.compare(l, r);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Stable in-place sort of `rows` by `keys` (priority order).
pub fn sort_rows<S: AsRef<str>>(
    rows: &mut [Row],
    columns: &[ColumnDef],
    keys: &[S],
) -> Result<(), DomainError> {
    let resolved = resolve_sort_keys(keys, columns)?;
    if resolved.is_empty() {
        return Ok(());
    }
    debug!(
        "sort_rows: {} rows by {:?}",
        rows.len(),
        resolved.iter().map(|k| k.column.header()).collect::<Vec<_>>()
    );
    rows.sort_by(|a, b| compare_rows(a, b, &resolved));
    Ok(())
}
