//! Display column selection and validation.

use tracing::debug;

use crate::domain::column::ColumnDef;
use crate::domain::error::DomainError;

/// Requesting this name (any case) selects every column.
pub const ALL_COLUMNS: &str = "all";

/// Look up a column by case-insensitive header.
pub fn find_column<'a>(name: &str, available: &'a [ColumnDef]) -> Option<(usize, &'a ColumnDef)> {
    available.iter().enumerate().find(|(_, c)| c.matches(name))
}

/// Resolve requested names against the available columns.
///
/// Returned columns follow the order of `available`, not the request.
/// Any unknown name fails the whole selection.
pub fn select_columns<S: AsRef<str>>(
    requested: &[S],
    available: &[ColumnDef],
) -> Result<Vec<ColumnDef>, DomainError> {
    if requested
        .iter()
        .any(|r| r.as_ref().trim().eq_ignore_ascii_case(ALL_COLUMNS))
    {
        return Ok(available.to_vec());
    }

    let mut selected = vec![false; available.len()];
    for name in requested {
        let name = name.as_ref();
        let (idx, _) = find_column(name, available)
            .ok_or_else(|| DomainError::UnknownColumn(name.trim().to_string()))?;
        selected[idx] = true;
    }

    Ok(available
        .iter()
        .zip(selected)
        .filter_map(|(col, keep)| keep.then(|| col.clone()))
        .collect())
}

/// Pick the display columns for one invocation.
///
/// Precedence: explicit request, then configured defaults, then every
/// built-in column.
pub fn resolve_columns<S: AsRef<str>, T: AsRef<str>>(
    explicit: &[S],
    configured: &[T],
    builtin: &[ColumnDef],
) -> Result<Vec<ColumnDef>, DomainError> {
    if !explicit.is_empty() {
        debug!("resolve_columns: using {} explicit names", explicit.len());
        return select_columns(explicit, builtin);
    }
    if !configured.is_empty() {
        debug!("resolve_columns: using {} configured names", configured.len());
        return select_columns(configured, builtin);
    }
    Ok(builtin.to_vec())
}

/// Fail if any two headers collide case-insensitively.
pub fn ensure_unique_headers(columns: &[ColumnDef]) -> Result<(), DomainError> {
    for (i, col) in columns.iter().enumerate() {
        if columns[..i].iter().any(|prev| prev.matches(col.header())) {
            return Err(DomainError::DuplicateColumn(col.header().to_string()));
        }
    }
    Ok(())
}
