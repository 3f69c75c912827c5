//! Table listing service
//!
//! Turns one endpoint payload into a selected, sorted table:
//! validate columns and sort keys, fetch, decode, filter, sort, narrow.
//! Document counts take the same path with a column set built at runtime.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error_ext::{decode_json, IoResultExt};
use crate::application::filters::{IndexFilter, RecordFilter};
use crate::application::ApplicationResult;
use crate::domain::counts::COUNT_DEFAULT_SORT;
use crate::domain::entities::{
    AliasRecord, AliasResponse, IndexRecord, NodeRecord, ShardRecord, TasksResponse,
};
use crate::domain::{
    count_columns, count_records, resolve_columns, resolve_sort_keys, Cells, ColumnDef,
    CountRecord, CountResponse, Entity, Record, Row, Table,
};
use crate::infrastructure::traits::DataSource;

/// Column and sort choices for one listing, parsed once from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Requested columns; empty means configured or built-in defaults.
    pub columns: Vec<String>,
    /// Sort keys in priority order; empty means the entity's defaults.
    pub sort_by: Vec<String>,
}

/// Service building tables from admin API payloads.
pub struct TableService {
    source: Arc<dyn DataSource>,
}

impl TableService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// Build the table for `entity`.
    ///
    /// Columns and sort keys are validated before any input is read, so a
    /// typo fails fast. Sort keys resolve against every column of the
    /// entity, not just the displayed ones.
    #[instrument(level = "debug", skip(self, filter, options, configured))]
    pub fn list(
        &self,
        entity: Entity,
        filter: &RecordFilter,
        options: &RenderOptions,
        configured: &[String],
    ) -> ApplicationResult<Table> {
        let catalogue = entity.columns();
        let selected = resolve_columns(&options.columns, configured, catalogue)?;
        let keys = sort_keys(options, entity.default_sort());
        resolve_sort_keys(&keys, catalogue)?;

        let payload = self
            .source
            .fetch(entity)
            .with_source_context(&format!(
                "{} from {}",
                entity.plural(),
                self.source.location()
            ))?;
        let records = decode_records(entity, &payload, filter)?;
        debug!("list: {} {} after filtering", records.len(), entity.plural());

        let table = Table::from_records(catalogue.to_vec(), &records)?;
        sorted_and_narrowed(table, &keys, &selected)
    }

    /// Build the document-count table, split by `group_by` when given.
    ///
    /// Columns are `INDEX`, the uppercased field, then `COUNT`; the default
    /// sort is `INDEX`.
    #[instrument(level = "debug", skip(self, filter, options))]
    pub fn count(
        &self,
        group_by: Option<&str>,
        filter: &IndexFilter,
        options: &RenderOptions,
    ) -> ApplicationResult<Table> {
        let catalogue = count_columns(group_by)?;
        let selected = resolve_columns(&options.columns, NOT_CONFIGURED, &catalogue)?;
        let keys = sort_keys(options, COUNT_DEFAULT_SORT);
        resolve_sort_keys(&keys, &catalogue)?;

        let payload = self
            .source
            .fetch_counts()
            .with_source_context(&format!("counts from {}", self.source.location()))?;
        let response: CountResponse = decode_json(&payload, "counts payload")?;
        let rows: Vec<Row> = count_records(&response, group_by)
            .iter()
            .filter(|r| filter.matches(&r.index))
            .map(CountRecord::row)
            .collect();
        debug!("count: {} rows after filtering", rows.len());

        let table = Table::new(catalogue, rows)?;
        sorted_and_narrowed(table, &keys, &selected)
    }
}

/// Counts have no per-entity configured columns.
const NOT_CONFIGURED: &[String] = &[];

/// Explicit sort keys, else `defaults`.
fn sort_keys<'a>(options: &'a RenderOptions, defaults: &[&'a str]) -> Vec<&'a str> {
    if options.sort_by.is_empty() {
        defaults.to_vec()
    } else {
        options.sort_by.iter().map(String::as_str).collect()
    }
}

fn sorted_and_narrowed(
    mut table: Table,
    keys: &[&str],
    selected: &[ColumnDef],
) -> ApplicationResult<Table> {
    table.sort_by_keys(keys)?;
    Ok(table.narrow(selected)?)
}

fn decode_records(
    entity: Entity,
    payload: &str,
    filter: &RecordFilter,
) -> ApplicationResult<Vec<Cells>> {
    let what = format!("{} payload", entity.plural());
    let cells = match entity {
        Entity::Node => keep_cells(decode_json::<Vec<NodeRecord>>(payload, &what)?, |_| true),
        Entity::Index => keep_cells(decode_json::<Vec<IndexRecord>>(payload, &what)?, |r| {
            filter.keeps_index(&r.index)
        }),
        Entity::Shard => keep_cells(decode_json::<Vec<ShardRecord>>(payload, &what)?, |r| {
            filter.keeps_shard(r)
        }),
        Entity::Alias => {
            let response: AliasResponse = decode_json(payload, &what)?;
            keep_cells(AliasRecord::from_response(&response), |r| {
                filter.keeps_index(&r.index)
            })
        }
        Entity::Task => {
            let response: TasksResponse = decode_json(payload, &what)?;
            keep_cells(response.into_records(), |r| filter.keeps_task(r))
        }
    };
    Ok(cells)
}

fn keep_cells<R: Record>(records: Vec<R>, keep: impl Fn(&R) -> bool) -> Vec<Cells> {
    records
        .iter()
        .filter(|r| keep(*r))
        .map(R::cells)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::DomainError;
    use std::io;

    struct FailingSource;

    impl DataSource for FailingSource {
        fn fetch(&self, _entity: Entity) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn fetch_counts(&self) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn fetch_document(&self) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn location(&self) -> String {
            "missing.json".to_string()
        }
    }

    #[test]
    fn given_bad_column_when_listing_then_fails_before_reading_input() {
        let service = TableService::new(Arc::new(FailingSource));
        let options = RenderOptions {
            columns: vec!["BOGUS".into()],
            ..Default::default()
        };

        let err = service
            .list(Entity::Shard, &RecordFilter::All, &options, &[])
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::UnknownColumn(ref c)) if c == "BOGUS"
        ));
    }

    #[test]
    fn given_clashing_group_field_when_counting_then_fails_before_reading_input() {
        let service = TableService::new(Arc::new(FailingSource));

        let err = service
            .count(Some("index"), &IndexFilter::default(), &RenderOptions::default())
            .unwrap_err();

        assert!(err.is_usage());
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidGroupBy(_))
        ));
    }

    #[test]
    fn given_unreadable_source_when_listing_then_source_error() {
        let service = TableService::new(Arc::new(FailingSource));

        let err = service
            .list(Entity::Node, &RecordFilter::All, &RenderOptions::default(), &[])
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "cannot read nodes from missing.json: no such file"
        );
    }
}
