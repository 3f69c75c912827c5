//! Document counts per index, optionally split by a field.
//!
//! The captured payload maps each index name to either a `_count` response
//! (`{"count": 42}`), a search response (`{"hits": {"total": ...}}`), or a
//! search response carrying a terms aggregation named after the grouped
//! field:
//!
//! ```json
//! {"logs-1": {"aggregations": {"status": {"buckets": [{"key": "ok", "doc_count": 3}]}}}}
//! ```
//!
//! Unlike the cat entities, the column set depends on the grouped field, so
//! it is built at runtime.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::domain::column::{ColumnDef, ColumnType};
use crate::domain::entities::lenient_string;
use crate::domain::error::DomainError;
use crate::domain::table::Row;

pub const COUNT_INDEX: &str = "INDEX";
pub const COUNT_TOTAL: &str = "COUNT";

/// Sort keys applied when the user gives none.
pub const COUNT_DEFAULT_SORT: &[&str] = &[COUNT_INDEX];

/// File holding the counts payload inside a snapshot directory.
pub const COUNTS_SNAPSHOT_FILE: &str = "counts.json";

/// Index name to its captured count response.
pub type CountResponse = BTreeMap<String, IndexCount>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexCount {
    pub count: Option<u64>,
    pub hits: Option<Hits>,
    pub aggregations: BTreeMap<String, TermsAggregation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Hits {
    pub total: Option<HitsTotal>,
}

/// `hits.total` is a bare number on older clusters, an object on newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HitsTotal {
    Plain(u64),
    Object { value: u64 },
}

impl HitsTotal {
    pub fn value(self) -> u64 {
        match self {
            HitsTotal::Plain(v) | HitsTotal::Object { value: v } => v,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TermsAggregation {
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Bucket {
    #[serde(deserialize_with = "lenient_string")]
    pub key: String,
    pub key_as_string: Option<String>,
    pub doc_count: u64,
}

impl Bucket {
    /// Date and boolean terms carry a readable `key_as_string`.
    pub fn label(&self) -> &str {
        self.key_as_string.as_deref().unwrap_or(&self.key)
    }
}

impl IndexCount {
    /// Ungrouped document count.
    pub fn total(&self) -> Option<u64> {
        self.count.or_else(|| {
            self.hits
                .as_ref()
                .and_then(|h| h.total)
                .map(HitsTotal::value)
        })
    }

    /// Buckets of the aggregation named `field`, or of the only aggregation.
    pub fn buckets(&self, field: &str) -> &[Bucket] {
        let aggregation = self.aggregations.get(field).or_else(|| {
            if self.aggregations.len() == 1 {
                self.aggregations.values().next()
            } else {
                None
            }
        });
        match aggregation {
            Some(a) => &a.buckets,
            None => &[],
        }
    }
}

/// One count row: an index, optionally one group of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRecord {
    pub index: String,
    pub group: Option<String>,
    pub count: u64,
}

impl CountRecord {
    /// Cells in [`count_columns`] order.
    pub fn row(&self) -> Row {
        let mut row = vec![self.index.clone()];
        if let Some(group) = &self.group {
            row.push(group.clone());
        }
        row.push(self.count.to_string());
        row
    }
}

/// Header for a grouped field: `status.code` becomes `STATUS.CODE`.
pub fn group_header(field: &str) -> String {
    field.trim().to_uppercase()
}

/// Columns of a count listing: INDEX, the grouped field if any, COUNT.
pub fn count_columns(group_by: Option<&str>) -> Result<Vec<ColumnDef>, DomainError> {
    let mut columns = vec![ColumnDef::text(COUNT_INDEX)];
    if let Some(field) = group_by {
        let header = group_header(field);
        if header.is_empty() || header == COUNT_INDEX || header == COUNT_TOTAL {
            return Err(DomainError::InvalidGroupBy(field.to_string()));
        }
        columns.push(ColumnDef::of(header, ColumnType::Text));
    }
    columns.push(ColumnDef::number(COUNT_TOTAL));
    Ok(columns)
}

/// Flatten the response into records.
///
/// Grouped listings yield one record per bucket, in bucket order. Indices
/// without a usable count contribute nothing.
pub fn count_records(response: &CountResponse, group_by: Option<&str>) -> Vec<CountRecord> {
    let mut records = Vec::new();
    for (index, counts) in response {
        match group_by {
            Some(field) => {
                let buckets = counts.buckets(field);
                if buckets.is_empty() {
                    debug!("count_records: {} has no buckets for {}", index, field);
                }
                records.extend(buckets.iter().map(|b| CountRecord {
                    index: index.clone(),
                    group: Some(b.label().to_string()),
                    count: b.doc_count,
                }));
            }
            None => match counts.total() {
                Some(count) => records.push(CountRecord {
                    index: index.clone(),
                    group: None,
                    count,
                }),
                None => debug!("count_records: {} has no count", index),
            },
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn decode(json: &str) -> CountResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn given_count_and_search_responses_when_flattening_then_one_record_per_index() {
        let response = decode(
            r#"{"logs-1":{"count":42},
                "logs-2":{"hits":{"total":{"value":7,"relation":"eq"}}},
                "legacy":{"hits":{"total":3}},
                "broken":{}}"#,
        );

        let records = count_records(&response, None);

        let rows: Vec<Row> = records.iter().map(CountRecord::row).collect();
        assert_eq!(
            rows,
            vec![
                vec!["legacy".to_string(), "3".to_string()],
                vec!["logs-1".to_string(), "42".to_string()],
                vec!["logs-2".to_string(), "7".to_string()],
            ]
        );
    }

    #[test]
    fn given_terms_aggregation_when_grouping_then_one_record_per_bucket() {
        let response = decode(
            r#"{"logs-1":{"aggregations":{"status":{"buckets":[
                {"key":"ok","doc_count":10},
                {"key":500,"doc_count":2},
                {"key":1700000000000,"key_as_string":"2023-11-14","doc_count":1}]}}}}"#,
        );

        let records = count_records(&response, Some("status"));

        let groups: Vec<&str> = records
            .iter()
            .filter_map(|r| r.group.as_deref())
            .collect();
        assert_eq!(groups, vec!["ok", "500", "2023-11-14"]);
        assert_eq!(records[0].row(), vec!["logs-1", "ok", "10"]);
    }

    #[test]
    fn given_single_aggregation_under_other_name_when_grouping_then_used() {
        let response = decode(
            r#"{"a":{"aggregations":{"group_by":{"buckets":[{"key":"x","doc_count":1}]}}},
                "b":{"count":5}}"#,
        );

        let records = count_records(&response, Some("status"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, "a");
    }

    #[test]
    fn given_group_field_when_building_columns_then_header_is_uppercased() {
        let columns = count_columns(Some("status.code")).unwrap();
        let headers: Vec<&str> = columns.iter().map(ColumnDef::header).collect();
        assert_eq!(headers, vec!["INDEX", "STATUS.CODE", "COUNT"]);
        assert_eq!(columns[2].column_type, ColumnType::Number);

        let ungrouped = count_columns(None).unwrap();
        assert_eq!(ungrouped, vec![ColumnDef::text("INDEX"), ColumnDef::number("COUNT")]);
    }

    #[rstest]
    #[case("index")]
    #[case("Count")]
    #[case("  ")]
    fn given_clashing_group_field_when_building_columns_then_fails(#[case] field: &str) {
        assert_eq!(
            count_columns(Some(field)),
            Err(DomainError::InvalidGroupBy(field.to_string()))
        );
    }
}
