//! JSON and YAML output
//!
//! Tables become a list of objects keyed by header in display order.
//! `describe` re-emits an arbitrary JSON document.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Table;

/// Output format for listings and documents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text columns
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        };
        f.write_str(name)
    }
}

/// One object per row, keys in column order (`preserve_order`).
pub fn table_to_objects(table: &Table) -> Vec<Map<String, Value>> {
    table
        .rows()
        .iter()
        .map(|row| {
            table
                .columns()
                .iter()
                .zip(row)
                .map(|(col, cell)| (col.header().to_string(), Value::String(cell.clone())))
                .collect()
        })
        .collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> ApplicationResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ApplicationError::Serialize {
        format: OutputFormat::Json.to_string(),
        message: e.to_string(),
    })
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> ApplicationResult<String> {
    serde_yaml::to_string(value).map_err(|e| ApplicationError::Serialize {
        format: OutputFormat::Yaml.to_string(),
        message: e.to_string(),
    })
}

/// Serialize a table as JSON or YAML.
///
/// `Table` is not a structured format; callers render it as text instead.
pub fn format_table(table: &Table, format: OutputFormat) -> ApplicationResult<String> {
    let objects = table_to_objects(table);
    match format {
        OutputFormat::Json => to_json(&objects),
        OutputFormat::Yaml => to_yaml(&objects),
        OutputFormat::Table => Err(ApplicationError::Serialize {
            format: format.to_string(),
            message: "text tables are rendered, not serialized".to_string(),
        }),
    }
}

/// Re-emit a JSON document; `Table` falls back to YAML.
pub fn format_document(document: &Value, format: OutputFormat) -> ApplicationResult<String> {
    match format {
        OutputFormat::Json => to_json(document),
        OutputFormat::Yaml | OutputFormat::Table => to_yaml(document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnDef;
    use serde_json::json;

    fn sample() -> Table {
        Table::new(
            vec![ColumnDef::text("INDEX"), ColumnDef::number("SHARD")],
            vec![vec!["logs".into(), "0".into()]],
        )
        .unwrap()
    }

    #[test]
    fn given_table_when_formatting_json_then_rows_are_objects() {
        let out = format_table(&sample(), OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!([{"INDEX": "logs", "SHARD": "0"}]));
    }

    #[test]
    fn given_table_when_formatting_yaml_then_keys_follow_columns() {
        let out = format_table(&sample(), OutputFormat::Yaml).unwrap();
        assert!(out.starts_with("- INDEX: logs\n"));
        assert!(out.contains("SHARD:"));
    }

    #[test]
    fn given_table_format_when_formatting_table_then_rejected() {
        assert!(format_table(&sample(), OutputFormat::Table).is_err());
    }

    #[test]
    fn given_document_when_table_format_then_falls_back_to_yaml() {
        let doc = json!({"status": "green", "number_of_nodes": 3});
        let out = format_document(&doc, OutputFormat::Table).unwrap();
        assert!(out.contains("status: green"));
        assert!(out.contains("number_of_nodes: 3"));
    }
}
