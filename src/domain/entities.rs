//! Domain entities: the cluster resources esctl can list.
//!
//! Each entity owns its built-in column set, its default sort keys and the
//! record type decoded from the matching admin endpoint payload.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, IgnoredAny, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::column::ColumnDef;
use crate::domain::error::DomainError;

/// Cell values keyed by column header.
pub type Cells = BTreeMap<&'static str, String>;

/// A decoded record that can be laid out as table cells.
pub trait Record {
    fn cells(&self) -> Cells;
}

/// A listable cluster resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Node,
    Index,
    Shard,
    Alias,
    Task,
}

impl Entity {
    pub const ALL: [Entity; 5] = [
        Entity::Node,
        Entity::Index,
        Entity::Shard,
        Entity::Alias,
        Entity::Task,
    ];

    /// Singular name, used as the key in the configuration file.
    pub fn name(self) -> &'static str {
        match self {
            Entity::Node => "node",
            Entity::Index => "index",
            Entity::Shard => "shard",
            Entity::Alias => "alias",
            Entity::Task => "task",
        }
    }

    /// Plural name, as used by `get <plural>`.
    pub fn plural(self) -> &'static str {
        match self {
            Entity::Node => "nodes",
            Entity::Index => "indices",
            Entity::Shard => "shards",
            Entity::Alias => "aliases",
            Entity::Task => "tasks",
        }
    }

    /// File holding this entity's payload inside a snapshot directory.
    pub fn snapshot_file(self) -> String {
        format!("{}.json", self.plural())
    }

    pub fn columns(self) -> &'static [ColumnDef] {
        match self {
            Entity::Node => NODE_COLUMNS,
            Entity::Index => INDEX_COLUMNS,
            Entity::Shard => SHARD_COLUMNS,
            Entity::Alias => ALIAS_COLUMNS,
            Entity::Task => TASK_COLUMNS,
        }
    }

    /// Sort keys applied when the user gives none.
    pub fn default_sort(self) -> &'static [&'static str] {
        match self {
            Entity::Node => &["NAME"],
            Entity::Index => &["INDEX"],
            Entity::Shard => &["INDEX", "SHARD", "PRI-REP"],
            Entity::Alias => &["ALIAS"],
            Entity::Task => &["NODE", "ID"],
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Entity {
    type Err = DomainError;

    /// Accepts singular and plural names, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" | "nodes" => Ok(Entity::Node),
            "index" | "indices" => Ok(Entity::Index),
            "shard" | "shards" => Ok(Entity::Shard),
            "alias" | "aliases" => Ok(Entity::Alias),
            "task" | "tasks" => Ok(Entity::Task),
            _ => Err(DomainError::UnknownEntity(s.trim().to_string())),
        }
    }
}

pub const NODE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("NAME"),
    ColumnDef::text("IP"),
    ColumnDef::text("NODE-ROLE"),
    ColumnDef::text("MASTER"),
    ColumnDef::data_size("HEAP-MAX"),
    ColumnDef::data_size("HEAP-CURRENT"),
    ColumnDef::percent("HEAP-PERCENT"),
    ColumnDef::data_size("RAM-MAX"),
    ColumnDef::data_size("RAM-CURRENT"),
    ColumnDef::percent("RAM-PERCENT"),
    ColumnDef::percent("CPU"),
    ColumnDef::number("LOAD-1M"),
    ColumnDef::data_size("DISK-TOTAL"),
    ColumnDef::data_size("DISK-USED"),
    ColumnDef::data_size("DISK-AVAILABLE"),
    ColumnDef::text("UPTIME"),
];

pub const INDEX_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("INDEX"),
    ColumnDef::text("UUID"),
    ColumnDef::text("HEALTH"),
    ColumnDef::text("STATUS"),
    ColumnDef::number("SHARDS"),
    ColumnDef::number("REPLICAS"),
    ColumnDef::number("DOCS-COUNT"),
    ColumnDef::number("DOCS-DELETED"),
    ColumnDef::date("CREATION-DATE"),
    ColumnDef::data_size("STORE-SIZE"),
    ColumnDef::data_size("PRI-STORE-SIZE"),
];

pub const SHARD_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("INDEX"),
    ColumnDef::number("SHARD"),
    ColumnDef::text("PRI-REP"),
    ColumnDef::text("STATE"),
    ColumnDef::number("DOCS"),
    ColumnDef::data_size("STORE"),
    ColumnDef::text("IP"),
    ColumnDef::text("NODE"),
    ColumnDef::text("NODE-ID"),
    ColumnDef::text("UNASSIGNED-REASON"),
    ColumnDef::date("UNASSIGNED-AT"),
    ColumnDef::number("SEGMENTS-COUNT"),
];

pub const ALIAS_COLUMNS: &[ColumnDef] = &[ColumnDef::text("ALIAS"), ColumnDef::text("INDEX")];

pub const TASK_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("NODE"),
    ColumnDef::number("ID"),
    ColumnDef::text("ACTION"),
    ColumnDef::text("DESCRIPTION"),
    ColumnDef::number("START-TIME"),
    ColumnDef::number("RUNNING-TIME"),
];

pub const SHARD_STATE_STARTED: &str = "STARTED";
pub const SHARD_STATE_RELOCATING: &str = "RELOCATING";
pub const SHARD_STATE_INITIALIZING: &str = "INITIALIZING";
pub const SHARD_STATE_UNASSIGNED: &str = "UNASSIGNED";

pub const SHARD_PRIMARY: &str = "p";
pub const SHARD_REPLICA: &str = "r";

/// Accept strings, numbers, booleans and null as a string cell.
///
/// The cat endpoints return most values as strings but emit `null` for
/// absent ones (e.g. `unassigned.reason` on a started shard).
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientString;

    impl<'de> Visitor<'de> for LenientString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
            d.deserialize_any(LenientString)
        }
    }

    deserializer.deserialize_any(LenientString)
}

/// Row of `_cat/nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ip: String,
    #[serde(rename = "node.role", deserialize_with = "lenient_string")]
    pub node_role: String,
    #[serde(deserialize_with = "lenient_string")]
    pub master: String,
    #[serde(rename = "heap.max", deserialize_with = "lenient_string")]
    pub heap_max: String,
    #[serde(rename = "heap.current", deserialize_with = "lenient_string")]
    pub heap_current: String,
    #[serde(rename = "heap.percent", deserialize_with = "lenient_string")]
    pub heap_percent: String,
    #[serde(rename = "ram.max", deserialize_with = "lenient_string")]
    pub ram_max: String,
    #[serde(rename = "ram.current", deserialize_with = "lenient_string")]
    pub ram_current: String,
    #[serde(rename = "ram.percent", deserialize_with = "lenient_string")]
    pub ram_percent: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cpu: String,
    #[serde(rename = "load_1m", deserialize_with = "lenient_string")]
    pub load_1m: String,
    #[serde(rename = "disk.total", deserialize_with = "lenient_string")]
    pub disk_total: String,
    #[serde(rename = "disk.used", deserialize_with = "lenient_string")]
    pub disk_used: String,
    #[serde(rename = "disk.avail", deserialize_with = "lenient_string")]
    pub disk_avail: String,
    #[serde(deserialize_with = "lenient_string")]
    pub uptime: String,
}

fn with_percent_sign(raw: &str) -> String {
    if raw.is_empty() || raw.ends_with('%') {
        raw.to_string()
    } else {
        format!("{raw}%")
    }
}

impl Record for NodeRecord {
    fn cells(&self) -> Cells {
        BTreeMap::from([
            ("NAME", self.name.clone()),
            ("IP", self.ip.clone()),
            ("NODE-ROLE", self.node_role.clone()),
            ("MASTER", self.master.clone()),
            ("HEAP-MAX", self.heap_max.clone()),
            ("HEAP-CURRENT", self.heap_current.clone()),
            ("HEAP-PERCENT", with_percent_sign(&self.heap_percent)),
            ("RAM-MAX", self.ram_max.clone()),
            ("RAM-CURRENT", self.ram_current.clone()),
            ("RAM-PERCENT", with_percent_sign(&self.ram_percent)),
            ("CPU", with_percent_sign(&self.cpu)),
            ("LOAD-1M", self.load_1m.clone()),
            ("DISK-TOTAL", self.disk_total.clone()),
            ("DISK-USED", self.disk_used.clone()),
            ("DISK-AVAILABLE", self.disk_avail.clone()),
            ("UPTIME", self.uptime.clone()),
        ])
    }
}

/// Row of `_cat/indices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub health: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub index: String,
    #[serde(deserialize_with = "lenient_string")]
    pub uuid: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pri: String,
    #[serde(deserialize_with = "lenient_string")]
    pub rep: String,
    #[serde(rename = "docs.count", deserialize_with = "lenient_string")]
    pub docs_count: String,
    #[serde(rename = "docs.deleted", deserialize_with = "lenient_string")]
    pub docs_deleted: String,
    #[serde(rename = "creation.date.string", deserialize_with = "lenient_string")]
    pub creation_date: String,
    #[serde(rename = "store.size", deserialize_with = "lenient_string")]
    pub store_size: String,
    #[serde(rename = "pri.store.size", deserialize_with = "lenient_string")]
    pub pri_store_size: String,
}

impl Record for IndexRecord {
    fn cells(&self) -> Cells {
        BTreeMap::from([
            ("INDEX", self.index.clone()),
            ("UUID", self.uuid.clone()),
            ("HEALTH", self.health.clone()),
            ("STATUS", self.status.clone()),
            ("SHARDS", self.pri.clone()),
            ("REPLICAS", self.rep.clone()),
            ("DOCS-COUNT", self.docs_count.clone()),
            ("DOCS-DELETED", self.docs_deleted.clone()),
            ("CREATION-DATE", self.creation_date.clone()),
            ("STORE-SIZE", self.store_size.clone()),
            ("PRI-STORE-SIZE", self.pri_store_size.clone()),
        ])
    }
}

/// Row of `_cat/shards`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShardRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub index: String,
    #[serde(deserialize_with = "lenient_string")]
    pub shard: String,
    #[serde(deserialize_with = "lenient_string")]
    pub prirep: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub docs: String,
    #[serde(deserialize_with = "lenient_string")]
    pub store: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ip: String,
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub node: String,
    #[serde(rename = "unassigned.reason", deserialize_with = "lenient_string")]
    pub unassigned_reason: String,
    #[serde(rename = "unassigned.at", deserialize_with = "lenient_string")]
    pub unassigned_at: String,
    #[serde(rename = "segments.count", deserialize_with = "lenient_string")]
    pub segments_count: String,
}

/// `p`/`r` as `primary`/`replica`; anything else unchanged.
pub fn humanize_pri_rep(pri_rep: &str) -> String {
    match pri_rep {
        SHARD_PRIMARY => "primary".to_string(),
        SHARD_REPLICA => "replica".to_string(),
        other => other.to_string(),
    }
}

impl Record for ShardRecord {
    fn cells(&self) -> Cells {
        BTreeMap::from([
            ("INDEX", self.index.clone()),
            ("SHARD", self.shard.clone()),
            ("PRI-REP", humanize_pri_rep(&self.prirep)),
            ("STATE", self.state.clone()),
            ("DOCS", self.docs.clone()),
            ("STORE", self.store.clone()),
            ("IP", self.ip.clone()),
            ("NODE", self.node.clone()),
            ("NODE-ID", self.id.clone()),
            ("UNASSIGNED-REASON", self.unassigned_reason.clone()),
            ("UNASSIGNED-AT", self.unassigned_at.clone()),
            ("SEGMENTS-COUNT", self.segments_count.clone()),
        ])
    }
}

/// Per-index entry of the `_alias` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AliasDetail {
    pub aliases: BTreeMap<String, IgnoredAny>,
}

/// `_alias` response: index name to its aliases.
pub type AliasResponse = BTreeMap<String, AliasDetail>;

/// One alias pointing at one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub alias: String,
    pub index: String,
}

impl AliasRecord {
    /// Flatten the response into one record per (alias, index) pair.
    pub fn from_response(response: &AliasResponse) -> Vec<AliasRecord> {
        response
            .iter()
            .flat_map(|(index, detail)| {
                detail.aliases.keys().map(move |alias| AliasRecord {
                    alias: alias.clone(),
                    index: index.clone(),
                })
            })
            .collect()
    }
}

impl Record for AliasRecord {
    fn cells(&self) -> Cells {
        BTreeMap::from([("ALIAS", self.alias.clone()), ("INDEX", self.index.clone())])
    }
}

/// `_tasks` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TasksResponse {
    pub nodes: BTreeMap<String, TaskNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskNode {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    pub tasks: BTreeMap<String, TaskRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub node: String,
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub action: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub start_time_in_millis: String,
    #[serde(deserialize_with = "lenient_string")]
    pub running_time_in_nanos: String,
}

impl TasksResponse {
    pub fn into_records(self) -> Vec<TaskRecord> {
        self.nodes
            .into_values()
            .flat_map(|node| node.tasks.into_values())
            .collect()
    }
}

impl Record for TaskRecord {
    fn cells(&self) -> Cells {
        BTreeMap::from([
            ("NODE", self.node.clone()),
            ("ID", self.id.clone()),
            ("ACTION", self.action.clone()),
            ("DESCRIPTION", self.description.clone()),
            ("START-TIME", self.start_time_in_millis.clone()),
            ("RUNNING-TIME", self.running_time_in_nanos.clone()),
        ])
    }
}
