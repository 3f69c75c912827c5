//! Record filters applied to decoded payloads before projection.

use regex::Regex;
use tracing::warn;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::entities::{
    ShardRecord, TaskRecord, SHARD_PRIMARY, SHARD_REPLICA, SHARD_STATE_INITIALIZING,
    SHARD_STATE_RELOCATING, SHARD_STATE_STARTED, SHARD_STATE_UNASSIGNED,
};

/// Exact index-name match; no name means every index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexFilter {
    pub index: Option<String>,
}

impl IndexFilter {
    pub fn new(index: Option<String>) -> Self {
        Self { index }
    }

    pub fn matches(&self, index: &str) -> bool {
        self.index.as_deref().map_or(true, |want| want == index)
    }
}

/// Shard selection by location, role and state.
///
/// Within the role flags and within the state flags, any selected flag
/// passes; selecting none passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardFilter {
    pub index: Option<String>,
    pub node: Option<String>,
    pub shard: Option<u32>,
    pub primary: bool,
    pub replica: bool,
    pub started: bool,
    pub relocating: bool,
    pub initializing: bool,
    pub unassigned: bool,
}

impl ShardFilter {
    pub fn matches(&self, record: &ShardRecord) -> bool {
        if let Some(index) = &self.index {
            if &record.index != index {
                return false;
            }
        }
        if let Some(node) = &self.node {
            if &record.node != node {
                return false;
            }
        }
        if let Some(shard) = self.shard {
            match record.shard.parse::<u32>() {
                Ok(n) if n == shard => {}
                Ok(_) => return false,
                Err(_) => {
                    warn!(
                        "shard number '{}' of index {} is not numeric, skipping",
                        record.shard, record.index
                    );
                    return false;
                }
            }
        }
        self.matches_role(&record.prirep) && self.matches_state(&record.state)
    }

    fn matches_role(&self, prirep: &str) -> bool {
        if !self.primary && !self.replica {
            return true;
        }
        (self.primary && prirep == SHARD_PRIMARY) || (self.replica && prirep == SHARD_REPLICA)
    }

    fn matches_state(&self, state: &str) -> bool {
        let wanted = [
            (self.started, SHARD_STATE_STARTED),
            (self.relocating, SHARD_STATE_RELOCATING),
            (self.initializing, SHARD_STATE_INITIALIZING),
            (self.unassigned, SHARD_STATE_UNASSIGNED),
        ];
        if wanted.iter().all(|(on, _)| !on) {
            return true;
        }
        wanted.iter().any(|&(on, name)| on && state == name)
    }
}

/// Task action patterns with `*` wildcards; any match passes.
#[derive(Debug, Clone, Default)]
pub struct ActionFilter {
    patterns: Vec<Regex>,
}

impl ActionFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> ApplicationResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| wildcard_regex(p.as_ref()))
            .collect::<ApplicationResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, record: &TaskRecord) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|re| re.is_match(&record.action))
    }
}

/// Compile `indices:*/bulk*` style patterns into an anchored regex.
fn wildcard_regex(pattern: &str) -> ApplicationResult<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).map_err(|e| ApplicationError::InvalidFilter {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Filter for one `get` invocation.
#[derive(Debug, Clone, Default)]
pub enum RecordFilter {
    #[default]
    All,
    Index(IndexFilter),
    Shard(ShardFilter),
    Task(ActionFilter),
}

impl RecordFilter {
    /// Index-name test, used for indices and aliases.
    pub fn keeps_index(&self, index: &str) -> bool {
        match self {
            RecordFilter::Index(f) => f.matches(index),
            _ => true,
        }
    }

    pub fn keeps_shard(&self, record: &ShardRecord) -> bool {
        match self {
            RecordFilter::Shard(f) => f.matches(record),
            _ => true,
        }
    }

    pub fn keeps_task(&self, record: &TaskRecord) -> bool {
        match self {
            RecordFilter::Task(f) => f.matches(record),
            _ => true,
        }
    }
}
