//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config` / `ESCTL_CONFIG`, else `$XDG_CONFIG_HOME/esctl/esctl.yml`
//! 3. Environment variables: `ESCTL_*` prefix

use std::collections::BTreeMap;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::structured::OutputFormat;
use crate::application::ApplicationError;
use crate::domain::{select_columns, Entity};

/// Per-entity display defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EntityConfig {
    /// Columns shown when `--columns` is not given
    pub columns: Vec<String>,
}

/// Unified configuration for esctl.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Output format when `--output` is not given
    pub output: OutputFormat,
    /// Keyed by singular entity name (`node`, `index`, `shard`, `alias`, `task`)
    pub entities: BTreeMap<String, EntityConfig>,
}

/// Get the XDG config directory for esctl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "esctl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("esctl.yml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(raw: &str) -> Result<PathBuf, ApplicationError> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| ApplicationError::config(format!("expand {raw}: {e}")))
}

/// The config file in effect: the explicit one if given, else the global one.
pub fn config_path(explicit: Option<&str>) -> Result<Option<PathBuf>, ApplicationError> {
    match explicit {
        Some(raw) => expand_path(raw).map(Some),
        None => Ok(global_config_path()),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// An explicit config file must exist; the global one is optional.
    /// Unknown entity names or columns in the file are config errors.
    pub fn load(explicit: Option<&str>) -> Result<Self, ApplicationError> {
        let mut builder = Config::builder()
            .set_default("output", OutputFormat::default().to_string())
            .map_err(config_err)?;

        match explicit {
            Some(raw) => {
                let path = expand_path(raw)?;
                debug!("load: config file {}", path.display());
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
            }
            None => {
                if let Some(path) = global_config_path() {
                    debug!("load: global config file {}", path.display());
                    builder =
                        builder.add_source(File::from(path).format(FileFormat::Yaml).required(false));
                }
            }
        }

        builder = builder.add_source(env_source());

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.validated()
    }

    /// Normalize entity keys to singular names and check every configured column.
    fn validated(self) -> Result<Self, ApplicationError> {
        let output = self.output;
        let mut entities = BTreeMap::new();
        for (name, entity_config) in self.entities {
            let entity: Entity = name
                .parse()
                .map_err(|e| ApplicationError::config(format!("entities: {e}")))?;
            select_columns(&entity_config.columns, entity.columns())
                .map_err(|e| ApplicationError::config(format!("entities.{name}.columns: {e}")))?;
            entities.insert(entity.name().to_string(), entity_config);
        }
        Ok(Self { output, entities })
    }

    /// Configured default columns for `entity`, empty if none.
    pub fn configured_columns(&self, entity: Entity) -> &[String] {
        self.entities
            .get(entity.name())
            .map(|c| c.columns.as_slice())
            .unwrap_or(&[])
    }

    /// Show the effective configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, ApplicationError> {
        serde_yaml::to_string(self)
            .map_err(|e| ApplicationError::config(format!("serialize config: {e}")))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# esctl configuration
#
# Location: ~/.config/esctl/esctl.yml (or --config / ESCTL_CONFIG)
# Environment overrides use the ESCTL_ prefix and "__" for nesting:
#   ESCTL_OUTPUT=json
#   ESCTL_ENTITIES__SHARD__COLUMNS=INDEX,SHARD,STATE

# Default output format: table, json or yaml
output: table

# Default display columns per entity (node, index, shard, alias, task).
# Columns keep their built-in order; "all" selects every column.
entities: {}
#  shard:
#    columns: [INDEX, SHARD, PRI-REP, STATE, STORE, NODE]
#  node:
#    columns: [NAME, NODE-ROLE, HEAP-PERCENT, CPU, LOAD-1M]
"#
        .to_string()
    }
}

/// `ESCTL_*` variables; entity column lists are comma-separated.
fn env_source() -> Environment {
    let base = Environment::with_prefix("ESCTL")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .try_parsing(true);
    Entity::ALL.iter().fold(base, |env, entity| {
        env.with_list_parse_key(&format!("entities.{}.columns", entity.name()))
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("esctl.yml");
        std::fs::write(&path, content).expect("write config");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn given_yaml_file_when_loading_then_reads_output_and_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "output: yaml\nentities:\n  shards:\n    columns: [INDEX, state]\n",
        );

        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(settings.output, OutputFormat::Yaml);
        assert_eq!(
            settings.configured_columns(Entity::Shard),
            &["INDEX".to_string(), "state".to_string()]
        );
        assert!(settings.configured_columns(Entity::Node).is_empty());
    }

    #[test]
    fn given_unknown_entity_when_loading_then_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "entities:\n  cluster:\n    columns: [NAME]\n");

        let err = Settings::load(Some(&path)).unwrap_err();

        assert!(matches!(err, ApplicationError::Config { .. }));
        assert!(err.to_string().contains("unknown entity: cluster"));
    }

    #[test]
    fn given_unknown_column_when_loading_then_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "entities:\n  node:\n    columns: [NAME, SIZE]\n");

        let err = Settings::load(Some(&path)).unwrap_err();

        assert!(err.to_string().contains("entities.node.columns: unknown column: SIZE"));
    }

    #[test]
    fn given_missing_explicit_file_when_loading_then_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yml");
        assert!(Settings::load(Some(&missing.to_string_lossy())).is_err());
    }

    #[test]
    fn given_template_when_loading_then_parses_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &Settings::template());

        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(settings.output, OutputFormat::Table);
        assert!(settings.entities.is_empty());
    }

    #[test]
    fn given_settings_when_to_yaml_then_round_trips_keys() {
        let mut settings = Settings::default();
        settings.entities.insert(
            "task".into(),
            EntityConfig {
                columns: vec!["NODE".into()],
            },
        );
        let yaml = settings.to_yaml().unwrap();
        assert!(yaml.contains("output: table"));
        assert!(yaml.contains("task:"));
        assert!(yaml.contains("- NODE"));
    }

    #[test]
    fn given_tilde_path_when_expanding_then_uses_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path("~/esctl.yml").unwrap();
        assert!(expanded.starts_with(&home));
        assert!(!expanded.to_string_lossy().contains('~'));
    }
}
