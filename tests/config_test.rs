//! Tests for layered configuration loading
//!
//! Environment variables are process-global, so every override lives in one test.

use tempfile::TempDir;

use esctl::application::structured::OutputFormat;
use esctl::config::Settings;
use esctl::domain::Entity;

#[test]
fn given_env_overrides_when_loading_then_env_wins_over_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("esctl.yml");
    std::fs::write(
        &path,
        "output: yaml\nentities:\n  shard:\n    columns: [INDEX]\n  node:\n    columns: [NAME]\n",
    )
    .unwrap();
    std::env::set_var("ESCTL_OUTPUT", "json");
    std::env::set_var("ESCTL_ENTITIES__SHARD__COLUMNS", "INDEX,STATE,STORE");

    // Act
    let result = Settings::load(Some(&path.to_string_lossy()));
    std::env::remove_var("ESCTL_OUTPUT");
    std::env::remove_var("ESCTL_ENTITIES__SHARD__COLUMNS");
    let settings = result.unwrap();

    // Assert
    assert_eq!(settings.output, OutputFormat::Json);
    assert_eq!(
        settings.configured_columns(Entity::Shard),
        &["INDEX".to_string(), "STATE".to_string(), "STORE".to_string()]
    );
    assert_eq!(settings.configured_columns(Entity::Node), &["NAME".to_string()]);
}
