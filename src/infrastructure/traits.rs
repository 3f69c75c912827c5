//! I/O boundary traits for testability
//!
//! These traits abstract where admin API payloads come from, allowing
//! services to be tested with in-memory implementations.

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::counts::COUNTS_SNAPSHOT_FILE;
use crate::domain::Entity;

/// Source of raw JSON payloads.
pub trait DataSource: Send + Sync {
    /// Raw payload of the endpoint backing `entity`.
    fn fetch(&self, entity: Entity) -> io::Result<String>;

    /// Raw per-index document counts.
    fn fetch_counts(&self) -> io::Result<String>;

    /// A single free-form JSON document.
    fn fetch_document(&self) -> io::Result<String>;

    /// Human-readable location, for error messages.
    fn location(&self) -> String;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Argument value that selects standard input.
pub const STDIN_ARG: &str = "-";

/// JSON read from a file, a snapshot directory, or stdin.
///
/// A directory holds one file per entity (`nodes.json`, `shards.json`, ...),
/// each containing the captured endpoint output, plus `counts.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonSource {
    Stdin,
    Path(PathBuf),
}

impl JsonSource {
    /// Interpret a CLI argument: `-` is stdin, anything else a path (`~` expanded).
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_ARG {
            JsonSource::Stdin
        } else {
            JsonSource::Path(PathBuf::from(shellexpand::tilde(arg).as_ref()))
        }
    }

    fn read_stdin() -> io::Result<String> {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Ok(buf)
    }

    fn read_path(path: &Path) -> io::Result<String> {
        debug!("read_path: {}", path.display());
        std::fs::read_to_string(path)
    }

    /// Read `file` from a snapshot directory, or the file/stdin itself.
    fn read_snapshot(&self, file: &str) -> io::Result<String> {
        match self {
            JsonSource::Stdin => Self::read_stdin(),
            JsonSource::Path(dir) if dir.is_dir() => Self::read_path(&dir.join(file)),
            JsonSource::Path(path) => Self::read_path(path),
        }
    }
}

impl DataSource for JsonSource {
    fn fetch(&self, entity: Entity) -> io::Result<String> {
        self.read_snapshot(&entity.snapshot_file())
    }

    fn fetch_counts(&self) -> io::Result<String> {
        self.read_snapshot(COUNTS_SNAPSHOT_FILE)
    }

    fn fetch_document(&self) -> io::Result<String> {
        match self {
            JsonSource::Stdin => Self::read_stdin(),
            JsonSource::Path(path) => Self::read_path(path),
        }
    }

    fn location(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for JsonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonSource::Stdin => f.write_str("stdin"),
            JsonSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_dash_when_parsing_arg_then_stdin() {
        assert_eq!(JsonSource::from_arg("-"), JsonSource::Stdin);
        assert_eq!(
            JsonSource::from_arg("shards.json"),
            JsonSource::Path(PathBuf::from("shards.json"))
        );
    }

    #[test]
    fn given_snapshot_dir_when_fetching_then_reads_entity_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("shards.json"), "[]").unwrap();
        let source = JsonSource::Path(dir.path().to_path_buf());

        assert_eq!(source.fetch(Entity::Shard).unwrap(), "[]");
        let err = source.fetch(Entity::Node).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(
            source.fetch_counts().unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn given_file_when_fetching_any_entity_then_reads_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("capture.json");
        std::fs::write(&file, r#"{"status":"green"}"#).unwrap();
        let source = JsonSource::Path(file.clone());

        assert_eq!(source.fetch(Entity::Index).unwrap(), r#"{"status":"green"}"#);
        assert_eq!(source.fetch_document().unwrap(), r#"{"status":"green"}"#);
        assert_eq!(source.location(), file.display().to_string());
    }
}
