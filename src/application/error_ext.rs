//! Error conversion helpers for reading and decoding payloads
//!
//! Provides extension traits for cleaner error handling with source context.

use std::io;

use serde::de::DeserializeOwned;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add source context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// source.fetch(Entity::Shard)
    ///     .with_source_context("shards from stdin")?;
    /// ```
    fn with_source_context(self, context: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_source_context(self, context: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Source {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Decode a JSON payload, naming `what` in the error.
pub fn decode_json<T: DeserializeOwned>(payload: &str, what: &str) -> ApplicationResult<T> {
    serde_json::from_str(payload).map_err(|e| ApplicationError::Decode {
        what: what.to_string(),
        source: e,
    })
}
