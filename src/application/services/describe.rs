//! Document re-emission service

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::application::error_ext::{decode_json, IoResultExt};
use crate::application::structured::{format_document, OutputFormat};
use crate::application::ApplicationResult;
use crate::infrastructure::traits::DataSource;

/// Pretty-prints whole JSON documents such as cluster health or settings dumps.
pub struct DescribeService {
    source: Arc<dyn DataSource>,
}

impl DescribeService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn describe(&self, format: OutputFormat) -> ApplicationResult<String> {
        let payload = self
            .source
            .fetch_document()
            .with_source_context(&format!("document from {}", self.source.location()))?;
        let document: Value = decode_json(&payload, "document")?;
        format_document(&document, format)
    }
}
