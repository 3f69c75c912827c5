//! Service container for dependency injection
//!
//! Wires up services with their data source.

use std::sync::Arc;

use crate::application::services::{DescribeService, TableService};
use crate::config::Settings;
use crate::infrastructure::traits::{DataSource, JsonSource};

/// Container holding settings and the shared data source.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Where payloads are read from
    pub source: Arc<dyn DataSource>,
}

impl ServiceContainer {
    /// Create a container reading JSON from `input` (`-` for stdin).
    pub fn new(settings: Settings, input: &str) -> Self {
        Self::with_deps(settings, Arc::new(JsonSource::from_arg(input)))
    }

    /// Create a service container with a custom source (for testing).
    pub fn with_deps(settings: Settings, source: Arc<dyn DataSource>) -> Self {
        Self {
            settings: Arc::new(settings),
            source,
        }
    }

    pub fn table_service(&self) -> TableService {
        TableService::new(Arc::clone(&self.source))
    }

    pub fn describe_service(&self) -> DescribeService {
        DescribeService::new(Arc::clone(&self.source))
    }
}
