//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod filters;
pub mod render;
pub mod services;
pub mod structured;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use filters::{ActionFilter, IndexFilter, RecordFilter, ShardFilter};
pub use render::{render_table, render_to_string};
pub use structured::{format_document, format_table, OutputFormat};
