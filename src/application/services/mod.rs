//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `DataSource` boundary trait but are themselves
//! concrete structs, not traits.

mod describe;
mod table;

pub use describe::DescribeService;
pub use table::{RenderOptions, TableService};
