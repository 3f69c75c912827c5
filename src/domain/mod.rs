//! Domain layer: column types, natural ordering, selection, sorting, tables
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod column;
pub mod counts;
pub mod entities;
pub mod error;
pub mod natural;
pub mod selection;
pub mod sort;
pub mod table;
pub mod value;

pub use column::{precedes, ColumnDef, ColumnType, Comparator};
pub use counts::{count_columns, count_records, CountRecord, CountResponse};
pub use entities::{Cells, Entity, Record};
pub use error::{DomainError, ValueError};
pub use natural::natural_cmp;
pub use selection::{resolve_columns, select_columns, ALL_COLUMNS};
pub use sort::{resolve_sort_keys, sort_rows};
pub use table::{Row, Table};
pub use value::{parse_data_size, parse_number, parse_percent, parse_timestamp};
