//! Tab-aligned text rendering
//!
//! [`render_table`] lays a table out with `tabled`: no borders, every column
//! left-aligned and padded to its widest cell plus [`DEFAULT_PADDING`]
//! spaces, the last column of a line unpadded. Columns that are empty in
//! every row are left out.

use std::io::{self, Write};

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Modify, Padding, Style};
use tracing::{debug, instrument};

use crate::domain::Table;

/// Spaces added after the widest cell of a column.
pub const DEFAULT_PADDING: usize = 2;

/// Write `table` as aligned text: a header line, then one line per row.
///
/// Columns whose cells are all empty are omitted.
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn render_table<W: Write>(table: &Table, mut out: W) -> io::Result<()> {
    let visible = table.visible_columns();
    debug!(
        "render_table: {} of {} columns visible",
        visible.len(),
        table.columns().len()
    );

    // Nothing left to align: the header and every row are blank lines.
    if visible.is_empty() {
        for _ in 0..=table.len() {
            out.write_all(b"\n")?;
        }
        return out.flush();
    }

    let mut builder = Builder::default();
    builder.push_record(
        visible
            .iter()
            .map(|&i| table.columns()[i].header().to_string()),
    );
    for row in table.rows() {
        builder.push_record(visible.iter().map(|&i| row[i].clone()));
    }

    let mut grid = builder.build();
    grid.with(Style::empty())
        .with(Padding::new(0, DEFAULT_PADDING, 0, 0))
        .with(Modify::new(Columns::last()).with(Padding::zero()));

    for line in grid.to_string().lines() {
        out.write_all(line.trim_end().as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Render into a `String`.
pub fn render_to_string(table: &Table) -> io::Result<String> {
    let mut buf = Vec::new();
    render_table(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
