//! Column type system: semantic column types and their comparators.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::natural::natural_cmp;
use crate::domain::value::{parse_data_size, parse_number, parse_percent, parse_timestamp};

/// Total ordering over two raw cell values.
pub type Comparator = fn(&str, &str) -> Ordering;

/// Semantic type of a column, fixed when the column is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Percent,
    DataSize,
    Date,
}

impl ColumnType {
    /// The comparator implementing this type's ordering.
    pub fn comparator(self) -> Comparator {
        match self {
            ColumnType::Text => compare_text,
            ColumnType::Number => compare_number,
            ColumnType::Percent => compare_percent,
            ColumnType::DataSize => compare_data_size,
            ColumnType::Date => compare_date,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Percent => "percent",
            ColumnType::DataSize => "datasize",
            ColumnType::Date => "date",
        };
        f.write_str(name)
    }
}

/// A displayable field: header plus semantic type.
///
/// Built-in catalogues borrow `'static` headers; columns derived from user
/// input (e.g. a `count --group-by` field) own theirs.
#[derive(Clone)]
pub struct ColumnDef {
    header: Cow<'static, str>,
    pub column_type: ColumnType,
    comparator: Comparator,
}

impl ColumnDef {
    pub const fn new(header: &'static str, column_type: ColumnType, comparator: Comparator) -> Self {
        Self {
            header: Cow::Borrowed(header),
            column_type,
            comparator,
        }
    }

    pub const fn text(header: &'static str) -> Self {
        Self::new(header, ColumnType::Text, compare_text)
    }

    pub const fn number(header: &'static str) -> Self {
        Self::new(header, ColumnType::Number, compare_number)
    }

    pub const fn percent(header: &'static str) -> Self {
        Self::new(header, ColumnType::Percent, compare_percent)
    }

    pub const fn data_size(header: &'static str) -> Self {
        Self::new(header, ColumnType::DataSize, compare_data_size)
    }

    pub const fn date(header: &'static str) -> Self {
        Self::new(header, ColumnType::Date, compare_date)
    }

    /// Build a definition at runtime, resolving the comparator from the type.
    pub fn of(header: impl Into<Cow<'static, str>>, column_type: ColumnType) -> Self {
        Self {
            header: header.into(),
            column_type,
            comparator: column_type.comparator(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Case-insensitive header match.
    pub fn matches(&self, name: &str) -> bool {
        self.header.eq_ignore_ascii_case(name.trim())
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        (self.comparator)(left, right)
    }

    /// True iff `left` sorts strictly before `right`.
    pub fn precedes(&self, left: &str, right: &str) -> bool {
        self.compare(left, right) == Ordering::Less
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("header", &self.header)
            .field("column_type", &self.column_type)
            .finish()
    }
}

impl PartialEq for ColumnDef {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.column_type == other.column_type
    }
}

impl Eq for ColumnDef {}

/// True iff `left` sorts strictly before `right` under `column_type`.
pub fn precedes(left: &str, right: &str, column_type: ColumnType) -> bool {
    (column_type.comparator())(left, right) == Ordering::Less
}

pub fn compare_text(left: &str, right: &str) -> Ordering {
    natural_cmp(left, right)
}

/// Numeric order where `-0` and `0` tie; NaN still has a fixed place.
fn cmp_f64(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right).unwrap_or_else(|| left.total_cmp(&right))
}

pub fn compare_number(left: &str, right: &str) -> Ordering {
    cmp_f64(parse_number(left), parse_number(right))
}

/// Higher percentages sort first.
pub fn compare_percent(left: &str, right: &str) -> Ordering {
    cmp_f64(parse_percent(right), parse_percent(left))
}

pub fn compare_data_size(left: &str, right: &str) -> Ordering {
    cmp_f64(data_size_or_zero(left), data_size_or_zero(right))
}

/// Unparsable timestamps are the latest possible instant.
pub fn compare_date(left: &str, right: &str) -> Ordering {
    timestamp_or_max(left).cmp(&timestamp_or_max(right))
}

fn data_size_or_zero(raw: &str) -> f64 {
    parse_data_size(raw).unwrap_or_else(|e| {
        debug!("data size fallback to 0: {}", e);
        0.0
    })
}

fn timestamp_or_max(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut values: Vec<&'static str>, column_type: ColumnType) -> Vec<&'static str> {
        let cmp = column_type.comparator();
        values.sort_by(|a, b| cmp(a, b));
        values
    }

    #[test]
    fn given_same_size_in_different_units_when_comparing_then_equal() {
        assert!(!precedes("1024b", "1kb", ColumnType::DataSize));
        assert!(!precedes("1kb", "1024b", ColumnType::DataSize));
        assert_eq!(compare_data_size("1024b", "1kb"), Ordering::Equal);
    }

    #[test]
    fn given_data_sizes_when_sorting_then_ascending_by_bytes() {
        assert_eq!(
            sorted(vec!["10gb", "5kb", "3mb", "2tb", "1b"], ColumnType::DataSize),
            vec!["1b", "5kb", "3mb", "10gb", "2tb"]
        );
        assert_eq!(
            sorted(vec!["1.5kb", "1500b"], ColumnType::DataSize),
            vec!["1500b", "1.5kb"]
        );
        assert_eq!(
            sorted(vec!["", "10gb", "", "5kb", "", "3mb"], ColumnType::DataSize),
            vec!["", "", "", "5kb", "3mb", "10gb"]
        );
    }

    #[test]
    fn given_unknown_unit_when_comparing_then_treated_as_zero() {
        assert_eq!(compare_data_size("10xb", "0b"), Ordering::Equal);
        assert!(precedes("10xb", "1b", ColumnType::DataSize));
    }

    #[test]
    fn given_percentages_when_sorting_then_descending() {
        assert_eq!(
            sorted(vec!["12%", "33.9%", "99.1%"], ColumnType::Percent),
            vec!["99.1%", "33.9%", "12%"]
        );
        assert_eq!(
            sorted(vec!["0%", "0.5%", "0.2%"], ColumnType::Percent),
            vec!["0.5%", "0.2%", "0%"]
        );
    }

    #[test]
    fn given_dates_when_sorting_then_ascending() {
        assert_eq!(
            sorted(
                vec![
                    "2024-03-01T05:20:15.678Z",
                    "2022-07-12T10:30:45.123Z",
                    "2023-05-23T18:14:29.392Z"
                ],
                ColumnType::Date
            ),
            vec![
                "2022-07-12T10:30:45.123Z",
                "2023-05-23T18:14:29.392Z",
                "2024-03-01T05:20:15.678Z"
            ]
        );
    }

    #[test]
    fn given_unparsable_dates_when_sorting_then_they_sort_last_and_tie() {
        assert_eq!(
            sorted(
                vec!["", "2022-07-12T10:30:45.123Z", "garbage", "2021-01-01T00:00:00.000Z"],
                ColumnType::Date
            ),
            vec!["2021-01-01T00:00:00.000Z", "2022-07-12T10:30:45.123Z", "", "garbage"]
        );
        assert_eq!(compare_date("", "garbage"), Ordering::Equal);
    }

    #[test]
    fn given_numbers_when_comparing_then_numeric_not_lexicographic() {
        assert!(precedes("9", "10", ColumnType::Number));
        assert!(precedes("", "1", ColumnType::Number));
        assert_eq!(compare_number("abc", "0"), Ordering::Equal);
    }

    #[test]
    fn given_nan_input_when_comparing_numbers_then_ordering_is_total() {
        let a = compare_number("NaN", "1");
        let b = compare_number("1", "NaN");
        assert_eq!(a, b.reverse());
    }

    #[test]
    fn given_signed_zero_when_comparing_numbers_then_equal() {
        assert_eq!(compare_number("-0", "0"), Ordering::Equal);
        assert_eq!(compare_number("0", "-0.0"), Ordering::Equal);
        assert_eq!(compare_percent("-0%", "0%"), Ordering::Equal);
    }

    #[test]
    fn test_column_def_matches_case_insensitively() {
        let col = ColumnDef::data_size("STORE-SIZE");
        assert!(col.matches("store-size"));
        assert!(col.matches(" Store-Size "));
        assert!(!col.matches("store"));
    }

    #[test]
    fn test_column_def_of_resolves_comparator_from_type() {
        let col = ColumnDef::of("CPU", ColumnType::Percent);
        assert_eq!(col, ColumnDef::percent("CPU"));
        assert!(col.precedes("90%", "10%"));
    }

    #[test]
    fn given_owned_header_when_building_then_matches_like_builtin() {
        let field = String::from("status");
        let col = ColumnDef::of(field.to_uppercase(), ColumnType::Text);
        assert_eq!(col.header(), "STATUS");
        assert!(col.matches("Status"));
        assert_eq!(col, ColumnDef::text("STATUS"));
    }
}
