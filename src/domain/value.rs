//! Parsers turning raw cell strings into comparable values.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::error::ValueError;

/// Timestamp layout used by the cat endpoints, e.g. `2021-05-23T18:14:29.392Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

const KIB: f64 = 1024.0;

/// Parse a plain number. Anything unparsable is 0.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parse a percentage such as `33.9%`. Anything unparsable is 0.
pub fn parse_percent(raw: &str) -> f64 {
    raw.trim().trim_end_matches('%').parse::<f64>().unwrap_or(0.0)
}

/// Parse a byte size such as `5.6kb` or `10GB` into bytes (base 1024).
///
/// The empty string is 0 bytes. A missing or unknown unit is an error.
pub fn parse_data_size(raw: &str) -> Result<f64, ValueError> {
    let lowered = raw.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return Ok(0.0);
    }

    let split = lowered
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(lowered.len());
    let (magnitude, unit) = lowered.split_at(split);
    let unit = unit.trim_start();

    let value = magnitude
        .parse::<f64>()
        .map_err(|_| ValueError::InvalidMagnitude(raw.to_string()))?;

    let multiplier = match unit {
        "b" => 1.0,
        "kb" => KIB,
        "mb" => KIB.powi(2),
        "gb" => KIB.powi(3),
        "tb" => KIB.powi(4),
        _ => {
            return Err(ValueError::UnknownUnit {
                value: raw.to_string(),
                unit: unit.to_string(),
            })
        }
    };

    Ok(value * multiplier)
}

/// Parse a cat-style UTC timestamp.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValueError> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ValueError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bytes("10b", 10.0)]
    #[case::kilobytes("10kb", 10.0 * 1024.0)]
    #[case::megabytes("10mb", 10.0 * 1024.0 * 1024.0)]
    #[case::gigabytes("10gb", 10.0 * 1024.0 * 1024.0 * 1024.0)]
    #[case::terabytes("10tb", 10.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0)]
    #[case::fractional("5.6kb", 5.6 * 1024.0)]
    #[case::mixed_case("10Kb", 10.0 * 1024.0)]
    #[case::empty("", 0.0)]
    #[case::spaced_unit("5 kb", 5.0 * 1024.0)]
    #[case::spaced_fraction("1.5  MB", 1.5 * 1024.0 * 1024.0)]
    fn given_valid_size_when_parsing_then_returns_bytes(#[case] input: &str, #[case] want: f64) {
        assert_eq!(parse_data_size(input).unwrap(), want);
    }

    #[test]
    fn given_unknown_unit_when_parsing_size_then_reports_unit() {
        let err = parse_data_size("10ab").unwrap_err();
        assert_eq!(
            err,
            ValueError::UnknownUnit {
                value: "10ab".into(),
                unit: "ab".into()
            }
        );
    }

    #[rstest]
    #[case("ab10")]
    #[case("kb")]
    #[case("1.2.3mb")]
    fn given_bad_magnitude_when_parsing_size_then_errors(#[case] input: &str) {
        assert!(matches!(
            parse_data_size(input),
            Err(ValueError::InvalidMagnitude(_))
        ));
    }

    #[test]
    fn given_size_without_unit_when_parsing_then_errors() {
        assert!(matches!(
            parse_data_size("1024"),
            Err(ValueError::UnknownUnit { .. })
        ));
    }

    #[rstest]
    #[case("12%", 12.0)]
    #[case("0.5%", 0.5)]
    #[case("77", 77.0)]
    #[case("", 0.0)]
    #[case("n/a", 0.0)]
    fn test_parse_percent(#[case] input: &str, #[case] want: f64) {
        assert_eq!(parse_percent(input), want);
    }

    #[test]
    fn test_parse_number_falls_back_to_zero() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("1.5"), 1.5);
        assert_eq!(parse_number("-"), 0.0);
    }

    #[test]
    fn given_timestamp_with_millis_when_parsing_then_keeps_fraction() {
        let early = parse_timestamp("2021-05-23T18:14:29.392Z").unwrap();
        let late = parse_timestamp("2021-05-23T18:14:29.393Z").unwrap();
        assert!(early < late);
    }

    #[test]
    fn given_timestamp_without_fraction_when_parsing_then_accepts() {
        assert!(parse_timestamp("2024-03-01T05:20:15Z").is_ok());
    }

    #[test]
    fn given_garbage_when_parsing_timestamp_then_errors() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("yesterday").is_err());
    }
}
