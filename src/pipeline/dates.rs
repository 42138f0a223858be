//! Date coercion under the four format variants (spec.md §4.3).

use chrono::{Datelike, NaiveDate};

/// Parses `raw` under `format`, resolving `!MMDD`/`!YDDD`/`!YYYYDDD` against
/// `processing_date` for year rollover. Returns `None` on any coercion
/// failure (never errors — cleaning degrades to null per-cell).
pub fn parse_date(raw: &str, format: &str, processing_date: NaiveDate) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match format {
        "!MMDD" => parse_mmdd(trimmed, processing_date),
        "!YDDD" => parse_yddd(trimmed, processing_date),
        "!YYYYDDD" => parse_yyyyddd(trimmed),
        fmt if fmt.starts_with('%') => NaiveDate::parse_from_str(trimmed, fmt).ok(),
        _ => None,
    }
}

fn parse_mmdd(raw: &str, processing_date: NaiveDate) -> Option<NaiveDate> {
    if raw.len() != 4 {
        return None;
    }
    let year = processing_date.year();
    let candidate = NaiveDate::parse_from_str(&format!("{year}{raw}"), "%Y%m%d").ok()?;
    if candidate > processing_date {
        NaiveDate::from_ymd_opt(year - 1, candidate.month(), candidate.day())
    } else {
        Some(candidate)
    }
}

fn parse_yddd(raw: &str, processing_date: NaiveDate) -> Option<NaiveDate> {
    if raw.len() != 4 {
        return None;
    }
    let decade_digit = (processing_date.year() / 10) % 10;
    let two_digit_year: i32 = format!("{decade_digit}{}", &raw[..1]).parse().ok()?;
    let year = 2000 + two_digit_year;
    let day_of_year: u32 = raw[1..].parse().ok()?;
    let candidate = NaiveDate::from_yo_opt(year, day_of_year)?;
    if candidate > processing_date {
        NaiveDate::from_yo_opt(year - 10, day_of_year)
    } else {
        Some(candidate)
    }
}

fn parse_yyyyddd(raw: &str) -> Option<NaiveDate> {
    if raw.len() < 5 {
        return None;
    }
    let year: i32 = raw[..4].parse().ok()?;
    let day_of_year: u32 = raw[4..].parse().ok()?;
    if day_of_year == 0 || day_of_year > 366 {
        return None;
    }
    NaiveDate::from_yo_opt(year, day_of_year)
}

/// Day-difference between a purchase date and the file's processing date,
/// used by the `timeliness` derived attribute.
pub fn timeliness_days(processing_date: NaiveDate, purchase_date: NaiveDate) -> i64 {
    (processing_date - purchase_date).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn standard_format_parses() {
        assert_eq!(
            parse_date("2025-03-01", "%Y-%m-%d", pd(2025, 3, 15)),
            Some(pd(2025, 3, 1))
        );
    }

    #[test]
    fn mmdd_within_same_year_uses_processing_year() {
        assert_eq!(parse_date("0301", "!MMDD", pd(2025, 3, 15)), Some(pd(2025, 3, 1)));
    }

    #[test]
    fn mmdd_after_processing_date_rolls_back_a_year() {
        assert_eq!(parse_date("1231", "!MMDD", pd(2025, 1, 5)), Some(pd(2024, 12, 31)));
    }

    #[test]
    fn yddd_after_processing_date_rolls_back_a_decade() {
        let result = parse_date("9365", "!YDDD", pd(2025, 1, 5));
        assert!(result.is_some());
        assert!(result.unwrap() <= pd(2025, 1, 5));
    }

    #[test]
    fn yyyyddd_parses_year_and_day_of_year() {
        assert_eq!(parse_date("2025060", "!YYYYDDD", pd(2025, 3, 15)), Some(pd(2025, 3, 1)));
    }

    #[test]
    fn yyyyddd_rejects_invalid_day() {
        assert_eq!(parse_date("2025400", "!YYYYDDD", pd(2025, 3, 15)), None);
    }

    #[test]
    fn timeliness_is_a_signed_day_difference() {
        assert_eq!(timeliness_days(pd(2025, 3, 10), pd(2025, 3, 1)), 9);
    }
}
