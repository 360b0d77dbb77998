//! Date normalization for overlay fields.
//!
//! Dates are only ever emitted as ISO `YYYY-MM-DD`; anything that does not
//! resolve to a real calendar date yields `None` and the field stays unset.

use chrono::NaiveDate;

use super::patterns::{DAY_MONTH_YEAR, MONTH_DAY_YEAR, NUMERIC_DATE};

/// Parse "March 3, 1985", "Mar. 3rd 1985" or "3 March 1985".
pub fn parse_month_name_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Some(caps) = MONTH_DAY_YEAR.captures(text) {
        let month = month_to_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_to_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Parse a numeric date. `YYYY-MM-DD` when the first group has four digits,
/// otherwise US month-first order (`MM/DD/YYYY`, `M-D-YY`, ...).
pub fn parse_numeric_date(text: &str) -> Option<NaiveDate> {
    // A sentence can end right after the date.
    let text = text.trim().trim_end_matches(['.', '-']);
    let caps = NUMERIC_DATE.captures(text)?;

    if caps[1].len() == 4 {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if caps[1].len() > 2 || caps[3].len() == 3 {
        return None;
    }

    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year = parse_year(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date the way records store it.
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() <= 2 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        if year <= 50 {
            Some(2000 + year)
        } else {
            Some(1900 + year)
        }
    } else {
        Some(year)
    }
}

fn month_to_number(month: &str) -> Option<u32> {
    let month = month.to_lowercase();
    let number = match month.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_month_name_dates() {
        assert_eq!(parse_month_name_date("March 3, 1985"), ymd(1985, 3, 3));
        assert_eq!(parse_month_name_date("Sept. 21st 2001"), ymd(2001, 9, 21));
        assert_eq!(parse_month_name_date("3 mar 1985"), ymd(1985, 3, 3));
    }

    #[test]
    fn test_impossible_month_name_date_is_dropped() {
        assert_eq!(parse_month_name_date("February 30, 2020"), None);
        assert_eq!(parse_month_name_date("Smarch 3, 1985"), None);
    }

    #[test]
    fn test_numeric_dates() {
        assert_eq!(parse_numeric_date("03/15/2024"), ymd(2024, 3, 15));
        assert_eq!(parse_numeric_date("3-15-24"), ymd(2024, 3, 15));
        assert_eq!(parse_numeric_date("2024-03-15"), ymd(2024, 3, 15));
        assert_eq!(parse_numeric_date("12/31/99"), ymd(1999, 12, 31));
        assert_eq!(parse_numeric_date("03/15/2024."), ymd(2024, 3, 15));
    }

    #[test]
    fn test_bad_numeric_dates() {
        assert_eq!(parse_numeric_date("13/45/2024"), None);
        assert_eq!(parse_numeric_date("03/15"), None);
        assert_eq!(parse_numeric_date("--"), None);
    }

    #[test]
    fn test_iso_format() {
        assert_eq!(to_iso(NaiveDate::from_ymd_opt(1985, 3, 3).unwrap()), "1985-03-03");
    }
}
