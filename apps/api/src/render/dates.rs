//! Date display.
//!
//! Dates come from a language model, so their format is anything. Values that
//! parse as a calendar month are re-rendered with the document's `date_format`;
//! everything else ("2019", "Summer 2020", "Present") is shown as written.

use chrono::{DateTime, NaiveDate};

use crate::cv::model::DEFAULT_DATE_FORMAT;
use crate::cv::DateRange;
use crate::render::escape::escape_text;

pub const PRESENT: &str = "Present";
pub const RANGE_SEPARATOR: &str = " -- ";

/// Converts a `YYYY`/`MMM` style pattern into a chrono format string.
///
/// Tokens: `YYYY`, `YY`, `MMMM`, `MMM`, `MM`. Anything else is literal.
fn to_chrono_pattern(pattern: &str) -> String {
    const TOKENS: [(&str, &str); 5] = [
        ("YYYY", "%Y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("YY", "%y"),
        ("MM", "%m"),
    ];

    let mut out = String::new();
    let mut rest = pattern;
    'outer: while let Some(c) = rest.chars().next() {
        for (token, chrono_fmt) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(chrono_fmt);
                rest = after;
                continue 'outer;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Parses the date shapes seen in practice into the first day of their month.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    // Month-precision shapes: pin the day so chrono can build a date.
    let with_day = format!("{raw} 01");
    for fmt in ["%Y-%m %d", "%Y/%m %d", "%m/%Y %d", "%b %Y %d", "%B %Y %d"] {
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, fmt) {
            return Some(date);
        }
    }

    None
}

/// Formats one date value for display. Returns unescaped text.
pub fn format_date(raw: &str, pattern: &str) -> String {
    let pattern = if pattern.trim().is_empty() {
        DEFAULT_DATE_FORMAT
    } else {
        pattern
    };

    match parse_date(raw) {
        Some(date) => date.format(&to_chrono_pattern(pattern)).to_string(),
        None => raw.trim().to_string(),
    }
}

/// Renders a date range as markup: `start -- end`, `start -- Present` for a
/// current entry, a single side when only one is known, or nothing.
///
/// Each side is escaped on its own; the separator is not.
pub fn format_range(range: &DateRange, pattern: &str) -> String {
    let start = escape_text(&format_date(&range.start, pattern));
    let end = if range.is_current {
        PRESENT.to_string()
    } else {
        escape_text(&format_date(&range.end, pattern))
    };

    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start}{RANGE_SEPARATOR}{end}"),
        (false, true) => start,
        (true, false) => end,
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str, is_current: bool) -> DateRange {
        DateRange {
            start: start.to_string(),
            end: end.to_string(),
            is_current,
        }
    }

    #[test]
    fn test_pattern_translation() {
        assert_eq!(to_chrono_pattern("MMM YYYY"), "%b %Y");
        assert_eq!(to_chrono_pattern("YYYY-MM"), "%Y-%m");
        assert_eq!(to_chrono_pattern("MMMM 'YY"), "%B '%y");
        assert_eq!(to_chrono_pattern("100%"), "100%%");
    }

    #[test]
    fn test_format_date_accepts_common_shapes() {
        assert_eq!(format_date("2020-01-01", "MMM YYYY"), "Jan 2020");
        assert_eq!(format_date("2020-01", "MMM YYYY"), "Jan 2020");
        assert_eq!(format_date("03/2021", "YYYY-MM"), "2021-03");
        assert_eq!(format_date("Sep 2019", "MMMM YYYY"), "September 2019");
        assert_eq!(format_date("2022-07-15T10:00:00Z", "MM/YYYY"), "07/2022");
    }

    #[test]
    fn test_unparseable_dates_pass_through() {
        assert_eq!(format_date("2019", "MMM YYYY"), "2019");
        assert_eq!(format_date(" Summer 2020 ", "MMM YYYY"), "Summer 2020");
        assert_eq!(format_date("", "MMM YYYY"), "");
    }

    #[test]
    fn test_blank_pattern_uses_default() {
        assert_eq!(format_date("2020-02-01", ""), "Feb 2020");
    }

    #[test]
    fn test_range_both_sides() {
        assert_eq!(
            format_range(&range("2019-01", "2020-06", false), "MMM YYYY"),
            "Jan 2019 -- Jun 2020"
        );
    }

    #[test]
    fn test_current_range_ignores_stored_end() {
        assert_eq!(
            format_range(&range("2020-01-01", "2023-05-01", true), "YYYY-MM"),
            "2020-01 -- Present"
        );
    }

    #[test]
    fn test_single_sided_ranges_have_no_separator() {
        assert_eq!(format_range(&range("2020-01", "", false), "YYYY"), "2020");
        assert_eq!(format_range(&range("", "2021-04", false), "YYYY"), "2021");
        assert_eq!(format_range(&range("", "", true), "YYYY"), "Present");
        assert_eq!(format_range(&range("", "", false), "YYYY"), "");
    }

    #[test]
    fn test_range_sides_are_escaped() {
        assert_eq!(
            format_range(&range("Q1_2020", "", false), "YYYY"),
            r"Q1\_2020"
        );
    }
}
