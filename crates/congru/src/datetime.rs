//! # ISO-8601 Timestamp Shape Check
//!
//! Backs the `isISODate` template leaf: accepts strings of the exact shape
//! `YYYY-MM-DDTHH:MM:SS.mmmZ`, optionally followed by a `±HH:MM` offset.
//! Millisecond precision is mandatory, the `T` and `Z` separators are
//! literal, and the date fields must name a real calendar date (checked
//! via chrono, so `2015-02-30` is rejected even though it fits the shape).

use chrono::{NaiveDate, NaiveTime};

/// Length of the mandatory `YYYY-MM-DDTHH:MM:SS.mmmZ` stem.
const STEM_LEN: usize = 24;
/// Length of the optional `±HH:MM` offset suffix.
const OFFSET_LEN: usize = 6;

/// Whether `s` is an ISO-8601 timestamp in the accepted shape.
pub(crate) fn is_iso_datetime(s: &str) -> bool {
    let bytes = s.as_bytes();
    let offset = match bytes.len() {
        STEM_LEN => None,
        n if n == STEM_LEN + OFFSET_LEN => Some(&bytes[STEM_LEN..]),
        _ => return false,
    };
    let stem = &bytes[..STEM_LEN];

    if !stem_shape_ok(stem) {
        return false;
    }
    if let Some(off) = offset {
        if !offset_ok(off) {
            return false;
        }
    }

    // Shape verified above, so every field slice is pure ASCII digits.
    let year = field(stem, 0, 4) as i32;
    let month = field(stem, 5, 2);
    let day = field(stem, 8, 2);
    let hour = field(stem, 11, 2);
    let minute = field(stem, 14, 2);
    let second = field(stem, 17, 2);
    let millis = field(stem, 20, 3);

    NaiveDate::from_ymd_opt(year, month, day).is_some()
        && NaiveTime::from_hms_milli_opt(hour, minute, second, millis).is_some()
}

/// Digit/separator layout of the 24-byte stem.
fn stem_shape_ok(stem: &[u8]) -> bool {
    stem.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 | 16 => *b == b':',
        19 => *b == b'.',
        23 => *b == b'Z',
        _ => b.is_ascii_digit(),
    })
}

/// Digit/separator layout and field ranges of a `±HH:MM` suffix.
fn offset_ok(off: &[u8]) -> bool {
    let sign_ok = off[0] == b'+' || off[0] == b'-';
    let shape_ok = sign_ok
        && off[1].is_ascii_digit()
        && off[2].is_ascii_digit()
        && off[3] == b':'
        && off[4].is_ascii_digit()
        && off[5].is_ascii_digit();
    if !shape_ok {
        return false;
    }
    let hours = field(off, 1, 2);
    let minutes = field(off, 4, 2);
    hours <= 23 && minutes <= 59
}

/// Parse `len` ASCII digits starting at `start`. Caller guarantees the
/// slice holds digits.
fn field(bytes: &[u8], start: usize, len: usize) -> u32 {
    bytes[start..start + len]
        .iter()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_utc_timestamp() {
        assert!(is_iso_datetime("2015-04-28T10:00:00.000Z"));
    }

    #[test]
    fn test_accepts_offset_suffix() {
        assert!(is_iso_datetime("2015-04-28T10:00:00.000Z+02:00"));
        assert!(is_iso_datetime("2015-04-28T10:00:00.000Z-05:30"));
    }

    #[test]
    fn test_rejects_date_only() {
        assert!(!is_iso_datetime("2015-04-28"));
    }

    #[test]
    fn test_rejects_missing_millis() {
        assert!(!is_iso_datetime("2015-04-28T10:00:00Z"));
    }

    #[test]
    fn test_rejects_wrong_separators() {
        assert!(!is_iso_datetime("2015-04-28 10:00:00.000Z"));
        assert!(!is_iso_datetime("2015-04-28T10:00:00.000X"));
        assert!(!is_iso_datetime("2015/04/28T10:00:00.000Z"));
    }

    #[test]
    fn test_rejects_non_digit_fields() {
        assert!(!is_iso_datetime("2015-04-28T10:00:00.00aZ"));
        assert!(!is_iso_datetime("201x-04-28T10:00:00.000Z"));
    }

    #[test]
    fn test_rejects_impossible_calendar_date() {
        // Fits the shape, but February 30th does not exist.
        assert!(!is_iso_datetime("2015-02-30T10:00:00.000Z"));
        assert!(!is_iso_datetime("2015-13-01T10:00:00.000Z"));
        assert!(!is_iso_datetime("2015-00-01T10:00:00.000Z"));
    }

    #[test]
    fn test_rejects_out_of_range_time() {
        assert!(!is_iso_datetime("2015-04-28T24:00:00.000Z"));
        assert!(!is_iso_datetime("2015-04-28T10:60:00.000Z"));
        assert!(!is_iso_datetime("2015-04-28T10:00:61.000Z"));
    }

    #[test]
    fn test_rejects_malformed_offset() {
        assert!(!is_iso_datetime("2015-04-28T10:00:00.000Z02:00"));
        assert!(!is_iso_datetime("2015-04-28T10:00:00.000Z+0200 "));
        assert!(!is_iso_datetime("2015-04-28T10:00:00.000Z+24:00"));
        assert!(!is_iso_datetime("2015-04-28T10:00:00.000Z+02:60"));
    }

    #[test]
    fn test_leap_day_valid_only_in_leap_years() {
        assert!(is_iso_datetime("2016-02-29T00:00:00.000Z"));
        assert!(!is_iso_datetime("2015-02-29T00:00:00.000Z"));
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        assert!(!is_iso_datetime(""));
        assert!(!is_iso_datetime("not a date at all, honest"));
    }
}
