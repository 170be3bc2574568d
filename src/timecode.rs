//! Conversions between SRT timestamp strings and seconds.
//!
//! Parsing is deliberately tolerant: a malformed field comes back as NaN
//! rather than an error, and callers treat NaN as the recognised failure
//! mode. Formatting clamps anything non-finite or negative to zero.

/// Parses `HH:MM:SS,mmm` into seconds.
///
/// Splits once on the comma, then splits the left half on `:`. Empty fields
/// count as zero; anything non-numeric, or a missing comma, yields NaN.
pub fn parse(s: &str) -> f64 {
    let (hms, millis) = match s.split_once(',') {
        Some(parts) => parts,
        None => return f64::NAN,
    };
    let mut fields = hms.split(':');
    let hours = field(fields.next());
    let minutes = field(fields.next());
    let seconds = field(fields.next());
    hours * 3600.0 + minutes * 60.0 + seconds + field(Some(millis)) / 1000.0
}

fn field(s: Option<&str>) -> f64 {
    match s.map(str::trim) {
        Some("") => 0.0,
        Some(s) => s.parse().unwrap_or(f64::NAN),
        None => f64::NAN,
    }
}

/// Formats seconds as a zero-padded `HH:MM:SS,mmm` timestamp.
///
/// Total milliseconds are rounded, not floored, so that every canonical
/// timestamp string survives a parse/format round trip (flooring loses a
/// millisecond on values like 0.057 whose double representation sits just
/// below the decimal value).
pub fn format(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00:00,000".to_string();
    }
    let total_millis = (seconds * 1000.0).round() as u64;
    let total_secs = total_millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Compact `MM:SS` display form for elapsed/duration readouts.
///
/// Minutes are not wrapped at the hour, so 61 minutes shows as `61:00`.
/// NaN and negative input read as `00:00`.
pub fn format_compact(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let total_secs = seconds as u64;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_parse {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                assert_eq!(parse(input), expected);
            }
        )*
        }
    }

    test_parse! {
        test_parse_0: ("00:00:00,000", 0.0),
        test_parse_1: ("00:00:01,000", 1.0),
        test_parse_2: ("00:00:02,500", 2.5),
        test_parse_3: ("00:01:00,000", 60.0),
        test_parse_4: ("01:00:00,000", 3600.0),
        test_parse_5: ("01:02:03,456", 3723.456),
        test_parse_6: ("10:00:00,001", 36000.001),
        test_parse_7: ("00:00:01,", 1.0),
        test_parse_8: ("::,", 0.0),
    }

    macro_rules! test_format {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                assert_eq!(format(input), expected);
            }
        )*
        }
    }

    test_format! {
        test_format_0: (0.0, "00:00:00,000"),
        test_format_1: (0.001, "00:00:00,001"),
        test_format_2: (0.999, "00:00:00,999"),
        test_format_3: (1.0, "00:00:01,000"),
        test_format_4: (59.999, "00:00:59,999"),
        test_format_5: (60.0, "00:01:00,000"),
        test_format_6: (3600.0, "01:00:00,000"),
        test_format_7: (7326.159, "02:02:06,159"),
        test_format_8: (360000.001, "100:00:00,001"),
        test_format_9: (f64::NAN, "00:00:00,000"),
        test_format_10: (-1.5, "00:00:00,000"),
    }

    #[test]
    fn parse_without_comma_is_nan() {
        assert!(parse("00:00:01").is_nan());
    }

    #[test]
    fn parse_non_numeric_field_is_nan() {
        assert!(parse("00:xx:01,000").is_nan());
        assert!(parse("aa:bb:cc,ddd").is_nan());
    }

    #[test]
    fn parse_is_monotonic_per_field() {
        let base = parse("01:02:03,456");
        assert!(parse("02:02:03,456") > base);
        assert!(parse("01:03:03,456") > base);
        assert!(parse("01:02:04,456") > base);
        assert!(parse("01:02:03,457") > base);
    }

    #[test]
    fn canonical_strings_round_trip() {
        for s in [
            "00:00:00,000",
            "00:00:00,057",
            "01:02:03,456",
            "00:59:59,999",
            "12:34:56,789",
        ] {
            assert_eq!(format(parse(s)), s);
        }
    }

    #[test]
    fn compact_form() {
        assert_eq!(format_compact(0.0), "00:00");
        assert_eq!(format_compact(65.9), "01:05");
        assert_eq!(format_compact(3723.0), "62:03");
        assert_eq!(format_compact(f64::NAN), "00:00");
        assert_eq!(format_compact(-3.0), "00:00");
    }
}
