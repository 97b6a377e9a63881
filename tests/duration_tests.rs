// tests/duration_tests.rs

use pretty_assertions::assert_eq;
use promql_fmt::duration::{DurationError, format_duration, parse_duration};

#[test]
fn test_reference_values() {
    assert_eq!(format_duration(0), "0s");
    assert_eq!(format_duration(90_000), "1m30s");
    assert_eq!(format_duration(3_600_000), "1h");
    assert_eq!(format_duration(604_800_000), "1w");
}

#[test]
fn test_common_ranges() {
    let cases = [
        (15_000, "15s"),
        (300_000, "5m"),
        (1_800_000, "30m"),
        (86_400_000, "1d"),
        (31_536_000_000, "1y"),
        (250, "250ms"),
        (3_723_004, "1h2m3s4ms"),
    ];
    for (ms, text) in cases {
        assert_eq!(format_duration(ms), text, "formatting {ms}ms");
    }
}

#[test]
fn test_parse_canonical_forms() {
    assert_eq!(parse_duration("0"), Ok(0));
    assert_eq!(parse_duration("0s"), Ok(0));
    assert_eq!(parse_duration("5m"), Ok(300_000));
    assert_eq!(parse_duration("1h30m"), Ok(5_400_000));
    assert_eq!(parse_duration("1y2w3d4h5m6s7ms"), Ok(
        31_536_000_000 + 2 * 604_800_000 + 3 * 86_400_000 + 4 * 3_600_000 + 5 * 60_000 + 6_000 + 7
    ));
}

#[test]
fn test_parse_rejects_garbage() {
    assert_eq!(parse_duration(""), Err(DurationError::Empty));
    for text in ["5", "m", "1.5h", "-5m", "5m ", "1s1s", "1h1d"] {
        assert!(
            matches!(parse_duration(text), Err(DurationError::Invalid(_))),
            "{text:?} should not parse"
        );
    }
}

#[test]
fn test_formatted_durations_parse_back() {
    let samples = [
        0,
        1,
        999,
        1_000,
        59_999,
        60_000,
        90_000,
        3_599_999,
        86_400_000 * 13,
        604_800_000 * 52,
        31_536_000_000 * 3 + 1,
        u64::from(u32::MAX),
    ];
    for ms in samples {
        let text = format_duration(ms);
        assert_eq!(parse_duration(&text), Ok(ms), "round trip of {text}");
    }
}

#[test]
fn test_canonical_text_is_stable() {
    for text in ["1y", "2w", "90d", "1h30m", "1m30s", "1s500ms", "5m", "7d1h"] {
        let ms = parse_duration(text).unwrap();
        assert_eq!(format_duration(ms), text);
    }
}
