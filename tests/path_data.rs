use assertables::{assert_contains, assert_err, assert_ok};
use itertools::Itertools;
use pathdx::{parse, Segment, SvgPath};

fn roundtrip(input: &str, expected: &str) {
    let path: SvgPath = input.parse().unwrap();
    assert_eq!(path.to_string(), expected);
}

#[test]
fn test_minify() {
    roundtrip("M 10 10 L 20 20", "M10 10L20 20");
    roundtrip("M10,10  l 5,5 5,5", "M10 10l5 5 5 5");
    roundtrip("M 0 0 L 1 1 L 2 2 Z", "M0 0L1 1 2 2Z");
    roundtrip("M0 0 L -1 -1", "M0 0L-1-1");
    roundtrip("M0.5 .5 L1e1 2E0", "M0.5 0.5L10 2");
}

#[test]
fn test_already_minimal() {
    for d in ["M0 0L1 1", "M0 0H5V5Z", "M0 0C1 1 2 2 3 3", "M0 0A5 5 0 0 1 10 10"] {
        roundtrip(d, d);
    }
}

#[test]
fn test_implicit_lineto() {
    roundtrip("M10 20 30 40 50 60", "M10 20L30 40 50 60");
    roundtrip("m10 20 30 40", "M10 20l30 40");
}

#[test]
fn test_first_command_forced_absolute() {
    let segments = parse("m5 5").unwrap();
    assert_eq!(segments, vec![Segment::new('M', vec![5., 5.])]);
}

#[test]
fn test_catch_all_command() {
    // R takes four initial params then any number more, never split
    let segments = parse("M0 0R1 2 3 4 5 6").unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].cmd, 'R');
    assert_eq!(segments[1].args.len(), 6);
}

#[test]
fn test_long_repeat_sequence() {
    let d = format!("M0 0L{}", (1..=20).map(|i| format!("{i} {i}")).join(" "));
    let segments = parse(&d).unwrap();
    assert_eq!(segments.len(), 21);
    assert!(segments[1..].iter().all(|s| s.cmd == 'L' && s.args.len() == 2));
}

#[test]
fn test_unicode_separators() {
    roundtrip("M\u{a0}1\u{2000}2\u{3000}L\u{feff}3\u{2028}4", "M1 2L3 4");
}

#[test]
fn test_parse_errors() {
    assert_ok!(parse("M0 0.9L0e1 0"));
    assert_ok!(parse("M0 0a5 5 0 0110 10"));

    let err = parse("M10 10 L09 5").unwrap_err();
    assert_eq!(err.position(), Some(9));
    assert_contains!(err.to_string(), "started with `0`");
    assert_contains!(err.to_string(), "(at pos 9)");

    let err = parse("M0 0 x5").unwrap_err();
    assert_eq!(err.position(), Some(5));
    assert_contains!(err.to_string(), "bad command");

    let err = parse("M0 0A5 5 0 2 0 10 10").unwrap_err();
    assert_contains!(err.to_string(), "arc flag");

    let err = parse("L10 10").unwrap_err();
    assert_eq!(err.position(), None);
    assert_contains!(err.to_string(), "start with `M` or `m`");

    assert_err!(parse("M1e 2"));
    assert_err!(parse("M10 10,"));
    assert_err!(parse("M5")); // missing second coordinate
}

#[test]
fn test_all_or_nothing() {
    // a late error must not yield the valid prefix
    let result: Result<SvgPath, _> = "M10 10 L20 20 L09 5".parse();
    assert_err!(result);
}

#[test]
fn test_empty_input() {
    let path: SvgPath = "".parse().unwrap();
    assert!(path.is_empty());
    assert_eq!(path.to_string(), "");
}
