use std::cmp::Ordering;

use sics_core::version::{compare, format, parse, satisfies, VersionRange};
use sics_core::VersionError;

#[test]
fn parse_format_round_trips() {
    for v in [
        "0.0.0",
        "1.2.3",
        "10.20.30",
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0-0.3.7",
        "1.0.0+20130313144700",
        "1.0.0-beta+exp.sha.5114f85",
    ] {
        let parsed = parse(v).unwrap();
        assert_eq!(format(&parsed), v);
    }
}

#[test]
fn parse_exposes_components() {
    let v = parse("2.5.11-rc.1+build.7").unwrap();
    assert_eq!((v.major, v.minor, v.patch), (2, 5, 11));
    assert_eq!(v.prerelease.as_deref(), Some("rc.1"));
    assert_eq!(v.build.as_deref(), Some("build.7"));
}

#[test]
fn parse_rejects_malformed_versions() {
    for bad in ["", "1", "1.2", "1.2.3.4", "a.b.c", "01.2.3", "v1.2.3", "1.2.-3"] {
        let err = parse(bad).unwrap_err();
        assert_eq!(err, VersionError::InvalidFormat(bad.to_string()));
        assert!(err.to_string().starts_with("Invalid version format"));
    }
}

#[test]
fn compare_orders_by_core_then_prerelease() {
    let ordered = [
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0-beta",
        "1.0.0",
        "1.0.1",
        "1.1.0",
        "2.0.0",
    ];
    for pair in ordered.windows(2) {
        let a = parse(pair[0]).unwrap();
        let b = parse(pair[1]).unwrap();
        assert_eq!(compare(&a, &b), Ordering::Less, "{} < {}", pair[0], pair[1]);
        assert_eq!(compare(&b, &a), Ordering::Greater);
    }
}

#[test]
fn build_metadata_is_ignored_for_ordering_and_equality() {
    let a = parse("1.2.3+linux").unwrap();
    let b = parse("1.2.3+darwin").unwrap();
    assert_eq!(compare(&a, &b), Ordering::Equal);
    assert_eq!(a, b);
}

#[test]
fn satisfies_handles_comparator_conjunctions() {
    assert!(satisfies("1.5.0", ">=1.0.0 <2.0.0"));
    assert!(satisfies("1.0.0", ">=1.0.0 <2.0.0"));
    assert!(!satisfies("2.0.0", ">=1.0.0 <2.0.0"));
    assert!(!satisfies("0.9.9", ">=1.0.0 <2.0.0"));
    assert!(satisfies("3.4.5", ">=1.0.0"));
}

#[test]
fn satisfies_handles_npm_shorthand() {
    assert!(satisfies("1.2.3", "1.2.3"));
    assert!(!satisfies("1.2.4", "1.2.3"));
    assert!(satisfies("1.9.0", "1.x"));
    assert!(!satisfies("2.0.0", "1.x"));
    assert!(satisfies("1.2.9", "~1.2.0"));
    assert!(!satisfies("1.3.0", "~1.2.0"));
    assert!(satisfies("1.9.0", "^1.2.0"));
    assert!(satisfies("5.0.0", "*"));
    assert!(satisfies("5.0.0", ""));
    assert!(satisfies("1.5.0", "1.0.0 - 2.0.0"));
    assert!(satisfies("2.0.0", "1.0.0 - 2.0.0"));
    assert!(!satisfies("2.0.1", "1.0.0 - 2.0.0"));
    assert!(satisfies("3.1.0", "^1.0.0 || ^3.0.0"));
    assert!(!satisfies("2.1.0", "^1.0.0 || ^3.0.0"));
}

#[test]
fn prerelease_only_matches_same_tuple() {
    assert!(!satisfies("1.5.0-beta", ">=1.0.0"));
    assert!(satisfies("1.0.0-beta.2", ">=1.0.0-beta.1"));
    assert!(!satisfies("1.0.0-alpha", ">=1.0.0-beta"));
}

#[test]
fn satisfies_is_false_for_unparsable_inputs() {
    assert!(!satisfies("not-a-version", ">=1.0.0"));
    assert!(!satisfies("1.0.0", ">=banana"));
}

#[test]
fn range_parse_reports_bad_syntax() {
    let err = VersionRange::parse(">= ").unwrap_err();
    assert!(matches!(err, VersionError::InvalidRange { .. }));
    let ok = VersionRange::parse(">=1.0.0 <2.0.0").unwrap();
    assert_eq!(ok.to_string(), ">=1.0.0 <2.0.0");
    assert!(ok.matches(&parse("1.1.0").unwrap()));
}
