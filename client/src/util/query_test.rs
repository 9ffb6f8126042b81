#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// parse_query
// =============================================================

#[test]
fn parse_query_handles_leading_question_mark() {
    let params = parse_query("?scale_step=0.2&rotate_step=30");
    assert_eq!(params.get("scale_step").map(String::as_str), Some("0.2"));
    assert_eq!(params.get("rotate_step").map(String::as_str), Some("30"));
}

#[test]
fn parse_query_empty_and_bare_keys() {
    assert!(parse_query("").is_empty());
    assert!(parse_query("?").is_empty());
    let params = parse_query("debug&x=1");
    assert_eq!(params.get("debug").map(String::as_str), Some(""));
}

#[test]
fn parse_query_decodes_percent_escapes_and_plus() {
    let params = parse_query("?drag%5Fthreshold=%31%30&note=a+b%20c");
    assert_eq!(params.get("drag_threshold").map(String::as_str), Some("10"));
    assert_eq!(params.get("note").map(String::as_str), Some("a b c"));
}

#[test]
fn parse_query_later_duplicate_wins() {
    let params = parse_query("a=1&a=2");
    assert_eq!(params.get("a").map(String::as_str), Some("2"));
}

// =============================================================
// config_from_query
// =============================================================

#[test]
fn config_from_empty_query_is_default() {
    assert_eq!(config_from_query("").unwrap(), EngineConfig::default());
}

#[test]
fn config_from_query_applies_overrides() {
    let cfg = config_from_query("?drag_threshold=8&click_settle_ms=0").unwrap();
    assert_eq!(cfg.drag_threshold_px, 8.0);
    assert_eq!(cfg.click_settle_ms, 0);
    assert_eq!(cfg.scale_step, EngineConfig::default().scale_step);
}

#[test]
fn config_from_query_accepts_encoded_values() {
    let cfg = config_from_query("?drag_threshold=%31%30&scale_step=0%2E25").unwrap();
    assert_eq!(cfg.drag_threshold_px, 10.0);
    assert_eq!(cfg.scale_step, 0.25);
}

#[test]
fn config_from_query_rejects_garbage() {
    assert!(config_from_query("?scale_step=big").is_err());
}
