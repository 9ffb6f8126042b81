#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_interaction_constants() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.drag_threshold_px, 5.0);
    assert_eq!(cfg.scale_step, 0.1);
    assert_eq!(cfg.rotate_step_deg, 45.0);
    assert_eq!(cfg.click_settle_ms, 10);
    assert_eq!(cfg.extent, Extent::default());
}

#[test]
fn from_lookup_without_overrides_is_default() {
    let cfg = EngineConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn from_lookup_applies_overrides() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[
        ("drag_threshold", "8"),
        ("scale_step", " 0.25 "),
        ("rotate_step", "-15"),
        ("click_settle_ms", "0"),
    ]))
    .unwrap();
    assert_eq!(cfg.drag_threshold_px, 8.0);
    assert_eq!(cfg.scale_step, 0.25);
    assert_eq!(cfg.rotate_step_deg, -15.0);
    assert_eq!(cfg.click_settle_ms, 0);
}

#[test]
fn from_lookup_rejects_unparseable_number() {
    let err = EngineConfig::from_lookup(lookup_from(&[("drag_threshold", "far")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Invalid { key: "drag_threshold", value: "far".into(), reason: "expected a finite number" }
    );
}

#[test]
fn from_lookup_rejects_out_of_range() {
    assert!(EngineConfig::from_lookup(lookup_from(&[("scale_step", "0")])).is_err());
    assert!(EngineConfig::from_lookup(lookup_from(&[("drag_threshold", "-1")])).is_err());
    assert!(EngineConfig::from_lookup(lookup_from(&[("rotate_step", "0")])).is_err());
    assert!(EngineConfig::from_lookup(lookup_from(&[("scale_step", "inf")])).is_err());
}

#[test]
fn from_lookup_rejects_fractional_settle() {
    let err = EngineConfig::from_lookup(lookup_from(&[("click_settle_ms", "2.5")])).unwrap_err();
    assert!(err.to_string().contains("click_settle_ms"));
}
