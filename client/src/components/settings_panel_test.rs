use super::*;

// =============================================================
// SceneFlag
// =============================================================

#[test]
fn each_flag_writes_the_field_it_reads() {
    for flag in SceneFlag::ALL {
        let mut scene = Scene::default();
        assert!(flag.get(&scene));
        *flag.field(&mut scene) = false;
        assert!(!flag.get(&scene), "{}", flag.label());
    }
}

#[test]
fn flags_are_independent() {
    let mut scene = Scene::default();
    *SceneFlag::Snow.field(&mut scene) = false;
    assert!(!scene.show_snow);
    assert!(scene.show_lights);
    assert!(scene.show_title);
    assert!(scene.show_subtitle);
}

#[test]
fn labels_are_distinct() {
    let labels: std::collections::HashSet<_> = SceneFlag::ALL.into_iter().map(SceneFlag::label).collect();
    assert_eq!(labels.len(), SceneFlag::ALL.len());
}
