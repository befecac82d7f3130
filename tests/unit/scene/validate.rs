use super::*;

fn scene(top: usize, bottom: usize) -> SceneDescription {
    SceneDescription {
        top_images: vec!["t.png".to_string(); top],
        bottom_images: vec!["b.png".to_string(); bottom],
        audio: None,
        compare: Default::default(),
        overlay: Default::default(),
        animation: Default::default(),
    }
}

#[test]
fn accepts_matching_pairs() {
    validate_scene(&scene(3, 3)).unwrap();
}

#[test]
fn rejects_mismatched_lengths() {
    let err = validate_scene(&scene(2, 3)).unwrap_err();
    assert!(matches!(err, RevealError::InvalidPayload(_)));
    assert!(err.to_string().contains("top=2, bottom=3"));
}

#[test]
fn rejects_empty_pair_list() {
    let err = validate_scene(&scene(0, 0)).unwrap_err();
    assert!(matches!(err, RevealError::InvalidPayload(_)));
}

#[test]
fn rejects_non_positive_animation_numbers() {
    let mut s = scene(1, 1);
    s.animation.duration_ms = 0.0;
    assert!(validate_scene(&s).is_err());

    let mut s = scene(1, 1);
    s.animation.frame_rate = f64::NAN;
    assert!(validate_scene(&s).is_err());
}

#[test]
fn rejects_bad_overlay_metrics() {
    let mut s = scene(1, 1);
    s.overlay.font_size_px = -1.0;
    assert!(validate_scene(&s).is_err());
}

#[test]
fn rejects_durations_that_overflow_the_frame_count() {
    let mut s = scene(2, 2);
    s.animation.duration_ms = 1e30;
    let err = validate_scene(&s).unwrap_err();
    assert!(matches!(err, RevealError::InvalidPayload(_)));
    assert!(err.to_string().contains("video too long"));
}

#[test]
fn frame_budget_is_inclusive() {
    assert_eq!(check_frame_budget(MAX_TOTAL_FRAMES, 1).unwrap(), MAX_TOTAL_FRAMES);
    assert!(check_frame_budget(MAX_TOTAL_FRAMES, 2).is_err());
    assert!(check_frame_budget(u64::MAX, 2).is_err());
}
