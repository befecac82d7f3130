use super::*;

const ALL_EASINGS: [Easing; 4] = [
    Easing::Linear,
    Easing::EaseIn,
    Easing::EaseOut,
    Easing::EaseInOut,
];

#[test]
fn every_easing_pins_endpoints() {
    for e in ALL_EASINGS {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert_eq!(e.apply(1.0), 1.0, "{e:?}");
    }
}

#[test]
fn easings_are_monotonic() {
    for e in ALL_EASINGS {
        let mut prev = e.apply(0.0);
        for i in 1..=200 {
            let v = e.apply(f64::from(i) / 200.0);
            assert!(v >= prev, "{e:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn cubic_shapes_match_closed_forms() {
    assert!((Easing::EaseIn.apply(0.5) - 0.125).abs() < 1e-12);
    assert!((Easing::EaseOut.apply(0.5) - 0.875).abs() < 1e-12);
    assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((Easing::EaseInOut.apply(0.25) - 0.0625).abs() < 1e-12);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Easing::EaseIn.apply(-3.0), 0.0);
    assert_eq!(Easing::EaseOut.apply(7.0), 1.0);
}

#[test]
fn pingpong_peaks_at_midpoint_and_returns_to_zero() {
    assert_eq!(Direction::Pingpong.apply(0.0), 0.0);
    assert_eq!(Direction::Pingpong.apply(0.5), 1.0);
    assert_eq!(Direction::Pingpong.apply(1.0), 0.0);
    assert!((Direction::Pingpong.apply(0.25) - 0.5).abs() < 1e-12);
    assert!((Direction::Pingpong.apply(0.75) - 0.5).abs() < 1e-12);
}

#[test]
fn reverse_mirrors_forward() {
    for i in 0..=20 {
        let v = f64::from(i) / 20.0;
        let sum = Direction::Reverse.apply(v) + Direction::Forward.apply(v);
        assert!((sum - 1.0).abs() < 1e-12);
    }
}

#[test]
fn start_values_per_direction() {
    assert_eq!(Direction::Forward.start_value(), 0.0);
    assert_eq!(Direction::Reverse.start_value(), 1.0);
    assert_eq!(Direction::Pingpong.start_value(), 0.0);
}

#[test]
fn serde_names_are_camel_case() {
    assert_eq!(
        serde_json::to_string(&Easing::EaseInOut).unwrap(),
        "\"easeInOut\""
    );
    assert_eq!(
        serde_json::from_str::<Direction>("\"pingpong\"").unwrap(),
        Direction::Pingpong
    );
}

#[test]
fn shape_progress_composes_stages() {
    let p = shape_progress(Easing::EaseIn, Direction::Reverse, 0.5);
    assert!((p - 0.875).abs() < 1e-12);
}
