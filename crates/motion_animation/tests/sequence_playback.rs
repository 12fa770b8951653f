//! Integration tests for sequences played on a timeline
//!
//! These tests verify that:
//! - Stages cut from one curve move like that curve when played in order
//! - Distribution does not depend on the order of configuration calls
//! - Config-built sequences lay out on a timeline like hand-built ones

use motion_animation::{
    Easing, Interpolator, SequenceConfig, SequentialSet, SharedInterpolator, Timeline, Tween,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("motion_animation=trace")
        .with_test_writer()
        .try_init();
}

/// Playing a sequence frame by frame should follow the single combined curve
#[test]
fn test_sequence_reproduces_combined_curve() {
    init_tracing();

    let curve = Easing::FastOutSlowIn.shared();
    let split = curve.interpolate(0.4);

    // Two stages that together animate 0 -> 100 along the curve
    let set = SequentialSet::new()
        .with_duration(1000)
        .with_interpolator(curve.clone())
        .and_then(|s| s.with_weighted_stage(Tween::new(0.0, split * 100.0), 2.0))
        .and_then(|s| s.with_weighted_stage(Tween::new(split * 100.0, 100.0), 3.0))
        .unwrap();

    let mut timeline = Timeline::new();
    let ids = timeline.add_sequence(0, &set).unwrap();
    assert_eq!(timeline.duration_ms(), 1000);

    timeline.start();
    for frame in 0..=100 {
        let time = frame as f32 * 10.0;
        timeline.seek(time);
        let stage = if time < 400.0 { ids[0] } else { ids[1] };
        let value = timeline.value(stage).unwrap();
        let expected = curve.interpolate(time / 1000.0) * 100.0;
        assert!(
            (value - expected).abs() < 1.0,
            "frame {frame}: {value} vs {expected}"
        );
    }
}

/// Duration and curve can be set before or after stages are added
#[test]
fn test_configuration_order_does_not_matter() {
    let curve: SharedInterpolator = Easing::EaseInOutCubic.shared();

    let mut before = SequentialSet::new();
    before.set_duration(Some(100));
    before.set_interpolator(Some(curve.clone())).unwrap();
    before.add(Tween::new(1.0, 0.0)).unwrap();
    before.add(Tween::new(0.0, 1.0)).unwrap();

    let mut after = SequentialSet::new();
    after.add(Tween::new(1.0, 0.0)).unwrap();
    after.add(Tween::new(0.0, 1.0)).unwrap();
    after.set_interpolator(Some(curve.clone())).unwrap();
    after.set_duration(Some(100));

    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.duration_ms(), Some(50));
        assert_eq!(a.duration_ms(), b.duration_ms());

        let (sa, sb) = (a.interpolator().unwrap(), b.interpolator().unwrap());
        assert_eq!((sa.start(), sa.end()), (sb.start(), sb.end()));
        assert!(sa.is_cut_from(&curve) && sb.is_cut_from(&curve));
    }
}

/// Durations never exceed the total and lose at most one unit per stage
#[test]
fn test_duration_shares_sum_to_total() {
    let mut set = SequentialSet::new().with_duration(1000);
    let weights = [1.0, 2.5, 0.75, 3.0, 1.25, 0.5, 7.0];
    for weight in weights {
        set.add_weighted((), weight).unwrap();
    }

    let sum: u32 = set.iter().filter_map(|s| s.duration_ms()).sum();
    assert!(sum <= 1000);
    assert!(sum >= 1000 - weights.len() as u32);
}

#[test]
fn test_config_sequence_on_timeline() {
    init_tracing();

    let config = SequenceConfig::from_toml_str(
        r#"
        duration_ms = 400
        easing = "linear"

        [[stages]]
        name = "shrink"
        from = 1.0
        to = 0.5

        [[stages]]
        name = "grow"
        weight = 3.0
        from = 0.5
        to = 2.0
        "#,
    )
    .unwrap();
    let set = config.build().unwrap();

    let mut timeline = Timeline::new();
    let ids = timeline.add_sequence(100, &set).unwrap();
    assert_eq!(timeline.duration_ms(), 500);

    timeline.seek(150.0);
    assert_eq!(timeline.value(ids[0]), Some(0.75));
    timeline.seek(200.0);
    assert_eq!(timeline.value(ids[1]), Some(0.5));
    timeline.seek(350.0);
    assert_eq!(timeline.value(ids[1]), Some(1.25));
}
