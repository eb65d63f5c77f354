use super::*;

fn manual(min: f64, max: f64, step: f64, interval: f64) -> BurstRecord {
    synchronize(&BurstRecord {
        min,
        max,
        mode: StepMode::ManualStep,
        step,
        interval,
        ..BurstRecord::default()
    })
}

fn auto(min: f64, max: f64, fps: f64, duration: f64) -> BurstRecord {
    synchronize(&BurstRecord {
        min,
        max,
        mode: StepMode::AutoStep,
        fps,
        duration,
        ..BurstRecord::default()
    })
}

#[test]
fn manual_step_derives_rate_and_duration() {
    let r = manual(-10.0, 10.0, 1.0, 30.0);
    assert_eq!(r.fps, 33.0);
    assert_eq!(r.frame_count, 20.0);
    assert_eq!(r.duration, 600.0);
    // Authoritative fields are untouched.
    assert_eq!(r.step, 1.0);
    assert_eq!(r.interval, 30.0);
}

#[test]
fn auto_step_derives_interval_and_step() {
    let r = auto(-10.0, 10.0, 20.0, 100_000.0);
    assert_eq!(r.interval, 50.0);
    assert_eq!(r.frame_count, 2000.0);
    assert_eq!(r.step, 0.01);
    assert_eq!(r.fps, 20.0);
    assert_eq!(r.duration, 100_000.0);
}

#[test]
fn derived_values_clamp_to_zero() {
    let r = manual(-10.0, 10.0, 0.0, 0.0);
    assert_eq!(r.fps, 0.0);
    assert_eq!(r.frame_count, 0.0);
    assert_eq!(r.duration, 0.0);

    let r = manual(10.0, -10.0, 1.0, 30.0);
    assert_eq!(r.frame_count, 0.0);

    let r = manual(f64::NAN, 10.0, 1.0, 30.0);
    assert_eq!(r.frame_count, 0.0);
    assert_eq!(r.fps, 33.0);

    let r = auto(-10.0, 10.0, 0.0, 1000.0);
    assert_eq!(r.interval, 0.0);
    assert_eq!(r.frame_count, 0.0);
    assert_eq!(r.step, 0.0);
}

#[test]
fn synchronize_is_pure_and_idempotent() {
    let input = manual(0.0, 5.0, 0.5, 40.0);
    let once = synchronize(&input);
    assert_eq!(once, input);
    assert_eq!(synchronize(&once), once);
}

#[test]
fn set_rounds_like_user_input() {
    let mut r = BurstRecord::default();
    r.set(BurstField::Interval, 33.4);
    assert_eq!(r.interval, 33.0);
    assert_eq!(r.fps, 30.0);

    r.set(BurstField::Step, 0.123456);
    assert_eq!(r.step, 0.1235);

    r.set(BurstField::Max, 20.0);
    assert_eq!(r.frame_count, (30.0f64 / 0.1235).round());
}

#[test]
fn switching_modes_keeps_frame_count() {
    let mut r = manual(-10.0, 10.0, 1.0, 30.0);
    r.set_mode(StepMode::AutoStep);
    assert_eq!(r.mode, StepMode::AutoStep);
    assert_eq!(r.frame_count, 20.0);
    assert_eq!(r.min, -10.0);
    assert_eq!(r.max, 10.0);
    assert_eq!(r.step, 1.0);

    let mut r = auto(-10.0, 10.0, 20.0, 100_000.0);
    r.set_mode(StepMode::ManualStep);
    assert_eq!(r.frame_count, 2000.0);
    assert_eq!(r.step, 0.01);
    assert_eq!(r.interval, 50.0);
}

#[test]
fn sweep_values_are_linear_and_inclusive() {
    let r = manual(-1.0, 1.0, 0.5, 30.0);
    let values: Vec<f64> = r.sweep_values().collect();
    assert_eq!(values, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);

    let r = manual(0.0, 1.0, 0.1, 30.0);
    let values: Vec<f64> = r.sweep_values().collect();
    assert_eq!(values.len(), 11);
    assert!((values[10] - 1.0).abs() < 1e-9);

    let r = manual(0.0, 1.0, 0.3, 30.0);
    let values: Vec<f64> = r.sweep_values().collect();
    assert_eq!(values.len(), 4);
}

#[test]
fn sweep_ignores_ease_settings() {
    let mut r = manual(0.0, 4.0, 1.0, 30.0);
    let linear: Vec<f64> = r.sweep_values().collect();
    r.set(BurstField::EaseSlope, 25.0);
    r.set(BurstField::EasePosition, 0.9);
    assert_eq!(r.sweep_values().collect::<Vec<_>>(), linear);
}

#[test]
fn sweep_with_unusable_step_is_empty() {
    assert_eq!(manual(0.0, 1.0, 0.0, 30.0).sweep_values().count(), 0);
    assert_eq!(manual(0.0, 1.0, f64::NAN, 30.0).sweep_values().count(), 0);
    assert_eq!(manual(1.0, 0.0, 0.5, 30.0).sweep_values().count(), 0);
}

#[test]
fn normalized_rounds_loaded_fields_like_user_edits() {
    let loaded = BurstRecord {
        slider: Some(SliderRef("a".to_owned())),
        min: 0.0,
        max: 1.0,
        step: 1e-300,
        interval: 29.6,
        ..BurstRecord::default()
    };
    let r = loaded.normalized();
    assert_eq!(r.step, 0.0);
    assert_eq!(r.interval, 30.0);
    assert_eq!(r.frame_count, 0.0);
    assert_eq!(r.sweep_values().count(), 0);
    assert!(crate::burst::validate::validate(&r).contains(&BurstField::Step));

    let fine = manual(0.0, 1.0, 0.25, 30.0);
    assert_eq!(fine.normalized(), fine);
}
