// Device tuning helpers: scroll, swipe, drag and key mapping.

use glam::Vec2;
use smallvec::SmallVec;
use wheel_core::input::{
    drag_angle, push_sample, release_momentum, scroll_impulse, swipe_impulse, VelocitySample,
};
use wheel_core::{Key, WheelConfig};

#[test]
fn mouse_wheel_notch_is_capped_and_slow_to_snap() {
    let config = WheelConfig::default();
    let down = scroll_impulse(120.0, &config).unwrap();
    assert!(!down.trackpad);
    assert!((down.velocity_change + 0.024).abs() < 1e-6);
    assert_eq!(down.snap_delay_ms, config.mouse_wheel_snap_delay_ms);

    let huge = scroll_impulse(-5000.0, &config).unwrap();
    assert!((huge.velocity_change - config.max_velocity_change).abs() < 1e-6);
}

#[test]
fn trackpad_deltas_are_boosted_and_snap_sooner() {
    let config = WheelConfig::default();
    let pad = scroll_impulse(-20.0, &config).unwrap();
    assert!(pad.trackpad);
    let expected = 20.0 / 100.0 * 0.02 * 1.5;
    assert!((pad.velocity_change - expected).abs() < 1e-6);
    assert_eq!(pad.snap_delay_ms, config.trackpad_snap_delay_ms);
}

#[test]
fn scroll_ignores_zero_and_garbage() {
    let config = WheelConfig::default();
    assert!(scroll_impulse(0.0, &config).is_none());
    assert!(scroll_impulse(f32::NAN, &config).is_none());
    assert!(scroll_impulse(f32::INFINITY, &config).is_none());
}

#[test]
fn swipe_uses_dominant_axis() {
    let config = WheelConfig::default();
    let right = swipe_impulse(Vec2::ZERO, Vec2::new(100.0, 10.0), &config).unwrap();
    assert!(right > 0.0);
    let up = swipe_impulse(Vec2::ZERO, Vec2::new(5.0, -100.0), &config).unwrap();
    assert!(up < 0.0);
    let fast = swipe_impulse(Vec2::ZERO, Vec2::new(-900.0, 0.0), &config).unwrap();
    assert_eq!(fast, -config.max_swipe_speed);
    assert!(swipe_impulse(Vec2::ONE, Vec2::ONE, &config).is_none());
}

#[test]
fn drag_angle_is_proportional_then_clamped() {
    let config = WheelConfig::default();
    // 40 px is about 0.063 rad, under the per-move cap.
    let small = drag_angle(40.0, &config);
    assert!((small - 40.0 / 4000.0 * std::f32::consts::TAU).abs() < 1e-6);
    assert!(small < config.max_drag_speed);
    assert_eq!(drag_angle(2000.0, &config), config.max_drag_speed);
    assert_eq!(drag_angle(-2000.0, &config), -config.max_drag_speed);
}

#[test]
fn velocity_history_is_bounded() {
    let mut history: SmallVec<[VelocitySample; 5]> = SmallVec::new();
    for i in 0..12 {
        push_sample(
            &mut history,
            VelocitySample {
                velocity: i as f32,
                at_ms: i as f64,
            },
        );
    }
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].velocity, 7.0);
    assert_eq!(history[4].velocity, 11.0);
}

#[test]
fn release_momentum_averages_recent_samples() {
    let config = WheelConfig::default();
    let history = [
        VelocitySample {
            velocity: 0.5,
            at_ms: 0.0,
        },
        VelocitySample {
            velocity: 0.02,
            at_ms: 950.0,
        },
        VelocitySample {
            velocity: 0.04,
            at_ms: 990.0,
        },
    ];
    let v = release_momentum(&history, 1000.0, &config).unwrap();
    assert!((v - 0.03).abs() < 1e-6);

    assert!(release_momentum(&history, 5000.0, &config).is_none());
    let slow = [VelocitySample {
        velocity: 0.0001,
        at_ms: 999.0,
    }];
    assert!(release_momentum(&slow, 1000.0, &config).is_none());
    assert!(release_momentum(&[], 1000.0, &config).is_none());
}

#[test]
fn key_mapping() {
    assert_eq!(Key::from_dom("ArrowUp"), Some(Key::ArrowUp));
    assert_eq!(Key::from_dom("Escape"), Some(Key::Escape));
    assert_eq!(Key::from_dom("Esc"), Some(Key::Escape));
    assert_eq!(Key::from_dom("a"), None);

    assert_eq!(Key::ArrowUp.spin_direction(), Some(1.0));
    assert_eq!(Key::ArrowDown.spin_direction(), Some(-1.0));
    assert_eq!(Key::ArrowLeft.spin_direction(), None);
    assert_eq!(Key::ArrowLeft.step_direction(), Some(1.0));
    assert_eq!(Key::ArrowRight.step_direction(), Some(-1.0));
    assert_eq!(Key::Enter.step_direction(), None);
}
