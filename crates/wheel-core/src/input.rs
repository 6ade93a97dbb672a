//! Device-specific input tuning: turns raw wheel, swipe, drag and key input
//! into signed angular velocities or discrete commands.

use glam::Vec2;
use smallvec::SmallVec;

use crate::constants::{WheelConfig, VELOCITY_HISTORY_LENGTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "Enter" => Some(Key::Enter),
            "Escape" | "Esc" => Some(Key::Escape),
            _ => None,
        }
    }

    /// Sign of the held-key spin, for up/down.
    pub fn spin_direction(self) -> Option<f32> {
        match self {
            Key::ArrowUp => Some(1.0),
            Key::ArrowDown => Some(-1.0),
            _ => None,
        }
    }

    /// Sign of the one-slot step, for left/right.
    pub fn step_direction(self) -> Option<f32> {
        match self {
            Key::ArrowLeft => Some(1.0),
            Key::ArrowRight => Some(-1.0),
            _ => None,
        }
    }
}

/// Velocity change and snap debounce derived from one wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollImpulse {
    pub velocity_change: f32,
    pub snap_delay_ms: f64,
    pub trackpad: bool,
}

/// Small deltas come from trackpads and get a boost plus a short snap delay;
/// larger deltas are mouse wheel notches. Scrolling up spins positive.
pub fn scroll_impulse(delta_y: f32, config: &WheelConfig) -> Option<ScrollImpulse> {
    if delta_y == 0.0 || !delta_y.is_finite() {
        return None;
    }
    let magnitude = delta_y.abs();
    let intensity = magnitude / config.intensity_divisor;
    let mut change = (intensity * config.base_velocity_change).min(config.max_velocity_change);
    let trackpad = magnitude < config.trackpad_threshold;
    let snap_delay_ms = if trackpad {
        change *= config.trackpad_multiplier;
        config.trackpad_snap_delay_ms
    } else {
        config.mouse_wheel_snap_delay_ms
    };
    Some(ScrollImpulse {
        velocity_change: -delta_y.signum() * change,
        snap_delay_ms,
        trackpad,
    })
}

/// Signed swipe velocity between two touch points. The dominant axis picks
/// the direction.
pub fn swipe_impulse(previous: Vec2, current: Vec2, config: &WheelConfig) -> Option<f32> {
    let delta = current - previous;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return None;
    }
    let speed = (distance / config.swipe_divisor).min(config.max_swipe_speed);
    let direction = if delta.x.abs() > delta.y.abs() {
        delta.x.signum()
    } else {
        delta.y.signum()
    };
    Some(direction * speed)
}

/// Immediate rotation for a horizontal drag of `dx_px` pixels.
pub fn drag_angle(dx_px: f32, config: &WheelConfig) -> f32 {
    let angle = (dx_px / config.drag_pixels_per_turn) * std::f32::consts::TAU;
    angle.clamp(-config.max_drag_speed, config.max_drag_speed)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    pub velocity: f32,
    pub at_ms: f64,
}

/// Append to the bounded drag history, evicting the oldest sample.
pub fn push_sample(
    history: &mut SmallVec<[VelocitySample; VELOCITY_HISTORY_LENGTH]>,
    sample: VelocitySample,
) {
    if history.len() >= VELOCITY_HISTORY_LENGTH {
        history.remove(0);
    }
    history.push(sample);
}

/// Mean velocity of the recent samples, or `None` when the release was too
/// slow to keep spinning.
pub fn release_momentum(history: &[VelocitySample], now_ms: f64, config: &WheelConfig) -> Option<f32> {
    let recent: SmallVec<[f32; VELOCITY_HISTORY_LENGTH]> = history
        .iter()
        .filter(|s| now_ms - s.at_ms < config.momentum_window_ms)
        .map(|s| s.velocity)
        .collect();
    if recent.is_empty() {
        return None;
    }
    let mean = recent.iter().sum::<f32>() / recent.len() as f32;
    (mean.abs() >= config.momentum_threshold).then_some(mean)
}
