//! Velocity integration with friction decay.

use crate::constants::WheelConfig;

/// Add `delta` to the target velocity, keeping it within the velocity cap.
pub fn inject(target_velocity: f32, delta: f32, config: &WheelConfig) -> f32 {
    (target_velocity + delta).clamp(-config.max_velocity, config.max_velocity)
}

/// One spin tick. Returns the new `(current, target)` velocities; the caller
/// rotates the wheel by the returned current velocity when it is non-zero.
pub fn advance(current: f32, target: f32, config: &WheelConfig) -> (f32, f32) {
    let mut current = current + (target - current) * config.velocity_lerp;
    let mut target = target * config.friction;
    if current.abs() < config.velocity_threshold {
        current = 0.0;
    }
    if target.abs() < config.velocity_threshold {
        target = 0.0;
    }
    (
        current.clamp(-config.max_velocity, config.max_velocity),
        target.clamp(-config.max_velocity, config.max_velocity),
    )
}
