//! Spring-damped alignment of the nearest item onto the reference slot, and
//! the damped one-slot step used by the left/right arrow keys.

use glam::Vec2;

use crate::constants::WheelConfig;
use crate::item::{ItemId, WheelSide};
use crate::wheel::WheelPair;

/// Progress of a spring-driven rotation toward a fixed relative target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringState {
    pub target: f32,
    pub progress: f32,
    pub velocity: f32,
}

/// Outcome of one spring tick: how far to rotate the wheel this tick and
/// whether the motion has settled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringStep {
    pub delta: f32,
    pub settled: bool,
}

impl SpringState {
    pub fn new(target: f32) -> Self {
        Self {
            target,
            progress: 0.0,
            velocity: 0.0,
        }
    }

    /// Under-damped spring used by snapping.
    pub fn step_spring(&mut self, stiffness: f32, damping: f32, epsilon: f32) -> SpringStep {
        let displacement = self.target - self.progress;
        let spring_force = displacement * stiffness;
        let damping_force = self.velocity * damping;
        self.velocity += spring_force - damping_force;
        self.advance(epsilon)
    }

    /// Near-critically damped approach used by arrow-key steps.
    pub fn step_damped(&mut self, speed: f32, damping: f32, epsilon: f32) -> SpringStep {
        let displacement = self.target - self.progress;
        self.velocity = (self.velocity + displacement * speed) * damping;
        self.advance(epsilon)
    }

    fn advance(&mut self, epsilon: f32) -> SpringStep {
        let previous = self.progress;
        self.progress += self.velocity;
        let remaining = self.target - self.progress;
        if remaining.abs() < epsilon && self.velocity.abs() < epsilon {
            self.progress = self.target;
            self.velocity = 0.0;
            return SpringStep {
                delta: self.target - previous,
                settled: true,
            };
        }
        SpringStep {
            delta: self.progress - previous,
            settled: false,
        }
    }
}

/// Top-wheel item whose current world position is closest (planar, squared)
/// to the fixed reference slot. Ties keep the first item found.
pub fn closest_to_reference(wheel: &WheelPair, reference_slot: usize) -> Option<ItemId> {
    let reference = wheel.slot_world_position(reference_slot).truncate();
    let mut best: Option<(ItemId, f32)> = None;
    for id in wheel.side_ids(WheelSide::Top) {
        let Some(pos) = wheel.world_position(id) else {
            continue;
        };
        let d2 = pos.truncate().distance_squared(reference);
        match best {
            Some((_, bd)) if d2 >= bd => {}
            _ => best = Some((id, d2)),
        }
    }
    best.map(|(id, _)| id)
}

/// Signed rotation that carries the closest item onto the reference slot
/// along the shorter arc. Positive values rotate counter-clockwise.
pub fn calculate_snap_angle(wheel: &WheelPair, config: &WheelConfig) -> Option<(ItemId, f32)> {
    let closest = closest_to_reference(wheel, config.reference_slot)?;
    let center = wheel.center(WheelSide::Top).truncate();
    let from: Vec2 = wheel.world_position(closest)?.truncate() - center;
    let to: Vec2 = wheel.slot_world_position(config.reference_slot).truncate() - center;
    if from.length_squared() <= f32::EPSILON || to.length_squared() <= f32::EPSILON {
        return None;
    }
    // perp_dot > 0 when `to` lies counter-clockwise of `from`.
    let angle = from.perp_dot(to).atan2(from.dot(to));
    Some((closest, angle))
}
