//! Converge animation: every non-target item slides around its ring to hide
//! behind the selected item (top or bottom) and its diametric pair.

use crate::constants::WheelConfig;
use crate::item::{ItemId, Trajectory, WheelSide};
use crate::state::ConvergeState;
use crate::wheel::{polar_angle, wrap_angle, WheelPair};

#[inline]
pub fn ease_out_cubic(p: f32) -> f32 {
    let inv = 1.0 - p.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Mark the target pair and cache a trajectory for every other item.
/// Returns `None` when `clicked` is not an item of this wheel.
pub fn begin(wheel: &mut WheelPair, clicked: ItemId, config: &WheelConfig) -> Option<ConvergeState> {
    let pair = wheel.pair_of(clicked)?;
    let clicked_side = wheel.item(clicked)?.side;
    let target_for = |side: WheelSide| if side == clicked_side { clicked } else { pair };

    wheel.clear_transients();
    let interval = config.slot_interval();
    let ids: Vec<ItemId> = wheel.items().iter().map(|i| i.id).collect();
    for id in ids {
        if id == clicked || id == pair {
            if let Some(t) = wheel.transient_mut(id) {
                t.is_target = true;
            }
            continue;
        }
        let Some(item) = wheel.item(id) else {
            continue;
        };
        let Some(target) = wheel.item(target_for(item.side)) else {
            continue;
        };
        let start = item.transform.position;
        let goal = target.transform.position;
        let start_angle = polar_angle(start);
        let target_angle = polar_angle(goal);
        let angle_delta = wrap_angle(target_angle - start_angle);
        // Items travelling further end up deeper in the stack.
        let steps = (angle_delta.abs() / interval).round().max(1.0);
        let trajectory = Trajectory {
            start_angle,
            target_angle,
            angle_delta,
            start_z: start.z,
            target_z: goal.z - config.converge_z_stack * steps,
            radius: wheel.radius(),
        };
        if let Some(t) = wheel.transient_mut(id) {
            t.trajectory = Some(trajectory);
        }
    }
    log::info!(
        "[converge] begin on {:?} (pair {:?})",
        clicked,
        pair
    );
    Some(ConvergeState {
        clicked,
        pair,
        progress: 0.0,
    })
}

/// Advance progress by one tick and move every item along its cached path.
/// Returns `true` once progress has reached 1; further ticks hold the pose.
pub fn step(wheel: &mut WheelPair, state: &mut ConvergeState, config: &WheelConfig) -> bool {
    state.progress = (state.progress + config.converge_speed).min(1.0);
    let eased = ease_out_cubic(state.progress);
    for i in 0..wheel.len() {
        let id = ItemId(i);
        let Some(trajectory) = wheel.transient(id).and_then(|t| t.trajectory) else {
            continue;
        };
        if let Some(item) = wheel.item_mut(id) {
            item.transform.position = trajectory.position_at(eased);
        }
    }
    state.progress >= 1.0
}

/// Put every item back where it was built and drop all cached paths.
pub fn restore(wheel: &mut WheelPair) {
    for i in 0..wheel.len() {
        wheel.reset_item(ItemId(i));
    }
    wheel.clear_transients();
}
