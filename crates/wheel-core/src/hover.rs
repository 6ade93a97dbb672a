//! Raycast hover picking and the scale/tilt/rim-light feedback it drives.

use glam::{Vec2, Vec3};

use crate::camera::{ray_rect, Camera};
use crate::constants::WheelConfig;
use crate::item::ItemId;
use crate::wheel::WheelPair;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Nearest item under the pointer. Only items within the distance cutoff of
/// the pointer's hit point on the wheel plane are tested.
pub fn pick(wheel: &WheelPair, camera: &Camera, pointer_ndc: Vec2, cutoff: f32) -> Option<ItemId> {
    let ray = camera.ray_from_ndc(pointer_ndc);
    let anchor = ray.hit_plane_z(0.0);
    let half = wheel.half_extents();
    let mut best: Option<(ItemId, f32)> = None;
    for item in wheel.items() {
        let Some(world) = wheel.world_position(item.id) else {
            continue;
        };
        if let Some(anchor) = anchor {
            if world.distance(anchor) > cutoff {
                continue;
            }
        }
        let Some(model) = wheel.world_matrix(item.id) else {
            continue;
        };
        if let Some(t) = ray_rect(&ray, &model, half) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((item.id, t)),
            }
        }
    }
    best.map(|(id, _)| id)
}

/// Pointer offset from the item's projected centre, normalised by its
/// projected half size and clamped to \[-1, 1\].
pub fn pointer_offset(
    wheel: &WheelPair,
    camera: &Camera,
    id: ItemId,
    pointer_ndc: Vec2,
) -> Option<Vec2> {
    let world = wheel.world_position(id)?;
    let center = camera.project_to_ndc(world)?;
    let half = wheel.half_extents();
    let corner = camera.project_to_ndc(world + Vec3::new(half.x, half.y, 0.0))?;
    let extent = (corner - center).abs().max(Vec2::splat(1e-4));
    Some(((pointer_ndc - center) / extent).clamp(Vec2::splat(-1.0), Vec2::splat(1.0)))
}

/// Ease every item toward its hover or neutral pose for this tick.
pub fn apply(
    wheel: &mut WheelPair,
    camera: &Camera,
    hovered: Option<ItemId>,
    pointer_ndc: Option<Vec2>,
    config: &WheelConfig,
) {
    let tilt = match (hovered, pointer_ndc) {
        (Some(id), Some(ndc)) => pointer_offset(wheel, camera, id, ndc),
        _ => None,
    };
    let k = config.lerp_factor;
    for item in wheel.items_mut() {
        let t = &mut item.transform;
        if Some(item.id) == hovered {
            let offset = tilt.unwrap_or(Vec2::ZERO);
            t.scale = lerp(t.scale, config.hover_scale, k);
            t.rotation.x = lerp(t.rotation.x, -offset.y * config.max_tilt, k);
            t.rotation.y = lerp(t.rotation.y, offset.x * config.max_tilt, k);
            let drift = item.base_rotation - t.rotation.z;
            if drift.abs() > config.z_drift_threshold {
                t.rotation.z += drift * config.z_correction_factor;
            }
            item.mouse_influence = lerp(item.mouse_influence, 1.0, k);
        } else {
            t.scale = lerp(t.scale, 1.0, k);
            t.rotation.x = lerp(t.rotation.x, 0.0, k);
            t.rotation.y = lerp(t.rotation.y, 0.0, k);
            t.rotation.z = lerp(t.rotation.z, item.base_rotation, k);
            item.mouse_influence = lerp(item.mouse_influence, 0.0, k);
        }
    }
}
