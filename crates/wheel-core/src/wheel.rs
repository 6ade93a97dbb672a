//! The two photo rings and their shared rotation.
//!
//! Both wheels spin about their own centre by the same angle, so items on
//! opposite wheels stay angularly aligned. Items sit in the local frame of
//! their wheel and are counter-rotated to stay upright.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::constants::WheelConfig;
use crate::error::WheelError;
use crate::item::{
    ItemId, ItemStable, ItemTransform, ItemTransient, Project, WheelItem, WheelSide,
};

pub struct WheelPair {
    items: Vec<WheelItem>,
    stable: Vec<ItemStable>,
    transient: Vec<ItemTransient>,
    rotation: f32,
    items_per_wheel: usize,
    radius: f32,
    centers: [Vec3; 2],
    start_angle: f32,
    half_extents: Vec2,
}

impl WheelPair {
    /// Lay out `2 * M` items from `M` projects. Top slot `i` shows project
    /// `i`; bottom slot `j` shows project `(j + M/2) mod M`, so each converge
    /// pair carries the same project.
    pub fn build(config: &WheelConfig, projects: &[Project]) -> Result<Self, WheelError> {
        let m = config.items_per_wheel;
        if m == 0 || m % 2 != 0 {
            return Err(WheelError::InvalidLayout(m));
        }
        if projects.len() != m {
            return Err(WheelError::ProjectCountMismatch {
                expected: m,
                actual: projects.len(),
            });
        }
        let interval = config.slot_interval();
        let mut items = Vec::with_capacity(2 * m);
        let mut stable = Vec::with_capacity(2 * m);
        for side in [WheelSide::Top, WheelSide::Bottom] {
            for slot in 0..m {
                let project_index = match side {
                    WheelSide::Top => slot,
                    WheelSide::Bottom => (slot + m / 2) % m,
                };
                let angle = config.start_angle + slot as f32 * interval;
                let xy = Vec2::from_angle(angle) * config.wheel_radius;
                let position = Vec3::new(xy.x, xy.y, 0.0);
                items.push(WheelItem {
                    id: ItemId(items.len()),
                    side,
                    slot,
                    project: projects[project_index].clone(),
                    transform: ItemTransform {
                        position,
                        rotation: Vec3::ZERO,
                        scale: 1.0,
                    },
                    base_rotation: 0.0,
                    mouse_influence: 0.0,
                });
                stable.push(ItemStable {
                    original_position: position,
                    original_scale: 1.0,
                });
            }
        }
        Ok(Self {
            transient: vec![ItemTransient::default(); items.len()],
            items,
            stable,
            rotation: 0.0,
            items_per_wheel: m,
            radius: config.wheel_radius,
            centers: [
                Vec3::new(0.0, config.wheel_y_offset, 0.0),
                Vec3::new(0.0, -config.wheel_y_offset, 0.0),
            ],
            start_angle: config.start_angle,
            half_extents: Vec2::new(config.item_width, config.item_height) * 0.5,
        })
    }

    pub fn items(&self) -> &[WheelItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [WheelItem] {
        &mut self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&WheelItem> {
        self.items.get(id.0)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut WheelItem> {
        self.items.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items_per_wheel(&self) -> usize {
        self.items_per_wheel
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Net rotation shared by both wheels.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn stable(&self, id: ItemId) -> Option<&ItemStable> {
        self.stable.get(id.0)
    }

    pub fn transient(&self, id: ItemId) -> Option<&ItemTransient> {
        self.transient.get(id.0)
    }

    pub fn transient_mut(&mut self, id: ItemId) -> Option<&mut ItemTransient> {
        self.transient.get_mut(id.0)
    }

    pub fn clear_transients(&mut self) {
        for t in &mut self.transient {
            *t = ItemTransient::default();
        }
    }

    pub fn id_of(&self, side: WheelSide, slot: usize) -> ItemId {
        let base = match side {
            WheelSide::Top => 0,
            WheelSide::Bottom => self.items_per_wheel,
        };
        ItemId(base + slot % self.items_per_wheel)
    }

    pub fn side_ids(&self, side: WheelSide) -> impl Iterator<Item = ItemId> + '_ {
        (0..self.items_per_wheel).map(move |slot| self.id_of(side, slot))
    }

    /// The diametric counterpart on the other wheel: slot `(i + M/2) mod M`.
    pub fn pair_of(&self, id: ItemId) -> Option<ItemId> {
        let item = self.item(id)?;
        let slot = (item.slot + self.items_per_wheel / 2) % self.items_per_wheel;
        Some(self.id_of(item.side.opposite(), slot))
    }

    pub fn center(&self, side: WheelSide) -> Vec3 {
        match side {
            WheelSide::Top => self.centers[0],
            WheelSide::Bottom => self.centers[1],
        }
    }

    /// Rotate both wheels as a rigid pair, counter-rotating every item.
    pub fn rotate(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        self.rotation += delta;
        for item in &mut self.items {
            item.base_rotation -= delta;
            item.transform.rotation.z -= delta;
        }
    }

    fn group_matrix(&self, side: WheelSide) -> Mat4 {
        Mat4::from_translation(self.center(side)) * Mat4::from_rotation_z(self.rotation)
    }

    pub fn world_position(&self, id: ItemId) -> Option<Vec3> {
        let item = self.item(id)?;
        Some(
            self.group_matrix(item.side)
                .transform_point3(item.transform.position),
        )
    }

    pub fn world_matrix(&self, id: ItemId) -> Option<Mat4> {
        let item = self.item(id)?;
        let t = &item.transform;
        let local = Mat4::from_scale_rotation_translation(
            Vec3::splat(t.scale),
            Quat::from_euler(glam::EulerRot::XYZ, t.rotation.x, t.rotation.y, t.rotation.z),
            t.position,
        );
        Some(self.group_matrix(item.side) * local)
    }

    /// Fixed world position of a top-wheel slot at zero rotation.
    pub fn slot_world_position(&self, slot: usize) -> Vec3 {
        let angle = self.start_angle + slot as f32 * std::f32::consts::TAU
            / self.items_per_wheel as f32;
        let xy = Vec2::from_angle(angle) * self.radius;
        self.center(WheelSide::Top) + Vec3::new(xy.x, xy.y, 0.0)
    }

    /// Restore position, scale and upright rotation recorded at construction.
    pub fn reset_item(&mut self, id: ItemId) {
        let Some(stable) = self.stable.get(id.0).copied() else {
            return;
        };
        if let Some(item) = self.items.get_mut(id.0) {
            item.transform.position = stable.original_position;
            item.transform.scale = stable.original_scale;
            item.transform.rotation = Vec3::new(0.0, 0.0, item.base_rotation);
        }
    }
}

/// Polar angle of a local position around its wheel centre.
#[inline]
pub fn polar_angle(local: Vec3) -> f32 {
    local.y.atan2(local.x)
}

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}
