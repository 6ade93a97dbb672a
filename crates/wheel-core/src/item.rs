use glam::{Vec2, Vec3};

/// Which of the two stacked rings an item belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WheelSide {
    Top,
    Bottom,
}

impl WheelSide {
    pub fn opposite(self) -> Self {
        match self {
            WheelSide::Top => WheelSide::Bottom,
            WheelSide::Bottom => WheelSide::Top,
        }
    }
}

/// Index into the flat item arena: top wheel first, then bottom wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

/// One portfolio entry shown on the wheel.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub image: String,
    pub path: String,
    pub title: String,
}

impl Project {
    pub fn new(image: impl Into<String>, path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            path: path.into(),
            title: title.into(),
        }
    }
}

/// Transform of an item relative to its wheel's (rotating) group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTransform {
    pub position: Vec3,
    /// Euler XYZ: x/y carry hover tilt, z carries the upright counter-rotation.
    pub rotation: Vec3,
    pub scale: f32,
}

/// A photo on one of the wheels. `side` and `slot` never change after
/// construction; only the transform and shading state move.
#[derive(Clone, Debug)]
pub struct WheelItem {
    pub id: ItemId,
    pub side: WheelSide,
    pub slot: usize,
    pub project: Project,
    pub transform: ItemTransform,
    /// Accumulated counter-rotation that keeps the photo upright.
    pub base_rotation: f32,
    /// Rim-light shader uniform, 1.0 when hovered.
    pub mouse_influence: f32,
}

/// Attributes recorded at construction and used to restore an item.
#[derive(Clone, Copy, Debug)]
pub struct ItemStable {
    pub original_position: Vec3,
    pub original_scale: f32,
}

/// Cached polar path for one moving item during a converge animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    pub start_angle: f32,
    pub target_angle: f32,
    /// Shorter signed arc from start to target, in (-π, π].
    pub angle_delta: f32,
    pub start_z: f32,
    pub target_z: f32,
    pub radius: f32,
}

impl Trajectory {
    /// Local position along the path at eased progress `t` in \[0, 1\].
    pub fn position_at(&self, t: f32) -> Vec3 {
        let angle = self.start_angle + self.angle_delta * t;
        let z = self.start_z + (self.target_z - self.start_z) * t;
        let xy = Vec2::from_angle(angle) * self.radius;
        Vec3::new(xy.x, xy.y, z)
    }
}

/// Per-animation scratch data; replaced wholesale rather than field-cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemTransient {
    pub is_target: bool,
    pub trajectory: Option<Trajectory>,
}
