use std::f32::consts::{FRAC_PI_2, TAU};

// Shared tuning constants for the photo wheel. Rotation quantities are in
// radians per animation tick, distances in scene units, delays in milliseconds.

// Layout
pub const ITEMS_PER_WHEEL: usize = 8;
pub const WHEEL_RADIUS: f32 = 300.0;
pub const WHEEL_Y_OFFSET: f32 = 400.0; // top wheel at +offset, bottom at -offset
pub const WHEEL_START_ANGLE: f32 = FRAC_PI_2; // polar angle of slot 0
pub const ITEM_WIDTH: f32 = 200.0;
pub const ITEM_HEIGHT: f32 = 140.0;
pub const ITEM_CORNER_RADIUS: f32 = 14.0;

// Camera
pub const CAMERA_Z: f32 = 1200.0;
pub const CAMERA_FOVY_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 1.0;
pub const CAMERA_ZFAR: f32 = 5000.0;

// Spin engine
pub const FRICTION: f32 = 0.87;
pub const VELOCITY_LERP: f32 = 0.1;
pub const VELOCITY_THRESHOLD: f32 = 0.002;
pub const MAX_VELOCITY: f32 = 0.1;
pub const KEY_SPIN_SPEED: f32 = 0.01;

// Wheel / trackpad scrolling
pub const INTENSITY_DIVISOR: f32 = 100.0;
pub const BASE_VELOCITY_CHANGE: f32 = 0.02;
pub const MAX_VELOCITY_CHANGE: f32 = 0.04;
pub const TRACKPAD_THRESHOLD: f32 = 50.0; // |deltaY| below this is treated as a trackpad
pub const TRACKPAD_MULTIPLIER: f32 = 1.5;
pub const TRACKPAD_SNAP_DELAY_MS: f64 = 150.0;
pub const MOUSE_WHEEL_SNAP_DELAY_MS: f64 = 500.0;

// Touch swipe
pub const SWIPE_DIVISOR: f32 = 500.0;
pub const MAX_SWIPE_SPEED: f32 = 0.05;
pub const SWIPE_SNAP_DELAY_MS: f64 = 300.0;

// Pointer drag
pub const DRAG_PIXELS_PER_TURN: f32 = 4000.0;
pub const MAX_DRAG_SPEED: f32 = 0.1;
pub const VELOCITY_HISTORY_LENGTH: usize = 5;
pub const MOMENTUM_WINDOW_MS: f64 = 100.0;
pub const MOMENTUM_THRESHOLD: f32 = 0.001;
pub const DRAG_SNAP_DELAY_MS: f64 = 500.0;
pub const CLICK_MOVE_TOLERANCE_PX: f32 = 5.0;

// Keyboard
pub const KEY_RELEASE_SNAP_DELAY_MS: f64 = 200.0;
pub const KEY_STEP_EXTRA: f32 = 0.05; // overshoot past one slot, removed by the chained snap
pub const KEY_STEP_ROTATION_SPEED: f32 = 0.12;
pub const KEY_STEP_DAMPING: f32 = 0.55;

// Snap engine
pub const SNAP_REFERENCE_SLOT: usize = 4;
pub const SNAP_MIN_ANGLE: f32 = 0.01;
pub const SPRING_STIFFNESS: f32 = 0.085;
pub const SPRING_DAMPING: f32 = 0.275;
pub const SETTLE_EPSILON: f32 = 0.001;

// Converge engine
pub const CONVERGE_SPEED: f32 = 0.02; // progress per tick
pub const CONVERGE_DURATION_MS: f64 = 1200.0;
pub const CONVERGE_Z_STACK: f32 = 8.0; // depth step per slot of travel

// Hover / tilt engine
pub const HOVER_CHECK_INTERVAL_MS: f64 = 32.0;
pub const HOVER_SPEED_CUTOFF: f32 = 0.03;
pub const HOVER_DISTANCE_CUTOFF: f32 = 400.0;
pub const LERP_FACTOR: f32 = 0.3;
pub const HOVER_SCALE: f32 = 1.03;
pub const MAX_TILT: f32 = 0.15;
pub const Z_DRIFT_THRESHOLD: f32 = 0.02;
pub const Z_CORRECTION_FACTOR: f32 = 0.1;

// Lifecycle
pub const HIDDEN_DISPOSE_DELAY_MS: f64 = 30_000.0;

/// Flat, immutable tuning surface handed to [`crate::Gallery::new`].
///
/// `Default` mirrors the constants above. A gallery never mutates its config.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelConfig {
    pub items_per_wheel: usize,
    pub wheel_radius: f32,
    pub wheel_y_offset: f32,
    pub start_angle: f32,
    pub item_width: f32,
    pub item_height: f32,

    pub friction: f32,
    pub velocity_lerp: f32,
    pub velocity_threshold: f32,
    pub max_velocity: f32,
    pub key_spin_speed: f32,

    pub intensity_divisor: f32,
    pub base_velocity_change: f32,
    pub max_velocity_change: f32,
    pub trackpad_threshold: f32,
    pub trackpad_multiplier: f32,
    pub trackpad_snap_delay_ms: f64,
    pub mouse_wheel_snap_delay_ms: f64,

    pub swipe_divisor: f32,
    pub max_swipe_speed: f32,
    pub swipe_snap_delay_ms: f64,

    pub drag_pixels_per_turn: f32,
    pub max_drag_speed: f32,
    pub momentum_window_ms: f64,
    pub momentum_threshold: f32,
    pub drag_snap_delay_ms: f64,
    pub click_move_tolerance_px: f32,

    pub key_release_snap_delay_ms: f64,
    pub key_step_extra: f32,
    pub key_step_rotation_speed: f32,
    pub key_step_damping: f32,

    pub reference_slot: usize,
    pub snap_min_angle: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    pub settle_epsilon: f32,

    pub converge_speed: f32,
    pub converge_duration_ms: f64,
    pub converge_z_stack: f32,

    pub hover_check_interval_ms: f64,
    pub hover_speed_cutoff: f32,
    pub hover_distance_cutoff: f32,
    pub lerp_factor: f32,
    pub hover_scale: f32,
    pub max_tilt: f32,
    pub z_drift_threshold: f32,
    pub z_correction_factor: f32,

    pub hidden_dispose_delay_ms: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            items_per_wheel: ITEMS_PER_WHEEL,
            wheel_radius: WHEEL_RADIUS,
            wheel_y_offset: WHEEL_Y_OFFSET,
            start_angle: WHEEL_START_ANGLE,
            item_width: ITEM_WIDTH,
            item_height: ITEM_HEIGHT,

            friction: FRICTION,
            velocity_lerp: VELOCITY_LERP,
            velocity_threshold: VELOCITY_THRESHOLD,
            max_velocity: MAX_VELOCITY,
            key_spin_speed: KEY_SPIN_SPEED,

            intensity_divisor: INTENSITY_DIVISOR,
            base_velocity_change: BASE_VELOCITY_CHANGE,
            max_velocity_change: MAX_VELOCITY_CHANGE,
            trackpad_threshold: TRACKPAD_THRESHOLD,
            trackpad_multiplier: TRACKPAD_MULTIPLIER,
            trackpad_snap_delay_ms: TRACKPAD_SNAP_DELAY_MS,
            mouse_wheel_snap_delay_ms: MOUSE_WHEEL_SNAP_DELAY_MS,

            swipe_divisor: SWIPE_DIVISOR,
            max_swipe_speed: MAX_SWIPE_SPEED,
            swipe_snap_delay_ms: SWIPE_SNAP_DELAY_MS,

            drag_pixels_per_turn: DRAG_PIXELS_PER_TURN,
            max_drag_speed: MAX_DRAG_SPEED,
            momentum_window_ms: MOMENTUM_WINDOW_MS,
            momentum_threshold: MOMENTUM_THRESHOLD,
            drag_snap_delay_ms: DRAG_SNAP_DELAY_MS,
            click_move_tolerance_px: CLICK_MOVE_TOLERANCE_PX,

            key_release_snap_delay_ms: KEY_RELEASE_SNAP_DELAY_MS,
            key_step_extra: KEY_STEP_EXTRA,
            key_step_rotation_speed: KEY_STEP_ROTATION_SPEED,
            key_step_damping: KEY_STEP_DAMPING,

            reference_slot: SNAP_REFERENCE_SLOT,
            snap_min_angle: SNAP_MIN_ANGLE,
            spring_stiffness: SPRING_STIFFNESS,
            spring_damping: SPRING_DAMPING,
            settle_epsilon: SETTLE_EPSILON,

            converge_speed: CONVERGE_SPEED,
            converge_duration_ms: CONVERGE_DURATION_MS,
            converge_z_stack: CONVERGE_Z_STACK,

            hover_check_interval_ms: HOVER_CHECK_INTERVAL_MS,
            hover_speed_cutoff: HOVER_SPEED_CUTOFF,
            hover_distance_cutoff: HOVER_DISTANCE_CUTOFF,
            lerp_factor: LERP_FACTOR,
            hover_scale: HOVER_SCALE,
            max_tilt: MAX_TILT,
            z_drift_threshold: Z_DRIFT_THRESHOLD,
            z_correction_factor: Z_CORRECTION_FACTOR,

            hidden_dispose_delay_ms: HIDDEN_DISPOSE_DELAY_MS,
        }
    }
}

impl WheelConfig {
    /// Same tuning with a different ring size. The snap reference slot is
    /// re-derived as the slot diametrically opposite slot 0, which is slot 4
    /// for the canonical eight-item wheel.
    pub fn with_items_per_wheel(items_per_wheel: usize) -> Self {
        Self {
            items_per_wheel,
            reference_slot: items_per_wheel / 2,
            ..Self::default()
        }
    }

    /// Angle between neighbouring slots.
    #[inline]
    pub fn slot_interval(&self) -> f32 {
        TAU / self.items_per_wheel.max(1) as f32
    }
}
