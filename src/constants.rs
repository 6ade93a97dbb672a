// DOM hooks and frontend tuning for the web gallery.
//
// Motion and layout tuning lives in `wheel_core::constants`; these only
// concern how the page is wired and drawn.

// Element ids expected in the host page
pub const CANVAS_ID: &str = "wheel-canvas";
pub const TITLE_ID: &str = "project-title";

// Deferred timers keep firing while no animation frames are produced
pub const TIMER_POLL_INTERVAL_MS: i32 = 250;

// Wheel event delta modes (WheelEvent.deltaMode)
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;
pub const WHEEL_LINE_HEIGHT_PX: f64 = 16.0;

// Render
pub const CLEAR_COLOR: [f64; 3] = [0.04, 0.04, 0.05];
pub const RIM_LIGHT_COLOR: [f32; 3] = [1.0, 0.93, 0.82];
