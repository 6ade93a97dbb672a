use glam::Vec2;

use crate::constants::{DOM_DELTA_LINE, DOM_DELTA_PAGE, WHEEL_LINE_HEIGHT_PX};

/// Canvas bounding rect in CSS pixels, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn client_to_canvas(client: Vec2, rect: &CanvasRect) -> Vec2 {
    Vec2::new(client.x - rect.left, client.y - rect.top)
}

/// Canvas-relative CSS pixels to normalized device coordinates (y up).
#[inline]
pub fn canvas_to_ndc(px: Vec2, rect: &CanvasRect) -> Vec2 {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (px.x / rect.width) * 2.0 - 1.0,
        1.0 - (px.y / rect.height) * 2.0,
    )
}

/// Normalise a `WheelEvent.deltaY` to pixels regardless of delta mode.
#[inline]
pub fn wheel_delta_px(delta: f64, delta_mode: u32, page_height_px: f64) -> f64 {
    match delta_mode {
        DOM_DELTA_LINE => delta * WHEEL_LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => delta * page_height_px,
        _ => delta,
    }
}

/// Backing store size for a canvas of the given CSS size.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let w = (css_width * dpr).round().max(1.0) as u32;
    let h = (css_height * dpr).round().max(1.0) as u32;
    (w, h)
}
