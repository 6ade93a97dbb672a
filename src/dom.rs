use wasm_bindgen::JsCast;
use web_sys as web;
use wheel_core::Cursor;

use crate::constants::{CANVAS_ID, TITLE_ID};
use crate::input::{self, CanvasRect};

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

#[inline]
pub fn canvas_rect(canvas: &web::HtmlCanvasElement) -> CanvasRect {
    let rect = canvas.get_bounding_client_rect();
    CanvasRect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

/// Keep the canvas backing store at CSS size times `devicePixelRatio`.
/// Returns the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
    (canvas.width(), canvas.height())
}

pub fn set_title(text: &str) {
    if let Some(el) = window_document().and_then(|d| d.get_element_by_id(TITLE_ID)) {
        el.set_text_content(Some(text));
    }
}

pub fn set_cursor(cursor: Cursor) {
    if let Some(body) = window_document().and_then(|d| d.body()) {
        _ = body.style().set_property("cursor", cursor.as_css());
    }
}

pub fn navigate(path: &str) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    window
        .location()
        .set_href(path)
        .map_err(|e| anyhow::anyhow!("navigation to {} failed: {:?}", path, e))
}

#[inline]
pub fn page_hidden(document: &web::Document) -> bool {
    document.visibility_state() == web::VisibilityState::Hidden
}
