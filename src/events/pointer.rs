use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;
use wheel_core::{EventKind, ListenerTarget};

use crate::app::{dispatch, SharedApp};
use crate::dom;
use crate::input;
use crate::listeners::WebListeners;

fn cast<T: JsCast>(ev: web::Event) -> anyhow::Result<T> {
    ev.dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("unexpected event type: {:?}", e.type_()))
}

/// Pointer position in canvas CSS pixels and NDC.
fn pointer_position(canvas: &web::HtmlCanvasElement, client: Vec2) -> (Vec2, Vec2) {
    let rect = dom::canvas_rect(canvas);
    let px = input::client_to_canvas(client, &rect);
    (px, input::canvas_to_ndc(px, &rect))
}

fn first_touch(ev: &web::TouchEvent) -> Option<Vec2> {
    let touch = ev.touches().get(0)?;
    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}

pub fn wire(app: &SharedApp, listeners: &mut WebListeners) -> anyhow::Result<()> {
    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::Wheel, move |ev| {
        let ev: web::WheelEvent = cast(ev)?;
        ev.prevent_default();
        let page_height = web::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .unwrap_or(800.0);
        let delta = input::wheel_delta_px(ev.delta_y(), ev.delta_mode(), page_height);
        dispatch(&a, |app| app.gallery.on_wheel(delta as f32))
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::TouchStart, move |ev| {
        let ev: web::TouchEvent = cast(ev)?;
        let Some(point) = first_touch(&ev) else {
            return Ok(());
        };
        dispatch(&a, |app| app.gallery.on_touch_start(point))
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::TouchMove, move |ev| {
        let ev: web::TouchEvent = cast(ev)?;
        ev.prevent_default();
        let Some(point) = first_touch(&ev) else {
            return Ok(());
        };
        dispatch(&a, |app| app.gallery.on_touch_move(point))
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::TouchEnd, move |_ev| {
        dispatch(&a, |app| app.gallery.on_touch_end())
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::MouseDown, move |ev| {
        let ev: web::MouseEvent = cast(ev)?;
        if ev.button() != 0 {
            return Ok(());
        }
        dispatch(&a, |app| {
            let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let (px, _) = pointer_position(&app.canvas, client);
            app.gallery.on_pointer_down(px);
        })
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::MouseMove, move |ev| {
        let ev: web::MouseEvent = cast(ev)?;
        dispatch(&a, |app| {
            let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let (px, ndc) = pointer_position(&app.canvas, client);
            app.gallery.on_pointer_move(px, ndc);
        })
    })?;

    // Released outside the canvas still ends the drag.
    let a = app.clone();
    listeners.add(ListenerTarget::Window, EventKind::MouseUp, move |_ev| {
        dispatch(&a, |app| app.gallery.on_pointer_up())
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::MouseLeave, move |_ev| {
        dispatch(&a, |app| app.gallery.on_pointer_leave())
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::Click, move |ev| {
        let ev: web::MouseEvent = cast(ev)?;
        dispatch(&a, |app| {
            let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let (px, ndc) = pointer_position(&app.canvas, client);
            // Taps never produce a mousemove, so refresh the pointer first.
            if !app.gallery.state().drag.suppress_click {
                app.gallery.on_pointer_move(px, ndc);
            }
            app.gallery.on_click();
        })
    })?;

    Ok(())
}
