use wasm_bindgen::JsCast;
use web_sys as web;
use wheel_core::{EventKind, ListenerTarget};

use crate::app::{dispatch, rebuild_gpu, SharedApp};
use crate::dom;
use crate::listeners::WebListeners;

pub fn wire(app: &SharedApp, listeners: &mut WebListeners) -> anyhow::Result<()> {
    let a = app.clone();
    listeners.add(ListenerTarget::Window, EventKind::Resize, move |_ev| {
        dispatch(&a, |app| app.sync_viewport())
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Document, EventKind::VisibilityChange, move |ev| {
        let hidden = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Document>().ok())
            .or_else(dom::window_document)
            .map(|d| dom::page_hidden(&d))
            .unwrap_or(false);
        log::info!("[lifecycle] page {}", if hidden { "hidden" } else { "visible" });
        dispatch(&a, |app| app.gallery.on_visibility_change(hidden))
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Window, EventKind::PageHide, move |_ev| {
        dispatch(&a, |app| app.gallery.on_page_hide())
    })?;

    // Default prevented so the browser is allowed to restore the context.
    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::ContextLost, move |ev| {
        ev.prevent_default();
        dispatch(&a, |app| {
            app.gallery.on_context_lost();
            if let Some(mut gpu) = app.gpu.take() {
                gpu.dispose();
            }
        })
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Canvas, EventKind::ContextRestored, move |_ev| {
        rebuild_gpu(&a);
        Ok(())
    })?;

    Ok(())
}
