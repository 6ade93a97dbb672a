use wasm_bindgen::JsCast;
use web_sys as web;
use wheel_core::{EventKind, Key, ListenerTarget};

use crate::app::{dispatch, SharedApp};
use crate::listeners::WebListeners;

fn keyboard_event(ev: web::Event) -> anyhow::Result<web::KeyboardEvent> {
    ev.dyn_into::<web::KeyboardEvent>()
        .map_err(|e| anyhow::anyhow!("unexpected event type: {:?}", e.type_()))
}

pub fn wire(app: &SharedApp, listeners: &mut WebListeners) -> anyhow::Result<()> {
    let a = app.clone();
    listeners.add(ListenerTarget::Window, EventKind::KeyDown, move |ev| {
        let ev = keyboard_event(ev)?;
        let Some(key) = Key::from_dom(&ev.key()) else {
            return Ok(());
        };
        // Arrow keys would otherwise scroll the page.
        if key != Key::Enter && key != Key::Escape {
            ev.prevent_default();
        }
        // Auto-repeat only matters for the held spin keys.
        if ev.repeat() && key.spin_direction().is_none() {
            return Ok(());
        }
        dispatch(&a, |app| app.gallery.on_key_down(key))
    })?;

    let a = app.clone();
    listeners.add(ListenerTarget::Window, EventKind::KeyUp, move |ev| {
        let ev = keyboard_event(ev)?;
        let Some(key) = Key::from_dom(&ev.key()) else {
            return Ok(());
        };
        dispatch(&a, |app| app.gallery.on_key_up(key))
    })?;

    Ok(())
}
