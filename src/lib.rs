#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use wheel_core::constants::{ITEM_HEIGHT, ITEM_WIDTH};
use wheel_core::{EventKind, Gallery, SystemClock, WheelConfig};

mod app;
mod catalog;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod listeners;
mod render;

use app::{App, SharedApp};
use listeners::WebListeners;

/// The currently mounted gallery, if any. Owned by the page-level watcher
/// rather than a global so a remount simply replaces it.
type MountSlot = Rc<RefCell<Option<SharedApp>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("wheel-web starting");

    let slot: MountSlot = Rc::new(RefCell::new(None));
    wire_remount_watcher(&slot);
    spawn_local(async move {
        if let Err(e) = mount(slot).await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// A page restored from the back/forward cache after navigating away has a
/// disposed gallery; mount a fresh one. This listener lives for the whole
/// page and is never detached.
fn wire_remount_watcher(slot: &MountSlot) {
    let slot = slot.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let persisted = ev
            .dyn_ref::<web::PageTransitionEvent>()
            .map(|e| e.persisted())
            .unwrap_or(false);
        let needs_mount = match slot.borrow().as_ref() {
            Some(app) => app.try_borrow().map(|a| !a.running).unwrap_or(false),
            None => true,
        };
        if persisted && needs_mount {
            log::info!("[lifecycle] restored from cache, remounting");
            let slot = slot.clone();
            spawn_local(async move {
                if let Err(e) = mount(slot).await {
                    log::error!("remount error: {:?}", e);
                }
            });
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback(
            EventKind::PageShow.as_str(),
            closure.as_ref().unchecked_ref(),
        );
    }
    closure.forget();
}

async fn mount(slot: MountSlot) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document)?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let projects = catalog::projects();
    let mut gallery = Gallery::new(
        WheelConfig::default(),
        &projects,
        Box::new(SystemClock::new()),
    )?;
    gallery.set_viewport(width as f32, height as f32);
    let items = gallery.wheel().items().to_vec();

    // The gallery stays interactive without a GPU; it just draws nothing.
    let device_lost = Arc::new(AtomicBool::new(false));
    let gpu = match render::GpuState::new(&canvas, device_lost.clone()).await {
        Ok(mut gpu) => {
            gpu.load_assets(&items, ITEM_WIDTH / ITEM_HEIGHT).await;
            Some(gpu)
        }
        Err(e) => {
            log::error!("[gpu] init error: {:?}", e);
            None
        }
    };

    let app: SharedApp = Rc::new(RefCell::new(App {
        gallery,
        canvas: canvas.clone(),
        gpu,
        listeners: WebListeners::new(window, document.clone(), canvas),
        device_lost,
        running: true,
        rebuilding: false,
        last_frame: Instant::now(),
        timer_poll: None,
    }));

    events::wire(&app)?;
    frame::start_timer_poll(&app)?;
    frame::start_loop(app.clone());
    *slot.borrow_mut() = Some(app.clone());

    // Mounted while already hidden: start the hidden-dispose countdown.
    if dom::page_hidden(&document) {
        app::dispatch(&app, |a| a.gallery.on_visibility_change(true))?;
    }
    app::apply_effects(&app)
}
