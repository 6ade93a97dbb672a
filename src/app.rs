use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use wheel_core::constants::{ITEM_HEIGHT, ITEM_WIDTH};
use wheel_core::{Effect, Gallery, WheelItem};

use crate::dom;
use crate::listeners::WebListeners;
use crate::render::GpuState;

pub type SharedApp = Rc<RefCell<App>>;

/// One mounted gallery: the interaction core plus everything it owns in
/// the page. Dropped (via teardown) on unmount or navigation.
pub struct App {
    pub gallery: Gallery,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<GpuState>,
    pub listeners: WebListeners,
    pub device_lost: Arc<AtomicBool>,
    pub running: bool,
    pub rebuilding: bool,
    pub last_frame: Instant,
    pub timer_poll: Option<(i32, Closure<dyn FnMut()>)>,
}

impl App {
    pub fn items_snapshot(&self) -> Vec<WheelItem> {
        self.gallery.wheel().items().to_vec()
    }

    /// Keep the backing store, camera aspect and surface in step with the
    /// canvas' CSS size.
    pub fn sync_viewport(&mut self) {
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
        self.gallery.set_viewport(w as f32, h as f32);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(w, h);
        }
    }

    fn teardown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.listeners.detach_all();
        if let Some((handle, closure)) = self.timer_poll.take() {
            if let Some(w) = web::window() {
                w.clear_interval_with_handle(handle);
            }
            spawn_local(async move {
                drop(closure);
            });
        }
        if let Some(mut gpu) = self.gpu.take() {
            gpu.dispose();
        }
        log::info!("[lifecycle] unmounted");
    }
}

/// Run `f` against the mounted app, then apply whatever effects it queued.
/// Fails instead of panicking when the app is already borrowed.
pub fn dispatch(app: &SharedApp, f: impl FnOnce(&mut App)) -> anyhow::Result<()> {
    {
        let mut a = app
            .try_borrow_mut()
            .map_err(|_| anyhow::anyhow!("gallery is busy"))?;
        f(&mut a);
    }
    apply_effects(app)
}

/// Drain the gallery outbox into the page. Teardown happens before any
/// navigation so nothing keeps running while the page unloads.
pub fn apply_effects(app: &SharedApp) -> anyhow::Result<()> {
    let mut navigate_to = None;
    {
        let mut a = app
            .try_borrow_mut()
            .map_err(|_| anyhow::anyhow!("gallery is busy"))?;
        for effect in a.gallery.drain_effects() {
            match effect {
                Effect::SetTitle(title) => dom::set_title(&title),
                Effect::SetCursor(cursor) => dom::set_cursor(cursor),
                Effect::Dispose => a.teardown(),
                Effect::Navigate(path) => navigate_to = Some(path),
            }
        }
    }
    if let Some(path) = navigate_to {
        dom::navigate(&path)?;
    }
    Ok(())
}

/// Build a fresh GPU state after a context or device loss and resume the
/// gallery once textures are back.
pub fn rebuild_gpu(app: &SharedApp) {
    let (canvas, device_lost, items) = {
        let Ok(mut a) = app.try_borrow_mut() else {
            return;
        };
        if a.rebuilding || !a.running {
            return;
        }
        a.rebuilding = true;
        if let Some(mut gpu) = a.gpu.take() {
            gpu.dispose();
        }
        a.device_lost.store(false, Ordering::SeqCst);
        (a.canvas.clone(), a.device_lost.clone(), a.items_snapshot())
    };
    let app = app.clone();
    spawn_local(async move {
        let gpu = match GpuState::new(&canvas, device_lost).await {
            Ok(mut gpu) => {
                gpu.load_assets(&items, ITEM_WIDTH / ITEM_HEIGHT).await;
                Some(gpu)
            }
            Err(e) => {
                log::error!("[gpu] rebuild failed: {:?}", e);
                None
            }
        };
        let result = dispatch(&app, |a| {
            a.rebuilding = false;
            if !a.running {
                return;
            }
            let restored = gpu.is_some();
            a.gpu = gpu;
            a.sync_viewport();
            if restored {
                a.gallery.on_context_restored();
            }
        });
        if let Err(e) = result {
            log::error!("[gpu] resume after rebuild failed: {:?}", e);
        }
    });
}
