use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::Ordering;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::app::{apply_effects, dispatch, rebuild_gpu, App, SharedApp};
use crate::constants::TIMER_POLL_INTERVAL_MS;

/// One animation frame. Returns `false` once the gallery has been torn down
/// so the loop stops requesting frames.
fn frame(app: &SharedApp) -> bool {
    let lost = {
        let Ok(mut a) = app.try_borrow_mut() else {
            return true;
        };
        if !a.running {
            return false;
        }
        let now = Instant::now();
        let dt = now - a.last_frame;
        a.last_frame = now;

        let lost = a.device_lost.load(Ordering::SeqCst) && !a.rebuilding;
        if lost {
            a.gallery.on_context_lost();
        }
        a.gallery.tick(dt);

        let App { gpu, gallery, .. } = &mut *a;
        if let Some(g) = gpu.as_mut() {
            if let Err(e) = g.render(gallery.wheel(), gallery.camera()) {
                log::error!("render error: {:?}", e);
            }
        }
        lost
    };
    if lost {
        rebuild_gpu(app);
    }
    if let Err(e) = apply_effects(app) {
        log::error!("[wheel] applying effects failed: {:?}", e);
    }
    app.try_borrow().map(|a| a.running).unwrap_or(true)
}

pub fn start_loop(app: SharedApp) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame(&app) {
            // Dropping the closure from inside itself is not allowed; defer it.
            let finished = tick_clone.borrow_mut().take();
            spawn_local(async move {
                drop(finished);
            });
            log::info!("[wheel] frame loop stopped");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Deferred timers must fire even when the tab is hidden and no frames are
/// delivered, so they are also polled from a low-frequency interval.
pub fn start_timer_poll(app: &SharedApp) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let a = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Err(e) = dispatch(&a, |app| app.gallery.poll_timers()) {
            log::warn!("[wheel] timer poll skipped: {:?}", e);
        }
    }) as Box<dyn FnMut()>);
    let handle = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TIMER_POLL_INTERVAL_MS,
        )
        .map_err(|e| anyhow::anyhow!("setInterval failed: {:?}", e))?;
    app.borrow_mut().timer_poll = Some((handle, closure));
    Ok(())
}
