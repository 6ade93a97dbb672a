use web_sys as web;

use crate::app::SharedApp;
use crate::listeners::WebListeners;

pub mod keyboard;
pub mod page;
pub mod pointer;

/// Attach every gallery listener and hand the registry to the app, which
/// detaches them all on dispose.
pub fn wire(app: &SharedApp) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = app.borrow().canvas.clone();
    let mut listeners = WebListeners::new(window, document, canvas);

    pointer::wire(app, &mut listeners)?;
    keyboard::wire(app, &mut listeners)?;
    page::wire(app, &mut listeners)?;

    log::info!("[lifecycle] attached {} listeners", listeners.len());
    app.borrow_mut().listeners = listeners;
    Ok(())
}
