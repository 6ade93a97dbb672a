use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use wheel_core::lifecycle::{run_isolated, Registration};
use wheel_core::{EventKind, ListenerRegistry, ListenerTarget};

pub type Handler = Closure<dyn FnMut(web::Event)>;

/// DOM listeners owned by one mounted gallery. Every closure is recorded
/// with the target it was added to, so teardown removes exactly what was
/// added.
pub struct WebListeners {
    registry: ListenerRegistry<Handler>,
    window: web::Window,
    document: web::Document,
    canvas: web::HtmlCanvasElement,
}

impl WebListeners {
    pub fn new(window: web::Window, document: web::Document, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            registry: ListenerRegistry::new(),
            window,
            document,
            canvas,
        }
    }

    fn target(&self, target: ListenerTarget) -> &web::EventTarget {
        match target {
            ListenerTarget::Window => self.window.unchecked_ref(),
            ListenerTarget::Document => self.document.unchecked_ref(),
            ListenerTarget::Canvas => self.canvas.unchecked_ref(),
        }
    }

    /// Attach `handler`. Its body runs isolated: an `Err` is logged and later
    /// events still dispatch. Wheel and touch listeners are non-passive so
    /// they may cancel page scrolling.
    pub fn add<F>(&mut self, target: ListenerTarget, kind: EventKind, mut handler: F) -> anyhow::Result<()>
    where
        F: FnMut(web::Event) -> anyhow::Result<()> + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            run_isolated(kind, || handler(ev));
        }) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(!matches!(
            kind,
            EventKind::Wheel | EventKind::TouchMove | EventKind::TouchStart
        ));
        self.target(target)
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.as_str(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind.as_str(), e))?;
        self.registry.register(target, kind, closure);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Remove every listener from the target it was added to. The closures
    /// are dropped on a later task, since one of them may be running now.
    pub fn detach_all(&mut self) {
        let drained: Vec<Registration<Handler>> = self.registry.drain();
        for reg in &drained {
            if let Err(e) = self.target(reg.target).remove_event_listener_with_callback(
                reg.kind.as_str(),
                reg.handler.as_ref().unchecked_ref(),
            ) {
                log::warn!("[lifecycle] remove {} listener: {:?}", reg.kind.as_str(), e);
            }
        }
        log::info!("[lifecycle] detached {} listeners", drained.len());
        spawn_local(async move {
            drop(drained);
        });
    }
}
