//! Mount/dispose bookkeeping and the listener registry used by hosts.

/// Where a DOM listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Window,
    Document,
    Canvas,
}

/// The fixed set of DOM events the gallery listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    Click,
    KeyDown,
    KeyUp,
    Resize,
    VisibilityChange,
    PageHide,
    PageShow,
    ContextLost,
    ContextRestored,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Wheel => "wheel",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::Resize => "resize",
            EventKind::VisibilityChange => "visibilitychange",
            EventKind::PageHide => "pagehide",
            EventKind::PageShow => "pageshow",
            EventKind::ContextLost => "webglcontextlost",
            EventKind::ContextRestored => "webglcontextrestored",
        }
    }
}

/// One `(target, event, handler)` triple.
pub struct Registration<H> {
    pub target: ListenerTarget,
    pub kind: EventKind,
    pub handler: H,
}

/// Records every listener added so removal is symmetric: `drain` hands back
/// each registration exactly once.
pub struct ListenerRegistry<H> {
    entries: Vec<Registration<H>>,
}

impl<H> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: ListenerTarget, kind: EventKind, handler: H) {
        self.entries.push(Registration {
            target,
            kind,
            handler,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, target: ListenerTarget, kind: EventKind) -> bool {
        self.entries
            .iter()
            .any(|r| r.target == target && r.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration<H>> {
        self.entries.iter()
    }

    pub fn drain(&mut self) -> Vec<Registration<H>> {
        std::mem::take(&mut self.entries)
    }
}

/// Run one listener body, logging a failure instead of propagating it so
/// other listeners and later events still run. Returns whether it succeeded.
pub fn run_isolated(kind: EventKind, body: impl FnOnce() -> anyhow::Result<()>) -> bool {
    match body() {
        Ok(()) => true,
        Err(e) => {
            log::error!("[lifecycle] {} handler failed: {:?}", kind.as_str(), e);
            false
        }
    }
}

/// Whether the gallery is live, and where it navigated to if it did.
#[derive(Clone, Debug, Default)]
pub struct Lifecycle {
    disposed: bool,
    navigated_to: Option<String>,
}

impl Lifecycle {
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn navigated_to(&self) -> Option<&str> {
        self.navigated_to.as_deref()
    }

    /// Record a navigation. Only the first one counts.
    pub fn mark_navigated(&mut self, path: &str) -> bool {
        if self.navigated_to.is_some() || self.disposed {
            return false;
        }
        self.navigated_to = Some(path.to_owned());
        true
    }

    /// Flip to disposed. Returns `true` only the first time.
    pub fn mark_disposed(&mut self) -> bool {
        !std::mem::replace(&mut self.disposed, true)
    }
}
