/// Cursor affordance requested for `document.body`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
    Grabbing,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// Side effects the host applies on behalf of the gallery.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Replace the text of the project title element.
    SetTitle(String),
    SetCursor(Cursor),
    /// Full-page navigation to an item's linked path. Emitted at most once.
    Navigate(String),
    /// Remove every registered listener and release graphics resources.
    Dispose,
}
