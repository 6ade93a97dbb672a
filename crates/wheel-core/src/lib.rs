//! Interaction core of the photo wheel gallery.
//!
//! Everything here is platform-neutral: the web frontend feeds DOM input and
//! frame ticks into a [`Gallery`] and applies the [`Effect`]s it emits.

pub mod camera;
pub mod clock;
pub mod constants;
pub mod converge;
pub mod effects;
pub mod error;
pub mod gallery;
pub mod hover;
pub mod input;
pub mod item;
pub mod lifecycle;
pub mod resources;
pub mod snap;
pub mod spin;
pub mod state;
pub mod timers;
pub mod wheel;

pub use camera::{Camera, Ray};
pub use clock::{Clock, ManualClock, SystemClock};
pub use constants::WheelConfig;
pub use effects::{Cursor, Effect};
pub use error::WheelError;
pub use gallery::Gallery;
pub use input::Key;
pub use item::{ItemId, Project, WheelItem, WheelSide};
pub use lifecycle::{EventKind, ListenerRegistry, ListenerTarget};
pub use resources::{ResourceId, ResourceKind, ResourceTracker};
pub use state::{AnimationMode, InteractionState};
pub use timers::{TimerKind, Timers};
pub use wheel::WheelPair;
