//! Mutable interaction state and the explicit animation mode.

use fnv::FnvHashSet;
use glam::Vec2;
use smallvec::SmallVec;

use crate::constants::VELOCITY_HISTORY_LENGTH;
use crate::input::{Key, VelocitySample};
use crate::item::ItemId;
use crate::snap::SpringState;
use crate::timers::Timers;

/// Progress of an active converge animation. Per-item paths live in the
/// wheel's transient records.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergeState {
    pub clicked: ItemId,
    pub pair: ItemId,
    pub progress: f32,
}

/// Exactly one of these drives rotation on any given tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationMode {
    Idle,
    Spinning,
    Snapping(SpringState),
    StepRotating(SpringState),
    Converging(ConvergeState),
    ContextLost,
}

impl AnimationMode {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationMode::Idle => "idle",
            AnimationMode::Spinning => "spinning",
            AnimationMode::Snapping(_) => "snapping",
            AnimationMode::StepRotating(_) => "step-rotating",
            AnimationMode::Converging(_) => "converging",
            AnimationMode::ContextLost => "context-lost",
        }
    }

    /// Whether a move from `self` to `next` keeps the exclusivity rules:
    /// a lost context only resumes to idle, a converge only ends through
    /// idle (cancel) or context loss.
    pub fn allows(&self, next: &AnimationMode) -> bool {
        use AnimationMode::*;
        match (self, next) {
            (ContextLost, Idle) => true,
            (ContextLost, _) => false,
            (_, ContextLost) => true,
            (Converging(_), Idle) => true,
            (Converging(a), Converging(b)) => a.clicked == b.clicked,
            (Converging(_), _) => false,
            _ => true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
    pub active: bool,
    pub start_px: Vec2,
    pub last_px: Vec2,
    pub moved_px: f32,
    pub history: SmallVec<[VelocitySample; VELOCITY_HISTORY_LENGTH]>,
    pub suppress_click: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TouchState {
    pub last: Option<Vec2>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HoverState {
    pub hovered: Option<ItemId>,
    pub pointer_ndc: Option<Vec2>,
    pub since_check_ms: f64,
}

/// All mutable animation and interaction variables of a mounted gallery.
#[derive(Debug)]
pub struct InteractionState {
    mode: AnimationMode,
    pub target_velocity: f32,
    pub current_velocity: f32,
    pub drag: DragState,
    pub touch: TouchState,
    pub hover: HoverState,
    pub pressed: FnvHashSet<Key>,
    pub timers: Timers,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self {
            mode: AnimationMode::Idle,
            target_velocity: 0.0,
            current_velocity: 0.0,
            drag: DragState::default(),
            touch: TouchState::default(),
            hover: HoverState::default(),
            pressed: FnvHashSet::default(),
            timers: Timers::new(),
        }
    }

    pub fn mode(&self) -> &AnimationMode {
        &self.mode
    }

    pub fn mode_mut(&mut self) -> &mut AnimationMode {
        &mut self.mode
    }

    pub fn is_converging(&self) -> bool {
        matches!(self.mode, AnimationMode::Converging(_))
    }

    pub fn is_context_lost(&self) -> bool {
        matches!(self.mode, AnimationMode::ContextLost)
    }

    pub fn converge(&self) -> Option<ConvergeState> {
        match self.mode {
            AnimationMode::Converging(c) => Some(c),
            _ => None,
        }
    }

    /// The single entry point for mode changes. Entering a snap or step
    /// rotation zeroes both velocities. Returns `false` when refused.
    pub fn transition(&mut self, next: AnimationMode) -> bool {
        if !self.mode.allows(&next) {
            log::debug!(
                "[wheel] refused transition {} -> {}",
                self.mode.name(),
                next.name()
            );
            return false;
        }
        if matches!(
            next,
            AnimationMode::Snapping(_) | AnimationMode::StepRotating(_)
        ) {
            self.stop_velocity();
        }
        if self.mode.name() != next.name() {
            log::debug!("[wheel] {} -> {}", self.mode.name(), next.name());
        }
        self.mode = next;
        true
    }

    pub fn stop_velocity(&mut self) {
        self.target_velocity = 0.0;
        self.current_velocity = 0.0;
    }

    pub fn spin_keys_held(&self) -> bool {
        self.pressed.iter().any(|k| k.spin_direction().is_some())
    }
}
