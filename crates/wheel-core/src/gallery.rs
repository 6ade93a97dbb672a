//! The gallery context object: owns the wheel, the interaction state and the
//! clock, dispatches input, and runs one state-machine tick per frame.
//!
//! A `Gallery` is constructed by the host view on mount and dropped on
//! unmount. All DOM-facing side effects are queued as [`Effect`]s.

use std::time::Duration;

use glam::Vec2;

use crate::camera::Camera;
use crate::clock::Clock;
use crate::constants::WheelConfig;
use crate::converge;
use crate::effects::{Cursor, Effect};
use crate::error::WheelError;
use crate::hover;
use crate::input::{self, Key, VelocitySample};
use crate::item::{ItemId, Project};
use crate::lifecycle::Lifecycle;
use crate::snap::{self, SpringState};
use crate::spin;
use crate::state::{AnimationMode, DragState, InteractionState};
use crate::timers::TimerKind;
use crate::wheel::WheelPair;

pub struct Gallery {
    config: WheelConfig,
    clock: Box<dyn Clock>,
    camera: Camera,
    wheel: WheelPair,
    state: InteractionState,
    lifecycle: Lifecycle,
    effects: Vec<Effect>,
    cursor: Cursor,
    title_item: Option<ItemId>,
}

impl Gallery {
    pub fn new(
        config: WheelConfig,
        projects: &[Project],
        clock: Box<dyn Clock>,
    ) -> Result<Self, WheelError> {
        let wheel = WheelPair::build(&config, projects)?;
        let mut gallery = Self {
            config,
            clock,
            camera: Camera::default(),
            wheel,
            state: InteractionState::new(),
            lifecycle: Lifecycle::default(),
            effects: Vec::new(),
            cursor: Cursor::Default,
            title_item: None,
        };
        gallery.update_title();
        log::info!("[wheel] mounted with {} items", gallery.wheel.len());
        Ok(gallery)
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn wheel(&self) -> &WheelPair {
        &self.wheel
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mode(&self) -> &AnimationMode {
        self.state.mode()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn hovered(&self) -> Option<ItemId> {
        self.state.hover.hovered
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle.is_disposed()
    }

    pub fn navigated_to(&self) -> Option<&str> {
        self.lifecycle.navigated_to()
    }

    /// Top-wheel item currently nearest the reference slot.
    pub fn aligned_item(&self) -> Option<ItemId> {
        snap::closest_to_reference(&self.wheel, self.config.reference_slot)
    }

    pub fn calculate_snap_angle(&self) -> Option<(ItemId, f32)> {
        snap::calculate_snap_angle(&self.wheel, &self.config)
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    fn accepts_input(&self) -> bool {
        !self.lifecycle.is_disposed() && !self.state.is_context_lost()
    }

    // ---------------- Frame ----------------

    /// One animation frame: fire due timers, advance exactly one rotation
    /// engine, then run hover/tilt on the post-rotation transforms.
    pub fn tick(&mut self, dt: Duration) {
        if self.lifecycle.is_disposed() {
            return;
        }
        self.poll_timers();
        if self.lifecycle.is_disposed() || self.state.is_context_lost() {
            return;
        }
        self.step_rotation();
        self.step_hover(dt.as_secs_f64() * 1000.0);
    }

    /// Fire any deferred timers that are due. Safe to call between frames.
    pub fn poll_timers(&mut self) {
        if self.lifecycle.is_disposed() {
            return;
        }
        let now = self.now();
        for kind in self.state.timers.take_due(now) {
            match kind {
                TimerKind::Snap => self.snap(),
                TimerKind::Navigate => self.navigate(),
                TimerKind::HiddenDispose => {
                    log::info!("[lifecycle] page hidden too long, disposing");
                    self.dispose();
                }
            }
            if self.lifecycle.is_disposed() {
                break;
            }
        }
    }

    fn step_rotation(&mut self) {
        match *self.state.mode() {
            AnimationMode::Converging(mut c) => {
                // Reaching full progress just holds the pose until the
                // navigation timer fires.
                converge::step(&mut self.wheel, &mut c, &self.config);
                if let AnimationMode::Converging(slot) = self.state.mode_mut() {
                    *slot = c;
                }
            }
            AnimationMode::Snapping(mut s) => {
                let step = s.step_spring(
                    self.config.spring_stiffness,
                    self.config.spring_damping,
                    self.config.settle_epsilon,
                );
                self.wheel.rotate(step.delta);
                if step.settled {
                    log::debug!("[snap] settled at rotation {:.4}", self.wheel.rotation());
                    self.state.transition(AnimationMode::Idle);
                    self.finish_alignment();
                } else if let AnimationMode::Snapping(slot) = self.state.mode_mut() {
                    *slot = s;
                }
            }
            AnimationMode::StepRotating(mut s) => {
                let step = s.step_damped(
                    self.config.key_step_rotation_speed,
                    self.config.key_step_damping,
                    self.config.settle_epsilon,
                );
                self.wheel.rotate(step.delta);
                if step.settled {
                    self.state.transition(AnimationMode::Idle);
                    self.snap();
                } else if let AnimationMode::StepRotating(slot) = self.state.mode_mut() {
                    *slot = s;
                }
            }
            AnimationMode::Idle | AnimationMode::Spinning => self.step_spin(),
            AnimationMode::ContextLost => {}
        }
    }

    fn step_spin(&mut self) {
        let held: f32 = self
            .state
            .pressed
            .iter()
            .filter_map(|k| k.spin_direction())
            .sum();
        if held != 0.0 {
            self.state.target_velocity = spin::inject(
                self.state.target_velocity,
                held * self.config.key_spin_speed,
                &self.config,
            );
        }
        let (current, target) = spin::advance(
            self.state.current_velocity,
            self.state.target_velocity,
            &self.config,
        );
        self.state.current_velocity = current;
        self.state.target_velocity = target;
        if current != 0.0 {
            self.wheel.rotate(current);
        }
        let moving = current != 0.0 || target != 0.0;
        match (moving, self.state.mode()) {
            (true, AnimationMode::Idle) => {
                self.state.transition(AnimationMode::Spinning);
            }
            (false, AnimationMode::Spinning) => {
                self.state.transition(AnimationMode::Idle);
            }
            _ => {}
        }
    }

    fn step_hover(&mut self, dt_ms: f64) {
        if self.state.is_converging() {
            return;
        }
        if self.state.current_velocity.abs() > self.config.hover_speed_cutoff {
            self.set_hovered(None);
        } else {
            self.state.hover.since_check_ms += dt_ms;
            if self.state.hover.since_check_ms >= self.config.hover_check_interval_ms {
                self.state.hover.since_check_ms = 0.0;
                self.refresh_hover();
            }
        }
        hover::apply(
            &mut self.wheel,
            &self.camera,
            self.state.hover.hovered,
            self.state.hover.pointer_ndc,
            &self.config,
        );
    }

    fn refresh_hover(&mut self) {
        let hovered = self.state.hover.pointer_ndc.and_then(|ndc| {
            hover::pick(
                &self.wheel,
                &self.camera,
                ndc,
                self.config.hover_distance_cutoff,
            )
        });
        self.set_hovered(hovered);
    }

    fn set_hovered(&mut self, hovered: Option<ItemId>) {
        self.state.hover.hovered = hovered;
        let grabbing = self.state.drag.active && self.state.drag.suppress_click;
        if !grabbing {
            let cursor = if hovered.is_some() {
                Cursor::Pointer
            } else {
                Cursor::Default
            };
            self.set_cursor(cursor);
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        if self.cursor != cursor {
            self.cursor = cursor;
            self.effects.push(Effect::SetCursor(cursor));
        }
    }

    fn update_title(&mut self) {
        let Some(id) = self.aligned_item() else {
            return;
        };
        if self.title_item == Some(id) {
            return;
        }
        if let Some(item) = self.wheel.item(id) {
            self.effects.push(Effect::SetTitle(item.project.title.clone()));
            self.title_item = Some(id);
        }
    }

    fn finish_alignment(&mut self) {
        self.refresh_hover();
        self.update_title();
    }

    // ---------------- Snap / step ----------------

    /// Start a spring snap of the nearest item onto the reference slot.
    /// Already-aligned wheels only refresh hover and title.
    pub fn snap(&mut self) {
        if !self.accepts_input()
            || self.state.is_converging()
            || self.state.drag.active
            || self.state.spin_keys_held()
        {
            return;
        }
        self.state.timers.cancel(TimerKind::Snap);
        self.state.stop_velocity();
        match self.calculate_snap_angle() {
            Some((id, angle)) if angle.abs() >= self.config.snap_min_angle => {
                log::debug!("[snap] aligning {:?} by {:.4} rad", id, angle);
                self.state
                    .transition(AnimationMode::Snapping(SpringState::new(angle)));
            }
            _ => {
                if !matches!(self.state.mode(), AnimationMode::Idle) {
                    self.state.transition(AnimationMode::Idle);
                }
                self.finish_alignment();
            }
        }
    }

    /// Rotate one slot (plus a small overshoot) in `direction` (±1).
    pub fn step_rotate(&mut self, direction: f32) {
        if !self.accepts_input() || self.state.is_converging() || self.state.drag.active {
            return;
        }
        self.state.timers.cancel(TimerKind::Snap);
        let target =
            direction.signum() * (self.config.slot_interval() + self.config.key_step_extra);
        self.state
            .transition(AnimationMode::StepRotating(SpringState::new(target)));
    }

    // ---------------- Converge ----------------

    /// Enter the converge animation on `id` and schedule navigation.
    pub fn begin_converge(&mut self, id: ItemId) -> bool {
        if !self.accepts_input() || self.state.is_converging() {
            return false;
        }
        let Some(converge) = converge::begin(&mut self.wheel, id, &self.config) else {
            return false;
        };
        self.state.stop_velocity();
        self.state.timers.cancel(TimerKind::Snap);
        self.state.pressed.clear();
        self.state.drag = DragState::default();
        self.state.touch.last = None;
        self.state.hover.hovered = None;
        self.set_cursor(Cursor::Default);
        self.state.transition(AnimationMode::Converging(converge));
        let now = self.now();
        self.state
            .timers
            .schedule(TimerKind::Navigate, now, self.config.converge_duration_ms);
        if let Some(item) = self.wheel.item(id) {
            self.effects.push(Effect::SetTitle(item.project.title.clone()));
        }
        self.title_item = None;
        true
    }

    /// Abort a running converge: restore every item, drop cached paths and
    /// the pending navigation. Returns `false` when nothing was running.
    pub fn cancel_converge(&mut self) -> bool {
        if !self.state.is_converging() {
            return false;
        }
        converge::restore(&mut self.wheel);
        self.state.timers.cancel(TimerKind::Navigate);
        self.state.transition(AnimationMode::Idle);
        log::info!("[converge] cancelled");
        self.update_title();
        true
    }

    /// Navigate now instead of waiting for the converge timer.
    pub fn confirm_navigation(&mut self) {
        if !self.state.is_converging() {
            return;
        }
        self.state.timers.cancel(TimerKind::Navigate);
        self.navigate();
    }

    fn navigate(&mut self) {
        let Some(converge) = self.state.converge() else {
            return;
        };
        let Some(path) = self
            .wheel
            .item(converge.clicked)
            .map(|item| item.project.path.clone())
        else {
            return;
        };
        if !self.lifecycle.mark_navigated(&path) {
            return;
        }
        log::info!("[converge] navigating to {}", path);
        self.dispose();
        self.effects.push(Effect::Navigate(path));
    }

    // ---------------- Input ----------------

    pub fn on_wheel(&mut self, delta_y: f32) {
        if !self.accepts_input() {
            return;
        }
        let Some(impulse) = input::scroll_impulse(delta_y, &self.config) else {
            return;
        };
        self.cancel_converge();
        self.state.target_velocity = spin::inject(
            self.state.target_velocity,
            impulse.velocity_change,
            &self.config,
        );
        self.state.transition(AnimationMode::Spinning);
        let now = self.now();
        self.state
            .timers
            .schedule(TimerKind::Snap, now, impulse.snap_delay_ms);
    }

    pub fn on_touch_start(&mut self, point: Vec2) {
        if !self.accepts_input() {
            return;
        }
        self.state.touch.last = Some(point);
    }

    pub fn on_touch_move(&mut self, point: Vec2) {
        if !self.accepts_input() {
            return;
        }
        let Some(previous) = self.state.touch.last.replace(point) else {
            return;
        };
        let Some(speed) = input::swipe_impulse(previous, point, &self.config) else {
            return;
        };
        self.cancel_converge();
        self.state.target_velocity =
            spin::inject(self.state.target_velocity, speed, &self.config);
        self.state.transition(AnimationMode::Spinning);
        let now = self.now();
        self.state
            .timers
            .schedule(TimerKind::Snap, now, self.config.swipe_snap_delay_ms);
    }

    pub fn on_touch_end(&mut self) {
        self.state.touch.last = None;
    }

    pub fn on_pointer_down(&mut self, px: Vec2) {
        if !self.accepts_input() || self.state.is_converging() {
            return;
        }
        self.state.timers.cancel(TimerKind::Snap);
        if !matches!(self.state.mode(), AnimationMode::Idle) {
            self.state.transition(AnimationMode::Idle);
        }
        self.state.stop_velocity();
        self.state.drag = DragState {
            active: true,
            start_px: px,
            last_px: px,
            ..DragState::default()
        };
    }

    /// Pointer moved to `px` (canvas pixels) / `ndc`. Rotates immediately
    /// while a drag is active.
    pub fn on_pointer_move(&mut self, px: Vec2, ndc: Vec2) {
        if self.lifecycle.is_disposed() {
            return;
        }
        self.state.hover.pointer_ndc = Some(ndc);
        if !self.state.drag.active || !self.accepts_input() {
            return;
        }
        let dx = px.x - self.state.drag.last_px.x;
        self.state.drag.last_px = px;
        self.state.drag.moved_px = self
            .state
            .drag
            .moved_px
            .max(px.distance(self.state.drag.start_px));
        if dx != 0.0 {
            let angle = input::drag_angle(dx, &self.config);
            self.wheel.rotate(angle);
            let now = self.now();
            input::push_sample(
                &mut self.state.drag.history,
                VelocitySample {
                    velocity: angle,
                    at_ms: now,
                },
            );
        }
        if self.state.drag.moved_px > self.config.click_move_tolerance_px
            && !self.state.drag.suppress_click
        {
            self.state.drag.suppress_click = true;
            self.set_cursor(Cursor::Grabbing);
        }
    }

    pub fn on_pointer_up(&mut self) {
        if !self.state.drag.active {
            return;
        }
        self.state.drag.active = false;
        if !self.accepts_input() {
            return;
        }
        let now = self.now();
        let momentum = input::release_momentum(&self.state.drag.history, now, &self.config);
        self.state.drag.history.clear();
        if self.state.drag.suppress_click {
            let cursor = if self.state.hover.hovered.is_some() {
                Cursor::Pointer
            } else {
                Cursor::Default
            };
            self.set_cursor(cursor);
        }
        match momentum {
            Some(velocity) => {
                self.state.target_velocity = spin::inject(0.0, velocity, &self.config);
                self.state.transition(AnimationMode::Spinning);
                self.state
                    .timers
                    .schedule(TimerKind::Snap, now, self.config.drag_snap_delay_ms);
            }
            None => self.snap(),
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if self.lifecycle.is_disposed() {
            return;
        }
        self.on_pointer_up();
        self.state.hover.pointer_ndc = None;
        self.set_hovered(None);
    }

    /// Click selects the hovered item, or confirms navigation when a
    /// converge is already running. The click trailing a drag is ignored.
    pub fn on_click(&mut self) {
        if self.lifecycle.is_disposed() {
            return;
        }
        if std::mem::take(&mut self.state.drag.suppress_click) {
            return;
        }
        if self.state.is_converging() {
            self.confirm_navigation();
            return;
        }
        if !self.accepts_input() {
            return;
        }
        if self.state.current_velocity.abs() <= self.config.hover_speed_cutoff {
            self.refresh_hover();
        }
        if let Some(id) = self.state.hover.hovered {
            self.begin_converge(id);
        }
    }

    pub fn on_key_down(&mut self, key: Key) {
        if !self.accepts_input() {
            return;
        }
        match key {
            Key::ArrowUp | Key::ArrowDown => {
                self.cancel_converge();
                self.state.pressed.insert(key);
                self.state.timers.cancel(TimerKind::Snap);
                if matches!(
                    self.state.mode(),
                    AnimationMode::Snapping(_) | AnimationMode::StepRotating(_)
                ) {
                    self.state.transition(AnimationMode::Spinning);
                }
            }
            Key::ArrowLeft | Key::ArrowRight => {
                self.cancel_converge();
                if let Some(direction) = key.step_direction() {
                    self.step_rotate(direction);
                }
            }
            Key::Enter => {
                if self.state.is_converging() {
                    self.confirm_navigation();
                } else if let Some(id) = self.state.hover.hovered.or_else(|| self.aligned_item())
                {
                    self.begin_converge(id);
                }
            }
            Key::Escape => {
                // Nothing else re-arms a snap on this path.
                if self.cancel_converge() {
                    self.snap();
                }
            }
        }
    }

    pub fn on_key_up(&mut self, key: Key) {
        if self.lifecycle.is_disposed() {
            return;
        }
        let was_held = self.state.pressed.remove(&key);
        if was_held && key.spin_direction().is_some() && !self.state.spin_keys_held() {
            let now = self.now();
            self.state.timers.schedule(
                TimerKind::Snap,
                now,
                self.config.key_release_snap_delay_ms,
            );
        }
    }

    // ---------------- Lifecycle ----------------

    pub fn on_visibility_change(&mut self, hidden: bool) {
        if self.lifecycle.is_disposed() {
            return;
        }
        let now = self.now();
        if hidden {
            let cancelled = self.cancel_converge();
            self.state.pressed.clear();
            self.state.drag.active = false;
            if cancelled {
                self.snap();
            }
            self.state.timers.schedule(
                TimerKind::HiddenDispose,
                now,
                self.config.hidden_dispose_delay_ms,
            );
        } else {
            self.state.timers.cancel(TimerKind::HiddenDispose);
        }
    }

    pub fn on_page_hide(&mut self) {
        self.dispose();
    }

    /// Freeze animation until the graphics context comes back. A running
    /// converge is cancelled; deferred timers keep their deadlines.
    pub fn on_context_lost(&mut self) {
        if self.lifecycle.is_disposed() || self.state.is_context_lost() {
            return;
        }
        self.cancel_converge();
        self.state.stop_velocity();
        self.state.drag.active = false;
        self.state.transition(AnimationMode::ContextLost);
        log::warn!("[lifecycle] graphics context lost, animation suspended");
    }

    pub fn on_context_restored(&mut self) {
        if self.lifecycle.is_disposed() || !self.state.is_context_lost() {
            return;
        }
        self.state.transition(AnimationMode::Idle);
        self.state.hover.since_check_ms = 0.0;
        log::info!("[lifecycle] graphics context restored");
        self.snap();
    }

    /// Tear down: clear every timer and input state and ask the host to
    /// release listeners and GPU resources. Only the first call does work.
    pub fn dispose(&mut self) -> bool {
        if !self.lifecycle.mark_disposed() {
            return false;
        }
        self.state.timers.cancel_all();
        self.state.pressed.clear();
        self.state.drag = DragState::default();
        self.state.touch.last = None;
        self.state.hover.hovered = None;
        self.state.stop_velocity();
        self.effects.push(Effect::Dispose);
        log::info!("[lifecycle] gallery disposed");
        true
    }
}
