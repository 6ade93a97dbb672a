//! Fire-once, cancelable deferred callbacks keyed by kind.
//!
//! Scheduling a kind that is already pending replaces the old deadline, so
//! there is never more than one pending timer per kind.

use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Snap,
    Navigate,
    HiddenDispose,
}

#[derive(Debug, Default)]
pub struct Timers {
    deadlines: FnvHashMap<TimerKind, f64>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: TimerKind, now_ms: f64, delay_ms: f64) {
        let replaced = self.deadlines.insert(kind, now_ms + delay_ms.max(0.0));
        if replaced.is_some() {
            log::debug!("[timers] {:?} rescheduled", kind);
        }
    }

    /// Returns whether a pending timer was actually removed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines.remove(&kind).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<f64> {
        self.deadlines.get(&kind).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.deadlines.len()
    }

    /// Remove and return every timer due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: f64) -> SmallVec<[TimerKind; 3]> {
        let mut due: SmallVec<[(TimerKind, f64); 3]> = self
            .deadlines
            .iter()
            .filter(|(_, &at)| at <= now_ms)
            .map(|(&k, &at)| (k, at))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        for (kind, _) in &due {
            self.deadlines.remove(kind);
        }
        due.into_iter().map(|(k, _)| k).collect()
    }
}
