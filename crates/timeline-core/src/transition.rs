// File: crates/timeline-core/src/transition.rs
// Summary: Fixed-duration linear tweens keyed by (element, property), driven by an explicit clock.
// Notes:
// - Starting a tween never blocks; it only records start time and endpoints.
// - A new tween on a key replaces the running one, starting from the value sampled at that moment.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::trace;

use crate::geometry::clamp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Tween {
    /// Linear interpolation at time `now_ms`.
    pub fn value_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = clamp((now_ms - self.start_ms) / self.duration_ms, 0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn end_ms(&self) -> f64 { self.start_ms + self.duration_ms }
}

/// Animated property store. `K` identifies one property of one element.
#[derive(Clone, Debug)]
pub struct Transitions<K> {
    now_ms: f64,
    values: HashMap<K, f64>,
    active: HashMap<K, Tween>,
}

impl<K: Eq + Hash + Copy + std::fmt::Debug> Default for Transitions<K> {
    fn default() -> Self { Self::new() }
}

impl<K: Eq + Hash + Copy + std::fmt::Debug> Transitions<K> {
    pub fn new() -> Self {
        Self { now_ms: 0.0, values: HashMap::new(), active: HashMap::new() }
    }

    pub fn now_ms(&self) -> f64 { self.now_ms }

    /// Set a value immediately, cancelling any tween on `key`.
    pub fn set(&mut self, key: K, value: f64) {
        self.active.remove(&key);
        self.values.insert(key, value);
    }

    /// Current (interpolated) value of `key`.
    pub fn value(&self, key: K) -> Option<f64> {
        match self.active.get(&key) {
            Some(tw) => Some(tw.value_at(self.now_ms)),
            None => self.values.get(&key).copied(),
        }
    }

    /// Value `key` will have once every running tween has finished.
    pub fn target(&self, key: K) -> Option<f64> {
        match self.active.get(&key) {
            Some(tw) => Some(tw.to),
            None => self.values.get(&key).copied(),
        }
    }

    /// Start tweening `key` to `to`. An unknown key jumps straight to `to`.
    pub fn start(&mut self, key: K, to: f64, duration: Duration) {
        let from = self.value(key).unwrap_or(to);
        let tween = Tween { from, to, start_ms: self.now_ms, duration_ms: duration.as_secs_f64() * 1000.0 };
        trace!(?key, from, to, duration_ms = tween.duration_ms, "tween started");
        if self.active.insert(key, tween).is_some() {
            trace!(?key, "interrupted running tween");
        }
    }

    /// Advance the clock by `dt`, retiring tweens that have finished.
    pub fn tick(&mut self, dt: Duration) {
        self.now_ms += dt.as_secs_f64() * 1000.0;
        let now = self.now_ms;
        let done: Vec<K> = self.active.iter().filter(|(_, tw)| tw.end_ms() <= now).map(|(k, _)| *k).collect();
        for k in done {
            if let Some(tw) = self.active.remove(&k) {
                self.values.insert(k, tw.to);
            }
        }
    }

    /// Advance the clock until every running tween has finished.
    pub fn settle(&mut self) {
        self.now_ms = self.active.values().map(Tween::end_ms).fold(self.now_ms, f64::max);
        for (k, tw) in self.active.drain() {
            self.values.insert(k, tw.to);
        }
    }

    pub fn is_idle(&self) -> bool { self.active.is_empty() }
    pub fn running(&self) -> usize { self.active.len() }
}
