//! Widget-owned timers.
//!
//! A `TimerSet` is the only way a widget schedules work. Timers are plain
//! entries keyed by a widget-defined enum; they fire when the host ticks
//! past their deadline and are dropped deterministically on cancel, on
//! terminal outcome and on unmount. Nothing fires after `clear`.

use serde::{Deserialize, Serialize};

use crate::core::Millis;

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Clone, Debug)]
struct Entry<K> {
    id: TimerId,
    deadline: Millis,
    key: K,
}

/// Cancelable scheduled callbacks owned by one widget instance.
///
/// ## Example
///
/// ```
/// use consent_gate::core::Millis;
/// use consent_gate::widgets::TimerSet;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Timer { Countdown, Frame }
///
/// let mut timers = TimerSet::new();
/// timers.schedule(Millis::new(100), Timer::Frame);
/// let countdown = timers.schedule(Millis::new(50), Timer::Countdown);
/// timers.cancel(countdown);
///
/// assert_eq!(timers.pop_due(Millis::new(200)), Some((Millis::new(100), Timer::Frame)));
/// assert!(timers.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct TimerSet<K> {
    entries: Vec<Entry<K>>,
    next_id: u64,
}

impl<K> Default for TimerSet<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K> TimerSet<K> {
    /// Create an empty timer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: Millis, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, deadline, key });
        id
    }

    /// Schedule `key` to fire `delay_ms` after `now`.
    pub fn schedule_after(&mut self, now: Millis, delay_ms: u64, key: K) -> TimerId {
        self.schedule(now + delay_ms, key)
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every pending timer. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// Ties fire in scheduling order. Returns the timer's own deadline so
    /// that periodic timers can reschedule without drift.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, K)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.id.0))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(index);
        Some((entry.deadline, entry.key))
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq> TimerSet<K> {
    /// Cancel every timer with the given key.
    pub fn cancel_key(&mut self, key: &K) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| &e.key != key);
        before - self.entries.len()
    }

    /// True if a timer with the given key is pending.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.iter().any(|e| &e.key == key)
    }
}
