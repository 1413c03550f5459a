//! Single- vs. double-click disambiguation.
//!
//! Each key (an element id, or `()` for the lone branding block) runs its own
//! small state machine:
//!
//! ```text
//! Idle ──press──▶ Awaiting { deadline, offset } ──press before deadline──▶ Idle  (double click)
//!                          │
//!                          └──deadline reached (expire)──▶ Idle  (single click: start drag)
//! ```
//!
//! Time never comes from a clock here. Presses carry their event timestamp
//! and the owner calls [`ClickDisambiguator::expire`] with the current time,
//! which makes every transition deterministic and testable.

use crate::drag::DragOffset;
use std::collections::HashMap;
use std::hash::Hash;

/// What a mouse-down did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Preconditions failed; the event was left untouched.
    Ignored,
    /// First click of a possible pair; a single-click timer is armed.
    Pending,
    /// Second click inside the window; the pending timer was cancelled.
    DoubleClick,
}

/// Per-key state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickState {
    Idle,
    AwaitingSecondClick { deadline_ms: f64, offset: DragOffset },
}

/// A single click whose window elapsed without a second press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpiredClick<K> {
    pub key: K,
    pub offset: DragOffset,
    pub deadline_ms: f64,
}

#[derive(Debug, Clone)]
pub struct ClickDisambiguator<K> {
    window_ms: f64,
    pending: HashMap<K, (f64, DragOffset)>,
}

impl<K: Copy + Eq + Hash> ClickDisambiguator<K> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            pending: HashMap::new(),
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    pub fn set_window_ms(&mut self, window_ms: f64) {
        self.window_ms = window_ms;
    }

    pub fn state(&self, key: K) -> ClickState {
        match self.pending.get(&key) {
            Some(&(deadline_ms, offset)) => ClickState::AwaitingSecondClick { deadline_ms, offset },
            None => ClickState::Idle,
        }
    }

    /// Clicks counted so far in the current sequence for `key` (0 or 1).
    pub fn click_count(&self, key: K) -> u8 {
        u8::from(self.pending.contains_key(&key))
    }

    /// Register a press at `now_ms`.
    ///
    /// A press strictly before the pending deadline completes a double click.
    /// Anything else starts a new sequence, replacing a stale timer, so
    /// callers should [`expire`](Self::expire) first to let a stale single
    /// click fire.
    pub fn press(&mut self, key: K, now_ms: f64, offset: DragOffset) -> ClickOutcome {
        match self.pending.get(&key) {
            Some(&(deadline_ms, _)) if now_ms < deadline_ms => {
                self.pending.remove(&key);
                ClickOutcome::DoubleClick
            }
            _ => {
                self.pending.insert(key, (now_ms + self.window_ms, offset));
                ClickOutcome::Pending
            }
        }
    }

    /// Fire every timer whose deadline is at or before `now_ms`, earliest
    /// first.
    pub fn expire(&mut self, now_ms: f64) -> Vec<ExpiredClick<K>> {
        let mut fired: Vec<ExpiredClick<K>> = self
            .pending
            .iter()
            .filter(|(_, (deadline_ms, _))| *deadline_ms <= now_ms)
            .map(|(&key, &(deadline_ms, offset))| ExpiredClick {
                key,
                offset,
                deadline_ms,
            })
            .collect();
        fired.sort_by(|a, b| a.deadline_ms.total_cmp(&b.deadline_ms));
        for click in &fired {
            self.pending.remove(&click.key);
        }
        fired
    }

    /// Drop the pending timer for `key`. Returns whether one existed.
    pub fn cancel(&mut self, key: K) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Earliest pending deadline, for scheduling the next [`expire`](Self::expire).
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending
            .values()
            .map(|(deadline_ms, _)| *deadline_ms)
            .min_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OFFSET: DragOffset = DragOffset::new(5.0, 7.0);

    #[test]
    fn first_press_arms_timer() {
        let mut clicks = ClickDisambiguator::new(250.0);
        assert_eq!(clicks.press("a", 1000.0, OFFSET), ClickOutcome::Pending);
        assert_eq!(
            clicks.state("a"),
            ClickState::AwaitingSecondClick {
                deadline_ms: 1250.0,
                offset: OFFSET,
            }
        );
        assert_eq!(clicks.click_count("a"), 1);
        assert_eq!(clicks.next_deadline(), Some(1250.0));
    }

    #[test]
    fn second_press_in_window_is_double_click() {
        let mut clicks = ClickDisambiguator::new(250.0);
        clicks.press("a", 1000.0, OFFSET);
        assert_eq!(clicks.press("a", 1100.0, OFFSET), ClickOutcome::DoubleClick);
        assert_eq!(clicks.state("a"), ClickState::Idle);
        assert!(clicks.expire(5000.0).is_empty());
    }

    #[test]
    fn press_at_deadline_starts_new_sequence() {
        let mut clicks = ClickDisambiguator::new(250.0);
        clicks.press("a", 1000.0, OFFSET);
        assert_eq!(clicks.press("a", 1250.0, DragOffset::ZERO), ClickOutcome::Pending);
        assert_eq!(clicks.next_deadline(), Some(1500.0));
    }

    #[test]
    fn expire_fires_once_in_deadline_order() {
        let mut clicks = ClickDisambiguator::new(250.0);
        clicks.press("b", 1100.0, DragOffset::ZERO);
        clicks.press("a", 1000.0, OFFSET);

        assert!(clicks.expire(1249.0).is_empty());
        let fired = clicks.expire(1400.0);
        assert_eq!(fired.iter().map(|c| c.key).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(fired[0].offset, OFFSET);
        assert!(clicks.expire(1400.0).is_empty());
        assert!(!clicks.has_pending());
    }

    #[test]
    fn keys_are_independent() {
        let mut clicks = ClickDisambiguator::new(250.0);
        clicks.press("a", 1000.0, OFFSET);
        assert_eq!(clicks.press("b", 1010.0, OFFSET), ClickOutcome::Pending);
        assert_eq!(clicks.click_count("a"), 1);
        assert_eq!(clicks.click_count("b"), 1);
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut clicks = ClickDisambiguator::new(250.0);
        clicks.press("a", 1000.0, OFFSET);
        clicks.press("b", 1000.0, OFFSET);
        assert!(clicks.cancel("a"));
        assert!(!clicks.cancel("a"));
        clicks.cancel_all();
        assert!(clicks.expire(9999.0).is_empty());
        assert_eq!(clicks.next_deadline(), None);
    }
}
