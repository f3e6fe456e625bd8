// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Timing: host-agnostic timer primitives for UI runtimes.
//!
//! UI code frequently needs "do this once things have been quiet for a while"
//! behavior: settle a cheap preview into a full-quality render, re-enable an
//! interaction after a gesture ends, and so on. Hosts provide very different
//! clocks (`setTimeout`, an event loop deadline, a frame callback), so this
//! crate keeps the bookkeeping separate from the clock.
//!
//! A [`TimerSlot`] holds at most one pending deadline. Arming it cancels and
//! replaces whatever was pending, which is exactly the shape of a debounce.
//! Hosts call [`TimerSlot::poll`] with the current time, for example once per
//! frame or from an event loop wakeup scheduled at [`TimerSlot::deadline`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerSlot;
//!
//! let mut settle = TimerSlot::new();
//!
//! // A burst of updates; each one pushes the deadline out.
//! settle.arm(0, 40);
//! settle.arm(10, 40);
//! settle.arm(20, 40);
//!
//! assert!(!settle.poll(50));
//! assert!(settle.poll(60));
//! // Fires once per arming.
//! assert!(!settle.poll(100));
//! ```
//!
//! Times are plain `u64` milliseconds supplied by the caller; the crate never
//! reads a clock itself.
//!
//! This crate is `no_std`.

#![no_std]

/// A single-slot, re-armable deadline.
///
/// At most one deadline is pending at a time; re-arming replaces it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<u64>,
}

impl TimerSlot {
    /// Creates an idle slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the slot to fire `delay` milliseconds after `now`.
    ///
    /// Any pending deadline is cancelled and replaced.
    pub fn arm(&mut self, now: u64, delay: u64) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Cancels the pending deadline, if any.
    ///
    /// Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Fires the slot if its deadline has been reached.
    ///
    /// Returns `true` exactly once per arming: the slot is disarmed when it
    /// fires.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
