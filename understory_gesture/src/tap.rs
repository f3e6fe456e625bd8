// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap tracking: count consecutive taps within spatial and temporal tolerance.
//!
//! ## Usage
//!
//! 1) Optionally call [`TapTracker::press`] when the pointer goes down, so the
//!    duration of the following tap can be checked.
//! 2) Call [`TapTracker::tap`] for each completed tap (a click), which returns
//!    the length of the current run of consecutive taps.
//! 3) Call [`TapTracker::reset`] once a multi-tap has been acted on.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::tap::TapTracker;
//!
//! let mut taps = TapTracker::default();
//!
//! assert_eq!(taps.tap(Point::new(10.0, 10.0), 0), 1);
//! assert_eq!(taps.tap(Point::new(12.0, 11.0), 150), 2);
//!
//! // Too late to extend the run: a fresh count starts.
//! assert_eq!(taps.tap(Point::new(12.0, 11.0), 1_000), 1);
//! ```

use kurbo::Point;

/// Tolerances for grouping taps into a multi-tap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TapThresholds {
    /// Maximum distance between a press and its tap, and between consecutive
    /// taps, in pixels.
    pub max_distance: f64,
    /// Maximum time between press and tap for a single tap, in milliseconds.
    pub max_tap_duration_ms: u64,
    /// Maximum time between consecutive taps, in milliseconds.
    pub max_gap_ms: u64,
}

impl Default for TapThresholds {
    fn default() -> Self {
        Self {
            max_distance: 10.0,
            max_tap_duration_ms: 250,
            max_gap_ms: 300,
        }
    }
}

/// Tracks runs of consecutive taps.
#[derive(Clone, Copy, Debug, Default)]
pub struct TapTracker {
    /// Tolerances used to decide whether taps belong together.
    pub thresholds: TapThresholds,
    /// Time of the last accepted tap.
    pub last_time: Option<u64>,
    /// Position of the last accepted tap.
    pub last_position: Option<Point>,
    /// Length of the current run of taps.
    pub count: u32,
    pressed: Option<(Point, u64)>,
}

impl TapTracker {
    /// Creates a tracker with the given tolerances.
    #[must_use]
    pub fn new(thresholds: TapThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// Records a pointer press that may become a tap.
    pub fn press(&mut self, position: Point, time: u64) {
        self.pressed = Some((position, time));
    }

    /// Records a completed tap, returning the length of the current run.
    ///
    /// If a press was recorded and the tap took too long or wandered too far
    /// from it, the tap is rejected: the run is cleared and `0` is returned.
    pub fn tap(&mut self, position: Point, time: u64) -> u32 {
        if let Some((pressed_at, pressed_time)) = self.pressed.take() {
            let held_for = time.saturating_sub(pressed_time);
            if held_for > self.thresholds.max_tap_duration_ms
                || pressed_at.distance(position) > self.thresholds.max_distance
            {
                self.reset();
                return 0;
            }
        }

        let continues_run = match (self.last_time, self.last_position) {
            (Some(last_time), Some(last_position)) => {
                time.saturating_sub(last_time) <= self.thresholds.max_gap_ms
                    && last_position.distance(position) <= self.thresholds.max_distance
            }
            _ => false,
        };

        self.count = if continues_run {
            self.count.saturating_add(1)
        } else {
            1
        };
        self.last_time = Some(time);
        self.last_position = Some(position);
        self.count
    }

    /// Clears the current run and any pending press.
    pub fn reset(&mut self) {
        self.last_time = None;
        self.last_position = None;
        self.count = 0;
        self.pressed = None;
    }
}
