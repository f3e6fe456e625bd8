// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping fractional translation in step with an integer scroll offset.
//!
//! The host scroll offset only holds integers, so reading it back right after
//! writing `-4.5` yields `4` and the engine would drift a little on every
//! gesture step. Instead the reconciler remembers the offset it wrote as an
//! "ignored" value and only trusts the host again once the offset changes to
//! something else, which can only mean somebody else scrolled.
//!
//! If a host coalesces several writes before notifying, a user scroll that
//! lands exactly on the ignored value is masked. That case is not handled.

use crate::scroll::{Axis, PerAxis, ScrollAdapter};

/// Result of reconciling one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTranslation {
    /// Translation representable by scrolling, in `[-max_offset, 0]`.
    pub translation: f64,
    /// Part of the requested translation beyond the scroll range, `>= 0`.
    pub overflow: f64,
}

/// Synchronizes engine translation with a [`ScrollAdapter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TranslationReconciler {
    ignored: PerAxis<Option<i64>>,
}

impl TranslationReconciler {
    /// Creates a reconciler with no ignored offsets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a desired translation along `axis`.
    ///
    /// The stored translation is clamped to what scrolling can express; the
    /// remainder past the end of the scroll range is returned as overflow.
    pub fn set_translation<S: ScrollAdapter + ?Sized>(
        &mut self,
        scroll: &mut S,
        axis: Axis,
        desired: f64,
    ) -> AxisTranslation {
        let max = scroll.max_offset(axis).max(0) as f64;
        let translation = desired.min(0.0).max(-max);

        scroll.set_offset(axis, offset_for(translation));
        self.ignored[axis] = Some(scroll.offset(axis));

        let overflow = if desired < 0.0 {
            (-desired - max).max(0.0)
        } else {
            0.0
        };
        AxisTranslation {
            translation,
            overflow,
        }
    }

    /// Handles a host scroll notification for `axis`.
    ///
    /// Returns the translation to adopt, or `None` if the current offset is
    /// the one this reconciler wrote.
    pub fn on_external_scroll_change<S: ScrollAdapter + ?Sized>(
        &mut self,
        scroll: &S,
        axis: Axis,
    ) -> Option<f64> {
        let offset = scroll.offset(axis);
        if self.ignored[axis] == Some(offset) {
            return None;
        }
        self.ignored[axis] = None;
        // Keeps an unscrolled axis at +0.0.
        Some(0.0 - offset as f64)
    }

    /// Returns the ignored offset recorded for `axis`, if any.
    #[must_use]
    pub fn ignored(&self, axis: Axis) -> Option<i64> {
        self.ignored[axis]
    }

    /// Forgets all ignored offsets.
    pub fn clear(&mut self) {
        self.ignored = PerAxis::default();
    }
}

/// Scroll offset that expresses `translation`, truncated like the host does.
fn offset_for(translation: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scroll offsets are integral; truncation matches the host"
    )]
    let offset = (-translation).max(0.0) as i64;
    offset
}
