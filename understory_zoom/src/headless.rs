// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory host for tests, benchmarks, and headless tooling.
//!
//! [`HeadlessPage`] behaves like a browser scroll box closely enough to drive
//! the engine end to end: offsets are integers clamped to the scroll range,
//! the scroll range can follow the applied scale, and offset changes queue a
//! scroll notification that the caller drains and forwards.

use kurbo::{Size, Vec2};

use crate::render::{InteractionState, RenderState, RenderSurface};
use crate::scroll::{Axis, PerAxis, ScrollAdapter};

/// Where a [`HeadlessPage`] gets its scroll range from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageRange {
    /// A fixed maximum offset per axis, regardless of scale.
    Fixed(PerAxis<i64>),
    /// Content laid out at `content` size, scaled by the applied transform
    /// and viewed through `viewport`.
    Content {
        /// Visible area.
        viewport: Size,
        /// Untransformed content size.
        content: Size,
    },
}

/// In-memory scroll box and render target.
#[derive(Clone, Debug)]
pub struct HeadlessPage {
    range: PageRange,
    offset: PerAxis<i64>,
    applied_scale: f64,
    last_render: Option<RenderState>,
    render_count: usize,
    interaction: InteractionState,
    scrollbar_thickness: Vec2,
    scroll_pending: bool,
}

impl HeadlessPage {
    /// Creates a page with the given scroll range.
    #[must_use]
    pub fn new(range: PageRange) -> Self {
        Self {
            range,
            offset: PerAxis::default(),
            applied_scale: 1.0,
            last_render: None,
            render_count: 0,
            interaction: InteractionState::Enabled,
            scrollbar_thickness: Vec2::ZERO,
            scroll_pending: false,
        }
    }

    /// Creates a page with a fixed scroll range.
    #[must_use]
    pub fn with_max_offset(x: i64, y: i64) -> Self {
        Self::new(PageRange::Fixed(PerAxis::new(x, y)))
    }

    /// Creates a page whose scroll range follows the applied scale.
    #[must_use]
    pub fn with_content(viewport: Size, content: Size) -> Self {
        Self::new(PageRange::Content { viewport, content })
    }

    /// Sets the reported scrollbar thickness.
    pub fn set_scrollbar_thickness(&mut self, thickness: Vec2) {
        self.scrollbar_thickness = thickness;
    }

    /// Scrolls as the user would, queueing a notification on change.
    pub fn scroll_to(&mut self, axis: Axis, offset: i64) {
        self.write_offset(axis, offset);
    }

    /// Returns and clears the pending scroll notification.
    pub fn take_scroll_notification(&mut self) -> bool {
        core::mem::take(&mut self.scroll_pending)
    }

    /// Scale of the most recently applied transform.
    #[must_use]
    pub fn applied_scale(&self) -> f64 {
        self.applied_scale
    }

    /// The most recent paint.
    #[must_use]
    pub fn last_render(&self) -> Option<&RenderState> {
        self.last_render.as_ref()
    }

    /// Number of paints applied.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Current interaction state.
    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    fn write_offset(&mut self, axis: Axis, offset: i64) {
        let clamped = offset.clamp(0, self.max_offset(axis));
        if self.offset[axis] != clamped {
            self.offset[axis] = clamped;
            self.scroll_pending = true;
        }
    }
}

impl ScrollAdapter for HeadlessPage {
    fn offset(&self, axis: Axis) -> i64 {
        self.offset[axis]
    }

    fn set_offset(&mut self, axis: Axis, offset: i64) {
        self.write_offset(axis, offset);
    }

    fn max_offset(&self, axis: Axis) -> i64 {
        match self.range {
            PageRange::Fixed(max) => max[axis].max(0),
            PageRange::Content { viewport, content } => {
                let (view, extent) = match axis {
                    Axis::X => (viewport.width, content.width),
                    Axis::Y => (viewport.height, content.height),
                };
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "scroll ranges are integral; hosts floor them"
                )]
                let max = (extent * self.applied_scale - view).max(0.0) as i64;
                max
            }
        }
    }
}

impl RenderSurface for HeadlessPage {
    fn apply_render(&mut self, state: &RenderState) {
        self.applied_scale = state.transform.effective_scale();
        self.last_render = Some(*state);
        self.render_count += 1;
        // A shrinking scroll range drags the offset with it.
        for axis in Axis::BOTH {
            let offset = self.offset[axis];
            self.write_offset(axis, offset);
        }
    }

    fn set_interaction(&mut self, state: InteractionState) {
        self.interaction = state;
    }

    fn scrollbar_thickness(&self) -> Vec2 {
        self.scrollbar_thickness
    }
}
