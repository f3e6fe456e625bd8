// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning zoom state into a concrete visual transform.
//!
//! Two fidelity modes are supported. [`Fidelity::High`] applies an exact 2D
//! scale. [`Fidelity::Low`] fakes the scale with a perspective projection,
//! which many compositors handle more cheaply at the cost of slight
//! distortion. Low fidelity is used while a gesture is in flight; each low
//! paint re-arms a short settle timer that repaints in high fidelity once the
//! updates stop.
//!
//! Painting can also suspend the host's native scroll interaction so it does
//! not fight the programmatic transform. That lock is lifted by a longer
//! timer, or eagerly via [`TransformRenderer::restore_interaction`].

use core::fmt;

use kurbo::{Affine, Point, Vec2};
use tracing::debug;
use understory_timing::TimerSlot;

use crate::engine::ZoomState;

/// Rendering strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fidelity {
    /// Exact scale; correct at every scale.
    #[default]
    High,
    /// Perspective approximation; cheaper while gesturing.
    Low,
}

/// The transform function applied to the content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformFunction {
    /// Uniform scale.
    Scale(f64),
    /// Perspective projection of a plane pushed `depth` towards the viewer.
    ///
    /// With viewer distance `perspective`, the plane appears scaled by
    /// `perspective / (perspective - depth)`.
    Perspective {
        /// Viewer distance, in pixels.
        perspective: f64,
        /// Z translation of the content plane, in pixels.
        depth: f64,
    },
}

impl TransformFunction {
    /// Exact scale transform.
    #[must_use]
    pub fn scale(scale: f64) -> Self {
        Self::Scale(scale)
    }

    /// Perspective transform that appears as `scale` when viewed from
    /// `perspective` pixels away.
    #[must_use]
    pub fn perspective(scale: f64, perspective: f64) -> Self {
        Self::Perspective {
            perspective,
            depth: perspective - perspective / scale,
        }
    }

    /// Apparent uniform scale of the content plane.
    #[must_use]
    pub fn effective_scale(&self) -> f64 {
        match *self {
            Self::Scale(s) => s,
            Self::Perspective { perspective, depth } => perspective / (perspective - depth),
        }
    }

    /// 2D affine equivalent about the content origin.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::scale(self.effective_scale())
    }
}

impl fmt::Display for TransformFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale(s) => write!(f, "scaleX({s}) scaleY({s})"),
            Self::Perspective { perspective, depth } => {
                write!(f, "perspective({perspective}px) translateZ({depth}px)")
            }
        }
    }
}

/// Everything a host needs to style the content for one paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    /// Mode this state was produced with.
    pub fidelity: Fidelity,
    /// Transform function to apply.
    pub transform: TransformFunction,
    /// Transform origin; always the content origin.
    pub origin: Point,
    /// Explicit content offset, when scrolling alone cannot express the
    /// translation. `None` means leave positioning to the scroll offset.
    pub position: Option<Vec2>,
    /// Hosts that take transformed content out of normal flow sizing should
    /// restore it (relative positioning, full height) when this is set.
    pub layout_recovery: bool,
}

/// Whether the host's native scroll/pan interaction is available.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    /// Native interaction works normally.
    #[default]
    Enabled,
    /// Native interaction is suspended.
    Disabled {
        /// Scrollbars should be hidden.
        hide_scrollbars: bool,
        /// Margin to add so hiding the scrollbars does not shift content.
        margin: Vec2,
    },
}

/// Output side of the host.
pub trait RenderSurface {
    /// Applies a paint.
    fn apply_render(&mut self, state: &RenderState);

    /// Suspends or restores native interaction.
    fn set_interaction(&mut self, state: InteractionState);

    /// Thickness of the vertical (`x`) and horizontal (`y`) scrollbars.
    fn scrollbar_thickness(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// Renderer tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Fidelity used for paints made while a gesture is active.
    pub gesture_fidelity: Fidelity,
    /// Quiet period before a low-fidelity paint is upgraded, in milliseconds.
    pub settle_delay_ms: u64,
    /// Quiet period before suspended interaction is restored, in milliseconds.
    pub interaction_restore_ms: u64,
    /// Hide scrollbars while interaction is suspended.
    pub hide_scrollbars: bool,
    /// Viewer distance for the low-fidelity projection, in pixels.
    pub perspective: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gesture_fidelity: Fidelity::Low,
            settle_delay_ms: 40,
            interaction_restore_ms: 400,
            hide_scrollbars: true,
            perspective: 1.0,
        }
    }
}

/// Which deferred actions ran during [`TransformRenderer::poll`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerFirings {
    /// The high-fidelity settle ran.
    pub settled: bool,
    /// Interaction was restored.
    pub interaction_restored: bool,
}

/// Paints [`ZoomState`] onto a [`RenderSurface`] and owns the deferred
/// settle and interaction-restore timers.
#[derive(Clone, Debug)]
pub struct TransformRenderer {
    options: RenderOptions,
    position_content: bool,
    settle: TimerSlot,
    restore: TimerSlot,
    interaction_disabled: bool,
    last: Option<RenderState>,
}

impl TransformRenderer {
    /// Creates a renderer.
    ///
    /// `position_content` enables explicit content positioning, which is only
    /// needed when the content may shrink below its untransformed size.
    #[must_use]
    pub fn new(options: RenderOptions, position_content: bool) -> Self {
        Self {
            options,
            position_content,
            settle: TimerSlot::new(),
            restore: TimerSlot::new(),
            interaction_disabled: false,
            last: None,
        }
    }

    /// Returns the renderer tunables.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Returns the most recent paint.
    #[must_use]
    pub fn last_render(&self) -> Option<&RenderState> {
        self.last.as_ref()
    }

    /// Returns `true` while native interaction is suspended.
    #[must_use]
    pub fn is_interaction_disabled(&self) -> bool {
        self.interaction_disabled
    }

    /// Pending settle deadline, if any.
    #[must_use]
    pub fn settle_deadline(&self) -> Option<u64> {
        self.settle.deadline()
    }

    /// Pending interaction-restore deadline, if any.
    #[must_use]
    pub fn restore_deadline(&self) -> Option<u64> {
        self.restore.deadline()
    }

    /// Earliest pending deadline; hosts should call [`Self::poll`] then.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.settle.deadline(), self.restore.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Builds the render state for `state` without painting it.
    #[must_use]
    pub fn render_state(&self, state: &ZoomState, fidelity: Fidelity) -> RenderState {
        let transform = match fidelity {
            Fidelity::High => TransformFunction::scale(state.scale()),
            Fidelity::Low => TransformFunction::perspective(state.scale(), self.options.perspective),
        };
        let position = self.position_content.then(|| {
            let t = state.translation();
            let o = state.overflow_translation();
            Vec2::new(t.x.max(0.0) - o.x, t.y.max(0.0) - o.y)
        });
        RenderState {
            fidelity,
            transform,
            origin: Point::ZERO,
            position,
            layout_recovery: true,
        }
    }

    /// Paints `state` in the requested mode.
    ///
    /// A low-fidelity paint (re)arms the settle timer. When
    /// `disable_interaction` is set, native interaction is suspended and the
    /// restore timer is (re)armed.
    pub fn paint<R: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut R,
        state: &ZoomState,
        fidelity: Fidelity,
        disable_interaction: bool,
        now: u64,
    ) -> RenderState {
        let render = self.render_state(state, fidelity);
        surface.apply_render(&render);
        self.last = Some(render);

        match fidelity {
            Fidelity::Low => {
                self.settle.arm(now, self.options.settle_delay_ms);
            }
            Fidelity::High => {
                self.settle.cancel();
            }
        }

        if disable_interaction {
            self.disable_interaction(surface);
            self.restore.arm(now, self.options.interaction_restore_ms);
        }
        render
    }

    /// Restores native interaction if it is suspended.
    ///
    /// Returns `true` if anything changed.
    pub fn restore_interaction<R: RenderSurface + ?Sized>(&mut self, surface: &mut R) -> bool {
        self.restore.cancel();
        if !self.interaction_disabled {
            return false;
        }
        surface.set_interaction(InteractionState::Enabled);
        self.interaction_disabled = false;
        true
    }

    /// Runs deferred actions whose deadline has passed.
    ///
    /// Both actions read `state` as it is now, not as it was when they were
    /// scheduled.
    pub fn poll<R: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut R,
        state: &ZoomState,
        now: u64,
    ) -> TimerFirings {
        let mut fired = TimerFirings::default();
        if self.settle.poll(now) {
            debug!(scale = state.scale(), "settling to high fidelity");
            let render = self.render_state(state, Fidelity::High);
            surface.apply_render(&render);
            self.last = Some(render);
            fired.settled = true;
        }
        if self.restore.poll(now) && self.interaction_disabled {
            debug!("restoring interaction after quiet period");
            surface.set_interaction(InteractionState::Enabled);
            self.interaction_disabled = false;
            fired.interaction_restored = true;
        }
        fired
    }

    /// Cancels both deferred actions.
    pub fn cancel_timers(&mut self) {
        self.settle.cancel();
        self.restore.cancel();
    }

    fn disable_interaction<R: RenderSurface + ?Sized>(&mut self, surface: &mut R) {
        if self.interaction_disabled {
            return;
        }
        let hide_scrollbars = self.options.hide_scrollbars;
        let margin = if hide_scrollbars {
            surface.scrollbar_thickness()
        } else {
            Vec2::ZERO
        };
        surface.set_interaction(InteractionState::Disabled {
            hide_scrollbars,
            margin,
        });
        self.interaction_disabled = true;
    }
}
