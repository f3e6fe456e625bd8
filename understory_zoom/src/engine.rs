// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use tracing::{debug, trace};

use crate::config::ZoomConfig;
use crate::error::ZoomError;
use crate::reconcile::TranslationReconciler;
use crate::render::{Fidelity, RenderSurface, TimerFirings, TransformRenderer};
use crate::scroll::{Axis, PerAxis, ScrollAdapter};

/// A host that can both scroll and paint.
pub trait ZoomHost: ScrollAdapter + RenderSurface {}

impl<T: ScrollAdapter + RenderSurface + ?Sized> ZoomHost for T {}

/// Scale and translation of the content relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomState {
    scale: f64,
    translation: Vec2,
    overflow: Vec2,
}

impl ZoomState {
    /// Unscaled, untranslated state.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Vec2::ZERO,
        overflow: Vec2::ZERO,
    };

    #[cfg(test)]
    pub(crate) fn new(scale: f64, translation: Vec2, overflow: Vec2) -> Self {
        Self {
            scale,
            translation,
            overflow,
        }
    }

    /// Current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Offset of the content origin, expressible by scrolling; `<= 0` per axis.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Part of the requested translation beyond the scroll range; `>= 0` per
    /// axis.
    #[must_use]
    pub fn overflow_translation(&self) -> Vec2 {
        self.overflow
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Outcome of [`ZoomTransformEngine::apply_scale`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleChange {
    /// Scale was already at the limit in the requested direction; nothing ran.
    Unchanged,
    /// Scale changed.
    Scaled {
        /// New scale.
        scale: f64,
        /// Ratio of the new scale to the old one after clamping.
        effective_scale: f64,
    },
}

/// Zoom-and-pan state machine for one viewport.
///
/// The engine owns the [`ZoomState`], the [`TranslationReconciler`], and the
/// [`TransformRenderer`]. Hosts are borrowed per call, so several viewports
/// are simply several engines.
#[derive(Clone, Debug)]
pub struct ZoomTransformEngine {
    min_scale: f64,
    max_scale: f64,
    state: ZoomState,
    reconciler: TranslationReconciler,
    renderer: TransformRenderer,
}

impl ZoomTransformEngine {
    /// Creates an engine at scale `1.0` with no translation.
    #[must_use]
    pub fn new(config: &ZoomConfig) -> Self {
        let (min_scale, max_scale) = config.scale_limits();
        Self {
            min_scale,
            max_scale,
            state: ZoomState::IDENTITY,
            reconciler: TranslationReconciler::new(),
            renderer: TransformRenderer::new(config.render, min_scale < 1.0),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    /// Current translation.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.state.translation
    }

    /// Current overflow translation.
    #[must_use]
    pub fn overflow_translation(&self) -> Vec2 {
        self.state.overflow
    }

    /// Scale limits as `(min, max)`.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// The renderer, for inspecting paints and deadlines.
    #[must_use]
    pub fn renderer(&self) -> &TransformRenderer {
        &self.renderer
    }

    /// Scales by `scale_factor` about `focal`, given in viewport coordinates.
    ///
    /// The content point under `focal` stays under `focal` as far as the
    /// scroll range allows. The resulting scale is clamped to the configured
    /// limits; if clamping leaves the scale unchanged nothing is recomputed,
    /// reconciled, or painted.
    ///
    /// # Errors
    ///
    /// Returns [`ZoomError`] without touching any state if `scale_factor` is
    /// not finite and positive, or `focal` is not finite.
    pub fn apply_scale<H: ZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        scale_factor: f64,
        focal: Point,
        now: u64,
    ) -> Result<ScaleChange, ZoomError> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(ZoomError::InvalidScaleFactor(scale_factor));
        }
        if !focal.is_finite() {
            return Err(ZoomError::InvalidFocalPoint(focal));
        }

        let before = self.state.scale;
        let scale = (before * scale_factor).clamp(self.min_scale, self.max_scale);
        let effective_scale = scale / before;
        if effective_scale == 1.0 {
            return Ok(ScaleChange::Unchanged);
        }

        trace!(before, scale, effective_scale, "applying scale");
        self.state.scale = scale;
        let fidelity = self.renderer.options().gesture_fidelity;
        // Paint first: the scroll range depends on the new scale.
        self.renderer.paint(&mut *host, &self.state, fidelity, true, now);

        let focal = focal.to_vec2();
        for axis in Axis::BOTH {
            let f = axis.of(focal);
            let desired = (axis.of(self.state.translation) - f) * effective_scale + f;
            let reconciled = self.reconciler.set_translation(&mut *host, axis, desired);
            axis.set(&mut self.state.translation, reconciled.translation);
            axis.set(&mut self.state.overflow, reconciled.overflow);
        }

        self.renderer.paint(&mut *host, &self.state, fidelity, true, now);
        Ok(ScaleChange::Scaled {
            scale,
            effective_scale,
        })
    }

    /// Returns to scale `1.0`, keeping the relative scroll position.
    ///
    /// Pending timers are cancelled and interaction is restored; the reset
    /// paint itself never suspends interaction.
    pub fn reset<H: ZoomHost + ?Sized>(&mut self, host: &mut H, now: u64) {
        self.renderer.cancel_timers();
        self.state = ZoomState::IDENTITY;
        self.reconciler.clear();

        let before = host.snapshot();
        self.renderer.paint(&mut *host, &self.state, Fidelity::High, false, now);

        for axis in Axis::BOTH {
            let old_max = before.max_offset[axis];
            if old_max <= 0 {
                continue;
            }
            let new_max = host.max_offset(axis);
            host.set_offset(axis, rescale_offset(before.offset[axis], old_max, new_max));
        }

        self.on_external_scroll_change(&*host);
        self.renderer.restore_interaction(&mut *host);
        debug!(
            translation_x = self.state.translation.x,
            translation_y = self.state.translation.y,
            "zoom reset"
        );
    }

    /// Handles a host notification that the scroll offset changed.
    ///
    /// Offsets this engine wrote itself are ignored; anything else is
    /// adopted as the new translation.
    pub fn on_external_scroll_change<S: ScrollAdapter + ?Sized>(&mut self, scroll: &S) {
        for axis in Axis::BOTH {
            if let Some(translation) = self.reconciler.on_external_scroll_change(scroll, axis) {
                axis.set(&mut self.state.translation, translation);
            }
        }
    }

    /// Eagerly restores native interaction, e.g. on pointer activity.
    pub fn restore_interaction<R: RenderSurface + ?Sized>(&mut self, surface: &mut R) -> bool {
        self.renderer.restore_interaction(surface)
    }

    /// Runs deferred settle and restore actions that are due at `now`.
    pub fn poll<R: RenderSurface + ?Sized>(&mut self, surface: &mut R, now: u64) -> TimerFirings {
        self.renderer.poll(surface, &self.state, now)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.renderer.next_deadline()
    }

    /// Cancels deferred work and restores interaction before the engine is
    /// dropped.
    pub fn shutdown<R: RenderSurface + ?Sized>(&mut self, surface: &mut R) {
        self.renderer.cancel_timers();
        self.renderer.restore_interaction(surface);
    }

    /// Snapshot of the engine for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomDebugInfo {
        ZoomDebugInfo {
            scale: self.state.scale,
            translation: self.state.translation,
            overflow_translation: self.state.overflow,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            ignored_offsets: PerAxis::from_fn(|axis| self.reconciler.ignored(axis)),
            settle_deadline: self.renderer.settle_deadline(),
            restore_deadline: self.renderer.restore_deadline(),
            interaction_disabled: self.renderer.is_interaction_disabled(),
        }
    }
}

/// `offset / old_max * new_max`, in integers so an unchanged range is exact.
fn rescale_offset(offset: i64, old_max: i64, new_max: i64) -> i64 {
    let scaled = i128::from(offset) * i128::from(new_max) / i128::from(old_max);
    i64::try_from(scaled).unwrap_or(new_max)
}

/// Debug snapshot of a [`ZoomTransformEngine`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomDebugInfo {
    /// Current scale.
    pub scale: f64,
    /// Current translation.
    pub translation: Vec2,
    /// Current overflow translation.
    pub overflow_translation: Vec2,
    /// Minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
    /// Scroll offsets the reconciler will treat as self-caused.
    pub ignored_offsets: PerAxis<Option<i64>>,
    /// Pending high-fidelity settle deadline.
    pub settle_deadline: Option<u64>,
    /// Pending interaction-restore deadline.
    pub restore_deadline: Option<u64>,
    /// Whether native interaction is suspended.
    pub interaction_disabled: bool,
}
