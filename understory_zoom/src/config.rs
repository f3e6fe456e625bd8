// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration and persisted user settings.

use understory_gesture::ClassifierConfig;

use crate::render::RenderOptions;

const DEFAULT_MIN_SCALE: f64 = 1.0;
const DEFAULT_MAX_SCALE: f64 = 10.0;

/// Full configuration for a zoom viewport.
///
/// Read once when the engine is created.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomConfig {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Renderer tunables.
    pub render: RenderOptions,
    /// Gesture classification tunables.
    pub gesture: ClassifierConfig,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            render: RenderOptions::default(),
            gesture: ClassifierConfig::default(),
        }
    }
}

impl ZoomConfig {
    /// Returns sanitized `(min, max)` scale limits.
    ///
    /// Non-finite or non-positive limits fall back to their defaults, and an
    /// inverted range is swapped so that `min <= max`.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        let sane = |v: f64, default: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                default
            }
        };
        let min = sane(self.min_scale, DEFAULT_MIN_SCALE);
        let max = sane(self.max_scale, DEFAULT_MAX_SCALE);
        if min <= max { (min, max) } else { (max, min) }
    }

    /// Applies persisted user settings on top of this configuration.
    #[must_use]
    pub fn with_settings(mut self, settings: &ZoomSettings) -> Self {
        if settings.zoom_speed.is_finite() && settings.zoom_speed > 0.0 {
            self.gesture.zoom_speed = settings.zoom_speed;
        }
        self.gesture.shift_key_zoom = settings.shift_key_zoom;
        self.render.hide_scrollbars = settings.hide_scrollbars;
        self
    }
}

/// The user-facing settings a host persists between sessions.
///
/// Missing fields take their defaults, so an empty stored record enables
/// shift+wheel zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomSettings {
    /// Scale change per pixel of wheel delta.
    pub zoom_speed: f64,
    /// Whether shift+wheel zooms.
    pub shift_key_zoom: bool,
    /// Whether scrollbars are hidden while a zoom gesture is active.
    pub hide_scrollbars: bool,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        let gesture = ClassifierConfig::default();
        Self {
            zoom_speed: gesture.zoom_speed,
            shift_key_zoom: gesture.shift_key_zoom,
            hide_scrollbars: RenderOptions::default().hide_scrollbars,
        }
    }
}
