// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification of raw input into zoom, reset, or pass-through gestures.

use core::fmt::Debug;

use kurbo::Point;

use crate::modifiers::{HostCaps, ModifierTracker, Modifiers};
use crate::tap::{TapThresholds, TapTracker};

/// Number of consecutive taps that restore the default scale.
const RESET_TAP_COUNT: u32 = 2;

/// Largest scale factor a single wheel event can request.
const MAX_WHEEL_FACTOR: f64 = 100.0;

/// A wheel or trackpad gesture update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Vertical wheel delta in pixels. Positive values scroll down (and, when
    /// zooming, zoom out).
    pub delta_y: f64,
    /// Pointer position in the scroll container's untransformed,
    /// non-scrolling coordinates.
    pub position: Point,
    /// Modifier flags carried by the event itself.
    pub modifiers: Modifiers,
}

/// Result of classifying an input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// Scale the content by `scale_factor` about `focal`.
    Zoom {
        /// Viewport point that should stay visually fixed.
        focal: Point,
        /// Multiplicative change in scale.
        scale_factor: f64,
    },
    /// Restore the default scale.
    Reset,
    /// Not a zoom gesture; the host should handle it normally.
    ///
    /// This doubles as a signal that native interaction can be restored.
    Ignore,
}

impl Gesture {
    /// Returns `true` if the event was consumed and the host should suppress
    /// its default handling.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

/// Strategy deciding whether a wheel event is a pinch.
pub trait PinchDetector: Debug {
    /// Returns `true` if `wheel` should be treated as a pinch given the
    /// modifiers that are genuinely `held`.
    fn is_pinch(&self, wheel: &WheelInput, held: Modifiers) -> bool;
}

/// Pinch detection for hosts that flag pinches with a synthetic control key.
///
/// A wheel event is a pinch when it carries the control flag but the keyboard
/// has not reported control as held. A genuine ctrl+wheel is left alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyntheticCtrlPinch;

impl PinchDetector for SyntheticCtrlPinch {
    fn is_pinch(&self, wheel: &WheelInput, held: Modifiers) -> bool {
        wheel.modifiers.contains(Modifiers::CTRL) && !held.contains(Modifiers::CTRL)
    }
}

/// Pinch detection that treats any control-flagged wheel event as a pinch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModifierPinch;

impl PinchDetector for ModifierPinch {
    fn is_pinch(&self, wheel: &WheelInput, _held: Modifiers) -> bool {
        wheel.modifiers.contains(Modifiers::CTRL)
    }
}

/// Pinch detector chosen from [`HostCaps`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformPinch {
    /// See [`SyntheticCtrlPinch`].
    SyntheticCtrl(SyntheticCtrlPinch),
    /// See [`ModifierPinch`].
    Modifier(ModifierPinch),
}

impl PlatformPinch {
    /// Selects the detector matching the host's capabilities.
    #[must_use]
    pub fn from_caps(caps: HostCaps) -> Self {
        if caps.contains(HostCaps::SYNTHETIC_PINCH_CTRL) {
            Self::SyntheticCtrl(SyntheticCtrlPinch)
        } else {
            Self::Modifier(ModifierPinch)
        }
    }
}

impl PinchDetector for PlatformPinch {
    fn is_pinch(&self, wheel: &WheelInput, held: Modifiers) -> bool {
        match self {
            Self::SyntheticCtrl(d) => d.is_pinch(wheel, held),
            Self::Modifier(d) => d.is_pinch(wheel, held),
        }
    }
}

/// Tunables for [`GestureClassifier`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Scale change per pixel of wheel delta.
    pub zoom_speed: f64,
    /// Whether shift+wheel zooms.
    pub shift_key_zoom: bool,
    /// Tolerances for the double-tap reset.
    pub taps: TapThresholds,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            zoom_speed: 0.015,
            shift_key_zoom: true,
            taps: TapThresholds::default(),
        }
    }
}

/// Turns raw host input into [`Gesture`]s.
///
/// The classifier owns the real modifier state and the tap run, so every
/// keyboard and pointer event should be routed through it even when the
/// result is [`Gesture::Ignore`].
#[derive(Clone, Debug)]
pub struct GestureClassifier<D = PlatformPinch> {
    config: ClassifierConfig,
    caps: HostCaps,
    detector: D,
    modifiers: ModifierTracker,
    taps: TapTracker,
}

impl GestureClassifier<PlatformPinch> {
    /// Creates a classifier with the pinch detector selected by `caps`.
    #[must_use]
    pub fn new(config: ClassifierConfig, caps: HostCaps) -> Self {
        Self::with_detector(config, caps, PlatformPinch::from_caps(caps))
    }
}

impl<D: PinchDetector> GestureClassifier<D> {
    /// Creates a classifier with an explicit pinch detector.
    #[must_use]
    pub fn with_detector(config: ClassifierConfig, caps: HostCaps, detector: D) -> Self {
        Self {
            config,
            caps,
            detector,
            modifiers: ModifierTracker::new(),
            taps: TapTracker::new(config.taps),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Returns the host capabilities in effect.
    #[must_use]
    pub fn caps(&self) -> HostCaps {
        self.caps
    }

    /// Returns the modifiers currently believed to be held.
    #[must_use]
    pub fn held_modifiers(&self) -> Modifiers {
        self.modifiers.held()
    }

    /// Returns the tap run state.
    #[must_use]
    pub fn taps(&self) -> &TapTracker {
        &self.taps
    }

    /// Classifies a key press.
    ///
    /// `key` is the character produced, if any. The platform shortcut
    /// modifier plus `0` resets the zoom.
    pub fn on_key_down(&mut self, key: Option<char>, modifiers: Modifiers) -> Gesture {
        self.modifiers.update(modifiers);
        if key == Some('0') && modifiers.contains(self.caps.shortcut_modifier()) {
            Gesture::Reset
        } else {
            Gesture::Ignore
        }
    }

    /// Records a key release.
    pub fn on_key_up(&mut self, modifiers: Modifiers) {
        self.modifiers.update(modifiers);
    }

    /// Classifies a pointer move. Always [`Gesture::Ignore`].
    pub fn on_pointer_move(&mut self, modifiers: Modifiers) -> Gesture {
        self.modifiers.update(modifiers);
        Gesture::Ignore
    }

    /// Classifies a pointer press. Always [`Gesture::Ignore`].
    pub fn on_pointer_down(&mut self, position: Point, time: u64) -> Gesture {
        self.taps.press(position, time);
        Gesture::Ignore
    }

    /// Classifies a click; a quick double tap resets the zoom.
    pub fn on_click(&mut self, position: Point, time: u64) -> Gesture {
        if self.taps.tap(position, time) >= RESET_TAP_COUNT {
            self.taps.reset();
            Gesture::Reset
        } else {
            Gesture::Ignore
        }
    }

    /// Classifies a wheel event given the engine's `current_scale`.
    ///
    /// The scale factor is chosen so that the next scale is
    /// `current_scale + delta_y * zoom_speed`. That next scale is floored at
    /// a hundredth of the current one, so a hard pinch in saturates at the
    /// engine's maximum rather than passing through zero.
    pub fn on_wheel(&mut self, wheel: &WheelInput, current_scale: f64) -> Gesture {
        let pinch = self.detector.is_pinch(wheel, self.modifiers.held());
        let shift_zoom = self.config.shift_key_zoom && wheel.modifiers.contains(Modifiers::SHIFT);
        if !(pinch || shift_zoom) {
            return Gesture::Ignore;
        }

        let next_scale = (current_scale + wheel.delta_y * self.config.zoom_speed)
            .max(current_scale / MAX_WHEEL_FACTOR);
        Gesture::Zoom {
            focal: wheel.position,
            scale_factor: current_scale / next_scale,
        }
    }
}
