// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-handler entry points wiring gesture classification to the engine.

use kurbo::Point;
use tracing::warn;
use understory_gesture::{
    Gesture, GestureClassifier, HostCaps, Modifiers, PinchDetector, PlatformPinch, WheelInput,
};

use crate::config::ZoomConfig;
use crate::engine::{ZoomHost, ZoomTransformEngine};
use crate::render::{RenderSurface, TimerFirings};
use crate::scroll::ScrollAdapter;

/// One viewport's classifier and engine, driven by host events.
///
/// Every handler returns the classified [`Gesture`];
/// [`Gesture::is_consumed`] tells the host whether to suppress its default
/// handling. Handlers never fail: rejected gestures are logged and dropped so
/// host event dispatch continues.
#[derive(Clone, Debug)]
pub struct ZoomController<D = PlatformPinch> {
    classifier: GestureClassifier<D>,
    engine: ZoomTransformEngine,
}

impl ZoomController<PlatformPinch> {
    /// Creates a controller for a host with the given capabilities.
    #[must_use]
    pub fn new(config: &ZoomConfig, caps: HostCaps) -> Self {
        Self {
            classifier: GestureClassifier::new(config.gesture, caps),
            engine: ZoomTransformEngine::new(config),
        }
    }
}

impl<D: PinchDetector> ZoomController<D> {
    /// Assembles a controller from parts.
    #[must_use]
    pub fn from_parts(classifier: GestureClassifier<D>, engine: ZoomTransformEngine) -> Self {
        Self { classifier, engine }
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &ZoomTransformEngine {
        &self.engine
    }

    /// The classifier.
    #[must_use]
    pub fn classifier(&self) -> &GestureClassifier<D> {
        &self.classifier
    }

    /// Handles a wheel or trackpad gesture event.
    pub fn on_wheel<H: ZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        wheel: &WheelInput,
        now: u64,
    ) -> Gesture {
        let gesture = self.classifier.on_wheel(wheel, self.engine.scale());
        self.dispatch(host, gesture, now)
    }

    /// Handles a key press.
    pub fn on_key_down<H: ZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: Option<char>,
        modifiers: Modifiers,
        now: u64,
    ) -> Gesture {
        match self.classifier.on_key_down(key, modifiers) {
            // Typing must not unlock interaction mid-gesture.
            Gesture::Ignore => Gesture::Ignore,
            gesture => self.dispatch(host, gesture, now),
        }
    }

    /// Handles a key release.
    pub fn on_key_up(&mut self, modifiers: Modifiers) {
        self.classifier.on_key_up(modifiers);
    }

    /// Handles pointer movement over the viewport.
    pub fn on_pointer_move<H: ZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        modifiers: Modifiers,
        now: u64,
    ) -> Gesture {
        let gesture = self.classifier.on_pointer_move(modifiers);
        self.dispatch(host, gesture, now)
    }

    /// Handles a pointer press on the viewport.
    pub fn on_pointer_down<H: ZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        position: Point,
        now: u64,
    ) -> Gesture {
        let gesture = self.classifier.on_pointer_down(position, now);
        self.dispatch(host, gesture, now)
    }

    /// Handles a click; a double click resets the zoom.
    pub fn on_click<H: ZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        position: Point,
        now: u64,
    ) -> Gesture {
        let gesture = self.classifier.on_click(position, now);
        self.dispatch(host, gesture, now)
    }

    /// Handles a host scroll notification.
    pub fn on_scroll<S: ScrollAdapter + ?Sized>(&mut self, scroll: &S) {
        self.engine.on_external_scroll_change(scroll);
    }

    /// Runs deferred work due at `now`.
    pub fn tick<R: RenderSurface + ?Sized>(&mut self, surface: &mut R, now: u64) -> TimerFirings {
        self.engine.poll(surface, now)
    }

    /// Earliest time [`Self::tick`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.engine.next_deadline()
    }

    /// Cancels deferred work and restores interaction.
    pub fn shutdown<R: RenderSurface + ?Sized>(&mut self, surface: &mut R) {
        self.engine.shutdown(surface);
    }

    fn dispatch<H: ZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        gesture: Gesture,
        now: u64,
    ) -> Gesture {
        match gesture {
            Gesture::Zoom {
                focal,
                scale_factor,
            } => {
                if let Err(err) = self.engine.apply_scale(host, scale_factor, focal, now) {
                    warn!(%err, "dropping zoom gesture");
                }
            }
            Gesture::Reset => self.engine.reset(host, now),
            Gesture::Ignore => {
                self.engine.restore_interaction(host);
            }
        }
        gesture
    }
}
