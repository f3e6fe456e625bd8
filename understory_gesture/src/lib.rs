// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: classify raw input into zoom-viewport gestures.
//!
//! A zoom viewport only needs three things from its input layer: "zoom by this
//! much about this point", "go back to the default scale", and "this is not for
//! me". This crate turns host keyboard, pointer, and wheel events into exactly
//! those, as a [`Gesture`]:
//!
//! - [`modifiers`]: modifier flags, host capability flags, and tracking of the
//!   modifiers that are genuinely held.
//! - [`tap`]: counting runs of consecutive taps with spatial/temporal tolerance.
//! - [`GestureClassifier`]: the classifier itself, with a pluggable
//!   [`PinchDetector`] strategy.
//!
//! ## Pinch detection
//!
//! Desktop hosts rarely expose trackpad pinches directly. A common convention
//! is to deliver them as wheel events with the control flag set, even though no
//! control key is down. [`SyntheticCtrlPinch`] compares the flag against the
//! keyboard's own reports to tell the two apart. Hosts without that
//! convention use [`ModifierPinch`]. [`PlatformPinch`] selects between them from
//! [`HostCaps`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{
//!     ClassifierConfig, Gesture, GestureClassifier, HostCaps, Modifiers, WheelInput,
//! };
//!
//! let mut classifier = GestureClassifier::new(ClassifierConfig::default(), HostCaps::default());
//!
//! // Trackpad pinch: the wheel event says ctrl, the keyboard never did.
//! let pinch = WheelInput {
//!     delta_y: -4.0,
//!     position: Point::new(200.0, 150.0),
//!     modifiers: Modifiers::CTRL,
//! };
//! assert!(matches!(classifier.on_wheel(&pinch, 1.0), Gesture::Zoom { .. }));
//!
//! // Double click restores the default scale.
//! classifier.on_click(Point::new(10.0, 10.0), 0);
//! assert_eq!(classifier.on_click(Point::new(12.0, 11.0), 150), Gesture::Reset);
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for the configuration types.
//!
//! This crate is `no_std`.

#![no_std]

mod classify;
pub mod modifiers;
pub mod tap;

pub use classify::{
    ClassifierConfig, Gesture, GestureClassifier, ModifierPinch, PinchDetector, PlatformPinch,
    SyntheticCtrlPinch, WheelInput,
};
pub use modifiers::{HostCaps, ModifierTracker, Modifiers};
pub use tap::{TapThresholds, TapTracker};
