// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Zoom: pinch-zoom for scrollable surfaces.
//!
//! This crate zooms a large scrollable page about a gesture's focal point. The
//! page is shown through a host scroll container whose offset is an integer
//! bounded by the scroll range, and which knows nothing about zoom. The crate
//! focuses on:
//! - A scale + translation model that keeps the point under the gesture fixed.
//! - Reconciling fractional translation with integer scroll offsets without
//!   drifting, and carrying whatever scrolling cannot express as overflow.
//! - Painting cheaply while a gesture is active and exactly once it pauses.
//!
//! It does **not** own any event loop, clock, or rendering backend. Callers
//! are expected to:
//! - Implement [`ScrollAdapter`] and [`RenderSurface`] for their scroll
//!   container (or use [`HeadlessPage`] in tests and tooling).
//! - Forward input events, scroll notifications, and timer wakeups to a
//!   [`ZoomController`], or drive a [`ZoomTransformEngine`] directly.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_zoom::{HeadlessPage, ZoomConfig, ZoomTransformEngine};
//!
//! let mut page = HeadlessPage::with_max_offset(1000, 1000);
//! let mut engine = ZoomTransformEngine::new(&ZoomConfig::default());
//!
//! // Double the scale about (50, 50); that point stays put on screen.
//! engine.apply_scale(&mut page, 2.0, Point::new(50.0, 50.0), 0).unwrap();
//! assert_eq!(engine.scale(), 2.0);
//! assert_eq!(engine.translation(), kurbo::Vec2::new(-50.0, -50.0));
//!
//! // The first paints are low fidelity; the settle upgrades them later.
//! assert!(engine.poll(&mut page, 40).settled);
//! ```
//!
//! ## Driving from host events
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{HostCaps, Modifiers, WheelInput};
//! use understory_zoom::{HeadlessPage, ZoomConfig, ZoomController};
//!
//! let mut page = HeadlessPage::with_max_offset(2000, 2000);
//! let mut zoom = ZoomController::new(&ZoomConfig::default(), HostCaps::default());
//!
//! // A trackpad pinch arrives as a ctrl-flagged wheel event.
//! let pinch = WheelInput {
//!     delta_y: -10.0,
//!     position: Point::new(300.0, 200.0),
//!     modifiers: Modifiers::CTRL,
//! };
//! let gesture = zoom.on_wheel(&mut page, &pinch, 0);
//! assert!(gesture.is_consumed());
//!
//! // Our own scroll writes are recognized when the host reports them.
//! if page.take_scroll_notification() {
//!     zoom.on_scroll(&page);
//! }
//!
//! // Wake up at the next deadline to settle and unlock interaction.
//! while let Some(deadline) = zoom.next_deadline() {
//!     zoom.tick(&mut page, deadline);
//! }
//! ```
//!
//! ## Design notes
//!
//! - Translation is the offset of the content origin and is always `<= 0`:
//!   content only moves up/left, and only as far as scrolling allows.
//! - Time is caller-supplied milliseconds; deferred work is exposed as
//!   deadlines from [`ZoomTransformEngine::next_deadline`].
//! - Invalid gesture parameters are rejected with [`ZoomError`] by the engine
//!   and logged (via `tracing`) and dropped by the controller.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for configuration and settings.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod controller;
mod engine;
mod error;
pub mod headless;
pub mod reconcile;
pub mod render;
pub mod scroll;

pub use config::{ZoomConfig, ZoomSettings};
pub use controller::ZoomController;
pub use engine::{ScaleChange, ZoomDebugInfo, ZoomHost, ZoomState, ZoomTransformEngine};
pub use error::ZoomError;
pub use headless::{HeadlessPage, PageRange};
pub use reconcile::{AxisTranslation, TranslationReconciler};
pub use render::{
    Fidelity, InteractionState, RenderOptions, RenderState, RenderSurface, TimerFirings,
    TransformFunction, TransformRenderer,
};
pub use scroll::{Axis, PerAxis, ScrollAdapter, ScrollSnapshot};
