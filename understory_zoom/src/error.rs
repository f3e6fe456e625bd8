// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Gesture parameters rejected by [`crate::ZoomTransformEngine`].
///
/// Rejection never mutates engine state.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ZoomError {
    /// The scale factor was NaN, infinite, zero, or negative.
    #[error("scale factor must be finite and positive, got {0}")]
    InvalidScaleFactor(f64),
    /// The focal point had a non-finite coordinate.
    #[error("focal point must be finite, got {0:?}")]
    InvalidFocalPoint(Point),
}
