// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host's bounded, integer scroll mechanism.

use core::ops::{Index, IndexMut};

use kurbo::Vec2;

/// A scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Self; 2] = [Self::X, Self::Y];

    /// Returns the component of `v` along this axis.
    #[must_use]
    pub fn of(self, v: Vec2) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }

    /// Sets the component of `v` along this axis.
    pub fn set(self, v: &mut Vec2, value: f64) {
        match self {
            Self::X => v.x = value,
            Self::Y => v.y = value,
        }
    }
}

/// A pair of values, one per [`Axis`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PerAxis<T> {
    /// Horizontal value.
    pub x: T,
    /// Vertical value.
    pub y: T,
}

impl<T> PerAxis<T> {
    /// Creates a pair from its components.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Builds a pair by evaluating `f` for each axis.
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            x: f(Axis::X),
            y: f(Axis::Y),
        }
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl<T> IndexMut<Axis> for PerAxis<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

/// Access to a host scroll container.
///
/// Offsets are integers in `[0, max_offset(axis)]`. Implementations clamp
/// writes into that range themselves, the way a browser clamps `scrollLeft`.
/// A `max_offset` of zero means the axis cannot scroll at all.
pub trait ScrollAdapter {
    /// Current scroll offset along `axis`.
    fn offset(&self, axis: Axis) -> i64;

    /// Requests a new scroll offset along `axis`; the host clamps it.
    fn set_offset(&mut self, axis: Axis, offset: i64);

    /// Largest reachable offset along `axis`.
    fn max_offset(&self, axis: Axis) -> i64;

    /// Reads both axes at once.
    fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            offset: PerAxis::from_fn(|axis| self.offset(axis)),
            max_offset: PerAxis::from_fn(|axis| self.max_offset(axis)),
        }
    }
}

/// Scroll state read from a [`ScrollAdapter`] at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollSnapshot {
    /// Current offsets.
    pub offset: PerAxis<i64>,
    /// Largest reachable offsets.
    pub max_offset: PerAxis<i64>,
}
