// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard modifier flags and real-key tracking.
//!
//! Some hosts report trackpad pinch gestures as wheel events with the control
//! flag set even though no control key is held. The only way to tell the two
//! apart is to remember what the keyboard actually reported, which is what
//! [`ModifierTracker`] does.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier state attached to an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CTRL = 1 << 0;
        /// Shift key.
        const SHIFT = 1 << 1;
        /// Alt / Option key.
        const ALT = 1 << 2;
        /// Meta / Command / Super key.
        const META = 1 << 3;
    }
}

bitflags! {
    /// Capabilities and conventions of the host platform.
    ///
    /// These select classification strategies rather than being consulted
    /// ad hoc; see [`crate::PlatformPinch::from_caps`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HostCaps: u8 {
        /// The host reports trackpad pinches as wheel events carrying a
        /// synthetic control flag.
        const SYNTHETIC_PINCH_CTRL = 1 << 0;
        /// The platform's primary shortcut modifier is Meta (Command) rather
        /// than Control.
        const COMMAND_SHORTCUTS = 1 << 1;
    }
}

impl Default for HostCaps {
    fn default() -> Self {
        Self::SYNTHETIC_PINCH_CTRL
    }
}

impl HostCaps {
    /// The modifier used for application shortcuts on this platform.
    #[must_use]
    pub fn shortcut_modifier(self) -> Modifiers {
        if self.contains(Self::COMMAND_SHORTCUTS) {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }
}

/// Tracks the modifier keys that are genuinely held.
///
/// Feed it the modifier snapshot of every key and pointer-move event; wheel
/// events are deliberately not fed in, since their flags may be synthetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModifierTracker {
    held: Modifiers,
}

impl ModifierTracker {
    /// Creates a tracker with no modifiers held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the modifier snapshot from a trusted event.
    pub fn update(&mut self, modifiers: Modifiers) {
        self.held = modifiers;
    }

    /// Returns the modifiers currently believed to be held.
    #[must_use]
    pub fn held(&self) -> Modifiers {
        self.held
    }
}
