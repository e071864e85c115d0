// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized input events and the per-frame pointer/keyboard state record.
//!
//! ## Overview
//!
//! The host translates its raw device events (DOM, winit, test harness)
//! into [`InputEvent`] values; the surface folds them into a
//! [`PointerState`] / [`KeyState`] pair that the dispatch tick reads.
//! Ordering is guaranteed by the single-threaded event queue: an event is
//! fully folded into the state record before the next tick reads it.
//!
//! Pointer coordinates in events are on-screen (CSS) pixels; the surface
//! rescales them into drawing-buffer pixels before storing them, so
//! everything downstream (hit-testing, rendering) works in one space.

use std::collections::BTreeSet;

use easel_scene::hit::PointerSnapshot;

bitflags::bitflags! {
    /// Pointer buttons currently held down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Primary button.
        const LEFT  = 0b0000_0001;
        /// Middle/wheel button.
        const WHEEL = 0b0000_0010;
        /// Secondary button.
        const RIGHT = 0b0000_0100;
    }
}

/// A pointer button as reported by the device.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerButton {
    /// Button code 0.
    Left,
    /// Button code 1.
    Wheel,
    /// Button code 2.
    Right,
    /// Any other code. Click dispatch for these is skipped with a warning.
    Other(u8),
}

impl PointerButton {
    /// Map a device button code.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Left,
            1 => Self::Wheel,
            2 => Self::Right,
            other => Self::Other(other),
        }
    }

    /// The held-buttons flag for this button, if it is a recognized one.
    pub fn flag(self) -> Option<PointerButtons> {
        match self {
            Self::Left => Some(PointerButtons::LEFT),
            Self::Wheel => Some(PointerButtons::WHEEL),
            Self::Right => Some(PointerButtons::RIGHT),
            Self::Other(_) => None,
        }
    }
}

/// Which device produced the most recent pointer transition.
///
/// Decides whether a release dispatches click callbacks (mouse) or the
/// touch callback.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PointerDevice {
    /// Mouse or generic pointer.
    #[default]
    Mouse,
    /// Touch contact.
    Touch,
}

/// A normalized device event.
///
/// Coordinates are on-screen (CSS) pixels; timestamps are host-supplied
/// milliseconds (any monotonic base).
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer button pressed.
    PointerDown {
        /// On-screen x.
        x: f64,
        /// On-screen y.
        y: f64,
        /// Which button went down.
        button: PointerButton,
        /// Event time in milliseconds.
        timestamp: f64,
    },
    /// Pointer moved.
    PointerMove {
        /// On-screen x.
        x: f64,
        /// On-screen y.
        y: f64,
    },
    /// Pointer button released. Runs the click pass.
    PointerUp {
        /// On-screen x.
        x: f64,
        /// On-screen y.
        y: f64,
        /// Which button came up.
        button: PointerButton,
        /// Event time in milliseconds.
        timestamp: f64,
    },
    /// Pointer left the surface; unsets the current position.
    PointerLeave,
    /// First touch contact.
    TouchStart {
        /// On-screen x.
        x: f64,
        /// On-screen y.
        y: f64,
        /// Event time in milliseconds.
        timestamp: f64,
    },
    /// Touch contact moved.
    TouchMove {
        /// On-screen x.
        x: f64,
        /// On-screen y.
        y: f64,
    },
    /// Touch contact lifted. Runs the touch click pass.
    TouchEnd {
        /// Event time in milliseconds.
        timestamp: f64,
    },
    /// Key went down.
    KeyDown {
        /// Key identifier (for example `"w"`, `"ArrowLeft"`).
        key: String,
    },
    /// Key came up.
    KeyUp {
        /// Key identifier.
        key: String,
    },
    /// The host is about to show a context menu.
    ContextMenu,
}

/// Pointer state snapshot read by the dispatch pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Initial (pointer-down), current, and final (pointer-up) positions in
    /// buffer pixels, each axis independently possibly unset.
    pub snapshot: PointerSnapshot,
    /// When the pointer went down, milliseconds.
    pub pressed_at: Option<f64>,
    /// When the pointer came up, milliseconds.
    pub released_at: Option<f64>,
    /// Buttons currently held.
    pub buttons: PointerButtons,
    /// Device of the most recent transition.
    pub device: PointerDevice,
}

impl PointerState {
    /// Milliseconds between press and release, when both have happened.
    pub fn duration(&self) -> Option<f64> {
        Some(self.released_at? - self.pressed_at?)
    }
}

/// Keyboard state: currently-down keys plus the one-shot release queue.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyState {
    down: BTreeSet<String>,
    pressed_count: u64,
    released: Vec<String>,
}

impl KeyState {
    /// Record a key-down. Repeats (auto-repeat) do not bump the count.
    pub fn key_down(&mut self, key: String) {
        if self.down.insert(key) {
            self.pressed_count += 1;
        }
    }

    /// Record a key-up; queues exactly one release dispatch for keys that
    /// were actually down.
    pub fn key_up(&mut self, key: String) {
        if self.down.remove(&key) {
            self.released.push(key);
        }
    }

    /// Whether a specific key is down.
    pub fn is_down(&self, key: &str) -> bool {
        self.down.contains(key)
    }

    /// Whether any key is down.
    pub fn any_down(&self) -> bool {
        !self.down.is_empty()
    }

    /// The full set of currently-down keys.
    pub fn down_keys(&self) -> &BTreeSet<String> {
        &self.down
    }

    /// Total distinct key presses observed.
    pub fn pressed_count(&self) -> u64 {
        self.pressed_count
    }

    /// Take the queued key releases; each physical key-up appears once.
    pub fn drain_released(&mut self) -> Vec<String> {
        std::mem::take(&mut self.released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_codes_map_and_flag() {
        assert_eq!(PointerButton::from_code(0), PointerButton::Left);
        assert_eq!(PointerButton::from_code(1), PointerButton::Wheel);
        assert_eq!(PointerButton::from_code(2), PointerButton::Right);
        assert_eq!(PointerButton::from_code(7), PointerButton::Other(7));
        assert_eq!(PointerButton::Other(7).flag(), None);
        assert_eq!(PointerButton::Left.flag(), Some(PointerButtons::LEFT));
    }

    #[test]
    fn key_state_counts_distinct_presses() {
        let mut keys = KeyState::default();
        keys.key_down("w".into());
        keys.key_down("w".into()); // auto-repeat
        keys.key_down("a".into());
        assert_eq!(keys.pressed_count(), 2);
        assert!(keys.is_down("w") && keys.is_down("a"));
    }

    #[test]
    fn release_queue_fires_once_per_key_up() {
        let mut keys = KeyState::default();
        keys.key_down("w".into());
        keys.key_up("w".into());
        keys.key_up("w".into()); // stray repeat, already up
        assert_eq!(keys.drain_released(), vec!["w".to_string()]);
        assert!(keys.drain_released().is_empty());
        assert!(!keys.any_down());
    }

    #[test]
    fn duration_requires_both_timestamps() {
        let mut p = PointerState::default();
        assert_eq!(p.duration(), None);
        p.pressed_at = Some(100.0);
        assert_eq!(p.duration(), None);
        p.released_at = Some(180.0);
        assert_eq!(p.duration(), Some(80.0));
    }
}
