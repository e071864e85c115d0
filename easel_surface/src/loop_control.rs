// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame-loop stop switch.
//!
//! The host owns the actual scheduling (display-refresh callbacks, a timer,
//! a test loop); the surface only exposes a shared flag. Cloned handles see
//! the same flag, so a callback deep inside the scene can stop the loop the
//! host is driving.

use std::cell::Cell;
use std::rc::Rc;

/// Clonable stop switch for a frame loop.
///
/// Starts in the running state. [`Surface::frame`](crate::Surface::frame)
/// does nothing once the handle is stopped, and the host should stop
/// re-scheduling when [`is_running`](Self::is_running) turns false.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl Default for LoopHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopHandle {
    /// A fresh handle in the running state.
    pub fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    /// Resume a stopped loop.
    pub fn start(&self) {
        self.running.set(true);
    }

    /// Stop the loop; every clone observes the stop.
    pub fn stop(&self) {
        self.running.set(false);
    }

    /// Whether frames should still run.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let a = LoopHandle::new();
        let b = a.clone();
        assert!(a.is_running() && b.is_running());
        b.stop();
        assert!(!a.is_running());
        a.start();
        assert!(b.is_running());
    }
}
