// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded asset-readiness polling.
//!
//! Bitmaps and sprite sheets materialize asynchronously on the host side;
//! the surface re-checks their readiness once per frame through a
//! [`Readiness`] gate instead of blocking. The gate carries a budget so a
//! URL that never loads surfaces as an error rather than polling forever.

use thiserror::Error;

/// Why a readiness gate gave up.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum ReadyError {
    /// The condition never became true within the poll budget.
    #[error("asset not ready after {attempts} polls")]
    TimedOut {
        /// How many polls were spent.
        attempts: u32,
    },
}

/// Default number of polls before a gate gives up; at one poll per frame
/// this is several seconds of waiting.
pub const DEFAULT_POLL_BUDGET: u32 = 240;

/// One bounded readiness gate.
///
/// Call [`poll`](Self::poll) once per frame with the current condition.
/// `Ok(true)` means ready (the gate resets for reuse), `Ok(false)` means
/// keep waiting, `Err` means the budget is spent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Readiness {
    attempts: u32,
    budget: u32,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_BUDGET)
    }
}

impl Readiness {
    /// A gate allowing up to `budget` failed polls.
    pub fn new(budget: u32) -> Self {
        Self {
            attempts: 0,
            budget,
        }
    }

    /// Polls spent so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Feed the current condition into the gate.
    pub fn poll(&mut self, ready: bool) -> Result<bool, ReadyError> {
        if ready {
            self.attempts = 0;
            return Ok(true);
        }
        self.attempts += 1;
        if self.attempts >= self.budget {
            Err(ReadyError::TimedOut {
                attempts: self.attempts,
            })
        } else {
            Ok(false)
        }
    }
}
