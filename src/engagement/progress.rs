use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Per-(supporter, trackable) counter with a clamped upper bound.
///
/// `completed` is derived, never stored: the state is complete exactly when
/// `current == max`. `max` is non-zero by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub current: u32,
    pub max: NonZeroU32,
}

impl ProgressState {
    /// Fresh counter at zero.
    pub fn new(max: NonZeroU32) -> Self {
        Self { current: 0, max }
    }

    /// Rebuild a counter from stored values, clamping any stored overshoot.
    pub fn resume(current: u32, max: NonZeroU32) -> Self {
        Self {
            current: current.min(max.get()),
            max,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current == self.max.get()
    }

    /// Advance the counter by a non-negative delta, clamping at `max`.
    ///
    /// Once complete the state is terminal: further advances are no-ops that
    /// return the state unchanged. A negative delta is a caller bug and is
    /// rejected without producing a new state.
    pub fn advance(self, delta: i64) -> Result<ProgressState, ProgressError> {
        if delta < 0 {
            return Err(ProgressError::InvalidDelta(delta));
        }
        if self.is_complete() {
            return Ok(self);
        }

        let ceiling = u64::from(self.max.get());
        let next = (u64::from(self.current) + delta as u64).min(ceiling) as u32;

        Ok(ProgressState {
            current: next,
            max: self.max,
        })
    }
}

/// Progress accounting failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("progress delta must be non-negative, got {0}")]
    InvalidDelta(i64),
}
