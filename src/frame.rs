//! Fixed-step accumulator for hosts
//!
//! Hosts get a variable frame time from their scheduler; the simulation wants
//! one tick per `SIM_DT_MS`. Leftover time carries over, long stalls are dropped
//! rather than caught up.

use crate::consts::{MAX_SUBSTEPS, SIM_DT_MS};

/// Longest frame we accept before clamping (ms)
pub const MAX_FRAME_MS: f32 = 100.0;

#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator_ms: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed time, returns how many fixed ticks to run now
    pub fn advance(&mut self, frame_ms: f32) -> u32 {
        self.accumulator_ms += frame_ms.clamp(0.0, MAX_FRAME_MS);

        // The clamp keeps this below MAX_SUBSTEPS, so no backlog survives a stall
        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;
        }
        substeps
    }

    /// Forget carried time (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }
}
