//! Fixed-timestep driver
//!
//! Render loops hand over whatever time elapsed since the last frame. The
//! simulation only ever sees `SIM_DT`, so results do not depend on frame rate.

use rand::Rng;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Game, GameEvent};

/// Accumulates frame time and converts it into whole simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator: f64,
    /// Events from every substep of the current frame
    events: Vec<GameEvent>,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time carried over to the next frame (always below `SIM_DT` unless
    /// the substep cap was hit)
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the tick count.
    pub fn advance<R: Rng>(&mut self, game: &mut Game<R>, frame_dt: f64) -> u32 {
        // Long stalls (tab hidden, debugger) are clamped, not replayed
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            game.tick(SIM_DT);
            self.events.extend(game.drain_events());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!(
                "Dropping {:.3}s of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Take the events produced by the ticks run so far this frame
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
