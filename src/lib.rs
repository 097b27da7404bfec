//! Sky Hopper - an endless vertical platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, platform stream)
//! - `config`: Immutable tuning handed to the simulation
//! - `runner`: Frame-delta to fixed-tick adapter for a presentation layer
//! - `autopilot`: Idle/demo controller that plays the game

pub mod autopilot;
pub mod config;
pub mod runner;
pub mod sim;

pub use autopilot::Autopilot;
pub use config::{ConfigError, SimConfig};
pub use runner::FixedStepper;
pub use sim::{Game, GameEvent, GameStatus, PlatformSnapshot, PlayerSnapshot};

/// Timing constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;
}
