//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `Game::tick`
//! - Seeded or injected RNG only
//! - Stable iteration order (platforms oldest first)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod game;
pub mod state;

pub use body::{Aabb, Body, Integrator};
pub use collision::{CollisionType, determine_collision};
pub use game::Game;
pub use state::{GameEvent, GameStatus, Platform, PlatformSnapshot, Player, PlayerSnapshot};
