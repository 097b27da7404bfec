//! Game entities and read-only views handed to the presentation layer

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, Body, Integrator};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for the start command
    StartScreen,
    /// Active gameplay, the only status in which `tick` simulates
    InProgress,
    /// Frozen mid-run
    Paused,
    /// Player fell off the bottom of the screen
    GameOver,
}

/// Things that happened during a tick, for audio/visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player touched down on a platform after being airborne
    Landed { platform_id: u64 },
    /// First landing on a platform
    Scored { platform_id: u64, score: u32 },
    /// Player hit the underside or a side of a platform
    Bumped { platform_id: u64 },
    Jumped,
    ScrollStarted,
    ScrollStopped,
    GameOver { score: u32 },
}

/// The one player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub width: f64,
    pub height: f64,
    score: u32,
    pub jumping: bool,
    pub on_ground: bool,
    facing_right: bool,
}

impl Player {
    pub fn new(pos: DVec2, vel: DVec2, acc: DVec2, width: f64, height: f64) -> Self {
        Self {
            body: Body::new("player", pos, vel, acc, Integrator::Player),
            width,
            height,
            score: 0,
            jumping: false,
            on_ground: false,
            facing_right: true,
        }
    }

    #[inline]
    pub fn pos(&self) -> DVec2 {
        self.body.pos
    }

    #[inline]
    pub fn vel(&self) -> DVec2 {
        self.body.vel
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.body.pos, self.size())
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn increment_score(&mut self) {
        self.score += 1;
    }

    /// Last horizontal direction of travel
    #[inline]
    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Integrate, then latch facing from the horizontal velocity sign.
    ///
    /// Landing and jumping flags are owned by the game, not decided here.
    pub fn update_state(&mut self, dt: f64) {
        self.body.integrate(dt);
        if self.body.vel.x > 0.0 {
            self.facing_right = true;
        } else if self.body.vel.x < 0.0 {
            self.facing_right = false;
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.body.pos,
            velocity: self.body.vel,
            width: self.width,
            height: self.height,
            score: self.score,
            is_jumping: self.jumping,
            on_ground: self.on_ground,
            facing_right: self.facing_right,
        }
    }
}

/// A moving platform the player can stand on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Creation index, strictly increasing across a session
    pub id: u64,
    pub body: Body,
    pub width: f64,
    pub height: f64,
    visited: bool,
}

impl Platform {
    pub fn new(id: u64, pos: DVec2, vel: DVec2, acc: DVec2, width: f64, height: f64) -> Self {
        let integrator = if acc == DVec2::ZERO {
            Integrator::ConstantVelocity
        } else {
            Integrator::ConstantAcceleration
        };
        Self {
            id,
            body: Body::new(format!("platform-{id}"), pos, vel, acc, integrator),
            width,
            height,
            visited: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> DVec2 {
        self.body.pos
    }

    #[inline]
    pub fn vel(&self) -> DVec2 {
        self.body.vel
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.body.pos, self.size())
    }

    #[inline]
    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Latch the platform as visited. Returns true only the first time.
    pub fn mark_visited(&mut self) -> bool {
        !std::mem::replace(&mut self.visited, true)
    }

    pub fn update_state(&mut self, dt: f64) {
        self.body.integrate(dt);
    }

    pub fn snapshot(&self) -> PlatformSnapshot {
        PlatformSnapshot {
            id: self.id,
            position: self.body.pos,
            width: self.width,
            height: self.height,
            visited: self.visited,
        }
    }
}

/// Copy of the player state for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: DVec2,
    pub velocity: DVec2,
    pub width: f64,
    pub height: f64,
    pub score: u32,
    pub is_jumping: bool,
    pub on_ground: bool,
    pub facing_right: bool,
}

/// Copy of a platform for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSnapshot {
    pub id: u64,
    pub position: DVec2,
    pub width: f64,
    pub height: f64,
    pub visited: bool,
}
