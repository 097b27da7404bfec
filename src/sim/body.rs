//! Kinematic bodies and axis-aligned bounds
//!
//! Every moving thing in the world is a [`Body`]. How a body advances is picked
//! by its [`Integrator`] tag rather than by the owning type, so the update loop
//! is a single match.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Per-body update policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Integrator {
    /// `pos += vel * dt`; acceleration is ignored
    ConstantVelocity,
    /// `vel += acc * dt; pos += vel * dt`
    ConstantAcceleration,
    /// Constant acceleration plus player bookkeeping done by the owner
    Player,
}

/// Position, velocity and acceleration of a simulated entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Debug label only
    pub name: String,
    pub pos: DVec2,
    pub vel: DVec2,
    /// Never touched by collision response
    pub acc: DVec2,
    pub integrator: Integrator,
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        pos: DVec2,
        vel: DVec2,
        acc: DVec2,
        integrator: Integrator,
    ) -> Self {
        Self {
            name: name.into(),
            pos,
            vel,
            acc,
            integrator,
        }
    }

    /// Velocity this body will move with during the next step of length `dt`
    #[inline]
    pub fn step_velocity(&self, dt: f64) -> DVec2 {
        match self.integrator {
            Integrator::ConstantVelocity => self.vel,
            Integrator::ConstantAcceleration | Integrator::Player => self.vel + self.acc * dt,
        }
    }

    /// Where this body will be after one step of length `dt`
    #[inline]
    pub fn predicted_pos(&self, dt: f64) -> DVec2 {
        self.pos + self.step_velocity(dt) * dt
    }

    /// Advance by one step (semi-implicit Euler)
    pub fn integrate(&mut self, dt: f64) {
        self.vel = self.step_velocity(dt);
        self.pos += self.vel * dt;
    }
}

/// Axis-aligned bounding box, `min` is the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    /// Box of `size` centred on `center`
    #[inline]
    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.max.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn top_left(&self) -> DVec2 {
        DVec2::new(self.min.x, self.max.y)
    }

    #[inline]
    pub fn bottom_right(&self) -> DVec2 {
        DVec2::new(self.max.x, self.min.y)
    }

    /// Horizontal extents intersect (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x
    }

    /// Vertical extents intersect (touching edges do not count)
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.min.y < other.max.y && other.min.y < self.max.y
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}
