//! Idle/demo mode controller
//!
//! Plays the game through the same pointer commands a human would use: steer
//! toward the next platform up and jump whenever standing on something.

use rand::Rng;

use crate::sim::{Game, GameStatus, PlatformSnapshot};

/// Stateless except for the platform currently being aimed at
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    target_platform: Option<u64>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform currently being aimed at
    pub fn target(&self) -> Option<u64> {
        self.target_platform
    }

    /// Issue this frame's commands. Returns true if a jump was accepted.
    pub fn drive<R: Rng>(&mut self, game: &mut Game<R>) -> bool {
        if game.status() != GameStatus::InProgress {
            return false;
        }

        let player = game.player();
        let platforms = game.platforms();

        // Lowest platform whose top is above the player's feet
        let feet = player.position.y - player.height / 2.0;
        let next_up = platforms
            .iter()
            .filter(|p| p.position.y + p.height / 2.0 > feet + 1.0)
            .min_by(|a, b| {
                a.position
                    .y
                    .partial_cmp(&b.position.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(target) = next_up.or_else(|| platforms.last()) else {
            return false;
        };
        if self.target_platform != Some(target.id) {
            log::debug!("Autopilot aiming at platform {}", target.id);
            self.target_platform = Some(target.id);
        }

        let aim_x = aim_point(target, player.position.x);
        if player.on_ground {
            game.jump(aim_x)
        } else {
            game.move_player(aim_x);
            false
        }
    }
}

/// Aim slightly inside the near edge so the player does not overshoot
fn aim_point(target: &PlatformSnapshot, from_x: f64) -> f64 {
    let inset = target.width / 4.0;
    if from_x < target.position.x {
        target.position.x - inset
    } else {
        target.position.x + inset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimConfig;
    use crate::consts::SIM_DT;

    #[test]
    fn test_idle_before_start() {
        let mut game = Game::new(SimConfig::default(), 11).unwrap();
        let mut pilot = Autopilot::new();
        assert!(!pilot.drive(&mut game));
        assert_eq!(pilot.target(), None);
    }

    #[test]
    fn test_climbs_and_scores() {
        let mut game = Game::new(SimConfig::default(), 11).unwrap();
        game.start();
        let mut pilot = Autopilot::new();

        let mut jumps = 0;
        for _ in 0..600 {
            if pilot.drive(&mut game) {
                jumps += 1;
            }
            game.tick(SIM_DT);
            if game.status() == GameStatus::GameOver {
                break;
            }
        }

        assert!(jumps > 0);
        assert!(pilot.target().is_some());
        // Landing on the starting platform alone is worth a point
        assert!(game.score() >= 1);
    }

    #[test]
    fn test_aim_point_inside_near_edge() {
        let target = PlatformSnapshot {
            id: 3,
            position: glam::DVec2::new(400.0, 300.0),
            width: 120.0,
            height: 16.0,
            visited: false,
        };
        assert_eq!(aim_point(&target, 100.0), 370.0);
        assert_eq!(aim_point(&target, 700.0), 430.0);
    }
}
