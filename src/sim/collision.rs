//! Player vs platform contact classification
//!
//! Both boxes are projected one step ahead. If the projections overlap, the
//! pre-step boxes tell us which face was crossed. Side contacts are reported
//! only when the player was already level with the platform; anything else,
//! including diagonal approaches onto a corner, resolves vertically so a
//! falling player lands instead of being shoved sideways.

use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::state::{Platform, Player};

/// Which face of a platform the player is about to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    NoCollision,
    PlayerOnPlatform,
    PlayerUnderPlatform,
    PlayerOnLeftOfPlatform,
    PlayerOnRightOfPlatform,
}

impl CollisionType {
    /// Top or bottom face
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            CollisionType::PlayerOnPlatform | CollisionType::PlayerUnderPlatform
        )
    }

    /// Left or right face
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            CollisionType::PlayerOnLeftOfPlatform | CollisionType::PlayerOnRightOfPlatform
        )
    }
}

/// Classify the contact between `player` and `platform` over the next `dt`
pub fn determine_collision(player: &Player, platform: &Platform, dt: f64) -> CollisionType {
    let player_next = Aabb::from_center(player.body.predicted_pos(dt), player.size());
    let platform_next = Aabb::from_center(platform.body.predicted_pos(dt), platform.size());

    if !player_next.overlaps(&platform_next) {
        return CollisionType::NoCollision;
    }

    let player_now = player.bounds();
    let platform_now = platform.bounds();

    let side_entry = player_now.overlaps_y(&platform_now) && !player_now.overlaps_x(&platform_now);

    if side_entry {
        if player.pos().x < platform.pos().x {
            CollisionType::PlayerOnLeftOfPlatform
        } else {
            CollisionType::PlayerOnRightOfPlatform
        }
    } else if player.pos().y >= platform.pos().y {
        CollisionType::PlayerOnPlatform
    } else {
        CollisionType::PlayerUnderPlatform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    const DT: f64 = 1.0 / 60.0;

    fn player_at(pos: DVec2, vel: DVec2) -> Player {
        Player::new(pos, vel, DVec2::ZERO, 40.0, 90.0)
    }

    fn platform_at(pos: DVec2) -> Platform {
        Platform::new(0, pos, DVec2::ZERO, DVec2::ZERO, 50.0, 10.0)
    }

    #[test]
    fn test_falling_onto_platform() {
        // Player bottom edge rests exactly on the platform top and is falling
        let player = player_at(DVec2::new(100.0, 50.0), DVec2::new(0.0, -60.0));
        let platform = platform_at(DVec2::new(100.0, 0.0));
        assert_eq!(
            determine_collision(&player, &platform, DT),
            CollisionType::PlayerOnPlatform
        );
    }

    #[test]
    fn test_far_apart_is_no_collision() {
        let player = player_at(DVec2::new(100.0, 400.0), DVec2::new(0.0, -60.0));
        let platform = platform_at(DVec2::new(100.0, 0.0));
        assert_eq!(
            determine_collision(&player, &platform, DT),
            CollisionType::NoCollision
        );
    }

    #[test]
    fn test_rising_into_underside() {
        // Player top edge just below the platform bottom, jumping up
        let player = player_at(DVec2::new(100.0, -50.0), DVec2::new(0.0, 300.0));
        let platform = platform_at(DVec2::new(100.0, 0.0));
        assert_eq!(
            determine_collision(&player, &platform, DT),
            CollisionType::PlayerUnderPlatform
        );
    }

    #[test]
    fn test_side_hits() {
        let platform = platform_at(DVec2::new(100.0, 0.0));

        // Level with the platform, approaching from the left
        let player = player_at(DVec2::new(54.0, 0.0), DVec2::new(120.0, 0.0));
        assert_eq!(
            determine_collision(&player, &platform, DT),
            CollisionType::PlayerOnLeftOfPlatform
        );

        // And from the right
        let player = player_at(DVec2::new(146.0, 0.0), DVec2::new(-120.0, 0.0));
        assert_eq!(
            determine_collision(&player, &platform, DT),
            CollisionType::PlayerOnRightOfPlatform
        );
    }

    #[test]
    fn test_corner_prefers_vertical() {
        // Diagonally above-left, moving down-right into the top-left corner
        let platform = platform_at(DVec2::new(100.0, 0.0));
        let player = player_at(DVec2::new(55.0, 50.5), DVec2::new(120.0, -120.0));
        let hit = determine_collision(&player, &platform, DT);
        assert_eq!(hit, CollisionType::PlayerOnPlatform);
        assert!(hit.is_vertical());
    }

    #[test]
    fn test_resting_player_sunk_slightly_still_lands() {
        // After a landing step gravity sinks the player a little into the top
        let platform = platform_at(DVec2::new(100.0, 0.0));
        let mut player = player_at(DVec2::new(100.0, 49.6), DVec2::new(0.0, -25.0));
        player.body.acc = DVec2::new(0.0, -1500.0);
        assert_eq!(
            determine_collision(&player, &platform, DT),
            CollisionType::PlayerOnPlatform
        );
    }

    #[test]
    fn test_moving_platform_is_predicted() {
        // Platform rising into a stationary player above it
        let player = player_at(DVec2::new(100.0, 50.0), DVec2::ZERO);
        let mut platform = platform_at(DVec2::new(100.0, 0.0));
        platform.body.vel = DVec2::new(0.0, 60.0);
        assert_eq!(
            determine_collision(&player, &platform, DT),
            CollisionType::PlayerOnPlatform
        );

        platform.body.vel = DVec2::new(0.0, -60.0);
        assert_eq!(
            determine_collision(&player, &platform, DT),
            CollisionType::NoCollision
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn classification_is_deterministic_and_consistent(
                px in -200.0f64..200.0,
                py in -200.0f64..200.0,
                vx in -600.0f64..600.0,
                vy in -600.0f64..600.0,
            ) {
                let player = player_at(DVec2::new(px, py), DVec2::new(vx, vy));
                let platform = platform_at(DVec2::ZERO);

                let first = determine_collision(&player, &platform, DT);
                let second = determine_collision(&player, &platform, DT);
                prop_assert_eq!(first, second);

                // Exactly one of: none, vertical, horizontal
                let kinds = [
                    first == CollisionType::NoCollision,
                    first.is_vertical(),
                    first.is_horizontal(),
                ];
                prop_assert_eq!(kinds.iter().filter(|k| **k).count(), 1);

                let player_next = Aabb::from_center(player.body.predicted_pos(DT), player.size());
                let platform_next = Aabb::from_center(platform.body.predicted_pos(DT), platform.size());
                prop_assert_eq!(
                    first == CollisionType::NoCollision,
                    !player_next.overlaps(&platform_next)
                );
            }
        }
    }
}
