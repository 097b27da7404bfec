//! Session orchestration
//!
//! [`Game`] owns the player and the platform stream and advances them one
//! tick at a time: scroll, collide and integrate, spawn, prune, check for game
//! over. Commands from the presentation layer (`move_player`, `jump`, status
//! transitions) apply immediately and never block.

use std::collections::VecDeque;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{CollisionType, determine_collision};
use super::state::{GameEvent, GameStatus, Platform, PlatformSnapshot, Player, PlayerSnapshot};
use crate::config::{ConfigError, SimConfig};

/// One endless-platformer session
#[derive(Debug, Clone)]
pub struct Game<R = Pcg32> {
    config: SimConfig,
    status: GameStatus,
    player: Player,
    /// Front is the oldest (lowest) platform, back the newest (highest)
    platforms: VecDeque<Platform>,
    scrolling: bool,
    /// Running mean x of every platform generated this session
    average_platform_x: f64,
    platforms_generated: u64,
    /// Platform velocity to restore when scrolling stops
    platform_old_velocity: DVec2,
    /// +1 spawns to the right, -1 to the left
    platform_spawn_direction: i32,
    rng: R,
    next_platform_id: u64,
    time_ticks: u64,
    /// Events from the latest tick plus commands issued since
    events: Vec<GameEvent>,
    /// Leading entries of `events` that belong to the tick before last
    stale_events: usize,
}

impl Game<Pcg32> {
    /// Create a session with the deterministic default RNG
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Create a session drawing spawn offsets from `rng`
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut game = Self {
            status: GameStatus::StartScreen,
            player: starting_player(&config),
            platforms: VecDeque::from([first_platform(&config)]),
            scrolling: false,
            average_platform_x: config.initial_platform_position.x,
            platforms_generated: 1,
            platform_old_velocity: config.initial_platform_velocity,
            platform_spawn_direction: 1,
            rng,
            next_platform_id: 1,
            time_ticks: 0,
            events: Vec::new(),
            stale_events: 0,
            config,
        };

        // Fill the screen so the first frame already shows a path upward
        game.generate_new_platforms();
        log::debug!("New session with {} platforms", game.platforms.len());

        Ok(game)
    }

    // === Queries ===

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn player(&self) -> PlayerSnapshot {
        self.player.snapshot()
    }

    /// Platforms oldest first
    pub fn platforms(&self) -> Vec<PlatformSnapshot> {
        self.platforms.iter().map(Platform::snapshot).collect()
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    pub fn score(&self) -> u32 {
        self.player.score()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn average_platform_x(&self) -> f64 {
        self.average_platform_x
    }

    pub fn platform_spawn_direction(&self) -> i32 {
        self.platform_spawn_direction
    }

    /// Simulated ticks since the session was created
    pub fn ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Take the events queued since the last call.
    ///
    /// Undrained events are discarded one tick later, so callers that never
    /// drain keep at most a single tick's worth queued.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.stale_events = 0;
        std::mem::take(&mut self.events)
    }

    // === Status transitions ===

    pub fn start(&mut self) {
        if self.status == GameStatus::StartScreen {
            log::info!("Game started");
            self.status = GameStatus::InProgress;
        } else {
            log::debug!("Ignoring start in {:?}", self.status);
        }
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::InProgress {
            log::info!("Game paused");
            self.status = GameStatus::Paused;
        } else {
            log::debug!("Ignoring pause in {:?}", self.status);
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            log::info!("Game resumed");
            self.status = GameStatus::InProgress;
        } else {
            log::debug!("Ignoring resume in {:?}", self.status);
        }
    }

    /// Pause if running, resume if paused
    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::InProgress => self.pause(),
            GameStatus::Paused => self.resume(),
            _ => log::debug!("Ignoring pause toggle in {:?}", self.status),
        }
    }

    /// Throw the session away and start over on the start screen.
    ///
    /// The config is kept and the RNG keeps running, so the next layout differs.
    pub fn reset(&mut self) {
        log::info!("Game reset (final score {})", self.player.score());

        self.player = starting_player(&self.config);
        self.platforms.clear();
        self.platforms.push_back(first_platform(&self.config));
        self.status = GameStatus::StartScreen;
        self.scrolling = false;
        self.average_platform_x = self.config.initial_platform_position.x;
        self.platforms_generated = 1;
        self.platform_old_velocity = self.config.initial_platform_velocity;
        self.platform_spawn_direction = 1;
        self.next_platform_id = 1;
        self.time_ticks = 0;
        self.events.clear();
        self.stale_events = 0;

        self.generate_new_platforms();
    }

    // === Player commands ===

    /// Steer toward `target_x`
    pub fn move_player(&mut self, target_x: f64) {
        if self.status != GameStatus::InProgress {
            return;
        }
        self.player.body.vel.x = self.pointer_velocity(target_x);
    }

    /// Jump while steering toward `target_x`.
    ///
    /// Returns false, changing nothing, if the player is still airborne from
    /// a previous jump or the game is not running.
    pub fn jump(&mut self, target_x: f64) -> bool {
        if self.status != GameStatus::InProgress || self.player.jumping {
            return false;
        }

        self.player.jumping = true;
        let vel_x = self.pointer_velocity(target_x);
        let boost = self.config.jump_boost_velocity * self.player.height;
        self.player.body.vel = DVec2::new(vel_x, self.player.body.vel.y + boost);
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Horizontal velocity proportional to the pointer gap, clamped by magnitude
    fn pointer_velocity(&self, target_x: f64) -> f64 {
        let vel_x = (target_x - self.player.pos().x) / self.config.pointer_to_velocity_scale;
        let max = self.config.max_player_x_velocity;
        if vel_x.abs() > max {
            max.copysign(vel_x)
        } else {
            vel_x
        }
    }

    // === Simulation ===

    /// Advance the session by `dt` seconds. Does nothing unless in progress.
    pub fn tick(&mut self, dt: f64) {
        if self.status != GameStatus::InProgress {
            return;
        }

        // Keep commands issued since the last tick, drop the previous tick's events
        self.events.drain(..self.stale_events);

        self.time_ticks += 1;
        self.scroll_screen_down();
        self.collide_player_with_platforms(dt);
        self.generate_new_platforms();
        self.remove_old_platforms();
        self.check_game_over();
        self.stale_events = self.events.len();

        log::trace!(
            "tick {}: player {:?} vel {:?}, {} platforms",
            self.time_ticks,
            self.player.pos(),
            self.player.vel(),
            self.platforms.len()
        );
    }

    /// Latch scrolling on above the upper threshold, off at or below the lower one
    pub(crate) fn scroll_screen_down(&mut self) {
        let y = self.player.pos().y;

        if !self.scrolling {
            if y > self.config.scroll_begin_height() {
                if let Some(newest) = self.platforms.back() {
                    self.platform_old_velocity = newest.vel();
                }
                let scroll_vel = self.config.scrolling_velocity;
                for platform in &mut self.platforms {
                    platform.body.vel = scroll_vel;
                }
                self.scrolling = true;
                self.events.push(GameEvent::ScrollStarted);
                log::debug!("Scrolling started at y={y:.1}");
            }
        } else if y <= self.config.scroll_stop_height() {
            let old_vel = self.platform_old_velocity;
            for platform in &mut self.platforms {
                platform.body.vel = old_vel;
            }
            self.scrolling = false;
            self.events.push(GameEvent::ScrollStopped);
            log::debug!("Scrolling stopped at y={y:.1}");
        }
    }

    /// Resolve contacts against every platform using pre-step positions, then
    /// integrate the platforms and finally the player.
    pub(crate) fn collide_player_with_platforms(&mut self, dt: f64) {
        let player = &mut self.player;
        let was_on_ground = player.on_ground;
        player.on_ground = false;

        for platform in &mut self.platforms {
            match determine_collision(player, platform, dt) {
                CollisionType::NoCollision => {}
                CollisionType::PlayerOnPlatform => {
                    if !was_on_ground && !player.on_ground {
                        self.events.push(GameEvent::Landed {
                            platform_id: platform.id,
                        });
                    }
                    player.jumping = false;
                    player.on_ground = true;
                    player.body.pos.y = platform.bounds().top() + player.height / 2.0;
                    player.body.vel.y = platform.vel().y;
                    if platform.mark_visited() {
                        player.increment_score();
                        self.events.push(GameEvent::Scored {
                            platform_id: platform.id,
                            score: player.score(),
                        });
                        log::debug!("Score {} on platform {}", player.score(), platform.id);
                    }
                }
                CollisionType::PlayerUnderPlatform => {
                    player.body.pos.y = platform.bounds().bottom() - player.height / 2.0;
                    player.body.vel.y = -player.body.vel.y;
                    self.events.push(GameEvent::Bumped {
                        platform_id: platform.id,
                    });
                }
                CollisionType::PlayerOnLeftOfPlatform => {
                    player.body.pos.x = platform.bounds().left() - player.width / 2.0;
                    player.body.vel.x = 0.0;
                    self.events.push(GameEvent::Bumped {
                        platform_id: platform.id,
                    });
                }
                CollisionType::PlayerOnRightOfPlatform => {
                    player.body.pos.x = platform.bounds().right() + player.width / 2.0;
                    player.body.vel.x = 0.0;
                    self.events.push(GameEvent::Bumped {
                        platform_id: platform.id,
                    });
                }
            }
        }

        for platform in &mut self.platforms {
            platform.update_state(dt);
        }
        self.player.update_state(dt);
    }

    /// Stack platforms upward until the newest one clears the top of the screen
    pub(crate) fn generate_new_platforms(&mut self) {
        let screen = self.config.screen_dimension;
        let center = screen / 2.0;

        loop {
            let Some(newest) = self.platforms.back() else {
                return;
            };
            if newest.bounds().bottom() >= screen {
                return;
            }

            let delta_height = self.rng.random_range(
                self.config.min_platform_delta_height..=self.config.max_platform_delta_height,
            );
            let delta_width = self.rng.random_range(
                self.config.min_platform_delta_width..=self.config.max_platform_delta_width,
            );
            // Lean back toward the centre of the screen
            self.platform_spawn_direction = if self.average_platform_x < center {
                1
            } else {
                -1
            };

            let offset = DVec2::new(
                f64::from(self.platform_spawn_direction * delta_width),
                f64::from(delta_height),
            );
            let mut platform = Platform::new(
                self.next_platform_id,
                newest.pos() + offset,
                newest.vel(),
                newest.body.acc,
                self.config.platform_width,
                self.config.platform_height,
            );
            platform.body.integrator = newest.body.integrator;
            self.next_platform_id += 1;

            let n = self.platforms_generated as f64;
            self.average_platform_x = (self.average_platform_x * n + platform.pos().x) / (n + 1.0);
            self.platforms_generated += 1;

            log::debug!(
                "Spawned platform {} at {:?} (avg x {:.1})",
                platform.id,
                platform.pos(),
                self.average_platform_x
            );
            self.platforms.push_back(platform);
        }
    }

    /// Drop platforms that have fallen entirely below the screen, keeping at least one
    pub(crate) fn remove_old_platforms(&mut self) {
        while self.platforms.len() > 1 {
            let Some(oldest) = self.platforms.front() else {
                break;
            };
            if oldest.bounds().top() > 0.0 {
                break;
            }
            log::debug!("Pruned platform {}", oldest.id);
            self.platforms.pop_front();
        }
    }

    /// The run ends once the whole player box is below the screen
    pub(crate) fn check_game_over(&mut self) {
        if self.player.bounds().top() <= 0.0 {
            self.status = GameStatus::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.player.score(),
            });
            log::info!(
                "Game over after {} ticks, score {}",
                self.time_ticks,
                self.player.score()
            );
        }
    }
}

fn starting_player(config: &SimConfig) -> Player {
    Player::new(
        config.player_start_position,
        config.player_start_velocity,
        config.player_acceleration,
        config.player_width,
        config.player_height,
    )
}

fn first_platform(config: &SimConfig) -> Platform {
    Platform::new(
        0,
        config.initial_platform_position,
        config.initial_platform_velocity,
        config.platform_acceleration,
        config.platform_width,
        config.platform_height,
    )
}
