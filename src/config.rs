//! Simulation tuning
//!
//! Everything the simulation needs to know about the world lives in one
//! immutable [`SimConfig`] handed to [`crate::sim::Game`] at construction.
//! Units are world units (y up, origin at the bottom-left of the screen),
//! seconds, units/s and units/s².

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a [`SimConfig`] is rejected at construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field}: min {min} is greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("scroll band is inverted: begin {begin} must be above stop {stop}")]
    InvertedScrollBand { begin: f64, stop: f64 },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square play area
    pub screen_dimension: f64,

    // === Platforms ===
    pub initial_platform_position: DVec2,
    pub initial_platform_velocity: DVec2,
    /// Zero means platforms drift at constant velocity
    pub platform_acceleration: DVec2,
    pub platform_width: f64,
    pub platform_height: f64,
    /// Horizontal offset between consecutive platforms (inclusive range)
    pub min_platform_delta_width: i32,
    pub max_platform_delta_width: i32,
    /// Vertical offset between consecutive platforms (inclusive range)
    pub min_platform_delta_height: i32,
    pub max_platform_delta_height: i32,

    // === Player ===
    pub player_start_position: DVec2,
    pub player_start_velocity: DVec2,
    /// Gravity
    pub player_acceleration: DVec2,
    pub player_width: f64,
    pub player_height: f64,

    // === Scrolling ===
    /// Start scrolling once the player climbs above this fraction of the screen
    pub scroll_begin_fraction: f64,
    /// Stop scrolling once the player drops to this fraction of the screen
    pub scroll_stop_fraction: f64,
    /// Velocity forced onto every platform while scrolling
    pub scrolling_velocity: DVec2,

    // === Controls ===
    /// Seconds to close the pointer gap: vel.x = (target - x) / scale
    pub pointer_to_velocity_scale: f64,
    pub max_player_x_velocity: f64,
    /// Jump impulse per unit of player height (1/s)
    pub jump_boost_velocity: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_dimension: 800.0,

            initial_platform_position: DVec2::new(400.0, 60.0),
            initial_platform_velocity: DVec2::new(0.0, -20.0),
            platform_acceleration: DVec2::ZERO,
            platform_width: 120.0,
            platform_height: 16.0,
            min_platform_delta_width: 40,
            max_platform_delta_width: 160,
            min_platform_delta_height: 90,
            max_platform_delta_height: 140,

            player_start_position: DVec2::new(400.0, 200.0),
            player_start_velocity: DVec2::ZERO,
            player_acceleration: DVec2::new(0.0, -1500.0),
            player_width: 32.0,
            player_height: 48.0,

            scroll_begin_fraction: 0.7,
            scroll_stop_fraction: 0.4,
            scrolling_velocity: DVec2::new(0.0, -240.0),

            pointer_to_velocity_scale: 0.25,
            max_player_x_velocity: 420.0,
            jump_boost_velocity: 15.0,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every precondition the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vectors = [
            ("initial_platform_position", self.initial_platform_position),
            ("initial_platform_velocity", self.initial_platform_velocity),
            ("platform_acceleration", self.platform_acceleration),
            ("player_start_position", self.player_start_position),
            ("player_start_velocity", self.player_start_velocity),
            ("player_acceleration", self.player_acceleration),
            ("scrolling_velocity", self.scrolling_velocity),
        ];
        for (field, v) in vectors {
            if !v.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        let positives = [
            ("screen_dimension", self.screen_dimension),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("pointer_to_velocity_scale", self.pointer_to_velocity_scale),
            ("max_player_x_velocity", self.max_player_x_velocity),
            ("jump_boost_velocity", self.jump_boost_velocity),
            ("scroll_begin_fraction", self.scroll_begin_fraction),
            ("scroll_stop_fraction", self.scroll_stop_fraction),
        ];
        for (field, value) in positives {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        // Every spawn must climb, otherwise generation never reaches the top
        if self.min_platform_delta_height <= 0 {
            return Err(ConfigError::NotPositive {
                field: "min_platform_delta_height",
                value: self.min_platform_delta_height as f64,
            });
        }
        if self.min_platform_delta_width < 0 {
            return Err(ConfigError::NotPositive {
                field: "min_platform_delta_width",
                value: self.min_platform_delta_width as f64,
            });
        }
        let ranges = [
            (
                "platform_delta_width",
                self.min_platform_delta_width,
                self.max_platform_delta_width,
            ),
            (
                "platform_delta_height",
                self.min_platform_delta_height,
                self.max_platform_delta_height,
            ),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvertedRange {
                    field,
                    min: min as f64,
                    max: max as f64,
                });
            }
        }

        if self.scroll_begin_fraction <= self.scroll_stop_fraction {
            return Err(ConfigError::InvertedScrollBand {
                begin: self.scroll_begin_fraction,
                stop: self.scroll_stop_fraction,
            });
        }

        Ok(())
    }

    /// Player height at which scrolling latches on
    #[inline]
    pub fn scroll_begin_height(&self) -> f64 {
        self.scroll_begin_fraction * self.screen_dimension
    }

    /// Player height at which scrolling releases
    #[inline]
    pub fn scroll_stop_height(&self) -> f64 {
        self.scroll_stop_fraction * self.screen_dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_dimension() {
        let config = SimConfig {
            player_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "player_width",
                value
            }) if value == 0.0
        ));

        let config = SimConfig {
            screen_dimension: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "screen_dimension",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let config = SimConfig {
            min_platform_delta_width: 100,
            max_platform_delta_width: 50,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                field: "platform_delta_width",
                ..
            })
        ));

        let config = SimConfig {
            min_platform_delta_height: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "min_platform_delta_height",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_inverted_scroll_band() {
        let config = SimConfig {
            scroll_begin_fraction: 0.3,
            scroll_stop_fraction: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedScrollBand { begin, stop }) if begin == 0.3 && stop == 0.5
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let config = SimConfig {
            player_acceleration: DVec2::new(0.0, f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "player_acceleration"
            })
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "screen_dimension": 400.0 }"#).unwrap();
        assert_eq!(config.screen_dimension, 400.0);
        assert_eq!(config.player_width, SimConfig::default().player_width);

        let err = SimConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        // The serde_json error stays reachable as the source
        assert!(std::error::Error::source(&err).is_some());
        assert!(SimConfig::from_json(r#"{ "player_height": -1.0 }"#).is_err());
    }
}
