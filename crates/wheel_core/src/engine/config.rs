//! # Spin Configuration
//!
//! Central home for every tuning constant of the wheel.
//!
//! ## Usage
//! ```rust
//! use wheel_core::engine::config::SpinConfig;
//!
//! let config = SpinConfig::default();
//! let quick = SpinConfig::quick();
//! assert!(quick.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WheelError};
use crate::roster::MAX_PARTICIPANTS;

/// How friction is applied between frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrictionModel {
    /// Geometric in frame count: one friction step per `advance()`
    #[default]
    PerFrame,
    /// Geometric in elapsed time: a step of `dt` applies `friction^(dt / reference_frame_ms)`
    TimeScaled { reference_frame_ms: f64 },
}

/// Wheel physics and session timing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    // === Physics ===
    /// Per-frame velocity multiplier (default: 0.991)
    pub friction: f64,
    /// Spin stops once velocity drops below this (rad/frame) (default: 0.002)
    pub min_velocity: f64,
    /// Lower bound of the base launch speed (rad/frame) (default: 0.35)
    pub base_speed_min: f64,
    /// Width of the base launch speed range (default: 0.30)
    pub base_speed_span: f64,
    /// Upper bound of the extra random boost (default: 0.15)
    pub boost_max: f64,
    pub friction_model: FrictionModel,

    // === Timing ===
    /// Forced stop after this long in a single spin (default: 25s)
    pub safety_timeout_ms: u64,
    /// Winner stays on display this long before removal (default: 2.5s)
    pub win_display_delay_ms: u64,
    /// Frame cadence assumed by headless drivers (default: 60Hz)
    pub frame_rate_hz: f64,

    // === Roster ===
    pub max_participants: usize,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            friction: 0.991,
            min_velocity: 0.002,
            base_speed_min: 0.35,
            base_speed_span: 0.30,
            boost_max: 0.15,
            friction_model: FrictionModel::PerFrame,

            safety_timeout_ms: 25_000,
            win_display_delay_ms: 2_500,
            frame_rate_hz: 60.0,

            max_participants: 100,
        }
    }
}

impl SpinConfig {
    /// Long smooth deceleration (default)
    pub fn classic() -> Self {
        Self::default()
    }

    /// Shorter spins for impatient crowds
    pub fn quick() -> Self {
        Self {
            friction: 0.98,
            win_display_delay_ms: 1_500,
            ..Self::default()
        }
    }

    /// Friction scaled by wall-clock time instead of frame count
    pub fn time_scaled() -> Self {
        let mut cfg = Self::default();
        cfg.friction_model = FrictionModel::TimeScaled { reference_frame_ms: 1000.0 / 60.0 };
        cfg
    }

    pub fn safety_timeout(&self) -> Duration {
        Duration::from_millis(self.safety_timeout_ms)
    }

    pub fn win_display_delay(&self) -> Duration {
        Duration::from_millis(self.win_display_delay_ms)
    }

    /// Duration of one frame at `frame_rate_hz`.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate_hz)
    }

    /// Highest launch speed this config can draw.
    pub fn max_launch_speed(&self) -> f64 {
        self.base_speed_min + self.base_speed_span + self.boost_max
    }

    /// Reject parameter sets that would break termination or the roster cap.
    pub fn validate(&self) -> Result<()> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(WheelError::InvalidConfig(format!(
                "friction must be in (0, 1), got {}",
                self.friction
            )));
        }
        if !(self.min_velocity > 0.0 && self.min_velocity.is_finite()) {
            return Err(WheelError::InvalidConfig(format!(
                "min_velocity must be positive, got {}",
                self.min_velocity
            )));
        }
        if !(self.base_speed_min > self.min_velocity) || !self.max_launch_speed().is_finite() {
            return Err(WheelError::InvalidConfig(format!(
                "base_speed_min must exceed min_velocity, got {}",
                self.base_speed_min
            )));
        }
        if self.base_speed_span < 0.0 || self.boost_max < 0.0 {
            return Err(WheelError::InvalidConfig("speed ranges must be non-negative".into()));
        }
        if self.safety_timeout_ms == 0 {
            return Err(WheelError::InvalidConfig("safety_timeout_ms must be non-zero".into()));
        }
        if !(self.frame_rate_hz > 0.0 && self.frame_rate_hz.is_finite()) {
            return Err(WheelError::InvalidConfig(format!(
                "frame_rate_hz must be positive, got {}",
                self.frame_rate_hz
            )));
        }
        if let FrictionModel::TimeScaled { reference_frame_ms } = self.friction_model {
            if !(reference_frame_ms > 0.0 && reference_frame_ms.is_finite()) {
                return Err(WheelError::InvalidConfig(
                    "reference_frame_ms must be positive".into(),
                ));
            }
        }
        if !(2..=MAX_PARTICIPANTS).contains(&self.max_participants) {
            return Err(WheelError::InvalidConfig(format!(
                "max_participants must be in 2..={}, got {}",
                MAX_PARTICIPANTS, self.max_participants
            )));
        }
        Ok(())
    }
}
