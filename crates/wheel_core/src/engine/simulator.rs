//! Spin Simulator
//!
//! Owns the wheel's rotational state and evolves it one frame at a time under
//! exponential friction until the velocity falls below the stop threshold.
//!
//! ```text
//! Idle ──start()──▶ Spinning ──velocity < min──▶ Idle (Settled)
//!                      │
//!                      └──watchdog due──▶ ForcedStop ──▶ Idle (SafetyTimeout)
//! ```
//!
//! The host drives it cooperatively: one `advance()` per display frame, each
//! call fully updating state before returning.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::angle::{normalize_angle, segment_index};
use super::clock::Clock;
use super::config::{FrictionModel, SpinConfig};
use super::events::{FrameData, SegmentTick, SpinOutcome, StepResult, StopReason};
use super::resolver::{resolve, Resolution};
use super::watchdog::SafetyWatchdog;
use crate::error::{Result, WheelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
}

pub struct SpinSimulator<C: Clock> {
    config: SpinConfig,
    clock: C,
    rng: ChaCha8Rng,
    phase: SpinPhase,
    /// Accumulated angle (unbounded while spinning, normalized when idle)
    angle: f64,
    /// rad/frame
    velocity: f64,
    /// Frozen at spin start
    participant_count: usize,
    /// Normalized angle at the last emitted tick
    last_tick_angle: f64,
    frames: u64,
    watchdog: SafetyWatchdog,
    last_outcome: Option<SpinOutcome>,
}

impl<C: Clock> SpinSimulator<C> {
    /// Create a simulator seeded from OS entropy.
    pub fn new(config: SpinConfig, clock: C) -> Result<Self> {
        Self::with_rng(config, clock, ChaCha8Rng::from_entropy())
    }

    /// Create a deterministic simulator (same seed = same spins).
    pub fn seeded(config: SpinConfig, clock: C, seed: u64) -> Result<Self> {
        Self::with_rng(config, clock, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: SpinConfig, clock: C, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            rng,
            phase: SpinPhase::Idle,
            angle: 0.0,
            velocity: 0.0,
            participant_count: 0,
            last_tick_angle: 0.0,
            frames: 0,
            watchdog: SafetyWatchdog::new(),
            last_outcome: None,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    /// Current accumulated angle, as the renderer should draw it.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn normalized_angle(&self) -> f64 {
        normalize_angle(self.angle)
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    /// Time left before the safety watchdog forces a stop.
    pub fn watchdog_remaining(&self) -> Option<Duration> {
        self.watchdog.remaining(self.clock.now())
    }

    // =========================================================================
    // Control
    // =========================================================================

    /// Begin a spin with a random launch velocity.
    ///
    /// Returns the drawn velocity. Fails without touching state when already
    /// spinning or with fewer than two participants.
    pub fn start(&mut self, participant_count: usize) -> Result<f64> {
        self.check_can_start(participant_count)?;
        let base =
            self.config.base_speed_min + self.rng.gen::<f64>() * self.config.base_speed_span;
        let boost = self.rng.gen::<f64>() * self.config.boost_max;
        let velocity = base + boost;
        self.launch(participant_count, velocity);
        Ok(velocity)
    }

    /// Begin a spin with an explicit launch velocity (replays, tests).
    pub fn start_with_velocity(&mut self, participant_count: usize, velocity: f64) -> Result<f64> {
        self.check_can_start(participant_count)?;
        if !(velocity.is_finite() && velocity > 0.0) {
            return Err(WheelError::InvalidVelocity(velocity));
        }
        self.launch(participant_count, velocity);
        Ok(velocity)
    }

    fn check_can_start(&self, participant_count: usize) -> Result<()> {
        if self.is_spinning() {
            return Err(WheelError::SpinInProgress);
        }
        if participant_count <= 1 {
            return Err(WheelError::NotEnoughParticipants { count: participant_count });
        }
        Ok(())
    }

    fn launch(&mut self, participant_count: usize, velocity: f64) {
        self.phase = SpinPhase::Spinning;
        self.participant_count = participant_count;
        self.velocity = velocity;
        self.frames = 0;
        self.last_outcome = None;
        self.last_tick_angle = normalize_angle(self.angle);
        self.watchdog.arm(self.clock.now(), self.config.safety_timeout());

        log::info!(
            "Spin started: {} participants, launch velocity {:.4} rad/frame",
            participant_count,
            velocity
        );
    }

    /// Advance one display frame of `frame_rate_hz`.
    ///
    /// Under [`FrictionModel::TimeScaled`] the frame is converted into
    /// reference frames, so the same spin decays by elapsed time.
    pub fn advance(&mut self) -> StepResult {
        let frame_ms = 1000.0 / self.config.frame_rate_hz;
        let steps = self.reference_steps(frame_ms);
        self.step(steps)
    }

    /// Advance by elapsed time `dt`.
    ///
    /// Under [`FrictionModel::TimeScaled`] friction and displacement are both
    /// scaled by `dt / reference_frame_ms`. [`FrictionModel::PerFrame`] decays
    /// by frame count, so each call is exactly one frame whatever `dt` is.
    pub fn advance_by(&mut self, dt: Duration) -> StepResult {
        let steps = self.reference_steps(dt.as_secs_f64() * 1000.0);
        self.step(steps)
    }

    fn reference_steps(&self, elapsed_ms: f64) -> f64 {
        match self.config.friction_model {
            FrictionModel::PerFrame => 1.0,
            FrictionModel::TimeScaled { reference_frame_ms } => elapsed_ms / reference_frame_ms,
        }
    }

    fn step(&mut self, steps: f64) -> StepResult {
        if !self.is_spinning() {
            return StepResult::Idle;
        }

        if self.watchdog.is_due(self.clock.now()) {
            let outcome = self.finish(StopReason::SafetyTimeout);
            return StepResult::Stopped { frame: None, outcome };
        }

        if steps == 1.0 {
            self.velocity *= self.config.friction;
            self.angle += self.velocity;
        } else {
            self.velocity *= self.config.friction.powf(steps);
            self.angle += self.velocity * steps;
        }
        self.frames += 1;

        let frame = FrameData {
            frame: self.frames,
            angle: self.angle,
            velocity: self.velocity,
            tick: self.detect_tick(),
        };

        if self.velocity < self.config.min_velocity {
            let outcome = self.finish(StopReason::Settled);
            StepResult::Stopped { frame: Some(frame), outcome }
        } else {
            StepResult::Frame(frame)
        }
    }

    /// Fire the safety watchdog if it is due. Hosts with their own timers can
    /// call this between frames; `advance()` checks it as well.
    pub fn check_watchdog(&mut self) -> Option<SpinOutcome> {
        if self.is_spinning() && self.watchdog.is_due(self.clock.now()) {
            Some(self.finish(StopReason::SafetyTimeout))
        } else {
            None
        }
    }

    /// Return to a resting wheel at angle 0, abandoning any spin in progress.
    pub fn reset(&mut self) {
        self.phase = SpinPhase::Idle;
        self.angle = 0.0;
        self.velocity = 0.0;
        self.participant_count = 0;
        self.last_tick_angle = 0.0;
        self.frames = 0;
        self.watchdog.cancel();
        self.last_outcome = None;
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// One tick per frame whose segment differs from the last ticked one.
    fn detect_tick(&mut self) -> Option<SegmentTick> {
        let n = self.participant_count;
        if n <= 1 {
            return None;
        }
        let normalized = normalize_angle(self.angle);
        let segment = segment_index(normalized, n);
        let previous = segment_index(self.last_tick_angle, n);
        if segment == previous {
            return None;
        }
        self.last_tick_angle = normalized;
        log::trace!("tick: segment {} -> {}", previous, segment);
        Some(SegmentTick { segment, previous })
    }

    fn finish(&mut self, reason: StopReason) -> SpinOutcome {
        self.phase = SpinPhase::Idle;
        self.velocity = 0.0;
        self.angle = normalize_angle(self.angle);
        self.watchdog.cancel();

        let resolution = resolve(self.angle, self.participant_count)
            .unwrap_or_else(|_| Resolution::fallback(self.angle));

        match reason {
            StopReason::Settled => log::info!(
                "Spin settled after {} frames at {:.4} rad -> index {}",
                self.frames,
                self.angle,
                resolution.index
            ),
            StopReason::SafetyTimeout => log::warn!(
                "Spin safety timeout after {} frames at {:.4} rad -> index {}",
                self.frames,
                self.angle,
                resolution.index
            ),
        }

        let outcome = SpinOutcome {
            final_angle: self.angle,
            resolution,
            stop_reason: reason,
            frames: self.frames,
        };
        self.last_outcome = Some(outcome);
        outcome
    }
}
