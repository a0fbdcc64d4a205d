//! Headless frame driver
//!
//! Runs a [`WheelSession`] against a [`ManualClock`] that advances one frame
//! per step, so complete spins can be simulated deterministically without a
//! display loop. Used by the JSON API, the fairness calibration and the CLI.

use std::time::Duration;

use crate::engine::clock::{Clock, ManualClock};
use crate::engine::config::SpinConfig;
use crate::error::{Result, WheelError};
use crate::session::{WheelSession, Winner};

/// Everything observed during one headless spin
#[derive(Debug, Clone)]
pub struct SpinReport {
    pub winner: Winner,
    pub launch_velocity: f64,
    pub frames: u64,
    pub ticks: u32,
    /// Accumulated angle per frame (empty unless recording)
    pub angle_trace: Vec<f64>,
    /// Simulated time from launch to stop
    pub elapsed: Duration,
    /// Whether the winner left the roster after the display delay
    pub removed: bool,
}

pub struct HeadlessRunner {
    session: WheelSession<ManualClock>,
    clock: ManualClock,
    record_frames: bool,
}

impl HeadlessRunner {
    pub fn new(config: SpinConfig, seed: u64) -> Result<Self> {
        let clock = ManualClock::new();
        let session = WheelSession::seeded(config, clock.clone(), seed)?;
        Ok(Self { session, clock, record_frames: false })
    }

    /// Build a runner and load the roster in order.
    pub fn with_participants<I, S>(config: SpinConfig, seed: u64, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut runner = Self::new(config, seed)?;
        for name in names {
            runner.session.add_participant(name.as_ref())?;
        }
        Ok(runner)
    }

    /// Record the per-frame angle trace in each report.
    pub fn recording(mut self, record_frames: bool) -> Self {
        self.record_frames = record_frames;
        self
    }

    pub fn session(&self) -> &WheelSession<ManualClock> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut WheelSession<ManualClock> {
        &mut self.session
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Spin once, drive frames until a winner, then let the display delay run out.
    pub fn spin_once(&mut self) -> Result<SpinReport> {
        let launch_velocity = self.session.spin()?;
        let frame = self.session.config().frame_duration();
        let started = self.clock.now();

        let mut ticks = 0u32;
        let mut angle_trace = Vec::new();
        let winner = loop {
            // Watchdog bounds this loop: the clock advances every iteration.
            self.clock.advance(frame);
            let step = self.session.frame();
            if step.step.tick().is_some() {
                ticks += 1;
            }
            if self.record_frames {
                if let Some(data) = step.step.frame() {
                    angle_trace.push(data.angle);
                }
            }
            if step.step.is_stopped() {
                match step.winner {
                    Some(winner) => break winner,
                    None => return Err(WheelError::NoParticipants),
                }
            }
        };
        let elapsed = self.clock.now().saturating_sub(started);

        let removed = if winner.forced {
            false
        } else {
            self.clock.advance(self.session.config().win_display_delay());
            self.session.poll().is_some()
        };

        Ok(SpinReport {
            frames: winner.outcome.frames,
            winner,
            launch_velocity,
            ticks,
            angle_trace,
            elapsed,
            removed,
        })
    }

    /// Keep spinning until one participant is left. Returns winners in order.
    pub fn draw_all(&mut self) -> Result<Vec<SpinReport>> {
        let mut reports = Vec::new();
        while self.session.can_spin() {
            let report = self.spin_once()?;
            if !report.removed {
                // Forced stops leave the winner in place; take them out so the draw advances.
                self.session.remove_participant(&report.winner.name)?;
            }
            reports.push(report);
        }
        Ok(reports)
    }
}
