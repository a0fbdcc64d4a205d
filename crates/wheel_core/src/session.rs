//! Wheel Session
//!
//! Control surface tying the roster to the simulator. Hosts call `frame()`
//! once per display frame and route roster edits and spin requests through
//! the session, which refuses edits while the wheel is moving or a winner is
//! on display so the segment mapping can never shift mid-spin.

use std::time::Duration;

use crate::engine::angle::segment_bounds;
use crate::engine::clock::Clock;
use crate::engine::config::SpinConfig;
use crate::engine::events::{dispatch, SpinListener, SpinOutcome, StepResult};
use crate::engine::resolver::ResolutionAnomaly;
use crate::engine::simulator::SpinSimulator;
use crate::error::{Result, WheelError};
use crate::roster::{Roster, VIBRANT_COLORS};

// ============================================
// Session types
// ============================================

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Wheel at rest, roster editable
    Idle,
    /// Spin in progress
    Spinning,
    /// Winner on display, waiting for timed removal
    Announcing,
}

/// Resolved winner of a spin
#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub name: String,
    pub index: usize,
    /// Stopped by the safety watchdog rather than by friction
    pub forced: bool,
    pub anomaly: Option<ResolutionAnomaly>,
    pub outcome: SpinOutcome,
}

/// What happened during one `frame()` call
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStep {
    pub step: StepResult,
    /// Set on the call where the spin ended
    pub winner: Option<Winner>,
    /// Set on the call where the previous winner left the roster
    pub removed: Option<String>,
}

/// Which host controls should accept input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub spin: bool,
    pub add: bool,
    pub clear: bool,
}

/// One wheel segment as the renderer should draw it this frame
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentView {
    pub index: usize,
    pub name: String,
    pub color: &'static str,
    /// Screen-frame angles (rotation applied)
    pub start_angle: f64,
    pub end_angle: f64,
}

#[derive(Debug, Clone)]
struct PendingRemoval {
    name: String,
    due: Duration,
}

// ============================================
// WheelSession
// ============================================

pub struct WheelSession<C: Clock> {
    roster: Roster,
    sim: SpinSimulator<C>,
    state: SessionState,
    pending: Option<PendingRemoval>,
    last_winner: Option<Winner>,
    listener: Option<Box<dyn SpinListener>>,
}

impl<C: Clock> WheelSession<C> {
    /// Create a session with an entropy-seeded simulator.
    pub fn new(config: SpinConfig, clock: C) -> Result<Self> {
        let roster = Roster::with_capacity_limit(config.max_participants);
        Ok(Self::from_parts(roster, SpinSimulator::new(config, clock)?))
    }

    /// Create a deterministic session.
    pub fn seeded(config: SpinConfig, clock: C, seed: u64) -> Result<Self> {
        let roster = Roster::with_capacity_limit(config.max_participants);
        Ok(Self::from_parts(roster, SpinSimulator::seeded(config, clock, seed)?))
    }

    fn from_parts(roster: Roster, sim: SpinSimulator<C>) -> Self {
        Self {
            roster,
            sim,
            state: SessionState::Idle,
            pending: None,
            last_winner: None,
            listener: None,
        }
    }

    /// Subscribe a presentation layer to frame/tick/stop notifications.
    pub fn set_listener(&mut self, listener: Box<dyn SpinListener>) {
        self.listener = Some(listener);
    }

    pub fn take_listener(&mut self) -> Option<Box<dyn SpinListener>> {
        self.listener.take()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn simulator(&self) -> &SpinSimulator<C> {
        &self.sim
    }

    pub fn config(&self) -> &SpinConfig {
        self.sim.config()
    }

    pub fn angle(&self) -> f64 {
        self.sim.angle()
    }

    /// Winner of the most recent spin, until the next spin, add, or clear.
    pub fn last_winner(&self) -> Option<&Winner> {
        self.last_winner.as_ref()
    }

    pub fn can_spin(&self) -> bool {
        self.state == SessionState::Idle && self.roster.len() > 1
    }

    pub fn controls(&self) -> ControlState {
        if self.state != SessionState::Idle {
            return ControlState { spin: false, add: false, clear: false };
        }
        ControlState { spin: self.roster.len() > 1, add: true, clear: !self.roster.is_empty() }
    }

    /// Segments rotated by the current wheel angle.
    pub fn layout(&self) -> Vec<SegmentView> {
        let count = self.roster.len();
        let rotation = self.sim.angle();
        self.roster
            .names()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let (start_angle, end_angle) = segment_bounds(index, count, rotation);
                SegmentView {
                    index,
                    name: name.clone(),
                    color: self.roster.color_at(index).unwrap_or(VIBRANT_COLORS[0]),
                    start_angle,
                    end_angle,
                }
            })
            .collect()
    }

    // =========================================================================
    // Roster commands
    // =========================================================================

    fn ensure_editable(&self) -> Result<()> {
        if self.state == SessionState::Idle {
            Ok(())
        } else {
            Err(WheelError::SpinInProgress)
        }
    }

    pub fn add_participant(&mut self, name: &str) -> Result<String> {
        self.ensure_editable()?;
        let stored = self.roster.add(name)?.to_string();
        self.last_winner = None;
        Ok(stored)
    }

    pub fn remove_participant(&mut self, name: &str) -> Result<bool> {
        self.ensure_editable()?;
        Ok(self.roster.remove(name))
    }

    /// Empty the roster and return the wheel to angle 0.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.roster.clear();
        self.sim.reset();
        self.last_winner = None;
        Ok(())
    }

    // =========================================================================
    // Spin control
    // =========================================================================

    /// Start a spin over the current roster. Returns the launch velocity.
    pub fn spin(&mut self) -> Result<f64> {
        self.ensure_editable()?;
        let velocity = self.sim.start(self.roster.len())?;
        self.on_spin_started();
        Ok(velocity)
    }

    /// Start a spin with a fixed launch velocity.
    pub fn spin_with_velocity(&mut self, velocity: f64) -> Result<f64> {
        self.ensure_editable()?;
        let velocity = self.sim.start_with_velocity(self.roster.len(), velocity)?;
        self.on_spin_started();
        Ok(velocity)
    }

    fn on_spin_started(&mut self) {
        self.state = SessionState::Spinning;
        self.last_winner = None;
    }

    /// Drive one display frame.
    pub fn frame(&mut self) -> SessionStep {
        let removed = self.poll();
        let step = self.sim.advance();
        self.handle_step(step, removed)
    }

    /// Drive one display frame of elapsed time `dt`.
    pub fn frame_by(&mut self, dt: Duration) -> SessionStep {
        let removed = self.poll();
        let step = self.sim.advance_by(dt);
        self.handle_step(step, removed)
    }

    /// Fire the safety watchdog from a host timer, outside the frame loop.
    pub fn check_watchdog(&mut self) -> Option<Winner> {
        let outcome = self.sim.check_watchdog()?;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_stopped(&outcome);
        }
        self.on_stopped(&outcome)
    }

    /// Perform the timed winner removal once it is due.
    pub fn poll(&mut self) -> Option<String> {
        let due = self.pending.as_ref()?.due;
        if self.sim.clock().now() < due {
            return None;
        }
        let pending = self.pending.take()?;
        if self.roster.remove(&pending.name) {
            log::info!("Winner removed from roster: {}", pending.name);
        }
        self.state = SessionState::Idle;
        Some(pending.name)
    }

    fn handle_step(&mut self, step: StepResult, removed: Option<String>) -> SessionStep {
        if let Some(listener) = self.listener.as_mut() {
            dispatch(&mut **listener, &step);
        }
        let winner = match step.outcome() {
            Some(outcome) => self.on_stopped(outcome),
            None => None,
        };
        SessionStep { step, winner, removed }
    }

    fn on_stopped(&mut self, outcome: &SpinOutcome) -> Option<Winner> {
        let index = outcome.winner_index();
        let Some(name) = self.roster.get(index).map(str::to_string) else {
            log::error!("Spin finished but no participant at index {}", index);
            self.state = SessionState::Idle;
            return None;
        };

        let winner = Winner {
            name,
            index,
            forced: outcome.was_forced(),
            anomaly: outcome.resolution.anomaly,
            outcome: *outcome,
        };

        if winner.forced {
            // Forced stops are announced but the winner stays in the pool.
            self.state = SessionState::Idle;
        } else {
            let due = self.sim.clock().now() + self.sim.config().win_display_delay();
            self.pending = Some(PendingRemoval { name: winner.name.clone(), due });
            self.state = SessionState::Announcing;
        }
        log::info!("Winner: {} (index {}, forced={})", winner.name, index, winner.forced);

        self.last_winner = Some(winner.clone());
        Some(winner)
    }
}

// ============================================
// Tests
// ============================================
