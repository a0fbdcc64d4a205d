//! Spin notifications
//!
//! Everything the simulator reports to the presentation layer. The simulator
//! only produces these values; rendering and audio live with the listener.

use serde::{Deserialize, Serialize};

use super::resolver::Resolution;

/// Segment boundary crossed on this frame (used for tick audio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentTick {
    /// Segment now under the wheel-frame origin
    pub segment: usize,
    /// Previously ticked segment
    pub previous: usize,
}

/// Per-frame snapshot for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    /// Frames advanced since spin start (1-based)
    pub frame: u64,
    /// Accumulated wheel angle (radians, unbounded)
    pub angle: f64,
    /// Velocity after friction (rad/frame)
    pub velocity: f64,
    pub tick: Option<SegmentTick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Velocity decayed below the threshold
    Settled,
    /// Safety watchdog fired first
    SafetyTimeout,
}

/// Terminal result of a spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Normalized into [0, 2π)
    pub final_angle: f64,
    pub resolution: Resolution,
    pub stop_reason: StopReason,
    pub frames: u64,
}

impl SpinOutcome {
    pub fn winner_index(&self) -> usize {
        self.resolution.index
    }

    pub fn was_forced(&self) -> bool {
        self.stop_reason == StopReason::SafetyTimeout
    }
}

/// Result of one `advance()` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    /// No spin running; nothing changed
    Idle,
    /// Wheel moved and is still spinning
    Frame(FrameData),
    /// Spin ended on this call. `frame` is `None` for a watchdog stop, which
    /// does not move the wheel.
    Stopped {
        frame: Option<FrameData>,
        outcome: SpinOutcome,
    },
}

impl StepResult {
    pub fn frame(&self) -> Option<&FrameData> {
        match self {
            StepResult::Frame(frame) => Some(frame),
            StepResult::Stopped { frame, .. } => frame.as_ref(),
            StepResult::Idle => None,
        }
    }

    pub fn tick(&self) -> Option<SegmentTick> {
        self.frame().and_then(|frame| frame.tick)
    }

    pub fn outcome(&self) -> Option<&SpinOutcome> {
        match self {
            StepResult::Stopped { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, StepResult::Stopped { .. })
    }
}

/// Presentation-layer subscriber. All methods default to no-ops.
pub trait SpinListener {
    fn on_frame(&mut self, _frame: &FrameData) {}
    fn on_tick(&mut self, _tick: &SegmentTick) {}
    fn on_stopped(&mut self, _outcome: &SpinOutcome) {}
}

/// Listener that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl SpinListener for NullListener {}

/// Listener that records every notification, for tests and traces.
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    pub frames: Vec<FrameData>,
    pub ticks: Vec<SegmentTick>,
    pub outcomes: Vec<SpinOutcome>,
}

impl SpinListener for RecordingListener {
    fn on_frame(&mut self, frame: &FrameData) {
        self.frames.push(*frame);
    }

    fn on_tick(&mut self, tick: &SegmentTick) {
        self.ticks.push(*tick);
    }

    fn on_stopped(&mut self, outcome: &SpinOutcome) {
        self.outcomes.push(*outcome);
    }
}

/// Dispatch one step to a listener: frame, then tick, then stop.
pub fn dispatch<L: SpinListener + ?Sized>(listener: &mut L, step: &StepResult) {
    if let Some(frame) = step.frame() {
        listener.on_frame(frame);
        if let Some(tick) = &frame.tick {
            listener.on_tick(tick);
        }
    }
    if let Some(outcome) = step.outcome() {
        listener.on_stopped(outcome);
    }
}
