//! # wheel_core - Deterministic Spin-Wheel Engine
//!
//! Spin-and-selection core for a randomized name wheel: users add entries,
//! the wheel decelerates under friction, and the entry under the pointer wins
//! and leaves the pool.
//!
//! ## Features
//! - Frame-driven spin simulation with a safety watchdog (always terminates)
//! - Pure winner resolution from `(final_angle, participant_count)`
//! - Segment-crossing tick notifications for audio feedback
//! - Seeded RNG: same seed = same spin
//! - JSON API and headless runner for hosts without a display loop

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod calibration;
pub mod engine;
pub mod error;
pub mod roster;
pub mod runner;
pub mod session;

pub use api::{draw_order_json, spin_wheel_json, SpinRequest, SpinResponse};
pub use engine::{
    resolve, resolve_participant, Clock, ManualClock, Resolution, ResolutionAnomaly,
    SegmentTick, SpinConfig, SpinListener, SpinOutcome, SpinSimulator, StepResult, StopReason,
    SystemClock,
};
pub use error::{Result, WheelError};
pub use roster::Roster;
pub use runner::{HeadlessRunner, SpinReport};
pub use session::{ControlState, SegmentView, SessionState, SessionStep, WheelSession, Winner};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
