//! Spin-and-selection engine
//!
//! - `simulator`: rotational state, friction decay, stop detection, ticks
//! - `resolver`: stopped angle → participant index
//! - `angle`: shared angle/segment math
//! - `clock` / `watchdog`: injected time and the safety deadline
//! - `events`: per-frame and terminal notifications for the presentation layer

pub mod angle;
pub mod clock;
pub mod config;
pub mod events;
pub mod resolver;
pub mod simulator;
pub mod watchdog;

pub use angle::{normalize_angle, pointer_relative_angle, segment_angle, segment_index};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{FrictionModel, SpinConfig};
pub use events::{
    dispatch, FrameData, NullListener, RecordingListener, SegmentTick, SpinListener, SpinOutcome,
    StepResult, StopReason,
};
pub use resolver::{resolve, resolve_participant, Resolution, ResolutionAnomaly};
pub use simulator::{SpinPhase, SpinSimulator};
pub use watchdog::SafetyWatchdog;
