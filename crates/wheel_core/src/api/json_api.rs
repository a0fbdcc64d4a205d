//! JSON API for headless spins
//!
//! Deterministic entry points for hosts that prefer a string boundary: the
//! same request (including seed) always yields the same response.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::config::SpinConfig;
use crate::engine::events::StopReason;
use crate::engine::resolver::ResolutionAnomaly;
use crate::error::{Result, WheelError};
use crate::runner::{HeadlessRunner, SpinReport};

/// Request/response schema version
pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Ordered roster; order fixes the segments
    pub participants: Vec<String>,
    #[serde(default)]
    pub config: Option<SpinConfig>,
    /// Include the per-frame angle trace (large)
    #[serde(default)]
    pub record_frames: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinResponse {
    pub schema_version: u8,
    pub winner: String,
    pub winner_index: usize,
    pub final_angle: f64,
    pub launch_velocity: f64,
    pub frames: u64,
    pub ticks: u32,
    pub elapsed_ms: u64,
    pub stop_reason: StopReason,
    pub anomaly: Option<ResolutionAnomaly>,
    /// Roster after the winner's removal
    pub remaining: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_trace: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawEntry {
    pub round: usize,
    pub winner: String,
    pub frames: u64,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResponse {
    pub schema_version: u8,
    /// Winners in the order they were drawn
    pub order: Vec<DrawEntry>,
    /// Participant left on the wheel
    pub last_remaining: Option<String>,
}

fn parse_request(request_json: &str) -> Result<SpinRequest> {
    let request: SpinRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        warn!(found = request.schema_version, "unsupported spin request schema");
        return Err(WheelError::UnsupportedSchema {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(request)
}

fn runner_for(request: &SpinRequest) -> Result<HeadlessRunner> {
    let config = request.config.clone().unwrap_or_default();
    debug!(
        seed = request.seed,
        participants = request.participants.len(),
        "building headless runner"
    );
    Ok(HeadlessRunner::with_participants(config, request.seed, &request.participants)?
        .recording(request.record_frames))
}

fn to_response(report: SpinReport, remaining: Vec<String>, record: bool) -> SpinResponse {
    SpinResponse {
        schema_version: SCHEMA_VERSION,
        winner_index: report.winner.index,
        final_angle: report.winner.outcome.final_angle,
        launch_velocity: report.launch_velocity,
        frames: report.frames,
        ticks: report.ticks,
        elapsed_ms: report.elapsed.as_millis() as u64,
        stop_reason: report.winner.outcome.stop_reason,
        anomaly: report.winner.anomaly,
        remaining,
        angle_trace: record.then_some(report.angle_trace),
        winner: report.winner.name,
    }
}

/// Run a single spin described by `request_json` and return the result as JSON.
pub fn spin_wheel_json(request_json: &str) -> Result<String> {
    let request = parse_request(request_json)?;
    let mut runner = runner_for(&request)?;
    let report = runner.spin_once()?;
    let remaining = runner.session().roster().names().to_vec();

    info!(winner = %report.winner.name, frames = report.frames, "spin resolved");
    let response = to_response(report, remaining, request.record_frames);
    Ok(serde_json::to_string(&response)?)
}

/// Spin repeatedly until one participant remains; returns the draw order as JSON.
pub fn draw_order_json(request_json: &str) -> Result<String> {
    let request = parse_request(request_json)?;
    let mut runner = runner_for(&request)?;
    let reports = runner.draw_all()?;

    let order = reports
        .into_iter()
        .enumerate()
        .map(|(i, report)| DrawEntry {
            round: i + 1,
            frames: report.frames,
            stop_reason: report.winner.outcome.stop_reason,
            winner: report.winner.name,
        })
        .collect::<Vec<_>>();
    let last_remaining = runner.session().roster().get(0).map(str::to_string);

    info!(rounds = order.len(), "draw completed");
    let response = DrawResponse { schema_version: SCHEMA_VERSION, order, last_remaining };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(participants: &[&str], seed: u64) -> String {
        json!({
            "schema_version": 1,
            "seed": seed,
            "participants": participants,
        })
        .to_string()
    }

    #[test]
    fn test_basic_spin() {
        let result = spin_wheel_json(&request(&["A", "B", "C", "D"], 42));
        assert!(result.is_ok(), "Spin should succeed: {:?}", result);

        let parsed: SpinResponse = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(parsed.schema_version, 1);
        assert!(parsed.winner_index < 4);
        assert_eq!(parsed.remaining.len(), 3);
        assert!(!parsed.remaining.contains(&parsed.winner));
        assert_eq!(parsed.stop_reason, StopReason::Settled);
        assert!(parsed.anomaly.is_none());
        assert!(parsed.angle_trace.is_none());
    }

    #[test]
    fn test_determinism() {
        let req = request(&["Ann", "Ben", "Cat", "Dan", "Eve"], 999);
        let first = spin_wheel_json(&req).unwrap();
        let second = spin_wheel_json(&req).unwrap();
        assert_eq!(first, second, "Same seed should produce same result");
    }

    #[test]
    fn test_record_frames() {
        let req = json!({
            "schema_version": 1,
            "seed": 5,
            "participants": ["A", "B"],
            "record_frames": true,
        })
        .to_string();
        let parsed: SpinResponse = serde_json::from_str(&spin_wheel_json(&req).unwrap()).unwrap();
        let trace = parsed.angle_trace.expect("trace requested");
        assert_eq!(trace.len() as u64, parsed.frames);
    }

    #[test]
    fn test_custom_config() {
        let req = json!({
            "schema_version": 1,
            "seed": 5,
            "participants": ["A", "B", "C"],
            "config": { "friction": 0.95 },
        })
        .to_string();
        let quick: SpinResponse = serde_json::from_str(&spin_wheel_json(&req).unwrap()).unwrap();
        let classic: SpinResponse =
            serde_json::from_str(&spin_wheel_json(&request(&["A", "B", "C"], 5)).unwrap())
                .unwrap();
        assert!(quick.frames < classic.frames);
    }

    #[test]
    fn test_friction_model_changes_spin() {
        let names = ["A", "B", "C"];
        let scaled = json!({
            "schema_version": 1,
            "seed": 5,
            "participants": names,
            "config": { "friction_model": { "kind": "time_scaled", "reference_frame_ms": 8.0 } },
        })
        .to_string();
        let scaled: SpinResponse = serde_json::from_str(&spin_wheel_json(&scaled).unwrap()).unwrap();
        let per_frame: SpinResponse =
            serde_json::from_str(&spin_wheel_json(&request(&names, 5)).unwrap()).unwrap();
        assert_eq!(scaled.launch_velocity, per_frame.launch_velocity);
        assert!(scaled.frames < per_frame.frames);
    }

    #[test]
    fn test_config_cannot_raise_roster_cap() {
        let names: Vec<String> = (0..150).map(|i| format!("p{}", i)).collect();
        let req = json!({
            "schema_version": 1,
            "seed": 1,
            "participants": names,
            "config": { "max_participants": 1000 },
        })
        .to_string();
        assert!(matches!(spin_wheel_json(&req), Err(WheelError::InvalidConfig(_))));
    }

    #[test]
    fn test_roster_over_cap_rejected() {
        let names: Vec<String> = (0..101).map(|i| format!("p{}", i)).collect();
        let req = json!({ "schema_version": 1, "seed": 1, "participants": names }).to_string();
        assert_eq!(spin_wheel_json(&req).unwrap_err(), WheelError::CapacityExceeded { max: 100 });
    }

    #[test]
    fn test_rejects_duplicate_participants() {
        let err = spin_wheel_json(&request(&["A", "a"], 1)).unwrap_err();
        assert_eq!(err, WheelError::DuplicateParticipant("a".into()));
    }

    #[test]
    fn test_rejects_single_participant() {
        let err = spin_wheel_json(&request(&["A"], 1)).unwrap_err();
        assert_eq!(err, WheelError::NotEnoughParticipants { count: 1 });
    }

    #[test]
    fn test_rejects_wrong_schema() {
        let req = json!({"schema_version": 9, "seed": 1, "participants": ["A", "B"]}).to_string();
        assert_eq!(
            spin_wheel_json(&req).unwrap_err(),
            WheelError::UnsupportedSchema { found: 9, expected: 1 }
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(spin_wheel_json("{"), Err(WheelError::Deserialization(_))));
    }

    #[test]
    fn test_draw_order() {
        let names = ["A", "B", "C", "D", "E"];
        let parsed: DrawResponse =
            serde_json::from_str(&draw_order_json(&request(&names, 77)).unwrap()).unwrap();
        assert_eq!(parsed.order.len(), 4);
        assert_eq!(parsed.order[0].round, 1);

        let mut everyone: Vec<String> = parsed.order.iter().map(|e| e.winner.clone()).collect();
        everyone.push(parsed.last_remaining.clone().unwrap());
        everyone.sort();
        assert_eq!(everyone, names);
    }
}
