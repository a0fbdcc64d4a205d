use serde_json::{json, Value};
use wheel_core::api::DrawResponse;
use wheel_core::{draw_order_json, spin_wheel_json, SpinResponse, WheelError};

fn request(participants: &[&str], seed: u64) -> String {
    json!({ "schema_version": 1, "seed": seed, "participants": participants }).to_string()
}

#[test]
fn spin_response_is_consistent() {
    let names = ["Ann", "Ben", "Cat", "Dan"];
    let response: SpinResponse =
        serde_json::from_str(&spin_wheel_json(&request(&names, 12)).unwrap()).unwrap();

    assert_eq!(names[response.winner_index], response.winner);
    assert!(response.final_angle >= 0.0 && response.final_angle < std::f64::consts::TAU);
    assert!(response.launch_velocity >= 0.35 && response.launch_velocity < 0.80);
    assert_eq!(response.remaining.len(), 3);
}

#[test]
fn stop_reason_serializes_snake_case() {
    let raw: Value = serde_json::from_str(&spin_wheel_json(&request(&["A", "B"], 3)).unwrap())
        .unwrap();
    assert_eq!(raw["stop_reason"], "settled");
    assert!(raw.get("angle_trace").is_none());
}

#[test]
fn draw_visits_everyone_once() {
    let names = ["A", "B", "C"];
    let response: DrawResponse =
        serde_json::from_str(&draw_order_json(&request(&names, 4)).unwrap()).unwrap();
    assert_eq!(response.order.len(), 2);
    assert!(response.last_remaining.is_some());
    assert_ne!(response.order[0].winner, response.order[1].winner);
}

#[test]
fn empty_roster_is_rejected() {
    assert_eq!(
        spin_wheel_json(&request(&[], 1)).unwrap_err(),
        WheelError::NotEnoughParticipants { count: 0 }
    );
}
