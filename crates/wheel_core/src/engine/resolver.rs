//! Winner resolution
//!
//! Maps a stopped wheel angle to the participant under the pointer. Pure: the
//! result depends only on `(final_angle, participant_count)`.

use serde::{Deserialize, Serialize};

use super::angle::{normalize_angle, pointer_relative_angle, segment_angle};
use crate::error::{Result, WheelError};

/// Out-of-range index recovered by clamping to 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionAnomaly {
    /// Angle passed to the resolver (before normalization)
    pub final_angle: f64,
    /// Index as computed before clamping (may be non-finite)
    pub raw_index: f64,
}

/// Outcome of a winner lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub index: usize,
    pub anomaly: Option<ResolutionAnomaly>,
}

impl Resolution {
    fn clean(index: usize) -> Self {
        Self { index, anomaly: None }
    }

    /// Index 0 with the anomaly flagged, for callers that cannot resolve at all.
    pub(crate) fn fallback(final_angle: f64) -> Self {
        Self {
            index: 0,
            anomaly: Some(ResolutionAnomaly { final_angle, raw_index: f64::NAN }),
        }
    }

    pub fn is_anomalous(&self) -> bool {
        self.anomaly.is_some()
    }
}

/// Resolve the winning participant index for a stopped wheel.
pub fn resolve(final_angle: f64, participant_count: usize) -> Result<Resolution> {
    match participant_count {
        0 => Err(WheelError::NoParticipants),
        1 => Ok(Resolution::clean(0)),
        n => {
            let normalized = normalize_angle(final_angle);
            let pointer = pointer_relative_angle(normalized);
            let raw_index = (pointer / segment_angle(n)).floor();

            if raw_index.is_finite() && raw_index >= 0.0 && raw_index < n as f64 {
                Ok(Resolution::clean(raw_index as usize))
            } else {
                log::warn!(
                    "Winner index out of range (raw={}, n={}, angle={}); falling back to 0",
                    raw_index,
                    n,
                    final_angle
                );
                Ok(Resolution {
                    index: 0,
                    anomaly: Some(ResolutionAnomaly { final_angle, raw_index }),
                })
            }
        }
    }
}

/// Resolve and look up the winning name in one step.
pub fn resolve_participant<S: AsRef<str>>(
    final_angle: f64,
    participants: &[S],
) -> Result<(&str, Resolution)> {
    let resolution = resolve(final_angle, participants.len())?;
    let name = participants
        .get(resolution.index)
        .map(|name| name.as_ref())
        .ok_or(WheelError::NoParticipants)?;
    Ok((name, resolution))
}
