use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("No participants to resolve a winner from")]
    NoParticipants,

    #[error("Not enough participants to spin: {count} (need at least 2)")]
    NotEnoughParticipants { count: usize },

    #[error("A spin is already in progress")]
    SpinInProgress,

    #[error("Participant already exists: {0}")]
    DuplicateParticipant(String),

    #[error("Participant limit reached ({max})")]
    CapacityExceeded { max: usize },

    #[error("Participant name is empty")]
    EmptyName,

    #[error("Invalid spin config: {0}")]
    InvalidConfig(String),

    #[error("Invalid initial velocity: {0}")]
    InvalidVelocity(f64),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl WheelError {
    /// Input-validation errors raised by the roster rather than the engine.
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            WheelError::DuplicateParticipant(_)
                | WheelError::CapacityExceeded { .. }
                | WheelError::EmptyName
        )
    }
}

impl From<serde_json::Error> for WheelError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            WheelError::Deserialization(err.to_string())
        } else {
            WheelError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, WheelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_errors_are_classified() {
        assert!(WheelError::EmptyName.is_roster_error());
        assert!(WheelError::CapacityExceeded { max: 100 }.is_roster_error());
        assert!(WheelError::DuplicateParticipant("a".into()).is_roster_error());
        assert!(!WheelError::NoParticipants.is_roster_error());
        assert!(!WheelError::SpinInProgress.is_roster_error());
    }

    #[test]
    fn test_json_error_maps_to_deserialization() {
        let err: WheelError = serde_json::from_str::<u8>("not json").unwrap_err().into();
        assert!(matches!(err, WheelError::Deserialization(_)));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            WheelError::NotEnoughParticipants { count: 1 }.to_string(),
            "Not enough participants to spin: 1 (need at least 2)"
        );
        assert_eq!(
            WheelError::UnsupportedSchema { found: 3, expected: 1 }.to_string(),
            "Unsupported schema version: found 3, expected 1"
        );
    }
}
