use std::fmt;

use crate::types::{GameAction, GameMode};

/// Rejected calls into the rules engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Rotation other than 90, -90 or 180 degrees
    InvalidRotation(i32),
    /// Release notification for an action that is not held
    InvalidRelease(GameAction),
    /// Mode name that does not parse
    UnknownGameMode(String),
    /// Mode whose scoring is not implemented
    Unsupported(GameMode),
}

impl RulesError {
    pub fn code(&self) -> &'static str {
        match self {
            RulesError::InvalidRotation(_)
            | RulesError::InvalidRelease(_)
            | RulesError::UnknownGameMode(_) => "invalid_argument",
            RulesError::Unsupported(_) => "unsupported_mode",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RulesError::InvalidRotation(_) => {
                "degrees must be 90 (clockwise), -90 (anticlockwise), or 180"
            }
            RulesError::InvalidRelease(_) => {
                "released key must be left or right movement or soft drop"
            }
            RulesError::UnknownGameMode(_) => "unknown game mode",
            RulesError::Unsupported(_) => "scoring for this game mode is not implemented",
        }
    }
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::InvalidRotation(deg) => write!(f, "{}: {}", self.message(), deg),
            RulesError::InvalidRelease(action) => {
                write!(f, "{}: {}", self.message(), action.as_str())
            }
            RulesError::UnknownGameMode(name) => write!(f, "{}: {:?}", self.message(), name),
            RulesError::Unsupported(mode) => write!(f, "{}: {}", self.message(), mode.as_str()),
        }
    }
}

impl std::error::Error for RulesError {}
