//! Error types for Pairwise Core

use chrono::Weekday;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Roster has {actual} participants, scheduling needs exactly {expected}")]
    InvalidRosterSize { expected: usize, actual: usize },

    #[error("Registration is closed on {0}")]
    WindowClosed(Weekday),

    #[error("Roster is full ({capacity} participants)")]
    RosterFull { capacity: usize },

    #[error("Period {0} is locked")]
    PeriodLocked(String),

    #[error("Participant name must not be empty")]
    InvalidName,

    #[error("Participant already registered: {0}")]
    DuplicateParticipant(String),

    #[error("Invalid period key: {0}")]
    InvalidPeriodKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl Error {
    /// Expected, user-facing refusals of a registration attempt
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::WindowClosed(_)
                | Error::RosterFull { .. }
                | Error::PeriodLocked(_)
                | Error::InvalidName
                | Error::DuplicateParticipant(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
