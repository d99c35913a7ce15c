//! Pairwise Core Library
//!
//! Weekly registration lifecycle and teammate-rotation scheduling for a
//! fixed pool of players.

pub mod calendar;
pub mod config;
pub mod controller;
pub mod error;
pub mod invariants;
pub mod models;
pub mod pairing;
pub mod storage;

pub use calendar::LeagueCalendar;
pub use config::LeagueConfig;
pub use controller::PeriodController;
pub use error::{Error, Result};
pub use models::*;
pub use pairing::{generate_schedule, schedule_novelty, SchedulePlan, TeammateHistory};
pub use storage::{JsonFileStore, MemoryStore, PeriodStore};
