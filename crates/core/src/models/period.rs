//! Period model - one calendar week of registration and play

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{Roster, Schedule};
use crate::error::{Error, Result};

/// Stable identifier of a calendar week: ISO year and ISO week number
///
/// Rendered as `"<year> - WK <week>"`, which is also the persisted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    pub year: i32,
    pub week: u32,
}

impl PeriodKey {
    pub fn new(year: i32, week: u32) -> Result<Self> {
        if !(1..=53).contains(&week) {
            return Err(Error::InvalidPeriodKey(format!("week {} out of range", week)));
        }
        Ok(Self { year, week })
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - WK {}", self.year, self.week)
    }
}

impl FromStr for PeriodKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPeriodKey(s.to_string());
        let (year, week) = s.split_once(" - WK ").ok_or_else(invalid)?;
        let year = year.trim().parse().map_err(|_| invalid())?;
        let week = week.trim().parse().map_err(|_| invalid())?;
        PeriodKey::new(year, week)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

/// Lifecycle phase of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Registration may still be accepted
    Collecting,
    /// Roster frozen; terminal for the period
    Locked,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Collecting => write!(f, "collecting"),
            Phase::Locked => write!(f, "locked"),
        }
    }
}

/// A week's registration state and, once locked, its schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    #[serde(rename = "week")]
    pub key: PeriodKey,
    pub created_at: DateTime<FixedOffset>,
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_at: Option<DateTime<FixedOffset>>,
    #[serde(rename = "players", default)]
    pub roster: Roster,
    #[serde(rename = "matches", default)]
    pub schedule: Schedule,
}

impl Period {
    pub fn new(key: PeriodKey, created_at: DateTime<FixedOffset>) -> Self {
        Self {
            key,
            created_at,
            locked: false,
            locked_at: None,
            roster: Roster::new(),
            schedule: Schedule::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.locked {
            Phase::Locked
        } else {
            Phase::Collecting
        }
    }

    /// Locked, but the schedule was never produced
    pub fn is_missing_schedule(&self) -> bool {
        self.locked && self.schedule.is_empty()
    }
}
