//! League configuration schema and loader
//!
//! Defines the TOML-parseable settings for a weekly league: pool size,
//! schedule shape, search budget, registration days and local time zone.
//! Every key is optional; missing keys fall back to the reference setup
//! (12 players, 3 courts of 2v2, 6 matches, Mon-Thu registration).

use std::path::Path;

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pairing::SchedulePlan;

/// Default number of candidate partitions sampled per round
pub const DEFAULT_TRIAL_BUDGET: usize = 200;

/// League settings loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// Maximum roster size; must equal `groups * 2 * team_size`
    pub capacity: usize,
    /// Rounds (matches) per schedule
    pub rounds: usize,
    /// Groups (courts) per round
    pub groups: usize,
    /// Participants per team
    pub team_size: usize,
    /// Candidates sampled per round before settling for the best seen
    pub trial_budget: usize,
    /// Weekdays on which registration is accepted
    pub open_days: Vec<Weekday>,
    /// IANA name of the league's local time zone
    pub timezone: String,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            capacity: 12,
            rounds: 6,
            groups: 3,
            team_size: 2,
            trial_budget: DEFAULT_TRIAL_BUDGET,
            open_days: vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu],
            timezone: "Europe/Tallinn".to_string(),
        }
    }
}

impl LeagueConfig {
    /// Load and validate a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "Loaded league config");
        Ok(config)
    }

    /// Parse and validate config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: LeagueConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings describe a schedulable league
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 || self.groups == 0 || self.team_size == 0 {
            return Err(Error::Config(
                "rounds, groups and team_size must all be at least 1".into(),
            ));
        }
        if self.trial_budget == 0 {
            return Err(Error::Config("trial_budget must be at least 1".into()));
        }
        let required = self.groups * 2 * self.team_size;
        if self.capacity != required {
            return Err(Error::Config(format!(
                "capacity {} does not match {} groups of two {}-player teams ({})",
                self.capacity, self.groups, self.team_size, required
            )));
        }
        if self.open_days.is_empty() {
            return Err(Error::Config("open_days must name at least one weekday".into()));
        }
        self.timezone()?;
        Ok(())
    }

    /// The league's local time zone
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| Error::Config(format!("unknown time zone {:?}", self.timezone)))
    }

    /// Schedule shape handed to the pairing engine
    pub fn plan(&self) -> SchedulePlan {
        SchedulePlan {
            rounds: self.rounds,
            groups: self.groups,
            team_size: self.team_size,
            trial_budget: self.trial_budget,
        }
    }
}
