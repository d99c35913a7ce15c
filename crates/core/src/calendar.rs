//! League calendar: which week a clock reading belongs to, and whether
//! registration is open at that instant.
//!
//! Both answers are pure functions of the supplied clock reading and the
//! league configuration. Nothing here reads the system clock.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Weekday};
use chrono_tz::Tz;

use crate::config::LeagueConfig;
use crate::error::Result;
use crate::models::PeriodKey;

/// Local-time view of the league's week structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueCalendar {
    zone: Tz,
    open_days: Vec<Weekday>,
}

impl LeagueCalendar {
    pub fn new(zone: Tz, open_days: Vec<Weekday>) -> Self {
        Self { zone, open_days }
    }

    pub fn from_config(config: &LeagueConfig) -> Result<Self> {
        Ok(Self::new(config.timezone()?, config.open_days.clone()))
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Express a clock reading in league-local time
    ///
    /// The offset in effect at that instant is kept, so summer and winter
    /// readings carry different offsets.
    pub fn local<Z: TimeZone>(&self, now: &DateTime<Z>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.zone).fixed_offset()
    }

    /// ISO year and week of `now` in league-local time
    pub fn period_key<Z: TimeZone>(&self, now: &DateTime<Z>) -> PeriodKey {
        let iso = self.local(now).iso_week();
        PeriodKey {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Local weekday of `now`
    pub fn weekday<Z: TimeZone>(&self, now: &DateTime<Z>) -> Weekday {
        self.local(now).weekday()
    }

    /// Registration is accepted on the configured weekdays only
    pub fn entry_window_open<Z: TimeZone>(&self, now: &DateTime<Z>) -> bool {
        self.open_days.contains(&self.weekday(now))
    }
}
