//! Period controller - the weekly registration lifecycle
//!
//! A period starts out collecting participants and locks once, either when
//! the roster reaches capacity or when a check happens outside the
//! registration window. Locking freezes the roster and triggers schedule
//! generation. A period found locked without a schedule (generation was
//! interrupted) is repaired on the next read.
//!
//! Every operation takes the current time explicitly. The controller holds
//! no locks of its own: callers sharing a store across threads or processes
//! must serialize writers per period.

use chrono::{DateTime, FixedOffset, TimeZone};
use rand::Rng;

use crate::calendar::LeagueCalendar;
use crate::config::LeagueConfig;
use crate::error::{Error, Result};
use crate::invariants::assert_period_invariants;
use crate::models::{Period, PeriodKey};
use crate::pairing::generate_schedule;
use crate::storage::PeriodStore;

/// Drives periods in `store` through their lifecycle
pub struct PeriodController<S, R> {
    store: S,
    config: LeagueConfig,
    calendar: LeagueCalendar,
    rng: R,
}

impl<S: PeriodStore, R: Rng> PeriodController<S, R> {
    /// Create a controller; the config is validated first
    pub fn new(store: S, config: LeagueConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let calendar = LeagueCalendar::from_config(&config)?;
        Ok(Self {
            store,
            config,
            calendar,
            rng,
        })
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    pub fn calendar(&self) -> &LeagueCalendar {
        &self.calendar
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn period_key<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> PeriodKey {
        self.calendar.period_key(now)
    }

    pub fn entry_window_open<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.calendar.entry_window_open(now)
    }

    /// Read the period `now` falls in, creating it on first reference
    ///
    /// A locked period with a full roster but no schedule gets its schedule
    /// generated and saved before it is returned.
    pub fn current_period<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<Period> {
        let mut period = self.load_or_create(now)?;
        self.fill_missing_schedule(&mut period)?;
        Ok(period)
    }

    /// Whether an `add_participant` call could currently succeed for some
    /// new name
    pub fn can_register<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<bool> {
        let period = self.current_period(now)?;
        Ok(!period.locked
            && self.calendar.entry_window_open(now)
            && period.roster.len() < self.config.capacity)
    }

    /// Register a participant for the period `now` falls in
    ///
    /// Rejections leave the stored period untouched. A successful addition
    /// that fills the roster locks the period and generates its schedule.
    pub fn add_participant<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        name: &str,
    ) -> Result<Period> {
        if !self.calendar.entry_window_open(now) {
            return Err(Error::WindowClosed(self.calendar.weekday(now)));
        }

        let mut period = self.load_or_create(now)?;
        if period.roster.len() >= self.config.capacity {
            return Err(Error::RosterFull {
                capacity: self.config.capacity,
            });
        }
        if period.locked {
            return Err(Error::PeriodLocked(period.key.to_string()));
        }

        period.roster.insert(name)?;
        assert_period_invariants(&period, self.config.capacity);
        self.store.save(&period)?;

        tracing::info!(
            week = %period.key,
            name = name.trim(),
            players = period.roster.len(),
            capacity = self.config.capacity,
            "Registered participant"
        );

        let local_now = self.calendar.local(now);
        self.advance(&mut period, &local_now)?;
        Ok(period)
    }

    /// Fire the lock transition if its conditions hold
    ///
    /// Locks when the roster is full or the registration window is closed.
    /// A period that is already locked keeps its `locked_at` and schedule.
    pub fn check_lock<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<Period> {
        let mut period = self.load_or_create(now)?;
        let local_now = self.calendar.local(now);
        self.advance(&mut period, &local_now)?;
        Ok(period)
    }

    fn advance(&mut self, period: &mut Period, now: &DateTime<FixedOffset>) -> Result<()> {
        if !period.locked {
            let full = period.roster.len() >= self.config.capacity;
            let window_closed = !self.calendar.entry_window_open(now);

            if full || window_closed {
                period.locked = true;
                period.locked_at = Some(*now);
                assert_period_invariants(period, self.config.capacity);
                self.store.save(period)?;

                tracing::info!(
                    week = %period.key,
                    players = period.roster.len(),
                    reason = if full { "roster full" } else { "window closed" },
                    "Locked period"
                );
                if !full {
                    tracing::warn!(
                        week = %period.key,
                        players = period.roster.len(),
                        capacity = self.config.capacity,
                        "Period locked with an incomplete roster, no schedule will be generated"
                    );
                }
            }
        }

        self.fill_missing_schedule(period)
    }

    /// Generate and save the schedule of a locked, full period lacking one
    fn fill_missing_schedule(&mut self, period: &mut Period) -> Result<()> {
        if !period.is_missing_schedule() || period.roster.len() != self.config.capacity {
            return Ok(());
        }

        tracing::info!(week = %period.key, "Generating schedule for locked period");
        let plan = self.config.plan();
        period.schedule = generate_schedule(period.roster.as_slice(), &plan, &mut self.rng)?;
        assert_period_invariants(period, self.config.capacity);
        self.store.save(period)?;
        Ok(())
    }

    fn load_or_create<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Period> {
        let key = self.calendar.period_key(now);
        if let Some(period) = self.store.load(&key)? {
            if period.roster.len() > self.config.capacity {
                return Err(Error::Config(format!(
                    "period {} holds {} participants, more than the configured capacity of {}",
                    key,
                    period.roster.len(),
                    self.config.capacity
                )));
            }
            return Ok(period);
        }

        let period = Period::new(key, self.calendar.local(now));
        self.store.save(&period)?;
        tracing::info!(week = %key, "Created period");
        Ok(period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Roster, Schedule};
    use crate::pairing::schedule_novelty;
    use crate::storage::MemoryStore;
    use chrono::{Duration, Utc, Weekday};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    type TestController<'a> = PeriodController<&'a MemoryStore, ChaCha8Rng>;

    fn controller(store: &MemoryStore) -> TestController<'_> {
        PeriodController::new(store, LeagueConfig::default(), ChaCha8Rng::seed_from_u64(42))
            .unwrap()
    }

    /// Tuesday 2025-01-14 10:00 in Tallinn (UTC+2)
    fn tuesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 14, 8, 0, 0).unwrap()
    }

    /// Friday 2025-01-17 10:00 in Tallinn
    fn friday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 17, 8, 0, 0).unwrap()
    }

    fn fill(ctl: &mut TestController<'_>, now: &DateTime<Utc>, count: usize) -> Period {
        let mut period = ctl.current_period(now).unwrap();
        for i in 1..=count {
            period = ctl.add_participant(now, &format!("player{}", i)).unwrap();
        }
        period
    }

    fn assert_valid_schedule(period: &Period) {
        assert_eq!(period.schedule.len(), 6);
        for round in &period.schedule {
            let placed: HashSet<&str> = round.participants().collect();
            assert_eq!(placed.len(), 12);
            assert!(period.roster.iter().all(|p| placed.contains(p)));
        }
    }

    fn locked_full_period(now: &DateTime<Utc>, schedule: Schedule) -> Period {
        let calendar = LeagueCalendar::new(chrono_tz::Europe::Tallinn, vec![Weekday::Mon]);
        let names: Vec<String> = (1..=12).map(|i| format!("p{}", i)).collect();
        let mut period = Period::new(calendar.period_key(now), calendar.local(now));
        period.roster = Roster::try_from(names).unwrap();
        period.locked = true;
        period.schedule = schedule;
        period
    }

    #[test]
    fn test_first_read_creates_period() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        let period = ctl.current_period(&tuesday()).unwrap();
        assert_eq!(period.key.to_string(), "2025 - WK 3");
        assert!(!period.locked);
        assert!(period.roster.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reread_does_not_reset() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);
        let created = ctl.current_period(&tuesday()).unwrap().created_at;

        ctl.add_participant(&tuesday(), "ann").unwrap();
        let later = tuesday() + Duration::hours(30);
        let period = ctl.current_period(&later).unwrap();

        assert_eq!(period.created_at, created);
        assert!(period.roster.contains("ann"));
    }

    #[test]
    fn test_add_trims_name() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        let period = ctl.add_participant(&tuesday(), "  ann  ").unwrap();
        assert_eq!(period.roster.as_slice(), &["ann".to_string()]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        ctl.add_participant(&tuesday(), "ann").unwrap();
        let err = ctl.add_participant(&tuesday(), "ann").unwrap_err();
        assert!(matches!(err, Error::DuplicateParticipant(ref n) if n == "ann"));
        assert!(err.is_rejection());

        let period = ctl.current_period(&tuesday()).unwrap();
        assert_eq!(period.roster.len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        assert!(matches!(
            ctl.add_participant(&tuesday(), "   "),
            Err(Error::InvalidName)
        ));
        assert!(ctl.current_period(&tuesday()).unwrap().roster.is_empty());
    }

    #[test]
    fn test_filling_roster_locks_and_schedules() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        let period = fill(&mut ctl, &tuesday(), 11);
        assert!(!period.locked);
        assert!(period.schedule.is_empty());

        let period = ctl.add_participant(&tuesday(), "player12").unwrap();
        assert!(period.locked);
        assert!(period.locked_at.is_some());
        assert_valid_schedule(&period);
        assert!(schedule_novelty(&period.schedule) >= 30);

        let stored = store.load(&period.key).unwrap().unwrap();
        assert_eq!(stored, period);
    }

    #[test]
    fn test_thirteenth_add_is_roster_full() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);
        let before = fill(&mut ctl, &tuesday(), 12);

        let err = ctl.add_participant(&tuesday(), "player13").unwrap_err();
        assert!(matches!(err, Error::RosterFull { capacity: 12 }));

        let after = ctl.current_period(&tuesday()).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_friday_add_is_window_closed() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        let err = ctl.add_participant(&friday(), "ann").unwrap_err();
        assert!(matches!(err, Error::WindowClosed(Weekday::Fri)));

        // Same answer with a partly filled roster
        fill(&mut ctl, &tuesday(), 5);
        let err = ctl.add_participant(&friday(), "ann").unwrap_err();
        assert!(matches!(err, Error::WindowClosed(Weekday::Fri)));
        assert_eq!(ctl.current_period(&friday()).unwrap().roster.len(), 5);
    }

    #[test]
    fn test_window_closed_add_writes_nothing() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        let err = ctl.add_participant(&friday(), "ann").unwrap_err();
        assert!(matches!(err, Error::WindowClosed(Weekday::Fri)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_summer_friday_after_midnight_is_window_closed() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        // Friday 00:30 in Tallinn summer time (UTC+3)
        let now = Utc.with_ymd_and_hms(2025, 7, 17, 21, 30, 0).unwrap();
        let err = ctl.add_participant(&now, "ann").unwrap_err();
        assert!(matches!(err, Error::WindowClosed(Weekday::Fri)));

        let period = ctl.check_lock(&now).unwrap();
        assert!(period.locked);
        assert_eq!(period.locked_at.unwrap().offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn test_cutoff_locks_incomplete_roster_without_schedule() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);
        fill(&mut ctl, &tuesday(), 7);

        let period = ctl.check_lock(&friday()).unwrap();
        assert!(period.locked);
        assert_eq!(
            period.locked_at,
            Some(ctl.calendar().local(&friday()))
        );
        assert!(period.schedule.is_empty());
        assert_eq!(period.roster.len(), 7);
    }

    #[test]
    fn test_check_lock_noop_while_collecting() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);
        fill(&mut ctl, &tuesday(), 3);

        let period = ctl.check_lock(&tuesday()).unwrap();
        assert!(!period.locked);
        assert!(period.locked_at.is_none());
    }

    #[test]
    fn test_lock_fires_once() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);
        let locked = fill(&mut ctl, &tuesday(), 12);

        let first = ctl.check_lock(&friday()).unwrap();
        let second = ctl.check_lock(&(friday() + Duration::hours(5))).unwrap();

        assert_eq!(first.locked_at, locked.locked_at);
        assert_eq!(second.locked_at, locked.locked_at);
        assert_eq!(first.schedule, locked.schedule);
        assert_eq!(second.schedule, locked.schedule);
    }

    #[test]
    fn test_locked_period_rejects_additions_inside_window() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);
        fill(&mut ctl, &tuesday(), 4);
        ctl.check_lock(&friday()).unwrap();

        // Clock moved back into the window of the same week
        let err = ctl.add_participant(&tuesday(), "late").unwrap_err();
        assert!(matches!(err, Error::PeriodLocked(ref week) if week == "2025 - WK 3"));
    }

    #[test]
    fn test_self_healing_generates_missing_schedule() {
        let period = locked_full_period(&friday(), Schedule::new());
        let key = period.key;
        let store = MemoryStore::with_periods([period]);
        let mut ctl = controller(&store);

        let healed = ctl.current_period(&friday()).unwrap();
        assert_valid_schedule(&healed);
        assert_eq!(store.load(&key).unwrap().unwrap().schedule, healed.schedule);

        // Second read keeps the generated schedule
        let again = ctl.current_period(&friday()).unwrap();
        assert_eq!(again.schedule, healed.schedule);
    }

    #[test]
    fn test_self_healing_leaves_existing_schedule() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);
        let existing = fill(&mut ctl, &tuesday(), 12).schedule;

        let period = locked_full_period(&tuesday(), existing.clone());
        let store = MemoryStore::with_periods([period]);
        let mut ctl = controller(&store);

        let read = ctl.current_period(&tuesday()).unwrap();
        assert_eq!(read.schedule, existing);
    }

    #[test]
    fn test_same_week_same_period() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);
        let monday = tuesday() - Duration::days(1);
        let thursday = tuesday() + Duration::days(2);

        ctl.add_participant(&monday, "ann").unwrap();
        let period = ctl.add_participant(&thursday, "bob").unwrap();

        assert_eq!(ctl.period_key(&monday), ctl.period_key(&thursday));
        assert_eq!(period.roster.len(), 2);
        assert_eq!(store.len(), 1);

        let next_week = ctl.current_period(&(monday + Duration::days(7))).unwrap();
        assert!(next_week.roster.is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_can_register() {
        let store = MemoryStore::new();
        let mut ctl = controller(&store);

        assert!(ctl.can_register(&tuesday()).unwrap());
        assert!(!ctl.can_register(&friday()).unwrap());

        fill(&mut ctl, &tuesday(), 12);
        assert!(!ctl.can_register(&tuesday()).unwrap());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let store = MemoryStore::new();
        let config = LeagueConfig {
            capacity: 10,
            ..LeagueConfig::default()
        };
        let result = PeriodController::new(&store, config, ChaCha8Rng::seed_from_u64(0));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_stored_roster_over_capacity_is_an_error() {
        let period = locked_full_period(&tuesday(), Schedule::new());
        let store = MemoryStore::with_periods([period]);
        let config = LeagueConfig {
            capacity: 8,
            groups: 2,
            ..LeagueConfig::default()
        };
        let mut ctl = PeriodController::new(&store, config, ChaCha8Rng::seed_from_u64(0)).unwrap();

        assert!(matches!(ctl.current_period(&tuesday()), Err(Error::Config(_))));
        assert!(matches!(ctl.check_lock(&friday()), Err(Error::Config(_))));
        assert!(matches!(
            ctl.add_participant(&tuesday(), "ann"),
            Err(Error::Config(_))
        ));
    }

    struct FailingStore;

    impl PeriodStore for FailingStore {
        fn load(&self, _key: &PeriodKey) -> Result<Option<Period>> {
            Ok(None)
        }

        fn save(&self, _period: &Period) -> Result<()> {
            Err(Error::Persistence("disk full".into()))
        }
    }

    #[test]
    fn test_persistence_failure_propagates() {
        let mut ctl = PeriodController::new(
            FailingStore,
            LeagueConfig::default(),
            ChaCha8Rng::seed_from_u64(0),
        )
        .unwrap();

        let err = ctl.add_participant(&tuesday(), "ann").unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        assert!(!err.is_rejection());
    }
}
