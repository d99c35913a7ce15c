//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{Period, Round};

/// Validate that a round places every roster member exactly once
pub fn assert_round_invariants(round: &Round, roster: &[String]) {
    debug_assert!(round.number >= 1, "Round numbers start at 1");

    let placed: Vec<&str> = round.participants().collect();
    let unique: HashSet<&str> = placed.iter().copied().collect();

    // Nobody twice
    debug_assert!(
        placed.len() == unique.len(),
        "Round {} places a participant more than once",
        round.number
    );

    // Nobody missing, nobody extra
    debug_assert!(
        placed.len() == roster.len() && roster.iter().all(|p| unique.contains(p.as_str())),
        "Round {} does not partition the roster ({} placed, {} registered)",
        round.number,
        placed.len(),
        roster.len()
    );

    // Both teams of a group are the same size
    debug_assert!(
        round
            .groups
            .iter()
            .all(|g| g.team_a.len() == g.team_b.len()),
        "Round {} has unbalanced teams",
        round.number
    );
}

/// Validate that a period's state is internally consistent
pub fn assert_period_invariants(period: &Period, capacity: usize) {
    debug_assert!(
        period.roster.len() <= capacity,
        "Period {} has {} participants, capacity is {}",
        period.key,
        period.roster.len(),
        capacity
    );

    debug_assert!(
        period.locked || period.locked_at.is_none(),
        "Period {} is collecting but has locked_at={:?}",
        period.key,
        period.locked_at
    );

    // Schedules only exist after the lock
    debug_assert!(
        period.locked || period.schedule.is_empty(),
        "Period {} has a schedule while still collecting",
        period.key
    );
}
