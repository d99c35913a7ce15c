//! Pairing engine
//!
//! Builds a schedule of rounds for a full roster. Each round splits the
//! roster into groups of two teams; across rounds the engine runs a bounded
//! random search that favors teammate pairs which have not played together
//! yet in the schedule being built.
//!
//! Only teammate repetition is scored. Opponents are not considered.

mod history;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::invariants::assert_round_invariants;
use crate::models::{Group, Round, Schedule};

pub use history::TeammateHistory;

/// Shape of a schedule and the search budget used to fill it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePlan {
    /// Rounds (matches) in the schedule
    pub rounds: usize,
    /// Groups (courts) in every round
    pub groups: usize,
    /// Participants per team
    pub team_size: usize,
    /// Candidates sampled per round at most
    pub trial_budget: usize,
}

impl SchedulePlan {
    /// Exact roster size this plan can schedule
    pub fn roster_size(&self) -> usize {
        self.groups * 2 * self.team_size
    }

    /// Teammate pairs formed in one round: two teams per group,
    /// `C(team_size, 2)` pairs per team
    pub fn max_round_novelty(&self) -> usize {
        let pairs_per_team = self.team_size * self.team_size.saturating_sub(1) / 2;
        self.groups * 2 * pairs_per_team
    }
}

/// Outcome of the search for one round
#[derive(Debug, Clone)]
struct RoundSearch {
    groups: Vec<Group>,
    score: usize,
    trials: usize,
}

/// Generate `plan.rounds` rounds for `roster`
///
/// The roster must hold exactly `plan.roster_size()` participants. The
/// result is the best partition sampled per round, not a proven optimum;
/// rounds with unavoidable repeats are still returned.
pub fn generate_schedule<R: Rng + ?Sized>(
    roster: &[String],
    plan: &SchedulePlan,
    rng: &mut R,
) -> Result<Schedule> {
    if roster.len() != plan.roster_size() {
        return Err(Error::InvalidRosterSize {
            expected: plan.roster_size(),
            actual: roster.len(),
        });
    }

    let mut history = TeammateHistory::new();
    let mut schedule = Schedule::with_capacity(plan.rounds);
    let mut total = 0;

    for number in 1..=plan.rounds {
        let search = search_round(roster, plan, &history, rng);
        tracing::debug!(
            round = number,
            score = search.score,
            max = plan.max_round_novelty(),
            trials = search.trials,
            "Committed round"
        );

        let round = Round {
            number: number as u32,
            groups: search.groups,
        };
        assert_round_invariants(&round, roster);

        history.record_round(&round);
        total += search.score;
        schedule.push(round);
    }

    tracing::info!(
        rounds = plan.rounds,
        novelty = total,
        max = plan.rounds * plan.max_round_novelty(),
        "Generated schedule"
    );

    Ok(schedule)
}

/// Keep the best of up to `trial_budget` candidates; stop early at the
/// round maximum
fn search_round<R: Rng + ?Sized>(
    roster: &[String],
    plan: &SchedulePlan,
    history: &TeammateHistory,
    rng: &mut R,
) -> RoundSearch {
    let target = plan.max_round_novelty();

    let groups = random_partition(roster, plan, rng);
    let score = novelty_score(&groups, history);
    let mut best = RoundSearch {
        groups,
        score,
        trials: 1,
    };

    while best.score < target && best.trials < plan.trial_budget {
        best.trials += 1;
        let candidate = random_partition(roster, plan, rng);
        let score = novelty_score(&candidate, history);
        if score > best.score {
            best.groups = candidate;
            best.score = score;
        }
    }

    best
}

/// One random split of the roster into groups of two teams
///
/// Shuffles the roster, cuts it into contiguous blocks of
/// `2 * team_size`, then shuffles each block and halves it.
pub fn random_partition<R: Rng + ?Sized>(
    roster: &[String],
    plan: &SchedulePlan,
    rng: &mut R,
) -> Vec<Group> {
    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);

    shuffled
        .chunks(2 * plan.team_size)
        .take(plan.groups)
        .enumerate()
        .map(|(index, block)| {
            let mut team_a = block.to_vec();
            team_a.shuffle(rng);
            let team_b = team_a.split_off(plan.team_size);
            Group {
                id: index as u32 + 1,
                team_a,
                team_b,
            }
        })
        .collect()
}

/// Teammate pairs in `groups` not present in `history`
pub fn novelty_score(groups: &[Group], history: &TeammateHistory) -> usize {
    groups
        .iter()
        .flat_map(|g| g.teams())
        .map(|team| history.novel_pairs(team))
        .sum()
}

/// Total novelty of a finished schedule, replayed round by round
pub fn schedule_novelty(schedule: &[Round]) -> usize {
    let mut history = TeammateHistory::new();
    let mut total = 0;
    for round in schedule {
        total += novelty_score(&round.groups, &history);
        history.record_round(round);
    }
    total
}
