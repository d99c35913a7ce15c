//! Teammate history accumulated while one schedule is generated

use std::collections::{HashMap, HashSet};

use crate::models::Round;

/// Who has already shared a team with whom
///
/// Pairs are unordered: recording (a, b) makes both `(a, b)` and `(b, a)`
/// known.
#[derive(Debug, Clone, Default)]
pub struct TeammateHistory {
    partners: HashMap<String, HashSet<String>>,
}

impl TeammateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_pair(&self, a: &str, b: &str) -> bool {
        self.partners
            .get(a)
            .is_some_and(|partners| partners.contains(b))
    }

    /// Pairs within `team` that have not played together yet
    pub fn novel_pairs(&self, team: &[String]) -> usize {
        team_pairs(team)
            .filter(|(a, b)| !self.contains_pair(a, b))
            .count()
    }

    pub fn record_team(&mut self, team: &[String]) {
        for (a, b) in team_pairs(team) {
            self.partners
                .entry(a.to_string())
                .or_default()
                .insert(b.to_string());
            self.partners
                .entry(b.to_string())
                .or_default()
                .insert(a.to_string());
        }
    }

    /// Record every team of a committed round
    pub fn record_round(&mut self, round: &Round) {
        for team in round.teams() {
            self.record_team(team);
        }
    }
}

/// Unordered pairs of distinct team members
pub(crate) fn team_pairs(team: &[String]) -> impl Iterator<Item = (&str, &str)> {
    team.iter().enumerate().flat_map(move |(i, a)| {
        team[i + 1..]
            .iter()
            .map(move |b| (a.as_str(), b.as_str()))
    })
}
