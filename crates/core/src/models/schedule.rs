//! Schedule model - rounds of groups, each group split into two teams

use serde::{Deserialize, Serialize};

/// Ordered rounds of one period; empty until generated
pub type Schedule = Vec<Round>;

/// One scheduling unit: every participant plays in exactly one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based sequence number within the schedule
    #[serde(rename = "match_id")]
    pub number: u32,
    #[serde(rename = "courts")]
    pub groups: Vec<Group>,
}

impl Round {
    /// All participants of the round, group by group
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().flat_map(Group::members)
    }

    /// All teams of the round, group by group
    pub fn teams(&self) -> impl Iterator<Item = &[String]> {
        self.groups.iter().flat_map(|g| g.teams())
    }
}

/// One partition of the roster inside a round (a court)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// 1-based identifier within the round
    #[serde(rename = "court_id")]
    pub id: u32,
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
}

impl Group {
    pub fn teams(&self) -> [&[String]; 2] {
        [self.team_a.as_slice(), self.team_b.as_slice()]
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.team_a
            .iter()
            .chain(self.team_b.iter())
            .map(String::as_str)
    }
}
