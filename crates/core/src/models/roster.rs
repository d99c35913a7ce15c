//! Roster model - the participants registered for one period

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Participants in arrival order, without duplicates
///
/// Persisted as a plain list of names. A stored list containing duplicates
/// or blank names is rejected on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a participant, trimming surrounding whitespace
    pub fn insert(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        if self.contains(name) {
            return Err(Error::DuplicateParticipant(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = Error;

    fn try_from(names: Vec<String>) -> Result<Self> {
        let mut roster = Roster::new();
        for name in &names {
            roster.insert(name)?;
        }
        Ok(roster)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.names
    }
}
