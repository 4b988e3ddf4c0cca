//! Team data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for a team (store-assigned, sequential).
pub type TeamId = u64;

/// A competing team in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Unique, immutable once registered.
    pub name: String,
    pub losses: u32,
    /// Out of the tournament (two losses, per round policy).
    pub eliminated: bool,
    /// Rounds this team sat out (used for fair rest rotation).
    pub rests: u32,
    /// Names of opponents already faced.
    pub opponents: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a team with the given id and name. Counters start at zero.
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            losses: 0,
            eliminated: false,
            rests: 0,
            opponents: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Record an opponent this team has now faced.
    pub fn add_opponent(&mut self, name: &str) {
        self.opponents.insert(name.to_string());
    }

    /// Whether this team has already played against `name`.
    pub fn has_faced(&self, name: &str) -> bool {
        self.opponents.contains(name)
    }

    /// Record one loss.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Whether this team can still be paired.
    pub fn can_play(&self) -> bool {
        !self.eliminated
    }
}
