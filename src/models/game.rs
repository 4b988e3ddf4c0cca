//! Match (game) data structure: one pairing or rest record per round.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a match (store-assigned, sequential).
pub type MatchId = u64;

/// A single match: two teams in a given round, or a rest record when a
/// team sits the round out (`team_b` absent or equal to `team_a`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub team_a: TeamId,
    /// `None` marks a rest record. A self-reference is accepted as the
    /// same thing for stores that cannot hold an absent reference.
    pub team_b: Option<TeamId>,
    /// Round this match belongs to (>= 1).
    pub round: u32,
    pub winner: Option<TeamId>,
    /// Rest records are created played; regular matches become played
    /// when a winner is recorded.
    pub played: bool,
    pub created_at: DateTime<Utc>,
}

impl GameMatch {
    pub fn new(id: MatchId, team_a: TeamId, team_b: Option<TeamId>, round: u32) -> Self {
        Self {
            id,
            team_a,
            team_b,
            round,
            winner: None,
            played: false,
            created_at: Utc::now(),
        }
    }

    /// Whether this is a rest record (no real opponent).
    pub fn is_rest(&self) -> bool {
        match self.team_b {
            None => true,
            Some(b) => b == self.team_a,
        }
    }

    /// Whether the given team takes part in this match.
    pub fn involves(&self, team: TeamId) -> bool {
        self.team_a == team || self.team_b == Some(team)
    }

    /// The other participant, if this is a regular match and `team` is in it.
    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if self.is_rest() {
            return None;
        }
        if self.team_a == team {
            self.team_b
        } else if self.team_b == Some(team) {
            Some(self.team_a)
        } else {
            None
        }
    }

    /// The losing team of a decided regular match.
    pub fn loser(&self) -> Option<TeamId> {
        if !self.played {
            return None;
        }
        self.winner.and_then(|w| self.opponent_of(w))
    }
}
