//! Storage seam: trait contracts for the team and match collections.
//!
//! The engines only talk to these traits, so a durable backend can be
//! dropped in without touching the pairing or result logic. The bundled
//! [`MemoryTeamStore`] / [`MemoryMatchStore`] keep everything in `Vec`s.

mod memory;

pub use memory::{MemoryMatchStore, MemoryTeamStore};

use crate::models::{GameMatch, MatchId, Team, TeamId};

/// Errors surfaced by a store implementation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// The requested record does not exist.
    NotFound,
    /// A team with this name already exists.
    DuplicateName(String),
    /// Backend failure (I/O, connection, ...), described for the caller.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "record not found"),
            StoreError::DuplicateName(name) => write!(f, "a team named '{}' already exists", name),
            StoreError::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

/// Persistent collection of teams.
pub trait TeamStore {
    /// Insert a new team with the given name, assigning its id.
    fn create(&mut self, name: &str) -> Result<Team, StoreError>;

    fn exists_by_name(&self, name: &str) -> Result<bool, StoreError>;

    fn get(&self, id: TeamId) -> Result<Team, StoreError>;

    /// Teams still in the tournament (not eliminated).
    fn list_active(&self) -> Result<Vec<Team>, StoreError>;

    fn list_eliminated(&self) -> Result<Vec<Team>, StoreError>;

    fn list_all(&self) -> Result<Vec<Team>, StoreError>;

    /// Write back a modified team.
    fn save(&mut self, team: &Team) -> Result<(), StoreError>;

    /// Remove every team. Sequential-id stores restart the sequence at 1.
    fn delete_all(&mut self) -> Result<(), StoreError>;
}

/// Persistent collection of matches.
pub trait MatchStore {
    /// Insert a new, unplayed match for the given round, assigning its id.
    /// `team_b` of `None` creates a rest record.
    fn create(
        &mut self,
        team_a: TeamId,
        team_b: Option<TeamId>,
        round: u32,
    ) -> Result<GameMatch, StoreError>;

    fn get(&self, id: MatchId) -> Result<GameMatch, StoreError>;

    /// All matches of a round, in creation order.
    fn by_round(&self, round: u32) -> Result<Vec<GameMatch>, StoreError>;

    /// Unplayed matches of a round. Rest records never show up here
    /// (they are created already played).
    fn unplayed_by_round(&self, round: u32) -> Result<Vec<GameMatch>, StoreError>;

    /// Highest round number of any match, `None` when no matches exist.
    fn max_round(&self) -> Result<Option<u32>, StoreError>;

    /// Played matches involving the team in the two most recent rounds.
    fn recent_match_count(&self, team: TeamId) -> Result<u32, StoreError>;

    /// Matches involving the team in the given round, played or not.
    fn match_count_in_round(&self, team: TeamId, round: u32) -> Result<u32, StoreError>;

    /// Write back a modified match.
    fn save(&mut self, game: &GameMatch) -> Result<(), StoreError>;

    /// Remove every match. Sequential-id stores restart the sequence at 1.
    fn delete_all(&mut self) -> Result<(), StoreError>;
}
