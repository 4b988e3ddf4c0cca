//! Tournament (the two stores behind one handle), errors, and the summary view.

use crate::models::game::{GameMatch, MatchId};
use crate::models::team::{Team, TeamId};
use crate::store::{MatchStore, MemoryMatchStore, MemoryTeamStore, StoreError, TeamStore};
use serde::Serialize;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A team with this name is already registered (names are unique).
    DuplicateName(String),
    /// Fewer than 2 active teams; no round can be generated.
    InsufficientTeams { active: usize },
    /// The first two rounds can only be generated before round 1 exists.
    InvalidPhase { current_round: u32 },
    /// No match with this id.
    MatchNotFound(MatchId),
    /// No team with this id.
    TeamNotFound(TeamId),
    /// The operation does not apply to this record (e.g. a result on a rest).
    InvalidOperation(&'static str),
    /// The named winner is not one of the match's two teams.
    NotAParticipant { team: TeamId, game: MatchId },
    /// A roster import could not be parsed.
    Import(String),
    /// The backing store failed.
    Store(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::DuplicateName(name) => {
                write!(f, "A team named '{}' is already registered", name)
            }
            TournamentError::InsufficientTeams { active } => {
                write!(f, "Not enough active teams to generate a round (have {}, need 2)", active)
            }
            TournamentError::InvalidPhase { current_round } => {
                write!(
                    f,
                    "The first two rounds can only be generated before the tournament starts (current round {})",
                    current_round
                )
            }
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            TournamentError::InvalidOperation(msg) => write!(f, "{}", msg),
            TournamentError::NotAParticipant { team, game } => {
                write!(f, "Team {} is not a participant in match {}", team, game)
            }
            TournamentError::Import(msg) => write!(f, "Could not import team list: {}", msg),
            TournamentError::Store(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl From<StoreError> for TournamentError {
    /// Fallback mapping for store failures where a more specific error
    /// (`TeamNotFound`, `MatchNotFound`) does not apply.
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateName(name) => TournamentError::DuplicateName(name),
            other => TournamentError::Store(other.to_string()),
        }
    }
}

/// A double-loss elimination tournament: a team store and a match store
/// behind one handle. Engine operations in [`crate::logic`] take this
/// mutably; callers serving concurrent requests must serialize them (one
/// lock around the whole tournament).
pub struct Tournament<T: TeamStore = MemoryTeamStore, M: MatchStore = MemoryMatchStore> {
    pub teams: T,
    pub matches: M,
}

impl Tournament {
    /// Create an empty tournament backed by the in-memory stores.
    pub fn new() -> Self {
        Self {
            teams: MemoryTeamStore::new(),
            matches: MemoryMatchStore::new(),
        }
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TeamStore, M: MatchStore> Tournament<T, M> {
    /// Create a tournament over externally supplied stores.
    pub fn with_stores(teams: T, matches: M) -> Self {
        Self { teams, matches }
    }

    /// Register a new team. Names are trimmed and must be unique and non-empty.
    pub fn register_team(&mut self, name: impl Into<String>) -> Result<Team, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidOperation("Team name must not be empty"));
        }
        if self.teams.exists_by_name(name)? {
            return Err(TournamentError::DuplicateName(name.to_string()));
        }
        let team = self.teams.create(name)?;
        log::info!("registered team '{}' (id {})", team.name, team.id);
        Ok(team)
    }

    /// Look up a team by id.
    pub fn team(&self, id: TeamId) -> Result<Team, TournamentError> {
        self.teams.get(id).map_err(|e| match e {
            StoreError::NotFound => TournamentError::TeamNotFound(id),
            other => TournamentError::Store(other.to_string()),
        })
    }

    /// Look up a match by id.
    pub fn game(&self, id: MatchId) -> Result<GameMatch, TournamentError> {
        self.matches.get(id).map_err(|e| match e {
            StoreError::NotFound => TournamentError::MatchNotFound(id),
            other => TournamentError::Store(other.to_string()),
        })
    }

    /// Reset the tournament: delete every match and team. Stores with
    /// sequential ids restart the sequence at 1.
    pub fn reset(&mut self) -> Result<(), TournamentError> {
        // Matches first: they reference teams.
        self.matches.delete_all()?;
        self.teams.delete_all()?;
        log::info!("tournament reset: all teams and matches deleted");
        Ok(())
    }
}

/// Snapshot of the tournament for the presentation layer.
#[derive(Clone, Debug, Serialize)]
pub struct TournamentSummary {
    /// Active teams, ascending by losses.
    pub active_teams: Vec<Team>,
    /// Eliminated teams, descending by losses.
    pub eliminated_teams: Vec<Team>,
    pub total_teams: usize,
    pub current_round: u32,
    /// Round callers should act on; trails `current_round` while an
    /// earlier pre-generated round still has pending matches.
    pub displayed_round: u32,
    /// The displayed round's matches, in creation order.
    pub round_matches: Vec<GameMatch>,
    pub pending_in_displayed_round: usize,
    pub can_advance_round: bool,
    pub can_generate_first_two_rounds: bool,
    pub finished: bool,
    pub winner: Option<Team>,
}
