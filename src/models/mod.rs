//! Data structures for the tournament: teams, matches, errors, summary view.

mod game;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentSummary};
