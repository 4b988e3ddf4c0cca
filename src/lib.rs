//! Double-loss elimination tournament organizer: models, stores, and engine logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    can_advance_round, can_generate_first_two_rounds, current_round, displayed_round,
    generate_first_two_rounds, generate_next_round, generate_round, generate_round_with,
    import_teams_csv, is_finished, pending_matches, reconcile_elimination_flags, record_result,
    round_window, summary, winner, RoundWindow,
};
pub use models::{
    GameMatch, MatchId, Team, TeamId, Tournament, TournamentError, TournamentSummary,
};
pub use store::{MatchStore, MemoryMatchStore, MemoryTeamStore, StoreError, TeamStore};
