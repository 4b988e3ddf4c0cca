//! Tournament engine logic: pairing, results, derived state, roster setup.

mod pairing;
mod results;
mod setup;
mod state;

pub use pairing::{
    generate_first_two_rounds, generate_next_round, generate_round, generate_round_with,
};
pub use results::{reconcile_elimination_flags, record_result};
pub use setup::import_teams_csv;
pub use state::{
    can_advance_round, can_generate_first_two_rounds, current_round, displayed_round, is_finished,
    pending_matches, round_window, summary, winner, RoundWindow,
};
