//! Derived tournament state: round numbers, gating, finish detection.

use crate::models::{GameMatch, Team, Tournament, TournamentError, TournamentSummary};
use crate::store::{MatchStore, TeamStore};

use super::results;

/// Which round(s) callers should act on right now.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundWindow {
    /// No rounds generated yet.
    Empty,
    /// One open round.
    Single(u32),
    /// Two rounds were prepared together and the earlier one still has
    /// pending matches; `front` must complete before `back` is acted on.
    Paired { front: u32, back: u32 },
}

/// Current round: the highest round any match belongs to, 0 when none.
pub fn current_round<M: MatchStore>(matches: &M) -> Result<u32, TournamentError> {
    Ok(matches.max_round()?.unwrap_or(0))
}

/// The round window for the current store state.
///
/// A `Paired` window arises when the round before the current one still
/// has unplayed matches; under normal gating that only happens after
/// pre-generating the first two rounds.
pub fn round_window<M: MatchStore>(matches: &M) -> Result<RoundWindow, TournamentError> {
    let current = current_round(matches)?;
    if current == 0 {
        return Ok(RoundWindow::Empty);
    }
    if current >= 2 {
        let front = current - 1;
        if !matches.unplayed_by_round(front)?.is_empty() {
            return Ok(RoundWindow::Paired {
                front,
                back: current,
            });
        }
    }
    Ok(RoundWindow::Single(current))
}

/// The round to show and resolve first: the window's front.
pub fn displayed_round<M: MatchStore>(matches: &M) -> Result<u32, TournamentError> {
    Ok(match round_window(matches)? {
        RoundWindow::Empty => 0,
        RoundWindow::Single(round) => round,
        RoundWindow::Paired { front, .. } => front,
    })
}

/// Unplayed matches of a round (rest records are born played, so they
/// never appear).
pub fn pending_matches<M: MatchStore>(
    matches: &M,
    round: u32,
) -> Result<Vec<GameMatch>, TournamentError> {
    if round == 0 {
        return Ok(Vec::new());
    }
    Ok(matches.unplayed_by_round(round)?)
}

/// Whether a new round may be generated: at least 2 active teams, and
/// every match of the open round window resolved.
pub fn can_advance_round<T: TeamStore, M: MatchStore>(
    tournament: &Tournament<T, M>,
) -> Result<bool, TournamentError> {
    if tournament.teams.list_active()?.len() < 2 {
        return Ok(false);
    }
    Ok(match round_window(&tournament.matches)? {
        RoundWindow::Empty => true,
        RoundWindow::Paired { .. } => false,
        RoundWindow::Single(round) => tournament.matches.unplayed_by_round(round)?.is_empty(),
    })
}

/// Whether the first two rounds may still be pre-generated (nothing
/// generated yet, enough teams).
pub fn can_generate_first_two_rounds<T: TeamStore, M: MatchStore>(
    tournament: &Tournament<T, M>,
) -> Result<bool, TournamentError> {
    Ok(tournament.teams.list_active()?.len() >= 2
        && current_round(&tournament.matches)? == 0)
}

/// The tournament is over once at least one round exists and at most one
/// team is still in.
pub fn is_finished<T: TeamStore, M: MatchStore>(
    tournament: &Tournament<T, M>,
) -> Result<bool, TournamentError> {
    Ok(current_round(&tournament.matches)? > 0
        && tournament.teams.list_active()?.len() <= 1)
}

/// The sole remaining team when the tournament is finished.
pub fn winner<T: TeamStore, M: MatchStore>(
    tournament: &Tournament<T, M>,
) -> Result<Option<Team>, TournamentError> {
    if !is_finished(tournament)? {
        return Ok(None);
    }
    Ok(tournament.teams.list_active()?.into_iter().next())
}

/// Build the presentation snapshot. Reconciles elimination flags first so
/// the view never shows a team on the wrong side of the two-loss line.
pub fn summary<T: TeamStore, M: MatchStore>(
    tournament: &mut Tournament<T, M>,
) -> Result<TournamentSummary, TournamentError> {
    results::reconcile_elimination_flags(tournament)?;

    let mut active_teams = tournament.teams.list_active()?;
    active_teams.sort_by_key(|t| t.losses);
    let mut eliminated_teams = tournament.teams.list_eliminated()?;
    eliminated_teams.sort_by_key(|t| std::cmp::Reverse(t.losses));
    let total_teams = active_teams.len() + eliminated_teams.len();

    let current = current_round(&tournament.matches)?;
    let displayed = displayed_round(&tournament.matches)?;
    let round_matches = if displayed == 0 {
        Vec::new()
    } else {
        tournament.matches.by_round(displayed)?
    };
    let pending_in_displayed_round = pending_matches(&tournament.matches, displayed)?.len();

    Ok(TournamentSummary {
        can_advance_round: can_advance_round(tournament)?,
        can_generate_first_two_rounds: can_generate_first_two_rounds(tournament)?,
        finished: is_finished(tournament)?,
        winner: winner(tournament)?,
        active_teams,
        eliminated_teams,
        total_teams,
        current_round: current,
        displayed_round: displayed,
        round_matches,
        pending_in_displayed_round,
    })
}
