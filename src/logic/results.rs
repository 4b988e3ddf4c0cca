//! Result recording: loss bookkeeping, elimination policy, corrections.

use crate::models::{MatchId, TeamId, Tournament, TournamentError};
use crate::store::{MatchStore, TeamStore};

use super::state;

/// Record (or correct) the winner of a match.
///
/// Recording the same winner twice is a no-op. Recording a different
/// winner first reverses the old result (one loss back to the previous
/// loser, un-eliminating it below two losses) and then applies the new
/// one, so a mis-entered result can be fixed at any time.
pub fn record_result<T: TeamStore, M: MatchStore>(
    tournament: &mut Tournament<T, M>,
    match_id: MatchId,
    winner_id: TeamId,
) -> Result<(), TournamentError> {
    let mut game = tournament.game(match_id)?;
    if game.is_rest() {
        return Err(TournamentError::InvalidOperation(
            "This match is a rest record and does not take a result",
        ));
    }
    let winner = tournament.team(winner_id)?;
    if !game.involves(winner.id) {
        return Err(TournamentError::NotAParticipant {
            team: winner_id,
            game: match_id,
        });
    }

    if game.winner == Some(winner_id) {
        return Ok(());
    }

    // Undo the previous declaration before applying the new one.
    if let Some(previous_winner) = game.winner {
        if let Some(previous_loser_id) = game.opponent_of(previous_winner) {
            let mut previous_loser = tournament.team(previous_loser_id)?;
            previous_loser.losses = previous_loser.losses.saturating_sub(1);
            if previous_loser.losses < 2 {
                previous_loser.eliminated = false;
            }
            tournament.teams.save(&previous_loser)?;
            log::info!(
                "reversed result of match {}: '{}' back to {} losses",
                game.id,
                previous_loser.name,
                previous_loser.losses
            );
        }
    }

    game.winner = Some(winner_id);
    game.played = true;
    tournament.matches.save(&game)?;

    if let Some(loser_id) = game.opponent_of(winner_id) {
        let mut loser = tournament.team(loser_id)?;
        loser.add_loss();
        let match_round = game.round;
        let current_round = state::current_round(&tournament.matches)?;
        loser.eliminated = should_eliminate(loser.losses, match_round, current_round);
        if loser.eliminated {
            log::info!(
                "'{}' eliminated ({} losses, match round {}, tournament round {})",
                loser.name,
                loser.losses,
                match_round,
                current_round
            );
        } else if loser.losses >= 2 {
            log::info!(
                "'{}' has {} losses in round {} but stays in: round-1 results may still change",
                loser.name,
                loser.losses,
                match_round
            );
        }
        tournament.teams.save(&loser)?;
    }
    Ok(())
}

/// Elimination policy for a team that just took a loss.
///
/// Two losses eliminate, except while the tournament is still effectively
/// in its opening round: with rounds 1 and 2 pre-generated, a round-1
/// result entered late must be able to reverse before anyone is knocked
/// out on a round-2 result.
fn should_eliminate(losses: u32, match_round: u32, current_round: u32) -> bool {
    if losses < 2 {
        return false;
    }
    match_round >= 3 || current_round >= 2
}

/// Force `eliminated == (losses >= 2)` on every team once the tournament
/// has reached round 2. Corrects any drift left by the opening-round
/// window; idempotent and safe to call before any state read.
pub fn reconcile_elimination_flags<T: TeamStore, M: MatchStore>(
    tournament: &mut Tournament<T, M>,
) -> Result<usize, TournamentError> {
    if state::current_round(&tournament.matches)? < 2 {
        return Ok(0);
    }
    let mut corrected = 0;
    for mut team in tournament.teams.list_all()? {
        let should = team.losses >= 2;
        if team.eliminated != should {
            team.eliminated = should;
            tournament.teams.save(&team)?;
            log::info!(
                "corrected elimination flag for '{}' ({} losses, now {})",
                team.name,
                team.losses,
                if should { "eliminated" } else { "active" }
            );
            corrected += 1;
        }
    }
    if corrected > 0 {
        log::info!("reconciled elimination flags for {} team(s)", corrected);
    }
    Ok(corrected)
}
