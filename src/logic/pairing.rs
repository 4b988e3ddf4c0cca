//! Round generation: rest rotation and opponent pairing.

use crate::models::{GameMatch, Team, Tournament, TournamentError};
use crate::store::{MatchStore, TeamStore};
use rand::seq::SliceRandom;
use rand::Rng;

use super::state;

/// Generate the next round (current round + 1).
pub fn generate_next_round<T: TeamStore, M: MatchStore>(
    tournament: &mut Tournament<T, M>,
) -> Result<Vec<GameMatch>, TournamentError> {
    let target = state::current_round(&tournament.matches)? + 1;
    generate_round(tournament, target)
}

/// Generate matches for a specific target round.
///
/// Completion of earlier rounds is the caller's concern
/// ([`state::can_advance_round`]); this only requires >= 2 active teams.
pub fn generate_round<T: TeamStore, M: MatchStore>(
    tournament: &mut Tournament<T, M>,
    target: u32,
) -> Result<Vec<GameMatch>, TournamentError> {
    generate_round_with(tournament, target, &mut rand::thread_rng())
}

/// Generate the first two rounds in one go, before any result is recorded.
///
/// Round 2 is paired from the same roster state as round 1, so both can be
/// posted at once; round-completion gating then holds the tournament on
/// round 1 until its results are in. Only valid while no round exists.
pub fn generate_first_two_rounds<T: TeamStore, M: MatchStore>(
    tournament: &mut Tournament<T, M>,
) -> Result<Vec<GameMatch>, TournamentError> {
    let current_round = state::current_round(&tournament.matches)?;
    if current_round != 0 {
        return Err(TournamentError::InvalidPhase { current_round });
    }
    let mut generated = generate_next_round(tournament)?;
    generated.extend(generate_round(tournament, 2)?);
    log::info!(
        "pre-generated rounds 1 and 2 ({} matches); round 1 must complete first",
        generated.len()
    );
    Ok(generated)
}

/// Generate a round with an explicit randomness source.
///
/// Every tie-break (rest pick, anchor pick, opponent pick) draws from
/// `rng`; nothing is kept between invocations.
pub fn generate_round_with<T: TeamStore, M: MatchStore, R: Rng>(
    tournament: &mut Tournament<T, M>,
    target: u32,
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError> {
    let mut available = tournament.teams.list_active()?;
    if available.len() < 2 {
        return Err(TournamentError::InsufficientTeams {
            active: available.len(),
        });
    }
    log::info!(
        "generating round {} with {} active teams",
        target,
        available.len()
    );

    available.shuffle(rng);

    let mut generated = Vec::new();

    // Odd team count: one team rests, chosen among those with the fewest
    // rests so the rotation stays fair.
    if available.len() % 2 == 1 {
        let rest = assign_rest(tournament, &mut available, target, rng)?;
        generated.push(rest);
    }

    while available.len() >= 2 {
        let anchor = available.remove(rng.gen_range(0..available.len()));
        match best_opponent(tournament, &anchor, &available, target, rng)? {
            Some(idx) => {
                let opponent = available.remove(idx);
                let game = pair(tournament, anchor, opponent, target)?;
                generated.push(game);
            }
            // Unreachable after the odd-count handling above; a mismatch in
            // returned match count is the caller's signal.
            None => log::warn!(
                "no opponent available for '{}' in round {}",
                anchor.name,
                target
            ),
        }
    }

    log::info!("round {}: {} matches generated", target, generated.len());
    Ok(generated)
}

/// Pick the resting team from `available`, persist its rest record, and
/// return that record. Tie-break: fewest rests, then name, then random
/// among the remaining minimum-rest candidates.
fn assign_rest<T: TeamStore, M: MatchStore, R: Rng>(
    tournament: &mut Tournament<T, M>,
    available: &mut Vec<Team>,
    target: u32,
    rng: &mut R,
) -> Result<GameMatch, TournamentError> {
    available.sort_by(|a, b| a.rests.cmp(&b.rests).then_with(|| a.name.cmp(&b.name)));
    let min_rests = available[0].rests;
    let candidates: Vec<usize> = available
        .iter()
        .enumerate()
        .filter(|(_, t)| t.rests == min_rests)
        .map(|(i, _)| i)
        .collect();
    let pick = candidates[rng.gen_range(0..candidates.len())];
    let mut resting = available.remove(pick);

    resting.rests += 1;
    tournament.teams.save(&resting)?;

    let mut rest = tournament.matches.create(resting.id, None, target)?;
    rest.played = true;
    tournament.matches.save(&rest)?;
    log::info!(
        "round {}: '{}' rests ({} rests total, picked from {} candidates)",
        target,
        resting.name,
        resting.rests,
        candidates.len()
    );
    Ok(rest)
}

/// Persist the pairing and record each team in the other's opponent set.
fn pair<T: TeamStore, M: MatchStore>(
    tournament: &mut Tournament<T, M>,
    mut anchor: Team,
    mut opponent: Team,
    target: u32,
) -> Result<GameMatch, TournamentError> {
    let game = tournament
        .matches
        .create(anchor.id, Some(opponent.id), target)?;
    anchor.add_opponent(&opponent.name);
    opponent.add_opponent(&anchor.name);
    tournament.teams.save(&anchor)?;
    tournament.teams.save(&opponent)?;
    log::info!(
        "round {}: '{}' vs '{}'",
        target,
        anchor.name,
        opponent.name
    );
    Ok(game)
}

/// Index of the best opponent for `anchor` among `candidates`.
///
/// Precedence: never faced, then idle in the previous round, then anyone;
/// each tier broken by fewest matches played in the two most recent
/// rounds, remaining ties at random.
fn best_opponent<T: TeamStore, M: MatchStore, R: Rng>(
    tournament: &Tournament<T, M>,
    anchor: &Team,
    candidates: &[Team],
    target: u32,
    rng: &mut R,
) -> Result<Option<usize>, TournamentError> {
    if candidates.is_empty() {
        return Ok(None);
    }

    let fresh: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| !anchor.has_faced(&c.name))
        .map(|(i, _)| i)
        .collect();
    if !fresh.is_empty() {
        return Ok(Some(least_active(tournament, candidates, &fresh, rng)));
    }

    let idle: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| !played_previous_round(tournament, c, target))
        .map(|(i, _)| i)
        .collect();
    if !idle.is_empty() {
        return Ok(Some(least_active(tournament, candidates, &idle, rng)));
    }

    let all: Vec<usize> = (0..candidates.len()).collect();
    Ok(Some(least_active(tournament, candidates, &all, rng)))
}

/// Whether the team played in the round before `target`.
fn played_previous_round<T: TeamStore, M: MatchStore>(
    tournament: &Tournament<T, M>,
    team: &Team,
    target: u32,
) -> bool {
    if target <= 1 {
        return false;
    }
    match tournament.matches.match_count_in_round(team.id, target - 1) {
        Ok(count) => count > 0,
        Err(e) => {
            log::warn!(
                "could not check previous round for '{}': {}; assuming idle",
                team.name,
                e
            );
            false
        }
    }
}

/// Of the candidate indexes in `pool`, the one with the fewest played
/// matches in the two most recent rounds; ties broken at random. A failed
/// count degrades to 0 rather than aborting the round.
fn least_active<T: TeamStore, M: MatchStore, R: Rng>(
    tournament: &Tournament<T, M>,
    candidates: &[Team],
    pool: &[usize],
    rng: &mut R,
) -> usize {
    if pool.len() == 1 {
        return pool[0];
    }
    let counts: Vec<u32> = pool
        .iter()
        .map(|&i| match tournament.matches.recent_match_count(candidates[i].id) {
            Ok(count) => count,
            Err(e) => {
                log::warn!(
                    "could not count recent matches for '{}': {}; assuming 0",
                    candidates[i].name,
                    e
                );
                0
            }
        })
        .collect();
    let min = counts.iter().copied().min().unwrap_or(0);
    let best: Vec<usize> = pool
        .iter()
        .zip(&counts)
        .filter(|(_, &count)| count == min)
        .map(|(&i, _)| i)
        .collect();
    best.choose(rng).copied().unwrap_or(pool[0])
}
