//! Roster setup: bulk team registration from CSV.

use crate::models::{Team, Tournament, TournamentError};
use crate::store::{MatchStore, TeamStore};

/// Register one team per CSV record (first field is the name).
///
/// Blank names are skipped; names already registered are skipped with a
/// warning so a seed file can be applied repeatedly. Returns the teams
/// that were actually created.
pub fn import_teams_csv<T: TeamStore, M: MatchStore>(
    tournament: &mut Tournament<T, M>,
    data: &str,
) -> Result<Vec<Team>, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut added = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TournamentError::Import(e.to_string()))?;
        let name = match record.get(0) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        if tournament.teams.exists_by_name(&name)? {
            log::warn!("skipping already-registered team '{}'", name);
            continue;
        }
        added.push(tournament.register_team(name)?);
    }
    log::info!("imported {} team(s) from CSV", added.len());
    Ok(added)
}
