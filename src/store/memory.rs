//! In-memory store implementations backing the single-binary app.

use crate::models::{GameMatch, MatchId, Team, TeamId};
use crate::store::{MatchStore, StoreError, TeamStore};

/// `Vec`-backed team store with sequential ids starting at 1.
pub struct MemoryTeamStore {
    teams: Vec<Team>,
    next_id: TeamId,
}

impl MemoryTeamStore {
    pub fn new() -> Self {
        Self {
            teams: Vec::new(),
            next_id: 1,
        }
    }
}

impl Default for MemoryTeamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamStore for MemoryTeamStore {
    fn create(&mut self, name: &str) -> Result<Team, StoreError> {
        if self.teams.iter().any(|t| t.name == name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let team = Team::new(self.next_id, name);
        self.next_id += 1;
        self.teams.push(team.clone());
        Ok(team)
    }

    fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.teams.iter().any(|t| t.name == name))
    }

    fn get(&self, id: TeamId) -> Result<Team, StoreError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn list_active(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.teams.iter().filter(|t| !t.eliminated).cloned().collect())
    }

    fn list_eliminated(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.teams.iter().filter(|t| t.eliminated).cloned().collect())
    }

    fn list_all(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.teams.clone())
    }

    fn save(&mut self, team: &Team) -> Result<(), StoreError> {
        match self.teams.iter_mut().find(|t| t.id == team.id) {
            Some(slot) => {
                *slot = team.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn delete_all(&mut self) -> Result<(), StoreError> {
        self.teams.clear();
        self.next_id = 1;
        Ok(())
    }
}

/// `Vec`-backed match store; insertion order doubles as creation order.
pub struct MemoryMatchStore {
    matches: Vec<GameMatch>,
    next_id: MatchId,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
            next_id: 1,
        }
    }
}

impl Default for MemoryMatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStore for MemoryMatchStore {
    fn create(
        &mut self,
        team_a: TeamId,
        team_b: Option<TeamId>,
        round: u32,
    ) -> Result<GameMatch, StoreError> {
        let game = GameMatch::new(self.next_id, team_a, team_b, round);
        self.next_id += 1;
        self.matches.push(game.clone());
        Ok(game)
    }

    fn get(&self, id: MatchId) -> Result<GameMatch, StoreError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn by_round(&self, round: u32) -> Result<Vec<GameMatch>, StoreError> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.round == round)
            .cloned()
            .collect())
    }

    fn unplayed_by_round(&self, round: u32) -> Result<Vec<GameMatch>, StoreError> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.round == round && !m.played)
            .cloned()
            .collect())
    }

    fn max_round(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.matches.iter().map(|m| m.round).max())
    }

    fn recent_match_count(&self, team: TeamId) -> Result<u32, StoreError> {
        let max = self.matches.iter().map(|m| m.round).max().unwrap_or(0);
        let from = max.saturating_sub(1);
        Ok(self
            .matches
            .iter()
            .filter(|m| m.played && m.round >= from && m.involves(team))
            .count() as u32)
    }

    fn match_count_in_round(&self, team: TeamId, round: u32) -> Result<u32, StoreError> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.round == round && m.involves(team))
            .count() as u32)
    }

    fn save(&mut self, game: &GameMatch) -> Result<(), StoreError> {
        match self.matches.iter_mut().find(|m| m.id == game.id) {
            Some(slot) => {
                *slot = game.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn delete_all(&mut self) -> Result<(), StoreError> {
        self.matches.clear();
        self.next_id = 1;
        Ok(())
    }
}
