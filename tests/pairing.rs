//! Integration tests for round generation: rest rotation and pairing rules.

use team_tournament_web::{
    generate_first_two_rounds, generate_next_round, MatchStore, TeamId, TeamStore, Tournament,
    TournamentError,
};

fn tournament_with_teams(n: usize) -> Tournament {
    let mut t = Tournament::new();
    for i in 0..n {
        t.register_team(format!("Team {i}")).unwrap();
    }
    t
}

fn pairs_of_round(t: &Tournament, round: u32) -> Vec<(TeamId, TeamId)> {
    t.matches
        .by_round(round)
        .unwrap()
        .iter()
        .filter(|m| !m.is_rest())
        .map(|m| {
            let a = m.team_a;
            let b = m.team_b.unwrap();
            (a.min(b), a.max(b))
        })
        .collect()
}

#[test]
fn generate_requires_two_active_teams() {
    let mut t = tournament_with_teams(1);
    assert!(matches!(
        generate_next_round(&mut t),
        Err(TournamentError::InsufficientTeams { active: 1 })
    ));
}

#[test]
fn four_teams_give_two_matches_and_no_rest() {
    let mut t = tournament_with_teams(4);
    let generated = generate_next_round(&mut t).unwrap();
    assert_eq!(generated.len(), 2);
    let mut seen = Vec::new();
    for m in &generated {
        assert_eq!(m.round, 1);
        assert!(!m.is_rest());
        assert!(!m.played);
        assert_eq!(m.winner, None);
        let b = m.team_b.unwrap();
        assert_ne!(m.team_a, b);
        seen.push(m.team_a);
        seen.push(b);
    }
    seen.sort_unstable();
    seen.dedup();
    // every team plays exactly once
    assert_eq!(seen.len(), 4);
}

#[test]
fn odd_team_count_creates_exactly_one_rest_record() {
    let mut t = tournament_with_teams(7);
    let generated = generate_next_round(&mut t).unwrap();
    let rests: Vec<_> = generated.iter().filter(|m| m.is_rest()).collect();
    assert_eq!(rests.len(), 1);
    assert!(rests[0].played);
    assert_eq!(rests[0].winner, None);
    assert_eq!(generated.iter().filter(|m| !m.is_rest()).count(), 3);
}

#[test]
fn rest_rotates_before_anyone_rests_twice() {
    let mut t = tournament_with_teams(5);
    for _ in 0..3 {
        generate_next_round(&mut t).unwrap();
    }
    let teams = t.teams.list_all().unwrap();
    assert!(teams.iter().all(|team| team.rests <= 1));
    assert_eq!(teams.iter().filter(|team| team.rests == 1).count(), 3);
}

#[test]
fn round_two_avoids_repeat_pairings() {
    let mut t = tournament_with_teams(4);
    generate_next_round(&mut t).unwrap();
    let first = pairs_of_round(&t, 1);
    generate_next_round(&mut t).unwrap();
    let second = pairs_of_round(&t, 2);
    assert_eq!(second.len(), 2);
    for pair in &second {
        assert!(!first.contains(pair), "round 2 repeated pairing {pair:?}");
    }
}

#[test]
fn pairing_records_opponent_history() {
    let mut t = tournament_with_teams(4);
    generate_next_round(&mut t).unwrap();
    for m in t.matches.by_round(1).unwrap() {
        let a = t.team(m.team_a).unwrap();
        let b = t.team(m.team_b.unwrap()).unwrap();
        assert!(a.has_faced(&b.name));
        assert!(b.has_faced(&a.name));
        assert_eq!(a.opponents.len(), 1);
    }
}

#[test]
fn eliminated_teams_are_not_paired() {
    let mut t = tournament_with_teams(4);
    let mut out = t.team(1).unwrap();
    out.eliminated = true;
    t.teams.save(&out).unwrap();

    let generated = generate_next_round(&mut t).unwrap();
    // 3 active teams: one rest record plus one match, none involving team 1
    assert_eq!(generated.len(), 2);
    assert!(generated.iter().all(|m| !m.involves(1)));
    assert_eq!(generated.iter().filter(|m| m.is_rest()).count(), 1);
}

#[test]
fn first_two_rounds_only_from_round_zero() {
    let mut t = tournament_with_teams(4);
    let generated = generate_first_two_rounds(&mut t).unwrap();
    assert_eq!(generated.len(), 4);
    assert_eq!(t.matches.by_round(1).unwrap().len(), 2);
    assert_eq!(t.matches.by_round(2).unwrap().len(), 2);
    assert!(matches!(
        generate_first_two_rounds(&mut t),
        Err(TournamentError::InvalidPhase { current_round: 2 })
    ));
}
