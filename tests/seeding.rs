//! Integration tests for round-1 seeding.

use std::collections::HashSet;
use table_tennis_bracket::{
    generate_bracket, seed_participants, select_winner, BracketError, Participant, Seeding,
};

fn roster(n: usize) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(format!("P{i}"))).collect()
}

#[test]
fn in_order_fills_player1_then_player2() {
    let mut b = generate_bracket(8).unwrap();
    let players = roster(8);
    seed_participants(&mut b, &players, Seeding::InOrder).unwrap();

    for (i, m) in b.round(1).enumerate() {
        assert_eq!(m.player1.as_ref(), Some(&players[i * 2]));
        assert_eq!(m.player2.as_ref(), Some(&players[i * 2 + 1]));
    }
    assert!(b.round(2).all(|m| m.player1.is_none() && m.player2.is_none()));
}

#[test]
fn random_places_everyone_once() {
    let mut b = generate_bracket(16).unwrap();
    let players = roster(16);
    seed_participants(&mut b, &players, Seeding::Random).unwrap();

    let placed: HashSet<&str> = b
        .round(1)
        .flat_map(|m| [m.player1.as_ref(), m.player2.as_ref()])
        .map(|p| p.unwrap().id.as_str())
        .collect();
    assert_eq!(placed.len(), 16);
    assert!(players.iter().all(|p| placed.contains(p.id.as_str())));
}

#[test]
fn wrong_roster_size_is_rejected() {
    let mut b = generate_bracket(8).unwrap();
    assert_eq!(
        seed_participants(&mut b, &roster(6), Seeding::InOrder),
        Err(BracketError::InvalidSeeding { expected: 8, actual: 6 })
    );
}

#[test]
fn duplicate_participants_are_rejected() {
    let mut b = generate_bracket(4).unwrap();
    let mut players = roster(3);
    players.push(players[0].clone());
    let before = b.clone();
    assert_eq!(
        seed_participants(&mut b, &players, Seeding::InOrder),
        Err(BracketError::DuplicateParticipant(players[0].id.clone()))
    );
    assert_eq!(b, before);
}

#[test]
fn reseeding_clears_later_rounds() {
    let mut b = generate_bracket(4).unwrap();
    let first = roster(4);
    seed_participants(&mut b, &first, Seeding::InOrder).unwrap();
    select_winner(&mut b, "0", &first[0]).unwrap();
    select_winner(&mut b, "1", &first[2]).unwrap();
    select_winner(&mut b, "2", &first[0]).unwrap();

    let second = roster(4);
    seed_participants(&mut b, &second, Seeding::InOrder).unwrap();

    assert!(b
        .round(2)
        .all(|m| m.player1.is_none() && m.player2.is_none() && m.winner.is_none()));
    assert!(b.round(1).all(|m| m.winner.is_none()));
    assert!(b.champion().is_none());
    assert_eq!(b.find(1, 0).unwrap().player1.as_ref(), Some(&second[0]));
}
