//! Integration tests for winner selection, retraction and replacement.

use table_tennis_bracket::{
    generate_bracket, replace_participant, seed_participants, select_winner, Bracket,
    BracketError, Match, Participant, Seeding,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn player(name: &str) -> Participant {
    Participant::with_id(name.to_lowercase(), name)
}

fn at(b: &Bracket, round: u32, index: u32) -> &Match {
    b.find(round, index).unwrap()
}

fn id_at(b: &Bracket, round: u32, index: u32) -> String {
    at(b, round, index).id.clone()
}

fn pick(b: &mut Bracket, round: u32, index: u32, chosen: &Participant) -> Result<(), BracketError> {
    let id = id_at(b, round, index);
    select_winner(b, &id, chosen)
}

fn replace_at(
    b: &mut Bracket,
    round: u32,
    index: u32,
    outgoing: &str,
    incoming: Participant,
) -> Result<(), BracketError> {
    let id = id_at(b, round, index);
    replace_participant(b, &id, outgoing, incoming)
}

/// 8 participants: Alice vs Carol, Dan vs Eve, Finn vs Gus, Hana vs Ivy.
fn seeded_eight() -> Bracket {
    let mut b = generate_bracket(8).unwrap();
    let names = ["Alice", "Carol", "Dan", "Eve", "Finn", "Gus", "Hana", "Ivy"];
    let players: Vec<Participant> = names.iter().map(|n| player(n)).collect();
    seed_participants(&mut b, &players, Seeding::InOrder).unwrap();
    b
}

#[test]
fn winner_advances_into_parent_slot_by_parity() {
    init();
    let mut b = seeded_eight();
    pick(&mut b, 1, 0, &player("Alice")).unwrap();
    pick(&mut b, 1, 1, &player("Eve")).unwrap();

    assert_eq!(at(&b, 1, 0).winner, Some(player("Alice")));
    assert_eq!(at(&b, 2, 0).player1, Some(player("Alice")));
    assert_eq!(at(&b, 2, 0).player2, Some(player("Eve")));
    assert!(at(&b, 2, 0).winner.is_none());
    assert!(at(&b, 3, 0).player1.is_none());
}

#[test]
fn corrected_result_is_retracted_along_the_chain() {
    init();
    let mut b = seeded_eight();
    pick(&mut b, 1, 0, &player("Alice")).unwrap();
    pick(&mut b, 1, 1, &player("Dan")).unwrap();
    pick(&mut b, 2, 0, &player("Alice")).unwrap();
    assert_eq!(at(&b, 3, 0).player1, Some(player("Alice")));
    let before = b.clone();

    pick(&mut b, 1, 0, &player("Carol")).unwrap();

    assert_eq!(at(&b, 1, 0).winner, Some(player("Carol")));
    assert_eq!(at(&b, 2, 0).player1, Some(player("Carol")));
    assert_eq!(at(&b, 2, 0).winner, Some(player("Carol")));
    assert_eq!(at(&b, 3, 0).player1, Some(player("Carol")));
    assert!(at(&b, 3, 0).winner.is_none());

    // Sibling slots stay as they were.
    assert_eq!(at(&b, 2, 0).player2, Some(player("Dan")));
    assert_eq!(at(&b, 2, 1), at(&before, 2, 1));
    assert_eq!(at(&b, 3, 0).player2, at(&before, 3, 0).player2);
    for index in 1..4 {
        assert_eq!(at(&b, 1, index), at(&before, 1, index));
    }
}

#[test]
fn independent_parent_winner_is_kept() {
    let mut b = seeded_eight();
    pick(&mut b, 1, 0, &player("Alice")).unwrap();
    pick(&mut b, 1, 1, &player("Dan")).unwrap();
    pick(&mut b, 2, 0, &player("Dan")).unwrap();

    pick(&mut b, 1, 0, &player("Carol")).unwrap();

    assert_eq!(at(&b, 2, 0).player1, Some(player("Carol")));
    assert_eq!(at(&b, 2, 0).winner, Some(player("Dan")));
    assert_eq!(at(&b, 3, 0).player1, Some(player("Dan")));
}

#[test]
fn selecting_twice_is_idempotent() {
    let mut b = seeded_eight();
    pick(&mut b, 1, 0, &player("Alice")).unwrap();
    pick(&mut b, 1, 1, &player("Dan")).unwrap();
    pick(&mut b, 2, 0, &player("Alice")).unwrap();
    let once = b.clone();

    pick(&mut b, 2, 0, &player("Alice")).unwrap();
    assert_eq!(b, once);
    pick(&mut b, 1, 0, &player("Alice")).unwrap();
    assert_eq!(b, once);
}

#[test]
fn final_selection_only_sets_winner() {
    let mut b = generate_bracket(2).unwrap();
    seed_participants(&mut b, &[player("Alice"), player("Bob")], Seeding::InOrder).unwrap();
    let final_id = id_at(&b, 1, 0);
    select_winner(&mut b, &final_id, &player("Bob")).unwrap();

    assert_eq!(b.len(), 1);
    assert_eq!(at(&b, 1, 0).winner, Some(player("Bob")));
    assert_eq!(at(&b, 1, 0).player1, Some(player("Alice")));
    assert_eq!(b.champion(), Some(&player("Bob")));
}

#[test]
fn correction_reaches_the_champion_in_a_deep_bracket() {
    init();
    let mut b = generate_bracket(16).unwrap();
    let players: Vec<Participant> = (0..16).map(|i| player(&format!("P{i}"))).collect();
    seed_participants(&mut b, &players, Seeding::InOrder).unwrap();

    // Even-numbered seed of every round-1 match wins, then player1 wins every later round.
    for index in 0..8 {
        let id = id_at(&b, 1, index);
        select_winner(&mut b, &id, &players[index as usize * 2]).unwrap();
    }
    for round in 2..=4 {
        for index in 0..(16u32 >> round) {
            let m = at(&b, round, index).clone();
            select_winner(&mut b, &m.id, m.player1.as_ref().unwrap()).unwrap();
        }
    }
    assert_eq!(b.champion(), Some(&players[0]));

    pick(&mut b, 1, 0, &players[1]).unwrap();

    for round in 2..=4 {
        let m = at(&b, round, 0);
        assert_eq!(m.player1.as_ref(), Some(&players[1]), "round {round}");
        assert_eq!(m.winner.as_ref(), Some(&players[1]), "round {round}");
    }
    assert_eq!(b.champion(), Some(&players[1]));
    assert_eq!(at(&b, 4, 0).player2.as_ref(), Some(&players[8]));
    assert!(b.validate().is_ok());
}

#[test]
fn rejects_participant_outside_match_without_changes() {
    let mut b = seeded_eight();
    let before = b.clone();
    let err = pick(&mut b, 1, 0, &player("Dan")).unwrap_err();
    assert_eq!(
        err,
        BracketError::ParticipantNotInMatch {
            match_id: "0".into(),
            participant_id: "dan".into(),
        }
    );
    assert_eq!(b, before);
}

#[test]
fn rejects_selection_on_empty_match() {
    let mut b = seeded_eight();
    let before = b.clone();
    let id = id_at(&b, 2, 0);
    assert!(matches!(
        select_winner(&mut b, &id, &player("Alice")),
        Err(BracketError::ParticipantNotInMatch { .. })
    ));
    assert_eq!(b, before);
}

#[test]
fn rejects_unknown_match() {
    let mut b = seeded_eight();
    assert_eq!(
        select_winner(&mut b, "99", &player("Alice")),
        Err(BracketError::MatchNotFound("99".into()))
    );
}

#[test]
fn identity_is_by_id_not_name() {
    let mut b = seeded_eight();
    let renamed = Participant::with_id("alice", "Alice Smith");
    pick(&mut b, 1, 0, &renamed).unwrap();
    assert_eq!(at(&b, 2, 0).player1.as_ref().unwrap().name, "Alice Smith");
}

#[test]
fn with_winner_leaves_original_untouched() {
    let b = seeded_eight();
    let next = b.with_winner(&id_at(&b, 1, 2), &player("Gus")).unwrap();
    assert!(at(&b, 1, 2).winner.is_none());
    assert_eq!(at(&next, 1, 2).winner, Some(player("Gus")));
    assert_eq!(at(&next, 2, 1).player1, Some(player("Gus")));
}

#[test]
fn replacement_follows_every_round_reached() {
    let mut b = seeded_eight();
    pick(&mut b, 1, 0, &player("Alice")).unwrap();
    pick(&mut b, 1, 1, &player("Dan")).unwrap();
    pick(&mut b, 2, 0, &player("Alice")).unwrap();

    replace_at(&mut b, 1, 0, "alice", player("Zoe")).unwrap();

    assert_eq!(at(&b, 1, 0).player1, Some(player("Zoe")));
    assert_eq!(at(&b, 1, 0).player2, Some(player("Carol")));
    assert_eq!(at(&b, 1, 0).winner, Some(player("Zoe")));
    assert_eq!(at(&b, 2, 0).player1, Some(player("Zoe")));
    assert_eq!(at(&b, 2, 0).winner, Some(player("Zoe")));
    assert_eq!(at(&b, 3, 0).player1, Some(player("Zoe")));
    assert!(b.validate().is_ok());
}

#[test]
fn replacement_of_a_loser_stays_in_its_match() {
    let mut b = seeded_eight();
    pick(&mut b, 1, 0, &player("Alice")).unwrap();

    replace_at(&mut b, 1, 0, "carol", player("Zoe")).unwrap();

    assert_eq!(at(&b, 1, 0).player2, Some(player("Zoe")));
    assert_eq!(at(&b, 1, 0).winner, Some(player("Alice")));
    assert_eq!(at(&b, 2, 0).player1, Some(player("Alice")));
}

#[test]
fn replacement_rejects_bad_input() {
    let mut b = seeded_eight();
    let before = b.clone();
    assert!(matches!(
        replace_at(&mut b, 1, 0, "dan", player("Zoe")),
        Err(BracketError::ParticipantNotInMatch { .. })
    ));
    assert_eq!(
        replace_at(&mut b, 1, 0, "alice", player("Carol")),
        Err(BracketError::DuplicateParticipant("carol".into()))
    );
    assert_eq!(b, before);
}

#[test]
fn replacement_rejects_participant_already_in_the_round() {
    let mut b = generate_bracket(4).unwrap();
    let players = [player("A"), player("B"), player("C"), player("D")];
    seed_participants(&mut b, &players, Seeding::InOrder).unwrap();
    let before = b.clone();

    assert_eq!(
        replace_at(&mut b, 1, 0, "a", player("C")),
        Err(BracketError::DuplicateParticipant("c".into()))
    );
    assert_eq!(b, before);

    // Same id keeps its place (e.g. a corrected display name).
    replace_at(&mut b, 1, 0, "a", Participant::with_id("a", "Anna")).unwrap();
    assert_eq!(at(&b, 1, 0).player1.as_ref().unwrap().name, "Anna");
}
