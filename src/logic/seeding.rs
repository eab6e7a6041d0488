//! Round-1 population: place the registered participants into the opening matches.

use crate::models::{Bracket, BracketError, Participant, Slot};
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// How participants are ordered before they are placed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Seeding {
    /// Keep the given (registration) order.
    #[default]
    InOrder,
    /// Shuffle randomly first.
    Random,
}

/// Place participants into round 1: participant `i` goes to match `i / 2`,
/// `player1` for even `i`, `player2` for odd.
///
/// Requires exactly `participants_count` participants with distinct ids. Any
/// earlier assignment is discarded: round 1 is overwritten and every later round
/// is emptied, winners included.
pub fn seed_participants(
    bracket: &mut Bracket,
    participants: &[Participant],
    seeding: Seeding,
) -> Result<(), BracketError> {
    let expected = bracket.participants_count();
    if participants.len() != expected as usize {
        return Err(BracketError::InvalidSeeding {
            expected,
            actual: participants.len(),
        });
    }
    let mut seen = HashSet::new();
    for p in participants {
        if !seen.insert(p.id.as_str()) {
            return Err(BracketError::DuplicateParticipant(p.id.clone()));
        }
    }

    let mut order: Vec<&Participant> = participants.iter().collect();
    if seeding == Seeding::Random {
        order.shuffle(&mut rand::thread_rng());
    }

    for m in bracket.matches_mut().iter_mut().filter(|m| m.round > 1) {
        m.player1 = None;
        m.player2 = None;
        m.winner = None;
    }

    for (i, participant) in order.into_iter().enumerate() {
        let index = (i / 2) as u32;
        let pos = bracket.find_position(1, index).ok_or_else(|| {
            BracketError::MalformedBracket(format!("round 1 has no match at index {}", index))
        })?;
        let m = &mut bracket.matches_mut()[pos];
        *m.slot_mut(Slot::for_child(i as u32)) = Some(participant.clone());
        m.winner = None;
        log::debug!("Seeded {} into match {}", participant.id, m.id);
    }
    Ok(())
}
