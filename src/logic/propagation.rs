//! Winner selection and replacement: carry a corrected result up the bracket.
//!
//! A participant that was advanced into later rounds before a result was corrected
//! must be retracted from every round it reached and swapped for the new one. The
//! walk follows only the chain that participant actually occupied; sibling branches
//! are never touched.

use crate::models::participant::same_participant;
use crate::models::{Bracket, BracketError, Match, Participant, Slot};

/// Record `chosen` as the winner of `match_id` and propagate it upwards.
///
/// `chosen` must occupy `player1` or `player2` of the match. On error the bracket
/// is left unchanged. Selecting the same winner again is a no-op.
pub fn select_winner(
    bracket: &mut Bracket,
    match_id: &str,
    chosen: &Participant,
) -> Result<(), BracketError> {
    let pos = bracket
        .position(match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;
    let current = &bracket.matches()[pos];
    if current.slot_of(chosen).is_none() {
        return Err(BracketError::ParticipantNotInMatch {
            match_id: match_id.to_string(),
            participant_id: chosen.id.clone(),
        });
    }

    let chain = ancestor_chain(bracket, pos)?;
    let child_index = current.index;
    let matches = bracket.matches_mut();
    matches[pos].winner = Some(chosen.clone());

    let Some((&parent_pos, rest)) = chain.split_first() else {
        log::debug!("Final match {} decided", match_id);
        return Ok(());
    };

    let parent = &mut matches[parent_pos];
    let target = Slot::for_child(child_index);
    let outgoing = parent.slot(target).cloned();
    if outgoing.is_some() && same_participant(parent.winner.as_ref(), outgoing.as_ref()) {
        parent.winner = Some(chosen.clone());
    }
    *parent.slot_mut(target) = Some(chosen.clone());
    log::debug!(
        "Advanced {} into match {} ({:?})",
        chosen.id,
        parent.id,
        target
    );

    if let Some(displaced) = outgoing {
        retract(matches, rest, &displaced, chosen);
    }
    Ok(())
}

/// Swap `outgoing_id` for `incoming` in `match_id`, then in every later round the
/// outgoing participant had reached, including any winner fields it held.
pub fn replace_participant(
    bracket: &mut Bracket,
    match_id: &str,
    outgoing_id: &str,
    incoming: Participant,
) -> Result<(), BracketError> {
    let pos = bracket
        .position(match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;
    let outgoing = Participant::with_id(outgoing_id, "");
    let current = &bracket.matches()[pos];
    if current.slot_of(&outgoing).is_none() {
        return Err(BracketError::ParticipantNotInMatch {
            match_id: match_id.to_string(),
            participant_id: outgoing_id.to_string(),
        });
    }
    // A participant plays at most one match per round.
    if incoming.id != outgoing_id
        && bracket
            .round(current.round)
            .any(|m| m.slot_of(&incoming).is_some())
    {
        return Err(BracketError::DuplicateParticipant(incoming.id));
    }

    let chain = ancestor_chain(bracket, pos)?;
    let matches = bracket.matches_mut();
    let start = [pos];
    retract(matches, &start, &outgoing, &incoming);
    log::debug!(
        "Replaced {} with {} from match {}",
        outgoing_id,
        incoming.id,
        match_id
    );
    retract(matches, &chain, &outgoing, &incoming);
    Ok(())
}

/// Walk `path` (positions, bottom to top) replacing `displaced` with `chosen`.
/// Stops at the first match where `displaced` does not play.
fn retract(
    matches: &mut [Match],
    path: &[usize],
    displaced: &Participant,
    chosen: &Participant,
) {
    for &pos in path {
        let m = &mut matches[pos];
        let Some(slot) = m.slot_of(displaced) else {
            break;
        };
        if same_participant(m.winner.as_ref(), Some(displaced)) {
            m.winner = Some(chosen.clone());
        }
        *m.slot_mut(slot) = Some(chosen.clone());
        log::debug!(
            "Retracted {} from match {} in favour of {}",
            displaced.id,
            m.id,
            chosen.id
        );
    }
}

/// Positions of every ancestor of the match at `pos`, nearest first.
fn ancestor_chain(bracket: &Bracket, mut pos: usize) -> Result<Vec<usize>, BracketError> {
    let mut chain = Vec::new();
    while let Some(parent) = bracket.parent_position(pos)? {
        chain.push(parent);
        pos = parent;
    }
    Ok(chain)
}

impl Bracket {
    /// Copy-on-write variant of [`select_winner`].
    pub fn with_winner(&self, match_id: &str, chosen: &Participant) -> Result<Bracket, BracketError> {
        let mut next = self.clone();
        select_winner(&mut next, match_id, chosen)?;
        Ok(next)
    }
}
