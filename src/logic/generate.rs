//! Bracket generation: empty single-elimination tree for a power-of-two field.

use crate::models::{Bracket, BracketError, Match};

/// Generate the empty bracket for `participants_count` participants.
///
/// Rounds are emitted in increasing order, starting with `participants_count / 2`
/// matches in round 1 and halving down to the single final. Match ids are a
/// counter scoped to this bracket (`"0"`, `"1"`, ...).
pub fn generate_bracket(participants_count: u32) -> Result<Bracket, BracketError> {
    if participants_count < 2 || !participants_count.is_power_of_two() {
        return Err(BracketError::InvalidParticipantsCount(participants_count));
    }

    let rounds_count = participants_count.trailing_zeros();
    let mut matches = Vec::with_capacity(participants_count as usize - 1);
    let mut next_match_id = 0u32;
    let mut matches_this_round = participants_count / 2;

    for round in 1..=rounds_count {
        for index in 0..matches_this_round {
            matches.push(Match::new(next_match_id.to_string(), round, index));
            next_match_id += 1;
        }
        matches_this_round /= 2;
    }

    log::debug!(
        "Generated bracket for {} participants ({} rounds, {} matches)",
        participants_count,
        rounds_count,
        matches.len()
    );
    Ok(Bracket::from_generated(matches))
}
