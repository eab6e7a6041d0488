//! Match (bracket node), Bracket and the errors raised by bracket operations.

use crate::models::participant::{same_participant, Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier for a match within one bracket.
pub type MatchId = String;

/// Errors that can occur during bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Participants count is not a power of two, or is less than 2.
    InvalidParticipantsCount(u32),
    /// No match with this id in the bracket.
    MatchNotFound(MatchId),
    /// The chosen participant occupies neither slot of the match.
    ParticipantNotInMatch {
        match_id: MatchId,
        participant_id: ParticipantId,
    },
    /// The bracket does not have the shape of a single-elimination tree.
    MalformedBracket(String),
    /// Seeding needs exactly one participant per round-1 slot.
    InvalidSeeding { expected: u32, actual: usize },
    /// The same participant was listed twice.
    DuplicateParticipant(ParticipantId),
    /// Layout constants produce an unusable drawing surface.
    InvalidLayout(String),
    /// The persisted structure could not be parsed or rendered.
    Serialization(String),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidParticipantsCount(n) => {
                write!(f, "Participants count must be a power of two and at least 2 (got {})", n)
            }
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            BracketError::ParticipantNotInMatch { match_id, participant_id } => write!(
                f,
                "Participant {} does not play in match {}",
                participant_id, match_id
            ),
            BracketError::MalformedBracket(reason) => write!(f, "Malformed bracket: {}", reason),
            BracketError::InvalidSeeding { expected, actual } => write!(
                f,
                "Must seed exactly {} participants (got {})",
                expected, actual
            ),
            BracketError::DuplicateParticipant(id) => {
                write!(f, "Participant {} is listed more than once", id)
            }
            BracketError::InvalidLayout(reason) => write!(f, "Invalid layout: {}", reason),
            BracketError::Serialization(reason) => write!(f, "Invalid bracket structure: {}", reason),
        }
    }
}

impl std::error::Error for BracketError {}

impl From<serde_json::Error> for BracketError {
    fn from(e: serde_json::Error) -> Self {
        BracketError::Serialization(e.to_string())
    }
}

/// One of the two participant slots of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    Player1,
    Player2,
}

impl Slot {
    /// Slot of the parent match that the winner of the match at `index` advances into.
    pub fn for_child(index: u32) -> Self {
        if index % 2 == 0 {
            Slot::Player1
        } else {
            Slot::Player2
        }
    }
}

/// A single bracket node. Parent/child links are implicit in `(round, index)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1 for the first-played round, increasing towards the final.
    pub round: u32,
    /// Zero-based position within the round.
    pub index: u32,
    pub player1: Option<Participant>,
    pub player2: Option<Participant>,
    /// None until decided; otherwise one of `player1` / `player2`.
    pub winner: Option<Participant>,
}

impl Match {
    pub fn new(id: impl Into<MatchId>, round: u32, index: u32) -> Self {
        Self {
            id: id.into(),
            round,
            index,
            player1: None,
            player2: None,
            winner: None,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&Participant> {
        match slot {
            Slot::Player1 => self.player1.as_ref(),
            Slot::Player2 => self.player2.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<Participant> {
        match slot {
            Slot::Player1 => &mut self.player1,
            Slot::Player2 => &mut self.player2,
        }
    }

    /// Which slot holds the participant with this id (`player1` is checked first).
    pub fn slot_of(&self, participant: &Participant) -> Option<Slot> {
        if same_participant(self.player1.as_ref(), Some(participant)) {
            Some(Slot::Player1)
        } else if same_participant(self.player2.as_ref(), Some(participant)) {
            Some(Slot::Player2)
        } else {
            None
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Coordinates of the match the winner advances to (may lie past the final round).
    pub fn parent_coordinates(&self) -> (u32, u32) {
        (self.round + 1, self.index / 2)
    }
}

/// The full single-elimination bracket, persisted as a flat array of matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Match>", into = "Vec<Match>")]
pub struct Bracket {
    matches: Vec<Match>,
}

impl TryFrom<Vec<Match>> for Bracket {
    type Error = BracketError;

    fn try_from(matches: Vec<Match>) -> Result<Self, Self::Error> {
        Bracket::new(matches)
    }
}

impl From<Bracket> for Vec<Match> {
    fn from(bracket: Bracket) -> Self {
        bracket.matches
    }
}

impl Bracket {
    /// Wrap a list of matches, checking that it forms a single-elimination tree.
    pub fn new(matches: Vec<Match>) -> Result<Self, BracketError> {
        let bracket = Self { matches };
        bracket.validate()?;
        Ok(bracket)
    }

    /// Construct without validation (for matches built by the generator).
    pub(crate) fn from_generated(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    /// Parse the persisted structure string.
    pub fn from_json(structure: &str) -> Result<Self, BracketError> {
        let matches: Vec<Match> = serde_json::from_str(structure)?;
        Self::new(matches)
    }

    /// Render the structure string that is persisted alongside the owning record.
    pub fn to_json(&self) -> Result<String, BracketError> {
        Ok(serde_json::to_string(&self.matches)?)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub(crate) fn matches_mut(&mut self) -> &mut [Match] {
        &mut self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of participants the bracket was generated for (two per round-1 match).
    pub fn participants_count(&self) -> u32 {
        self.round(1).count() as u32 * 2
    }

    /// Number of rounds; the highest round is the final.
    pub fn rounds_count(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.matches.iter().position(|m| m.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn find_position(&self, round: u32, index: u32) -> Option<usize> {
        self.matches
            .iter()
            .position(|m| m.round == round && m.index == index)
    }

    pub fn find(&self, round: u32, index: u32) -> Option<&Match> {
        self.find_position(round, index).map(|pos| &self.matches[pos])
    }

    /// Matches of one round, in storage order.
    pub fn round(&self, round: u32) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// The final match.
    pub fn final_match(&self) -> Option<&Match> {
        self.find(self.rounds_count(), 0)
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<&Participant> {
        self.final_match().and_then(|m| m.winner.as_ref())
    }

    /// Position of the parent of the match at `pos`. `Ok(None)` for the final.
    pub fn parent_position(&self, pos: usize) -> Result<Option<usize>, BracketError> {
        let child = self.matches.get(pos).ok_or_else(|| {
            BracketError::MalformedBracket(format!(
                "no match at position {} of {}",
                pos,
                self.matches.len()
            ))
        })?;
        if child.round >= self.rounds_count() {
            return Ok(None);
        }
        let (round, index) = child.parent_coordinates();
        self.find_position(round, index).map(Some).ok_or_else(|| {
            BracketError::MalformedBracket(format!(
                "match {} has no parent at round {} index {}",
                child.id, round, index
            ))
        })
    }

    /// Check the single-elimination shape: round sizes halve down to one final,
    /// coordinates and ids are unique, and every winner plays in its match.
    pub fn validate(&self) -> Result<(), BracketError> {
        let result = self.check_shape();
        if let Err(e) = &result {
            log::warn!("Rejected bracket structure: {}", e);
        }
        result
    }

    fn check_shape(&self) -> Result<(), BracketError> {
        let participants = self.participants_count();
        if participants < 2 || !participants.is_power_of_two() {
            return Err(BracketError::MalformedBracket(format!(
                "round 1 has {} matches",
                participants / 2
            )));
        }
        let rounds = participants.trailing_zeros();
        let expected_total = participants as usize - 1;
        if self.matches.len() != expected_total {
            return Err(BracketError::MalformedBracket(format!(
                "expected {} matches, found {}",
                expected_total,
                self.matches.len()
            )));
        }

        let mut ids = HashSet::new();
        let mut coordinates = HashSet::new();
        for m in &self.matches {
            if m.round < 1 || m.round > rounds {
                return Err(BracketError::MalformedBracket(format!(
                    "match {} is in round {} of {}",
                    m.id, m.round, rounds
                )));
            }
            let round_size = participants >> m.round;
            if m.index >= round_size {
                return Err(BracketError::MalformedBracket(format!(
                    "match {} has index {} but round {} has {} matches",
                    m.id, m.index, m.round, round_size
                )));
            }
            if !ids.insert(m.id.as_str()) {
                return Err(BracketError::MalformedBracket(format!("duplicate match id {}", m.id)));
            }
            if !coordinates.insert((m.round, m.index)) {
                return Err(BracketError::MalformedBracket(format!(
                    "duplicate match at round {} index {}",
                    m.round, m.index
                )));
            }
            if let Some(winner) = &m.winner {
                if m.slot_of(winner).is_none() {
                    return Err(BracketError::MalformedBracket(format!(
                        "winner of match {} does not play in it",
                        m.id
                    )));
                }
            }
        }
        Ok(())
    }
}
