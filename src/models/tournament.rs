//! Tournament record and TournamentStatus.

use crate::logic::{replace_participant, seed_participants, select_winner, Seeding};
use crate::models::bracket::{Bracket, BracketError};
use crate::models::participant::{Participant, ParticipantId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Minimum length of a tournament name (after trimming).
const MIN_NAME_LEN: usize = 3;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Name is shorter than 3 characters.
    InvalidName,
    /// Roster is already full.
    ParticipantsLimit,
    /// This participant is already registered.
    AlreadyParticipant(ParticipantId),
    /// Roster must be full before the tournament starts.
    NotEnoughParticipants { required: u32, actual: usize },
    /// A stored record contradicts itself (roster vs bracket size).
    InvalidRecord(String),
    /// The bracket rejected the operation.
    Bracket(BracketError),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::InvalidName => {
                write!(f, "Tournament name must be at least {} characters", MIN_NAME_LEN)
            }
            TournamentError::ParticipantsLimit => write!(f, "Participants limit reached"),
            TournamentError::AlreadyParticipant(_) => write!(f, "Already a participant"),
            TournamentError::NotEnoughParticipants { required, actual } => write!(
                f,
                "Need {} participants to start (registered {})",
                required, actual
            ),
            TournamentError::InvalidRecord(reason) => write!(f, "Invalid tournament record: {}", reason),
            TournamentError::Bracket(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TournamentError::Bracket(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BracketError> for TournamentError {
    fn from(e: BracketError) -> Self {
        TournamentError::Bracket(e)
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    /// Registering participants; bracket is empty.
    #[default]
    Scheduled,
    /// Round 1 is seeded and results are being recorded.
    Started,
    /// Results are final.
    Ended,
}

/// A single-elimination tournament and the bracket it owns.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "TournamentRecord")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub date: NaiveDate,
    pub participants_count: u32,
    /// Registered participants, in registration order.
    pub participants: Vec<Participant>,
    pub status: TournamentStatus,
    pub structure: Bracket,
}

/// Stored shape of a tournament, checked before it becomes a [`Tournament`].
#[derive(Deserialize)]
struct TournamentRecord {
    id: TournamentId,
    name: String,
    date: NaiveDate,
    participants_count: u32,
    participants: Vec<Participant>,
    status: TournamentStatus,
    structure: Bracket,
}

impl TryFrom<TournamentRecord> for Tournament {
    type Error = TournamentError;

    fn try_from(record: TournamentRecord) -> Result<Self, Self::Error> {
        let bracket_size = record.structure.participants_count();
        if record.participants_count != bracket_size {
            return Err(TournamentError::InvalidRecord(format!(
                "participants count {} but bracket is for {}",
                record.participants_count, bracket_size
            )));
        }
        if record.participants.len() > record.participants_count as usize {
            return Err(TournamentError::InvalidRecord(format!(
                "{} participants registered for {} places",
                record.participants.len(),
                record.participants_count
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = record.participants.iter().find(|p| !seen.insert(p.id.as_str())) {
            return Err(TournamentError::AlreadyParticipant(dup.id.clone()));
        }
        Ok(Self {
            id: record.id,
            name: record.name,
            date: record.date,
            participants_count: record.participants_count,
            participants: record.participants,
            status: record.status,
            structure: record.structure,
        })
    }
}

impl Tournament {
    /// Create a tournament in Scheduled state with an empty bracket.
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        participants_count: u32,
    ) -> Result<Self, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(TournamentError::InvalidName);
        }
        let structure = crate::logic::generate_bracket(participants_count)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            date,
            participants_count,
            participants: Vec::new(),
            status: TournamentStatus::Scheduled,
            structure,
        })
    }

    /// Register a participant (Scheduled only).
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Scheduled {
            return Err(TournamentError::InvalidState);
        }
        if self.participants.iter().any(|p| p.is(&participant)) {
            return Err(TournamentError::AlreadyParticipant(participant.id));
        }
        if self.participants.len() >= self.participants_count as usize {
            return Err(TournamentError::ParticipantsLimit);
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Advance the lifecycle. Starting requires a full roster and seeds round 1
    /// in registration order.
    pub fn next_status(&mut self) -> Result<TournamentStatus, TournamentError> {
        match self.status {
            TournamentStatus::Scheduled => {
                if self.participants.len() < self.participants_count as usize {
                    return Err(TournamentError::NotEnoughParticipants {
                        required: self.participants_count,
                        actual: self.participants.len(),
                    });
                }
                seed_participants(&mut self.structure, &self.participants, Seeding::InOrder)?;
                self.status = TournamentStatus::Started;
            }
            TournamentStatus::Started => {
                self.status = TournamentStatus::Ended;
            }
            TournamentStatus::Ended => return Err(TournamentError::InvalidState),
        }
        log::info!("Tournament {} is now {:?}", self.id, self.status);
        Ok(self.status)
    }

    /// Record (or correct) a match result (Started only).
    pub fn select_winner(
        &mut self,
        match_id: &str,
        chosen: &Participant,
    ) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Started {
            return Err(TournamentError::InvalidState);
        }
        select_winner(&mut self.structure, match_id, chosen)?;
        Ok(())
    }

    /// Substitute a participant in a match and every later round they reached (Started only).
    pub fn replace_participant(
        &mut self,
        match_id: &str,
        outgoing: &str,
        incoming: Participant,
    ) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Started {
            return Err(TournamentError::InvalidState);
        }
        if incoming.id != outgoing && self.participants.iter().any(|p| p.is(&incoming)) {
            return Err(TournamentError::AlreadyParticipant(incoming.id));
        }
        replace_participant(&mut self.structure, match_id, outgoing, incoming.clone())?;
        if let Some(p) = self.participants.iter_mut().find(|p| p.id == outgoing) {
            *p = incoming;
        }
        Ok(())
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<&Participant> {
        self.structure.champion()
    }

    /// The persisted form of the bracket.
    pub fn structure_json(&self) -> Result<String, TournamentError> {
        Ok(self.structure.to_json()?)
    }
}
