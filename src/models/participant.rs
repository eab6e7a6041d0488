//! Participant data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (usually the user id of the registered player).
pub type ParticipantId = String;

/// A participant placed into bracket slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    /// Create a participant with a freshly minted id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    /// Create a participant that keeps an externally assigned id.
    pub fn with_id(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Identity check: two participants are the same person when their ids match,
    /// even if the display name differs between snapshots.
    pub fn is(&self, other: &Participant) -> bool {
        self.id == other.id
    }
}

/// Identity comparison over optional slots. Two empty slots are not "the same participant".
pub(crate) fn same_participant(a: Option<&Participant>, b: Option<&Participant>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.is(b),
        _ => false,
    }
}
