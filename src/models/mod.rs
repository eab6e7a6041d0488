//! Data structures for the bracket engine: participants, matches, bracket, tournament.

mod bracket;
pub(crate) mod participant;
mod tournament;

pub use bracket::{Bracket, BracketError, Match, MatchId, Slot};
pub use participant::{Participant, ParticipantId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
