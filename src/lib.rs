//! Table tennis tournament organizer: single-elimination bracket engine with models and logic.

pub mod logic;
pub mod models;

pub use logic::{
    generate_bracket, replace_participant, seed_participants, select_winner, BracketLayout,
    LayoutConfig, Point, Seeding, SlotRect,
};
pub use models::{
    Bracket, BracketError, Match, MatchId, Participant, ParticipantId, Slot, Tournament,
    TournamentError, TournamentId, TournamentStatus,
};
