//! Bracket business logic: generation, seeding, result propagation, layout.

mod generate;
mod layout;
mod propagation;
mod seeding;

pub use generate::generate_bracket;
pub use layout::{BracketLayout, LayoutConfig, Point, SlotRect};
pub use propagation::{replace_participant, select_winner};
pub use seeding::{seed_participants, Seeding};
