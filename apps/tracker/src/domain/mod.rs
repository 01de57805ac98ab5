//! Domain layer: selection state, records and pure helpers.

pub mod choice;
pub mod history;
pub mod phase;
pub mod player;
pub mod selection;
pub mod timestamp;

// Re-exports for ergonomics
pub use choice::Choice;
pub use history::{Analysis, ChoiceCounts, GameId, GameRecord, Participant};
pub use phase::Phase;
pub use player::{Player, PlayerId, Roster};
pub use selection::{compute_eligibility, Selection, MIN_PLAYERS};
