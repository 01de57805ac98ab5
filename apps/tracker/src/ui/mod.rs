//! UI binding layer.
//!
//! The controller never touches a terminal or a DOM directly; it pushes state
//! to a `View` and asks it for confirmations. Swapping the view swaps the UI.

pub mod command;
pub mod terminal;

use async_trait::async_trait;

use crate::domain::{Analysis, GameRecord, Phase, Roster, Selection};
use crate::error::AppError;

pub use command::Command;
pub use terminal::TerminalView;

#[async_trait]
pub trait View: Send {
    /// One selectable entry per roster player.
    fn render_roster(&mut self, roster: &Roster, selection: &Selection);

    /// Called after every mutation with the recomputed phase.
    fn render_selection(&mut self, roster: &Roster, selection: &Selection, phase: Phase);

    /// Enable or disable the submit trigger.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Stored games, newest first.
    fn render_history(&mut self, history: &[GameRecord]);

    fn render_analysis(&mut self, analysis: &Analysis);

    fn notify_info(&mut self, message: &str);

    /// User-visible error notification.
    fn notify_error(&mut self, error: &AppError);

    /// Ask the user to confirm a destructive action.
    async fn confirm(&mut self, prompt: &str) -> bool;
}
