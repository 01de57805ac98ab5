use tracing::{debug, info, warn};

use super::Controller;
use crate::domain::{Choice, Player, PlayerId, Roster};
use crate::error::AppError;
use crate::services::GameService;
use crate::ui::View;

impl<S: GameService, V: View> Controller<S, V> {
    /// Fetch the roster and render one entry per player.
    ///
    /// Selected players missing from the new roster are dropped along with
    /// their choices. On failure the previous roster and selection are kept.
    pub async fn load_players(&mut self) -> Result<usize, AppError> {
        self.ensure_not_submitting("load players")?;

        let players = match self.service.list_players().await {
            Ok(players) => players,
            Err(e) => return Err(self.surface("load players", e)),
        };

        let roster = Roster::new(players);
        let duplicates = roster.duplicate_names();
        if !duplicates.is_empty() {
            warn!(?duplicates, "roster contains duplicate player names");
        }
        info!(count = roster.len(), "roster loaded");

        self.roster = roster;
        let roster = &self.roster;
        self.selection.retain(|id| roster.contains(id));
        if self.selection.is_empty() {
            self.apply_default_player();
        }

        self.view.render_roster(&self.roster, &self.selection);
        self.recompute();
        Ok(self.roster.len())
    }

    /// Map user input (id or unique name) to a roster player.
    pub fn resolve_player(&mut self, token: &str) -> Result<Player, AppError> {
        match self.roster.resolve(token) {
            Ok(player) => Ok(player.clone()),
            Err(e) => Err(self.surface("resolve player", e.into())),
        }
    }

    /// Add or remove a player. Removing also drops the player's choice.
    ///
    /// Returns the player's new selected state.
    pub fn toggle_selection(&mut self, id: &PlayerId) -> Result<bool, AppError> {
        self.ensure_not_submitting("change selection")?;
        if let Err(e) = self.roster.require(id) {
            return Err(self.surface("change selection", e.into()));
        }

        let selected = self.selection.toggle(id);
        debug!(player_id = %id, selected, "selection toggled");
        self.recompute();
        Ok(selected)
    }

    /// Record a move, selecting the player first when needed.
    pub fn set_choice(&mut self, id: &PlayerId, choice: Choice) -> Result<(), AppError> {
        self.ensure_not_submitting("set choice")?;
        if let Err(e) = self.roster.require(id) {
            return Err(self.surface("set choice", e.into()));
        }

        let auto_selected = self.selection.set_choice(id, choice);
        debug!(player_id = %id, %choice, auto_selected, "choice recorded");
        self.recompute();
        Ok(())
    }

    /// Clear selection and choices, then re-select the default player if
    /// one is configured and present in the roster.
    pub fn reset(&mut self) -> Result<(), AppError> {
        self.ensure_not_submitting("reset")?;
        self.selection.clear();
        self.apply_default_player();
        debug!("selection reset");
        self.recompute();
        Ok(())
    }

    fn apply_default_player(&mut self) {
        let Some(token) = self.options.default_player.as_deref() else {
            return;
        };
        match self.roster.resolve(token) {
            Ok(player) => {
                let id = player.id.clone();
                self.selection.select(&id);
            }
            Err(e) => debug!(default_player = token, error = %e, "default player not in roster"),
        }
    }
}
