use tracing::{debug, info};

use super::Controller;
use crate::domain::{Analysis, GameId, GameRecord};
use crate::error::AppError;
use crate::services::GameService;
use crate::ui::View;

impl<S: GameService, V: View> Controller<S, V> {
    /// Reload history and analysis. Both are attempted; the first failure
    /// is returned after each one has been surfaced.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        let history = self.refresh_history().await;
        let analysis = self.refresh_analysis().await;
        history.and(analysis)
    }

    pub async fn refresh_history(&mut self) -> Result<usize, AppError> {
        match self.service.list_games().await {
            Ok(history) => {
                self.show_history(history);
                Ok(self.history.len())
            }
            Err(e) => Err(self.surface("load history", e)),
        }
    }

    pub async fn refresh_analysis(&mut self) -> Result<(), AppError> {
        match self.service.analysis().await {
            Ok(analysis) => {
                self.show_analysis(analysis);
                Ok(())
            }
            Err(e) => Err(self.surface("load analysis", e)),
        }
    }

    /// Remove a stored game after the user confirms.
    ///
    /// Returns `Ok(false)` when the user declines; nothing is sent then.
    /// Local history is only updated from a fresh fetch, never speculatively.
    pub async fn delete_submission(&mut self, id: GameId) -> Result<bool, AppError> {
        self.ensure_not_submitting("delete game")?;
        if !self.view.confirm(&format!("Delete game {id}?")).await {
            debug!(game_id = %id, "delete declined");
            return Ok(false);
        }
        if let Err(e) = self.service.delete_game(id).await {
            return Err(self.surface("delete game", e));
        }
        info!(game_id = %id, "game deleted");
        self.view.notify_info(&format!("Deleted game {id}"));
        // The delete succeeded; refresh failures have already been shown.
        let _ = self.refresh().await;
        Ok(true)
    }

    /// Remove every stored game after the user confirms.
    pub async fn clear_history(&mut self) -> Result<bool, AppError> {
        self.ensure_not_submitting("clear history")?;
        if !self.view.confirm("Delete ALL stored games?").await {
            debug!("clear history declined");
            return Ok(false);
        }
        if let Err(e) = self.service.delete_all_games().await {
            return Err(self.surface("clear history", e));
        }
        info!("history cleared");
        self.view.notify_info("Deleted all games");
        let _ = self.refresh().await;
        Ok(true)
    }

    /// Use what a create-game response embedded and fetch the rest.
    pub(super) async fn apply_created(
        &mut self,
        history: Option<Vec<GameRecord>>,
        analysis: Option<Analysis>,
    ) {
        match history {
            Some(history) => self.show_history(history),
            None => {
                let _ = self.refresh_history().await;
            }
        }
        match analysis {
            Some(analysis) => self.show_analysis(analysis),
            None => {
                let _ = self.refresh_analysis().await;
            }
        }
    }

    fn show_history(&mut self, history: Vec<GameRecord>) {
        debug!(count = history.len(), "history updated");
        self.history = history;
        self.view.render_history(&self.history);
    }

    fn show_analysis(&mut self, analysis: Analysis) {
        self.view.render_analysis(&analysis);
        self.analysis = Some(analysis);
    }
}
