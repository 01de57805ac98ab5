use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::Controller;
use crate::domain::timestamp::format_timestamp;
use crate::domain::{GameId, Phase};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::protocol::{CreatedGame, GameSubmission};
use crate::services::GameService;
use crate::ui::View;

impl<S: GameService, V: View> Controller<S, V> {
    /// Enter `Submitting` and build the payload.
    ///
    /// Only allowed from `Ready`. While the request is outstanding the
    /// submit trigger stays disabled and a second call fails with
    /// `SubmitInFlight`.
    pub fn begin_submit(&mut self) -> Result<GameSubmission, AppError> {
        match self.phase {
            Phase::Submitting => {
                let err = DomainError::validation(
                    ValidationKind::SubmitInFlight,
                    "a game is already being submitted",
                );
                return Err(self.surface("submit", err.into()));
            }
            Phase::Ready if self.selection.is_eligible() => {}
            _ => {
                let err = DomainError::validation(
                    ValidationKind::NotEligible,
                    format!(
                        "select at least two players and a choice for each ({} selected, {} chosen)",
                        self.selection.len(),
                        self.selection.choice_count()
                    ),
                );
                return Err(self.surface("submit", err.into()));
            }
        }

        let game_date = if self.options.stamp_submissions {
            match format_timestamp(OffsetDateTime::now_utc()) {
                Ok(ts) => Some(ts),
                Err(e) => return Err(self.surface("submit", AppError::internal(e))),
            }
        } else {
            None
        };

        let submission =
            match GameSubmission::from_selection(&self.selection, &self.roster, game_date) {
                Ok(submission) => submission,
                Err(e) => return Err(self.surface("submit", e.into())),
            };

        self.phase = Phase::Submitting;
        self.in_flight = Some(submission.clone());
        self.view.set_submit_enabled(false);
        debug!(players = submission.player_choices.len(), "submit started");
        Ok(submission)
    }

    /// Apply the outcome of the create-game request started by
    /// `begin_submit`.
    ///
    /// Success refreshes history and analysis, then resets. Failure keeps
    /// the selection intact and returns to `Ready` so the user can retry.
    pub async fn finish_submit(
        &mut self,
        outcome: Result<CreatedGame, AppError>,
    ) -> Result<GameId, AppError> {
        if self.phase != Phase::Submitting {
            let err = AppError::internal("no submission in flight");
            return Err(self.surface("finish submit", err));
        }
        self.in_flight = None;
        self.phase = Phase::of(&self.selection);

        match outcome {
            Ok(created) => {
                info!(game_id = %created.id, "game submitted");
                self.last_error = None;
                self.apply_created(created.history, created.analysis).await;
                self.reset()?;
                self.view.notify_info(&format!("Saved game {}", created.id));
                Ok(created.id)
            }
            Err(e) => {
                warn!(phase = self.phase.as_str(), "submit failed; selection kept");
                let err = self.surface("submit", e);
                self.recompute();
                Err(err)
            }
        }
    }

    /// Validate, post and settle a submission in one step.
    pub async fn submit(&mut self) -> Result<GameId, AppError> {
        let submission = self.begin_submit()?;
        let outcome = self.service.create_game(&submission).await;
        self.finish_submit(outcome).await
    }

    /// Payload of the outstanding request, if any.
    pub fn in_flight(&self) -> Option<&GameSubmission> {
        self.in_flight.as_ref()
    }
}
