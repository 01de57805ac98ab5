//! Selection/submission controller.
//!
//! Owns the roster, the current selection and the submit lifecycle. Every
//! mutation recomputes eligibility and pushes the result to the view; every
//! service failure is logged, shown to the user and returned to the caller,
//! leaving the controller usable.

mod records;
mod selection;
mod submission;

use tracing::{debug, error, warn};

use crate::config::client::ClientConfig;
use crate::domain::{Analysis, GameRecord, Phase, Roster, Selection};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::protocol::GameSubmission;
use crate::services::GameService;
use crate::ui::View;

/// Controller-level settings taken from `ClientConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Player id or name re-selected after every reset.
    pub default_player: Option<String>,
    /// Attach a client timestamp to submissions.
    pub stamp_submissions: bool,
}

impl From<&ClientConfig> for ControllerOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            default_player: config.default_player.clone(),
            stamp_submissions: config.stamp_submissions,
        }
    }
}

pub struct Controller<S: GameService, V: View> {
    service: S,
    view: V,
    options: ControllerOptions,
    roster: Roster,
    selection: Selection,
    phase: Phase,
    /// Payload of the outstanding create-game request.
    in_flight: Option<GameSubmission>,
    history: Vec<GameRecord>,
    analysis: Option<Analysis>,
    last_error: Option<String>,
}

impl<S: GameService, V: View> Controller<S, V> {
    pub fn new(service: S, view: V, options: ControllerOptions) -> Self {
        Self {
            service,
            view,
            options,
            roster: Roster::default(),
            selection: Selection::new(),
            phase: Phase::Idle,
            in_flight: None,
            history: Vec::new(),
            analysis: None,
            last_error: None,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Recomputed from the current selection on every call.
    pub fn eligibility(&self) -> bool {
        self.phase != Phase::Submitting && self.selection.is_eligible()
    }

    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    /// Message of the most recent surfaced error.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Re-derive the phase and push it to the view.
    fn recompute(&mut self) {
        if self.phase != Phase::Submitting {
            self.phase = Phase::of(&self.selection);
        }
        debug!(
            phase = self.phase.as_str(),
            selected = self.selection.len(),
            choices = self.selection.choice_count(),
            "selection recomputed"
        );
        self.view
            .render_selection(&self.roster, &self.selection, self.phase);
        self.view.set_submit_enabled(self.phase.can_submit());
    }

    /// Reject selection changes while a submit is outstanding.
    fn ensure_not_submitting(&mut self, action: &str) -> Result<(), AppError> {
        if self.phase == Phase::Submitting {
            let err: AppError = DomainError::validation(
                ValidationKind::Busy,
                format!("cannot {action} while a game is being submitted"),
            )
            .into();
            return Err(self.surface(action, err));
        }
        Ok(())
    }

    /// Log, record and show an error, then hand it back to the caller.
    fn surface(&mut self, action: &str, err: AppError) -> AppError {
        match FailureSource::of(&err) {
            FailureSource::Rejected => {
                warn!(action, code = %err.code(), detail = err.detail(), "action rejected");
            }
            FailureSource::Service => {
                error!(action, code = %err.code(), error = %err, "game service call failed");
            }
            FailureSource::Client => {
                error!(action, code = %err.code(), error = %err, "controller error");
            }
        }
        self.last_error = Some(err.user_message());
        self.view.notify_error(&err);
        err
    }
}

/// Where a surfaced error came from, for log classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureSource {
    /// User action refused by local validation.
    Rejected,
    /// The game service failed or answered badly.
    Service,
    /// Local misuse or misconfiguration.
    Client,
}

impl FailureSource {
    fn of(err: &AppError) -> Self {
        match err {
            AppError::Validation { .. } | AppError::NotFound { .. } => FailureSource::Rejected,
            AppError::Transport { .. } | AppError::Status { .. } | AppError::Decode { .. } => {
                FailureSource::Service
            }
            AppError::Config { .. } | AppError::Internal { .. } => FailureSource::Client,
        }
    }
}
