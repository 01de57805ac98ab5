//! Game service boundary.

pub mod http;

use async_trait::async_trait;

use crate::domain::{Analysis, GameId, GameRecord, Player};
use crate::error::AppError;
use crate::protocol::{CreatedGame, GameSubmission};

pub use http::HttpGameService;

/// Remote store of players and game results.
///
/// The controller only talks to the service through this trait so it can be
/// driven by an in-memory implementation in tests.
#[async_trait]
pub trait GameService: Send + Sync {
    /// `GET /players/`
    async fn list_players(&self) -> Result<Vec<Player>, AppError>;

    /// `POST /games/`
    async fn create_game(&self, submission: &GameSubmission) -> Result<CreatedGame, AppError>;

    /// `GET /games/`, newest first.
    async fn list_games(&self) -> Result<Vec<GameRecord>, AppError>;

    /// `DELETE /games/{id}`
    async fn delete_game(&self, id: GameId) -> Result<(), AppError>;

    /// `DELETE /games/`
    async fn delete_all_games(&self) -> Result<(), AppError>;

    /// `GET /analysis/`
    async fn analysis(&self) -> Result<Analysis, AppError>;
}
