//! reqwest implementation of the game service API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::client::ClientConfig;
use crate::domain::{Analysis, GameId, GameRecord, Player};
use crate::error::AppError;
use crate::protocol::{
    AnalysisDto, CreateGameResponse, CreatedGame, GameRecordDto, GameSubmission, PlayerDto,
};
use crate::services::GameService;

/// Longest error body excerpt carried into an error detail.
const MAX_DETAIL_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpGameService {
    client: Client,
    base_url: String,
}

impl HttpGameService {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("cannot build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.service_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.client.get(self.url(path)).send().await?;
        decode(ensure_success(response).await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self.client.delete(self.url(path)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `AppError::Status` carrying the service's
/// `detail` message when it sent one.
async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = error_detail(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    warn!(status = status.as_u16(), %detail, "game service rejected request");
    Err(AppError::status(status.as_u16(), detail))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(AppError::from)
}

/// Extract a human readable message from an error body.
fn error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let detail = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    };
    Some(detail.chars().take(MAX_DETAIL_CHARS).collect())
}

#[async_trait]
impl GameService for HttpGameService {
    async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        let players: Vec<PlayerDto> = self.get_json("/players/").await?;
        debug!(count = players.len(), "fetched players");
        players.into_iter().map(Player::try_from).collect()
    }

    async fn create_game(&self, submission: &GameSubmission) -> Result<CreatedGame, AppError> {
        let response = self
            .client
            .post(self.url("/games/"))
            .json(submission)
            .send()
            .await?;
        let created: CreateGameResponse = decode(ensure_success(response).await?).await?;
        CreatedGame::try_from(created)
    }

    async fn list_games(&self) -> Result<Vec<GameRecord>, AppError> {
        let games: Vec<GameRecordDto> = self.get_json("/games/").await?;
        debug!(count = games.len(), "fetched games");
        games.into_iter().map(GameRecord::try_from).collect()
    }

    async fn delete_game(&self, id: GameId) -> Result<(), AppError> {
        self.delete(&format!("/games/{id}")).await
    }

    async fn delete_all_games(&self) -> Result<(), AppError> {
        self.delete("/games/").await
    }

    async fn analysis(&self) -> Result<Analysis, AppError> {
        let analysis: AnalysisDto = self.get_json("/analysis/").await?;
        Analysis::try_from(analysis)
    }
}
