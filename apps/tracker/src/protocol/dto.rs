//! JSON shapes of the game service API and their conversion to domain types.
//!
//! Responses are parsed into these records first and then validated into
//! domain values; anything that does not fit becomes `AppError::Decode`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::timestamp::parse_timestamp;
use crate::domain::{
    Analysis, Choice, ChoiceCounts, GameId, GameRecord, Participant, Player, PlayerId, Roster,
    Selection,
};
use crate::error::AppError;
use crate::errors::domain::DomainError;

/// Identifier that may arrive as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
}

impl From<WireId> for PlayerId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Int(n) => PlayerId::from(n),
            WireId::Text(s) => PlayerId::new(s),
        }
    }
}

/// `GET /players/` element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDto {
    pub id: WireId,
    pub name: String,
}

impl TryFrom<PlayerDto> for Player {
    type Error = AppError;

    fn try_from(dto: PlayerDto) -> Result<Self, Self::Error> {
        let id = PlayerId::from(dto.id);
        if id.as_str().trim().is_empty() {
            return Err(AppError::decode("player with empty id"));
        }
        let name = dto.name.trim();
        if name.is_empty() {
            return Err(AppError::decode(format!("player {id} has an empty name")));
        }
        Ok(Player::new(id, name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerChoiceDto {
    pub player_name: String,
    pub choice: Choice,
}

/// `POST /games/` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSubmission {
    pub player_choices: Vec<PlayerChoiceDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_date: Option<String>,
}

impl GameSubmission {
    /// Build the payload in selection order. Fails when the selection is
    /// not eligible or refers to players missing from the roster.
    pub fn from_selection(
        selection: &Selection,
        roster: &Roster,
        game_date: Option<String>,
    ) -> Result<Self, DomainError> {
        let player_choices = selection
            .entries(roster)?
            .into_iter()
            .map(|(player, choice)| PlayerChoiceDto {
                player_name: player.name.clone(),
                choice,
            })
            .collect();
        Ok(Self {
            player_choices,
            game_date,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub name: String,
    pub choice: String,
    #[serde(default)]
    pub is_winner: bool,
}

/// `GET /games/` element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecordDto {
    pub id: i64,
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub players: Vec<ParticipantDto>,
}

impl TryFrom<GameRecordDto> for GameRecord {
    type Error = AppError;

    fn try_from(dto: GameRecordDto) -> Result<Self, Self::Error> {
        let raw_date = dto.game_date.as_deref().or(dto.created_at.as_deref());
        let played_at = raw_date
            .map(parse_timestamp)
            .transpose()
            .map_err(|e| AppError::decode(format!("game {}: {e}", dto.id)))?;

        let players = dto
            .players
            .into_iter()
            .map(|p| -> Result<Participant, AppError> {
                let choice = p.choice.parse::<Choice>().map_err(|_| {
                    AppError::decode(format!(
                        "game {}: player {} has unknown choice '{}'",
                        dto.id, p.name, p.choice
                    ))
                })?;
                Ok(Participant {
                    name: p.name,
                    choice,
                    is_winner: p.is_winner,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(GameRecord {
            id: GameId(dto.id),
            played_at,
            players,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChoiceCountsDto {
    #[serde(default)]
    pub rock: u32,
    #[serde(default)]
    pub paper: u32,
    #[serde(default)]
    pub scissors: u32,
}

/// `GET /analysis/` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisDto {
    #[serde(default)]
    pub win_rates: BTreeMap<String, f64>,
    #[serde(default)]
    pub choice_patterns: BTreeMap<String, ChoiceCountsDto>,
    #[serde(default)]
    pub predictions: BTreeMap<String, String>,
}

impl TryFrom<AnalysisDto> for Analysis {
    type Error = AppError;

    fn try_from(dto: AnalysisDto) -> Result<Self, Self::Error> {
        for (name, rate) in &dto.win_rates {
            if !rate.is_finite() || !(0.0..=100.0).contains(rate) {
                return Err(AppError::decode(format!(
                    "win rate for {name} out of range: {rate}"
                )));
            }
        }

        let predictions = dto
            .predictions
            .into_iter()
            .map(|(name, raw)| -> Result<(String, Choice), AppError> {
                let choice = raw.parse::<Choice>().map_err(|_| {
                    AppError::decode(format!("prediction for {name} is not a choice: '{raw}'"))
                })?;
                Ok((name, choice))
            })
            .collect::<Result<BTreeMap<_, _>, AppError>>()?;

        let choice_patterns = dto
            .choice_patterns
            .into_iter()
            .map(|(name, c)| {
                (
                    name,
                    ChoiceCounts {
                        rock: c.rock,
                        paper: c.paper,
                        scissors: c.scissors,
                    },
                )
            })
            .collect();

        Ok(Analysis {
            win_rates: dto.win_rates,
            choice_patterns,
            predictions,
        })
    }
}

/// `POST /games/` success body. The service may embed refreshed history
/// and analysis; both are optional and kept raw until validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub id: i64,
    #[serde(default)]
    pub analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub history: Option<serde_json::Value>,
}

/// Validated result of a create-game request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedGame {
    pub id: GameId,
    pub analysis: Option<Analysis>,
    pub history: Option<Vec<GameRecord>>,
}

impl TryFrom<CreateGameResponse> for CreatedGame {
    type Error = AppError;

    /// Only `id` is required. The game is stored once the service answers
    /// 2xx, so embedded extras that fail validation are dropped and
    /// fetched again by the caller.
    fn try_from(dto: CreateGameResponse) -> Result<Self, Self::Error> {
        let id = GameId(dto.id);
        let analysis = dto
            .analysis
            .and_then(|raw| embedded(id, "analysis", decode_analysis(raw)));
        let history = dto
            .history
            .and_then(|raw| embedded(id, "history", decode_history(raw)));
        Ok(CreatedGame {
            id,
            analysis,
            history,
        })
    }
}

fn decode_analysis(raw: serde_json::Value) -> Result<Analysis, AppError> {
    let dto: AnalysisDto = serde_json::from_value(raw)?;
    Analysis::try_from(dto)
}

fn decode_history(raw: serde_json::Value) -> Result<Vec<GameRecord>, AppError> {
    let records: Vec<GameRecordDto> = serde_json::from_value(raw)?;
    records.into_iter().map(GameRecord::try_from).collect()
}

fn embedded<T>(id: GameId, part: &str, decoded: Result<T, AppError>) -> Option<T> {
    match decoded {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(game_id = %id, part, error = %e, "ignoring malformed embedded result");
            None
        }
    }
}
