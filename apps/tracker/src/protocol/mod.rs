//! Wire records exchanged with the game service.

pub mod dto;

pub use dto::{
    AnalysisDto, ChoiceCountsDto, CreateGameResponse, CreatedGame, GameRecordDto, GameSubmission,
    ParticipantDto, PlayerChoiceDto, PlayerDto, WireId,
};
