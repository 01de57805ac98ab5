//! Stored game results and the service's statistics report.

use std::collections::BTreeMap;
use std::fmt;

use time::OffsetDateTime;

use crate::domain::choice::Choice;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GameId(pub i64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub choice: Choice,
    pub is_winner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: GameId,
    /// `game_date` when present, otherwise `created_at`.
    pub played_at: Option<OffsetDateTime>,
    pub players: Vec<Participant>,
}

impl GameRecord {
    pub fn winners(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| p.is_winner)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn is_draw(&self) -> bool {
        !self.players.iter().any(|p| p.is_winner)
    }
}

/// Per-player move frequencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChoiceCounts {
    pub rock: u32,
    pub paper: u32,
    pub scissors: u32,
}

impl ChoiceCounts {
    pub fn total(&self) -> u32 {
        self.rock + self.paper + self.scissors
    }

    pub fn get(&self, choice: Choice) -> u32 {
        match choice {
            Choice::Rock => self.rock,
            Choice::Paper => self.paper,
            Choice::Scissors => self.scissors,
        }
    }

    /// Most frequent move; ties resolve in rock, paper, scissors order.
    pub fn favourite(&self) -> Option<Choice> {
        if self.total() == 0 {
            return None;
        }
        Choice::ALL
            .into_iter()
            .rev()
            .max_by_key(|c| self.get(*c))
    }
}

/// Statistics report, keyed by player name as the service sends it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Win percentage in `0.0..=100.0`.
    pub win_rates: BTreeMap<String, f64>,
    pub choice_patterns: BTreeMap<String, ChoiceCounts>,
    pub predictions: BTreeMap<String, Choice>,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.win_rates.is_empty() && self.choice_patterns.is_empty() && self.predictions.is_empty()
    }

    /// Every player name mentioned anywhere in the report, sorted.
    pub fn player_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .win_rates
            .keys()
            .chain(self.choice_patterns.keys())
            .chain(self.predictions.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
