//! Players and the roster loaded from the game service.

use std::collections::HashMap;
use std::fmt;

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Opaque player identity. The service may send numeric or string ids;
/// both are normalized to their string form.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<i64> for PlayerId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Players in the order the service listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Later entries with an id already present are dropped.
    pub fn new(players: Vec<Player>) -> Self {
        let mut unique: Vec<Player> = Vec::with_capacity(players.len());
        for player in players {
            if !unique.iter().any(|p| p.id == player.id) {
                unique.push(player);
            }
        }
        Self { players: unique }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Lookup that fails with a domain error instead of `None`.
    pub fn require(&self, id: &PlayerId) -> Result<&Player, DomainError> {
        self.get(id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("no player with id {id}"))
        })
    }

    /// Resolve user input to a player: exact id first, then a
    /// case-insensitive name that must match exactly one player.
    pub fn resolve(&self, token: &str) -> Result<&Player, DomainError> {
        let token = token.trim();
        if let Some(player) = self.get(&PlayerId::from(token)) {
            return Ok(player);
        }

        let mut matches = self
            .players
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(token));
        match (matches.next(), matches.next()) {
            (Some(player), None) => Ok(player),
            (Some(_), Some(_)) => Err(DomainError::validation(
                ValidationKind::AmbiguousPlayerName,
                format!("several players are named '{token}'; use the id instead"),
            )),
            (None, _) => Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("no player with id or name '{token}'"),
            )),
        }
    }

    /// Names carried by more than one player, sorted.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for player in &self.players {
            *counts.entry(player.name.as_str()).or_default() += 1;
        }
        let mut dups: Vec<String> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(name, _)| name.to_string())
            .collect();
        dups.sort();
        dups
    }
}
