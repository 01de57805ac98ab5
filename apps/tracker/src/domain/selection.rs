//! Selected players and their pending choices.
//!
//! Choices are keyed by player id, never by display name, so two players
//! sharing a name cannot overwrite each other's move.

use std::collections::HashMap;

use crate::domain::choice::Choice;
use crate::domain::player::{Player, PlayerId, Roster};
use crate::errors::domain::{DomainError, ValidationKind};

/// Fewest participants a game can be submitted with.
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected players in the order they were selected.
    selected: Vec<PlayerId>,
    /// Pending move per selected player.
    choices: HashMap<PlayerId, Choice>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[PlayerId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: &PlayerId) -> bool {
        self.selected.contains(id)
    }

    pub fn choice(&self, id: &PlayerId) -> Option<Choice> {
        self.choices.get(id).copied()
    }

    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    /// Selected players that still have no choice, in selection order.
    pub fn missing_choices(&self) -> Vec<&PlayerId> {
        self.selected
            .iter()
            .filter(|id| !self.choices.contains_key(*id))
            .collect()
    }

    /// Returns `true` if the player was not already selected.
    pub fn select(&mut self, id: &PlayerId) -> bool {
        if self.is_selected(id) {
            return false;
        }
        self.selected.push(id.clone());
        true
    }

    /// Removes the player and drops any pending choice.
    /// Returns `true` if the player was selected.
    pub fn deselect(&mut self, id: &PlayerId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        self.choices.remove(id);
        self.selected.len() != before
    }

    /// Flip selection. Returns the new selected state.
    pub fn toggle(&mut self, id: &PlayerId) -> bool {
        if self.deselect(id) {
            false
        } else {
            self.select(id)
        }
    }

    /// Record a choice, selecting the player first if needed. A repeated
    /// choice replaces the previous one.
    ///
    /// Returns `true` when the player was auto-selected.
    pub fn set_choice(&mut self, id: &PlayerId, choice: Choice) -> bool {
        let auto_selected = self.select(id);
        self.choices.insert(id.clone(), choice);
        auto_selected
    }

    /// Keep only players accepted by `keep`, along with their choices.
    pub fn retain(&mut self, mut keep: impl FnMut(&PlayerId) -> bool) {
        self.selected.retain(|id| keep(id));
        let selected = &self.selected;
        self.choices.retain(|id, _| selected.contains(id));
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.choices.clear();
    }

    pub fn is_eligible(&self) -> bool {
        compute_eligibility(self)
    }

    /// Pair every selected player with its choice, in selection order.
    pub fn entries<'r>(&self, roster: &'r Roster) -> Result<Vec<(&'r Player, Choice)>, DomainError> {
        if !self.is_eligible() {
            return Err(DomainError::validation(
                ValidationKind::NotEligible,
                format!(
                    "{} players selected, {} with a choice; need at least {MIN_PLAYERS} and one choice each",
                    self.len(),
                    self.choice_count()
                ),
            ));
        }
        self.selected
            .iter()
            .map(|id| -> Result<(&'r Player, Choice), DomainError> {
                let player = roster.require(id)?;
                let choice = self.choice(id).ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::NotEligible,
                        format!("player {id} has no choice"),
                    )
                })?;
                Ok((player, choice))
            })
            .collect()
    }
}

/// Submission is allowed iff at least two players are selected and every
/// selected player has exactly one choice.
pub fn compute_eligibility(selection: &Selection) -> bool {
    selection.len() >= MIN_PLAYERS
        && selection.choices.len() == selection.selected.len()
        && selection
            .selected
            .iter()
            .all(|id| selection.choices.contains_key(id))
}
