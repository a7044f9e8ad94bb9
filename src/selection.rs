//! The single source of truth for the current selection.
//!
//! A pure in-memory value object: four optional codes, one per administrative
//! level, plus a generation counter. The one invariant is ancestral
//! consistency: setting a level always unsets every strictly deeper level,
//! so a selected village can never outlive a change of province.

use crate::level::AdministrativeLevel;

/// The currently chosen province/city/district/village codes.
///
/// Mutated only by the cascade controller. Every mutation bumps the epoch,
/// which in-flight fetches use as their currency token: a response tagged
/// with an older epoch is stale and must be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    codes: [Option<String>; 4],
    epoch: u64,
}

impl SelectionState {
    /// An empty selection at epoch zero.
    pub fn new() -> Self {
        SelectionState::default()
    }

    /// Sets (or with `None`/empty, unsets) the code at `level` and unsets all
    /// strictly deeper levels. All inputs are valid; an empty string means
    /// "no selection".
    pub fn set(&mut self, level: AdministrativeLevel, code: Option<String>) {
        self.codes[level.index()] = code.filter(|c| !c.is_empty());
        for deeper in level.descendants() {
            self.codes[deeper.index()] = None;
        }
        self.epoch += 1;
    }

    /// The code currently selected at `level`, if any.
    pub fn get(&self, level: AdministrativeLevel) -> Option<&str> {
        self.codes[level.index()].as_deref()
    }

    /// Unsets all four levels.
    pub fn clear(&mut self) {
        self.codes = Default::default();
        self.epoch += 1;
    }

    /// True when nothing is selected at any level.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// The current generation. Monotonically increasing; bumped by every
    /// mutation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
