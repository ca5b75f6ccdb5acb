//! Multi-select chip collector.

use std::time::{Duration, Instant};

use super::autocomplete::{SuggestionPopup, DEFAULT_BLUR_GRACE};
use crate::catalog::Catalog;
use crate::models::{AddOutcome, Choice, Selections};

/// Default number of suggestions shown under the chip input.
pub const DEFAULT_CHIP_SUGGESTION_LIMIT: usize = 12;

/// Collects several values as removable chips.
///
/// Owns only the typed text and popup state. Every commit takes the current
/// [`Selections`] and returns the new value alongside what happened.
#[derive(Debug, Clone)]
pub struct MultiSelect {
    catalog: Catalog,
    allow_custom: bool,
    limit: usize,
    input: String,
    popup: SuggestionPopup,
}

impl MultiSelect {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            allow_custom: false,
            limit: DEFAULT_CHIP_SUGGESTION_LIMIT,
            input: String::new(),
            popup: SuggestionPopup::new(DEFAULT_BLUR_GRACE),
        }
    }

    /// Accept typed values that are not in the catalog.
    pub fn allow_custom(mut self, allow: bool) -> Self {
        self.allow_custom = allow;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.popup = SuggestionPopup::new(grace);
        self
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.popup.open();
    }

    pub fn focus(&mut self) {
        self.popup.open();
    }

    pub fn blur(&mut self, now: Instant) {
        self.popup.blur(now);
    }

    pub fn is_open(&self, now: Instant) -> bool {
        self.popup.is_open(now)
    }

    /// Whether the input box and add button are enabled.
    pub fn input_enabled(&self, current: &Selections) -> bool {
        current.accepts_additions()
    }

    /// Whether "Add" would do anything right now.
    pub fn can_add(&self, current: &Selections) -> bool {
        self.input_enabled(current) && !self.input.trim().is_empty()
    }

    /// Suggestions for the typed text, excluding values already chosen.
    ///
    /// Empty while "None / Not Applicable" is selected, since the input is
    /// disabled then.
    pub fn suggestions(&self, current: &Selections) -> Vec<Choice> {
        if !current.accepts_additions() {
            return Vec::new();
        }
        self.catalog
            .suggest(&self.input, self.limit, |c| current.contains(c))
    }

    /// Commit a clicked suggestion.
    pub fn select(&mut self, current: &Selections, choice: Choice) -> (Selections, AddOutcome) {
        let mut next = current.clone();
        let outcome = next.add(choice);
        self.reset_input();
        (next, outcome)
    }

    /// Commit the typed text (Enter or the add button).
    ///
    /// Catalog matches are stored as the catalog entry. Other text is
    /// stored only when custom entry is allowed.
    pub fn commit_input(&mut self, current: &Selections) -> (Selections, AddOutcome) {
        let typed = self.input.trim().to_string();
        if typed.is_empty() {
            return (current.clone(), AddOutcome::Empty);
        }
        let choice = match self.catalog.resolve(&typed) {
            Some(choice) => choice,
            None if self.allow_custom => Choice::value(typed),
            None => return (current.clone(), AddOutcome::NotInCatalog),
        };
        self.select(current, choice)
    }

    /// Remove a chip.
    pub fn remove(&self, current: &Selections, choice: &Choice) -> Selections {
        let mut next = current.clone();
        next.remove(choice);
        next
    }

    /// "Clear selection to add items".
    pub fn clear(&self, _current: &Selections) -> Selections {
        Selections::new()
    }

    fn reset_input(&mut self) {
        self.input.clear();
        self.popup.close();
    }
}
