//! Free-text input with catalog suggestions.

use std::time::{Duration, Instant};

use crate::catalog::Catalog;
use crate::models::Choice;

/// Default number of suggestions shown by an autocomplete.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// How long the list stays open after blur so a pending click lands.
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(150);

/// Visibility state of a suggestion dropdown.
#[derive(Debug, Clone)]
pub struct SuggestionPopup {
    open: bool,
    closing_since: Option<Instant>,
    grace: Duration,
}

impl SuggestionPopup {
    pub fn new(grace: Duration) -> Self {
        Self {
            open: false,
            closing_since: None,
            grace,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.closing_since = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.closing_since = None;
    }

    /// Start the grace period; the list stays usable until it elapses.
    pub fn blur(&mut self, now: Instant) {
        if self.open {
            self.closing_since = Some(now);
        }
    }

    pub fn is_open(&self, now: Instant) -> bool {
        match self.closing_since {
            Some(since) => self.open && now.duration_since(since) < self.grace,
            None => self.open,
        }
    }

    /// Settle a pending close once the grace period is over.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_open(now) {
            self.close();
        }
    }
}

/// Single-value text field backed by a catalog.
///
/// The committed value is the text itself: every keystroke and every
/// selected suggestion returns the new value for the caller to store.
#[derive(Debug, Clone)]
pub struct Autocomplete {
    catalog: Catalog,
    limit: usize,
    text: String,
    popup: SuggestionPopup,
}

impl Autocomplete {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            limit: DEFAULT_SUGGESTION_LIMIT,
            text: String::new(),
            popup: SuggestionPopup::new(DEFAULT_BLUR_GRACE),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.popup = SuggestionPopup::new(grace);
        self
    }

    /// Seed the text from an already committed value.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// User typed; returns the value to commit.
    pub fn input(&mut self, text: impl Into<String>) -> String {
        self.text = text.into();
        self.popup.open();
        self.text.clone()
    }

    pub fn focus(&mut self) {
        self.popup.open();
    }

    pub fn blur(&mut self, now: Instant) {
        self.popup.blur(now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.popup.tick(now);
    }

    pub fn is_open(&self, now: Instant) -> bool {
        self.popup.is_open(now)
    }

    /// Reset the typed text and hide the list.
    pub fn clear(&mut self) {
        self.text.clear();
        self.popup.close();
    }

    /// Suggestions for the current text.
    ///
    /// Empty text shows nothing; the option equal to the text is left out.
    pub fn suggestions(&self) -> Vec<Choice> {
        if self.text.trim().is_empty() {
            return Vec::new();
        }
        let current = self.text.as_str();
        self.catalog
            .suggest(current, self.limit, |c| c.label() == current)
    }

    /// Suggestions, only while the list is visible.
    pub fn visible_suggestions(&self, now: Instant) -> Vec<Choice> {
        if self.is_open(now) {
            self.suggestions()
        } else {
            Vec::new()
        }
    }

    /// Pick a suggestion: commits its label verbatim and closes the list.
    ///
    /// Returns `None` when the list already closed (the click came too late).
    pub fn select(&mut self, choice: &Choice, now: Instant) -> Option<String> {
        if !self.is_open(now) {
            return None;
        }
        self.text = choice.label().to_string();
        self.popup.close();
        Some(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogKind;

    fn widget() -> Autocomplete {
        Autocomplete::new(CatalogKind::Specialists.catalog())
    }

    #[test]
    fn test_input_commits_text_and_opens() {
        let mut w = widget();
        let now = Instant::now();
        assert_eq!(w.input("cardio"), "cardio");
        assert!(w.is_open(now));
        assert_eq!(w.suggestions(), vec![Choice::from("Cardiologist")]);
    }

    #[test]
    fn test_exact_text_is_excluded() {
        let mut w = widget();
        w.input("Cardiologist");
        assert!(!w.suggestions().contains(&Choice::from("Cardiologist")));
    }

    #[test]
    fn test_empty_text_has_no_suggestions() {
        let mut w = widget();
        w.focus();
        assert!(w.suggestions().is_empty());
    }

    #[test]
    fn test_limit_caps_suggestions() {
        let mut w = widget().with_limit(3);
        w.input("ist");
        assert_eq!(w.suggestions().len(), 3);
    }

    #[test]
    fn test_select_within_grace_period() {
        let mut w = widget();
        let start = Instant::now();
        w.input("neuro");
        w.blur(start);

        let click = start + Duration::from_millis(100);
        assert_eq!(
            w.select(&Choice::from("Neurologist"), click).as_deref(),
            Some("Neurologist")
        );
        assert!(!w.is_open(click));
    }

    #[test]
    fn test_select_after_grace_is_ignored() {
        let mut w = widget();
        let start = Instant::now();
        w.input("neuro");
        w.blur(start);

        let late = start + Duration::from_millis(200);
        w.tick(late);
        assert!(w.select(&Choice::from("Neurologist"), late).is_none());
        assert_eq!(w.text(), "neuro");
    }

    #[test]
    fn test_sentinels_suggested_first() {
        let mut w = widget();
        w.input("o");
        let suggestions = w.suggestions();
        assert_eq!(suggestions[0], Choice::NotApplicable);
        assert_eq!(suggestions[1], Choice::Other);
    }
}
