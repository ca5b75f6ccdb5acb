//! Selectable values and the fixed enums used by button groups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display text of the "Other" sentinel.
pub const OTHER_LABEL: &str = "Other";
/// Display text of the "None / Not Applicable" sentinel.
pub const NOT_APPLICABLE_LABEL: &str = "None / Not Applicable";

/// A single entry of a multi-value field.
///
/// The two sentinels are variants of their own so no caller has to
/// string-match their labels. Conversion from text happens once, in
/// [`Choice::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Choice {
    /// "None / Not Applicable": exclusive with every other entry
    NotApplicable,
    /// "Other": the user wants to describe something off-catalog
    Other,
    /// A catalog value or a user-authored custom value
    Value(String),
}

impl Choice {
    /// Parse user-facing text into a choice.
    ///
    /// Only the exact sentinel labels map to sentinels. Anything else,
    /// including "none" typed by hand, is an ordinary value.
    pub fn parse(text: &str) -> Self {
        match text {
            NOT_APPLICABLE_LABEL => Choice::NotApplicable,
            OTHER_LABEL => Choice::Other,
            other => Choice::Value(other.to_string()),
        }
    }

    /// Build an ordinary value, trimming surrounding whitespace.
    pub fn value(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Choice::parse(text.trim())
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Choice::NotApplicable => NOT_APPLICABLE_LABEL,
            Choice::Other => OTHER_LABEL,
            Choice::Value(v) => v,
        }
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Choice::NotApplicable)
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Choice::Value(_))
    }

    /// True for an ordinary value with no visible text.
    pub fn is_blank(&self) -> bool {
        matches!(self, Choice::Value(v) if v.trim().is_empty())
    }
}

impl From<String> for Choice {
    fn from(text: String) -> Self {
        Choice::parse(&text)
    }
}

impl From<&str> for Choice {
    fn from(text: &str) -> Self {
        Choice::parse(text)
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Value(v) => v,
            sentinel => sentinel.label().to_string(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of trying to add a value to a multi-value field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Value was appended
    Added,
    /// "None / Not Applicable" replaced every previous entry
    ReplacedWithNotApplicable,
    /// Value was already present
    Duplicate,
    /// The field holds "None / Not Applicable"; additions are disabled
    Locked,
    /// Nothing to add (blank input)
    Empty,
    /// Typed text is not a catalog option and custom entry is off
    NotInCatalog,
    /// Staging entry is missing a required attribute
    Incomplete,
}

impl AddOutcome {
    /// Whether the field value changed.
    pub fn changed(self) -> bool {
        matches!(self, AddOutcome::Added | AddOutcome::ReplacedWithNotApplicable)
    }
}

/// An ordered, duplicate-free set of choices with sentinel exclusivity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selections(Vec<Choice>);

impl Selections {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from raw strings, re-applying the field invariants.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selections = Self::new();
        for label in labels {
            selections.add(Choice::parse(label.as_ref()));
        }
        selections
    }

    /// Add a choice, honoring duplicate and sentinel rules.
    pub fn add(&mut self, choice: Choice) -> AddOutcome {
        if choice.is_blank() {
            return AddOutcome::Empty;
        }
        if choice.is_not_applicable() {
            if self.0 == [Choice::NotApplicable] {
                return AddOutcome::Duplicate;
            }
            self.0 = vec![Choice::NotApplicable];
            return AddOutcome::ReplacedWithNotApplicable;
        }
        if self.is_not_applicable() {
            return AddOutcome::Locked;
        }
        if self.0.contains(&choice) {
            return AddOutcome::Duplicate;
        }
        self.0.push(choice);
        AddOutcome::Added
    }

    /// Remove a specific choice. Returns true if it was present.
    pub fn remove(&mut self, choice: &Choice) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != choice);
        self.0.len() != before
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// True when the field is exactly "None / Not Applicable".
    pub fn is_not_applicable(&self) -> bool {
        self.0.iter().any(Choice::is_not_applicable)
    }

    /// Whether new non-sentinel values can currently be added.
    pub fn accepts_additions(&self) -> bool {
        !self.is_not_applicable()
    }

    pub fn contains(&self, choice: &Choice) -> bool {
        self.0.contains(choice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Choice] {
        &self.0
    }

    /// Display labels, in insertion order.
    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|c| c.label().to_string()).collect()
    }
}

impl FromIterator<Choice> for Selections {
    fn from_iter<T: IntoIterator<Item = Choice>>(iter: T) -> Self {
        let mut selections = Selections::new();
        for choice in iter {
            selections.add(choice);
        }
        selections
    }
}

/// A closed set of options rendered as a button group or select.
pub trait FixedChoice: Copy + Eq + Sized + 'static {
    /// All options, in display order.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

/// Which eye a procedure or medication concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eye {
    Left,
    Right,
    Both,
}

impl FixedChoice for Eye {
    const ALL: &'static [Self] = &[Eye::Left, Eye::Right, Eye::Both];

    fn label(self) -> &'static str {
        match self {
            Eye::Left => "Left",
            Eye::Right => "Right",
            Eye::Both => "Both",
        }
    }
}

/// Contact lens wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactLensHistory {
    Yes,
    No,
    Sometimes,
}

impl FixedChoice for ContactLensHistory {
    const ALL: &'static [Self] = &[
        ContactLensHistory::Yes,
        ContactLensHistory::No,
        ContactLensHistory::Sometimes,
    ];

    fn label(self) -> &'static str {
        match self {
            ContactLensHistory::Yes => "Yes",
            ContactLensHistory::No => "No",
            ContactLensHistory::Sometimes => "Sometimes",
        }
    }
}

/// Eye medication frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dosage {
    #[serde(rename = "Once daily")]
    OnceDaily,
    #[serde(rename = "Twice daily")]
    TwiceDaily,
    #[serde(rename = "Thrice daily")]
    ThriceDaily,
    #[serde(rename = "Four times daily")]
    FourTimesDaily,
    #[serde(rename = "Five times daily")]
    FiveTimesDaily,
    #[serde(rename = "More than 5 times daily")]
    MoreThanFiveTimesDaily,
}

impl FixedChoice for Dosage {
    const ALL: &'static [Self] = &[
        Dosage::OnceDaily,
        Dosage::TwiceDaily,
        Dosage::ThriceDaily,
        Dosage::FourTimesDaily,
        Dosage::FiveTimesDaily,
        Dosage::MoreThanFiveTimesDaily,
    ];

    fn label(self) -> &'static str {
        match self {
            Dosage::OnceDaily => "Once daily",
            Dosage::TwiceDaily => "Twice daily",
            Dosage::ThriceDaily => "Thrice daily",
            Dosage::FourTimesDaily => "Four times daily",
            Dosage::FiveTimesDaily => "Five times daily",
            Dosage::MoreThanFiveTimesDaily => "More than 5 times daily",
        }
    }
}
