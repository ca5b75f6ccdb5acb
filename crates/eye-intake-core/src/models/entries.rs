//! Structured multi-entry values (procedures, specialists, eye medications).

use serde::{Deserialize, Serialize};

use super::choice::{AddOutcome, Choice, Dosage, Eye};

/// An entry whose primary attribute is a [`Choice`].
pub trait PairedEntry: Clone {
    /// Primary name (surgery, specialist type, medication).
    fn primary(&self) -> &Choice;

    /// The entry recorded when the user picks "None / Not Applicable".
    fn not_applicable() -> Self;
}

/// A past surgery or laser treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureEntry {
    pub name: Choice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eye: Option<Eye>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
}

impl ProcedureEntry {
    pub fn new(name: impl Into<Choice>) -> Self {
        Self {
            name: name.into(),
            eye: None,
            doctor: None,
        }
    }
}

impl PairedEntry for ProcedureEntry {
    fn primary(&self) -> &Choice {
        &self.name
    }

    fn not_applicable() -> Self {
        Self::new(Choice::NotApplicable)
    }
}

/// A specialist the patient sees, optionally with the doctor's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistEntry {
    pub specialist_type: Choice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
}

impl SpecialistEntry {
    pub fn new(specialist_type: impl Into<Choice>) -> Self {
        Self {
            specialist_type: specialist_type.into(),
            doctor_name: None,
        }
    }
}

impl PairedEntry for SpecialistEntry {
    fn primary(&self) -> &Choice {
        &self.specialist_type
    }

    fn not_applicable() -> Self {
        Self::new(Choice::NotApplicable)
    }
}

/// A prescribed eye medication.
///
/// Dosage and affected eye are optional only so the sentinel entry can be
/// represented; validation requires both on every other entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeMedication {
    pub medication_name: Choice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<Dosage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_eye: Option<Eye>,
}

impl EyeMedication {
    pub fn new(medication_name: impl Into<Choice>, dosage: Dosage, affected_eye: Eye) -> Self {
        Self {
            medication_name: medication_name.into(),
            dosage: Some(dosage),
            affected_eye: Some(affected_eye),
        }
    }

    /// Whether all attributes required for a real medication are set.
    pub fn is_complete(&self) -> bool {
        self.medication_name.is_not_applicable()
            || (!self.medication_name.is_blank()
                && self.dosage.is_some()
                && self.affected_eye.is_some())
    }
}

impl PairedEntry for EyeMedication {
    fn primary(&self) -> &Choice {
        &self.medication_name
    }

    fn not_applicable() -> Self {
        Self {
            medication_name: Choice::NotApplicable,
            dosage: None,
            affected_eye: None,
        }
    }
}

/// Ordered list of entries with "None / Not Applicable" exclusivity.
///
/// Unlike [`super::Selections`], duplicates are allowed: the same surgery
/// may be recorded once per eye.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T>(Vec<T>);

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: PairedEntry> EntryList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, re-applying the sentinel rule.
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            list.add(entry);
        }
        list
    }

    /// Append an entry, honoring the sentinel rule.
    pub fn add(&mut self, entry: T) -> AddOutcome {
        let primary = entry.primary();
        if primary.is_blank() {
            return AddOutcome::Empty;
        }
        if primary.is_not_applicable() {
            if self.is_not_applicable() && self.0.len() == 1 {
                return AddOutcome::Duplicate;
            }
            self.0 = vec![T::not_applicable()];
            return AddOutcome::ReplacedWithNotApplicable;
        }
        if self.is_not_applicable() {
            return AddOutcome::Locked;
        }
        self.0.push(entry);
        AddOutcome::Added
    }

    /// Remove the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_not_applicable(&self) -> bool {
        self.0.iter().any(|e| e.primary().is_not_applicable())
    }

    pub fn accepts_additions(&self) -> bool {
        !self.is_not_applicable()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}
