//! Field and section validation.
//!
//! Validation is read-only: it inspects a [`FormRecord`](crate::models::FormRecord) and reports
//! problems keyed by field. The wizard decides what to do with the report.

mod rules;

pub use rules::{is_valid_email, Validator};

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::FieldId;
use crate::widgets::field_spec;

/// Fields that must be filled before leaving the personal section.
pub const REQUIRED_FIELDS: [FieldId; 4] = [
    FieldId::FirstName,
    FieldId::LastName,
    FieldId::DateOfBirth,
    FieldId::Phone,
];

/// A problem with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", sentence_label(.0))]
    Required(FieldId),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a 10-digit phone number")]
    InvalidPhone,

    #[error("Please select a year, month and day")]
    IncompleteDate,

    #[error("{0}/{1}/{2} is not a real calendar date")]
    InvalidDate(u32, u32, i32),

    #[error("Date of birth must be between 1920 and today")]
    DateOutOfRange,

    #[error("Entry {} is missing a name", .index + 1)]
    MissingEntryName { index: usize },

    #[error("Eye medication {} needs a dosage and an affected eye", .index + 1)]
    IncompleteMedication { index: usize },

    #[error("\"None / Not Applicable\" cannot be combined with other entries")]
    SentinelNotExclusive,

    #[error("\"{0}\" is listed more than once")]
    Duplicate(String),
}

/// "First Name" -> "First name", for use at the start of a sentence.
fn sentence_label(field: &FieldId) -> String {
    let label = field_spec(*field).label;
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
        None => field.key().to_string(),
    }
}

/// Errors found in one validation pass, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<FieldId, FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldId, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.errors.contains_key(&field)
    }

    /// Drop the error for one field (after the user edits it).
    pub fn clear_field(&mut self, field: FieldId) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    /// Fields with errors, in form order.
    pub fn fields(&self) -> Vec<FieldId> {
        self.errors.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldError)> {
        self.errors.iter().map(|(f, e)| (*f, e))
    }

    /// Field key to message, for display or FFI.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(f, e)| (f.key().to_string(), e.to_string()))
            .collect()
    }

    /// True if any error is a missing required value.
    pub fn has_missing_required(&self) -> bool {
        self.errors
            .values()
            .any(|e| matches!(e, FieldError::Required(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_messages() {
        assert_eq!(
            FieldError::Required(FieldId::FirstName).to_string(),
            "First name is required"
        );
        assert_eq!(
            FieldError::Required(FieldId::DateOfBirth).to_string(),
            "Date of birth is required"
        );
    }

    #[test]
    fn test_indexed_messages_are_one_based() {
        assert_eq!(
            FieldError::MissingEntryName { index: 0 }.to_string(),
            "Entry 1 is missing a name"
        );
        assert_eq!(
            FieldError::InvalidDate(2, 30, 1990).to_string(),
            "2/30/1990 is not a real calendar date"
        );
    }

    #[test]
    fn test_required_fields_match_widget_table() {
        for field in FieldId::ALL {
            assert_eq!(
                REQUIRED_FIELDS.contains(field),
                field_spec(*field).required,
                "{field}"
            );
        }
    }

    #[test]
    fn test_report_clear_field() {
        let mut report = ValidationReport::new();
        report.insert(FieldId::Phone, FieldError::InvalidPhone);
        report.insert(FieldId::FirstName, FieldError::Required(FieldId::FirstName));
        assert_eq!(report.fields(), vec![FieldId::FirstName, FieldId::Phone]);
        assert!(report.has_missing_required());

        report.clear_field(FieldId::FirstName);
        assert!(!report.has_missing_required());
        assert_eq!(
            report.messages().get("phone").map(String::as_str),
            Some("Please enter a 10-digit phone number")
        );
    }
}
