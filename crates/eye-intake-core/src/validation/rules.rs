use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FieldError, ValidationReport};
use crate::models::{
    Choice, EntryList, FieldId, FormRecord, PairedEntry, PartialDate, Selections, MIN_BIRTH_YEAR,
    NOT_APPLICABLE_LABEL,
};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// `local@domain.tld`: no whitespace, a single `@`, and a dot in the domain
/// with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Applies field rules against a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    today: NaiveDate,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Pin the upper bound for dates of birth.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Validate the given fields only.
    pub fn validate_fields(&self, record: &FormRecord, fields: &[FieldId]) -> ValidationReport {
        let mut report = ValidationReport::new();
        for &field in fields {
            if let Some(error) = self.validate_field(record, field) {
                report.insert(field, error);
            }
        }
        report
    }

    /// First problem with a single field, if any.
    pub fn validate_field(&self, record: &FormRecord, field: FieldId) -> Option<FieldError> {
        match field {
            FieldId::FirstName => required_text(field, &record.first_name),
            FieldId::LastName => required_text(field, &record.last_name),
            FieldId::DateOfBirth => self.check_birth_date(&record.date_of_birth),
            FieldId::Email => {
                let email = record.email.trim();
                (!email.is_empty() && !is_valid_email(email)).then_some(FieldError::InvalidEmail)
            }
            FieldId::Phone => {
                if record.phone.is_empty() {
                    Some(FieldError::Required(field))
                } else if !record.phone.is_complete() {
                    Some(FieldError::InvalidPhone)
                } else {
                    None
                }
            }
            FieldId::Optometrist | FieldId::FamilyDoctor | FieldId::ContactLensHistory => None,
            FieldId::Specialists => check_entries(&record.specialists),
            FieldId::EyeSurgeries => check_entries(&record.eye_surgeries),
            FieldId::EyeLasers => check_entries(&record.eye_lasers),
            FieldId::EyeMedications => check_entries(&record.eye_medications).or_else(|| {
                record
                    .eye_medications
                    .iter()
                    .position(|m| !m.is_complete())
                    .map(|index| FieldError::IncompleteMedication { index })
            }),
            FieldId::EyeDiseases => check_selections(&record.eye_diseases),
            FieldId::EyeInjuries => check_selections(&record.eye_injuries),
            FieldId::EyeDrops => check_selections(&record.eye_drops),
            FieldId::MedicalConditions => check_selections(&record.medical_conditions),
            FieldId::RegularMedications => check_selections(&record.regular_medications),
            FieldId::DrugAllergies => check_selections(&record.drug_allergies),
        }
    }

    fn check_birth_date(&self, date: &PartialDate) -> Option<FieldError> {
        if date.is_empty() {
            return Some(FieldError::Required(FieldId::DateOfBirth));
        }
        let (Some(year), Some(month), Some(day)) = (date.year, date.month, date.day) else {
            return Some(FieldError::IncompleteDate);
        };
        let Some(parsed) = date.to_date() else {
            return Some(FieldError::InvalidDate(month, day, year));
        };
        let earliest = NaiveDate::from_ymd_opt(MIN_BIRTH_YEAR, 1, 1)?;
        (parsed < earliest || parsed > self.today).then_some(FieldError::DateOutOfRange)
    }
}

fn required_text(field: FieldId, value: &str) -> Option<FieldError> {
    value
        .trim()
        .is_empty()
        .then_some(FieldError::Required(field))
}

/// Sentinel exclusivity and uniqueness. Widgets keep these true; stored or
/// deserialized records are checked again here.
fn check_selections(selections: &Selections) -> Option<FieldError> {
    if selections.iter().any(reads_not_applicable) && selections.len() > 1 {
        return Some(FieldError::SentinelNotExclusive);
    }
    let mut seen = HashSet::new();
    selections
        .iter()
        .find(|c| !seen.insert(*c))
        .map(|c: &Choice| FieldError::Duplicate(c.label().to_string()))
}

/// Matches by label, so a value holding the sentinel text is caught
/// before storage turns it into the sentinel.
fn reads_not_applicable(choice: &Choice) -> bool {
    choice.label() == NOT_APPLICABLE_LABEL
}

fn check_entries<T: PairedEntry>(entries: &EntryList<T>) -> Option<FieldError> {
    if entries.iter().any(|e| reads_not_applicable(e.primary())) && entries.len() > 1 {
        return Some(FieldError::SentinelNotExclusive);
    }
    entries
        .iter()
        .position(|e| e.primary().is_blank())
        .map(|index| FieldError::MissingEntryName { index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dosage, Eye, EyeMedication, PhoneNumber, ProcedureEntry};

    fn validator() -> Validator {
        Validator::with_today(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn personal() -> FormRecord {
        FormRecord {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            date_of_birth: PartialDate::new(1985, 12, 10),
            phone: PhoneNumber::normalize("4165551234"),
            ..FormRecord::default()
        }
    }

    #[test]
    fn test_email_pattern_compiles() {
        assert_eq!(EMAIL_PATTERN.as_str(), r"^[^\s@]+@[^\s@]+\.[^\s@]+$");
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@clinic.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.de"));
        assert!(!is_valid_email("@b.de"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn test_personal_fields_pass() {
        let report = validator().validate_fields(&personal(), FieldId::ALL);
        assert!(report.is_valid(), "{report:?}");
    }

    #[test]
    fn test_missing_required_fields() {
        let report = validator().validate_fields(
            &FormRecord::default(),
            &[
                FieldId::FirstName,
                FieldId::LastName,
                FieldId::DateOfBirth,
                FieldId::Email,
                FieldId::Phone,
            ],
        );
        assert_eq!(
            report.fields(),
            vec![
                FieldId::FirstName,
                FieldId::LastName,
                FieldId::DateOfBirth,
                FieldId::Phone
            ]
        );
    }

    #[test]
    fn test_optional_email_checked_when_present() {
        let mut record = personal();
        record.email = "not-an-email".into();
        assert_eq!(
            validator().validate_field(&record, FieldId::Email),
            Some(FieldError::InvalidEmail)
        );
    }

    #[test]
    fn test_short_phone() {
        let mut record = personal();
        record.phone = PhoneNumber::normalize("416555");
        assert_eq!(
            validator().validate_field(&record, FieldId::Phone),
            Some(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn test_date_rules() {
        let v = validator();
        let mut record = personal();

        record.date_of_birth = PartialDate {
            year: Some(1990),
            month: Some(2),
            day: None,
        };
        assert_eq!(
            v.validate_field(&record, FieldId::DateOfBirth),
            Some(FieldError::IncompleteDate)
        );

        record.date_of_birth = PartialDate::new(1990, 2, 30);
        assert_eq!(
            v.validate_field(&record, FieldId::DateOfBirth),
            Some(FieldError::InvalidDate(2, 30, 1990))
        );

        record.date_of_birth = PartialDate::new(1919, 12, 31);
        assert_eq!(
            v.validate_field(&record, FieldId::DateOfBirth),
            Some(FieldError::DateOutOfRange)
        );

        record.date_of_birth = PartialDate::new(2026, 10, 20);
        assert_eq!(
            v.validate_field(&record, FieldId::DateOfBirth),
            Some(FieldError::DateOutOfRange)
        );

        record.date_of_birth = PartialDate::new(2024, 2, 29);
        assert_eq!(v.validate_field(&record, FieldId::DateOfBirth), None);
    }

    #[test]
    fn test_deserialized_sentinel_conflict_is_reported() {
        let record: FormRecord = serde_json::from_str(
            r#"{"eyeDiseases":["Glaucoma","None / Not Applicable"],
                "drugAllergies":["Latex","Latex"]}"#,
        )
        .unwrap();
        let v = validator();
        assert_eq!(
            v.validate_field(&record, FieldId::EyeDiseases),
            Some(FieldError::SentinelNotExclusive)
        );
        assert_eq!(
            v.validate_field(&record, FieldId::DrugAllergies),
            Some(FieldError::Duplicate("Latex".into()))
        );
    }

    #[test]
    fn test_sentinel_text_in_a_value_is_not_exclusive() {
        let v = validator();
        let mut record = personal();
        record.eye_medications = EntryList::from_entries([
            EyeMedication::new("Timolol", Dosage::OnceDaily, Eye::Left),
            EyeMedication::new(
                Choice::Value("None / Not Applicable".into()),
                Dosage::OnceDaily,
                Eye::Left,
            ),
        ]);
        assert_eq!(
            v.validate_field(&record, FieldId::EyeMedications),
            Some(FieldError::SentinelNotExclusive)
        );
    }

    #[test]
    fn test_entry_rules() {
        let v = validator();
        let mut record = personal();
        record.eye_surgeries = EntryList::from_entries([ProcedureEntry::new("LASIK")]);
        record.eye_medications = serde_json::from_str(
            r#"[{"medicationName":"Timolol","dosage":"Once daily","affectedEye":"Left"},
                {"medicationName":"Systane","dosage":"Twice daily"}]"#,
        )
        .unwrap();
        assert_eq!(v.validate_field(&record, FieldId::EyeSurgeries), None);
        assert_eq!(
            v.validate_field(&record, FieldId::EyeMedications),
            Some(FieldError::IncompleteMedication { index: 1 })
        );

        record.eye_medications =
            EntryList::from_entries([EyeMedication::new("Timolol", Dosage::OnceDaily, Eye::Left)]);
        assert_eq!(v.validate_field(&record, FieldId::EyeMedications), None);
    }
}
