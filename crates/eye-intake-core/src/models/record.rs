//! The intake form record and its scalar building blocks.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::choice::{ContactLensHistory, Selections};
use super::entries::{EntryList, EyeMedication, ProcedureEntry, SpecialistEntry};

/// Maximum number of digits in a phone number.
pub const PHONE_DIGITS: usize = 10;

/// Earliest selectable birth year.
pub const MIN_BIRTH_YEAR: i32 = 1920;

/// A date assembled from three independent pickers.
///
/// Any part may be unset while the user is still choosing. The day is not
/// clamped when year or month change, so an impossible combination such as
/// February 30 can exist until validation reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl PartialDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// All three parts are set (not necessarily a real date).
    pub fn is_complete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }

    /// The calendar date, if complete and real.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }

    /// Number of selectable days for the current year and month.
    ///
    /// Falls back to 31 while either is unset.
    pub fn day_count(&self) -> u32 {
        match (self.year, self.month) {
            (Some(year), Some(month)) => days_in_month(year, month).unwrap_or(31),
            _ => 31,
        }
    }

    /// `M/D/YYYY`, as printed on the summary document.
    pub fn display(&self) -> Option<String> {
        match (self.year, self.month, self.day) {
            (Some(y), Some(m), Some(d)) => Some(format!("{}/{}/{}", m, d, y)),
            _ => None,
        }
    }
}

/// Calendar days in a month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Canonical phone number: digits only, at most ten of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strip every non-digit and keep the first ten digits.
    pub fn normalize(input: &str) -> Self {
        Self(
            input
                .chars()
                .filter(char::is_ascii_digit)
                .take(PHONE_DIGITS)
                .collect(),
        )
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exactly ten digits.
    pub fn is_complete(&self) -> bool {
        self.0.len() == PHONE_DIGITS
    }
}

impl From<String> for PhoneNumber {
    fn from(value: String) -> Self {
        Self::normalize(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FirstName,
    LastName,
    DateOfBirth,
    Email,
    Phone,
    Optometrist,
    FamilyDoctor,
    Specialists,
    EyeDiseases,
    ContactLensHistory,
    EyeSurgeries,
    EyeLasers,
    EyeInjuries,
    EyeDrops,
    EyeMedications,
    MedicalConditions,
    RegularMedications,
    DrugAllergies,
}

impl FieldId {
    pub const ALL: &'static [FieldId] = &[
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::DateOfBirth,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Optometrist,
        FieldId::FamilyDoctor,
        FieldId::Specialists,
        FieldId::EyeDiseases,
        FieldId::ContactLensHistory,
        FieldId::EyeSurgeries,
        FieldId::EyeLasers,
        FieldId::EyeInjuries,
        FieldId::EyeDrops,
        FieldId::EyeMedications,
        FieldId::MedicalConditions,
        FieldId::RegularMedications,
        FieldId::DrugAllergies,
    ];

    /// Stable key used in error maps and across the FFI boundary.
    pub fn key(self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::DateOfBirth => "dateOfBirth",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Optometrist => "optometrist",
            FieldId::FamilyDoctor => "familyDoctor",
            FieldId::Specialists => "specialists",
            FieldId::EyeDiseases => "eyeDiseases",
            FieldId::ContactLensHistory => "contactLensHistory",
            FieldId::EyeSurgeries => "eyeSurgeries",
            FieldId::EyeLasers => "eyeLasers",
            FieldId::EyeInjuries => "eyeInjuries",
            FieldId::EyeDrops => "eyeDrops",
            FieldId::EyeMedications => "eyeMedications",
            FieldId::MedicalConditions => "medicalConditions",
            FieldId::RegularMedications => "regularMedications",
            FieldId::DrugAllergies => "drugAllergies",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Everything collected during one intake session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormRecord {
    // Personal information
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: PartialDate,
    pub email: String,
    pub phone: PhoneNumber,

    // Healthcare providers
    pub optometrist: String,
    pub family_doctor: String,
    pub specialists: EntryList<SpecialistEntry>,

    // Eye history
    pub eye_diseases: Selections,
    pub contact_lens_history: Option<ContactLensHistory>,
    pub eye_surgeries: EntryList<ProcedureEntry>,
    pub eye_lasers: EntryList<ProcedureEntry>,
    pub eye_injuries: Selections,
    pub eye_drops: Selections,

    // Medications
    pub eye_medications: EntryList<EyeMedication>,
    pub regular_medications: Selections,
    pub medical_conditions: Selections,
    pub drug_allergies: Selections,
}

impl FormRecord {
    /// A fresh, empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been entered yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Whether the given field currently holds a value.
    pub fn has_value(&self, field: FieldId) -> bool {
        match field {
            FieldId::FirstName => !self.first_name.trim().is_empty(),
            FieldId::LastName => !self.last_name.trim().is_empty(),
            FieldId::DateOfBirth => !self.date_of_birth.is_empty(),
            FieldId::Email => !self.email.trim().is_empty(),
            FieldId::Phone => !self.phone.is_empty(),
            FieldId::Optometrist => !self.optometrist.trim().is_empty(),
            FieldId::FamilyDoctor => !self.family_doctor.trim().is_empty(),
            FieldId::Specialists => !self.specialists.is_empty(),
            FieldId::EyeDiseases => !self.eye_diseases.is_empty(),
            FieldId::ContactLensHistory => self.contact_lens_history.is_some(),
            FieldId::EyeSurgeries => !self.eye_surgeries.is_empty(),
            FieldId::EyeLasers => !self.eye_lasers.is_empty(),
            FieldId::EyeInjuries => !self.eye_injuries.is_empty(),
            FieldId::EyeDrops => !self.eye_drops.is_empty(),
            FieldId::EyeMedications => !self.eye_medications.is_empty(),
            FieldId::MedicalConditions => !self.medical_conditions.is_empty(),
            FieldId::RegularMedications => !self.regular_medications.is_empty(),
            FieldId::DrugAllergies => !self.drug_allergies.is_empty(),
        }
    }

    /// Serialize to canonical JSON (field order is fixed by the struct).
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 4), Some(30));
        assert_eq!(days_in_month(2023, 13), None);
    }

    #[test]
    fn test_partial_date_day_count_defaults_to_31() {
        let mut date = PartialDate::default();
        assert_eq!(date.day_count(), 31);
        date.month = Some(2);
        assert_eq!(date.day_count(), 31);
        date.year = Some(2023);
        assert_eq!(date.day_count(), 28);
    }

    #[test]
    fn test_partial_date_completeness() {
        let date = PartialDate {
            year: Some(1990),
            month: Some(2),
            day: Some(30),
        };
        assert!(date.is_complete());
        assert!(date.to_date().is_none());
        assert_eq!(PartialDate::new(1990, 5, 17).display().unwrap(), "5/17/1990");
    }

    #[test]
    fn test_phone_normalize() {
        let phone = PhoneNumber::normalize("abc4165551234xyz");
        assert_eq!(phone.digits(), "4165551234");
        assert!(phone.is_complete());

        let long = PhoneNumber::normalize("(416) 555-1234 ext 99");
        assert_eq!(long.digits(), "4165551234");

        assert!(PhoneNumber::normalize("555-12").digits().len() == 5);
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_key(field.key()), Some(*field));
        }
        assert_eq!(
            serde_json::to_string(&FieldId::DateOfBirth).unwrap(),
            r#""dateOfBirth""#
        );
    }

    #[test]
    fn test_new_record_is_blank() {
        let mut record = FormRecord::new();
        assert!(record.is_blank());
        record.first_name = "Ada".into();
        assert!(!record.is_blank());
        assert!(record.has_value(FieldId::FirstName));
        assert!(!record.has_value(FieldId::Phone));
    }
}
