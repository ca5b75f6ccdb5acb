//! Persisted registration models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::choice::{ContactLensHistory, FixedChoice, Selections};
use super::entries::{EntryList, EyeMedication, ProcedureEntry, SpecialistEntry};
use super::record::{FormRecord, PartialDate, PhoneNumber};

/// A form record flattened into the shape of the `patient_registrations`
/// table. Empty optional text becomes `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationRow {
    /// Patient first name
    pub first_name: String,
    /// Patient last name
    pub last_name: String,
    /// Date of birth; `None` only for records that skipped validation
    pub date_of_birth: Option<NaiveDate>,
    /// Contact e-mail
    pub email: Option<String>,
    /// Ten-digit phone number
    pub phone: String,
    /// Current optometrist
    pub optometrist: Option<String>,
    /// Family doctor
    pub family_doctor: Option<String>,
    /// "Yes", "No" or "Sometimes"
    pub contact_lens_history: Option<String>,
    pub specialists: EntryList<SpecialistEntry>,
    pub eye_diseases: Selections,
    pub eye_surgeries: EntryList<ProcedureEntry>,
    pub eye_lasers: EntryList<ProcedureEntry>,
    pub eye_injuries: Selections,
    pub eye_drops: Selections,
    pub eye_medications: EntryList<EyeMedication>,
    pub regular_medications: Selections,
    pub medical_conditions: Selections,
    pub drug_allergies: Selections,
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl From<&FormRecord> for RegistrationRow {
    fn from(record: &FormRecord) -> Self {
        Self {
            first_name: record.first_name.trim().to_string(),
            last_name: record.last_name.trim().to_string(),
            date_of_birth: record.date_of_birth.to_date(),
            email: non_empty(&record.email),
            phone: record.phone.digits().to_string(),
            optometrist: non_empty(&record.optometrist),
            family_doctor: non_empty(&record.family_doctor),
            contact_lens_history: record.contact_lens_history.map(|c| c.label().to_string()),
            specialists: record.specialists.clone(),
            eye_diseases: record.eye_diseases.clone(),
            eye_surgeries: record.eye_surgeries.clone(),
            eye_lasers: record.eye_lasers.clone(),
            eye_injuries: record.eye_injuries.clone(),
            eye_drops: record.eye_drops.clone(),
            eye_medications: record.eye_medications.clone(),
            regular_medications: record.regular_medications.clone(),
            medical_conditions: record.medical_conditions.clone(),
            drug_allergies: record.drug_allergies.clone(),
        }
    }
}

impl RegistrationRow {
    /// Rebuild the form record this row was made from.
    pub fn to_record(&self) -> FormRecord {
        FormRecord {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self
                .date_of_birth
                .map(PartialDate::from_date)
                .unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            phone: PhoneNumber::normalize(&self.phone),
            optometrist: self.optometrist.clone().unwrap_or_default(),
            family_doctor: self.family_doctor.clone().unwrap_or_default(),
            specialists: self.specialists.clone(),
            eye_diseases: self.eye_diseases.clone(),
            contact_lens_history: self
                .contact_lens_history
                .as_deref()
                .and_then(ContactLensHistory::from_label),
            eye_surgeries: self.eye_surgeries.clone(),
            eye_lasers: self.eye_lasers.clone(),
            eye_injuries: self.eye_injuries.clone(),
            eye_drops: self.eye_drops.clone(),
            eye_medications: self.eye_medications.clone(),
            regular_medications: self.regular_medications.clone(),
            medical_conditions: self.medical_conditions.clone(),
            drug_allergies: self.drug_allergies.clone(),
        }
    }

    /// SHA-256 of the row's canonical JSON, hex encoded.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let canonical = serde_json::to_vec(self)?;
        Ok(hash_data(&canonical))
    }
}

/// Compute SHA-256 hash of data.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// What the store hands back after a successful insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedRegistration {
    /// UUID assigned by the store
    pub id: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// RFC 3339 last update timestamp
    pub updated_at: String,
}

/// A registration read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredRegistration {
    pub meta: PersistedRegistration,
    pub fingerprint: String,
    pub row: RegistrationRow,
}

impl StoredRegistration {
    pub fn to_record(&self) -> FormRecord {
        self.row.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Choice, Dosage, Eye};

    fn full_record() -> FormRecord {
        let mut surgery = ProcedureEntry::new("Cataract Surgery");
        surgery.eye = Some(Eye::Left);
        surgery.doctor = Some("Dr. Lee".into());
        let mut specialist = SpecialistEntry::new("Neurologist");
        specialist.doctor_name = Some("Dr. Kim".into());

        FormRecord {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            date_of_birth: PartialDate::new(1956, 12, 9),
            email: "grace@example.org".into(),
            phone: PhoneNumber::normalize("(416) 555-0199"),
            optometrist: "Dr. Lisa Wong".into(),
            family_doctor: "Dr. Kevin Liu".into(),
            specialists: EntryList::from_entries([specialist]),
            eye_diseases: Selections::from_labels(["Glaucoma", "Dry Eye Syndrome"]),
            contact_lens_history: Some(ContactLensHistory::Sometimes),
            eye_surgeries: EntryList::from_entries([surgery]),
            eye_lasers: EntryList::from_entries([ProcedureEntry::new(Choice::NotApplicable)]),
            eye_injuries: Selections::from_labels(["None / Not Applicable"]),
            eye_drops: Selections::from_labels(["Systane"]),
            eye_medications: EntryList::from_entries([EyeMedication::new(
                "Latanoprost (Xalatan)",
                Dosage::OnceDaily,
                Eye::Both,
            )]),
            regular_medications: Selections::from_labels(["Metformin", "Custom tonic"]),
            medical_conditions: Selections::from_labels(["Diabetes Type 2"]),
            drug_allergies: Selections::from_labels(["Penicillin"]),
        }
    }

    #[test]
    fn test_row_round_trip() {
        let record = full_record();
        let row = RegistrationRow::from(&record);
        assert_eq!(row.phone, "4165550199");
        assert_eq!(row.contact_lens_history.as_deref(), Some("Sometimes"));
        assert_eq!(row.to_record(), record);
    }

    #[test]
    fn test_padded_text_round_trips_after_reducer() {
        use crate::wizard::{apply, FieldUpdate};

        let mut record = full_record();
        for update in [
            FieldUpdate::FirstName("Ada ".into()),
            FieldUpdate::LastName("  Lovelace".into()),
            FieldUpdate::Email(" ada@example.org ".into()),
            FieldUpdate::Optometrist("Dr. Lisa Wong\n".into()),
            FieldUpdate::FamilyDoctor("   ".into()),
        ] {
            record = apply(&record, update);
        }

        let row = RegistrationRow::from(&record);
        assert_eq!(row.first_name, "Ada");
        assert_eq!(row.family_doctor, None);
        assert_eq!(row.to_record(), record);
    }

    #[test]
    fn test_empty_optionals_become_none() {
        let mut record = full_record();
        record.email = "   ".into();
        record.optometrist.clear();
        let row = RegistrationRow::from(&record);
        assert_eq!(row.email, None);
        assert_eq!(row.optometrist, None);
    }

    #[test]
    fn test_fingerprint_is_stable_and_content_sensitive() {
        let row = RegistrationRow::from(&full_record());
        let a = row.fingerprint().unwrap();
        assert_eq!(a.len(), 64);
        assert_eq!(a, row.clone().fingerprint().unwrap());

        let mut other = row;
        other.last_name = "Hoppe".into();
        assert_ne!(a, other.fingerprint().unwrap());
    }
}
