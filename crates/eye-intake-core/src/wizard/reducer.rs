//! Pure record updates.

use crate::models::{
    ContactLensHistory, EntryList, EyeMedication, FieldId, FormRecord, PartialDate, PhoneNumber,
    ProcedureEntry, Selections, SpecialistEntry,
};

/// A new value for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    DateOfBirth(PartialDate),
    Email(String),
    Phone(PhoneNumber),
    Optometrist(String),
    FamilyDoctor(String),
    Specialists(EntryList<SpecialistEntry>),
    EyeDiseases(Selections),
    ContactLensHistory(Option<ContactLensHistory>),
    EyeSurgeries(EntryList<ProcedureEntry>),
    EyeLasers(EntryList<ProcedureEntry>),
    EyeInjuries(Selections),
    EyeDrops(Selections),
    EyeMedications(EntryList<EyeMedication>),
    MedicalConditions(Selections),
    RegularMedications(Selections),
    DrugAllergies(Selections),
}

impl FieldUpdate {
    /// The field this update writes.
    pub fn field(&self) -> FieldId {
        match self {
            FieldUpdate::FirstName(_) => FieldId::FirstName,
            FieldUpdate::LastName(_) => FieldId::LastName,
            FieldUpdate::DateOfBirth(_) => FieldId::DateOfBirth,
            FieldUpdate::Email(_) => FieldId::Email,
            FieldUpdate::Phone(_) => FieldId::Phone,
            FieldUpdate::Optometrist(_) => FieldId::Optometrist,
            FieldUpdate::FamilyDoctor(_) => FieldId::FamilyDoctor,
            FieldUpdate::Specialists(_) => FieldId::Specialists,
            FieldUpdate::EyeDiseases(_) => FieldId::EyeDiseases,
            FieldUpdate::ContactLensHistory(_) => FieldId::ContactLensHistory,
            FieldUpdate::EyeSurgeries(_) => FieldId::EyeSurgeries,
            FieldUpdate::EyeLasers(_) => FieldId::EyeLasers,
            FieldUpdate::EyeInjuries(_) => FieldId::EyeInjuries,
            FieldUpdate::EyeDrops(_) => FieldId::EyeDrops,
            FieldUpdate::EyeMedications(_) => FieldId::EyeMedications,
            FieldUpdate::MedicalConditions(_) => FieldId::MedicalConditions,
            FieldUpdate::RegularMedications(_) => FieldId::RegularMedications,
            FieldUpdate::DrugAllergies(_) => FieldId::DrugAllergies,
        }
    }

    /// Update for a plain text field; `None` for other fields.
    pub fn text(field: FieldId, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        Some(match field {
            FieldId::FirstName => FieldUpdate::FirstName(value),
            FieldId::LastName => FieldUpdate::LastName(value),
            FieldId::Email => FieldUpdate::Email(value),
            FieldId::Optometrist => FieldUpdate::Optometrist(value),
            FieldId::FamilyDoctor => FieldUpdate::FamilyDoctor(value),
            _ => return None,
        })
    }

    /// Update for a selection-set field; `None` for other fields.
    pub fn selections(field: FieldId, value: Selections) -> Option<Self> {
        Some(match field {
            FieldId::EyeDiseases => FieldUpdate::EyeDiseases(value),
            FieldId::EyeInjuries => FieldUpdate::EyeInjuries(value),
            FieldId::EyeDrops => FieldUpdate::EyeDrops(value),
            FieldId::MedicalConditions => FieldUpdate::MedicalConditions(value),
            FieldId::RegularMedications => FieldUpdate::RegularMedications(value),
            FieldId::DrugAllergies => FieldUpdate::DrugAllergies(value),
            _ => return None,
        })
    }

    /// Update for a procedure list field; `None` for other fields.
    pub fn procedures(field: FieldId, value: EntryList<ProcedureEntry>) -> Option<Self> {
        match field {
            FieldId::EyeSurgeries => Some(FieldUpdate::EyeSurgeries(value)),
            FieldId::EyeLasers => Some(FieldUpdate::EyeLasers(value)),
            _ => None,
        }
    }
}

/// Current value of a selection-set field.
pub fn selections_of(record: &FormRecord, field: FieldId) -> Option<&Selections> {
    match field {
        FieldId::EyeDiseases => Some(&record.eye_diseases),
        FieldId::EyeInjuries => Some(&record.eye_injuries),
        FieldId::EyeDrops => Some(&record.eye_drops),
        FieldId::MedicalConditions => Some(&record.medical_conditions),
        FieldId::RegularMedications => Some(&record.regular_medications),
        FieldId::DrugAllergies => Some(&record.drug_allergies),
        _ => None,
    }
}

/// Current value of a procedure list field.
pub fn procedures_of(record: &FormRecord, field: FieldId) -> Option<&EntryList<ProcedureEntry>> {
    match field {
        FieldId::EyeSurgeries => Some(&record.eye_surgeries),
        FieldId::EyeLasers => Some(&record.eye_lasers),
        _ => None,
    }
}

fn canonical(text: String) -> String {
    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        text
    } else {
        trimmed.to_string()
    }
}

/// Return a copy of `record` with `update` applied.
///
/// Text fields are stored trimmed, which is also how they are persisted.
pub fn apply(record: &FormRecord, update: FieldUpdate) -> FormRecord {
    let mut next = record.clone();
    match update {
        FieldUpdate::FirstName(v) => next.first_name = canonical(v),
        FieldUpdate::LastName(v) => next.last_name = canonical(v),
        FieldUpdate::DateOfBirth(v) => next.date_of_birth = v,
        FieldUpdate::Email(v) => next.email = canonical(v),
        FieldUpdate::Phone(v) => next.phone = v,
        FieldUpdate::Optometrist(v) => next.optometrist = canonical(v),
        FieldUpdate::FamilyDoctor(v) => next.family_doctor = canonical(v),
        FieldUpdate::Specialists(v) => next.specialists = v,
        FieldUpdate::EyeDiseases(v) => next.eye_diseases = v,
        FieldUpdate::ContactLensHistory(v) => next.contact_lens_history = v,
        FieldUpdate::EyeSurgeries(v) => next.eye_surgeries = v,
        FieldUpdate::EyeLasers(v) => next.eye_lasers = v,
        FieldUpdate::EyeInjuries(v) => next.eye_injuries = v,
        FieldUpdate::EyeDrops(v) => next.eye_drops = v,
        FieldUpdate::EyeMedications(v) => next.eye_medications = v,
        FieldUpdate::MedicalConditions(v) => next.medical_conditions = v,
        FieldUpdate::RegularMedications(v) => next.regular_medications = v,
        FieldUpdate::DrugAllergies(v) => next.drug_allergies = v,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_leaves_input_untouched() {
        let before = FormRecord::new();
        let after = apply(&before, FieldUpdate::FirstName("Ada".into()));
        assert!(before.is_blank());
        assert_eq!(after.first_name, "Ada");
    }

    #[test]
    fn test_text_is_trimmed() {
        let record = apply(&FormRecord::new(), FieldUpdate::FirstName(" Mary Ann ".into()));
        let record = apply(&record, FieldUpdate::Email("\tmary@example.org ".into()));
        let record = apply(&record, FieldUpdate::Optometrist("   ".into()));
        assert_eq!(record.first_name, "Mary Ann");
        assert_eq!(record.email, "mary@example.org");
        assert_eq!(record.optometrist, "");
    }

    #[test]
    fn test_update_reports_its_field() {
        let update = FieldUpdate::Phone(PhoneNumber::normalize("416"));
        assert_eq!(update.field(), FieldId::Phone);
        assert_eq!(
            FieldUpdate::text(FieldId::Email, "a@b.co").map(|u| u.field()),
            Some(FieldId::Email)
        );
        assert!(FieldUpdate::text(FieldId::Phone, "416").is_none());
    }

    #[test]
    fn test_selection_helpers_agree() {
        for field in FieldId::ALL {
            let update = FieldUpdate::selections(*field, Selections::from_labels(["Latex"]));
            let record = update.map(|u| apply(&FormRecord::new(), u));
            match record {
                Some(record) => assert_eq!(
                    selections_of(&record, *field).map(Selections::labels),
                    Some(vec!["Latex".to_string()])
                ),
                None => assert!(selections_of(&FormRecord::new(), *field).is_none()),
            }
        }
    }
}
