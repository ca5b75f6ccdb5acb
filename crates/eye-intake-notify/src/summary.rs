//! Patient summary document model.
//!
//! A [`PatientSummary`] is the printable view of a [`FormRecord`]: four
//! titled groups, each listing only the fields that hold a value.

use chrono::NaiveDate;
use serde::Serialize;

use eye_intake_core::models::{
    Choice, EntryList, EyeMedication, FixedChoice, FormRecord, ProcedureEntry, Selections,
    SpecialistEntry,
};
use eye_intake_core::widgets::format_mask;

/// The value of one summary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SummaryValue {
    Text(String),
    List(Vec<String>),
    Medications(Vec<MedicationLine>),
}

/// One prescribed eye medication as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationLine {
    pub name: String,
    pub dosage: Option<String>,
    pub affected_eye: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    pub label: &'static str,
    pub value: SummaryValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub title: &'static str,
    pub items: Vec<SummaryItem>,
}

impl SummarySection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            items: Vec::new(),
        }
    }

    fn text(&mut self, label: &'static str, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.items.push(SummaryItem {
                label,
                value: SummaryValue::Text(value.to_string()),
            });
        }
    }

    fn list(&mut self, label: &'static str, values: Vec<String>) {
        if !values.is_empty() {
            self.items.push(SummaryItem {
                label,
                value: SummaryValue::List(values),
            });
        }
    }
}

/// Everything needed to render the summary sent to the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientSummary {
    pub clinic_name: String,
    pub patient_name: String,
    pub generated_on: NaiveDate,
    pub sections: Vec<SummarySection>,
}

impl PatientSummary {
    pub fn from_record(record: &FormRecord, clinic_name: &str, generated_on: NaiveDate) -> Self {
        let mut personal = SummarySection::new("Personal Information");
        personal.text("Name", &record.full_name());
        if let Some(dob) = record.date_of_birth.display() {
            personal.text("Date of Birth", &dob);
        }
        personal.text("Email", &record.email);
        personal.text("Phone", &format_mask(record.phone.digits()));

        let mut providers = SummarySection::new("Healthcare Providers");
        providers.text("Optometrist", &record.optometrist);
        providers.text("Family Doctor", &record.family_doctor);
        providers.list("Specialists", specialist_lines(&record.specialists));

        let mut eyes = SummarySection::new("Eye History");
        eyes.list("Eye Diseases", labels(&record.eye_diseases));
        if let Some(history) = record.contact_lens_history {
            eyes.text("Contact Lens History", history.label());
        }
        eyes.list("Eye Surgeries", procedure_lines(&record.eye_surgeries));
        eyes.list("Eye Lasers", procedure_lines(&record.eye_lasers));
        eyes.list("Eye Injuries", labels(&record.eye_injuries));
        eyes.list("Eye Drops", labels(&record.eye_drops));

        let mut medications = SummarySection::new("Medications");
        let eye_meds = medication_lines(&record.eye_medications);
        if !eye_meds.is_empty() {
            medications.items.push(SummaryItem {
                label: "Eye Medications",
                value: SummaryValue::Medications(eye_meds),
            });
        }
        medications.list("Regular Medications", labels(&record.regular_medications));
        medications.list("Medical Conditions", labels(&record.medical_conditions));
        medications.list("Drug Allergies", labels(&record.drug_allergies));

        Self {
            clinic_name: clinic_name.to_string(),
            patient_name: record.full_name(),
            generated_on,
            sections: vec![personal, providers, eyes, medications],
        }
    }

    /// Look up an item by section title and label.
    pub fn item(&self, section: &str, label: &str) -> Option<&SummaryValue> {
        self.sections
            .iter()
            .find(|s| s.title == section)?
            .items
            .iter()
            .find(|i| i.label == label)
            .map(|i| &i.value)
    }
}

fn labels(selections: &Selections) -> Vec<String> {
    selections.labels()
}

fn with_qualifiers(name: &Choice, qualifiers: &[Option<&str>]) -> String {
    let extra: Vec<&str> = qualifiers.iter().flatten().copied().collect();
    if extra.is_empty() {
        name.label().to_string()
    } else {
        format!("{} ({})", name, extra.join(", "))
    }
}

fn specialist_lines(entries: &EntryList<SpecialistEntry>) -> Vec<String> {
    entries
        .iter()
        .map(|e| with_qualifiers(&e.specialist_type, &[e.doctor_name.as_deref()]))
        .collect()
}

fn procedure_lines(entries: &EntryList<ProcedureEntry>) -> Vec<String> {
    entries
        .iter()
        .map(|e| {
            with_qualifiers(
                &e.name,
                &[e.eye.map(|eye| eye.label()), e.doctor.as_deref()],
            )
        })
        .collect()
}

fn medication_lines(entries: &EntryList<EyeMedication>) -> Vec<MedicationLine> {
    entries
        .iter()
        .map(|m| MedicationLine {
            name: m.medication_name.label().to_string(),
            dosage: m.dosage.map(|d| d.label().to_string()),
            affected_eye: m.affected_eye.map(|e| e.label().to_string()),
        })
        .collect()
}
