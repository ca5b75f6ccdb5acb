//! The fixed sequence of form sections.

use serde::Serialize;

use crate::models::FieldId;

/// Identifies a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Personal,
    Providers,
    EyeHistory,
    MedicalHistory,
    Allergies,
}

/// A titled group of fields shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub fields: &'static [FieldId],
}

pub const SECTIONS: &[Section] = &[
    Section {
        id: SectionId::Personal,
        title: "Personal Information",
        fields: &[
            FieldId::FirstName,
            FieldId::LastName,
            FieldId::DateOfBirth,
            FieldId::Email,
            FieldId::Phone,
        ],
    },
    Section {
        id: SectionId::Providers,
        title: "Healthcare Providers",
        fields: &[
            FieldId::Optometrist,
            FieldId::FamilyDoctor,
            FieldId::Specialists,
        ],
    },
    Section {
        id: SectionId::EyeHistory,
        title: "Eye History",
        fields: &[
            FieldId::EyeDiseases,
            FieldId::ContactLensHistory,
            FieldId::EyeSurgeries,
            FieldId::EyeLasers,
            FieldId::EyeInjuries,
            FieldId::EyeDrops,
            FieldId::EyeMedications,
        ],
    },
    Section {
        id: SectionId::MedicalHistory,
        title: "Medical History",
        fields: &[FieldId::MedicalConditions, FieldId::RegularMedications],
    },
    Section {
        id: SectionId::Allergies,
        title: "Allergies",
        fields: &[FieldId::DrugAllergies],
    },
];

/// Section that shows `field`.
pub fn section_of(field: FieldId) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.fields.contains(&field))
}
