//! Structured input widgets and the per-field widget table.
//!
//! Widgets never own a committed value. Each one takes the current value
//! from the [`crate::FormRecord`] and hands back the next value; the caller
//! feeds it through the wizard reducer.

mod autocomplete;
mod button_group;
mod date;
mod entry_list;
mod multi_select;
mod phone;

pub use autocomplete::{Autocomplete, SuggestionPopup, DEFAULT_BLUR_GRACE, DEFAULT_SUGGESTION_LIMIT};
pub use button_group::{ButtonGroup, ChoiceButton};
pub use date::{month_from_name, month_name, DateSelector, MONTH_NAMES};
pub use entry_list::{
    EntryListWidget, EntryOptions, EyeMedicationList, MedicationListWidget, StagedEntry,
};
pub use multi_select::{MultiSelect, DEFAULT_CHIP_SUGGESTION_LIMIT};
pub use phone::{format_mask, PhoneInput, PhoneStyle};

use serde::Serialize;

use crate::catalog::CatalogKind;
use crate::models::{ContactLensHistory as LensHistory, FieldId, FixedChoice};

/// Which widget renders a field, with that widget's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetKind {
    TextInput,
    Email,
    Phone,
    CompoundDate,
    Autocomplete {
        catalog: CatalogKind,
    },
    MultiSelect {
        catalog: CatalogKind,
        allow_custom: bool,
    },
    ButtonGroup {
        options: Vec<&'static str>,
    },
    EntryList {
        catalog: CatalogKind,
        show_eye: bool,
        show_detail: bool,
    },
    MedicationList {
        catalog: CatalogKind,
    },
}

/// Static description of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub widget: WidgetKind,
}

impl FieldSpec {
    fn new(id: FieldId, label: &'static str, widget: WidgetKind) -> Self {
        Self {
            id,
            label,
            placeholder: None,
            required: false,
            widget,
        }
    }

    fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

fn chips(catalog: CatalogKind) -> WidgetKind {
    WidgetKind::MultiSelect {
        catalog,
        allow_custom: true,
    }
}

fn procedures(catalog: CatalogKind) -> WidgetKind {
    WidgetKind::EntryList {
        catalog,
        show_eye: true,
        show_detail: true,
    }
}

/// Widget and labelling for a field.
pub fn field_spec(id: FieldId) -> FieldSpec {
    use FieldId::*;

    match id {
        FirstName => FieldSpec::new(id, "First Name", WidgetKind::TextInput)
            .placeholder("Enter your first name")
            .required(),
        LastName => FieldSpec::new(id, "Last Name", WidgetKind::TextInput)
            .placeholder("Enter your last name")
            .required(),
        DateOfBirth => FieldSpec::new(id, "Date of Birth", WidgetKind::CompoundDate).required(),
        Email => FieldSpec::new(id, "Email Address", WidgetKind::Email)
            .placeholder("your.email@example.com"),
        Phone => FieldSpec::new(id, "Phone Number", WidgetKind::Phone)
            .placeholder("(XXX) XXX-XXXX")
            .required(),
        Optometrist => FieldSpec::new(
            id,
            "Current Optometrist",
            WidgetKind::Autocomplete {
                catalog: CatalogKind::Optometrists,
            },
        )
        .placeholder("Enter optometrist name"),
        FamilyDoctor => FieldSpec::new(
            id,
            "Family Doctor",
            WidgetKind::Autocomplete {
                catalog: CatalogKind::FamilyDoctors,
            },
        )
        .placeholder("Enter family doctor name"),
        Specialists => FieldSpec::new(
            id,
            "Other Specialists",
            WidgetKind::EntryList {
                catalog: CatalogKind::Specialists,
                show_eye: false,
                show_detail: true,
            },
        )
        .placeholder("Specialist type"),
        EyeDiseases => FieldSpec::new(id, "Eye Diseases", chips(CatalogKind::EyeDiseases)),
        ContactLensHistory => FieldSpec::new(
            id,
            "Contact Lens History",
            WidgetKind::ButtonGroup {
                options: LensHistory::ALL.iter().map(|c| c.label()).collect(),
            },
        ),
        EyeSurgeries => FieldSpec::new(id, "Past Eye Surgeries", procedures(CatalogKind::EyeSurgeries))
            .placeholder("Type to search eye surgeries..."),
        EyeLasers => FieldSpec::new(id, "Eye Lasers", procedures(CatalogKind::EyeLasers))
            .placeholder("Type to search eye lasers..."),
        EyeInjuries => FieldSpec::new(id, "Eye Injuries", chips(CatalogKind::EyeInjuries)),
        EyeDrops => FieldSpec::new(id, "Eye Drops", chips(CatalogKind::EyeDrops)),
        EyeMedications => FieldSpec::new(
            id,
            "Eye Medications",
            WidgetKind::MedicationList {
                catalog: CatalogKind::EyeMedications,
            },
        )
        .placeholder("Medication name"),
        MedicalConditions => {
            FieldSpec::new(id, "Medical Conditions", chips(CatalogKind::MedicalConditions))
        }
        RegularMedications => {
            FieldSpec::new(id, "Medications", chips(CatalogKind::RegularMedications))
        }
        DrugAllergies => FieldSpec::new(id, "Drug Allergies", chips(CatalogKind::DrugAllergies))
            .placeholder("Enter specific allergy"),
    }
}
