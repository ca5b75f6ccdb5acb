//! Paired-attribute entry lists (procedures, specialists, eye medications).

use std::marker::PhantomData;
use std::time::Instant;

use super::autocomplete::Autocomplete;
use crate::catalog::Catalog;
use crate::models::{
    AddOutcome, Choice, Dosage, EntryList, Eye, EyeMedication, PairedEntry, ProcedureEntry,
    SpecialistEntry,
};

/// Entries that can be built from the generic staging form.
pub trait StagedEntry: PairedEntry {
    fn from_staging(name: Choice, eye: Option<Eye>, detail: Option<String>) -> Self;
}

impl StagedEntry for ProcedureEntry {
    fn from_staging(name: Choice, eye: Option<Eye>, detail: Option<String>) -> Self {
        Self {
            name,
            eye,
            doctor: detail,
        }
    }
}

impl StagedEntry for SpecialistEntry {
    fn from_staging(name: Choice, _eye: Option<Eye>, detail: Option<String>) -> Self {
        Self {
            specialist_type: name,
            doctor_name: detail,
        }
    }
}

/// Which qualifiers the staging form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryOptions {
    pub show_eye: bool,
    pub show_detail: bool,
}

impl EntryOptions {
    /// Surgeries and lasers: eye and doctor.
    pub const PROCEDURE: EntryOptions = EntryOptions {
        show_eye: true,
        show_detail: true,
    };

    /// Specialists: doctor name only.
    pub const SPECIALIST: EntryOptions = EntryOptions {
        show_eye: false,
        show_detail: true,
    };
}

/// Staging form plus the rules for appending to an [`EntryList`].
#[derive(Debug, Clone)]
pub struct EntryListWidget<T> {
    name: Autocomplete,
    eye: Option<Eye>,
    detail: String,
    options: EntryOptions,
    _entry: PhantomData<T>,
}

impl<T: StagedEntry> EntryListWidget<T> {
    pub fn new(catalog: Catalog, options: EntryOptions) -> Self {
        Self::with_name_input(Autocomplete::new(catalog), options)
    }

    /// Use a preconfigured autocomplete for the name field.
    pub fn with_name_input(name: Autocomplete, options: EntryOptions) -> Self {
        Self {
            name,
            eye: None,
            detail: String::new(),
            options,
            _entry: PhantomData,
        }
    }

    pub fn options(&self) -> EntryOptions {
        self.options
    }

    pub fn name_input(&self) -> &Autocomplete {
        &self.name
    }

    pub fn name_input_mut(&mut self) -> &mut Autocomplete {
        &mut self.name
    }

    pub fn set_name(&mut self, text: impl Into<String>) {
        self.name.input(text);
    }

    /// Pick a name suggestion. Returns false if the list had already closed.
    pub fn select_name(&mut self, choice: &Choice, now: Instant) -> bool {
        self.name.select(choice, now).is_some()
    }

    pub fn set_eye(&mut self, eye: Option<Eye>) {
        self.eye = eye;
    }

    pub fn set_detail(&mut self, detail: impl Into<String>) {
        self.detail = detail.into();
    }

    pub fn staged_name(&self) -> Choice {
        Choice::value(self.name.text())
    }

    /// Eye and detail inputs only appear for a real name.
    pub fn qualifiers_visible(&self) -> bool {
        let name = self.staged_name();
        !name.is_blank() && !name.is_not_applicable()
    }

    pub fn can_add(&self, current: &EntryList<T>) -> bool {
        current.accepts_additions() && !self.staged_name().is_blank()
    }

    /// Append the staging entry. The staging form is cleared when the list
    /// changed.
    pub fn add(&mut self, current: &EntryList<T>) -> (EntryList<T>, AddOutcome) {
        let name = self.staged_name();
        let eye = if self.options.show_eye { self.eye } else { None };
        let detail = Some(self.detail.trim())
            .filter(|d| self.options.show_detail && !d.is_empty())
            .map(str::to_string);

        let mut next = current.clone();
        let outcome = next.add(T::from_staging(name, eye, detail));
        if outcome.changed() {
            self.reset();
        }
        (next, outcome)
    }

    pub fn remove(&self, current: &EntryList<T>, index: usize) -> EntryList<T> {
        let mut next = current.clone();
        next.remove(index);
        next
    }

    pub fn clear(&self, _current: &EntryList<T>) -> EntryList<T> {
        EntryList::new()
    }

    fn reset(&mut self) {
        self.name.clear();
        self.eye = None;
        self.detail.clear();
    }
}

pub type EyeMedicationList = EntryList<EyeMedication>;

/// Staging form for prescribed eye medications.
///
/// Name, dosage and affected eye are all required. Picking "Other" as the
/// name switches to a free-text name input.
#[derive(Debug, Clone)]
pub struct MedicationListWidget {
    name: Autocomplete,
    custom_mode: bool,
    custom_name: String,
    dosage: Option<Dosage>,
    eye: Option<Eye>,
}

impl MedicationListWidget {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_name_input(Autocomplete::new(catalog))
    }

    pub fn with_name_input(name: Autocomplete) -> Self {
        Self {
            name,
            custom_mode: false,
            custom_name: String::new(),
            dosage: None,
            eye: None,
        }
    }

    pub fn name_input(&self) -> &Autocomplete {
        &self.name
    }

    pub fn name_input_mut(&mut self) -> &mut Autocomplete {
        &mut self.name
    }

    pub fn is_custom(&self) -> bool {
        self.custom_mode
    }

    pub fn set_name(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.custom_mode {
            self.custom_name = text;
        } else if Choice::parse(text.trim()) == Choice::Other {
            self.enter_custom_mode();
        } else {
            self.name.input(text);
        }
    }

    pub fn select_name(&mut self, choice: &Choice, now: Instant) -> bool {
        if *choice == Choice::Other {
            if !self.name.is_open(now) {
                return false;
            }
            self.enter_custom_mode();
            return true;
        }
        self.name.select(choice, now).is_some()
    }

    /// Leave custom-name entry and go back to the suggestion input.
    pub fn cancel_custom(&mut self) {
        self.custom_mode = false;
        self.custom_name.clear();
    }

    pub fn set_dosage(&mut self, dosage: Option<Dosage>) {
        self.dosage = dosage;
    }

    pub fn set_eye(&mut self, eye: Option<Eye>) {
        self.eye = eye;
    }

    /// The name that would be added. Sentinel text typed as a custom name
    /// is parsed to the sentinel.
    pub fn staged_name(&self) -> Choice {
        if self.custom_mode {
            Choice::value(self.custom_name.as_str())
        } else {
            Choice::value(self.name.text())
        }
    }

    pub fn can_add(&self, current: &EyeMedicationList) -> bool {
        let name = self.staged_name();
        current.accepts_additions()
            && (name.is_not_applicable()
                || (names_medication(&name) && self.dosage.is_some() && self.eye.is_some()))
    }

    pub fn add(&mut self, current: &EyeMedicationList) -> (EyeMedicationList, AddOutcome) {
        let name = self.staged_name();
        let entry = if name.is_not_applicable() {
            EyeMedication::not_applicable()
        } else {
            if !names_medication(&name) {
                return (current.clone(), AddOutcome::Empty);
            }
            if !current.accepts_additions() {
                return (current.clone(), AddOutcome::Locked);
            }
            match (self.dosage, self.eye) {
                (Some(dosage), Some(eye)) => EyeMedication::new(name, dosage, eye),
                _ => return (current.clone(), AddOutcome::Incomplete),
            }
        };

        let mut next = current.clone();
        let outcome = next.add(entry);
        if outcome.changed() {
            self.reset();
        }
        (next, outcome)
    }

    pub fn remove(&self, current: &EyeMedicationList, index: usize) -> EyeMedicationList {
        let mut next = current.clone();
        next.remove(index);
        next
    }

    fn enter_custom_mode(&mut self) {
        self.custom_mode = true;
        self.custom_name.clear();
        self.name.clear();
    }

    fn reset(&mut self) {
        self.name.clear();
        self.cancel_custom();
        self.dosage = None;
        self.eye = None;
    }
}

/// "Other" only opens the custom input; it is never a medication name.
fn names_medication(name: &Choice) -> bool {
    !name.is_blank() && *name != Choice::Other
}
