//! Eye Intake Core Library
//!
//! Multi-step patient intake for an eye clinic: structured input widgets,
//! a section wizard with per-section validation, and a submission pipeline
//! that stores the registration before sending a summary to the clinic.
//!
//! # Architecture
//!
//! ```text
//!   Widgets (chips, entry lists, date, phone, buttons)
//!                       │ FieldUpdate
//!                       ▼
//!         Wizard ── reducer ──► FormRecord
//!           │ next(): validate current section
//!           │ submit(): validate everything
//!           ▼
//!   ┌───────────────────────────────┐
//!   │      SubmissionPipeline       │
//!   │  1. RecordStore::persist      │──► SQLite (patient_registrations)
//!   │  2. Notifier::notify          │──► clinic inbox
//!   └───────────────┬───────────────┘
//!                   ▼
//!      Acknowledgement / Notice, form reset
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: reference option lists and suggestion matching
//! - [`models`]: the form record and its value types
//! - [`widgets`]: stateless-value input widgets and the field table
//! - [`validation`]: per-field rules and the error report
//! - [`wizard`]: sections, navigation and submission state
//! - [`submit`]: persistence and notification collaborators
//! - [`db`]: SQLite registration store
//! - [`config`]: clinic configuration file

pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod submit;
pub mod validation;
pub mod widgets;
pub mod wizard;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogKind};
pub use config::{ConfigError, IntakeConfig, NotificationConfig};
pub use db::{Database, DbError};
pub use models::{
    AddOutcome, Choice, ContactLensHistory, Dosage, EntryList, Eye, EyeMedication, FieldId,
    FixedChoice, FormRecord, PartialDate, PersistedRegistration, PhoneNumber, ProcedureEntry,
    RegistrationRow, Selections, SpecialistEntry, StoredRegistration,
};
pub use submit::{
    NotificationRequest, NotificationStatus, Notifier, NotifyError, PersistError, RecordStore,
    SubmissionError, SubmissionPipeline, SubmissionReceipt,
};
pub use validation::{FieldError, ValidationReport, Validator};
pub use wizard::{FieldUpdate, Navigation, Notice, NoticeLevel, Wizard, WizardSettings};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};
use std::time::Instant;

use tracing::{info, warn};

use widgets::{
    field_spec, ButtonGroup, DateSelector, EntryListWidget, EntryOptions, MedicationListWidget,
    MultiSelect, PhoneInput, WidgetKind,
};
use wizard::{procedures_of, selections_of};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber once per process.
///
/// `RUST_LOG` overrides the default `eye_intake_core=info` directive.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "eye_intake_core=info".parse() {
            filter = filter.add_directive(directive);
        }

        // A host may already have installed its own subscriber.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum IntakeError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Submission error: {0}")]
    SubmissionError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for IntakeError {
    fn from(e: db::DbError) -> Self {
        IntakeError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(e: serde_json::Error) -> Self {
        IntakeError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for IntakeError {
    fn from(e: config::ConfigError) -> Self {
        IntakeError::ConfigError(e.to_string())
    }
}

impl From<SubmissionError> for IntakeError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::Invalid(report) => {
                let fields: Vec<&str> = report.fields().into_iter().map(FieldId::key).collect();
                IntakeError::ValidationError(fields.join(", "))
            }
            other => IntakeError::SubmissionError(other.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for IntakeError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        IntakeError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

fn parse_field(key: &str) -> Result<FieldId, IntakeError> {
    FieldId::from_key(key).ok_or_else(|| IntakeError::InvalidInput(format!("unknown field {key}")))
}

fn parse_fixed<T: FixedChoice>(label: Option<String>, what: &str) -> Result<Option<T>, IntakeError> {
    match label {
        None => Ok(None),
        Some(label) => T::from_label(&label)
            .map(Some)
            .ok_or_else(|| IntakeError::InvalidInput(format!("unknown {what} {label:?}"))),
    }
}

// =========================================================================
// Host Notification Callback
// =========================================================================

/// Delivery channel implemented by the host app (mail client, backend call).
#[uniffi::export(callback_interface)]
pub trait HostNotifier: Send + Sync {
    /// Send the summary for `registration_id`. Returns an error message on
    /// failure, `None` on success.
    fn deliver(&self, registration_id: String, email_to: String, record_json: String)
        -> Option<String>;
}

struct HostNotifierAdapter(Box<dyn HostNotifier>);

impl Notifier for HostNotifierAdapter {
    fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let record_json = request
            .record
            .to_canonical_json()
            .map_err(|e| NotifyError::Rendering(e.to_string()))?;
        match self.0.deliver(
            request.registration_id.clone(),
            request.email_to.clone(),
            record_json,
        ) {
            None => Ok(()),
            Some(message) => Err(NotifyError::Delivery(message)),
        }
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Start an intake session configured from a JSON config file.
///
/// A missing file means defaults. Without `config_path` the file named by
/// `EYE_INTAKE_CONFIG` is used. The registration database is opened at the
/// configured path.
#[uniffi::export]
pub fn open_session(
    config_path: Option<String>,
    notifier: Box<dyn HostNotifier>,
) -> Result<Arc<IntakeSession>, IntakeError> {
    init_tracing();
    let config = match config_path {
        Some(path) => IntakeConfig::load(&PathBuf::from(path))?,
        None => IntakeConfig::from_env()
            .map_err(|e| IntakeError::ConfigError(format!("{:#}", e)))?,
    };
    let db = Database::open(&config.database_path)?;
    info!(clinic = %config.clinic_name, "intake session opened");
    Ok(Arc::new(IntakeSession::new(db, config, notifier)))
}

/// Start an intake session with default settings and an in-memory store (for testing).
#[uniffi::export]
pub fn open_session_in_memory(
    notifier: Box<dyn HostNotifier>,
) -> Result<Arc<IntakeSession>, IntakeError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(IntakeSession::new(
        db,
        IntakeConfig::default(),
        notifier,
    )))
}

// =========================================================================
// Main API Object
// =========================================================================

/// One patient's intake session, shared with the host UI.
#[derive(uniffi::Object)]
pub struct IntakeSession {
    wizard: Mutex<Wizard>,
    db: Arc<Mutex<Database>>,
    notifier: HostNotifierAdapter,
    config: IntakeConfig,
}

impl IntakeSession {
    fn new(db: Database, config: IntakeConfig, notifier: Box<dyn HostNotifier>) -> Self {
        Self {
            wizard: Mutex::new(Wizard::with_settings(config.wizard_settings())),
            db: Arc::new(Mutex::new(db)),
            notifier: HostNotifierAdapter(notifier),
            config,
        }
    }

    fn multi_select(&self, field: FieldId) -> Result<MultiSelect, IntakeError> {
        match field_spec(field).widget {
            WidgetKind::MultiSelect {
                catalog,
                allow_custom,
            } => Ok(MultiSelect::new(catalog.catalog())
                .allow_custom(allow_custom)
                .with_limit(self.config.chip_suggestion_limit)
                .with_grace(self.config.blur_grace())),
            _ => Err(IntakeError::InvalidInput(format!(
                "{field} is not a multi-select field"
            ))),
        }
    }

    /// Apply `edit` to a chip field. Returns whether the value changed.
    fn update_selections(
        &self,
        field: FieldId,
        edit: impl FnOnce(&mut MultiSelect, &Selections) -> Selections,
    ) -> Result<bool, IntakeError> {
        let mut widget = self.multi_select(field)?;
        let mut wizard = self.wizard.lock()?;
        let current = selections_of(wizard.record(), field)
            .cloned()
            .unwrap_or_default();
        let next = edit(&mut widget, &current);
        if next == current {
            return Ok(false);
        }
        match FieldUpdate::selections(field, next) {
            Some(update) => {
                wizard.update(update);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[uniffi::export]
impl IntakeSession {
    // =========================================================================
    // Sections & Navigation
    // =========================================================================

    /// All sections in order.
    pub fn sections(&self) -> Result<Vec<FfiSection>, IntakeError> {
        let wizard = self.wizard.lock()?;
        Ok(wizard.sections().iter().map(FfiSection::from).collect())
    }

    pub fn current_section(&self) -> Result<u32, IntakeError> {
        Ok(self.wizard.lock()?.current_index() as u32)
    }

    pub fn section_count(&self) -> Result<u32, IntakeError> {
        Ok(self.wizard.lock()?.section_count() as u32)
    }

    pub fn can_go_back(&self) -> Result<bool, IntakeError> {
        Ok(self.wizard.lock()?.can_go_back())
    }

    /// True when the primary button reads "Submit".
    pub fn is_last_section(&self) -> Result<bool, IntakeError> {
        Ok(self.wizard.lock()?.is_last_section())
    }

    pub fn progress(&self) -> Result<Vec<bool>, IntakeError> {
        Ok(self.wizard.lock()?.progress())
    }

    /// Validate the current section and advance. Returns false when blocked
    /// or already on the last section.
    pub fn next(&self) -> Result<bool, IntakeError> {
        let mut wizard = self.wizard.lock()?;
        Ok(matches!(wizard.next(), Navigation::Advanced(_)))
    }

    pub fn previous(&self) -> Result<bool, IntakeError> {
        Ok(self.wizard.lock()?.previous())
    }

    // =========================================================================
    // Field Operations
    // =========================================================================

    pub fn field_spec(&self, field: String) -> Result<FfiFieldSpec, IntakeError> {
        let spec = field_spec(parse_field(&field)?);
        Ok(FfiFieldSpec {
            key: spec.id.key().to_string(),
            label: spec.label.to_string(),
            placeholder: spec.placeholder.map(str::to_string),
            required: spec.required,
            widget_json: serde_json::to_string(&spec.widget)?,
        })
    }

    /// Set a plain text field (names, e-mail, optometrist, family doctor).
    pub fn set_text(&self, field: String, value: String) -> Result<(), IntakeError> {
        let field = parse_field(&field)?;
        let update = FieldUpdate::text(field, value)
            .ok_or_else(|| IntakeError::InvalidInput(format!("{field} is not a text field")))?;
        self.wizard.lock()?.update(update);
        Ok(())
    }

    /// Store the digits of `raw` and return the display text.
    pub fn set_phone(&self, raw: String) -> Result<String, IntakeError> {
        let input = PhoneInput::new(self.config.phone_style);
        let phone = input.input(&raw);
        let display = input.display(&phone);
        self.wizard.lock()?.update(FieldUpdate::Phone(phone));
        Ok(display)
    }

    /// Set any of the three date parts. `None` leaves that part unchanged.
    pub fn set_date_of_birth(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<(), IntakeError> {
        let selector = DateSelector::for_today();
        let mut wizard = self.wizard.lock()?;
        let mut date = wizard.record().date_of_birth;
        if let Some(year) = year {
            date = selector.set_year(&date, year);
        }
        if let Some(month) = month {
            date = selector.set_month(&date, month);
        }
        if let Some(day) = day {
            date = selector.set_day(&date, day);
        }
        wizard.update(FieldUpdate::DateOfBirth(date));
        Ok(())
    }

    /// Days offered for the currently selected year and month.
    pub fn day_options(&self) -> Result<Vec<u32>, IntakeError> {
        let wizard = self.wizard.lock()?;
        Ok(DateSelector::for_today().day_options(&wizard.record().date_of_birth))
    }

    pub fn year_options(&self) -> Vec<i32> {
        DateSelector::for_today().year_options()
    }

    /// Set or clear contact lens history ("Yes", "No", "Sometimes").
    pub fn set_contact_lens(&self, value: Option<String>) -> Result<(), IntakeError> {
        let value = parse_fixed::<ContactLensHistory>(value, "contact lens answer")?
            .and_then(|answer| ButtonGroup::new().click(answer));
        self.wizard
            .lock()?
            .update(FieldUpdate::ContactLensHistory(value));
        Ok(())
    }

    /// Add typed text or a picked suggestion to a chip field.
    pub fn add_choice(&self, field: String, value: String) -> Result<FfiAddOutcome, IntakeError> {
        let field = parse_field(&field)?;
        let mut outcome = AddOutcome::Empty;
        self.update_selections(field, |widget, current| {
            widget.input(value);
            let (next, added) = widget.commit_input(current);
            outcome = added;
            next
        })?;
        Ok(outcome.into())
    }

    /// Remove one value. Returns false when it was not selected.
    pub fn remove_choice(&self, field: String, value: String) -> Result<bool, IntakeError> {
        let field = parse_field(&field)?;
        let choice = Choice::parse(&value);
        self.update_selections(field, |widget, current| widget.remove(current, &choice))
    }

    /// Remove every value. Returns false when the field was already empty.
    pub fn clear_choices(&self, field: String) -> Result<bool, IntakeError> {
        let field = parse_field(&field)?;
        self.update_selections(field, |widget, current| widget.clear(current))
    }

    /// Add a surgery or laser entry.
    pub fn add_procedure(
        &self,
        field: String,
        name: String,
        eye: Option<String>,
        doctor: Option<String>,
    ) -> Result<FfiAddOutcome, IntakeError> {
        let field = parse_field(&field)?;
        let catalog = match field_spec(field).widget {
            WidgetKind::EntryList { catalog, .. } if field != FieldId::Specialists => catalog,
            _ => {
                return Err(IntakeError::InvalidInput(format!(
                    "{field} is not a procedure field"
                )))
            }
        };
        let eye = parse_fixed::<Eye>(eye, "eye")?;

        let mut widget = EntryListWidget::<ProcedureEntry>::new(
            catalog.catalog(),
            EntryOptions::PROCEDURE,
        );
        widget.set_name(name);
        widget.set_eye(eye);
        widget.set_detail(doctor.unwrap_or_default());

        let mut wizard = self.wizard.lock()?;
        let current = procedures_of(wizard.record(), field)
            .cloned()
            .unwrap_or_default();
        let (next, outcome) = widget.add(&current);
        if outcome.changed() {
            if let Some(update) = FieldUpdate::procedures(field, next) {
                wizard.update(update);
            }
        }
        Ok(outcome.into())
    }

    pub fn add_specialist(
        &self,
        specialist_type: String,
        doctor_name: Option<String>,
    ) -> Result<FfiAddOutcome, IntakeError> {
        let mut widget = EntryListWidget::<SpecialistEntry>::new(
            CatalogKind::Specialists.catalog(),
            EntryOptions::SPECIALIST,
        );
        widget.set_name(specialist_type);
        widget.set_detail(doctor_name.unwrap_or_default());

        let mut wizard = self.wizard.lock()?;
        let (next, outcome) = widget.add(&wizard.record().specialists);
        if outcome.changed() {
            wizard.update(FieldUpdate::Specialists(next));
        }
        Ok(outcome.into())
    }

    /// Add an eye medication. Names outside the catalog are recorded as
    /// custom ("Other") entries.
    pub fn add_eye_medication(
        &self,
        name: String,
        dosage: Option<String>,
        eye: Option<String>,
    ) -> Result<FfiAddOutcome, IntakeError> {
        let catalog = CatalogKind::EyeMedications.catalog();
        let mut widget = MedicationListWidget::new(catalog);
        match Choice::parse(name.trim()) {
            Choice::Other => {
                return Err(IntakeError::InvalidInput(
                    "enter the medication name instead of Other".into(),
                ))
            }
            Choice::Value(_) if catalog.resolve(&name).is_none() => {
                widget.set_name(Choice::Other.label());
                widget.set_name(name);
            }
            _ => widget.set_name(name),
        }
        widget.set_dosage(parse_fixed::<Dosage>(dosage, "dosage")?);
        widget.set_eye(parse_fixed::<Eye>(eye, "eye")?);

        let mut wizard = self.wizard.lock()?;
        let (next, outcome) = widget.add(&wizard.record().eye_medications);
        if outcome.changed() {
            wizard.update(FieldUpdate::EyeMedications(next));
        }
        Ok(outcome.into())
    }

    /// Remove the entry at `index` from a specialist, procedure or
    /// medication list. Returns false when the index is out of range.
    pub fn remove_entry(&self, field: String, index: u32) -> Result<bool, IntakeError> {
        let field = parse_field(&field)?;
        let index = index as usize;
        let mut wizard = self.wizard.lock()?;
        let record = wizard.record();

        let update = match field {
            FieldId::Specialists => {
                let mut list = record.specialists.clone();
                list.remove(index).map(|_| FieldUpdate::Specialists(list))
            }
            FieldId::EyeMedications => {
                let mut list = record.eye_medications.clone();
                list.remove(index).map(|_| FieldUpdate::EyeMedications(list))
            }
            _ => {
                let mut list = procedures_of(record, field).cloned().ok_or_else(|| {
                    IntakeError::InvalidInput(format!("{field} is not an entry list"))
                })?;
                list.remove(index)
                    .and_then(|_| FieldUpdate::procedures(field, list))
            }
        };

        Ok(match update {
            Some(update) => {
                wizard.update(update);
                true
            }
            None => false,
        })
    }

    /// Suggestions for `query` in the given field's catalog.
    pub fn suggestions(&self, field: String, query: String) -> Result<Vec<String>, IntakeError> {
        let field = parse_field(&field)?;
        let wizard = self.wizard.lock()?;
        let choices = match field_spec(field).widget {
            WidgetKind::MultiSelect { .. } => {
                let current = selections_of(wizard.record(), field)
                    .cloned()
                    .unwrap_or_default();
                let mut widget = self.multi_select(field)?;
                widget.input(query);
                widget.suggestions(&current)
            }
            WidgetKind::Autocomplete { catalog }
            | WidgetKind::EntryList { catalog, .. }
            | WidgetKind::MedicationList { catalog } => {
                let mut widget = widgets::Autocomplete::new(catalog.catalog())
                    .with_limit(self.config.suggestion_limit);
                widget.input(query);
                widget.suggestions()
            }
            _ => Vec::new(),
        };
        Ok(choices.into_iter().map(String::from).collect())
    }

    // =========================================================================
    // Validation & State
    // =========================================================================

    pub fn errors(&self) -> Result<Vec<FfiFieldError>, IntakeError> {
        let wizard = self.wizard.lock()?;
        Ok(wizard
            .errors()
            .iter()
            .map(|(field, error)| FfiFieldError {
                field: field.key().to_string(),
                message: error.to_string(),
            })
            .collect())
    }

    /// The record as JSON, keys in camelCase.
    pub fn record_json(&self) -> Result<String, IntakeError> {
        Ok(self.wizard.lock()?.record().to_canonical_json()?)
    }

    pub fn take_notice(&self) -> Result<Option<FfiNotice>, IntakeError> {
        Ok(self.wizard.lock()?.take_notice().map(FfiNotice::from))
    }

    pub fn acknowledgement_visible(&self) -> Result<bool, IntakeError> {
        let mut wizard = self.wizard.lock()?;
        let now = Instant::now();
        wizard.tick(now);
        Ok(wizard.acknowledgement_visible(now))
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validate, store and notify.
    ///
    /// The wizard lock is released while the store and the host notifier
    /// run, so the UI can keep reading state.
    pub fn submit(&self) -> Result<FfiReceipt, IntakeError> {
        let snapshot = self.wizard.lock()?.begin_submission()?;

        // Any failure here still has to reach finish_submission, or the
        // wizard stays pending.
        let result = match self.db.lock() {
            Ok(db) => SubmissionPipeline::new(
                &*db,
                &self.notifier,
                self.config.notification.recipient.clone(),
            )
            .run(&snapshot),
            Err(e) => Err(PersistError::Storage(format!("Lock poisoned: {}", e))),
        };

        let receipt = self
            .wizard
            .lock()?
            .finish_submission(result, Instant::now())?;
        if !receipt.notification_sent() {
            warn!(id = %receipt.registration.id, "stored without confirmation");
        }
        Ok(receipt.into())
    }

    // =========================================================================
    // Stored Registrations
    // =========================================================================

    pub fn list_registrations(&self, limit: u32) -> Result<Vec<FfiRegistration>, IntakeError> {
        let db = self.db.lock()?;
        let rows = db.list_registrations(limit as usize)?;
        Ok(rows.into_iter().map(FfiRegistration::from).collect())
    }

    pub fn count_registrations(&self) -> Result<u64, IntakeError> {
        let db = self.db.lock()?;
        Ok(db.count_registrations()? as u64)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSection {
    pub title: String,
    pub fields: Vec<String>,
}

impl From<&wizard::Section> for FfiSection {
    fn from(section: &wizard::Section) -> Self {
        Self {
            title: section.title.to_string(),
            fields: section.fields.iter().map(|f| f.key().to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldSpec {
    pub key: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    /// Tagged JSON describing the widget and its configuration
    pub widget_json: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiAddOutcome {
    Added,
    ReplacedWithNotApplicable,
    Duplicate,
    Locked,
    Empty,
    NotInCatalog,
    Incomplete,
}

impl From<AddOutcome> for FfiAddOutcome {
    fn from(outcome: AddOutcome) -> Self {
        match outcome {
            AddOutcome::Added => FfiAddOutcome::Added,
            AddOutcome::ReplacedWithNotApplicable => FfiAddOutcome::ReplacedWithNotApplicable,
            AddOutcome::Duplicate => FfiAddOutcome::Duplicate,
            AddOutcome::Locked => FfiAddOutcome::Locked,
            AddOutcome::Empty => FfiAddOutcome::Empty,
            AddOutcome::NotInCatalog => FfiAddOutcome::NotInCatalog,
            AddOutcome::Incomplete => FfiAddOutcome::Incomplete,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotice {
    /// "info", "success", "warning" or "error"
    pub level: String,
    pub title: String,
    pub description: Option<String>,
}

impl From<Notice> for FfiNotice {
    fn from(notice: Notice) -> Self {
        let level = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        Self {
            level: level.to_string(),
            title: notice.title,
            description: notice.description,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReceipt {
    pub registration_id: String,
    pub created_at: String,
    pub notification_sent: bool,
    pub notification_error: Option<String>,
}

impl From<SubmissionReceipt> for FfiReceipt {
    fn from(receipt: SubmissionReceipt) -> Self {
        let notification_error = match &receipt.notification {
            NotificationStatus::Sent => None,
            NotificationStatus::Failed(e) => Some(e.to_string()),
        };
        Self {
            notification_sent: notification_error.is_none(),
            notification_error,
            registration_id: receipt.registration.id,
            created_at: receipt.registration.created_at,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegistration {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub created_at: String,
}

impl From<StoredRegistration> for FfiRegistration {
    fn from(stored: StoredRegistration) -> Self {
        Self {
            full_name: format!("{} {}", stored.row.first_name, stored.row.last_name),
            phone: stored.row.phone,
            id: stored.meta.id,
            created_at: stored.meta.created_at,
        }
    }
}
