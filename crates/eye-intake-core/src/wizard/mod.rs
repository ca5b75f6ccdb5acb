//! Section navigation and submission state machine.
//!
//! The [`Wizard`] owns the [`FormRecord`] for one intake session. Fields
//! change only through [`Wizard::update`], which runs the pure reducer.
//! Advancing is gated on the current section validating; going back never
//! is. Submission is split in two halves so a host can run the pipeline
//! without holding the wizard:
//!
//! ```text
//! begin_submission() -> snapshot -> SubmissionPipeline::run -> finish_submission()
//! ```

mod reducer;
mod section;

pub use reducer::{apply, procedures_of, selections_of, FieldUpdate};
pub use section::{section_of, Section, SectionId, SECTIONS};

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{FieldId, FormRecord, PersistedRegistration};
use crate::submit::{
    NotificationStatus, Notifier, PersistError, RecordStore, SubmissionError, SubmissionPipeline,
    SubmissionReceipt, SubmissionResult,
};
use crate::validation::{ValidationReport, Validator};

/// How long the success acknowledgement stays up.
pub const DEFAULT_ACKNOWLEDGEMENT: Duration = Duration::from_secs(7);

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Full-screen confirmation shown after a complete submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub title: &'static str,
    pub message: &'static str,
    pub registration: PersistedRegistration,
    shown_at: Instant,
    duration: Duration,
}

impl Acknowledgement {
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }
}

/// What `next()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Moved to the section at this index
    Advanced(usize),
    /// Current section has errors; index unchanged
    Blocked,
    /// Already on the last section
    AtEnd,
}

/// Label of the main navigation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Next,
    Submit,
}

/// Tunables for the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardSettings {
    pub acknowledgement: Duration,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            acknowledgement: DEFAULT_ACKNOWLEDGEMENT,
        }
    }
}

/// The multi-step intake form.
#[derive(Debug, Clone)]
pub struct Wizard {
    sections: &'static [Section],
    index: usize,
    record: FormRecord,
    errors: ValidationReport,
    submitting: bool,
    notice: Option<Notice>,
    acknowledgement: Option<Acknowledgement>,
    validator: Validator,
    settings: WizardSettings,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::with_settings(WizardSettings::default())
    }

    pub fn with_settings(settings: WizardSettings) -> Self {
        Self {
            sections: SECTIONS,
            index: 0,
            record: FormRecord::new(),
            errors: ValidationReport::new(),
            submitting: false,
            notice: None,
            acknowledgement: None,
            validator: Validator::new(),
            settings,
        }
    }

    /// Replace the validator (pins "today" in tests).
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn sections(&self) -> &'static [Section] {
        self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_section(&self) -> &'static Section {
        &self.sections[self.index]
    }

    pub fn is_last_section(&self) -> bool {
        self.index + 1 == self.sections.len()
    }

    /// "Previous" is disabled on the first section.
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.is_last_section() {
            PrimaryAction::Submit
        } else {
            PrimaryAction::Next
        }
    }

    /// One flag per section: reached (at or before the current index).
    pub fn progress(&self) -> Vec<bool> {
        (0..self.sections.len()).map(|i| i <= self.index).collect()
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn error_for(&self, field: FieldId) -> Option<String> {
        self.errors.get(field).map(ToString::to_string)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Hand the pending notice to the UI, clearing it.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn acknowledgement(&self) -> Option<&Acknowledgement> {
        self.acknowledgement.as_ref()
    }

    pub fn acknowledgement_visible(&self, now: Instant) -> bool {
        self.acknowledgement
            .as_ref()
            .is_some_and(|a| a.is_visible(now))
    }

    /// Drop an expired acknowledgement.
    pub fn tick(&mut self, now: Instant) {
        if !self.acknowledgement_visible(now) {
            self.acknowledgement = None;
        }
    }

    /// Apply a field change and clear that field's error.
    pub fn update(&mut self, update: FieldUpdate) {
        let field = update.field();
        debug!(%field, "field updated");
        self.record = apply(&self.record, update);
        self.errors.clear_field(field);
    }

    /// Validate the fields of the current section.
    pub fn validate_current(&self) -> ValidationReport {
        self.validator
            .validate_fields(&self.record, self.current_section().fields)
    }

    /// Advance one section if the current one validates.
    pub fn next(&mut self) -> Navigation {
        let report = self.validate_current();
        if !report.is_valid() {
            warn!(
                section = self.current_section().title,
                fields = ?report.fields(),
                "section has errors"
            );
            self.errors = report;
            self.notice = Some(Notice::new(
                NoticeLevel::Error,
                "Please fill in required fields",
            ));
            return Navigation::Blocked;
        }

        self.errors = report;
        if self.is_last_section() {
            return Navigation::AtEnd;
        }
        self.index += 1;
        info!(section = self.current_section().title, "advanced");
        Navigation::Advanced(self.index)
    }

    /// Go back one section. Returns false on the first section.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        info!(section = self.current_section().title, "went back");
        true
    }

    /// Validate everything and hand out a snapshot to submit.
    ///
    /// Refuses while another submission is pending and before the last
    /// section is reached.
    pub fn begin_submission(&mut self) -> SubmissionResult<FormRecord> {
        if self.submitting {
            return Err(SubmissionError::AlreadySubmitting);
        }
        if !self.is_last_section() {
            return Err(SubmissionError::NotOnFinalSection);
        }

        let report = self.validator.validate_fields(&self.record, FieldId::ALL);
        if !report.is_valid() {
            warn!(fields = ?report.fields(), "submission blocked by validation");
            self.errors = report.clone();
            self.notice = Some(Notice::new(
                NoticeLevel::Error,
                "Please fill in all required fields",
            ));
            return Err(SubmissionError::Invalid(report));
        }

        self.errors = report;
        self.submitting = true;
        info!("submission started");
        Ok(self.record.clone())
    }

    /// Record the pipeline outcome.
    ///
    /// A stored registration resets the form to an empty first section.
    /// A storage failure keeps the record so the user can try again.
    pub fn finish_submission(
        &mut self,
        result: Result<SubmissionReceipt, PersistError>,
        now: Instant,
    ) -> SubmissionResult<SubmissionReceipt> {
        if !self.submitting {
            return Err(SubmissionError::NotSubmitting);
        }
        self.submitting = false;

        let receipt = match result {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.notice = Some(
                    Notice::new(NoticeLevel::Error, "Error submitting form").with_description(
                        "There was an error processing your registration. Please try again.",
                    ),
                );
                return Err(e.into());
            }
        };

        match &receipt.notification {
            NotificationStatus::Sent => {
                self.acknowledgement = Some(Acknowledgement {
                    title: "Registration Completed Successfully!",
                    message: "Your medical intake form has been received and a confirmation has been sent to your email.",
                    registration: receipt.registration.clone(),
                    shown_at: now,
                    duration: self.settings.acknowledgement,
                });
                self.notice = None;
            }
            NotificationStatus::Failed(_) => {
                self.notice = Some(
                    Notice::new(NoticeLevel::Warning, "Registration saved successfully!")
                        .with_description(
                            "However, there was an issue sending the confirmation email. Please contact us if you need a copy.",
                        ),
                );
            }
        }

        info!(id = %receipt.registration.id, "submission complete, form reset");
        self.record = FormRecord::new();
        self.errors = ValidationReport::new();
        self.index = 0;
        Ok(receipt)
    }

    /// Run the whole submission synchronously.
    pub fn submit<S, N>(
        &mut self,
        pipeline: &SubmissionPipeline<S, N>,
        now: Instant,
    ) -> SubmissionResult<SubmissionReceipt>
    where
        S: RecordStore,
        N: Notifier,
    {
        let snapshot = self.begin_submission()?;
        let result = pipeline.run(&snapshot);
        self.finish_submission(result, now)
    }
}
