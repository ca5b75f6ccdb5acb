//! Submission pipeline: persist the record, then notify.
//!
//! Persistence failure aborts the attempt. Notification failure is reported
//! but does not undo the stored registration.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span, warn};

use crate::models::{FormRecord, PersistedRegistration, RegistrationRow};
use crate::validation::ValidationReport;

/// Why the store refused a registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Store unreachable: {0}")]
    Connectivity(String),

    #[error("Store timed out: {0}")]
    Timeout(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Why the notification could not be sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Could not render summary: {0}")]
    Rendering(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Notification timed out: {0}")]
    Timeout(String),

    #[error("Recipient rejected: {0}")]
    Rejected(String),
}

/// Why a submission did not reach the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Please fill in all required fields")]
    Invalid(ValidationReport),

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Submission is only available on the last section")]
    NotOnFinalSection,

    #[error("No submission is in progress")]
    NotSubmitting,

    #[error(transparent)]
    Persistence(#[from] PersistError),
}

pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Stores one registration.
pub trait RecordStore {
    fn persist(&self, row: &RegistrationRow) -> Result<PersistedRegistration, PersistError>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn persist(&self, row: &RegistrationRow) -> Result<PersistedRegistration, PersistError> {
        (**self).persist(row)
    }
}

/// Sends the post-registration notification.
pub trait Notifier {
    fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError>;
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        (**self).notify(request)
    }
}

/// Input to the notifier.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NotificationRequest {
    /// Id the store assigned to the registration
    pub registration_id: String,
    /// Clinic inbox that receives the summary
    pub email_to: String,
    /// The submitted record
    pub record: FormRecord,
}

/// Outcome of the notification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    Sent,
    Failed(NotifyError),
}

/// A registration that reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub registration: PersistedRegistration,
    pub notification: NotificationStatus,
}

impl SubmissionReceipt {
    pub fn notification_sent(&self) -> bool {
        self.notification == NotificationStatus::Sent
    }
}

/// Store and notifier wired together.
#[derive(Debug, Clone)]
pub struct SubmissionPipeline<S, N> {
    store: S,
    notifier: N,
    email_to: String,
}

impl<S: RecordStore, N: Notifier> SubmissionPipeline<S, N> {
    pub fn new(store: S, notifier: N, email_to: impl Into<String>) -> Self {
        Self {
            store,
            notifier,
            email_to: email_to.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn email_to(&self) -> &str {
        &self.email_to
    }

    /// Persist `record`, then notify. Notify runs only after a successful
    /// persist.
    pub fn run(&self, record: &FormRecord) -> Result<SubmissionReceipt, PersistError> {
        let span = info_span!("submission", patient = %record.full_name());
        let _enter = span.enter();

        let row = RegistrationRow::from(record);
        let registration = self.store.persist(&row).map_err(|e| {
            warn!(error = %e, "registration not stored");
            e
        })?;
        info!(id = %registration.id, "registration stored");

        let request = NotificationRequest {
            registration_id: registration.id.clone(),
            email_to: self.email_to.clone(),
            record: record.clone(),
        };
        let notification = match self.notifier.notify(&request) {
            Ok(()) => {
                info!(to = %self.email_to, "confirmation sent");
                NotificationStatus::Sent
            }
            Err(e) => {
                warn!(error = %e, "confirmation not sent");
                NotificationStatus::Failed(e)
            }
        };

        Ok(SubmissionReceipt {
            registration,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeStore {
        result: Result<(), PersistError>,
        rows: RefCell<Vec<RegistrationRow>>,
    }

    impl RecordStore for FakeStore {
        fn persist(&self, row: &RegistrationRow) -> Result<PersistedRegistration, PersistError> {
            self.result.clone()?;
            self.rows.borrow_mut().push(row.clone());
            Ok(PersistedRegistration {
                id: format!("reg-{}", self.rows.borrow().len()),
                created_at: "2026-10-19T09:00:00+00:00".into(),
                updated_at: "2026-10-19T09:00:00+00:00".into(),
            })
        }
    }

    struct FakeNotifier {
        result: Result<(), NotifyError>,
        calls: RefCell<Vec<NotificationRequest>>,
    }

    impl Notifier for FakeNotifier {
        fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
            self.calls.borrow_mut().push(request.clone());
            self.result.clone()
        }
    }

    fn store(result: Result<(), PersistError>) -> FakeStore {
        FakeStore {
            result,
            rows: RefCell::new(Vec::new()),
        }
    }

    fn notifier(result: Result<(), NotifyError>) -> FakeNotifier {
        FakeNotifier {
            result,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn record() -> FormRecord {
        FormRecord {
            first_name: "Alan".into(),
            last_name: "Turing".into(),
            ..FormRecord::default()
        }
    }

    #[test]
    fn test_persist_then_notify() {
        let s = store(Ok(()));
        let n = notifier(Ok(()));
        let pipeline = SubmissionPipeline::new(&s, &n, "intake@clinic.example");

        let receipt = pipeline.run(&record()).unwrap();
        assert!(receipt.notification_sent());
        assert_eq!(s.rows.borrow().len(), 1);

        let calls = n.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].registration_id, receipt.registration.id);
        assert_eq!(calls[0].email_to, "intake@clinic.example");
    }

    #[test]
    fn test_persist_failure_skips_notify() {
        let s = store(Err(PersistError::Connectivity("offline".into())));
        let n = notifier(Ok(()));
        let pipeline = SubmissionPipeline::new(&s, &n, "intake@clinic.example");

        let err = pipeline.run(&record()).unwrap_err();
        assert_eq!(err, PersistError::Connectivity("offline".into()));
        assert!(n.calls.borrow().is_empty());
    }

    #[test]
    fn test_notify_failure_is_soft() {
        let s = store(Ok(()));
        let n = notifier(Err(NotifyError::Timeout("smtp".into())));
        let pipeline = SubmissionPipeline::new(&s, &n, "intake@clinic.example");

        let receipt = pipeline.run(&record()).unwrap();
        assert_eq!(
            receipt.notification,
            NotificationStatus::Failed(NotifyError::Timeout("smtp".into()))
        );
        assert_eq!(s.rows.borrow().len(), 1);
    }
}
