//! Submission pipeline with the SQLite store and the e-mail notifier.

use std::time::Instant;

use chrono::NaiveDate;
use eye_intake_core::db::Database;
use eye_intake_core::models::{PartialDate, PhoneNumber, Selections};
use eye_intake_core::submit::{NotificationStatus, NotifyError, SubmissionPipeline};
use eye_intake_core::validation::Validator;
use eye_intake_core::wizard::{FieldUpdate, Navigation, Wizard};
use eye_intake_notify::{EmailNotifier, MailError, MemoryMailer, NotifierSettings, SpoolMailer};
use tempfile::tempdir;

fn ready_wizard() -> Wizard {
    let mut w = Wizard::new().with_validator(Validator::with_today(
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    ));
    w.update(FieldUpdate::FirstName("Rosalind".into()));
    w.update(FieldUpdate::LastName("Franklin".into()));
    w.update(FieldUpdate::DateOfBirth(PartialDate::new(1990, 7, 25)));
    w.update(FieldUpdate::Phone(PhoneNumber::normalize("604 555 0188")));
    w.update(FieldUpdate::EyeDrops(Selections::from_labels(["Refresh Tears"])));
    while let Navigation::Advanced(_) = w.next() {}
    w
}

fn notifier<M: eye_intake_notify::Mailer>(mailer: M) -> EmailNotifier<M> {
    EmailNotifier::new(mailer, NotifierSettings::default())
        .with_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
}

#[test]
fn test_summary_mailed_after_store() {
    let db = Database::open_in_memory().unwrap();
    let notifier = notifier(MemoryMailer::new());
    let pipeline = SubmissionPipeline::new(&db, &notifier, "intake@clinic.example");

    let mut w = ready_wizard();
    let receipt = w.submit(&pipeline, Instant::now()).unwrap();
    assert!(receipt.notification_sent());
    assert_eq!(db.count_registrations().unwrap(), 1);

    let sent = notifier.mailer().sent();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(message.message_id, receipt.registration.id);
    assert_eq!(message.to[0].address, "intake@clinic.example");
    assert_eq!(
        message.subject,
        "Patient Registration Summary - Rosalind Franklin"
    );
    assert!(message.html_body.contains("7/25/1990"));
    assert!(message.html_body.contains("(604) 555-0188"));
    assert!(message.text_body.contains("Refresh Tears"));
}

#[test]
fn test_mail_failure_is_a_warning() {
    let db = Database::open_in_memory().unwrap();
    let mailer = MemoryMailer::new();
    mailer.fail_with(MailError::Transport("connection reset".into()));
    let notifier = notifier(mailer);
    let pipeline = SubmissionPipeline::new(&db, &notifier, "intake@clinic.example");

    let mut w = ready_wizard();
    let receipt = w.submit(&pipeline, Instant::now()).unwrap();
    assert_eq!(
        receipt.notification,
        NotificationStatus::Failed(NotifyError::Delivery("connection reset".into()))
    );
    assert_eq!(db.count_registrations().unwrap(), 1);
    assert!(w.record().is_blank());
}

#[test]
fn test_spool_mailer_writes_message() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path().join("intake.db")).unwrap();
    let notifier = notifier(SpoolMailer::new(dir.path().join("outbox")));
    let pipeline = SubmissionPipeline::new(&db, &notifier, "intake@clinic.example");

    let mut w = ready_wizard();
    let receipt = w.submit(&pipeline, Instant::now()).unwrap();

    let spooled = notifier.mailer().spooled().unwrap();
    assert_eq!(spooled.len(), 1);
    assert_eq!(spooled[0].message_id, receipt.registration.id);
    assert_eq!(spooled[0].attachments[0].content_type, "text/html");
}
