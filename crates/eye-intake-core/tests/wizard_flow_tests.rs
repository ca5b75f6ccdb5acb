//! End-to-end intake flows: navigation, submission and storage.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use eye_intake_core::db::Database;
use eye_intake_core::models::{
    Choice, ContactLensHistory, Dosage, EntryList, Eye, EyeMedication, FieldId, PartialDate,
    PersistedRegistration, PhoneNumber, ProcedureEntry, RegistrationRow, Selections,
    SpecialistEntry,
};
use eye_intake_core::submit::{
    NotificationRequest, NotificationStatus, Notifier, NotifyError, PersistError, RecordStore,
    SubmissionError, SubmissionPipeline,
};
use eye_intake_core::validation::Validator;
use eye_intake_core::wizard::{FieldUpdate, Navigation, NoticeLevel, Wizard};

#[derive(Default)]
struct RecordingNotifier {
    requests: RefCell<Vec<NotificationRequest>>,
    fail: bool,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail {
            Err(NotifyError::Delivery("smtp refused".to_string()))
        } else {
            Ok(())
        }
    }
}

struct OfflineStore;

impl RecordStore for OfflineStore {
    fn persist(&self, _row: &RegistrationRow) -> Result<PersistedRegistration, PersistError> {
        Err(PersistError::Connectivity("network unreachable".to_string()))
    }
}

fn wizard() -> Wizard {
    Wizard::new().with_validator(Validator::with_today(
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    ))
}

fn fill_personal(w: &mut Wizard) {
    w.update(FieldUpdate::FirstName("Marie".to_string()));
    w.update(FieldUpdate::LastName("Curie".to_string()));
    w.update(FieldUpdate::DateOfBirth(PartialDate::new(1967, 11, 7)));
    w.update(FieldUpdate::Email("marie@example.org".to_string()));
    w.update(FieldUpdate::Phone(PhoneNumber::normalize("(613) 555-0142")));
}

fn fill_history(w: &mut Wizard) {
    let mut surgery = ProcedureEntry::new("LASIK");
    surgery.eye = Some(Eye::Both);
    let mut specialist = SpecialistEntry::new("Rheumatologist");
    specialist.doctor_name = Some("Dr. Ortiz".to_string());

    w.update(FieldUpdate::Optometrist("Dr. Lisa Wong".to_string()));
    w.update(FieldUpdate::Specialists(EntryList::from_entries([specialist])));
    w.update(FieldUpdate::EyeDiseases(Selections::from_labels([
        "Glaucoma",
    ])));
    w.update(FieldUpdate::ContactLensHistory(Some(ContactLensHistory::No)));
    w.update(FieldUpdate::EyeSurgeries(EntryList::from_entries([surgery])));
    w.update(FieldUpdate::EyeLasers(EntryList::from_entries([
        ProcedureEntry::new(Choice::NotApplicable),
    ])));
    w.update(FieldUpdate::EyeMedications(EntryList::from_entries([
        EyeMedication::new("Timolol (Timoptic)", Dosage::TwiceDaily, Eye::Right),
    ])));
    w.update(FieldUpdate::DrugAllergies(Selections::from_labels([
        "None / Not Applicable",
    ])));
}

fn walk_to_end(w: &mut Wizard) {
    while let Navigation::Advanced(_) = w.next() {}
    assert!(w.is_last_section());
}

#[test]
fn test_next_advances_exactly_one_section() {
    let mut w = wizard();
    assert_eq!(w.next(), Navigation::Blocked);
    assert_eq!(w.current_index(), 0);

    fill_personal(&mut w);
    assert_eq!(w.next(), Navigation::Advanced(1));
    assert_eq!(w.current_section().title, "Healthcare Providers");
}

#[test]
fn test_invalid_phone_blocks_personal_section() {
    let mut w = wizard();
    fill_personal(&mut w);
    w.update(FieldUpdate::Phone(PhoneNumber::normalize("555-0142")));

    assert_eq!(w.next(), Navigation::Blocked);
    assert_eq!(
        w.error_for(FieldId::Phone).as_deref(),
        Some("Please enter a 10-digit phone number")
    );
}

#[test]
fn test_going_back_keeps_entered_values() {
    let mut w = wizard();
    fill_personal(&mut w);
    w.next();
    w.update(FieldUpdate::FamilyDoctor("Dr. Kevin Liu".to_string()));
    assert!(w.previous());
    assert_eq!(w.record().first_name, "Marie");
    assert_eq!(w.record().family_doctor, "Dr. Kevin Liu");
}

#[test]
fn test_full_submission_is_stored() {
    let db = Database::open_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let pipeline = SubmissionPipeline::new(&db, &notifier, "intake@clinic.example");

    let mut w = wizard();
    fill_personal(&mut w);
    fill_history(&mut w);
    let submitted = w.record().clone();
    walk_to_end(&mut w);

    let now = Instant::now();
    let receipt = w.submit(&pipeline, now).unwrap();
    assert!(receipt.notification_sent());

    let stored = db.get_registration(&receipt.registration.id).unwrap().unwrap();
    assert_eq!(stored.to_record(), submitted);
    assert_eq!(stored.row.phone, "6135550142");

    let requests = notifier.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].registration_id, receipt.registration.id);
    assert_eq!(requests[0].email_to, "intake@clinic.example");

    // form resets behind the acknowledgement
    assert!(w.record().is_blank());
    assert_eq!(w.current_index(), 0);
    assert!(w.acknowledgement_visible(now + Duration::from_secs(3)));
}

#[test]
fn test_persist_failure_skips_notification() {
    let notifier = RecordingNotifier::default();
    let pipeline = SubmissionPipeline::new(OfflineStore, &notifier, "intake@clinic.example");

    let mut w = wizard();
    fill_personal(&mut w);
    walk_to_end(&mut w);

    let result = w.submit(&pipeline, Instant::now());
    assert!(matches!(
        result,
        Err(SubmissionError::Persistence(PersistError::Connectivity(_)))
    ));
    assert!(notifier.requests.borrow().is_empty());
    assert_eq!(w.record().last_name, "Curie");
    assert!(w.is_last_section());

    let notice = w.take_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.title, "Error submitting form");
}

#[test]
fn test_notification_failure_still_stores() {
    let db = Database::open_in_memory().unwrap();
    let notifier = RecordingNotifier {
        fail: true,
        ..Default::default()
    };
    let pipeline = SubmissionPipeline::new(&db, &notifier, "intake@clinic.example");

    let mut w = wizard();
    fill_personal(&mut w);
    walk_to_end(&mut w);

    let now = Instant::now();
    let receipt = w.submit(&pipeline, now).unwrap();
    assert!(matches!(
        receipt.notification,
        NotificationStatus::Failed(NotifyError::Delivery(_))
    ));
    assert_eq!(db.count_registrations().unwrap(), 1);
    assert!(!w.acknowledgement_visible(now));

    let notice = w.take_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.title, "Registration saved successfully!");
}

#[test]
fn test_returning_patient_with_same_answers_is_stored_again() {
    let db = Database::open_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let pipeline = SubmissionPipeline::new(&db, &notifier, "intake@clinic.example");

    let mut first_visit = wizard();
    fill_personal(&mut first_visit);
    walk_to_end(&mut first_visit);
    let first = first_visit.submit(&pipeline, Instant::now()).unwrap();

    let mut second_visit = wizard();
    fill_personal(&mut second_visit);
    walk_to_end(&mut second_visit);
    let second = second_visit.submit(&pipeline, Instant::now()).unwrap();

    assert_ne!(first.registration.id, second.registration.id);
    assert_eq!(db.count_registrations().unwrap(), 2);
    assert_eq!(notifier.requests.borrow().len(), 2);
}

#[test]
fn test_incomplete_medication_blocks_eye_history() {
    let mut w = wizard();
    fill_personal(&mut w);
    w.next();
    w.next();
    assert_eq!(w.current_section().title, "Eye History");

    let partial = EyeMedication {
        medication_name: Choice::value("Timolol (Timoptic)"),
        dosage: None,
        affected_eye: Some(Eye::Left),
    };
    w.update(FieldUpdate::EyeMedications(EntryList::from_entries([partial])));
    assert_eq!(w.next(), Navigation::Blocked);
    assert!(w.errors().contains(FieldId::EyeMedications));
}
