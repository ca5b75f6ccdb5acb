//! Eye Intake Notify
//!
//! Turns a submitted [`FormRecord`](eye_intake_core::FormRecord) into a
//! patient summary and e-mails it to the clinic.
//!
//! ```text
//! NotificationRequest → PatientSummary → HTML + text → EmailMessage → Mailer
//! ```
//!
//! [`EmailNotifier`] implements the core [`Notifier`] trait, so it plugs
//! straight into a [`SubmissionPipeline`](eye_intake_core::SubmissionPipeline).

pub mod mail;
pub mod render;
pub mod summary;

pub use mail::{
    Attachment, EmailMessage, MailError, MailResult, Mailbox, Mailer, MemoryMailer, SpoolMailer,
};
pub use render::{render_html, render_text, subject};
pub use summary::{MedicationLine, PatientSummary, SummaryItem, SummarySection, SummaryValue};

use chrono::{Local, NaiveDate};
use tracing::{info, info_span, warn};

use eye_intake_core::config::IntakeConfig;
use eye_intake_core::submit::{NotificationRequest, Notifier, NotifyError};

/// Sender identity and branding for outgoing summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierSettings {
    pub sender: Mailbox,
    pub clinic_name: String,
}

impl From<&IntakeConfig> for NotifierSettings {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            sender: Mailbox::new(config.notification.sender_address.clone())
                .with_name(config.notification.sender_name.clone()),
            clinic_name: config.clinic_name.clone(),
        }
    }
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self::from(&IntakeConfig::default())
    }
}

/// Sends the patient summary through a [`Mailer`].
#[derive(Debug)]
pub struct EmailNotifier<M> {
    mailer: M,
    settings: NotifierSettings,
    today: Option<NaiveDate>,
}

impl<M: Mailer> EmailNotifier<M> {
    pub fn new(mailer: M, settings: NotifierSettings) -> Self {
        Self {
            mailer,
            settings,
            today: None,
        }
    }

    /// Pin the "generated on" date.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    pub fn settings(&self) -> &NotifierSettings {
        &self.settings
    }

    /// Build the message for `request` without sending it.
    pub fn compose(&self, request: &NotificationRequest) -> EmailMessage {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let summary =
            PatientSummary::from_record(&request.record, &self.settings.clinic_name, today);
        let html = render_html(&summary);

        EmailMessage {
            message_id: request.registration_id.clone(),
            from: self.settings.sender.clone(),
            to: vec![Mailbox::new(request.email_to.clone())],
            subject: subject(&summary),
            text_body: render_text(&summary),
            attachments: vec![Attachment {
                filename: attachment_name(&request.record.last_name, &request.record.first_name),
                content_type: "text/html".to_string(),
                content: html.clone(),
            }],
            html_body: html,
        }
    }
}

fn attachment_name(last: &str, first: &str) -> String {
    let slug: String = format!("{}-{}", last.trim(), first.trim())
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("patient-summary-{}.html", slug.trim_matches('-'))
}

fn to_notify_error(error: MailError) -> NotifyError {
    match error {
        MailError::InvalidAddress(msg) | MailError::Rejected(msg) => NotifyError::Rejected(msg),
        MailError::Timeout(msg) => NotifyError::Timeout(msg),
        MailError::Transport(msg) => NotifyError::Delivery(msg),
    }
}

impl<M: Mailer> Notifier for EmailNotifier<M> {
    fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let span = info_span!("notify", id = %request.registration_id);
        let _enter = span.enter();

        let message = self.compose(request);
        self.mailer.send(&message).map_err(|e| {
            warn!(error = %e, "summary e-mail failed");
            to_notify_error(e)
        })?;
        info!(to = %request.email_to, "summary e-mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eye_intake_core::models::FormRecord;

    fn request(email_to: &str) -> NotificationRequest {
        let mut record = FormRecord::new();
        record.first_name = "Ada".into();
        record.last_name = "Lovelace".into();
        NotificationRequest {
            registration_id: "reg-1".into(),
            email_to: email_to.into(),
            record,
        }
    }

    #[test]
    fn test_compose() {
        let notifier = EmailNotifier::new(MemoryMailer::new(), NotifierSettings::default());
        let message = notifier.compose(&request("intake@clinic.example"));

        assert_eq!(message.message_id, "reg-1");
        assert_eq!(message.subject, "Patient Registration Summary - Ada Lovelace");
        assert_eq!(message.from.name.as_deref(), Some("Patient Registration"));
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(
            message.attachments[0].filename,
            "patient-summary-lovelace-ada.html"
        );
        assert_eq!(message.attachments[0].content, message.html_body);
        assert!(message.html_body.contains("Imaginary Eye Institute"));
    }

    #[test]
    fn test_mail_errors_map_to_notify_errors() {
        let notifier = EmailNotifier::new(MemoryMailer::new(), NotifierSettings::default());
        assert!(matches!(
            notifier.notify(&request("not an address")),
            Err(NotifyError::Rejected(_))
        ));

        notifier
            .mailer()
            .fail_with(MailError::Timeout("relay slow".into()));
        assert_eq!(
            notifier.notify(&request("intake@clinic.example")),
            Err(NotifyError::Timeout("relay slow".into()))
        );
    }

    #[test]
    fn test_attachment_name_slug() {
        assert_eq!(
            attachment_name(" O'Neil ", "Mary Ann"),
            "patient-summary-o-neil-mary-ann.html"
        );
    }
}
