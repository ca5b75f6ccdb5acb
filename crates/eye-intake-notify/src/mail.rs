//! Outgoing e-mail and the delivery seam.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use eye_intake_core::validation::is_valid_email;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Rejected by server: {0}")]
    Rejected(String),
}

pub type MailResult<T> = Result<T, MailError>;

/// An address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Mailbox {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Unique id, also used as the spool file name
    pub message_id: String,
    pub from: Mailbox,
    pub to: Vec<Mailbox>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl EmailMessage {
    /// Reject messages that no transport could deliver.
    pub fn check(&self) -> MailResult<()> {
        if self.to.is_empty() {
            return Err(MailError::InvalidAddress("no recipients".into()));
        }
        for mailbox in std::iter::once(&self.from).chain(&self.to) {
            if !is_valid_email(&mailbox.address) {
                return Err(MailError::InvalidAddress(mailbox.address.clone()));
            }
        }
        Ok(())
    }
}

/// Hands a message to some transport.
pub trait Mailer {
    fn send(&self, message: &EmailMessage) -> MailResult<()>;
}

impl<T: Mailer + ?Sized> Mailer for &T {
    fn send(&self, message: &EmailMessage) -> MailResult<()> {
        (**self).send(message)
    }
}

/// Keeps sent messages in memory (for development and testing).
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<EmailMessage>>,
    fail_with: Mutex<Option<MailError>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following send fail with `error`.
    pub fn fail_with(&self, error: MailError) {
        if let Ok(mut slot) = self.fail_with.lock() {
            *slot = Some(error);
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, message: &EmailMessage) -> MailResult<()> {
        message.check()?;
        let failure = self
            .fail_with
            .lock()
            .map_err(|e| MailError::Transport(format!("Lock poisoned: {}", e)))?
            .clone();
        if let Some(error) = failure {
            return Err(error);
        }
        self.outbox
            .lock()
            .map_err(|e| MailError::Transport(format!("Lock poisoned: {}", e)))?
            .push(message.clone());
        debug!(id = %message.message_id, "message kept in memory");
        Ok(())
    }
}

/// Writes each message as a JSON file into a spool directory, where an
/// outside relay picks it up.
#[derive(Debug, Clone)]
pub struct SpoolMailer {
    dir: PathBuf,
}

impl SpoolMailer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read back every spooled message.
    pub fn spooled(&self) -> MailResult<Vec<EmailMessage>> {
        let mut messages = Vec::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(messages),
            Err(e) => return Err(MailError::Transport(e.to_string())),
        };
        for entry in entries {
            let path = entry.map_err(|e| MailError::Transport(e.to_string()))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read_to_string(&path).map_err(|e| MailError::Transport(e.to_string()))?;
            let message =
                serde_json::from_str(&data).map_err(|e| MailError::Transport(e.to_string()))?;
            messages.push(message);
        }
        Ok(messages)
    }
}

impl Mailer for SpoolMailer {
    fn send(&self, message: &EmailMessage) -> MailResult<()> {
        message.check()?;
        fs::create_dir_all(&self.dir).map_err(|e| MailError::Transport(e.to_string()))?;

        let json =
            serde_json::to_string_pretty(message).map_err(|e| MailError::Transport(e.to_string()))?;
        let path = self.dir.join(format!("{}.json", message.message_id));
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| MailError::Transport(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| MailError::Transport(e.to_string()))?;

        info!(path = %path.display(), "message spooled");
        Ok(())
    }
}
