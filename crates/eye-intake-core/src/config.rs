//! Clinic configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::is_valid_email;
use crate::widgets::{
    PhoneStyle, DEFAULT_BLUR_GRACE, DEFAULT_CHIP_SUGGESTION_LIMIT, DEFAULT_SUGGESTION_LIMIT,
};
use crate::wizard::{WizardSettings, DEFAULT_ACKNOWLEDGEMENT};

/// Environment variable naming the config file used by [`IntakeConfig::from_env`].
pub const CONFIG_ENV: &str = "EYE_INTAKE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the summary e-mail goes and who it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Clinic inbox receiving each registration summary
    pub recipient: String,
    pub sender_address: String,
    pub sender_name: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            recipient: "intake@clinic.example".into(),
            sender_address: "no-reply@clinic.example".into(),
            sender_name: "Patient Registration".into(),
        }
    }
}

/// Settings for one intake deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default = "IntakeConfig::default_clinic_name")]
    pub clinic_name: String,
    #[serde(default = "IntakeConfig::default_database_path")]
    pub database_path: PathBuf,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default = "IntakeConfig::default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "IntakeConfig::default_chip_suggestion_limit")]
    pub chip_suggestion_limit: usize,
    /// Delay before a blurred suggestion list closes
    #[serde(default = "IntakeConfig::default_blur_grace_ms")]
    pub blur_grace_ms: u64,
    /// How long the success screen stays up
    #[serde(default = "IntakeConfig::default_acknowledgement_secs")]
    pub acknowledgement_secs: u64,
    #[serde(default)]
    pub phone_style: PhoneStyle,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            clinic_name: Self::default_clinic_name(),
            database_path: Self::default_database_path(),
            notification: NotificationConfig::default(),
            suggestion_limit: Self::default_suggestion_limit(),
            chip_suggestion_limit: Self::default_chip_suggestion_limit(),
            blur_grace_ms: Self::default_blur_grace_ms(),
            acknowledgement_secs: Self::default_acknowledgement_secs(),
            phone_style: PhoneStyle::default(),
        }
    }
}

impl IntakeConfig {
    pub fn default_clinic_name() -> String {
        "Imaginary Eye Institute".into()
    }

    pub fn default_database_path() -> PathBuf {
        PathBuf::from("eye_intake.db")
    }

    pub fn default_suggestion_limit() -> usize {
        DEFAULT_SUGGESTION_LIMIT
    }

    pub fn default_chip_suggestion_limit() -> usize {
        DEFAULT_CHIP_SUGGESTION_LIMIT
    }

    pub fn default_blur_grace_ms() -> u64 {
        DEFAULT_BLUR_GRACE.as_millis() as u64
    }

    pub fn default_acknowledgement_secs() -> u64 {
        DEFAULT_ACKNOWLEDGEMENT.as_secs()
    }

    /// Read `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let config: Self = if path.exists() {
            let data = fs::read_to_string(path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Write as pretty JSON through a temporary file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !is_valid_email(&self.notification.recipient) {
            return Err(ConfigError::Invalid {
                field: "notification.recipient",
                reason: format!("{:?} is not an e-mail address", self.notification.recipient),
            });
        }
        if !is_valid_email(&self.notification.sender_address) {
            return Err(ConfigError::Invalid {
                field: "notification.sender_address",
                reason: format!(
                    "{:?} is not an e-mail address",
                    self.notification.sender_address
                ),
            });
        }
        if self.suggestion_limit == 0 || self.chip_suggestion_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "suggestion_limit",
                reason: "suggestion limits must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Load from the file named by `EYE_INTAKE_CONFIG`, or defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                Self::load(&path)
                    .with_context(|| format!("loading intake config from {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    pub fn wizard_settings(&self) -> WizardSettings {
        WizardSettings {
            acknowledgement: Duration::from_secs(self.acknowledgement_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = IntakeConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, IntakeConfig::default());
        assert_eq!(config.blur_grace(), Duration::from_millis(150));
        assert_eq!(
            config.wizard_settings().acknowledgement,
            Duration::from_secs(7)
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("intake.json");

        let mut config = IntakeConfig::default();
        config.clinic_name = "Harbour Eye Centre".into();
        config.phone_style = PhoneStyle::Raw;
        config.save(&path).unwrap();

        let loaded = IntakeConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intake.json");
        fs::write(&path, r#"{"clinic_name": "North Clinic"}"#).unwrap();

        let loaded = IntakeConfig::load(&path).unwrap();
        assert_eq!(loaded.clinic_name, "North Clinic");
        assert_eq!(loaded.suggestion_limit, 10);
        assert_eq!(loaded.chip_suggestion_limit, 12);
    }

    #[test]
    fn test_invalid_recipient_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intake.json");
        fs::write(
            &path,
            r#"{"notification": {"recipient": "front desk", "sender_address": "a@b.co", "sender_name": "x"}}"#,
        )
        .unwrap();

        assert!(matches!(
            IntakeConfig::load(&path),
            Err(ConfigError::Invalid {
                field: "notification.recipient",
                ..
            })
        ));
    }

    // The only test that touches CONFIG_ENV.
    #[test]
    fn test_from_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intake.json");
        fs::write(&path, r#"{"clinic_name": "Valley Eye Clinic"}"#).unwrap();

        std::env::set_var(CONFIG_ENV, &path);
        let loaded = IntakeConfig::from_env();
        fs::write(&path, "{not json").unwrap();
        let broken = IntakeConfig::from_env();
        std::env::remove_var(CONFIG_ENV);
        let unset = IntakeConfig::from_env();

        assert_eq!(loaded.unwrap().clinic_name, "Valley Eye Clinic");
        let message = format!("{:#}", broken.unwrap_err());
        assert!(message.starts_with("loading intake config from"), "{message}");
        assert!(message.contains("Serialization error"), "{message}");
        assert_eq!(unset.unwrap(), IntakeConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intake.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            IntakeConfig::load(&path),
            Err(ConfigError::Serde(_))
        ));
    }
}
