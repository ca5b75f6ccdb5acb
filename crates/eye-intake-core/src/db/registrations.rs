//! Registration database operations.

use chrono::NaiveDate;
use rusqlite::{params, ErrorCode, OptionalExtension, Row};
use tracing::{info, warn};

use super::{Database, DbError, DbResult};
use crate::models::{PersistedRegistration, RegistrationRow, StoredRegistration};
use crate::submit::{PersistError, RecordStore};

const SELECT_COLUMNS: &str = r#"
    SELECT id, fingerprint, first_name, last_name, date_of_birth, email, phone,
           optometrist, family_doctor, contact_lens_history, specialists,
           eye_diseases, eye_surgeries, eye_lasers, eye_injuries, eye_drops,
           eye_medications, regular_medications, medical_conditions,
           drug_allergies, created_at, updated_at
    FROM patient_registrations
"#;

impl Database {
    /// Insert a registration. A returning patient with unchanged answers
    /// gets a new row with the same fingerprint.
    pub fn insert_registration(&self, row: &RegistrationRow) -> DbResult<PersistedRegistration> {
        let fingerprint = row.fingerprint()?;
        let now = chrono::Utc::now().to_rfc3339();
        let persisted = PersistedRegistration {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now.clone(),
            updated_at: now,
        };

        let result = self.conn.execute(
            r#"
            INSERT INTO patient_registrations (
                id, fingerprint, first_name, last_name, date_of_birth, email, phone,
                optometrist, family_doctor, contact_lens_history, specialists,
                eye_diseases, eye_surgeries, eye_lasers, eye_injuries, eye_drops,
                eye_medications, regular_medications, medical_conditions,
                drug_allergies, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22
            )
            "#,
            params![
                persisted.id,
                fingerprint,
                row.first_name,
                row.last_name,
                row.date_of_birth.map(|d| d.to_string()),
                row.email,
                row.phone,
                row.optometrist,
                row.family_doctor,
                row.contact_lens_history,
                serde_json::to_string(&row.specialists)?,
                serde_json::to_string(&row.eye_diseases)?,
                serde_json::to_string(&row.eye_surgeries)?,
                serde_json::to_string(&row.eye_lasers)?,
                serde_json::to_string(&row.eye_injuries)?,
                serde_json::to_string(&row.eye_drops)?,
                serde_json::to_string(&row.eye_medications)?,
                serde_json::to_string(&row.regular_medications)?,
                serde_json::to_string(&row.medical_conditions)?,
                serde_json::to_string(&row.drug_allergies)?,
                persisted.created_at,
                persisted.updated_at,
            ],
        );

        match result {
            Ok(_) => {
                info!(id = %persisted.id, "registration inserted");
                Ok(persisted)
            }
            Err(rusqlite::Error::SqliteFailure(e, msg))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(DbError::Constraint(
                    msg.unwrap_or_else(|| "registration rejected by the store".to_string()),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a registration by ID.
    pub fn get_registration(&self, id: &str) -> DbResult<Option<StoredRegistration>> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?"),
                [id],
                RegistrationDbRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Most recent registration with the given content fingerprint.
    pub fn find_registration_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> DbResult<Option<StoredRegistration>> {
        self.conn
            .query_row(
                &format!(
                    "{SELECT_COLUMNS} WHERE fingerprint = ? ORDER BY created_at DESC, rowid DESC LIMIT 1"
                ),
                [fingerprint],
                RegistrationDbRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Most recent registrations first.
    pub fn list_registrations(&self, limit: usize) -> DbResult<Vec<StoredRegistration>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC LIMIT ?"
        ))?;

        let rows = stmt.query_map([limit as i64], RegistrationDbRow::from_row)?;

        let mut registrations = Vec::new();
        for row in rows {
            registrations.push(row?.try_into()?);
        }
        Ok(registrations)
    }

    /// Delete a registration.
    pub fn delete_registration(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patient_registrations WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Number of stored registrations.
    pub fn count_registrations(&self) -> DbResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM patient_registrations", [], |row| {
                    row.get(0)
                })?;
        Ok(count as usize)
    }
}

impl RecordStore for Database {
    fn persist(&self, row: &RegistrationRow) -> Result<PersistedRegistration, PersistError> {
        self.insert_registration(row).map_err(|e| {
            warn!(error = %e, "registration insert failed");
            to_persist_error(e)
        })
    }
}

fn to_persist_error(error: DbError) -> PersistError {
    match error {
        DbError::Constraint(msg) => PersistError::Constraint(msg),
        DbError::Sqlite(rusqlite::Error::SqliteFailure(e, msg)) => {
            let detail = msg.unwrap_or_else(|| e.to_string());
            match e.code {
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => PersistError::Timeout(detail),
                ErrorCode::CannotOpen | ErrorCode::NotADatabase => {
                    PersistError::Connectivity(detail)
                }
                ErrorCode::ConstraintViolation => PersistError::Constraint(detail),
                _ => PersistError::Storage(detail),
            }
        }
        other => PersistError::Storage(other.to_string()),
    }
}

/// Raw column values, decoded in `TryFrom`.
struct RegistrationDbRow {
    id: String,
    fingerprint: String,
    first_name: String,
    last_name: String,
    date_of_birth: Option<String>,
    email: Option<String>,
    phone: String,
    optometrist: Option<String>,
    family_doctor: Option<String>,
    contact_lens_history: Option<String>,
    specialists: String,
    eye_diseases: String,
    eye_surgeries: String,
    eye_lasers: String,
    eye_injuries: String,
    eye_drops: String,
    eye_medications: String,
    regular_medications: String,
    medical_conditions: String,
    drug_allergies: String,
    created_at: String,
    updated_at: String,
}

impl RegistrationDbRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            fingerprint: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            date_of_birth: row.get(4)?,
            email: row.get(5)?,
            phone: row.get(6)?,
            optometrist: row.get(7)?,
            family_doctor: row.get(8)?,
            contact_lens_history: row.get(9)?,
            specialists: row.get(10)?,
            eye_diseases: row.get(11)?,
            eye_surgeries: row.get(12)?,
            eye_lasers: row.get(13)?,
            eye_injuries: row.get(14)?,
            eye_drops: row.get(15)?,
            eye_medications: row.get(16)?,
            regular_medications: row.get(17)?,
            medical_conditions: row.get(18)?,
            drug_allergies: row.get(19)?,
            created_at: row.get(20)?,
            updated_at: row.get(21)?,
        })
    }
}

impl TryFrom<RegistrationDbRow> for StoredRegistration {
    type Error = DbError;

    fn try_from(row: RegistrationDbRow) -> Result<Self, Self::Error> {
        let date_of_birth = row
            .date_of_birth
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|e| DbError::InvalidValue(format!("date_of_birth {s:?}: {e}")))
            })
            .transpose()?;

        Ok(StoredRegistration {
            meta: PersistedRegistration {
                id: row.id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            fingerprint: row.fingerprint,
            row: RegistrationRow {
                first_name: row.first_name,
                last_name: row.last_name,
                date_of_birth,
                email: row.email,
                phone: row.phone,
                optometrist: row.optometrist,
                family_doctor: row.family_doctor,
                contact_lens_history: row.contact_lens_history,
                specialists: serde_json::from_str(&row.specialists)?,
                eye_diseases: serde_json::from_str(&row.eye_diseases)?,
                eye_surgeries: serde_json::from_str(&row.eye_surgeries)?,
                eye_lasers: serde_json::from_str(&row.eye_lasers)?,
                eye_injuries: serde_json::from_str(&row.eye_injuries)?,
                eye_drops: serde_json::from_str(&row.eye_drops)?,
                eye_medications: serde_json::from_str(&row.eye_medications)?,
                regular_medications: serde_json::from_str(&row.regular_medications)?,
                medical_conditions: serde_json::from_str(&row.medical_conditions)?,
                drug_allergies: serde_json::from_str(&row.drug_allergies)?,
            },
        })
    }
}
