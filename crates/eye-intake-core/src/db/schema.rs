//! SQLite schema definition.

/// Registration store schema.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS patient_registrations (
    id TEXT PRIMARY KEY,
    fingerprint TEXT NOT NULL,                    -- SHA-256 of the canonical row JSON
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    date_of_birth TEXT,                           -- YYYY-MM-DD
    email TEXT,
    phone TEXT NOT NULL,
    optometrist TEXT,
    family_doctor TEXT,
    contact_lens_history TEXT
        CHECK (contact_lens_history IN ('Yes', 'No', 'Sometimes')),
    specialists TEXT NOT NULL DEFAULT '[]',       -- JSON array of {specialistType, doctorName}
    eye_diseases TEXT NOT NULL DEFAULT '[]',      -- JSON array of strings
    eye_surgeries TEXT NOT NULL DEFAULT '[]',     -- JSON array of {name, eye, doctor}
    eye_lasers TEXT NOT NULL DEFAULT '[]',        -- JSON array of {name, eye, doctor}
    eye_injuries TEXT NOT NULL DEFAULT '[]',      -- JSON array of strings
    eye_drops TEXT NOT NULL DEFAULT '[]',         -- JSON array of strings
    eye_medications TEXT NOT NULL DEFAULT '[]',   -- JSON array of {medicationName, dosage, affectedEye}
    regular_medications TEXT NOT NULL DEFAULT '[]',
    medical_conditions TEXT NOT NULL DEFAULT '[]',
    drug_allergies TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_registrations_name
    ON patient_registrations(last_name, first_name);
CREATE INDEX IF NOT EXISTS idx_registrations_created
    ON patient_registrations(created_at);
CREATE INDEX IF NOT EXISTS idx_registrations_fingerprint
    ON patient_registrations(fingerprint);
"#;
