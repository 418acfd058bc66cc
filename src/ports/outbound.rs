//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Appointment, ClinicalNote, Doctor, DomainError, Invoice, Patient};

/// The shared record store. Every page reads snapshots from it and writes
/// back whole records.
///
/// Inserts prepend (newest first). Replacements are keyed on `id` and fail
/// with `DomainError::NotFound` when nothing matches.
#[async_trait::async_trait]
pub trait HospitalRepo: Send + Sync {
    async fn patients(&self) -> Result<Vec<Patient>, DomainError>;
    async fn find_patient(&self, id: &str) -> Result<Option<Patient>, DomainError>;
    async fn insert_patient(&self, patient: Patient) -> Result<(), DomainError>;
    async fn replace_patient(&self, patient: Patient) -> Result<(), DomainError>;
    /// Prepend a note to the patient's record.
    async fn add_note(&self, patient_id: &str, note: ClinicalNote) -> Result<(), DomainError>;

    async fn doctors(&self) -> Result<Vec<Doctor>, DomainError>;
    async fn find_doctor(&self, id: &str) -> Result<Option<Doctor>, DomainError>;
    async fn insert_doctor(&self, doctor: Doctor) -> Result<(), DomainError>;

    async fn appointments(&self) -> Result<Vec<Appointment>, DomainError>;
    async fn find_appointment(&self, id: &str) -> Result<Option<Appointment>, DomainError>;
    async fn insert_appointment(&self, appointment: Appointment) -> Result<(), DomainError>;
    async fn replace_appointment(&self, appointment: Appointment) -> Result<(), DomainError>;

    async fn invoices(&self) -> Result<Vec<Invoice>, DomainError>;
    async fn find_invoice(&self, id: &str) -> Result<Option<Invoice>, DomainError>;
    async fn insert_invoice(&self, invoice: Invoice) -> Result<(), DomainError>;
    async fn replace_invoice(&self, invoice: Invoice) -> Result<(), DomainError>;
}

/// Generative-AI text endpoint. One request, one response; no streaming.
#[async_trait::async_trait]
pub trait AiPort: Send + Sync {
    /// Send `prompt` to `model` under the fixed assistant system instruction.
    ///
    /// # Errors
    /// `DomainError::MissingApiKey` when no credential is configured,
    /// `DomainError::Ai` for transport or API failures.
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, DomainError>;
}
