//! Implements HospitalRepo with in-process collections.
//!
//! Session-only: nothing is written to disk. Reads hand out clones.

use crate::adapters::memory::seed;
use crate::domain::{Appointment, ClinicalNote, Doctor, DomainError, Invoice, Patient};
use crate::ports::HospitalRepo;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Dataset {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    invoices: Vec<Invoice>,
}

/// In-memory record store.
pub struct MemoryRepo {
    data: RwLock<Dataset>,
}

impl MemoryRepo {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Dataset::default()),
        }
    }

    /// Store preloaded with the demo dataset.
    pub fn seeded() -> Self {
        Self {
            data: RwLock::new(Dataset {
                patients: seed::patients(),
                doctors: seed::doctors(),
                appointments: seed::appointments(),
                invoices: seed::invoices(),
            }),
        }
    }
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

/// Swap the record with the same id in place. Last write wins.
fn replace_by_id<T>(
    items: &mut [T],
    item: T,
    id_of: impl Fn(&T) -> &str,
    entity: &'static str,
) -> Result<(), DomainError> {
    let id = id_of(&item).to_string();
    match items.iter_mut().find(|existing| id_of(existing) == id) {
        Some(slot) => {
            *slot = item;
            debug!(entity, id = %id, "record replaced");
            Ok(())
        }
        None => Err(DomainError::not_found(entity, id)),
    }
}

#[async_trait::async_trait]
impl HospitalRepo for MemoryRepo {
    async fn patients(&self) -> Result<Vec<Patient>, DomainError> {
        Ok(self.data.read().await.patients.clone())
    }

    async fn find_patient(&self, id: &str) -> Result<Option<Patient>, DomainError> {
        let data = self.data.read().await;
        Ok(data.patients.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_patient(&self, patient: Patient) -> Result<(), DomainError> {
        self.data.write().await.patients.insert(0, patient);
        Ok(())
    }

    async fn replace_patient(&self, patient: Patient) -> Result<(), DomainError> {
        let mut data = self.data.write().await;
        replace_by_id(&mut data.patients, patient, |p| p.id.as_str(), "patient")
    }

    async fn add_note(&self, patient_id: &str, note: ClinicalNote) -> Result<(), DomainError> {
        let mut data = self.data.write().await;
        let patient = data
            .patients
            .iter_mut()
            .find(|p| p.id == patient_id)
            .ok_or_else(|| DomainError::not_found("patient", patient_id))?;
        patient.notes.insert(0, note);
        Ok(())
    }

    async fn doctors(&self) -> Result<Vec<Doctor>, DomainError> {
        Ok(self.data.read().await.doctors.clone())
    }

    async fn find_doctor(&self, id: &str) -> Result<Option<Doctor>, DomainError> {
        let data = self.data.read().await;
        Ok(data.doctors.iter().find(|d| d.id == id).cloned())
    }

    async fn insert_doctor(&self, doctor: Doctor) -> Result<(), DomainError> {
        self.data.write().await.doctors.insert(0, doctor);
        Ok(())
    }

    async fn appointments(&self) -> Result<Vec<Appointment>, DomainError> {
        Ok(self.data.read().await.appointments.clone())
    }

    async fn find_appointment(&self, id: &str) -> Result<Option<Appointment>, DomainError> {
        let data = self.data.read().await;
        Ok(data.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_appointment(&self, appointment: Appointment) -> Result<(), DomainError> {
        self.data.write().await.appointments.insert(0, appointment);
        Ok(())
    }

    async fn replace_appointment(&self, appointment: Appointment) -> Result<(), DomainError> {
        let mut data = self.data.write().await;
        replace_by_id(&mut data.appointments, appointment, |a| a.id.as_str(), "appointment")
    }

    async fn invoices(&self) -> Result<Vec<Invoice>, DomainError> {
        Ok(self.data.read().await.invoices.clone())
    }

    async fn find_invoice(&self, id: &str) -> Result<Option<Invoice>, DomainError> {
        let data = self.data.read().await;
        Ok(data.invoices.iter().find(|i| i.id == id).cloned())
    }

    async fn insert_invoice(&self, invoice: Invoice) -> Result<(), DomainError> {
        self.data.write().await.invoices.insert(0, invoice);
        Ok(())
    }

    async fn replace_invoice(&self, invoice: Invoice) -> Result<(), DomainError> {
        let mut data = self.data.write().await;
        replace_by_id(&mut data.invoices, invoice, |i| i.id.as_str(), "invoice")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InvoiceStatus, NoteType};

    fn note(id: &str) -> ClinicalNote {
        ClinicalNote {
            id: id.to_string(),
            date: "2024-01-01".into(),
            author_id: "u1".into(),
            author_name: "Dr. Gregory House".into(),
            content: "Stable.".into(),
            note_type: NoteType::General,
        }
    }

    #[tokio::test]
    async fn test_seeded_counts() {
        let repo = MemoryRepo::seeded();
        assert_eq!(repo.patients().await.unwrap().len(), 5);
        assert_eq!(repo.doctors().await.unwrap().len(), 3);
        assert_eq!(repo.appointments().await.unwrap().len(), 3);
        assert_eq!(repo.invoices().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_insert_prepends() {
        let repo = MemoryRepo::seeded();
        let mut p = seed::patients().remove(0);
        p.id = "P9999".into();
        repo.insert_patient(p).await.unwrap();
        let patients = repo.patients().await.unwrap();
        assert_eq!(patients.len(), 6);
        assert_eq!(patients[0].id, "P9999");
    }

    #[tokio::test]
    async fn test_replace_keeps_length_and_position() {
        let repo = MemoryRepo::seeded();
        let mut inv = repo.find_invoice("INV-2023-002").await.unwrap().unwrap();
        inv.status = InvoiceStatus::Paid;
        repo.replace_invoice(inv).await.unwrap();

        let invoices = repo.invoices().await.unwrap();
        assert_eq!(invoices.len(), 4);
        assert_eq!(invoices[1].id, "INV-2023-002");
        assert_eq!(invoices[1].status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_replace_unknown_id() {
        let repo = MemoryRepo::new();
        let appt = seed::appointments().remove(0);
        let err = repo.replace_appointment(appt).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "appointment", .. }));
    }

    #[tokio::test]
    async fn test_notes_newest_first() {
        let repo = MemoryRepo::seeded();
        repo.add_note("P001", note("N1")).await.unwrap();
        repo.add_note("P001", note("N2")).await.unwrap();
        let p = repo.find_patient("P001").await.unwrap().unwrap();
        let ids: Vec<_> = p.notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["N2", "N1"]);

        assert!(repo.add_note("P404", note("N3")).await.is_err());
    }
}
