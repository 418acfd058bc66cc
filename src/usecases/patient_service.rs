//! Patient registry: registration, record updates, clinical notes, search,
//! AI triage and printable reports.

use crate::domain::{
    AdmissionStatus, Appointment, ChatMessage, ClinicalNote, DomainError, Gender, Patient, ids,
};
use crate::ports::{AiPort, HospitalRepo};
use crate::usecases::assistant_service::ai_reply;
use crate::usecases::notifications::NotificationCenter;
use crate::usecases::{prompts, reports};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Registration form as typed by the operator.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub full_name: String,
    pub contact: String,
    /// Free text; the leading digits are used, anything else registers as 0.
    pub age: String,
    pub gender: Gender,
    pub condition: String,
}

const TRIAGE_ERROR_REPLY: &str = "Error analyzing symptoms. Please try again.";

/// Leading digits of the input: "36y" and "36.5" both give 36.
fn parse_age(raw: &str) -> u32 {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

pub struct PatientService {
    repo: Arc<dyn HospitalRepo>,
    notifier: Arc<NotificationCenter>,
    ai: Arc<dyn AiPort>,
    reports_dir: PathBuf,
}

impl PatientService {
    pub fn new(
        repo: Arc<dyn HospitalRepo>,
        notifier: Arc<NotificationCenter>,
        ai: Arc<dyn AiPort>,
        reports_dir: PathBuf,
    ) -> Self {
        Self {
            repo,
            notifier,
            ai,
            reports_dir,
        }
    }

    pub async fn list(&self) -> Result<Vec<Patient>, DomainError> {
        self.repo.patients().await
    }

    pub async fn get(&self, id: &str) -> Result<Patient, DomainError> {
        self.repo
            .find_patient(id)
            .await?
            .ok_or_else(|| DomainError::not_found("patient", id))
    }

    /// Register a new outpatient. The record is prepended to the list.
    pub async fn register(&self, form: NewPatient) -> Result<Patient, DomainError> {
        let full_name = form.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(DomainError::Validation("patient name is required".into()));
        }

        let patient = Patient {
            id: ids::patient_id(),
            full_name,
            age: parse_age(&form.age),
            gender: form.gender,
            contact: form.contact.trim().to_string(),
            last_visit: ids::today(),
            condition: form.condition.trim().to_string(),
            status: AdmissionStatus::Outpatient,
            blood_type: Some("Unknown".to_string()),
            notes: Vec::new(),
        };

        self.repo.insert_patient(patient.clone()).await?;
        info!(patient_id = %patient.id, "patient registered");
        self.notifier
            .success(format!(
                "Patient {} registered successfully.",
                patient.full_name
            ))
            .await;
        Ok(patient)
    }

    /// Whole-record replacement keyed on id.
    pub async fn update(&self, patient: Patient) -> Result<(), DomainError> {
        self.repo.replace_patient(patient).await
    }

    pub async fn add_note(&self, patient_id: &str, note: ClinicalNote) -> Result<(), DomainError> {
        self.repo.add_note(patient_id, note).await?;
        info!(patient_id, "clinical note added");
        self.notifier
            .success("Clinical note added to patient record.")
            .await;
        Ok(())
    }

    /// Case-insensitive match on name or id. Empty term returns everyone.
    pub async fn search(&self, term: &str) -> Result<Vec<Patient>, DomainError> {
        let needle = term.trim().to_lowercase();
        let patients = self.repo.patients().await?;
        Ok(patients
            .into_iter()
            .filter(|p| {
                p.full_name.to_lowercase().contains(&needle)
                    || p.id.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Appointments referencing this patient, in list order.
    pub async fn history(&self, patient_id: &str) -> Result<Vec<Appointment>, DomainError> {
        let appointments = self.repo.appointments().await?;
        Ok(appointments
            .into_iter()
            .filter(|a| a.patient_id == patient_id)
            .collect())
    }

    /// Ask the AI for a triage level, likely diagnoses and next steps.
    ///
    /// AI failures come back as an error bubble rather than an `Err`.
    pub async fn triage(&self, patient_id: &str, symptoms: &str) -> Result<ChatMessage, DomainError> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(DomainError::Validation("describe the symptoms first".into()));
        }
        let patient = self.get(patient_id).await?;

        let prompt = prompts::triage(&patient, symptoms);
        info!(patient_id, "running AI triage");
        let result = self.ai.generate(&prompt, prompts::DEFAULT_MODEL).await;
        Ok(ai_reply(result, TRIAGE_ERROR_REPLY))
    }

    /// Write the patient's medical report and return its path.
    pub async fn write_report(&self, patient_id: &str) -> Result<PathBuf, DomainError> {
        let patient = self.get(patient_id).await?;
        let history = self.history(patient_id).await?;
        let md = reports::patient_report(&patient, &history, Utc::now());
        let filename = format!("patient_{}.md", patient.id);
        reports::write_report(&self.reports_dir, &filename, &md).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;
    use crate::adapters::memory::MemoryRepo;
    use crate::domain::NoteType;
    use crate::usecases::assistant_service::SERVICE_ERROR_REPLY;
    use crate::usecases::assistant_service::test_support::FailingAi;

    fn service_with(ai: Arc<dyn AiPort>) -> (PatientService, Arc<NotificationCenter>) {
        let notifier = Arc::new(NotificationCenter::default());
        let svc = PatientService::new(
            Arc::new(MemoryRepo::seeded()),
            Arc::clone(&notifier),
            ai,
            std::env::temp_dir(),
        );
        (svc, notifier)
    }

    fn service() -> (PatientService, Arc<NotificationCenter>) {
        service_with(Arc::new(MockAiAdapter::with_delay(1)))
    }

    fn form(name: &str, age: &str) -> NewPatient {
        NewPatient {
            full_name: name.to_string(),
            contact: "555-0199".into(),
            age: age.to_string(),
            gender: Gender::Other,
            condition: "Asthma".into(),
        }
    }

    #[tokio::test]
    async fn test_register_prepends_and_notifies() {
        let (svc, notifier) = service();
        let before = svc.list().await.unwrap().len();

        let p = svc.register(form("Ada Lovelace", "36")).await.unwrap();

        let after = svc.list().await.unwrap();
        assert_eq!(after.len(), before + 1);
        assert_eq!(after[0].id, p.id);
        assert_eq!(p.age, 36);
        assert_eq!(p.status, AdmissionStatus::Outpatient);
        assert_eq!(p.blood_type.as_deref(), Some("Unknown"));
        assert!(p.notes.is_empty());

        let toasts = notifier.active().await;
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "Patient Ada Lovelace registered successfully.");
    }

    #[tokio::test]
    async fn test_register_bad_age_is_zero() {
        let (svc, _) = service();
        let p = svc.register(form("Bob", "forty")).await.unwrap();
        assert_eq!(p.age, 0);
    }

    #[tokio::test]
    async fn test_register_requires_name() {
        let (svc, notifier) = service();
        assert!(matches!(
            svc.register(form("  ", "30")).await,
            Err(DomainError::Validation(_))
        ));
        assert!(notifier.active().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_is_silent() {
        let (svc, notifier) = service();
        let mut p = svc.get("P002").await.unwrap();
        p.status = AdmissionStatus::Discharged;
        svc.update(p).await.unwrap();

        assert_eq!(svc.get("P002").await.unwrap().status, AdmissionStatus::Discharged);
        assert!(notifier.active().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_note_notifies() {
        let (svc, notifier) = service();
        let note = ClinicalNote {
            id: "N1".into(),
            date: "2024-02-01".into(),
            author_id: "u3".into(),
            author_name: "Dr. Strange".into(),
            content: "Prescribed rest.".into(),
            note_type: NoteType::Prescription,
        };
        svc.add_note("P003", note).await.unwrap();

        assert_eq!(svc.get("P003").await.unwrap().notes.len(), 1);
        assert_eq!(
            notifier.active().await[0].message,
            "Clinical note added to patient record."
        );
    }

    #[tokio::test]
    async fn test_search_by_name_or_id() {
        let (svc, _) = service();
        let by_name = svc.search("CONNOR").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "P001");

        let by_id = svc.search("p00").await.unwrap();
        assert_eq!(by_id.len(), 5);

        assert!(svc.search("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_filters_by_patient() {
        let (svc, _) = service();
        let history = svc.history("P003").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "A002");
        assert!(svc.history("P005").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_triage_uses_ai() {
        let (svc, _) = service();
        let reply = svc.triage("P001", "chest pain").await.unwrap();
        assert!(!reply.is_error);
        assert!(reply.text.contains("Triage Level"));
    }

    #[tokio::test]
    async fn test_triage_validation() {
        let (svc, _) = service();
        assert!(matches!(
            svc.triage("P001", "   ").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.triage("P404", "fever").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_age_uses_leading_digits() {
        assert_eq!(parse_age("36"), 36);
        assert_eq!(parse_age(" 36.5"), 36);
        assert_eq!(parse_age("36y"), 36);
        assert_eq!(parse_age("abc"), 0);
        assert_eq!(parse_age(""), 0);
    }

    #[tokio::test]
    async fn test_triage_failure_becomes_bubble() {
        let (svc, _) = service_with(Arc::new(FailingAi::network()));
        let reply = svc.triage("P001", "fever").await.unwrap();
        assert!(reply.is_error);
        assert_eq!(reply.text, SERVICE_ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_write_report() {
        let tmp = tempfile::tempdir().unwrap();
        let svc = PatientService::new(
            Arc::new(MemoryRepo::seeded()),
            Arc::new(NotificationCenter::default()),
            Arc::new(MockAiAdapter::with_delay(1)),
            tmp.path().to_path_buf(),
        );
        let path = svc.write_report("P001").await.unwrap();
        assert!(path.ends_with("patient_P001.md"));
        let md = std::fs::read_to_string(path).unwrap();
        assert!(md.contains("Sarah Connor"));
    }
}
