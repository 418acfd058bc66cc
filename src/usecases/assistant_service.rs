//! Clinical assistant chat. Builds prompts, calls the AI port, and turns
//! every outcome (including failures) into a chat bubble.

use crate::domain::{ChatMessage, ClinicalNote, DomainError, NoteType, ids};
use crate::ports::{AiPort, HospitalRepo};
use crate::usecases::patient_service::PatientService;
use crate::usecases::prompts;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub const MISSING_KEY_REPLY: &str = "Error: API Key is missing. Please check your configuration.";
/// Reply when the AI backend rejects or fails the request.
pub const SERVICE_ERROR_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";
/// Reply for failures outside the AI call itself.
pub const CONNECTION_ERROR_REPLY: &str = "I encountered an error connecting to the service.";

/// Author recorded on notes saved from the assistant.
const AI_AUTHOR_ID: &str = "CURRENT_USER";
const AI_AUTHOR_NAME: &str = "MedCore AI";

/// Map an AI result to the bubble shown to the operator. `fallback` covers
/// errors that did not come from the backend.
pub(crate) fn ai_reply(result: Result<String, DomainError>, fallback: &str) -> ChatMessage {
    match result {
        Ok(text) => ChatMessage::model(text),
        Err(DomainError::MissingApiKey) => {
            warn!("AI call skipped: API key is not configured");
            ChatMessage::error(MISSING_KEY_REPLY)
        }
        Err(DomainError::Ai(reason)) => {
            warn!(error = %reason, "AI backend error");
            ChatMessage::error(SERVICE_ERROR_REPLY)
        }
        Err(e) => {
            warn!(error = %e, "AI call failed");
            ChatMessage::error(fallback)
        }
    }
}

struct Session {
    messages: Vec<ChatMessage>,
    model: String,
    context_patient: Option<String>,
}

/// Resets the busy flag when a request finishes, even on early return.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct AssistantService {
    ai: Arc<dyn AiPort>,
    repo: Arc<dyn HospitalRepo>,
    patients: Arc<PatientService>,
    session: Mutex<Session>,
    busy: AtomicBool,
}

impl AssistantService {
    pub fn new(
        ai: Arc<dyn AiPort>,
        repo: Arc<dyn HospitalRepo>,
        patients: Arc<PatientService>,
        default_model: String,
    ) -> Self {
        Self {
            ai,
            repo,
            patients,
            session: Mutex::new(Session {
                messages: vec![ChatMessage::model(prompts::GREETING)],
                model: default_model,
                context_patient: None,
            }),
            busy: AtomicBool::new(false),
        }
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.session.lock().await.messages.clone()
    }

    /// Quick prompts are offered until the conversation has a couple of turns.
    pub async fn show_quick_prompts(&self) -> bool {
        self.session.lock().await.messages.len() < 3
    }

    pub async fn model(&self) -> String {
        self.session.lock().await.model.clone()
    }

    pub async fn select_model(&self, model_id: &str) -> Result<(), DomainError> {
        if !prompts::MODELS.iter().any(|m| m.id == model_id) {
            return Err(DomainError::Validation(format!("unknown model: {}", model_id)));
        }
        self.session.lock().await.model = model_id.to_string();
        info!(model = model_id, "assistant model selected");
        Ok(())
    }

    pub async fn context_patient(&self) -> Option<String> {
        self.session.lock().await.context_patient.clone()
    }

    /// Attach a patient's demographics to later questions, or clear with `None`.
    pub async fn select_patient(&self, patient_id: Option<&str>) -> Result<(), DomainError> {
        if let Some(id) = patient_id {
            self.patients.get(id).await?;
        }
        self.session.lock().await.context_patient = patient_id.map(str::to_string);
        Ok(())
    }

    /// Ask a free-form question. Blank input, or input while a request is in
    /// flight, is ignored and returns `None`.
    pub async fn send(&self, text: &str) -> Result<Option<ChatMessage>, DomainError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let Some(_guard) = self.try_begin() else {
            return Ok(None);
        };

        let (model, context) = {
            let mut session = self.session.lock().await;
            session.messages.push(ChatMessage::user(text));
            (session.model.clone(), session.context_patient.clone())
        };

        let mut prompt = text.to_string();
        if let Some(id) = context {
            if let Some(patient) = self.repo.find_patient(&id).await? {
                prompt = prompts::with_patient_context(&patient, text);
            }
        }

        let result = self.ai.generate(&prompt, &model).await;
        let reply = ai_reply(result, CONNECTION_ERROR_REPLY);
        self.session.lock().await.messages.push(reply.clone());
        Ok(Some(reply))
    }

    /// Ask the pharmacist prompt about two or more drugs.
    pub async fn check_interactions(
        &self,
        drugs: &[String],
    ) -> Result<Option<ChatMessage>, DomainError> {
        let drugs: Vec<String> = drugs
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        if drugs.len() < 2 {
            return Err(DomainError::Validation(
                "enter at least two drugs to check".into(),
            ));
        }
        let Some(_guard) = self.try_begin() else {
            return Ok(None);
        };

        let model = {
            let mut session = self.session.lock().await;
            session.messages.push(ChatMessage::user(format!(
                "Check interactions for: {}",
                drugs.join(", ")
            )));
            session.model.clone()
        };

        let result = self
            .ai
            .generate(&prompts::drug_interactions(&drugs), &model)
            .await;
        let reply = ai_reply(result, CONNECTION_ERROR_REPLY);
        self.session.lock().await.messages.push(reply.clone());
        Ok(Some(reply))
    }

    /// File an assistant reply as a General note on the context patient.
    pub async fn save_to_record(&self, text: &str) -> Result<ClinicalNote, DomainError> {
        let patient_id = self.context_patient().await.ok_or_else(|| {
            DomainError::Validation("select a patient before saving to a record".into())
        })?;

        let note = ClinicalNote {
            id: ids::note_id(),
            date: ids::today(),
            author_id: AI_AUTHOR_ID.to_string(),
            author_name: AI_AUTHOR_NAME.to_string(),
            content: text.to_string(),
            note_type: NoteType::General,
        };
        self.patients.add_note(&patient_id, note.clone()).await?;
        Ok(note)
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// AI double that always fails.
    pub struct FailingAi(pub DomainError);

    impl FailingAi {
        pub fn network() -> Self {
            Self(DomainError::Ai("HTTP request failed: connection refused".into()))
        }
    }

    #[async_trait::async_trait]
    impl AiPort for FailingAi {
        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, DomainError> {
            Err(self.0.clone())
        }
    }

    /// AI double that echoes the prompt it received.
    pub struct EchoAi;

    #[async_trait::async_trait]
    impl AiPort for EchoAi {
        async fn generate(&self, prompt: &str, model: &str) -> Result<String, DomainError> {
            Ok(format!("[{}] {}", model, prompt))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{EchoAi, FailingAi};
    use super::*;
    use crate::adapters::memory::MemoryRepo;
    use crate::domain::ChatRole;
    use crate::usecases::notifications::NotificationCenter;

    fn assistant(ai: Arc<dyn AiPort>) -> (AssistantService, Arc<PatientService>) {
        let repo: Arc<dyn HospitalRepo> = Arc::new(MemoryRepo::seeded());
        let patients = Arc::new(PatientService::new(
            Arc::clone(&repo),
            Arc::new(NotificationCenter::default()),
            Arc::clone(&ai),
            std::env::temp_dir(),
        ));
        let svc = AssistantService::new(
            ai,
            repo,
            Arc::clone(&patients),
            prompts::DEFAULT_MODEL.to_string(),
        );
        (svc, patients)
    }

    #[tokio::test]
    async fn test_starts_with_greeting() {
        let (svc, _) = assistant(Arc::new(EchoAi));
        let msgs = svc.messages().await;
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].role, ChatRole::Model);
        assert_eq!(msgs[0].text, prompts::GREETING);
        assert!(svc.show_quick_prompts().await);
    }

    #[tokio::test]
    async fn test_send_appends_both_bubbles() {
        let (svc, _) = assistant(Arc::new(EchoAi));
        let reply = svc.send("Dosage for ibuprofen?").await.unwrap().unwrap();
        assert_eq!(reply.text, "[gemini-2.5-flash] Dosage for ibuprofen?");

        let msgs = svc.messages().await;
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].role, ChatRole::User);
        assert_eq!(msgs[1].text, "Dosage for ibuprofen?");
        assert!(!svc.show_quick_prompts().await);
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let (svc, _) = assistant(Arc::new(EchoAi));
        assert!(svc.send("   ").await.unwrap().is_none());
        assert_eq!(svc.messages().await.len(), 1);
    }

    #[tokio::test]
    async fn test_patient_context_prefixes_prompt() {
        let (svc, _) = assistant(Arc::new(EchoAi));
        svc.select_patient(Some("P002")).await.unwrap();
        svc.select_model("gemini-3-pro-preview").await.unwrap();

        let reply = svc.send("Next steps?").await.unwrap().unwrap();
        assert_eq!(
            reply.text,
            "[gemini-3-pro-preview] Context: Patient John Doe, 45y, Male, Condition: Type 2 Diabetes.\n\nUser Query: Next steps?"
        );
        // the user bubble shows the raw question
        assert_eq!(svc.messages().await[1].text, "Next steps?");
    }

    #[tokio::test]
    async fn test_selection_validation() {
        let (svc, _) = assistant(Arc::new(EchoAi));
        assert!(svc.select_model("gpt-4o").await.is_err());
        assert!(svc.select_patient(Some("P404")).await.is_err());
        assert!(svc.context_patient().await.is_none());
        svc.select_patient(Some("P001")).await.unwrap();
        svc.select_patient(None).await.unwrap();
        assert!(svc.context_patient().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_becomes_error_bubble() {
        let (svc, _) = assistant(Arc::new(FailingAi::network()));
        let reply = svc.send("hello").await.unwrap().unwrap();
        assert!(reply.is_error);
        assert_eq!(reply.text, SERVICE_ERROR_REPLY);
        assert_eq!(svc.messages().await.len(), 3);
    }

    #[tokio::test]
    async fn test_drug_check_failure_becomes_error_bubble() {
        let (svc, _) = assistant(Arc::new(FailingAi::network()));
        let reply = svc
            .check_interactions(&["Warfarin".into(), "Aspirin".into()])
            .await
            .unwrap()
            .unwrap();
        assert!(reply.is_error);
        assert_eq!(reply.text, SERVICE_ERROR_REPLY);
        let messages = svc.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2], reply);
    }

    #[test]
    fn test_non_backend_error_uses_fallback() {
        let reply = ai_reply(Err(DomainError::Report("disk full".into())), CONNECTION_ERROR_REPLY);
        assert!(reply.is_error);
        assert_eq!(reply.text, CONNECTION_ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_missing_key_reply() {
        let (svc, _) = assistant(Arc::new(FailingAi(DomainError::MissingApiKey)));
        let reply = svc.send("hello").await.unwrap().unwrap();
        assert!(reply.is_error);
        assert_eq!(reply.text, MISSING_KEY_REPLY);
    }

    #[tokio::test]
    async fn test_drug_check() {
        let (svc, _) = assistant(Arc::new(EchoAi));
        let err = svc
            .check_interactions(&["Warfarin".into(), " ".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let reply = svc
            .check_interactions(&["Warfarin".into(), "".into(), "Aspirin".into()])
            .await
            .unwrap()
            .unwrap();
        assert!(reply.text.contains("clinical pharmacist"));
        assert!(reply.text.contains("Warfarin, Aspirin"));
        assert_eq!(
            svc.messages().await[1].text,
            "Check interactions for: Warfarin, Aspirin"
        );
    }

    #[tokio::test]
    async fn test_save_to_record() {
        let (svc, patients) = assistant(Arc::new(EchoAi));
        assert!(matches!(
            svc.save_to_record("summary").await,
            Err(DomainError::Validation(_))
        ));

        svc.select_patient(Some("P004")).await.unwrap();
        let note = svc.save_to_record("Discharge tomorrow.").await.unwrap();
        assert_eq!(note.author_name, "MedCore AI");
        assert_eq!(note.author_id, "CURRENT_USER");
        assert_eq!(note.note_type, NoteType::General);

        let p = patients.get("P004").await.unwrap();
        assert_eq!(p.notes[0].content, "Discharge tomorrow.");
    }

    #[tokio::test]
    async fn test_busy_flag_released() {
        let (svc, _) = assistant(Arc::new(FailingAi::network()));
        svc.send("one").await.unwrap();
        assert!(svc.send("two").await.unwrap().is_some());
    }
}
