//! Domain entities. Pure data structures for the hospital records.
//!
//! Cross-entity references are plain ids plus denormalized names; nothing here
//! enforces referential integrity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Doctor,
    Nurse,
    Receptionist,
    Guest,
    User,
}

/// A console operator (mock account).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub email: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionStatus {
    Admitted,
    Discharged,
    Outpatient,
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdmissionStatus::Admitted => "Admitted",
            AdmissionStatus::Discharged => "Discharged",
            AdmissionStatus::Outpatient => "Outpatient",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteType {
    General,
    Diagnosis,
    Prescription,
    #[serde(rename = "Discharge Summary")]
    DischargeSummary,
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoteType::General => "General",
            NoteType::Diagnosis => "Diagnosis",
            NoteType::Prescription => "Prescription",
            NoteType::DischargeSummary => "Discharge Summary",
        };
        f.pad(s)
    }
}

/// A dated entry in a patient's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalNote {
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub last_visit: String,
    pub condition: String,
    pub status: AdmissionStatus,
    pub blood_type: Option<String>,
    /// Newest first.
    #[serde(default)]
    pub notes: Vec<ClinicalNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub available: bool,
    pub patients_in_queue: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentType {
    #[serde(rename = "Check-up")]
    CheckUp,
    Emergency,
    #[serde(rename = "Follow-up")]
    FollowUp,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 3] = [
        AppointmentType::CheckUp,
        AppointmentType::Emergency,
        AppointmentType::FollowUp,
    ];
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentType::CheckUp => "Check-up",
            AppointmentType::Emergency => "Emergency",
            AppointmentType::FollowUp => "Follow-up",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    /// 1..=5 stars, set through patient feedback.
    pub rating: Option<u8>,
    pub feedback_comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Overdue => "Overdue",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub date: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Transient toast shown after a store mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One bubble in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
}

static LAST_MESSAGE_ID: AtomicU64 = AtomicU64::new(0);

/// Epoch millis, bumped past the previous id so a reply created in the same
/// millisecond as its question still gets its own id.
fn next_message_id(now_ms: i64) -> u64 {
    let now = u64::try_from(now_ms).unwrap_or(0);
    let prev = LAST_MESSAGE_ID
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now.max(prev + 1)
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text.into(), false)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text.into(), false)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text.into(), true)
    }

    fn new(role: ChatRole, text: String, is_error: bool) -> Self {
        let timestamp = Utc::now();
        Self {
            id: next_message_id(timestamp.timestamp_millis()).to_string(),
            role,
            text,
            timestamp,
            is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_labels() {
        let kind = serde_json::to_string(&AppointmentType::CheckUp).unwrap();
        assert_eq!(kind, "\"Check-up\"");
        let note = serde_json::to_string(&NoteType::DischargeSummary).unwrap();
        assert_eq!(note, "\"Discharge Summary\"");
        let role = serde_json::to_string(&UserRole::Receptionist).unwrap();
        assert_eq!(role, "\"RECEPTIONIST\"");
        assert_eq!(AppointmentType::FollowUp.to_string(), "Follow-up");
    }

    #[test]
    fn test_back_to_back_messages_get_distinct_ids() {
        let question = ChatMessage::user("q");
        let reply = ChatMessage::model("a");
        assert_ne!(question.id, reply.id);
        let q: u64 = question.id.parse().unwrap();
        let r: u64 = reply.id.parse().unwrap();
        assert!(r > q);
    }

    #[test]
    fn test_error_bubble_is_flagged() {
        let msg = ChatMessage::error("boom");
        assert_eq!(msg.role, ChatRole::Model);
        assert!(msg.is_error);
        assert!(!ChatMessage::model("ok").is_error);
    }
}
