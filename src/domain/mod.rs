//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod ids;

pub use entities::{
    AdmissionStatus, Appointment, AppointmentStatus, AppointmentType, ChatMessage, ChatRole,
    ClinicalNote, Doctor, Gender, Invoice, InvoiceStatus, NoteType, Notification, Patient,
    Severity, User, UserRole,
};
pub use errors::DomainError;
