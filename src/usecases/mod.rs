//! Application use cases. One service per console page, all sharing the
//! record store and the notification queue.

pub mod appointment_service;
pub mod assistant_service;
pub mod auth_service;
pub mod billing_service;
pub mod dashboard_service;
pub mod doctor_service;
pub mod notifications;
pub mod patient_service;
pub mod prompts;
pub mod reports;

pub use appointment_service::{AppointmentService, NewAppointment};
pub use assistant_service::AssistantService;
pub use auth_service::AuthService;
pub use billing_service::{BillingService, BillingSummary, NewInvoice};
pub use dashboard_service::{DashboardService, DashboardStats};
pub use doctor_service::{DoctorService, NewDoctor};
pub use notifications::NotificationCenter;
pub use patient_service::{NewPatient, PatientService};
