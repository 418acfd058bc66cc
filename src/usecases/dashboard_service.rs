//! Dashboard figures derived from the live store.

use crate::domain::{AdmissionStatus, AppointmentStatus, DomainError, InvoiceStatus};
use crate::ports::HospitalRepo;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_patients: usize,
    /// Appointments still in Scheduled state.
    pub active_appointments: usize,
    pub admitted_patients: usize,
    /// Sum of Paid invoices.
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    pub when: &'static str,
}

/// One day of the weekly patient-flow chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowPoint {
    pub day: &'static str,
    pub patients: u32,
    pub emergencies: u32,
}

/// Static demo series for the patient-flow and emergency charts.
pub const PATIENT_FLOW: [FlowPoint; 7] = [
    FlowPoint { day: "Mon", patients: 45, emergencies: 12 },
    FlowPoint { day: "Tue", patients: 52, emergencies: 8 },
    FlowPoint { day: "Wed", patients: 38, emergencies: 15 },
    FlowPoint { day: "Thu", patients: 65, emergencies: 10 },
    FlowPoint { day: "Fri", patients: 48, emergencies: 22 },
    FlowPoint { day: "Sat", patients: 30, emergencies: 5 },
    FlowPoint { day: "Sun", patients: 25, emergencies: 18 },
];

pub struct DashboardService {
    repo: Arc<dyn HospitalRepo>,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn HospitalRepo>) -> Self {
        Self { repo }
    }

    pub async fn stats(&self) -> Result<DashboardStats, DomainError> {
        let patients = self.repo.patients().await?;
        let appointments = self.repo.appointments().await?;
        let invoices = self.repo.invoices().await?;

        Ok(DashboardStats {
            total_patients: patients.len(),
            active_appointments: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Scheduled)
                .count(),
            admitted_patients: patients
                .iter()
                .filter(|p| p.status == AdmissionStatus::Admitted)
                .count(),
            revenue: invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Paid)
                .map(|i| i.amount)
                .sum(),
        })
    }

    /// The two newest appointments followed by the newest registration.
    pub async fn recent_activity(&self) -> Result<Vec<ActivityItem>, DomainError> {
        let appointments = self.repo.appointments().await?;
        let patients = self.repo.patients().await?;

        let mut items: Vec<ActivityItem> = appointments
            .iter()
            .take(2)
            .map(|a| ActivityItem {
                kind: "Appointment",
                title: format!("New Appointment: {}", a.patient_name),
                description: format!("Scheduled with {}", a.doctor_name),
                when: "Recently",
            })
            .collect();
        items.extend(patients.iter().take(1).map(|p| ActivityItem {
            kind: "Registration",
            title: "New Patient Registered".to_string(),
            description: format!("{} ({})", p.full_name, p.condition),
            when: "Just now",
        }));
        Ok(items)
    }
}

/// Whole US dollars with thousands separators, e.g. `$6,351`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}", sign, grouped)
}
