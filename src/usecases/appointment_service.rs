//! Appointment book: scheduling, status changes and patient feedback.

use crate::domain::{Appointment, AppointmentStatus, AppointmentType, DomainError, ids};
use crate::ports::HospitalRepo;
use crate::usecases::notifications::NotificationCenter;
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: String,
    pub doctor_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub kind: AppointmentType,
}

pub struct AppointmentService {
    repo: Arc<dyn HospitalRepo>,
    notifier: Arc<NotificationCenter>,
}

impl AppointmentService {
    pub fn new(repo: Arc<dyn HospitalRepo>, notifier: Arc<NotificationCenter>) -> Self {
        Self { repo, notifier }
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, DomainError> {
        self.repo.appointments().await
    }

    pub async fn get(&self, id: &str) -> Result<Appointment, DomainError> {
        self.repo
            .find_appointment(id)
            .await?
            .ok_or_else(|| DomainError::not_found("appointment", id))
    }

    /// Book a slot. Patient and doctor names are copied onto the record.
    pub async fn schedule(&self, form: NewAppointment) -> Result<Appointment, DomainError> {
        let date = form.date.trim();
        let time = form.time.trim();
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(DomainError::Validation(format!(
                "date must be YYYY-MM-DD, got {:?}",
                date
            )));
        }
        if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            return Err(DomainError::Validation(format!(
                "time must be HH:MM, got {:?}",
                time
            )));
        }

        let patient = self
            .repo
            .find_patient(&form.patient_id)
            .await?
            .ok_or_else(|| DomainError::not_found("patient", &form.patient_id))?;
        let doctor = self
            .repo
            .find_doctor(&form.doctor_id)
            .await?
            .ok_or_else(|| DomainError::not_found("doctor", &form.doctor_id))?;

        let appointment = Appointment {
            id: ids::appointment_id(),
            patient_id: patient.id,
            patient_name: patient.full_name,
            doctor_id: doctor.id,
            doctor_name: doctor.name,
            date: date.to_string(),
            time: time.to_string(),
            status: AppointmentStatus::Scheduled,
            kind: form.kind,
            rating: None,
            feedback_comment: None,
        };
        self.repo.insert_appointment(appointment.clone()).await?;
        info!(appointment_id = %appointment.id, "appointment scheduled");
        self.notifier
            .success("Appointment scheduled successfully.")
            .await;
        Ok(appointment)
    }

    /// Whole-record replacement keyed on id.
    ///
    /// Any update saved as Cancelled or Completed raises a toast, including
    /// feedback recorded on an already completed visit.
    pub async fn update(&self, appointment: Appointment) -> Result<(), DomainError> {
        let status = appointment.status;
        self.repo.replace_appointment(appointment).await?;

        match status {
            AppointmentStatus::Cancelled => {
                self.notifier.info("Appointment cancelled.").await;
            }
            AppointmentStatus::Completed => {
                self.notifier
                    .success("Appointment marked as complete.")
                    .await;
            }
            AppointmentStatus::Scheduled => {}
        }
        Ok(())
    }

    pub async fn cancel(&self, id: &str) -> Result<Appointment, DomainError> {
        self.transition(id, AppointmentStatus::Cancelled).await
    }

    pub async fn complete(&self, id: &str) -> Result<Appointment, DomainError> {
        self.transition(id, AppointmentStatus::Completed).await
    }

    /// Only scheduled appointments can be cancelled or completed.
    async fn transition(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment, DomainError> {
        let mut apt = self.get(id).await?;
        if apt.status != AppointmentStatus::Scheduled {
            return Err(DomainError::Validation(format!(
                "appointment {} is already {}",
                id, apt.status
            )));
        }
        apt.status = status;
        self.update(apt.clone()).await?;
        info!(appointment_id = id, status = %status, "appointment status changed");
        Ok(apt)
    }

    /// Record a 1..=5 star rating and optional comment on a completed visit.
    pub async fn feedback(
        &self,
        id: &str,
        rating: u8,
        comment: &str,
    ) -> Result<Appointment, DomainError> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::Validation(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }
        let mut apt = self.get(id).await?;
        if apt.status != AppointmentStatus::Completed {
            return Err(DomainError::Validation(
                "feedback is only accepted for completed appointments".into(),
            ));
        }
        apt.rating = Some(rating);
        let comment = comment.trim();
        apt.feedback_comment = (!comment.is_empty()).then(|| comment.to_string());
        self.update(apt.clone()).await?;
        Ok(apt)
    }
}
