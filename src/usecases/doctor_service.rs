//! Staff roster: add doctors and search by name or specialty.

use crate::domain::{Doctor, DomainError, ids};
use crate::ports::HospitalRepo;
use crate::usecases::notifications::NotificationCenter;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub available: bool,
}

pub struct DoctorService {
    repo: Arc<dyn HospitalRepo>,
    notifier: Arc<NotificationCenter>,
}

impl DoctorService {
    pub fn new(repo: Arc<dyn HospitalRepo>, notifier: Arc<NotificationCenter>) -> Self {
        Self { repo, notifier }
    }

    pub async fn list(&self) -> Result<Vec<Doctor>, DomainError> {
        self.repo.doctors().await
    }

    /// Add a doctor with an empty queue. Prepended to the roster.
    pub async fn add(&self, form: NewDoctor) -> Result<Doctor, DomainError> {
        let name = form.name.trim().to_string();
        let specialty = form.specialty.trim().to_string();
        if name.is_empty() || specialty.is_empty() {
            return Err(DomainError::Validation(
                "doctor name and specialty are required".into(),
            ));
        }

        let doctor = Doctor {
            id: ids::doctor_id(),
            name,
            specialty,
            available: form.available,
            patients_in_queue: 0,
        };
        self.repo.insert_doctor(doctor.clone()).await?;
        info!(doctor_id = %doctor.id, "doctor added");
        self.notifier
            .success(format!("Dr. {} added to staff.", doctor.name))
            .await;
        Ok(doctor)
    }

    /// Case-insensitive match on name or specialty.
    pub async fn search(&self, term: &str) -> Result<Vec<Doctor>, DomainError> {
        let needle = term.trim().to_lowercase();
        let doctors = self.repo.doctors().await?;
        Ok(doctors
            .into_iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&needle)
                    || d.specialty.to_lowercase().contains(&needle)
            })
            .collect())
    }
}
