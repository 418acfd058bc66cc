//! Demo dataset loaded at startup. Fictional people, fixed dates.

use crate::domain::{
    AdmissionStatus, Appointment, AppointmentStatus, AppointmentType, Doctor, Gender, Invoice,
    InvoiceStatus, Patient, User, UserRole,
};

fn user(id: &str, name: &str, role: UserRole, email: &str, avatar: Option<&str>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        role,
        email: email.to_string(),
        avatar: avatar.map(str::to_string),
    }
}

pub fn users() -> Vec<User> {
    vec![
        user(
            "u1",
            "Dr. Gregory House",
            UserRole::Admin,
            "admin@medcore.com",
            Some("https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?auto=format&fit=crop&q=80&w=150&h=150"),
        ),
        user(
            "u2",
            "Nurse Joy",
            UserRole::Nurse,
            "nurse@medcore.com",
            Some("https://images.unsplash.com/photo-1594824476967-48c8b964273f?auto=format&fit=crop&q=80&w=150&h=150"),
        ),
        user("u3", "Dr. Strange", UserRole::Doctor, "doc@medcore.com", None),
        user(
            "u4",
            "Guest Visitor",
            UserRole::Guest,
            "guest@medcore.com",
            Some("https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?auto=format&fit=crop&q=80&w=150&h=150"),
        ),
        user("u5", "John Normal", UserRole::User, "user@medcore.com", None),
    ]
}

#[allow(clippy::too_many_arguments)]
fn patient(
    id: &str,
    name: &str,
    age: u32,
    gender: Gender,
    contact: &str,
    last_visit: &str,
    condition: &str,
    status: AdmissionStatus,
    blood_type: &str,
) -> Patient {
    Patient {
        id: id.to_string(),
        full_name: name.to_string(),
        age,
        gender,
        contact: contact.to_string(),
        last_visit: last_visit.to_string(),
        condition: condition.to_string(),
        status,
        blood_type: Some(blood_type.to_string()),
        notes: Vec::new(),
    }
}

pub fn patients() -> Vec<Patient> {
    use AdmissionStatus::{Admitted, Outpatient};
    vec![
        patient("P001", "Sarah Connor", 34, Gender::Female, "555-0101", "2023-10-25", "Hypertension", Outpatient, "A+"),
        patient("P002", "John Doe", 45, Gender::Male, "555-0102", "2023-10-26", "Type 2 Diabetes", Admitted, "O-"),
        patient("P003", "Emily Blunt", 29, Gender::Female, "555-0103", "2023-10-24", "Migraine", Outpatient, "B+"),
        patient("P004", "Michael Smith", 52, Gender::Male, "555-0104", "2023-10-20", "Post-Op Recovery", Admitted, "AB+"),
        patient("P005", "Linda Hamilton", 61, Gender::Female, "555-0105", "2023-10-27", "Arthritis", Outpatient, "O+"),
    ]
}

fn doctor(id: &str, name: &str, specialty: &str, available: bool, queue: u32) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        available,
        patients_in_queue: queue,
    }
}

pub fn doctors() -> Vec<Doctor> {
    vec![
        doctor("D001", "Dr. Gregory House", "Diagnostician", true, 2),
        doctor("D002", "Dr. Meredith Grey", "General Surgery", false, 5),
        doctor("D003", "Dr. Stephen Strange", "Neurology", true, 1),
    ]
}

pub fn appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "A001".into(),
            patient_id: "P001".into(),
            patient_name: "Sarah Connor".into(),
            doctor_id: "D001".into(),
            doctor_name: "Dr. Gregory House".into(),
            date: "2023-10-28".into(),
            time: "09:00".into(),
            status: AppointmentStatus::Completed,
            kind: AppointmentType::CheckUp,
            rating: Some(5),
            feedback_comment: Some(
                "Dr. House was surprisingly polite today. Great diagnosis.".into(),
            ),
        },
        Appointment {
            id: "A002".into(),
            patient_id: "P003".into(),
            patient_name: "Emily Blunt".into(),
            doctor_id: "D003".into(),
            doctor_name: "Dr. Stephen Strange".into(),
            date: "2023-10-28".into(),
            time: "10:30".into(),
            status: AppointmentStatus::Scheduled,
            kind: AppointmentType::FollowUp,
            rating: None,
            feedback_comment: None,
        },
        Appointment {
            id: "A003".into(),
            patient_id: "P002".into(),
            patient_name: "John Doe".into(),
            doctor_id: "D002".into(),
            doctor_name: "Dr. Meredith Grey".into(),
            date: "2023-10-29".into(),
            time: "14:00".into(),
            status: AppointmentStatus::Scheduled,
            kind: AppointmentType::Emergency,
            rating: None,
            feedback_comment: None,
        },
    ]
}

fn invoice(
    id: &str,
    patient_id: &str,
    patient_name: &str,
    date: &str,
    amount: f64,
    status: InvoiceStatus,
    items: &[&str],
) -> Invoice {
    Invoice {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        patient_name: patient_name.to_string(),
        date: date.to_string(),
        amount,
        status,
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn invoices() -> Vec<Invoice> {
    use InvoiceStatus::{Overdue, Paid, Pending};
    vec![
        invoice("INV-2023-001", "P001", "Sarah Connor", "2023-10-25", 150.00, Paid, &["General Consultation", "Blood Pressure Check"]),
        invoice("INV-2023-002", "P002", "John Doe", "2023-10-26", 1200.50, Pending, &["Emergency Room Fee", "Insulin Administration", "Overnight Stay"]),
        invoice("INV-2023-003", "P003", "Emily Blunt", "2023-10-27", 75.00, Overdue, &["Follow-up Consultation"]),
        invoice("INV-2023-004", "P004", "Michael Smith", "2023-10-28", 5000.00, Pending, &["Surgery - Appendectomy", "Anesthesia"]),
    ]
}
