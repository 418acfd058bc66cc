//! Terminal rendering: list rows, toasts, chat bubbles.
//!
//! Row formatters are pure so they double as the option labels of select prompts.

use crate::domain::{
    Appointment, AppointmentStatus, ChatMessage, ChatRole, Doctor, DomainError, Invoice,
    InvoiceStatus, Notification, Patient, Severity,
};
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

fn colored_line(color: Color, text: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print("\r\n"));
    let _ = out.flush();
}

pub fn heading(title: &str) {
    colored_line(Color::Cyan, &format!("\n── {} ──", title));
}

pub fn line(text: &str) {
    println!("{}", text);
}

pub fn toasts(notifications: &[Notification]) {
    for n in notifications {
        let (color, icon) = match n.severity {
            Severity::Success => (Color::Green, "✔"),
            Severity::Error => (Color::Red, "✖"),
            Severity::Info => (Color::Blue, "ℹ"),
        };
        colored_line(color, &format!("{} {}", icon, n.message));
    }
}

pub fn error(err: &DomainError) {
    colored_line(Color::Red, &format!("✖ {}", err));
}

pub fn chat(msg: &ChatMessage) {
    let (color, who) = match (msg.role, msg.is_error) {
        (_, true) => (Color::Red, "MedCore AI"),
        (ChatRole::User, false) => (Color::White, "You"),
        (ChatRole::Model, false) => (Color::Cyan, "MedCore AI"),
    };
    colored_line(
        color,
        &format!("[{}] {}:", msg.timestamp.format("%H:%M"), who),
    );
    println!("{}\n", msg.text);
}

pub fn patient_row(p: &Patient) -> String {
    format!(
        "{:<6} {:<20} {:>3}y {:<7} {:<18} {:<10} last visit {}",
        p.id, p.full_name, p.age, p.gender, p.condition, p.status, p.last_visit
    )
}

pub fn doctor_row(d: &Doctor) -> String {
    let availability = if d.available { "Available" } else { "Off Duty" };
    format!(
        "{:<6} {:<22} {:<16} {:<9} {} Patients Waiting",
        d.id, d.name, d.specialty, availability, d.patients_in_queue
    )
}

pub fn appointment_row(a: &Appointment) -> String {
    let mut row = format!(
        "{:<15} {} {}  {:<18} with {:<22} {:<9} [{}]",
        a.id, a.date, a.time, a.patient_name, a.doctor_name, a.kind, a.status
    );
    if a.status == AppointmentStatus::Completed {
        if let Some(rating) = a.rating {
            row.push_str(&format!(" {}", "★".repeat(rating as usize)));
        }
    }
    row
}

pub fn invoice_row(i: &Invoice) -> String {
    let marker = match i.status {
        InvoiceStatus::Paid => "✔",
        InvoiceStatus::Pending => "…",
        InvoiceStatus::Overdue => "!",
    };
    format!(
        "{:<13} {} {:<18} {:>10.2}  {} {:<8} {}",
        i.id,
        i.date,
        i.patient_name,
        i.amount,
        marker,
        i.status,
        i.items.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::seed;

    #[test]
    fn test_rows_contain_key_fields() {
        let p = &seed::patients()[1];
        let row = patient_row(p);
        assert!(row.starts_with("P002"));
        assert!(row.contains("John Doe"));
        assert!(row.contains("Admitted"));

        let d = &seed::doctors()[1];
        assert!(doctor_row(d).contains("Off Duty"));
        assert!(doctor_row(d).contains("5 Patients Waiting"));

        let i = &seed::invoices()[1];
        assert!(invoice_row(i).contains("1200.50"));
    }

    #[test]
    fn test_completed_row_shows_stars() {
        let a = &seed::appointments()[0];
        assert!(appointment_row(a).ends_with("★★★★★"));
        let scheduled = &seed::appointments()[1];
        assert!(!appointment_row(scheduled).contains('★'));
    }
}
