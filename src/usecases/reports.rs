//! Printable documents: patient medical report and invoice receipt.
//!
//! Rendered as Markdown and written under the reports directory.

use crate::domain::{Appointment, DomainError, Invoice, InvoiceStatus, Patient};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

const HOSPITAL_NAME: &str = "MedCore General Hospital";
const HOSPITAL_ADDRESS: &str = "123 Health Ave, Medical District";

/// Patient summary with clinical notes and appointment history.
pub fn patient_report(patient: &Patient, history: &[Appointment], generated: DateTime<Utc>) -> String {
    let mut md = String::new();

    md.push_str("# MedCore Hospital\n\n");
    md.push_str("## Patient Medical Report\n\n");

    md.push_str(&format!("- **Name:** {}\n", patient.full_name));
    md.push_str(&format!("- **Patient ID:** {}\n", patient.id));
    md.push_str(&format!("- **Age / Gender:** {} / {}\n", patient.age, patient.gender));
    md.push_str(&format!("- **Contact:** {}\n", patient.contact));
    md.push_str(&format!("- **Condition:** {}\n", patient.condition));
    md.push_str(&format!("- **Status:** {}\n", patient.status));
    md.push_str(&format!(
        "- **Blood Type:** {}\n\n",
        patient.blood_type.as_deref().unwrap_or("Unknown")
    ));

    md.push_str("## Clinical Notes\n\n");
    if patient.notes.is_empty() {
        md.push_str("No clinical notes available.\n\n");
    } else {
        for note in &patient.notes {
            md.push_str(&format!(
                "### {} - {} ({})\n\n{}\n\n",
                note.date, note.author_name, note.note_type, note.content
            ));
        }
    }

    md.push_str("## Appointment History\n\n");
    if history.is_empty() {
        md.push_str("No appointment history found.\n\n");
    } else {
        md.push_str("| Date | Time | Doctor | Type | Status |\n");
        md.push_str("|------|------|--------|------|--------|\n");
        for apt in history {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                apt.date, apt.time, apt.doctor_name, apt.kind, apt.status
            ));
        }
        md.push('\n');
    }

    md.push_str("---\n");
    md.push_str(&format!(
        "*Generated on {} by MedCore Hospital Management System*\n",
        generated.format("%Y-%m-%d %H:%M UTC")
    ));
    md
}

/// Itemized receipt. Pending invoices are stamped DUE, others with their
/// status in capitals.
pub fn invoice_receipt(invoice: &Invoice) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", HOSPITAL_NAME.to_uppercase()));
    md.push_str(&format!("{}\n\n", HOSPITAL_ADDRESS));
    md.push_str("## Official Receipt\n\n");

    let stamp = match invoice.status {
        InvoiceStatus::Pending => "DUE".to_string(),
        other => other.to_string().to_uppercase(),
    };
    md.push_str(&format!("**[ {} ]**\n\n", stamp));

    md.push_str(&format!("- **Receipt No:** {}\n", invoice.id));
    md.push_str(&format!("- **Date:** {}\n", invoice.date));
    md.push_str(&format!("- **Billed To:** {}\n", invoice.patient_name));
    md.push_str(&format!("- **Patient ID:** {}\n", invoice.patient_id));
    md.push_str(&format!("- **Status:** {}\n\n", invoice.status));

    md.push_str("| # | Description |\n");
    md.push_str("|---|-------------|\n");
    for (i, item) in invoice.items.iter().enumerate() {
        md.push_str(&format!("| {} | {} |\n", i + 1, item));
    }
    md.push('\n');

    md.push_str(&format!("**TOTAL: ${:.2}**\n\n", invoice.amount));
    md.push_str("---\n");
    md.push_str("*Thank you for choosing MedCore. Get well soon!*\n");
    md
}

/// Write `content` to `dir/filename`, creating the directory first.
pub async fn write_report(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, DomainError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| DomainError::Report(format!("Failed to create reports dir: {}", e)))?;

    let path = dir.join(filename);
    fs::write(&path, content)
        .await
        .map_err(|e| DomainError::Report(format!("Failed to write report: {}", e)))?;

    info!(path = %path.display(), "report generated");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::seed;

    #[test]
    fn test_patient_report_without_notes() {
        let patient = &seed::patients()[0];
        let history: Vec<_> = seed::appointments()
            .into_iter()
            .filter(|a| a.patient_id == patient.id)
            .collect();

        let md = patient_report(patient, &history, Utc::now());

        assert!(md.contains("**Name:** Sarah Connor"));
        assert!(md.contains("No clinical notes available."));
        assert!(md.contains("| 2023-10-28 | 09:00 | Dr. Gregory House | Check-up | Completed |"));
    }

    #[test]
    fn test_receipt_stamp_and_total() {
        let invoices = seed::invoices();
        let paid = invoice_receipt(&invoices[0]);
        assert!(paid.contains("[ PAID ]"));
        assert!(paid.contains("TOTAL: $150.00"));
        assert!(paid.contains("| 2 | Blood Pressure Check |"));

        let pending = invoice_receipt(&invoices[1]);
        assert!(pending.contains("[ DUE ]"));
        assert!(pending.contains("TOTAL: $1200.50"));

        let overdue = invoice_receipt(&invoices[2]);
        assert!(overdue.contains("[ OVERDUE ]"));
    }

    #[tokio::test]
    async fn test_write_report_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested");
        let path = write_report(&dir, "r.md", "# hi\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi\n");
    }
}
