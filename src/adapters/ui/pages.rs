//! Page flows behind the main menu. Each page loops until the operator backs out.

use super::tui::{Services, ask};
use super::{progress, render};
use crate::domain::{
    AdmissionStatus, AppointmentStatus, AppointmentType, ChatRole, ClinicalNote, DomainError, Gender,
    InvoiceStatus, NoteType, Patient, ids,
};
use crate::shared::i18n::{Language, translate};
use crate::usecases::dashboard_service::{PATIENT_FLOW, format_usd};
use crate::usecases::{NewAppointment, NewDoctor, NewInvoice, NewPatient, prompts};
use inquire::{Confirm, CustomType, Select, Text};

/// Show a recoverable error and keep going. Terminal failures propagate.
pub(super) fn report(result: Result<(), DomainError>) -> Result<(), DomainError> {
    match result {
        Err(e @ DomainError::Ui(_)) => Err(e),
        Err(e) => {
            render::error(&e);
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

/// Show the live toasts, then dismiss each one that was shown.
pub(super) async fn flush(s: &Services) {
    let shown = s.notifier.active().await;
    render::toasts(&shown);
    for toast in &shown {
        s.notifier.remove(&toast.id).await;
    }
}

fn choose(title: &str, options: &[&str]) -> Result<Option<usize>, DomainError> {
    Ok(ask(Select::new(title, options.to_vec()).raw_prompt())?.map(|o| o.index))
}

/// Pick one record by its row label.
fn pick<T>(title: &str, items: &[T], row: fn(&T) -> String) -> Result<Option<usize>, DomainError> {
    if items.is_empty() {
        render::line("No records.");
        return Ok(None);
    }
    let rows: Vec<String> = items.iter().map(row).collect();
    Ok(ask(Select::new(title, rows).with_page_size(10).raw_prompt())?.map(|o| o.index))
}

fn text(message: &str) -> Result<Option<String>, DomainError> {
    ask(Text::new(message).prompt())
}

// ---------- dashboard ----------

pub(super) async fn dashboard(s: &Services, lang: Language) -> Result<(), DomainError> {
    let stats = s.dashboard.stats().await?;
    render::heading(translate(lang, "overview"));
    render::line(&format!("{:<24} {}", translate(lang, "totalPatients"), stats.total_patients));
    render::line(&format!(
        "{:<24} {}",
        translate(lang, "appointments"),
        stats.active_appointments
    ));
    render::line(&format!("{:<24} {}", "Admitted", stats.admitted_patients));
    render::line(&format!("{:<24} {}", translate(lang, "earnings"), format_usd(stats.revenue)));

    render::heading(translate(lang, "recentUpdates"));
    for item in s.dashboard.recent_activity().await? {
        render::line(&format!(
            "[{}] {}  {}  ({})",
            item.kind, item.title, item.description, item.when
        ));
    }

    render::heading(translate(lang, "patientFlow"));
    for point in PATIENT_FLOW {
        render::line(&format!(
            "{} {:<33} {:>3}  emergencies {:>2}",
            point.day,
            "█".repeat((point.patients / 2) as usize),
            point.patients,
            point.emergencies
        ));
    }
    Ok(())
}

// ---------- patients ----------

pub(super) async fn patients(s: &Services, lang: Language) -> Result<(), DomainError> {
    let title = translate(lang, "patients");
    loop {
        let Some(choice) = choose(title, &["Browse / search", "Register patient", "Back"])? else {
            return Ok(());
        };
        let outcome = match choice {
            0 => browse_patients(s).await,
            1 => register_patient(s).await,
            _ => return Ok(()),
        };
        report(outcome)?;
        flush(s).await;
    }
}

async fn register_patient(s: &Services) -> Result<(), DomainError> {
    let Some(full_name) = text("Full name")? else {
        return Ok(());
    };
    let Some(age) = text("Age")? else {
        return Ok(());
    };
    let Some(gender) = ask(Select::new("Gender", Gender::ALL.to_vec()).prompt())? else {
        return Ok(());
    };
    let Some(contact) = text("Contact")? else {
        return Ok(());
    };
    let Some(condition) = text("Condition")? else {
        return Ok(());
    };
    let patient = s
        .patients
        .register(NewPatient {
            full_name,
            contact,
            age,
            gender,
            condition,
        })
        .await?;
    render::line(&render::patient_row(&patient));
    Ok(())
}

async fn browse_patients(s: &Services) -> Result<(), DomainError> {
    let Some(term) = text("Search by name or ID (blank for all)")? else {
        return Ok(());
    };
    let found = s.patients.search(&term).await?;
    let Some(index) = pick("Patient", &found, render::patient_row)? else {
        return Ok(());
    };
    patient_record(s, &found[index].id).await
}

async fn patient_record(s: &Services, patient_id: &str) -> Result<(), DomainError> {
    loop {
        let patient = s.patients.get(patient_id).await?;
        show_patient(s, &patient).await?;

        let Some(choice) = choose(
            &patient.full_name,
            &[
                "Add clinical note",
                "Edit condition / status",
                "AI triage",
                "Export medical report",
                "Back",
            ],
        )?
        else {
            return Ok(());
        };
        let outcome = match choice {
            0 => add_note(s, &patient).await,
            1 => edit_patient(s, patient).await,
            2 => triage(s, patient_id).await,
            3 => s.patients.write_report(patient_id).await.map(|path| {
                render::line(&format!("Report written to {}", path.display()));
            }),
            _ => return Ok(()),
        };
        report(outcome)?;
        flush(s).await;
    }
}

async fn show_patient(s: &Services, patient: &Patient) -> Result<(), DomainError> {
    render::heading(&format!("{} ({})", patient.full_name, patient.id));
    render::line(&format!(
        "{}y {}  blood {}  contact {}",
        patient.age,
        patient.gender,
        patient.blood_type.as_deref().unwrap_or("Unknown"),
        patient.contact
    ));
    render::line(&format!(
        "Condition: {}  Status: {}  Last visit: {}",
        patient.condition, patient.status, patient.last_visit
    ));
    if !patient.notes.is_empty() {
        render::line("Notes:");
        for note in &patient.notes {
            render::line(&format!(
                "  {} [{}] {}: {}",
                note.date, note.note_type, note.author_name, note.content
            ));
        }
    }
    let history = s.patients.history(&patient.id).await?;
    if !history.is_empty() {
        render::line("Visits:");
        for apt in &history {
            render::line(&format!("  {}", render::appointment_row(apt)));
        }
    }
    Ok(())
}

async fn add_note(s: &Services, patient: &Patient) -> Result<(), DomainError> {
    let types = vec![
        NoteType::General,
        NoteType::Diagnosis,
        NoteType::Prescription,
        NoteType::DischargeSummary,
    ];
    let Some(note_type) = ask(Select::new("Note type", types).prompt())? else {
        return Ok(());
    };
    let Some(content) = text("Note")? else {
        return Ok(());
    };
    if content.trim().is_empty() {
        return Err(DomainError::Validation("note content is required".into()));
    }
    let author = s.auth.current_user().await;
    let note = ClinicalNote {
        id: ids::note_id(),
        date: ids::today(),
        author_id: author.as_ref().map(|u| u.id.clone()).unwrap_or_default(),
        author_name: author.map(|u| u.name).unwrap_or_default(),
        content: content.trim().to_string(),
        note_type,
    };
    s.patients.add_note(&patient.id, note).await
}

async fn edit_patient(s: &Services, mut patient: Patient) -> Result<(), DomainError> {
    let Some(condition) = ask(Text::new("Condition").with_default(&patient.condition).prompt())?
    else {
        return Ok(());
    };
    let statuses = vec![
        AdmissionStatus::Admitted,
        AdmissionStatus::Outpatient,
        AdmissionStatus::Discharged,
    ];
    let start = statuses.iter().position(|st| *st == patient.status).unwrap_or(0);
    let Some(status) = ask(
        Select::new("Status", statuses)
            .with_starting_cursor(start)
            .prompt(),
    )?
    else {
        return Ok(());
    };
    patient.condition = condition.trim().to_string();
    patient.status = status;
    s.patients.update(patient).await?;
    render::line("Patient record updated.");
    Ok(())
}

async fn triage(s: &Services, patient_id: &str) -> Result<(), DomainError> {
    let Some(symptoms) = text("Current symptoms")? else {
        return Ok(());
    };
    let reply =
        progress::with_spinner("Analyzing symptoms...", s.patients.triage(patient_id, &symptoms))
            .await?;
    render::chat(&reply);
    if !reply.is_error
        && ask(Confirm::new("Save assessment to the patient record?")
            .with_default(false)
            .prompt())?
        .unwrap_or(false)
    {
        let note = ClinicalNote {
            id: ids::note_id(),
            date: ids::today(),
            author_id: "AI".to_string(),
            author_name: "MedCore AI".to_string(),
            content: reply.text,
            note_type: NoteType::Diagnosis,
        };
        s.patients.add_note(patient_id, note).await?;
    }
    Ok(())
}

// ---------- doctors ----------

pub(super) async fn doctors(s: &Services, lang: Language) -> Result<(), DomainError> {
    let title = translate(lang, "doctors");
    loop {
        let Some(choice) = choose(title, &["Browse / search", "Add doctor", "Back"])? else {
            return Ok(());
        };
        let outcome = match choice {
            0 => browse_doctors(s).await,
            1 => add_doctor(s).await,
            _ => return Ok(()),
        };
        report(outcome)?;
        flush(s).await;
    }
}

async fn browse_doctors(s: &Services) -> Result<(), DomainError> {
    let Some(term) = text("Search by name or specialty (blank for all)")? else {
        return Ok(());
    };
    let found = s.doctors.search(&term).await?;
    if found.is_empty() {
        render::line("No doctors found.");
    }
    for doctor in &found {
        render::line(&render::doctor_row(doctor));
    }
    Ok(())
}

async fn add_doctor(s: &Services) -> Result<(), DomainError> {
    let Some(name) = text("Name")? else {
        return Ok(());
    };
    let Some(specialty) = text("Specialty")? else {
        return Ok(());
    };
    let Some(available) = ask(Confirm::new("Available now?").with_default(true).prompt())? else {
        return Ok(());
    };
    let doctor = s
        .doctors
        .add(NewDoctor {
            name,
            specialty,
            available,
        })
        .await?;
    render::line(&render::doctor_row(&doctor));
    Ok(())
}

// ---------- appointments ----------

pub(super) async fn appointments(s: &Services, lang: Language) -> Result<(), DomainError> {
    let title = translate(lang, "appointments");
    loop {
        let Some(choice) = choose(
            title,
            &[
                "List",
                "Schedule",
                "Cancel",
                "Mark complete",
                "Record feedback",
                "Back",
            ],
        )?
        else {
            return Ok(());
        };
        let outcome = match choice {
            0 => list_appointments(s).await,
            1 => schedule(s).await,
            2 => change_status(s, AppointmentStatus::Cancelled).await,
            3 => change_status(s, AppointmentStatus::Completed).await,
            4 => feedback(s).await,
            _ => return Ok(()),
        };
        report(outcome)?;
        flush(s).await;
    }
}

async fn list_appointments(s: &Services) -> Result<(), DomainError> {
    let all = s.appointments.list().await?;
    if all.is_empty() {
        render::line("No appointments.");
    }
    for apt in &all {
        render::line(&render::appointment_row(apt));
        if let Some(comment) = &apt.feedback_comment {
            render::line(&format!("    \"{}\"", comment));
        }
    }
    Ok(())
}

async fn schedule(s: &Services) -> Result<(), DomainError> {
    let patients = s.patients.list().await?;
    let Some(p) = pick("Patient", &patients, render::patient_row)? else {
        return Ok(());
    };
    let doctors = s.doctors.list().await?;
    let Some(d) = pick("Doctor", &doctors, render::doctor_row)? else {
        return Ok(());
    };
    let Some(date) = ask(Text::new("Date (YYYY-MM-DD)").with_default(&ids::today()).prompt())?
    else {
        return Ok(());
    };
    let Some(time) = ask(Text::new("Time (HH:MM)").with_default("09:00").prompt())? else {
        return Ok(());
    };
    let Some(kind) = ask(Select::new("Type", AppointmentType::ALL.to_vec()).prompt())? else {
        return Ok(());
    };
    let apt = s
        .appointments
        .schedule(NewAppointment {
            patient_id: patients[p].id.clone(),
            doctor_id: doctors[d].id.clone(),
            date,
            time,
            kind,
        })
        .await?;
    render::line(&render::appointment_row(&apt));
    Ok(())
}

async fn change_status(s: &Services, target: AppointmentStatus) -> Result<(), DomainError> {
    let scheduled: Vec<_> = s
        .appointments
        .list()
        .await?
        .into_iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled)
        .collect();
    let Some(index) = pick("Appointment", &scheduled, render::appointment_row)? else {
        return Ok(());
    };
    let id = &scheduled[index].id;
    match target {
        AppointmentStatus::Cancelled => s.appointments.cancel(id).await?,
        _ => s.appointments.complete(id).await?,
    };
    Ok(())
}

async fn feedback(s: &Services) -> Result<(), DomainError> {
    let completed: Vec<_> = s
        .appointments
        .list()
        .await?
        .into_iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .collect();
    let Some(index) = pick("Appointment", &completed, render::appointment_row)? else {
        return Ok(());
    };
    let Some(rating) = ask(
        CustomType::<u8>::new("Rating (1-5)")
            .with_error_message("Enter a whole number from 1 to 5")
            .prompt(),
    )?
    else {
        return Ok(());
    };
    let Some(comment) = text("Comment (optional)")? else {
        return Ok(());
    };
    let apt = s
        .appointments
        .feedback(&completed[index].id, rating, &comment)
        .await?;
    render::line(&render::appointment_row(&apt));
    render::line("Feedback recorded.");
    Ok(())
}

// ---------- billing ----------

pub(super) async fn billing(s: &Services, lang: Language) -> Result<(), DomainError> {
    let title = translate(lang, "billing");
    loop {
        let Some(choice) = choose(
            title,
            &[
                "Summary",
                "Invoices",
                "Create invoice",
                "Pay invoice",
                "Print receipt",
                "Transfer to bank",
                "Back",
            ],
        )?
        else {
            return Ok(());
        };
        let outcome = match choice {
            0 => billing_summary(s).await,
            1 => list_invoices(s).await,
            2 => create_invoice(s).await,
            3 => pay_invoice(s).await,
            4 => print_receipt(s).await,
            5 => transfer(s).await,
            _ => return Ok(()),
        };
        report(outcome)?;
        flush(s).await;
    }
}

async fn billing_summary(s: &Services) -> Result<(), DomainError> {
    let summary = s.billing.summary().await?;
    render::line(&format!("Total revenue      ${:.2}", summary.total_revenue));
    render::line(&format!("Pending            ${:.2}", summary.pending_amount));
    render::line(&format!("Transferred        ${:.2}", summary.transferred));
    render::line(&format!("Available balance  ${:.2}", summary.available_balance));
    Ok(())
}

async fn list_invoices(s: &Services) -> Result<(), DomainError> {
    for invoice in s.billing.list().await? {
        render::line(&render::invoice_row(&invoice));
    }
    Ok(())
}

async fn create_invoice(s: &Services) -> Result<(), DomainError> {
    let patients = s.patients.list().await?;
    let Some(p) = pick("Patient", &patients, render::patient_row)? else {
        return Ok(());
    };
    let Some(amount) = text("Amount (USD)")? else {
        return Ok(());
    };
    let Some(items) = ask(
        Text::new("Items")
            .with_help_message("comma separated, e.g. Consultation, X-Ray")
            .prompt(),
    )?
    else {
        return Ok(());
    };
    let invoice = s
        .billing
        .create(NewInvoice {
            patient_id: patients[p].id.clone(),
            amount,
            items,
        })
        .await?;
    render::line(&render::invoice_row(&invoice));
    Ok(())
}

async fn pay_invoice(s: &Services) -> Result<(), DomainError> {
    let unpaid: Vec<_> = s
        .billing
        .list()
        .await?
        .into_iter()
        .filter(|i| i.status != InvoiceStatus::Paid)
        .collect();
    let Some(index) = pick("Invoice", &unpaid, render::invoice_row)? else {
        return Ok(());
    };
    let invoice = &unpaid[index];
    let Some(_card) = text("Card number")? else {
        return Ok(());
    };
    let message = format!("Processing ${:.2}...", invoice.amount);
    let paid = progress::with_spinner(&message, s.billing.pay(&invoice.id)).await?;
    render::line(&format!("Payment accepted for {}.", paid.id));
    Ok(())
}

async fn print_receipt(s: &Services) -> Result<(), DomainError> {
    let invoices = s.billing.list().await?;
    let Some(index) = pick("Invoice", &invoices, render::invoice_row)? else {
        return Ok(());
    };
    let path = s.billing.write_receipt(&invoices[index].id).await?;
    render::line(&format!("Receipt written to {}", path.display()));
    Ok(())
}

async fn transfer(s: &Services) -> Result<(), DomainError> {
    let summary = s.billing.summary().await?;
    render::line(&format!(
        "Available balance: ${:.2}",
        summary.available_balance
    ));
    let Some(account) = text("Bank account number")? else {
        return Ok(());
    };
    let amount = progress::with_spinner("Transferring...", s.billing.transfer(&account)).await?;
    render::line(&format!("${:.2} transferred to {}.", amount, account.trim()));
    Ok(())
}

// ---------- assistant ----------

pub(super) async fn assistant(s: &Services, lang: Language) -> Result<(), DomainError> {
    render::heading(translate(lang, "aiAssistant"));
    for msg in s.assistant.messages().await {
        render::chat(&msg);
    }

    loop {
        let model = s.assistant.model().await;
        let context = s.assistant.context_patient().await;
        let title = format!(
            "{} · {}",
            model,
            context.as_deref().unwrap_or("no patient context")
        );

        let mut options = vec!["Ask a question".to_string()];
        let quick = s.assistant.show_quick_prompts().await;
        if quick {
            options.extend(prompts::QUICK_PROMPTS.iter().map(|p| format!("» {}", p)));
        }
        options.extend(
            [
                "Check drug interactions",
                "Select patient context",
                "Switch model",
                "Save last reply to record",
                "Back",
            ]
            .map(String::from),
        );

        let Some(choice) = ask(Select::new(&title, options).with_page_size(10).raw_prompt())? else {
            return Ok(());
        };
        let quick_count = if quick { prompts::QUICK_PROMPTS.len() } else { 0 };
        let index = choice.index;

        let outcome = if index == 0 {
            ask_question(s, None).await
        } else if index <= quick_count {
            ask_question(s, Some(prompts::QUICK_PROMPTS[index - 1])).await
        } else {
            match index - quick_count {
                1 => check_interactions(s).await,
                2 => select_context(s).await,
                3 => switch_model(s).await,
                4 => save_last_reply(s).await,
                _ => return Ok(()),
            }
        };
        report(outcome)?;
        flush(s).await;
    }
}

async fn ask_question(s: &Services, preset: Option<&str>) -> Result<(), DomainError> {
    let question = match preset {
        Some(canned) => canned.to_string(),
        None => match text("Your question")? {
            Some(q) => q,
            None => return Ok(()),
        },
    };
    let reply = progress::with_spinner("Thinking...", s.assistant.send(&question)).await?;
    if let Some(reply) = reply {
        render::chat(&reply);
    }
    Ok(())
}

async fn check_interactions(s: &Services) -> Result<(), DomainError> {
    let Some(raw) = ask(
        Text::new("Drugs")
            .with_help_message("comma separated, at least two")
            .prompt(),
    )?
    else {
        return Ok(());
    };
    let drugs: Vec<String> = raw.split(',').map(str::to_string).collect();
    let reply =
        progress::with_spinner("Checking interactions...", s.assistant.check_interactions(&drugs))
            .await?;
    if let Some(reply) = reply {
        render::chat(&reply);
    }
    Ok(())
}

async fn select_context(s: &Services) -> Result<(), DomainError> {
    let patients = s.patients.list().await?;
    let mut rows = vec!["(none)".to_string()];
    rows.extend(patients.iter().map(render::patient_row));
    let Some(choice) = ask(Select::new("Context patient", rows).with_page_size(10).raw_prompt())?
    else {
        return Ok(());
    };
    let selected = choice
        .index
        .checked_sub(1)
        .and_then(|i| patients.get(i))
        .map(|p| p.id.as_str());
    s.assistant.select_patient(selected).await
}

async fn switch_model(s: &Services) -> Result<(), DomainError> {
    let rows: Vec<String> = prompts::MODELS
        .iter()
        .map(|m| format!("{} ({})", m.name, m.label))
        .collect();
    let Some(choice) = ask(Select::new("Model", rows).raw_prompt())? else {
        return Ok(());
    };
    s.assistant.select_model(prompts::MODELS[choice.index].id).await
}

async fn save_last_reply(s: &Services) -> Result<(), DomainError> {
    let messages = s.assistant.messages().await;
    let last = messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::Model && !m.is_error);
    let Some(last) = last else {
        return Err(DomainError::Validation("no assistant reply to save".into()));
    };
    s.assistant.save_to_record(&last.text).await?;
    Ok(())
}
