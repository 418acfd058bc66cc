//! Billing: invoices, simulated payment gateway, revenue wallet and receipts.

use crate::domain::{DomainError, Invoice, InvoiceStatus, ids};
use crate::ports::HospitalRepo;
use crate::usecases::notifications::NotificationCenter;
use crate::usecases::reports;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub patient_id: String,
    /// Decimal amount as typed, e.g. "120.50".
    pub amount: String,
    /// Comma-separated line items.
    pub items: String,
}

/// Wallet figures shown on the billing page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillingSummary {
    /// Sum of Paid invoices.
    pub total_revenue: f64,
    /// Sum of Pending invoices (Overdue is not counted).
    pub pending_amount: f64,
    pub transferred: f64,
    /// `total_revenue - transferred`
    pub available_balance: f64,
}

pub struct BillingService {
    repo: Arc<dyn HospitalRepo>,
    notifier: Arc<NotificationCenter>,
    gateway_delay: Duration,
    transferred: Mutex<f64>,
    reports_dir: PathBuf,
}

impl BillingService {
    pub fn new(
        repo: Arc<dyn HospitalRepo>,
        notifier: Arc<NotificationCenter>,
        gateway_delay: Duration,
        reports_dir: PathBuf,
    ) -> Self {
        Self {
            repo,
            notifier,
            gateway_delay,
            transferred: Mutex::new(0.0),
            reports_dir,
        }
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, DomainError> {
        self.repo.invoices().await
    }

    pub async fn get(&self, id: &str) -> Result<Invoice, DomainError> {
        self.repo
            .find_invoice(id)
            .await?
            .ok_or_else(|| DomainError::not_found("invoice", id))
    }

    /// Issue a Pending invoice dated today.
    pub async fn create(&self, form: NewInvoice) -> Result<Invoice, DomainError> {
        let patient = self
            .repo
            .find_patient(&form.patient_id)
            .await?
            .ok_or_else(|| DomainError::not_found("patient", &form.patient_id))?;

        let amount = parse_amount(&form.amount)?;
        let items = split_items(&form.items);
        if items.is_empty() {
            return Err(DomainError::Validation("at least one item is required".into()));
        }

        let invoice = Invoice {
            id: ids::invoice_id(),
            patient_id: patient.id,
            patient_name: patient.full_name,
            date: ids::today(),
            amount,
            status: InvoiceStatus::Pending,
            items,
        };
        self.repo.insert_invoice(invoice.clone()).await?;
        info!(invoice_id = %invoice.id, amount, "invoice created");
        self.notifier
            .success("Invoice generated successfully.")
            .await;
        Ok(invoice)
    }

    /// Whole-record replacement keyed on id.
    pub async fn update(&self, invoice: Invoice) -> Result<(), DomainError> {
        self.repo.replace_invoice(invoice).await
    }

    /// Run the card payment through the simulated gateway and mark the invoice Paid.
    pub async fn pay(&self, id: &str) -> Result<Invoice, DomainError> {
        let mut invoice = self.get(id).await?;
        if invoice.status == InvoiceStatus::Paid {
            return Err(DomainError::Validation(format!("invoice {} is already paid", id)));
        }

        tokio::time::sleep(self.gateway_delay).await;

        invoice.status = InvoiceStatus::Paid;
        self.update(invoice.clone()).await?;
        info!(invoice_id = id, amount = invoice.amount, "payment processed");
        Ok(invoice)
    }

    pub async fn summary(&self) -> Result<BillingSummary, DomainError> {
        let invoices = self.repo.invoices().await?;
        let sum_of = |status: InvoiceStatus| -> f64 {
            invoices
                .iter()
                .filter(|i| i.status == status)
                .map(|i| i.amount)
                .sum()
        };
        let total_revenue = sum_of(InvoiceStatus::Paid);
        let pending_amount = sum_of(InvoiceStatus::Pending);
        let transferred = *self.transferred.lock().await;
        Ok(BillingSummary {
            total_revenue,
            pending_amount,
            transferred,
            available_balance: total_revenue - transferred,
        })
    }

    /// Move the whole available balance to a bank account. Returns the amount moved.
    pub async fn transfer(&self, account: &str) -> Result<f64, DomainError> {
        if account.trim().is_empty() {
            return Err(DomainError::Validation("account number is required".into()));
        }
        let available = self.summary().await?.available_balance;
        if available <= 0.0 {
            return Err(DomainError::Validation("no balance available to transfer".into()));
        }

        tokio::time::sleep(self.gateway_delay).await;

        *self.transferred.lock().await += available;
        info!(amount = available, "balance transferred to bank");
        Ok(available)
    }

    /// Write the invoice receipt and return its path.
    pub async fn write_receipt(&self, id: &str) -> Result<PathBuf, DomainError> {
        let invoice = self.get(id).await?;
        let md = reports::invoice_receipt(&invoice);
        let filename = format!("receipt_{}.md", invoice.id);
        reports::write_report(&self.reports_dir, &filename, &md).await
    }
}

fn parse_amount(raw: &str) -> Result<f64, DomainError> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::Validation(format!("invalid amount: {:?}", raw)))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::Validation(format!("invalid amount: {:?}", raw)));
    }
    Ok(amount)
}

fn split_items(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
