//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI invokes application use cases.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Login gate followed by the main menu. Returns when the operator quits.
    async fn run(&self) -> Result<(), DomainError>;
}
