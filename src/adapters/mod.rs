//! Infrastructure adapters. Implement the ports.
//!
//! In-memory record store, AI backends, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod memory;
pub mod ui;
