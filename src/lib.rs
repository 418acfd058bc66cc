//! medcore: hospital management console (patients, staff, scheduling, billing,
//! clinical AI assistant) with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
