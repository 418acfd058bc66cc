//! Cross-cutting pieces: configuration and translations.

pub mod config;
pub mod i18n;
