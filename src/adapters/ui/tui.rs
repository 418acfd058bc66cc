//! Implements InputPort. Inquire-based console: login gate, then the main menu.

use super::{pages, progress, render};
use crate::domain::{DomainError, User};
use crate::ports::InputPort;
use crate::shared::i18n::{Language, translate};
use crate::usecases::auth_service::DEMO_CREDENTIALS;
use crate::usecases::{
    AppointmentService, AssistantService, AuthService, BillingService, DashboardService,
    DoctorService, NotificationCenter, PatientService,
};
use async_trait::async_trait;
use inquire::error::InquireResult;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Navigation keys, in menu order. Labels come from the translation table.
const NAV: [&str; 8] = [
    "dashboard",
    "patients",
    "doctors",
    "appointments",
    "billing",
    "aiAssistant",
    "settings",
    "logout",
];

/// Clinical blue prompts with emerald answers.
pub fn apply_theme() {
    let blue = Color::Rgb {
        r: 0x25,
        g: 0x63,
        b: 0xeb,
    };
    let emerald = Color::Rgb {
        r: 0x10,
        g: 0xb9,
        b: 0x81,
    };
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("✚").with_fg(blue))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(emerald))
        .with_highlighted_option_prefix(Styled::new("›").with_fg(emerald))
        .with_selected_option(Some(StyleSheet::new().with_fg(emerald)))
        .with_answer(StyleSheet::new().with_fg(emerald).with_attr(Attributes::BOLD))
        .with_help_message(StyleSheet::new().with_fg(Color::DarkGrey));
    inquire::set_global_render_config(config);
}

/// Esc and Ctrl-C back out of a prompt (`None`); anything else is a terminal failure.
pub(super) fn ask<T>(result: InquireResult<T>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// Everything the pages call into.
pub struct Services {
    pub auth: Arc<AuthService>,
    pub dashboard: Arc<DashboardService>,
    pub patients: Arc<PatientService>,
    pub doctors: Arc<DoctorService>,
    pub appointments: Arc<AppointmentService>,
    pub billing: Arc<BillingService>,
    pub assistant: Arc<AssistantService>,
    pub notifier: Arc<NotificationCenter>,
}

enum Exit {
    Logout,
    Quit,
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    services: Services,
    language: RwLock<Language>,
}

impl TuiInputPort {
    pub fn new(services: Services, language: Language) -> Self {
        Self {
            services,
            language: RwLock::new(language),
        }
    }

    async fn lang(&self) -> Language {
        *self.language.read().await
    }

    async fn pick_language(&self) -> Result<(), DomainError> {
        let current = self.lang().await;
        let start = Language::ALL
            .iter()
            .position(|l| *l == current)
            .unwrap_or(0);
        let picked = ask(
            Select::new("Language", Language::ALL.to_vec())
                .with_starting_cursor(start)
                .prompt(),
        )?;
        if let Some(lang) = picked {
            *self.language.write().await = lang;
            info!(language = lang.code(), "language changed");
        }
        Ok(())
    }

    /// Login screen. `None` when the operator quits instead of signing in.
    async fn login(&self) -> Result<Option<User>, DomainError> {
        loop {
            let lang = self.lang().await;
            render::heading(translate(lang, "welcomeBack"));
            render::line(translate(lang, "signInSubtitle"));
            render::line(&format!("{}:", translate(lang, "demoCredentials")));
            for (label, email, password) in DEMO_CREDENTIALS {
                render::line(&format!("  {:<7} {} / {}", label, email, password));
            }

            let options = vec![
                translate(lang, "signIn").to_string(),
                "Language".to_string(),
                "Quit".to_string(),
            ];
            let Some(choice) = ask(Select::new(translate(lang, "hospitalOs"), options).raw_prompt())?
            else {
                return Ok(None);
            };
            match choice.index {
                0 => {}
                1 => {
                    self.pick_language().await?;
                    continue;
                }
                _ => return Ok(None),
            }

            let Some(email) = ask(Text::new(translate(lang, "email")).prompt())? else {
                continue;
            };
            let Some(password) = ask(
                Password::new(translate(lang, "password"))
                    .without_confirmation()
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .prompt(),
            )?
            else {
                continue;
            };

            let message = format!("{}...", translate(lang, "signIn"));
            match progress::with_spinner(&message, self.services.auth.login(&email, &password))
                .await
            {
                Ok(user) => return Ok(Some(user)),
                Err(e) => render::error(&e),
            }
        }
    }

    async fn main_menu(&self, user: &User) -> Result<Exit, DomainError> {
        let title = format!("MedCore · {}", user.name);
        loop {
            if !self.services.auth.is_authenticated().await {
                return Ok(Exit::Logout);
            }
            let lang = self.lang().await;
            let mut labels: Vec<String> = NAV.iter().map(|k| translate(lang, k).to_string()).collect();
            labels.push("Quit".to_string());

            let Some(choice) = ask(Select::new(&title, labels).with_page_size(10).raw_prompt())?
            else {
                return Ok(Exit::Quit);
            };

            let s = &self.services;
            let outcome = match NAV.get(choice.index).copied() {
                Some("dashboard") => pages::dashboard(s, lang).await,
                Some("patients") => pages::patients(s, lang).await,
                Some("doctors") => pages::doctors(s, lang).await,
                Some("appointments") => pages::appointments(s, lang).await,
                Some("billing") => pages::billing(s, lang).await,
                Some("aiAssistant") => pages::assistant(s, lang).await,
                Some("settings") => self.pick_language().await,
                Some("logout") => return Ok(Exit::Logout),
                _ => return Ok(Exit::Quit),
            };
            pages::report(outcome)?;
            pages::flush(s).await;
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let Some(user) = self.login().await? else {
                return Ok(());
            };
            let lang = self.lang().await;
            render::line(&format!("{}, {}", translate(lang, "welcomeUser"), user.name));

            match self.main_menu(&user).await? {
                Exit::Logout => {
                    self.services.auth.logout().await;
                    render::toasts(&self.services.notifier.drain().await);
                }
                Exit::Quit => return Ok(()),
            }
        }
    }
}
