//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use medcore::adapters::ai::{GeminiAdapter, MockAiAdapter};
use medcore::adapters::memory::{MemoryRepo, seed};
use medcore::adapters::ui::tui::{Services, TuiInputPort};
use medcore::ports::{AiPort, HospitalRepo, InputPort};
use medcore::shared::config::AppConfig;
use medcore::shared::i18n::Language;
use medcore::usecases::{
    AppointmentService, AssistantService, AuthService, BillingService, DashboardService,
    DoctorService, NotificationCenter, PatientService,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    // stderr keeps log lines out of the prompts
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    medcore::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });

    let language = match cfg.language.as_deref().map(str::parse::<Language>) {
        Some(Ok(lang)) => lang,
        Some(Err(e)) => {
            warn!(error = %e, "falling back to English");
            Language::default()
        }
        None => Language::default(),
    };

    // --- AI backend ---
    let ai: Arc<dyn AiPort> = if cfg.is_ai_mocked() {
        warn!("MEDCORE_AI_MOCK set, using mock AI adapter");
        Arc::new(MockAiAdapter::new())
    } else {
        if !cfg.is_ai_configured() {
            warn!("no Gemini API key (MEDCORE_AI_API_KEY / GEMINI_API_KEY); assistant replies will report it");
        }
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "AI assistant uses Gemini adapter"
        );
        Arc::new(GeminiAdapter::new(
            cfg.ai_api_url_or_default(),
            cfg.ai_api_key().unwrap_or_default(),
        ))
    };

    // --- Store & notifications ---
    let repo: Arc<dyn HospitalRepo> = Arc::new(MemoryRepo::seeded());
    let notifier = Arc::new(NotificationCenter::new(Duration::from_millis(
        cfg.notification_ttl_ms_or_default(),
    )));
    let reports_dir = PathBuf::from(cfg.reports_dir_or_default());
    info!(path = %reports_dir.display(), "reports directory");

    // --- Services ---
    let patients = Arc::new(PatientService::new(
        Arc::clone(&repo),
        Arc::clone(&notifier),
        Arc::clone(&ai),
        reports_dir.clone(),
    ));
    let services = Services {
        auth: Arc::new(AuthService::new(
            seed::users(),
            Duration::from_millis(cfg.login_delay_ms_or_default()),
        )),
        dashboard: Arc::new(DashboardService::new(Arc::clone(&repo))),
        doctors: Arc::new(DoctorService::new(Arc::clone(&repo), Arc::clone(&notifier))),
        appointments: Arc::new(AppointmentService::new(
            Arc::clone(&repo),
            Arc::clone(&notifier),
        )),
        billing: Arc::new(BillingService::new(
            Arc::clone(&repo),
            Arc::clone(&notifier),
            Duration::from_millis(cfg.payment_delay_ms_or_default()),
            reports_dir,
        )),
        assistant: Arc::new(AssistantService::new(
            Arc::clone(&ai),
            Arc::clone(&repo),
            Arc::clone(&patients),
            cfg.ai_model_or_default(),
        )),
        patients,
        notifier,
    };

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(services, language));

    // --- Run (login -> main menu) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    info!("session closed");
    Ok(())
}
