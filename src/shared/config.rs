//! Application configuration. AI credentials, paths, simulated delays.

use serde::Deserialize;

/// Default Gemini REST root.
pub const DEFAULT_AI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Toasts disappear after this long unless dismissed earlier.
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 4000;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // AI Assistant Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Gemini API key. Read from MEDCORE_AI_API_KEY, then GEMINI_API_KEY, then API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Gemini REST root. Read from MEDCORE_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Default assistant model. Read from MEDCORE_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Use the offline mock adapter instead of Gemini. Read from MEDCORE_AI_MOCK.
    #[serde(default)]
    pub ai_mock: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Console
    // ─────────────────────────────────────────────────────────────────────────
    /// Where receipts and patient reports are written. Read from MEDCORE_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,

    /// Initial UI language code (en, am, ti). Read from MEDCORE_LANGUAGE.
    #[serde(default)]
    pub language: Option<String>,

    /// Simulated sign-in latency. Read from MEDCORE_LOGIN_DELAY_MS.
    #[serde(default)]
    pub login_delay_ms: Option<u64>,

    /// Simulated payment gateway / bank transfer latency. Read from MEDCORE_PAYMENT_DELAY_MS.
    #[serde(default)]
    pub payment_delay_ms: Option<u64>,

    /// Toast lifetime. Read from MEDCORE_NOTIFICATION_TTL_MS.
    #[serde(default)]
    pub notification_ttl_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("MEDCORE").try_parsing(true));
        if let Ok(path) = std::env::var("MEDCORE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the Gemini API key if configured. Blank values count as unset.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Returns the Gemini REST root. Defaults to the public v1beta endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_API_URL.to_string())
    }

    /// Returns the default model id. Defaults to "gemini-2.5-flash".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| crate::usecases::prompts::DEFAULT_MODEL.to_string())
    }

    /// Returns true when the offline mock adapter was requested.
    pub fn is_ai_mocked(&self) -> bool {
        self.ai_mock.unwrap_or(false)
    }

    /// Returns true if a Gemini key is present.
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }

    pub fn reports_dir_or_default(&self) -> String {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| "./reports".to_string())
    }

    pub fn login_delay_ms_or_default(&self) -> u64 {
        self.login_delay_ms.unwrap_or(1000)
    }

    pub fn payment_delay_ms_or_default(&self) -> u64 {
        self.payment_delay_ms.unwrap_or(2000)
    }

    pub fn notification_ttl_ms_or_default(&self) -> u64 {
        self.notification_ttl_ms
            .unwrap_or(DEFAULT_NOTIFICATION_TTL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.ai_api_url_or_default(), DEFAULT_AI_API_URL);
        assert_eq!(cfg.ai_model_or_default(), "gemini-2.5-flash");
        assert_eq!(cfg.reports_dir_or_default(), "./reports");
        assert_eq!(cfg.login_delay_ms_or_default(), 1000);
        assert_eq!(cfg.payment_delay_ms_or_default(), 2000);
        assert_eq!(cfg.notification_ttl_ms_or_default(), 4000);
        assert!(!cfg.is_ai_mocked());
    }

    #[test]
    fn test_blank_key_is_unset() {
        let cfg = AppConfig {
            ai_api_key: Some("   ".into()),
            ..Default::default()
        };
        // Blank explicit key falls through to the env fallbacks, which are
        // then filtered the same way.
        if std::env::var("GEMINI_API_KEY").is_err() && std::env::var("API_KEY").is_err() {
            assert!(!cfg.is_ai_configured());
        }
    }
}
