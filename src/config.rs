use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "https://take-home-test-api.nutech-integrasi.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub history_page_size: usize,
    pub session: SessionConfig,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            history_page_size: 5,
            session: SessionConfig::default(),
            ui_config: UIConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub token_cookie_name: String,
    pub token_max_age_seconds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_cookie_name: "token".to_string(),
            // 12 horas
            token_max_age_seconds: 60 * 60 * 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub alert_dismiss_ms: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            alert_dismiss_ms: 3000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: option_env!("API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            history_page_size: option_env!("HISTORY_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size: &usize| *size > 0)
                .unwrap_or(defaults.history_page_size),
            session: SessionConfig {
                token_cookie_name: option_env!("TOKEN_COOKIE_NAME")
                    .unwrap_or("token").to_string(),
                token_max_age_seconds: option_env!("TOKEN_MAX_AGE_SECONDS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.session.token_max_age_seconds),
            },
            ui_config: UIConfig {
                alert_dismiss_ms: option_env!("ALERT_DISMISS_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.ui_config.alert_dismiss_ms),
            },
        }
    }

    /// URL base de la API REST
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Nivel máximo de log según la configuración
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
