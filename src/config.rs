use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND_URL_DEVELOPMENT: &str = "http://127.0.0.1:8000/api";
const DEFAULT_BACKEND_URL_PRODUCTION: &str = "https://absen.example.com/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Espera máxima de la geolocalización antes de reportar timeout
    pub geolocation_timeout_ms: u32,
    pub notification_poll_seconds: u32,
    pub network_timeout_seconds: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: DEFAULT_BACKEND_URL_DEVELOPMENT.to_string(),
            backend_url_production: DEFAULT_BACKEND_URL_PRODUCTION.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            geolocation_timeout_ms: 10_000,
            notification_poll_seconds: 60,
            network_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            geolocation_timeout_ms: parse_or(
                option_env!("GEOLOCATION_TIMEOUT_MS"),
                defaults.geolocation_timeout_ms,
            ),
            notification_poll_seconds: parse_or(
                option_env!("NOTIFICATION_POLL_SECONDS"),
                defaults.notification_poll_seconds,
            ),
            network_timeout_seconds: parse_or(
                option_env!("NETWORK_TIMEOUT_SECONDS"),
                defaults.network_timeout_seconds,
            ),
        }
    }

    /// URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Intervalo de polling de notificaciones en milisegundos (mínimo 5 s)
    pub fn notification_poll_interval_ms(&self) -> u32 {
        self.notification_poll_seconds.max(5).saturating_mul(1000)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_follows_environment() {
        let mut config = AppConfig::default();
        assert_eq!(config.backend_url(), DEFAULT_BACKEND_URL_DEVELOPMENT);

        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), DEFAULT_BACKEND_URL_PRODUCTION);
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("15000"), 10_000u32), 15_000);
        assert_eq!(parse_or(Some("quince"), 10_000u32), 10_000);
        assert_eq!(parse_or(None, true), true);
        assert_eq!(parse_or(Some(" false "), true), false);
    }

    #[test]
    fn poll_interval_has_a_floor() {
        let mut config = AppConfig::default();
        config.notification_poll_seconds = 1;
        assert_eq!(config.notification_poll_interval_ms(), 5_000);
        config.notification_poll_seconds = 60;
        assert_eq!(config.notification_poll_interval_ms(), 60_000);
    }
}
