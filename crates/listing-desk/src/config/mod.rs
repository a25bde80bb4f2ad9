use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub timeouts: TimeoutConfig,
    pub content: ContentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let upload_secs = parse_timeout("APP_UPLOAD_TIMEOUT_SECS")?;
        let content_secs = parse_timeout("APP_CONTENT_TIMEOUT_SECS")?;

        let api_key = env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            timeouts: TimeoutConfig {
                upload_secs,
                content_secs,
            },
            content: ContentConfig { api_key, model },
        })
    }
}

const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

fn parse_timeout(var: &str) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidTimeout {
            var: var.to_string(),
        }),
        Err(_) => Ok(DEFAULT_CALL_TIMEOUT_SECS),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Fixed ceilings for the outbound media and content calls. Expiry is
/// treated as a generic failure by the callers.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutConfig {
    pub upload_secs: u64,
    pub content_secs: u64,
}

impl TimeoutConfig {
    pub fn upload(&self) -> Duration {
        Duration::from_secs(self.upload_secs)
    }

    pub fn content(&self) -> Duration {
        Duration::from_secs(self.content_secs)
    }
}

/// Generative content backend credentials. Without a key the content
/// service runs on fallback copy alone.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout { var: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout { var } => {
                write!(f, "{var} must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
