use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::evaluation::ScoringConfig;

const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

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

/// Which sentence-similarity model backs the coherence analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoherenceModel {
    /// No model; coherence falls back to its neutral score.
    Disabled,
    TermFrequency,
}

impl CoherenceModel {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "disabled" => Some(Self::Disabled),
            "term-frequency" | "term_frequency" | "tf" => Some(Self::TermFrequency),
            _ => None,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let allowed_origins = match env::var("APP_ALLOWED_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidChoice {
                var: "APP_LOG_FORMAT",
                value: raw,
            })?,
            Err(_) => LogFormat::Compact,
        };

        let defaults = ScoringConfig::default();
        let coherence_model = match env::var("APP_COHERENCE_MODEL") {
            Ok(raw) => CoherenceModel::parse(&raw).ok_or(ConfigError::InvalidChoice {
                var: "APP_COHERENCE_MODEL",
                value: raw,
            })?,
            Err(_) => CoherenceModel::Disabled,
        };

        let scoring = ScoringSettings {
            optimal_wpm_min: number_var("APP_OPTIMAL_WPM_MIN", defaults.optimal_wpm_min)?,
            optimal_wpm_max: number_var("APP_OPTIMAL_WPM_MAX", defaults.optimal_wpm_max)?,
            acceptable_wpm_min: number_var("APP_ACCEPTABLE_WPM_MIN", defaults.acceptable_wpm_min)?,
            acceptable_wpm_max: number_var("APP_ACCEPTABLE_WPM_MAX", defaults.acceptable_wpm_max)?,
            max_grammar_errors: number_var(
                "APP_MAX_GRAMMAR_ERRORS",
                defaults.max_grammar_errors_per_100_words,
            )?,
            coherence_model,
        };

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                allowed_origins,
            },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
                ansi: environment == AppEnvironment::Development,
            },
            scoring,
        })
    }

    /// Scoring thresholds handed to the engine. Invariants are checked when the engine is
    /// built, not here.
    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            optimal_wpm_min: self.scoring.optimal_wpm_min,
            optimal_wpm_max: self.scoring.optimal_wpm_max,
            acceptable_wpm_min: self.scoring.acceptable_wpm_min,
            acceptable_wpm_max: self.scoring.acceptable_wpm_max,
            max_grammar_errors_per_100_words: self.scoring.max_grammar_errors,
        }
    }
}

fn number_var(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CORS origins; a single `*` allows any origin.
    pub allowed_origins: Vec<String>,
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

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Full,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    pub ansi: bool,
}

/// Scoring thresholds and collaborator selection read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSettings {
    pub optimal_wpm_min: f64,
    pub optimal_wpm_max: f64,
    pub acceptable_wpm_min: f64,
    pub acceptable_wpm_max: f64,
    pub max_grammar_errors: f64,
    pub coherence_model: CoherenceModel,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str, value: String },
    InvalidChoice { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{var} must be a number, found '{value}'")
            }
            ConfigError::InvalidChoice { var, value } => {
                write!(f, "{var} has unsupported value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidChoice { .. } => None,
        }
    }
}
