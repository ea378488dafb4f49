use crate::coverage::MatchPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CATALOG_PATH: &str = "data/parks_data.json";
const DEFAULT_AREA_DATA_PATH: &str = "data/area_data.json";
const DEFAULT_REGISTRY_BASE_URL: &str = "https://api.company-information.service.gov.uk";
const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REGISTRY_PAGE_SIZE: u16 = 100;
const MAX_REGISTRY_PAGE_SIZE: u16 = 100;

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
    pub data: DataConfig,
    pub registry: RegistryConfig,
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
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?,
            Err(_) => LogFormat::Compact,
        };

        let catalog_path = env::var("ARC_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH));
        let area_data_path = env::var("ARC_AREA_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_AREA_DATA_PATH));
        let match_policy = match env::var("ARC_AREA_MATCH_POLICY") {
            Ok(raw) => MatchPolicy::parse(&raw).ok_or(ConfigError::InvalidMatchPolicy(raw))?,
            Err(_) => MatchPolicy::default(),
        };

        let api_key = env::var("COMPANIES_HOUSE_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let base_url = env::var("COMPANIES_HOUSE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_REGISTRY_BASE_URL.to_string());
        let timeout_secs = match env::var("COMPANIES_HOUSE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidRegistryTimeout)?,
            Err(_) => DEFAULT_REGISTRY_TIMEOUT_SECS,
        };
        let page_size = match env::var("COMPANIES_HOUSE_PAGE_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|size| (1..=MAX_REGISTRY_PAGE_SIZE).contains(size))
                .ok_or(ConfigError::InvalidRegistryPageSize)?,
            Err(_) => DEFAULT_REGISTRY_PAGE_SIZE,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            data: DataConfig {
                catalog_path,
                area_data_path,
                match_policy,
            },
            registry: RegistryConfig {
                api_key,
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_secs(timeout_secs),
                page_size,
            },
        })
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

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Locations of the static park catalog and area coverage dataset.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub catalog_path: PathBuf,
    pub area_data_path: PathBuf,
    pub match_policy: MatchPolicy,
}

/// Companies House access. A missing key disables registry enrichment.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub page_size: u16,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidMatchPolicy(String),
    InvalidRegistryTimeout,
    InvalidRegistryPageSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT '{value}' must be 'compact' or 'pretty'")
            }
            ConfigError::InvalidMatchPolicy(value) => write!(
                f,
                "ARC_AREA_MATCH_POLICY '{value}' must be 'longest' or 'first'"
            ),
            ConfigError::InvalidRegistryTimeout => write!(
                f,
                "COMPANIES_HOUSE_TIMEOUT_SECS must be a positive number of seconds"
            ),
            ConfigError::InvalidRegistryPageSize => write!(
                f,
                "COMPANIES_HOUSE_PAGE_SIZE must be between 1 and {MAX_REGISTRY_PAGE_SIZE}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
