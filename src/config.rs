use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for deskhand
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeskhandConfig {
    /// Backend endpoint settings
    pub backend: BackendConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
    /// Console behavior settings
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Bearer token (can be set via env var)
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
    /// Fetch-all cache TTL in seconds
    pub cache_ttl_seconds: u64,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    pub requests_per_second: u32,
    /// Burst capacity
    pub burst_capacity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Enable structured tracing output
    pub tracing_enabled: bool,
    /// Log level
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    /// Interval for the fixed-interval refresh pages, in seconds
    pub refresh_interval_seconds: u64,
    /// Use in-memory seed data instead of the real backend
    pub use_seed_data: bool,
}

impl Default for DeskhandConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                endpoint: "http://localhost:4000/graphql".to_string(),
                token: None, // Read from env var when absent
                request_timeout_seconds: 30,
                cache_ttl_seconds: 60,
                rate_limit: RateLimitConfig {
                    requests_per_second: 5,
                    burst_capacity: 10,
                },
            },
            observability: ObservabilityConfig {
                tracing_enabled: true,
                log_level: "info".to_string(),
            },
            console: ConsoleConfig {
                refresh_interval_seconds: 30,
                use_seed_data: false,
            },
        }
    }
}

impl DeskhandConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (deskhand.toml)
    /// 3. Environment variables (prefixed with DESKHAND_)
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&DeskhandConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        if Path::new("deskhand.toml").exists() {
            builder = builder.add_source(File::with_name("deskhand"));
        }

        builder = builder.add_source(
            Environment::with_prefix("DESKHAND")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut deskhand_config: DeskhandConfig = config.try_deserialize()?;

        // Token is resolved from the environment when the file leaves it out
        if deskhand_config.backend.token.is_none() {
            if let Ok(token) = std::env::var("DESKHAND_BACKEND_TOKEN") {
                deskhand_config.backend.token = Some(token);
            } else if let Ok(token) = std::env::var("BACKEND_TOKEN") {
                deskhand_config.backend.token = Some(token);
            }
        }

        Ok(deskhand_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<DeskhandConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = DeskhandConfig::load_env_file();
        DeskhandConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static DeskhandConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}
