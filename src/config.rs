use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the counter service
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BurrCounterConfig {
    /// Application identity
    pub app: AppConfig,
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Title reported by the health check
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json_logs: bool,
}

impl Default for BurrCounterConfig {
    fn default() -> Self {
        Self {
            app: AppConfig {
                title: "Burr Counter App".to_string(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: true,
            },
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BurrCounterConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (burr-counter.toml)
    /// 3. Environment variables (BURR_COUNTER__SECTION__KEY)
    /// 4. PORT, as set by most serverless and container hosts
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("burr-counter.toml").exists() {
            builder = builder.add_source(File::with_name("burr-counter"));
        }

        builder = builder.add_source(
            Environment::with_prefix("BURR_COUNTER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut counter_config: BurrCounterConfig = config.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            counter_config.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT value '{}': {}", port, e))?;
        }

        Ok(counter_config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
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
static CONFIG: std::sync::LazyLock<Result<BurrCounterConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = BurrCounterConfig::load_env_file();
        BurrCounterConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static BurrCounterConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let config = config()?;
    tracing::info!(
        title = %config.app.title,
        bind = %config.server.bind_address(),
        "Configuration loaded successfully"
    );
    Ok(())
}
