use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment
/// variables. CLI flags layer on top of this the same way each stage
/// command does — see `cli::commands`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub datalake_root: PathBuf,
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub default_brand: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: PathBuf::from("./itx.log"),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_brand: "VISA".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` and then environment
    /// variables; environment variables take precedence. Matches the
    /// `ITX_*` contract of spec.md §6: `ITX_DATALAKE_PATH`,
    /// `ITX_DATABASE_PATH`, `ITX_LOG_LEVEL`, `ITX_LOG_PATH`.
    pub fn load() -> Result<Self, ConfigError> {
        let logging = LoggingConfig::default();
        let processing = ProcessingConfig::default();

        let config = Config::builder()
            .set_default("paths.datalake_root", "./datalake")?
            .set_default("paths.database_path", "./metadata.db")?
            .set_default("logging.level", logging.level)?
            .set_default("logging.path", logging.path.to_string_lossy().to_string())?
            .set_default("processing.default_brand", processing.default_brand)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("ITX").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // The teacher's convention of layering specific env var names over
        // the generic config::Environment prefix — here the `ITX_*` names
        // spec.md §6 fixes verbatim (no `__` nesting).
        if let Ok(path) = env::var("ITX_DATALAKE_PATH") {
            app_config.paths.datalake_root = PathBuf::from(path);
        }
        if let Ok(path) = env::var("ITX_DATABASE_PATH") {
            app_config.paths.database_path = PathBuf::from(path);
        }
        if let Ok(level) = env::var("ITX_LOG_LEVEL") {
            app_config.logging.level = level;
        }
        if let Ok(path) = env::var("ITX_LOG_PATH") {
            app_config.logging.path = PathBuf::from(path);
        }

        Ok(app_config)
    }

    /// Sensible defaults for CLI argument fallbacks when no config file or
    /// environment variables are present.
    pub fn get_defaults() -> Self {
        Self {
            paths: PathsConfig {
                datalake_root: PathBuf::from("./datalake"),
                database_path: PathBuf::from("./metadata.db"),
            },
            logging: LoggingConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_non_empty() {
        let config = AppConfig::get_defaults();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.processing.default_brand, "VISA");
    }
}
