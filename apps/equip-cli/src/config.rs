//! # Shell Configuration
//!
//! Configuration management for the inventory shell.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --db /srv/lab/equip.db   --json                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     EQUIP_DB_PATH=/srv/lab/equip.db                                    │
//! │     EQUIP_LOAN_POLICY=strict                                           │
//! │     EQUIP_OUTPUT=json                                                  │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/equip/equip.toml (Linux)                                 │
//! │     ~/Library/Application Support/org.equip.equip/equip.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     platform data dir, idempotent policy, table output                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # equip.toml
//! [database]
//! path = "/srv/lab/equip.db"
//! max_connections = 5
//! busy_timeout_secs = 5
//!
//! [loans]
//! policy = "idempotent"  # idempotent | strict
//!
//! [output]
//! format = "table"       # table | json
//! ```

use directories::ProjectDirs;
use equip_core::TransitionPolicy;
use equip_db::DbConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "equip.toml";

/// Name of the database file inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "equip.db";

// =============================================================================
// Output Format
// =============================================================================

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned columns for people.
    #[default]
    Table,
    /// One JSON document per command for scripts.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::Config(format!(
                "Unknown output format: '{}'. Valid options: table, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a writer waits on a locked database.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_busy_timeout() -> u64 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

/// `[loans]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanSettings {
    /// Same-state toggle handling.
    #[serde(default)]
    pub policy: TransitionPolicy,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete shell configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub loans: LoanSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`equip.toml`)
    /// 3. Environment variables
    ///
    /// A missing file at the default location is not an error; a missing
    /// file passed explicitly is.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.database.max_connections == 0 {
            return Err(CliError::Config(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.database.busy_timeout_secs == 0 {
            return Err(CliError::Config(
                "database.busy_timeout_secs must be greater than 0".into(),
            ));
        }

        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(CliError::Config("database.path must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("EQUIP_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(policy) = lookup("EQUIP_LOAN_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding loan policy from environment");
                    self.loans.policy = parsed;
                }
                Err(_) => warn!(policy = %policy, "Unknown loan policy in environment"),
            }
        }

        if let Some(format) = lookup("EQUIP_OUTPUT") {
            match format.parse() {
                Ok(parsed) => self.output.format = parsed,
                Err(_) => warn!(format = %format, "Unknown output format in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "equip", "equip").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the database file path.
    ///
    /// ## Platform-Specific Defaults
    /// - **Linux**: `~/.local/share/equip/equip.db`
    /// - **macOS**: `~/Library/Application Support/org.equip.equip/equip.db`
    /// - **Windows**: `%APPDATA%\equip\equip\data\equip.db`
    pub fn database_path(&self) -> CliResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        ProjectDirs::from("org", "equip", "equip")
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or_else(|| {
                CliError::Config("No home directory; set database.path or EQUIP_DB_PATH".into())
            })
    }

    /// Builds the pool configuration, creating the parent directory.
    pub fn db_config(&self) -> CliResult<DbConfig> {
        let path = self.database_path()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(DbConfig::new(path)
            .max_connections(self.database.max_connections)
            .busy_timeout(Duration::from_secs(self.database.busy_timeout_secs)))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn policy(&self) -> TransitionPolicy {
        self.loans.policy
    }

    pub fn format(&self) -> OutputFormat {
        self.output.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.policy(), TransitionPolicy::Idempotent);
        assert_eq!(config.format(), OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [database]
            path = "/srv/lab/equip.db"
            busy_timeout_secs = 2

            [loans]
            policy = "strict"
            "#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/srv/lab/equip.db")
        );
        assert_eq!(config.database.busy_timeout_secs, 2);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.policy(), TransitionPolicy::Strict);
        assert_eq!(config.format(), OutputFormat::Table);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(dir.path().join("nope.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[loans]\npolicy = \"sometimes\"").unwrap();

        let result = AppConfig::load(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::ConfigParse(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("EQUIP_DB_PATH", "/tmp/override.db"),
            ("EQUIP_LOAN_POLICY", "strict"),
            ("EQUIP_OUTPUT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/override.db")));
        assert_eq!(config.policy(), TransitionPolicy::Strict);
        assert_eq!(config.format(), OutputFormat::Json);
    }

    #[test]
    fn test_unknown_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "EQUIP_LOAN_POLICY").then(|| "sometimes".to_string()));
        assert_eq!(config.policy(), TransitionPolicy::Idempotent);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        config.database.max_connections = 1;
        config.database.path = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_db_config_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(DATABASE_FILE_NAME);

        let mut config = AppConfig::default();
        config.database.path = Some(path.clone());
        let db_config = config.db_config().unwrap();

        assert_eq!(db_config.database_path, path);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("policy = \"idempotent\""));
    }
}
