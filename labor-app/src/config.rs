//! Runtime configuration.
//!
//! Values come from an optional TOML file; command-line flags override them.
//!
//! ```toml
//! delay_ms = 0
//! record_history = true
//!
//! [store]
//! backend = "file"
//! data_dir = "/var/lib/labor"
//!
//! [log]
//! level = "debug"
//! file = "labor.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use labor_core::CalculatorKind;
use labor_core::store::StoreConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::workflow::{ADVICE_DELAY, default_delay};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub backend: String,
    /// Only used by the `file` backend.
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            data_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    /// Filter directive; `RUST_LOG` applies when unset.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub store: StoreSection,
    pub log: LogSection,
    /// Fixed delay before every calculation. Unset means the per-calculator
    /// default.
    pub delay_ms: Option<u64>,
    pub record_history: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreSection::default(),
            log: LogSection::default(),
            delay_ms: None,
            record_history: true,
        }
    }
}

/// Values given on the command line. `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub delay_ms: Option<u64>,
    pub no_history: bool,
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`. A missing file is an error since it was asked for.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn apply(
        mut self,
        overrides: ConfigOverrides,
    ) -> Self {
        if let Some(backend) = overrides.backend {
            self.store.backend = backend;
        }
        if overrides.data_dir.is_some() {
            self.store.data_dir = overrides.data_dir;
        }
        if overrides.log_level.is_some() {
            self.log.level = overrides.log_level;
        }
        if overrides.log_file.is_some() {
            self.log.file = overrides.log_file;
        }
        if overrides.delay_ms.is_some() {
            self.delay_ms = overrides.delay_ms;
        }
        if overrides.no_history {
            self.record_history = false;
        }
        self
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store.backend.clone(),
            location: self
                .store
                .data_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn delay_for(
        &self,
        kind: CalculatorKind,
    ) -> Duration {
        match self.delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => default_delay(kind),
        }
    }

    pub fn advice_delay(&self) -> Duration {
        self.delay_ms.map_or(ADVICE_DELAY, Duration::from_millis)
    }
}
