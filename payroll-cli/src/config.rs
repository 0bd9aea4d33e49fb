//! Optional TOML configuration for the `payroll` binary.
//!
//! ```toml
//! [parameters]
//! peru = "params/peru.json"
//! ecuador = "params/ecuador.json"
//!
//! [defaults]
//! year = 2025
//! regime = "NORMAL"
//! health_scheme = "ESSALUD"
//!
//! [logging]
//! level = "debug"
//! file = "payroll.log"
//! ```
//!
//! Every table and key is optional. Relative paths are resolved against
//! the directory holding the configuration file.

use std::path::{Path, PathBuf};

use payroll_core::{HealthScheme, PeruRegime};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parameter documents that replace the built-in data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterFiles {
    pub peru: Option<PathBuf>,
    pub ecuador: Option<PathBuf>,
}

/// Values used when the command line leaves them out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputDefaults {
    pub year: Option<i32>,
    pub regime: Option<PeruRegime>,
    pub health_scheme: Option<HealthScheme>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// A bare level or any `EnvFilter` directive.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub parameters: ParameterFiles,
    pub defaults: InputDefaults,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads and parses the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match path.parent() {
            Some(base) => Ok(config.relative_to(base)),
            None => Ok(config),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn relative_to(
        mut self,
        base: &Path,
    ) -> Self {
        let resolve = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut().filter(|p| p.is_relative()) {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.parameters.peru);
        resolve(&mut self.parameters.ecuador);
        resolve(&mut self.logging.file);
        self
    }
}
