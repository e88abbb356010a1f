//! Configuration management for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use claimlens_verifier::VerifierConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// CLI configuration.
///
/// Loaded from a toml file; every field has a sensible default so a
/// missing file just means defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database path
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Verification tolerances
    #[serde(default)]
    pub verifier: VerifierToml,
}

/// Verifier tolerance section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierToml {
    /// Relative error accepted as VERIFIED
    #[serde(default = "default_tolerance_verified")]
    pub tolerance_verified: f64,

    /// Relative error accepted as APPROXIMATELY_CORRECT
    #[serde(default = "default_tolerance_approx")]
    pub tolerance_approx: f64,

    /// Relative error boundary between MISLEADING and INCORRECT
    #[serde(default = "default_tolerance_misleading")]
    pub tolerance_misleading: f64,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("claimlens.db")
}

fn default_tolerance_verified() -> f64 {
    0.02
}

fn default_tolerance_approx() -> f64 {
    0.10
}

fn default_tolerance_misleading() -> f64 {
    0.25
}

impl Default for VerifierToml {
    fn default() -> Self {
        Self {
            tolerance_verified: default_tolerance_verified(),
            tolerance_approx: default_tolerance_approx(),
            tolerance_misleading: default_tolerance_misleading(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            verifier: VerifierToml::default(),
        }
    }
}

impl Config {
    /// Default configuration file path (`~/.claimlens/config.toml`)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".claimlens").join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicitly given path must exist; otherwise the default path
    /// is used when present, and built-in defaults when it is not.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            let contents = fs::read_to_string(path).map_err(|e| {
                CliError::Config(format!("Cannot read {}: {}", path.display(), e))
            })?;
            return Self::parse(&contents);
        }

        let path = Self::default_path()?;
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Self::parse(&contents)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| CliError::Config(format!("Invalid config file: {}", e)))
    }

    /// The verifier configuration this file describes
    pub fn verifier_config(&self) -> VerifierConfig {
        VerifierConfig {
            tolerance_verified: self.verifier.tolerance_verified,
            tolerance_approx: self.verifier.tolerance_approx,
            tolerance_misleading: self.verifier.tolerance_misleading,
        }
    }
}
