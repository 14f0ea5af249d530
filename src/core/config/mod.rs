//! Configuration types and management for identshrink.
//!
//! The renaming rules are fixed. Only the host-runtime names that must
//! survive and the resource bounds of a run are tunable.

pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, RenameError};

pub use validation::{validate_identifier, validate_identifiers, validate_positive_usize};

/// Main configuration for a rename run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Names that the hosting runtime requires to survive renaming
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Resource bounds for concurrent reference lookups
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,

    /// Console progress display
    #[serde(default)]
    pub progress: ProgressConfig,
}

/// Configuration construction and I/O methods for [`RenameConfig`].
impl RenameConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            RenameError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            RenameError::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            RenameError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        self.concurrency.validate()?;
        Ok(())
    }
}

/// Host-runtime calling convention: names that are never renamed.
///
/// `Program`, `Save` and `Main` are protected regardless of these settings;
/// the names listed here are protected in addition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Name of the entry-point type the host instantiates, if not `Program`
    #[serde(default = "PolicyConfig::default_entry_type_name")]
    pub entry_type_name: String,

    /// Additional type names that must keep their name
    #[serde(default)]
    pub protected_type_names: Vec<String>,

    /// Method names the host calls by name
    #[serde(default = "PolicyConfig::default_protected_method_names")]
    pub protected_method_names: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            entry_type_name: Self::default_entry_type_name(),
            protected_type_names: Vec::new(),
            protected_method_names: Self::default_protected_method_names(),
        }
    }
}

impl PolicyConfig {
    fn default_entry_type_name() -> String {
        "Program".to_string()
    }

    fn default_protected_method_names() -> Vec<String> {
        vec!["Save".to_string(), "Main".to_string()]
    }

    /// Validate policy names
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.entry_type_name, "entry_type_name")?;
        validate_identifiers(&self.protected_type_names, "protected_type_names")?;
        validate_identifiers(&self.protected_method_names, "protected_method_names")?;
        Ok(())
    }
}

/// Concurrency limits for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcurrencyConfig {
    /// Maximum number of whole-program reference lookups in flight at once
    #[serde(default = "ConcurrencyConfig::default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: Self::default_max_concurrent_lookups(),
        }
    }
}

impl ConcurrencyConfig {
    const fn default_max_concurrent_lookups() -> usize {
        64
    }

    /// Validate concurrency limits
    pub fn validate(&self) -> Result<()> {
        validate_positive_usize(self.max_concurrent_lookups, "max_concurrent_lookups")
    }
}

/// Progress display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Draw a console spinner while the pass runs
    #[serde(default = "ProgressConfig::default_enabled")]
    pub enabled: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
        }
    }
}

impl ProgressConfig {
    const fn default_enabled() -> bool {
        true
    }
}
