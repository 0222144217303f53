//! Shamir Configuration
//!
//! Shared configuration crate for the secret sharing workspace.
//!
//! Handles loading configuration from:
//! 1. SHAMIR_CONFIG env var (explicit path)
//! 2. ./shamir.toml (current directory)
//! 3. ~/.shamir/shamir.toml (user home)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{env, fs};

/// Global config instance for convenience access
pub static GLOBAL_CONFIG: OnceLock<ShamirConfig> = OnceLock::new();

const CONFIG_FILE_NAME: &str = "shamir.toml";
const CONFIG_DIR_NAME: &str = ".shamir";
const CONFIG_PATH_VAR: &str = "SHAMIR_CONFIG";

// ============================================================================
// Default Constants
// ============================================================================

pub const DEFAULT_THRESHOLD_K: usize = 2;
pub const DEFAULT_THRESHOLD_N: usize = 3;
pub const DEFAULT_PARALLEL_MIN_LEN: usize = 4096;

/// Share ids are nonzero bytes
const MAX_SHARES: usize = 255;

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShamirConfig {
    #[serde(default)]
    pub sharing: SharingConfig,
}

/// Split/combine tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingConfig {
    /// K used when the caller does not pick one
    #[serde(default = "default_threshold_k")]
    pub default_threshold: usize,
    /// N used when the caller does not pick one
    #[serde(default = "default_threshold_n")]
    pub default_shares: usize,
    /// Secrets with at least this many units are processed in parallel
    #[serde(default = "default_parallel_min_len")]
    pub parallel_min_len: usize,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD_K,
            default_shares: DEFAULT_THRESHOLD_N,
            parallel_min_len: DEFAULT_PARALLEL_MIN_LEN,
        }
    }
}

fn default_threshold_k() -> usize {
    DEFAULT_THRESHOLD_K
}
fn default_threshold_n() -> usize {
    DEFAULT_THRESHOLD_N
}
fn default_parallel_min_len() -> usize {
    DEFAULT_PARALLEL_MIN_LEN
}

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Set field from a variable if present and parseable
fn env_parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    field: &mut T,
) {
    if let Some(v) = lookup(key) {
        match v.parse() {
            Ok(parsed) => *field = parsed,
            Err(_) => log::warn!("Ignoring unparseable {}", key),
        }
    }
}

// ============================================================================
// Implementation
// ============================================================================

impl ShamirConfig {
    /// Load configuration from config file with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                log::info!("Loading config from: {}", path.display());
                Self::read_file(&path)?
            }
            None => {
                log::info!("No config file found, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without env overrides
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check SHAMIR_CONFIG env var
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            log::warn!("{} points to a missing file: {}", CONFIG_PATH_VAR, path.display());
        }

        // 2. Check ./shamir.toml (current directory)
        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        // 3. Check ~/.shamir/shamir.toml
        Self::default_config_path().filter(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key/value source
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        env_parse(&lookup, "SHAMIR_THRESHOLD_K", &mut self.sharing.default_threshold);
        env_parse(&lookup, "SHAMIR_THRESHOLD_N", &mut self.sharing.default_shares);
        env_parse(&lookup, "SHAMIR_PARALLEL_MIN_LEN", &mut self.sharing.parallel_min_len);
    }

    /// Check the defaults describe a usable K-of-N scheme
    pub fn validate(&self) -> Result<()> {
        let SharingConfig {
            default_threshold: k,
            default_shares: n,
            ..
        } = self.sharing;
        ensure!(
            (2..=n).contains(&k) && n <= MAX_SHARES,
            "invalid default threshold: k={k}, n={n} (require 2 <= k <= n <= {MAX_SHARES})"
        );
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }

    /// Get the global config instance, initializing it if necessary.
    ///
    /// Falls back to defaults if loading fails.
    pub fn global() -> &'static ShamirConfig {
        GLOBAL_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                log::warn!("Failed to load config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Initialize the global config with a specific instance.
    ///
    /// Returns `Err(config)` if already initialized.
    pub fn set_global(config: ShamirConfig) -> Result<(), ShamirConfig> {
        GLOBAL_CONFIG.set(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
