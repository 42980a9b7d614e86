use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analyzer tuning loaded from `config.toml`. Every field has a default so a
/// partial file only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub color: ColorConfig,
    pub typography: TypographyConfig,
    pub spacing: SpacingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// CIE76 ΔE below which two colors share a cluster.
    pub similarity_threshold: f32,
    /// Colors seen fewer times than this are treated as incidental.
    pub min_occurrences: usize,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 10.0,
            min_occurrences: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypographyConfig {
    /// Pixel size assumed for `rem`/`em` conversion.
    pub root_font_size: f64,
    /// Relative tolerance used when matching adjacent size ratios.
    pub scale_tolerance: f64,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            root_font_size: 16.0,
            scale_tolerance: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpacingConfig {
    /// Candidate grid units in preference order.
    pub base_unit_candidates: Vec<f64>,
    pub default_base_unit: f64,
    pub outlier_factor: f64,
    pub root_font_size: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            base_unit_candidates: vec![4.0, 8.0, 10.0, 16.0],
            default_base_unit: 8.0,
            outlier_factor: 1.5,
            root_font_size: 16.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Location of the per-user config file, if a home directory is known.
    pub fn central_config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").filter(|h| !h.is_empty())?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("dte")
                .join("config.toml"),
        )
    }

    /// Load config. Priority: explicit path > central config > defaults.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigLoadError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Config::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigLoadError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Config, ConfigLoadError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.color.similarity_threshold > 0.0) {
            return Err("color.similarity_threshold must be positive".to_string());
        }
        if self.color.min_occurrences == 0 {
            return Err("color.min_occurrences must be at least 1".to_string());
        }
        if !(self.typography.root_font_size > 0.0) || !(self.spacing.root_font_size > 0.0) {
            return Err("root_font_size must be positive".to_string());
        }
        if !(self.typography.scale_tolerance > 0.0 && self.typography.scale_tolerance < 1.0) {
            return Err("typography.scale_tolerance must be between 0 and 1".to_string());
        }
        if self.spacing.base_unit_candidates.is_empty() {
            return Err("spacing.base_unit_candidates must not be empty".to_string());
        }
        if self.spacing.base_unit_candidates.iter().any(|c| !(*c > 0.0)) {
            return Err("spacing.base_unit_candidates must all be positive".to_string());
        }
        if !(self.spacing.default_base_unit > 0.0) {
            return Err("spacing.default_base_unit must be positive".to_string());
        }
        if !(self.spacing.outlier_factor >= 0.0) {
            return Err("spacing.outlier_factor must not be negative".to_string());
        }
        Ok(())
    }
}
