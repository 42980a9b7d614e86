use std::path::Path;

use dte_lib::{Config, DteError};

/// Analyzer settings given on the command line. `None` defers to the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzeOverrides {
    pub similarity_threshold: Option<f32>,
    pub min_occurrences: Option<usize>,
    pub root_font_size: Option<f64>,
}

/// Merge CLI overrides into the loaded config, preferring CLI values when given.
///
/// The merged config is validated again so a bad flag is reported like a bad
/// config value.
pub fn resolve_analyze_config(
    mut config: Config,
    overrides: &AnalyzeOverrides,
) -> Result<Config, DteError> {
    if let Some(threshold) = overrides.similarity_threshold {
        config.color.similarity_threshold = threshold;
    }
    if let Some(min) = overrides.min_occurrences {
        config.color.min_occurrences = min;
    }
    if let Some(root) = overrides.root_font_size {
        config.typography.root_font_size = root;
        config.spacing.root_font_size = root;
    }

    config
        .validate()
        .map_err(|e| DteError::Config(format!("Invalid settings: {}", e)))?;
    Ok(config)
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/dte/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, DteError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        DteError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        DteError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective config as a single-line string.
pub fn format_effective_config(config: &Config, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let candidates = config
        .spacing
        .base_unit_candidates
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("/");
    format!(
        "Effective config [{source}]: color: threshold={:.1}, min-occurrences={}, typography: root={}px, tolerance={:.2}, spacing: candidates={}, default={}px, outlier-factor={:.1}",
        config.color.similarity_threshold,
        config.color.min_occurrences,
        config.typography.root_font_size,
        config.typography.scale_tolerance,
        candidates,
        config.spacing.default_base_unit,
        config.spacing.outlier_factor,
    )
}
