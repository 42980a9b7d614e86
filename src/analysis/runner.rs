use crate::config::Config;
use crate::error::DteError;
use crate::types::{ColorPalette, DesignTokens, PageCapture, SpacingSystem, TypographySystem};
use crate::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ColorAnalyzer, SpacingAnalyzer, TypographyAnalyzer};

/// Which part of the design system an analyzer extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    Color,
    Typography,
    Spacing,
}

impl AnalyzerKind {
    pub const fn all() -> [AnalyzerKind; 3] {
        [
            AnalyzerKind::Color,
            AnalyzerKind::Typography,
            AnalyzerKind::Spacing,
        ]
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalyzerKind::Color => "color",
            AnalyzerKind::Typography => "typography",
            AnalyzerKind::Spacing => "spacing",
        })
    }
}

impl FromStr for AnalyzerKind {
    type Err = DteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "color" | "colors" => Ok(AnalyzerKind::Color),
            "typography" => Ok(AnalyzerKind::Typography),
            "spacing" => Ok(AnalyzerKind::Spacing),
            _ => Err(DteError::Config(format!("Unknown analyzer kind: {}", s))),
        }
    }
}

/// Output of a single analyzer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzerResult {
    Color(ColorPalette),
    Typography(TypographySystem),
    Spacing(SpacingSystem),
}

/// A pure reduction from a captured page to one token family.
pub trait Analyzer {
    fn kind(&self) -> AnalyzerKind;
    fn analyze(&self, capture: &PageCapture) -> AnalyzerResult;
}

/// Every analyzer, configured from `config`.
pub fn default_analyzers(config: &Config) -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(ColorAnalyzer::new(config.color.clone())),
        Box::new(TypographyAnalyzer::new(config.typography.clone())),
        Box::new(SpacingAnalyzer::new(config.spacing.clone())),
    ]
}

/// Run the selected analyzers (all of them when `selected` is empty).
///
/// Fails only when a requested kind has no registered analyzer.
pub fn run_analyzers(
    analyzers: &[Box<dyn Analyzer>],
    selected: &[AnalyzerKind],
    capture: &PageCapture,
) -> Result<DesignTokens> {
    let desired: Vec<AnalyzerKind> = if selected.is_empty() {
        AnalyzerKind::all().to_vec()
    } else {
        selected.to_vec()
    };

    let missing: Vec<AnalyzerKind> = desired
        .iter()
        .copied()
        .filter(|kind| !analyzers.iter().any(|a| a.kind() == *kind))
        .collect();

    if !missing.is_empty() {
        let names = missing
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DteError::Config(format!(
            "Requested analyzers not available: {}",
            names
        )));
    }

    let mut tokens = DesignTokens::default();

    for analyzer in analyzers {
        let kind = analyzer.kind();
        if !desired.contains(&kind) {
            continue;
        }

        match analyzer.analyze(capture) {
            AnalyzerResult::Color(palette) => {
                info!(
                    "color: {} clusters, {} neutrals, {} custom properties",
                    palette.all.len(),
                    palette.neutrals.len(),
                    palette.custom_properties.len()
                );
                tokens.colors = Some(palette);
            }
            AnalyzerResult::Typography(system) => {
                info!(
                    "typography: {} sizes, ratio {}",
                    system.scale.sizes.len(),
                    system
                        .scale
                        .ratio
                        .map(|m| m.ratio.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
                tokens.typography = Some(system);
            }
            AnalyzerResult::Spacing(system) => {
                info!(
                    "spacing: base unit {}px, {} named steps",
                    system.base_unit,
                    system.scale.len()
                );
                tokens.spacing = Some(system);
            }
        }
    }

    Ok(tokens)
}
