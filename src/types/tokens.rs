//! Design token types produced by the analyzers.
//!
//! These are the engine's output contract:
//! - [`ColorPalette`] - Clustered colors with semantic roles
//! - [`TypographySystem`] - Fonts, type scale, weights and heading styles
//! - [`SpacingSystem`] - Base unit and named spacing scale

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::core::{FrequencyEntry, ModularScaleMatch, Rgb, Stats};

/// Output of every analyzer that ran. Analyzers that were not selected are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPalette>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographySystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingSystem>,
}

// ============================================================================
// Color Types
// ============================================================================

/// Where on an element a color was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorUsage {
    Text,
    Background,
    Border,
    Fill,
    Stroke,
}

/// One normalized color observed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    /// Canonical `#RRGGBB` uppercase code
    pub hex: String,
    pub rgb: Rgb,
    /// Number of times the color was observed across all samples
    pub count: usize,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub usages: BTreeSet<ColorUsage>,
}

/// Perceptually indistinguishable colors grouped around their most frequent member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorCluster {
    pub centroid: ColorInfo,
    pub colors: Vec<ColorInfo>,
    pub total_count: usize,
}

/// Semantic status colors; each slot holds at most one cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ColorCluster>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<ColorCluster>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ColorCluster>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<ColorCluster>,
}

/// A `--*` custom property whose value looks like a color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssCustomProperty {
    pub name: String,
    pub value: String,
    pub selector: String,
}

/// Labeled palette. A cluster holds at most one role; `all` always lists every cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<ColorCluster>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<ColorCluster>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accents: Vec<ColorCluster>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neutrals: Vec<ColorCluster>,
    #[serde(default)]
    pub semantic: SemanticColors,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_properties: Vec<CssCustomProperty>,
    #[serde(default)]
    pub all: Vec<ColorCluster>,
}

// ============================================================================
// Typography Types
// ============================================================================

/// One distinct font size and where it was used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizeObservation {
    /// Size normalized to pixels (always > 0)
    pub px: f64,
    /// The first raw CSS value seen for this size
    pub raw: String,
    pub count: usize,
    /// Tag names and class hints of elements using this size
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub contexts: BTreeSet<String>,
}

/// Rungs of the named type scale, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeStep {
    #[serde(rename = "xs")]
    Xs,
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xl2,
    #[serde(rename = "3xl")]
    Xl3,
    #[serde(rename = "4xl")]
    Xl4,
}

impl TypeStep {
    pub const fn label(self) -> &'static str {
        match self {
            TypeStep::Xs => "xs",
            TypeStep::Sm => "sm",
            TypeStep::Base => "base",
            TypeStep::Lg => "lg",
            TypeStep::Xl => "xl",
            TypeStep::Xl2 => "2xl",
            TypeStep::Xl3 => "3xl",
            TypeStep::Xl4 => "4xl",
        }
    }
}

/// Named font-size scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScale {
    /// Size the named rungs are bucketed against (16 when nothing qualifies)
    pub base_size: f64,
    /// Named rungs; every value is an observed size
    #[serde(default)]
    pub rungs: BTreeMap<TypeStep, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<ModularScaleMatch>,
    /// Every distinct observed size, ascending
    #[serde(default)]
    pub sizes: Vec<f64>,
}

/// Heading levels H1-H6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            "h4" => Some(HeadingLevel::H4),
            "h5" => Some(HeadingLevel::H5),
            "h6" => Some(HeadingLevel::H6),
            _ => None,
        }
    }
}

/// Snapshot of the computed typography of the first heading at a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingStyle {
    pub level: HeadingLevel,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub line_height: Option<String>,
    pub letter_spacing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographySystem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub families: Vec<FrequencyEntry<String>>,
    pub scale: TypeScale,
    /// Distinct sizes, most frequent first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub font_sizes: Vec<FontSizeObservation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<FrequencyEntry<u16>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_heights: Vec<FrequencyEntry<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<HeadingStyle>,
}

// ============================================================================
// Spacing Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingUsage {
    Margin,
    Padding,
    Gap,
}

/// One distinct spacing magnitude and its usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingObservation {
    /// Magnitude in pixels (always > 0)
    pub px: f64,
    pub count: usize,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub usages: BTreeSet<SpacingUsage>,
}

/// Rungs of the named spacing scale, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpacingStep {
    #[serde(rename = "xs")]
    Xs,
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xl2,
    #[serde(rename = "3xl")]
    Xl3,
    #[serde(rename = "4xl")]
    Xl4,
    #[serde(rename = "5xl")]
    Xl5,
}

impl SpacingStep {
    pub const fn all() -> [SpacingStep; 9] {
        [
            SpacingStep::Xs,
            SpacingStep::Sm,
            SpacingStep::Md,
            SpacingStep::Lg,
            SpacingStep::Xl,
            SpacingStep::Xl2,
            SpacingStep::Xl3,
            SpacingStep::Xl4,
            SpacingStep::Xl5,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            SpacingStep::Xs => "xs",
            SpacingStep::Sm => "sm",
            SpacingStep::Md => "md",
            SpacingStep::Lg => "lg",
            SpacingStep::Xl => "xl",
            SpacingStep::Xl2 => "2xl",
            SpacingStep::Xl3 => "3xl",
            SpacingStep::Xl4 => "4xl",
            SpacingStep::Xl5 => "5xl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingSystem {
    /// Inferred grid unit in pixels
    pub base_unit: f64,
    /// Named rungs; every value is an integer multiple of `base_unit`
    #[serde(default)]
    pub scale: BTreeMap<SpacingStep, String>,
    /// Every distinct spacing value, most frequent first
    #[serde(default)]
    pub all_values: Vec<SpacingObservation>,
    /// Statistics over all observed values with outliers removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}
