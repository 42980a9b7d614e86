//! Captured page data consumed by the analyzers.
//!
//! A [`PageCapture`] is produced by the page traversal collaborator: one
//! [`StyleSample`] per visible, relevant element plus the page's style sheets.
//! Every property is optional; a property the element does not carry is `None`,
//! never an empty string.

use serde::{Deserialize, Serialize};

/// A captured page: style samples in traversal order plus style-rule sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCapture {
    /// The URL of the captured page
    pub url: Option<String>,
    /// The page title
    pub title: Option<String>,
    /// One entry per visited element, in traversal order
    #[serde(default)]
    pub samples: Vec<StyleSample>,
    /// Style sheets attached to the page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style_sources: Vec<StyleSource>,
}

impl PageCapture {
    pub fn from_samples(samples: Vec<StyleSample>) -> Self {
        Self {
            samples,
            ..Self::default()
        }
    }

    /// Drop empty or whitespace-only property values so absence is always `None`.
    pub fn normalize(&mut self) {
        for sample in &mut self.samples {
            sample.normalize();
        }
    }
}

/// Computed style properties of one element, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSample {
    /// Lowercase HTML tag name (e.g., "p", "h1", "button"); empty when unknown
    #[serde(default)]
    pub tag: String,
    /// Semantic hint derived from the element's classes (e.g., "body", "caption")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_hint: Option<String>,
    #[serde(default)]
    pub colors: ColorStyles,
    #[serde(default)]
    pub typography: TypographyStyles,
    #[serde(default)]
    pub spacing: SpacingStyles,
    #[serde(default)]
    pub borders: BorderStyles,
    #[serde(default)]
    pub shadows: ShadowStyles,
}

impl StyleSample {
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) {
        self.tag = self.tag.trim().to_ascii_lowercase();
        clean(&mut self.class_hint);
        self.colors.normalize();
        self.typography.normalize();
        self.spacing.normalize();
        self.borders.normalize();
        self.shadows.normalize();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorStyles {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_top_color: Option<String>,
    pub border_right_color: Option<String>,
    pub border_bottom_color: Option<String>,
    pub border_left_color: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

impl ColorStyles {
    fn normalize(&mut self) {
        for field in [
            &mut self.color,
            &mut self.background_color,
            &mut self.border_color,
            &mut self.border_top_color,
            &mut self.border_right_color,
            &mut self.border_bottom_color,
            &mut self.border_left_color,
            &mut self.fill,
            &mut self.stroke,
        ] {
            clean(field);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyStyles {
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub line_height: Option<String>,
    pub letter_spacing: Option<String>,
}

impl TypographyStyles {
    fn normalize(&mut self) {
        for field in [
            &mut self.font_family,
            &mut self.font_size,
            &mut self.font_weight,
            &mut self.line_height,
            &mut self.letter_spacing,
        ] {
            clean(field);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingStyles {
    pub margin: Option<String>,
    pub margin_top: Option<String>,
    pub margin_right: Option<String>,
    pub margin_bottom: Option<String>,
    pub margin_left: Option<String>,
    pub padding: Option<String>,
    pub padding_top: Option<String>,
    pub padding_right: Option<String>,
    pub padding_bottom: Option<String>,
    pub padding_left: Option<String>,
    pub gap: Option<String>,
    pub row_gap: Option<String>,
    pub column_gap: Option<String>,
}

impl SpacingStyles {
    fn normalize(&mut self) {
        for field in [
            &mut self.margin,
            &mut self.margin_top,
            &mut self.margin_right,
            &mut self.margin_bottom,
            &mut self.margin_left,
            &mut self.padding,
            &mut self.padding_top,
            &mut self.padding_right,
            &mut self.padding_bottom,
            &mut self.padding_left,
            &mut self.gap,
            &mut self.row_gap,
            &mut self.column_gap,
        ] {
            clean(field);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderStyles {
    pub border_width: Option<String>,
    pub border_style: Option<String>,
    pub border_radius: Option<String>,
}

impl BorderStyles {
    fn normalize(&mut self) {
        for field in [
            &mut self.border_width,
            &mut self.border_style,
            &mut self.border_radius,
        ] {
            clean(field);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowStyles {
    pub box_shadow: Option<String>,
    pub text_shadow: Option<String>,
}

impl ShadowStyles {
    fn normalize(&mut self) {
        clean(&mut self.box_shadow);
        clean(&mut self.text_shadow);
    }
}

/// A style sheet. `rules` is `None` when the sheet could not be read
/// (e.g., a cross-origin sheet whose rules are not exposed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSource {
    pub href: Option<String>,
    #[serde(default)]
    pub rules: Option<Vec<StyleRule>>,
}

/// A single style rule and its declarations in source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRule {
    pub selector: String,
    #[serde(default)]
    pub declarations: Vec<CssDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssDeclaration {
    pub property: String,
    pub value: String,
}

impl CssDeclaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

fn clean(field: &mut Option<String>) {
    if let Some(value) = field.as_mut() {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            *field = None;
        } else if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
}
