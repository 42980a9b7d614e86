use std::collections::HashMap;

use log::debug;

use super::color_model::{hsl_to_rgb, hue_band, perceptual_distance, rgb_to_hsl, HslColor, HueBand};
use super::patterns::group_by_similarity;
use super::units::parse_length;
use super::{Analyzer, AnalyzerKind, AnalyzerResult};
use crate::config::ColorConfig;
use crate::types::{
    ColorCluster, ColorInfo, ColorPalette, ColorUsage, CssCustomProperty, PageCapture, Rgb,
    SemanticColors, StyleSample, StyleSource,
};

const NEUTRAL_MAX_SATURATION: f32 = 0.15;
const BRAND_MIN_SATURATION: f32 = 0.3;
const ACCENT_MIN_SATURATION: f32 = 0.5;
const PRIMARY_MIN_COUNT: usize = 10;
const SECONDARY_MIN_COUNT: usize = 5;

const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("orange", Rgb::new(255, 165, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("silver", Rgb::new(192, 192, 192)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("teal", Rgb::new(0, 128, 128)),
    ("olive", Rgb::new(128, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
];

/// Clusters observed colors and labels them with palette roles.
pub struct ColorAnalyzer {
    config: ColorConfig,
}

impl ColorAnalyzer {
    pub fn new(config: ColorConfig) -> Self {
        Self { config }
    }

    pub fn analyze_samples(&self, samples: &[StyleSample], sources: &[StyleSource]) -> ColorPalette {
        let observed = extract_colors(samples);
        let observed_count = observed.len();

        let survivors: Vec<ColorInfo> = observed
            .into_iter()
            .filter(|c| c.count >= self.config.min_occurrences)
            .collect();
        debug!(
            "color: {} distinct colors, {} seen at least {} times",
            observed_count,
            survivors.len(),
            self.config.min_occurrences
        );

        let clusters = cluster_colors(survivors, self.config.similarity_threshold);
        let mut palette = assign_roles(clusters);
        palette.custom_properties = scan_custom_properties(sources);
        palette
    }
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

impl Analyzer for ColorAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Color
    }

    fn analyze(&self, capture: &PageCapture) -> AnalyzerResult {
        AnalyzerResult::Color(self.analyze_samples(&capture.samples, &capture.style_sources))
    }
}

/// Parse a CSS color into an opaque sRGB triple.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`,
/// `hsl()`/`hsla()` and a small table of basic names. Fully transparent values
/// and anything unrecognized return `None`.
pub fn normalize_color(raw: &str) -> Option<Rgb> {
    let value = raw.trim().to_ascii_lowercase();
    if value.is_empty() || value == "transparent" {
        return None;
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = function_args(&value, &["rgba", "rgb"]) {
        return parse_rgb_args(args);
    }
    if let Some(args) = function_args(&value, &["hsla", "hsl"]) {
        return parse_hsl_args(args);
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, rgb)| *rgb)
}

/// Cheap syntactic check used for custom property values.
pub fn looks_like_color(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    value.starts_with('#')
        || value.starts_with("rgb(")
        || value.starts_with("rgba(")
        || value.starts_with("hsl(")
        || value.starts_with("hsla(")
        || NAMED_COLORS.iter().any(|(name, _)| *name == value)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digits: Vec<u8> = match hex.len() {
        3 | 4 => hex
            .chars()
            .map(|c| u8::from_str_radix(&format!("{c}{c}"), 16).ok())
            .collect::<Option<Vec<u8>>>()?,
        6 | 8 => (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
            .collect::<Option<Vec<u8>>>()?,
        _ => return None,
    };
    if digits.len() == 4 && digits[3] == 0 {
        return None;
    }
    Some(Rgb::new(digits[0], digits[1], digits[2]))
}

fn function_args<'a>(value: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        value
            .strip_prefix(name)
            .and_then(|rest| rest.trim_start().strip_prefix('('))
            .and_then(|rest| rest.trim_end().strip_suffix(')'))
    })
}

fn split_args(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_alpha(raw: Option<&&str>) -> Option<f32> {
    match raw {
        None => Some(1.0),
        Some(raw) => {
            let alpha = match raw.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? / 100.0,
                None => raw.parse::<f32>().ok()?,
            };
            alpha.is_finite().then_some(alpha)
        }
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgb> {
    let parts = split_args(args);
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let channel = |raw: &str| -> Option<u8> {
        let value = match raw.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? * 2.55,
            None => raw.parse::<f32>().ok()?,
        };
        value
            .is_finite()
            .then(|| value.clamp(0.0, 255.0).round() as u8)
    };
    let alpha = parse_alpha(parts.get(3))?;
    if alpha <= 0.0 {
        return None;
    }
    Some(Rgb::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}

fn parse_hsl_args(args: &str) -> Option<Rgb> {
    let parts = split_args(args);
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let hue: f32 = parts[0].strip_suffix("deg").unwrap_or(parts[0]).parse().ok()?;
    let percent = |raw: &str| -> Option<f32> {
        let value: f32 = raw.strip_suffix('%').unwrap_or(raw).parse().ok()?;
        value.is_finite().then_some(value / 100.0)
    };
    let alpha = parse_alpha(parts.get(3))?;
    if alpha <= 0.0 || !hue.is_finite() {
        return None;
    }
    Some(hsl_to_rgb(HslColor {
        hue,
        saturation: percent(parts[1])?,
        lightness: percent(parts[2])?,
    }))
}

/// Distinct colors in first-seen order with their counts and usages.
#[derive(Default)]
struct ColorTally {
    colors: Vec<ColorInfo>,
    index: HashMap<Rgb, usize>,
}

impl ColorTally {
    fn record(&mut self, raw: Option<&String>, usage: ColorUsage) {
        let Some(rgb) = raw.and_then(|value| normalize_color(value)) else {
            return;
        };
        match self.index.get(&rgb) {
            Some(&i) => {
                let info = &mut self.colors[i];
                info.count += 1;
                info.usages.insert(usage);
            }
            None => {
                self.index.insert(rgb, self.colors.len());
                self.colors.push(ColorInfo {
                    hex: rgb.to_hex(),
                    rgb,
                    count: 1,
                    usages: [usage].into_iter().collect(),
                });
            }
        }
    }
}

fn has_zero_border(sample: &StyleSample) -> bool {
    let Some(width) = sample.borders.border_width.as_deref() else {
        return false;
    };
    let widths: Vec<f64> = width
        .split_whitespace()
        .filter_map(|w| parse_length(w, 16.0))
        .collect();
    !widths.is_empty() && widths.iter().all(|w| *w == 0.0)
}

fn extract_colors(samples: &[StyleSample]) -> Vec<ColorInfo> {
    let mut tally = ColorTally::default();

    for sample in samples {
        let colors = &sample.colors;
        tally.record(colors.color.as_ref(), ColorUsage::Text);
        tally.record(colors.background_color.as_ref(), ColorUsage::Background);

        if !has_zero_border(sample) {
            let sides = [
                &colors.border_top_color,
                &colors.border_right_color,
                &colors.border_bottom_color,
                &colors.border_left_color,
            ];
            if sides.iter().any(|side| side.is_some()) {
                for side in sides {
                    tally.record(side.as_ref(), ColorUsage::Border);
                }
            } else {
                tally.record(colors.border_color.as_ref(), ColorUsage::Border);
            }
        }

        tally.record(colors.fill.as_ref(), ColorUsage::Fill);
        tally.record(colors.stroke.as_ref(), ColorUsage::Stroke);
    }

    tally.colors
}

/// Seed clusters in descending frequency; first-seen order breaks ties.
fn cluster_colors(mut colors: Vec<ColorInfo>, threshold: f32) -> Vec<ColorCluster> {
    colors.sort_by(|a, b| b.count.cmp(&a.count));

    let groups = group_by_similarity(colors, threshold as f64, |seed, candidate| {
        perceptual_distance(seed.rgb, candidate.rgb) as f64
    });

    let mut clusters: Vec<ColorCluster> = groups
        .into_iter()
        .filter_map(|members| {
            let centroid = members.first()?.clone();
            let total_count = members.iter().map(|c| c.count).sum();
            Some(ColorCluster {
                centroid,
                colors: members,
                total_count,
            })
        })
        .collect();
    clusters.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    clusters
}

fn semantic_slot(semantic: &mut SemanticColors, band: HueBand) -> &mut Option<ColorCluster> {
    match band {
        HueBand::Red => &mut semantic.error,
        HueBand::Green => &mut semantic.success,
        HueBand::Yellow => &mut semantic.warning,
        HueBand::Blue => &mut semantic.info,
    }
}

/// Give each cluster at most one role. First matching rule wins.
fn assign_roles(clusters: Vec<ColorCluster>) -> ColorPalette {
    let mut palette = ColorPalette::default();

    for cluster in &clusters {
        let hsl = rgb_to_hsl(cluster.centroid.rgb);

        if hsl.saturation < NEUTRAL_MAX_SATURATION {
            palette.neutrals.push(cluster.clone());
            continue;
        }

        if let Some(band) = hue_band(hsl.hue) {
            let slot = semantic_slot(&mut palette.semantic, band);
            if slot.is_none() {
                *slot = Some(cluster.clone());
                continue;
            }
        }

        if palette.primary.is_none()
            && hsl.saturation > BRAND_MIN_SATURATION
            && cluster.total_count > PRIMARY_MIN_COUNT
        {
            palette.primary = Some(cluster.clone());
        } else if palette.secondary.is_none()
            && hsl.saturation > BRAND_MIN_SATURATION
            && cluster.total_count > SECONDARY_MIN_COUNT
        {
            palette.secondary = Some(cluster.clone());
        } else if hsl.saturation > ACCENT_MIN_SATURATION {
            palette.accents.push(cluster.clone());
        }
    }

    palette.all = clusters;
    palette
}

fn scan_custom_properties(sources: &[StyleSource]) -> Vec<CssCustomProperty> {
    let mut properties = Vec::new();

    for source in sources {
        let Some(rules) = &source.rules else {
            debug!(
                "color: skipping unreadable style source {}",
                source.href.as_deref().unwrap_or("<inline>")
            );
            continue;
        };
        for rule in rules {
            for decl in &rule.declarations {
                let name = decl.property.trim();
                if name.starts_with("--") && looks_like_color(&decl.value) {
                    properties.push(CssCustomProperty {
                        name: name.to_string(),
                        value: decl.value.trim().to_string(),
                        selector: rule.selector.clone(),
                    });
                }
            }
        }
    }

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CssDeclaration, StyleRule};

    fn background(value: &str, times: usize) -> Vec<StyleSample> {
        (0..times)
            .map(|_| {
                let mut sample = StyleSample::tagged("div");
                sample.colors.background_color = Some(value.to_string());
                sample
            })
            .collect()
    }

    fn text(value: &str, times: usize) -> Vec<StyleSample> {
        (0..times)
            .map(|_| {
                let mut sample = StyleSample::tagged("p");
                sample.colors.color = Some(value.to_string());
                sample
            })
            .collect()
    }

    fn analyze(samples: &[StyleSample]) -> ColorPalette {
        ColorAnalyzer::default().analyze_samples(samples, &[])
    }

    #[test]
    fn normalizes_hex_forms() {
        assert_eq!(normalize_color("#f00"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(normalize_color("#F00F"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(normalize_color("#3b82f6"), Some(Rgb::new(59, 130, 246)));
        assert_eq!(normalize_color("#3B82F6CC"), Some(Rgb::new(59, 130, 246)));
        assert_eq!(normalize_color("#12345"), None);
        assert_eq!(normalize_color("#ggg"), None);
    }

    #[test]
    fn normalizes_functional_forms() {
        assert_eq!(normalize_color("rgb(59, 130, 246)"), Some(Rgb::new(59, 130, 246)));
        assert_eq!(normalize_color("rgba(0,0,0,0.5)"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(normalize_color("rgb(59 130 246 / 50%)"), Some(Rgb::new(59, 130, 246)));
        assert_eq!(normalize_color("rgb(100%, 0%, 0%)"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(normalize_color("hsl(0, 100%, 50%)"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(normalize_color("hsla(240deg 100% 50% / 1)"), Some(Rgb::new(0, 0, 255)));
        assert_eq!(normalize_color("rgb(1, 2)"), None);
    }

    #[test]
    fn normalizes_named_colors_and_drops_unknown_names() {
        assert_eq!(normalize_color("White"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(normalize_color("grey"), Some(Rgb::new(128, 128, 128)));
        assert_eq!(normalize_color("rebeccapurple"), None);
        assert_eq!(normalize_color("currentcolor"), None);
    }

    #[test]
    fn transparent_values_are_skipped() {
        assert_eq!(normalize_color("transparent"), None);
        assert_eq!(normalize_color("rgba(0, 0, 0, 0)"), None);
        assert_eq!(normalize_color("#0000"), None);
        assert_eq!(normalize_color("#ffffff00"), None);
        assert_eq!(normalize_color("hsla(0, 0%, 0%, 0)"), None);
    }

    #[test]
    fn looks_like_color_checks_syntax() {
        assert!(looks_like_color("#3b82f6"));
        assert!(looks_like_color(" rgb(0 0 0)"));
        assert!(looks_like_color("hsl(210, 40%, 50%)"));
        assert!(looks_like_color("navy"));
        assert!(!looks_like_color("16px"));
        assert!(!looks_like_color("var(--brand)"));
    }

    #[test]
    fn near_duplicate_reds_share_a_cluster() {
        let mut samples = background("#FF0000", 15);
        samples.extend(background("#FF0101", 12));
        samples.extend(text("#0000FF", 8));

        let palette = analyze(&samples);

        assert_eq!(palette.all.len(), 2);
        let red = &palette.all[0];
        assert_eq!(red.centroid.hex, "#FF0000");
        assert_eq!(red.total_count, 27);
        let members: Vec<&str> = red.colors.iter().map(|c| c.hex.as_str()).collect();
        assert_eq!(members, vec!["#FF0000", "#FF0101"]);

        // Hue bands are checked before the brand roles.
        assert_eq!(palette.semantic.error.as_ref(), Some(red));
        assert_eq!(
            palette.semantic.info.as_ref().map(|c| c.centroid.hex.as_str()),
            Some("#0000FF")
        );
        assert!(palette.primary.is_none());
        assert!(palette.secondary.is_none());
    }

    #[test]
    fn roles_follow_first_match_order() {
        let mut samples = background("#FFFFFF", 30);
        samples.extend(background("#FF0000", 27));
        samples.extend(text("#333333", 20));
        samples.extend(background("#7C3AED", 11));
        samples.extend(text("#0000FF", 8));
        samples.extend(background("#10B981", 7));
        samples.extend(background("#F97316", 6));
        samples.extend(background("#EC4899", 3));

        let palette = analyze(&samples);
        let hex = |c: &Option<ColorCluster>| c.as_ref().map(|c| c.centroid.hex.clone());

        assert_eq!(palette.all.len(), 8);
        let neutrals: Vec<&str> = palette.neutrals.iter().map(|c| c.centroid.hex.as_str()).collect();
        assert_eq!(neutrals, vec!["#FFFFFF", "#333333"]);
        assert_eq!(hex(&palette.semantic.error).as_deref(), Some("#FF0000"));
        assert_eq!(hex(&palette.semantic.info).as_deref(), Some("#0000FF"));
        assert_eq!(hex(&palette.semantic.success).as_deref(), Some("#10B981"));
        assert!(palette.semantic.warning.is_none());
        assert_eq!(hex(&palette.primary).as_deref(), Some("#7C3AED"));
        assert_eq!(hex(&palette.secondary).as_deref(), Some("#F97316"));
        let accents: Vec<&str> = palette.accents.iter().map(|c| c.centroid.hex.as_str()).collect();
        assert_eq!(accents, vec!["#EC4899"]);
    }

    #[test]
    fn second_cluster_in_a_filled_band_falls_through() {
        let mut samples = background("#FF0000", 20);
        samples.extend(background("#B91C1C", 12));

        let palette = analyze(&samples);

        assert_eq!(
            palette.semantic.error.as_ref().map(|c| c.centroid.hex.as_str()),
            Some("#FF0000")
        );
        assert_eq!(
            palette.primary.as_ref().map(|c| c.centroid.hex.as_str()),
            Some("#B91C1C")
        );
    }

    #[test]
    fn clusters_partition_surviving_colors_and_roles_are_exclusive() {
        let mut samples = background("#FFFFFF", 9);
        samples.extend(background("#FEFEFE", 4));
        samples.extend(text("#111111", 6));
        samples.extend(text("#7C3AED", 12));
        samples.extend(text("#7D3BEE", 2));
        samples.extend(background("#F59E0B", 3));
        samples.extend(background("#22C55E", 5));

        let palette = analyze(&samples);

        let mut members: Vec<String> = palette
            .all
            .iter()
            .flat_map(|c| c.colors.iter().map(|m| m.hex.clone()))
            .collect();
        let before = members.len();
        members.sort();
        members.dedup();
        assert_eq!(before, members.len(), "each color belongs to one cluster");
        assert_eq!(members.len(), 7);
        for cluster in &palette.all {
            let sum: usize = cluster.colors.iter().map(|c| c.count).sum();
            assert_eq!(sum, cluster.total_count);
        }

        let mut assigned: Vec<&ColorCluster> = Vec::new();
        assigned.extend(palette.primary.iter());
        assigned.extend(palette.secondary.iter());
        assigned.extend(palette.accents.iter());
        assigned.extend(palette.neutrals.iter());
        assigned.extend(palette.semantic.error.iter());
        assigned.extend(palette.semantic.success.iter());
        assigned.extend(palette.semantic.warning.iter());
        assigned.extend(palette.semantic.info.iter());
        for (i, a) in assigned.iter().enumerate() {
            for b in &assigned[i + 1..] {
                assert_ne!(a.centroid.hex, b.centroid.hex, "cluster holds two roles");
            }
        }
    }

    #[test]
    fn colors_seen_once_are_dropped() {
        let mut samples = background("#3B82F6", 5);
        samples.extend(text("#ABCDEF", 1));

        let palette = analyze(&samples);

        assert!(palette
            .all
            .iter()
            .flat_map(|c| c.colors.iter())
            .all(|c| c.hex != "#ABCDEF"));
    }

    #[test]
    fn min_occurrences_is_configurable() {
        let samples = text("#ABCDEF", 1);
        let analyzer = ColorAnalyzer::new(ColorConfig {
            min_occurrences: 1,
            ..ColorConfig::default()
        });

        let palette = analyzer.analyze_samples(&samples, &[]);
        assert_eq!(palette.all.len(), 1);
    }

    #[test]
    fn analysis_is_idempotent() {
        let mut samples = background("#FF0000", 15);
        samples.extend(background("#FF0101", 12));
        samples.extend(text("#0000FF", 8));
        samples.extend(text("#333333", 4));

        assert_eq!(analyze(&samples), analyze(&samples));
    }

    #[test]
    fn border_sides_are_counted_unless_width_is_zero() {
        let mut bordered = StyleSample::tagged("input");
        bordered.borders.border_width = Some("1px".into());
        bordered.colors.border_top_color = Some("#E5E7EB".into());
        bordered.colors.border_bottom_color = Some("#E5E7EB".into());

        let mut hidden = StyleSample::tagged("div");
        hidden.borders.border_width = Some("0px".into());
        hidden.colors.border_color = Some("#FF00FF".into());
        let hidden_twice = vec![hidden.clone(), hidden];

        let colors = extract_colors(&[bordered]);
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].count, 2);
        assert!(colors[0].usages.contains(&ColorUsage::Border));

        assert!(extract_colors(&hidden_twice).is_empty());
    }

    #[test]
    fn fill_and_stroke_are_extracted() {
        let mut icon = StyleSample::tagged("svg");
        icon.colors.fill = Some("#10B981".into());
        icon.colors.stroke = Some("#10b981".into());

        let colors = extract_colors(&[icon]);
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].count, 2);
        assert!(colors[0].usages.contains(&ColorUsage::Fill));
        assert!(colors[0].usages.contains(&ColorUsage::Stroke));
    }

    #[test]
    fn custom_properties_skip_unreadable_sources() {
        let sources = vec![
            StyleSource {
                href: Some("https://cdn.example.com/remote.css".into()),
                rules: None,
            },
            StyleSource {
                href: None,
                rules: Some(vec![StyleRule {
                    selector: ":root".into(),
                    declarations: vec![
                        CssDeclaration::new("--brand-primary", " #3B82F6 "),
                        CssDeclaration::new("--radius", "4px"),
                        CssDeclaration::new("color", "#000"),
                        CssDeclaration::new("--surface", "rgb(255 255 255)"),
                    ],
                }]),
            },
        ];

        let palette = ColorAnalyzer::default().analyze_samples(&[], &sources);

        assert_eq!(
            palette.custom_properties,
            vec![
                CssCustomProperty {
                    name: "--brand-primary".into(),
                    value: "#3B82F6".into(),
                    selector: ":root".into(),
                },
                CssCustomProperty {
                    name: "--surface".into(),
                    value: "rgb(255 255 255)".into(),
                    selector: ":root".into(),
                },
            ]
        );
        assert!(palette.all.is_empty());
    }
}
