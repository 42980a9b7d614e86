use crate::types::{ColorPalette, DesignTokens, SpacingSystem, TypographySystem};

use super::patterns::is_multiple;
use super::units::format_px;

const PRIORITY_COLOR: u8 = 0;
const PRIORITY_TYPOGRAPHY: u8 = 1;
const PRIORITY_SPACING: u8 = 2;

#[derive(Debug, Clone)]
struct RankedHighlight {
    strength_rank: u8,
    priority_rank: u8,
    message: String,
}

impl RankedHighlight {
    fn new(strength_rank: u8, priority_rank: u8, message: impl Into<String>) -> Self {
        Self {
            strength_rank,
            priority_rank,
            message: message.into(),
        }
    }

    fn strong(priority_rank: u8, message: impl Into<String>) -> Self {
        Self::new(0, priority_rank, message)
    }

    fn notable(priority_rank: u8, message: impl Into<String>) -> Self {
        Self::new(1, priority_rank, message)
    }

    fn minor(priority_rank: u8, message: impl Into<String>) -> Self {
        Self::new(2, priority_rank, message)
    }
}

/// Short findings about the extracted tokens, strongest signals first.
pub fn generate_highlights(tokens: &DesignTokens, max_highlights: usize) -> Vec<String> {
    let mut highlights: Vec<RankedHighlight> = Vec::new();

    if let Some(ref colors) = tokens.colors {
        highlights.extend(highlights_from_colors(colors));
    }

    if let Some(ref typography) = tokens.typography {
        highlights.extend(highlights_from_typography(typography));
    }

    if let Some(ref spacing) = tokens.spacing {
        highlights.extend(highlights_from_spacing(spacing));
    }

    highlights.sort_by(|a, b| {
        a.strength_rank
            .cmp(&b.strength_rank)
            .then_with(|| a.priority_rank.cmp(&b.priority_rank))
            .then_with(|| a.message.cmp(&b.message))
    });
    highlights
        .into_iter()
        .take(max_highlights)
        .map(|h| h.message)
        .collect()
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn highlights_from_colors(palette: &ColorPalette) -> Vec<RankedHighlight> {
    let mut highlights = Vec::new();

    if palette.all.is_empty() {
        highlights.push(RankedHighlight::notable(
            PRIORITY_COLOR,
            "No repeated colors found; palette is empty.",
        ));
        return highlights;
    }

    if let Some(primary) = &palette.primary {
        highlights.push(RankedHighlight::strong(
            PRIORITY_COLOR,
            format!(
                "Primary color {} ({} uses).",
                primary.centroid.hex, primary.total_count
            ),
        ));
    }

    let distinct: usize = palette.all.iter().map(|c| c.colors.len()).sum();
    highlights.push(RankedHighlight::notable(
        PRIORITY_COLOR,
        format!(
            "{} color cluster{} from {} distinct color{}, {} neutral.",
            palette.all.len(),
            plural(palette.all.len()),
            distinct,
            plural(distinct),
            palette.neutrals.len()
        ),
    ));

    let semantic = &palette.semantic;
    let slots: Vec<String> = [
        ("error", &semantic.error),
        ("success", &semantic.success),
        ("warning", &semantic.warning),
        ("info", &semantic.info),
    ]
    .into_iter()
    .filter_map(|(name, slot)| {
        slot.as_ref()
            .map(|c| format!("{} {}", name, c.centroid.hex))
    })
    .collect();
    if !slots.is_empty() {
        highlights.push(RankedHighlight::notable(
            PRIORITY_COLOR,
            format!("Semantic colors: {}.", slots.join(", ")),
        ));
    }

    if !palette.custom_properties.is_empty() {
        let n = palette.custom_properties.len();
        highlights.push(RankedHighlight::minor(
            PRIORITY_COLOR,
            format!("{} color custom propert{} declared.", n, if n == 1 { "y" } else { "ies" }),
        ));
    }

    highlights
}

fn highlights_from_typography(system: &TypographySystem) -> Vec<RankedHighlight> {
    let mut highlights = Vec::new();

    match system.scale.ratio {
        Some(found) => highlights.push(RankedHighlight::strong(
            PRIORITY_TYPOGRAPHY,
            format!(
                "Type scale follows the {} ratio ({:.0}% of steps).",
                found.ratio,
                found.confidence * 100.0
            ),
        )),
        None if system.scale.sizes.len() >= 3 => highlights.push(RankedHighlight::notable(
            PRIORITY_TYPOGRAPHY,
            format!(
                "{} font sizes do not follow a named modular scale.",
                system.scale.sizes.len()
            ),
        )),
        None => {}
    }

    if let Some(font) = &system.primary_font {
        highlights.push(RankedHighlight::notable(
            PRIORITY_TYPOGRAPHY,
            format!("Primary font: {}.", font),
        ));
    }

    if !system.scale.sizes.is_empty() {
        highlights.push(RankedHighlight::minor(
            PRIORITY_TYPOGRAPHY,
            format!("Body text size {}.", format_px(system.scale.base_size)),
        ));
    }

    highlights
}

fn highlights_from_spacing(system: &SpacingSystem) -> Vec<RankedHighlight> {
    let mut highlights = Vec::new();
    let unit = format_px(system.base_unit);

    if system.all_values.is_empty() {
        highlights.push(RankedHighlight::notable(
            PRIORITY_SPACING,
            format!("No spacing values found; assuming a {} grid.", unit),
        ));
        return highlights;
    }

    highlights.push(RankedHighlight::strong(
        PRIORITY_SPACING,
        format!(
            "Spacing grid uses a {} base unit ({} named step{}).",
            unit,
            system.scale.len(),
            plural(system.scale.len())
        ),
    ));

    let off_grid = system
        .all_values
        .iter()
        .filter(|o| !is_multiple(o.px, system.base_unit))
        .count();
    if off_grid > 0 {
        highlights.push(RankedHighlight::minor(
            PRIORITY_SPACING,
            format!(
                "{} off-grid spacing value{} for the {} unit.",
                off_grid,
                plural(off_grid),
                unit
            ),
        ));
    }

    highlights
}
