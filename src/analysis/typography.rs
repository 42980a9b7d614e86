use std::collections::{BTreeMap, HashMap};

use log::debug;

use super::patterns::{detect_modular_scale, frequency};
use super::units::{format_px, parse_length, px_key};
use super::{Analyzer, AnalyzerKind, AnalyzerResult};
use crate::config::TypographyConfig;
use crate::types::{
    FontSizeObservation, HeadingLevel, HeadingStyle, PageCapture, StyleSample, TypeScale, TypeStep,
    TypographySystem,
};

const DEFAULT_BASE_SIZE: f64 = 16.0;
const BASE_BAND: (f64, f64) = (14.0, 18.0);
const BASE_MIN_COUNT: usize = 10;
const DEFAULT_WEIGHT: u16 = 400;

/// Builds the type scale, font stacks and heading snapshots.
pub struct TypographyAnalyzer {
    config: TypographyConfig,
}

impl TypographyAnalyzer {
    pub fn new(config: TypographyConfig) -> Self {
        Self { config }
    }

    pub fn analyze_samples(&self, samples: &[StyleSample]) -> TypographySystem {
        let families: Vec<String> = samples
            .iter()
            .filter_map(|s| s.typography.font_family.clone())
            .collect();
        let families = frequency(&families, 1);

        let weights: Vec<u16> = samples
            .iter()
            .filter_map(|s| s.typography.font_weight.as_deref())
            .map(normalize_weight)
            .collect();

        let line_heights: Vec<String> = samples
            .iter()
            .filter_map(|s| s.typography.line_height.clone())
            .collect();

        let font_sizes = self.collect_font_sizes(samples);
        let scale = self.build_scale(&font_sizes);
        debug!(
            "typography: {} distinct sizes, base {}",
            font_sizes.len(),
            format_px(scale.base_size)
        );

        TypographySystem {
            primary_font: families.first().map(|f| f.value.clone()),
            secondary_font: families.get(1).map(|f| f.value.clone()),
            families,
            scale,
            font_sizes,
            weights: frequency(&weights, 1),
            line_heights: frequency(&line_heights, 1),
            headings: collect_headings(samples),
        }
    }

    /// Distinct sizes in pixels, most frequent first.
    fn collect_font_sizes(&self, samples: &[StyleSample]) -> Vec<FontSizeObservation> {
        let mut observations: Vec<FontSizeObservation> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();

        for sample in samples {
            let Some(raw) = sample.typography.font_size.as_deref() else {
                continue;
            };
            let Some(px) = parse_length(raw, self.config.root_font_size).filter(|px| *px > 0.0)
            else {
                debug!("typography: ignoring font-size {raw:?}");
                continue;
            };

            let i = *index.entry(px_key(px)).or_insert_with(|| {
                observations.push(FontSizeObservation {
                    px,
                    raw: raw.to_string(),
                    count: 0,
                    contexts: Default::default(),
                });
                observations.len() - 1
            });
            let observation = &mut observations[i];
            observation.count += 1;
            if !sample.tag.is_empty() {
                observation.contexts.insert(sample.tag.clone());
            }
            if let Some(hint) = &sample.class_hint {
                observation.contexts.insert(hint.clone());
            }
        }

        observations.sort_by(|a, b| b.count.cmp(&a.count));
        observations
    }

    fn build_scale(&self, font_sizes: &[FontSizeObservation]) -> TypeScale {
        let mut sizes: Vec<f64> = font_sizes.iter().map(|o| o.px).collect();
        sizes.sort_by(f64::total_cmp);

        let weighted: Vec<f64> = font_sizes
            .iter()
            .flat_map(|o| std::iter::repeat(o.px).take(o.count))
            .collect();
        let ratio = detect_modular_scale(&weighted, self.config.scale_tolerance);

        let base = select_base_size(font_sizes, &sizes);
        let base_size = base.unwrap_or(DEFAULT_BASE_SIZE);

        let mut rungs = BTreeMap::new();
        if let Some(base) = base {
            rungs.insert(TypeStep::Base, format_px(base));
        }
        for &size in &sizes {
            if px_key(size) == px_key(base_size) {
                continue;
            }
            if let Some(step) = bucket_for(size / base_size) {
                rungs.insert(step, format_px(size));
            }
        }

        TypeScale {
            base_size,
            rungs,
            ratio,
            sizes,
        }
    }
}

impl Default for TypographyAnalyzer {
    fn default() -> Self {
        Self::new(TypographyConfig::default())
    }
}

impl Analyzer for TypographyAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Typography
    }

    fn analyze(&self, capture: &PageCapture) -> AnalyzerResult {
        AnalyzerResult::Typography(self.analyze_samples(&capture.samples))
    }
}

/// Body text size: a size used by body copy or seen more than ten times,
/// else the smallest size in the 14-18px band. `None` when nothing qualifies.
fn select_base_size(by_frequency: &[FontSizeObservation], ascending: &[f64]) -> Option<f64> {
    by_frequency
        .iter()
        .find(|o| {
            o.contexts.contains("body") || o.contexts.contains("p") || o.count > BASE_MIN_COUNT
        })
        .map(|o| o.px)
        .or_else(|| {
            ascending
                .iter()
                .copied()
                .find(|px| (BASE_BAND.0..=BASE_BAND.1).contains(px))
        })
}

fn bucket_for(ratio: f64) -> Option<TypeStep> {
    if ratio < 0.75 {
        Some(TypeStep::Xs)
    } else if ratio < 0.9 {
        Some(TypeStep::Sm)
    } else if ratio > 2.5 {
        Some(TypeStep::Xl4)
    } else if ratio > 2.0 {
        Some(TypeStep::Xl3)
    } else if ratio > 1.5 {
        Some(TypeStep::Xl2)
    } else if ratio > 1.25 {
        Some(TypeStep::Xl)
    } else if ratio > 1.1 {
        Some(TypeStep::Lg)
    } else {
        None
    }
}

/// Map a `font-weight` value onto the numeric scale.
pub fn normalize_weight(raw: &str) -> u16 {
    match raw.trim().to_ascii_lowercase().as_str() {
        "normal" => 400,
        "bold" | "bolder" => 700,
        "lighter" => 300,
        other => other
            .parse::<f64>()
            .ok()
            .filter(|w| (1.0..=1000.0).contains(w))
            .map(|w| w.round() as u16)
            .unwrap_or(DEFAULT_WEIGHT),
    }
}

fn collect_headings(samples: &[StyleSample]) -> Vec<HeadingStyle> {
    let mut headings: BTreeMap<HeadingLevel, HeadingStyle> = BTreeMap::new();
    for sample in samples {
        let Some(level) = HeadingLevel::from_tag(&sample.tag) else {
            continue;
        };
        headings.entry(level).or_insert_with(|| {
            let t = &sample.typography;
            HeadingStyle {
                level,
                font_family: t.font_family.clone(),
                font_size: t.font_size.clone(),
                font_weight: t.font_weight.clone(),
                line_height: t.line_height.clone(),
                letter_spacing: t.letter_spacing.clone(),
            }
        });
    }
    headings.into_values().collect()
}
