use std::collections::{BTreeMap, HashMap};

use log::debug;

use super::patterns::{calculate_stats, detect_base_unit, is_multiple, remove_outliers};
use super::units::{format_px, parse_length, px_key};
use super::{Analyzer, AnalyzerKind, AnalyzerResult};
use crate::config::SpacingConfig;
use crate::types::{
    PageCapture, SpacingObservation, SpacingStep, SpacingSystem, SpacingUsage, StyleSample,
};

/// Infers the spacing grid from margins, paddings and gaps.
pub struct SpacingAnalyzer {
    config: SpacingConfig,
}

impl SpacingAnalyzer {
    pub fn new(config: SpacingConfig) -> Self {
        Self { config }
    }

    pub fn analyze_samples(&self, samples: &[StyleSample]) -> SpacingSystem {
        let (values, mut observations) = self.extract(samples);

        let base_unit = detect_base_unit(&values, &self.config.base_unit_candidates)
            .unwrap_or(self.config.default_base_unit);
        debug!(
            "spacing: {} values ({} distinct), base unit {}",
            values.len(),
            observations.len(),
            format_px(base_unit)
        );

        observations.sort_by(|a, b| b.count.cmp(&a.count));

        let mut on_grid: Vec<f64> = observations
            .iter()
            .map(|o| o.px)
            .filter(|px| is_multiple(*px, base_unit))
            .collect();
        on_grid.sort_by(f64::total_cmp);

        let scale: BTreeMap<SpacingStep, String> = SpacingStep::all()
            .into_iter()
            .zip(on_grid)
            .map(|(step, px)| (step, format_px(px)))
            .collect();

        let stats = calculate_stats(&remove_outliers(&values, self.config.outlier_factor));

        SpacingSystem {
            base_unit,
            scale,
            all_values: observations,
            stats,
        }
    }

    /// Every positive spacing value in sample order, plus one observation per
    /// distinct magnitude in first-seen order.
    fn extract(&self, samples: &[StyleSample]) -> (Vec<f64>, Vec<SpacingObservation>) {
        let mut values = Vec::new();
        let mut observations: Vec<SpacingObservation> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();

        for sample in samples {
            let s = &sample.spacing;
            let properties = [
                (&s.margin, SpacingUsage::Margin),
                (&s.margin_top, SpacingUsage::Margin),
                (&s.margin_right, SpacingUsage::Margin),
                (&s.margin_bottom, SpacingUsage::Margin),
                (&s.margin_left, SpacingUsage::Margin),
                (&s.padding, SpacingUsage::Padding),
                (&s.padding_top, SpacingUsage::Padding),
                (&s.padding_right, SpacingUsage::Padding),
                (&s.padding_bottom, SpacingUsage::Padding),
                (&s.padding_left, SpacingUsage::Padding),
                (&s.gap, SpacingUsage::Gap),
                (&s.row_gap, SpacingUsage::Gap),
                (&s.column_gap, SpacingUsage::Gap),
            ];

            for (raw, usage) in properties {
                let Some(raw) = raw.as_deref() else {
                    continue;
                };
                for token in raw.split_whitespace() {
                    // Zero, auto and negative offsets carry no rhythm.
                    let Some(px) = parse_length(token, self.config.root_font_size)
                        .filter(|px| *px > 0.0)
                    else {
                        continue;
                    };

                    values.push(px);
                    let i = *index.entry(px_key(px)).or_insert_with(|| {
                        observations.push(SpacingObservation {
                            px,
                            count: 0,
                            usages: Default::default(),
                        });
                        observations.len() - 1
                    });
                    observations[i].count += 1;
                    observations[i].usages.insert(usage);
                }
            }
        }

        (values, observations)
    }
}

impl Default for SpacingAnalyzer {
    fn default() -> Self {
        Self::new(SpacingConfig::default())
    }
}

impl Analyzer for SpacingAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Spacing
    }

    fn analyze(&self, capture: &PageCapture) -> AnalyzerResult {
        AnalyzerResult::Spacing(self.analyze_samples(&capture.samples))
    }
}
