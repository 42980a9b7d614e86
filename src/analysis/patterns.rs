//! Statistical primitives shared by the analyzers.
//!
//! Everything here is a pure function over in-memory sequences. Degenerate
//! input (empty, too short, non-finite) yields `None` or an empty collection
//! rather than an error.

use std::collections::HashMap;
use std::hash::Hash;

use crate::types::{FrequencyEntry, ModularScaleMatch, ScaleRatio, Stats};

/// Minimum share of input values a base unit must divide evenly.
pub const MIN_BASE_UNIT_COVERAGE: f64 = 0.5;
/// Minimum share of adjacent steps a ratio must explain.
pub const MIN_SCALE_CONFIDENCE: f64 = 0.5;

const MULTIPLE_EPSILON: f64 = 1e-6;

/// Count distinct values, keeping those seen at least `min_count` times.
///
/// Sorted by count descending; equal counts keep first-seen order.
pub fn frequency<T>(values: &[T], min_count: usize) -> Vec<FrequencyEntry<T>>
where
    T: Eq + Hash + Clone,
{
    if values.is_empty() {
        return Vec::new();
    }

    let mut index: HashMap<&T, usize> = HashMap::new();
    let mut counts: Vec<(&T, usize)> = Vec::new();
    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    let total = values.len() as f64;
    let mut entries: Vec<FrequencyEntry<T>> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(value, count)| FrequencyEntry {
            value: value.clone(),
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// True when `value` is an integer multiple of `unit`.
pub fn is_multiple(value: f64, unit: f64) -> bool {
    if !(unit > 0.0) || !value.is_finite() {
        return false;
    }
    let quotient = value / unit;
    (quotient - quotient.round()).abs() < MULTIPLE_EPSILON
}

/// Pick the candidate that evenly divides the most values.
///
/// Returns `None` unless the winner divides at least half of `values`.
/// Ties go to the earlier candidate.
pub fn detect_base_unit(values: &[f64], candidates: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut best: Option<(f64, usize)> = None;
    for &candidate in candidates {
        if !(candidate > 0.0) {
            continue;
        }
        let score = values
            .iter()
            .filter(|v| is_multiple(**v, candidate))
            .count();
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    let (unit, score) = best?;
    let coverage = score as f64 / values.len() as f64;
    (coverage >= MIN_BASE_UNIT_COVERAGE).then_some(unit)
}

/// Match the gaps between distinct sizes against the named typographic ratios.
///
/// Needs at least three distinct positive values. A pair matches a ratio when
/// `|actual - ratio| / ratio <= tolerance`. The best ratio is returned only when
/// it explains at least half of the adjacent pairs; ties favor the smaller ratio.
pub fn detect_modular_scale(values: &[f64], tolerance: f64) -> Option<ModularScaleMatch> {
    let mut sorted: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup_by(|a, b| (*a - *b).abs() < MULTIPLE_EPSILON);
    if sorted.len() < 3 {
        return None;
    }

    let steps: Vec<f64> = sorted.windows(2).map(|w| w[1] / w[0]).collect();

    let mut best: Option<(ScaleRatio, usize)> = None;
    for ratio in ScaleRatio::all() {
        let target = ratio.value();
        let matches = steps
            .iter()
            .filter(|step| ((**step - target) / target).abs() <= tolerance)
            .count();
        if best.map_or(true, |(_, best_matches)| matches > best_matches) {
            best = Some((ratio, matches));
        }
    }

    let (ratio, matches) = best?;
    let confidence = matches as f64 / steps.len() as f64;
    (confidence >= MIN_SCALE_CONFIDENCE).then_some(ModularScaleMatch {
        ratio,
        value: ratio.value(),
        confidence,
    })
}

/// Drop values outside the IQR fence `[Q1 - factor*IQR, Q3 + factor*IQR]`.
///
/// Input order is preserved. Fewer than four values are returned unchanged.
pub fn remove_outliers(values: &[f64], factor: f64) -> Vec<f64> {
    if values.len() < 4 {
        return values.to_vec();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = sorted[sorted.len() / 4];
    let q3 = sorted[sorted.len() * 3 / 4];
    let iqr = q3 - q1;
    let lower = q1 - factor * iqr;
    let upper = q3 + factor * iqr;

    values
        .iter()
        .copied()
        .filter(|v| *v >= lower && *v <= upper)
        .collect()
}

pub fn calculate_stats(values: &[f64]) -> Option<Stats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    Some(Stats {
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median,
        std_dev: variance.sqrt(),
    })
}

/// Greedy seeded grouping.
///
/// Items are visited in order. Each joins the group whose seed (first member)
/// is nearest, provided that distance is below `threshold`; otherwise it seeds
/// a new group. Equidistant seeds resolve to the earliest group, so the result
/// depends on input order.
pub fn group_by_similarity<T, F>(items: Vec<T>, threshold: f64, distance: F) -> Vec<Vec<T>>
where
    F: Fn(&T, &T) -> f64,
{
    let mut groups: Vec<Vec<T>> = Vec::new();

    for item in items {
        let mut nearest: Option<(usize, f64)> = None;
        for (i, group) in groups.iter().enumerate() {
            let d = distance(&group[0], &item);
            if d < threshold && nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((i, d));
            }
        }

        match nearest {
            Some((i, _)) => groups[i].push(item),
            None => groups.push(vec![item]),
        }
    }

    groups
}
