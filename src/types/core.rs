//! Core statistical and color types used throughout the DTE library.
//!
//! - [`Rgb`] - An 8-bit sRGB triple
//! - [`FrequencyEntry`] - One distinct value with its count and share
//! - [`Stats`] - Descriptive statistics over a numeric series
//! - [`ScaleRatio`] / [`ModularScaleMatch`] - Named typographic ratios

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical `#RRGGBB` uppercase form.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A distinct value, how often it was seen and its share of the input (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyEntry<T> {
    pub value: T,
    pub count: usize,
    pub percentage: f64,
}

/// Descriptive statistics. `std_dev` is the population standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Named ratios recognised by modular-scale detection, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleRatio {
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    AugmentedFourth,
    PerfectFifth,
    GoldenRatio,
}

impl ScaleRatio {
    pub const fn all() -> [ScaleRatio; 8] {
        [
            ScaleRatio::MinorSecond,
            ScaleRatio::MajorSecond,
            ScaleRatio::MinorThird,
            ScaleRatio::MajorThird,
            ScaleRatio::PerfectFourth,
            ScaleRatio::AugmentedFourth,
            ScaleRatio::PerfectFifth,
            ScaleRatio::GoldenRatio,
        ]
    }

    pub const fn value(self) -> f64 {
        match self {
            ScaleRatio::MinorSecond => 1.067,
            ScaleRatio::MajorSecond => 1.125,
            ScaleRatio::MinorThird => 1.2,
            ScaleRatio::MajorThird => 1.25,
            ScaleRatio::PerfectFourth => 1.333,
            ScaleRatio::AugmentedFourth => 1.414,
            ScaleRatio::PerfectFifth => 1.5,
            ScaleRatio::GoldenRatio => 1.618,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ScaleRatio::MinorSecond => "Minor Second",
            ScaleRatio::MajorSecond => "Major Second",
            ScaleRatio::MinorThird => "Minor Third",
            ScaleRatio::MajorThird => "Major Third",
            ScaleRatio::PerfectFourth => "Perfect Fourth",
            ScaleRatio::AugmentedFourth => "Augmented Fourth",
            ScaleRatio::PerfectFifth => "Perfect Fifth",
            ScaleRatio::GoldenRatio => "Golden Ratio",
        }
    }
}

impl fmt::Display for ScaleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.value())
    }
}

/// A detected modular scale and the fraction of adjacent steps it explains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModularScaleMatch {
    pub ratio: ScaleRatio,
    pub value: f64,
    /// Fraction (0.0-1.0) of adjacent size pairs matching `ratio`.
    pub confidence: f64,
}
