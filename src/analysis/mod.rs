//! Analyzers that reduce a captured page to design tokens.
//!
//! Three independent analyzers share the statistical helpers in [`patterns`]:
//! - Color clustering and palette roles (CIE-LAB distance)
//! - Typography scale, fonts and heading styles
//! - Spacing grid and named spacing scale

// Submodules
mod color;
pub mod color_model;
mod highlights;
pub mod patterns;
mod runner;
mod spacing;
mod typography;
pub mod units;


// Re-exports
pub use color::{looks_like_color, normalize_color, ColorAnalyzer};
pub use highlights::generate_highlights;
pub use runner::{default_analyzers, run_analyzers, Analyzer, AnalyzerKind, AnalyzerResult};
pub use spacing::SpacingAnalyzer;
pub use typography::{normalize_weight, TypographyAnalyzer};
