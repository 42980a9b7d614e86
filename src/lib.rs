//! Design Token Extractor (DTE) Library
//!
//! Infers a page's design system from style samples captured on a live page:
//! a labeled color palette, a type scale and a spacing grid. The analyzers are
//! pure, synchronous reductions over an already-captured [`PageCapture`].
//!
//! # Module Overview
//!
//! - [`analysis`] - Color, typography and spacing analyzers plus shared statistics
//! - [`capture`] - Loading capture documents from disk
//! - [`config`] - Configuration file support
//! - [`types`] - Input samples and output token structures
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use dte_lib::{default_analyzers, load_capture, run_analyzers, AnalyzerKind, Config};
//!
//! # fn example() -> dte_lib::Result<()> {
//! let capture = load_capture(std::path::Path::new("capture.json"))?;
//! let analyzers = default_analyzers(&Config::default());
//! let tokens = run_analyzers(&analyzers, &[AnalyzerKind::Color], &capture)?;
//! if let Some(palette) = tokens.colors {
//!     println!("{} color clusters", palette.all.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod capture;
pub mod config;
pub mod error;
pub mod output;
pub mod types;

// Analysis re-exports
pub use analysis::{
    // Registry
    default_analyzers, generate_highlights, run_analyzers, Analyzer, AnalyzerKind,
    AnalyzerResult,
    // Concrete analyzers (for custom configuration)
    ColorAnalyzer, SpacingAnalyzer, TypographyAnalyzer,
};
pub use capture::{load_capture, parse_capture};
pub use config::Config;
pub use error::{DteError, Result};
pub use output::{
    AnalyzeOutput, DteOutput, ErrorOutput, SourceDescriptor, Summary, DTE_OUTPUT_VERSION,
};
pub use types::{ColorPalette, DesignTokens, PageCapture, SpacingSystem, StyleSample, TypographySystem};
