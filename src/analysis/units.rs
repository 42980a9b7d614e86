//! CSS length normalization.
//!
//! `rem` and `em` are both resolved against a fixed root font size (16px by
//! default) rather than the page's actual root or parent size.

/// Root size assumed for `rem`/`em` when no config overrides it.
pub const DEFAULT_ROOT_FONT_SIZE: f64 = 16.0;

const PT_TO_PX: f64 = 1.333;

/// Convert a single CSS length token to pixels.
///
/// Supports `px`, `rem`, `em`, `pt` and unitless numbers. Anything else
/// (`auto`, percentages, viewport units, `calc()`) yields `None`.
pub fn parse_length(raw: &str, root_font_size: f64) -> Option<f64> {
    let value = raw.trim().to_ascii_lowercase();
    let (number, scale) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, root_font_size)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, root_font_size)
    } else if let Some(n) = value.strip_suffix("pt") {
        (n, PT_TO_PX)
    } else {
        (value.as_str(), 1.0)
    };

    let parsed: f64 = number.trim().parse().ok()?;
    let px = parsed * scale;
    px.is_finite().then_some(px)
}

/// Render a pixel value as a CSS string at 1/1000px, dropping trailing zeros.
pub fn format_px(px: f64) -> String {
    if (px - px.round()).abs() < 1e-9 {
        format!("{}px", px.round() as i64)
    } else {
        let text = format!("{:.3}", px);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        format!("{text}px")
    }
}

/// Hashable key for grouping pixel values at 1/100px resolution.
pub fn px_key(px: f64) -> i64 {
    (px * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_units() {
        assert_eq!(parse_length("16px", DEFAULT_ROOT_FONT_SIZE), Some(16.0));
        assert_eq!(parse_length("1.5rem", DEFAULT_ROOT_FONT_SIZE), Some(24.0));
        assert_eq!(parse_length("2em", DEFAULT_ROOT_FONT_SIZE), Some(32.0));
        assert_eq!(parse_length(" 12PX ", DEFAULT_ROOT_FONT_SIZE), Some(12.0));
        assert_eq!(parse_length("8", DEFAULT_ROOT_FONT_SIZE), Some(8.0));
        let pt = parse_length("12pt", DEFAULT_ROOT_FONT_SIZE).expect("pt parses");
        assert!((pt - 15.996).abs() < 1e-9);
    }

    #[test]
    fn respects_configured_root_size() {
        assert_eq!(parse_length("2rem", 10.0), Some(20.0));
    }

    #[test]
    fn rejects_unsupported_tokens() {
        assert_eq!(parse_length("auto", DEFAULT_ROOT_FONT_SIZE), None);
        assert_eq!(parse_length("50%", DEFAULT_ROOT_FONT_SIZE), None);
        assert_eq!(parse_length("10vw", DEFAULT_ROOT_FONT_SIZE), None);
        assert_eq!(parse_length("calc(1px + 2px)", DEFAULT_ROOT_FONT_SIZE), None);
        assert_eq!(parse_length("", DEFAULT_ROOT_FONT_SIZE), None);
    }

    #[test]
    fn formats_pixels_compactly() {
        assert_eq!(format_px(16.0), "16px");
        assert_eq!(format_px(15.996), "15.996px");
        assert_eq!(format_px(16.000_000_1), "16px");
        assert_eq!(format_px(13.5), "13.5px");
        assert_eq!(format_px(0.25), "0.25px");
    }

    #[test]
    fn px_key_groups_float_noise() {
        assert_eq!(px_key(16.0), px_key(16.000_000_1));
        assert_ne!(px_key(16.0), px_key(16.5));
    }
}
