use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use log::info;

use dte_lib::output::DTE_OUTPUT_VERSION;
use dte_lib::{
    default_analyzers, generate_highlights, load_capture, run_analyzers, AnalyzeOutput,
    AnalyzerKind, DteError, DteOutput, SourceDescriptor, Summary,
};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{format_effective_config, load_config, resolve_analyze_config, AnalyzeOverrides};

/// Run the analyze command.
pub fn run_analyze(
    config_path: Option<PathBuf>,
    input: PathBuf,
    analyzers: Option<Vec<String>>,
    overrides: AnalyzeOverrides,
    max_highlights: usize,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref())
        .and_then(|cfg| resolve_analyze_config(cfg, &overrides))
    {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    info!("{}", format_effective_config(&config, config_path.as_deref()));

    let selected = match parse_analyzer_kinds(analyzers.as_deref()) {
        Ok(kinds) => kinds,
        Err(err) => return render_error(err, format, output),
    };

    info!("Loading capture {}", input.display());
    let capture = match load_capture(&input) {
        Ok(capture) => capture,
        Err(err) => return render_error(err, format, output),
    };

    let tokens = match run_analyzers(&default_analyzers(&config), &selected, &capture) {
        Ok(tokens) => tokens,
        Err(err) => return render_error(err, format, output),
    };

    let highlights = generate_highlights(&tokens, max_highlights);
    let ran = if selected.is_empty() {
        AnalyzerKind::all().to_vec()
    } else {
        selected
    };
    let body = DteOutput::Analyze(AnalyzeOutput {
        version: DTE_OUTPUT_VERSION.to_string(),
        source: SourceDescriptor {
            path: input.display().to_string(),
            url: capture.url.clone(),
            title: capture.title.clone(),
        },
        sample_count: capture.samples.len(),
        analyzers: ran,
        tokens,
        summary: (!highlights.is_empty()).then_some(Summary { highlights }),
    });

    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(DteError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

/// Parse `--analyzers` values, dropping repeats. Empty means all.
fn parse_analyzer_kinds(kinds: Option<&[String]>) -> Result<Vec<AnalyzerKind>, DteError> {
    let mut parsed = Vec::new();
    if let Some(items) = kinds {
        for item in items.iter().filter(|i| !i.trim().is_empty()) {
            let kind = AnalyzerKind::from_str(item)?;
            if !parsed.contains(&kind) {
                parsed.push(kind);
            }
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_analyzer_kinds_accepts_subsets() {
        let items = vec!["Color".to_string(), "spacing".to_string(), "color".to_string()];
        let kinds = parse_analyzer_kinds(Some(&items)).unwrap();
        assert_eq!(kinds, vec![AnalyzerKind::Color, AnalyzerKind::Spacing]);
        assert!(parse_analyzer_kinds(None).unwrap().is_empty());
    }

    #[test]
    fn parse_analyzer_kinds_rejects_unknown_names() {
        let items = vec!["layout".to_string()];
        let err = parse_analyzer_kinds(Some(&items)).unwrap_err();
        assert!(err.to_string().contains("Unknown analyzer kind: layout"));
    }
}
