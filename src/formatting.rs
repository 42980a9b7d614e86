use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dte_lib::output::DTE_OUTPUT_VERSION;
use dte_lib::types::{ColorCluster, Rgb};
use dte_lib::{AnalyzeOutput, DteError, DteOutput, ErrorOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &DteOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: DteError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    log::debug!("fatal: {err:?}");
    let error_payload = err.to_payload();
    let payload = DteOutput::Error(ErrorOutput {
        version: DTE_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &DteOutput, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &DteOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &DteOutput, colorize: bool) -> String {
    match body {
        DteOutput::Analyze(out) => format_analyze(out, colorize),
        DteOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn format_analyze(out: &AnalyzeOutput, colorize: bool) -> String {
    let mut buf = String::new();
    let header = color("[TOKENS]", "36", colorize);
    let source = out
        .source
        .url
        .as_deref()
        .unwrap_or(out.source.path.as_str());
    writeln!(buf, "{} {} ({} samples)", header, source, out.sample_count).ok();

    if let Some(summary) = &out.summary {
        if !summary.highlights.is_empty() {
            writeln!(buf, "Highlights:").ok();
            for highlight in &summary.highlights {
                writeln!(buf, "- {highlight}").ok();
            }
        }
    }

    if let Some(palette) = &out.tokens.colors {
        writeln!(buf, "Colors:").ok();
        let mut roles: Vec<(&str, &ColorCluster)> = Vec::new();
        if let Some(c) = &palette.primary {
            roles.push(("primary", c));
        }
        if let Some(c) = &palette.secondary {
            roles.push(("secondary", c));
        }
        for c in &palette.accents {
            roles.push(("accent", c));
        }
        for (name, slot) in [
            ("error", &palette.semantic.error),
            ("success", &palette.semantic.success),
            ("warning", &palette.semantic.warning),
            ("info", &palette.semantic.info),
        ] {
            if let Some(c) = slot {
                roles.push((name, c));
            }
        }
        for c in &palette.neutrals {
            roles.push(("neutral", c));
        }
        for (role, cluster) in roles {
            writeln!(
                buf,
                "- {:10} {} {:>5}",
                role,
                swatch(&cluster.centroid.hex, cluster.centroid.rgb, colorize),
                cluster.total_count
            )
            .ok();
        }
        if !palette.custom_properties.is_empty() {
            writeln!(buf, "  {} custom properties", palette.custom_properties.len()).ok();
        }
    }

    if let Some(typography) = &out.tokens.typography {
        writeln!(buf, "Typography:").ok();
        if let Some(font) = &typography.primary_font {
            writeln!(buf, "- {:10} {}", "primary", font).ok();
        }
        if let Some(font) = &typography.secondary_font {
            writeln!(buf, "- {:10} {}", "secondary", font).ok();
        }
        if let Some(ratio) = &typography.scale.ratio {
            writeln!(
                buf,
                "- {:10} {} ({:.0}%)",
                "ratio",
                ratio.ratio,
                ratio.confidence * 100.0
            )
            .ok();
        }
        for (step, value) in &typography.scale.rungs {
            writeln!(buf, "- {:10} {}", step.label(), value).ok();
        }
    }

    if let Some(spacing) = &out.tokens.spacing {
        writeln!(buf, "Spacing (base {}px):", spacing.base_unit).ok();
        for (step, value) in &spacing.scale {
            writeln!(buf, "- {:10} {}", step.label(), value).ok();
        }
    }

    buf
}

/// Hex code preceded by a truecolor block when color is enabled.
fn swatch(hex: &str, rgb: Rgb, colorize: bool) -> String {
    if colorize {
        format!("\x1b[48;2;{};{};{}m  \x1b[0m {}", rgb.r, rgb.g, rgb.b, hex)
    } else {
        hex.to_string()
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
