mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::run_analyze;
use settings::AnalyzeOverrides;

fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Analyze {
            input,
            analyzers,
            similarity_threshold,
            min_occurrences,
            root_font_size,
            max_highlights,
            format,
            output,
        } => run_analyze(
            args.config,
            input,
            analyzers,
            AnalyzeOverrides {
                similarity_threshold,
                min_occurrences,
                root_font_size,
            },
            max_highlights,
            format,
            output,
        ),
    }
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
