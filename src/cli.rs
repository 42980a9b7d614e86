use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dte")]
#[command(
    version,
    about = "Design Token Extractor - Infer design tokens from captured page styles",
    long_about = "Design Token Extractor (DTE)\n\nReads a page capture (JSON style samples produced by a page traversal) and infers:\n- a color palette with primary/secondary/accent/neutral/semantic roles,\n- a type scale with its modular ratio, fonts, weights and heading styles,\n- a spacing grid with its base unit and named steps.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) with analyzer thresholds; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract design tokens from a page capture
    Analyze {
        #[arg(long, short, value_name = "PATH", help = "Page capture JSON file")]
        input: PathBuf,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Analyzers to run (color,typography,spacing); all when omitted"
        )]
        analyzers: Option<Vec<String>>,

        #[arg(
            long,
            value_name = "DELTA_E",
            help = "CIE76 distance below which colors share a cluster"
        )]
        similarity_threshold: Option<f32>,

        #[arg(
            long,
            value_name = "N",
            help = "Minimum observations for a color to be kept"
        )]
        min_occurrences: Option<usize>,

        #[arg(
            long,
            value_name = "PX",
            help = "Root font size used to convert rem/em values"
        )]
        root_font_size: Option<f64>,

        #[arg(
            long,
            default_value = "5",
            help = "Maximum number of summary highlights"
        )]
        max_highlights: usize,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
