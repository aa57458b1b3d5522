//! CLI for drawaudit — descriptive statistics over historical draw records.

mod commands;
mod input;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;

#[derive(Parser)]
#[command(name = "drawaudit")]
#[command(about = "drawaudit — descriptive statistics of historical lottery draws (no predictions)")]
#[command(version = drawaudit_core::VERSION)]
struct Cli {
    /// Log validation details (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit one draw file: validation, frequency, pairs, parity, sums, chi-square.
    Analyze {
        /// Delimited draw file (comma, semicolon, tab or whitespace separated)
        input: String,

        /// JSON config file with numbers_per_draw, min, max, column_labels
        #[arg(long)]
        config: Option<String>,

        /// Numbers drawn per record (default 6, or the header's number columns)
        #[arg(long, short = 'k')]
        numbers: Option<usize>,

        /// Smallest valid number (default 1)
        #[arg(long)]
        min: Option<u32>,

        /// Largest valid number (default 60)
        #[arg(long)]
        max: Option<u32>,

        /// How many entries to show in top/bottom lists
        #[arg(long, default_value = "10")]
        top: usize,

        /// Output view: summary (default) or detailed (full tables and rejections)
        #[arg(long, default_value = "summary", value_parser = ["summary", "detailed"])]
        view: String,

        /// Write the full results as JSON
        #[arg(long)]
        output: Option<String>,

        /// Include every observed pair in the JSON output, not only the top list
        #[arg(long)]
        all_pairs: bool,
    },

    /// Write a markdown audit report covering one or more draw files
    Report {
        /// Delimited draw files
        #[arg(required = true)]
        inputs: Vec<String>,

        /// JSON config file with numbers_per_draw, min, max, column_labels
        #[arg(long)]
        config: Option<String>,

        /// Numbers drawn per record
        #[arg(long, short = 'k')]
        numbers: Option<usize>,

        /// Smallest valid number
        #[arg(long)]
        min: Option<u32>,

        /// Largest valid number
        #[arg(long)]
        max: Option<u32>,

        /// How many entries to show in top/bottom lists
        #[arg(long, default_value = "10")]
        top: usize,

        /// Output path for the report (printed to stdout when omitted)
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let result = match cli.command {
        Commands::Analyze {
            input,
            config,
            numbers,
            min,
            max,
            top,
            view,
            output,
            all_pairs,
        } => commands::analyze::run(commands::analyze::AnalyzeCommandConfig {
            input: &input,
            range: commands::RangeArgs {
                config_path: config.as_deref(),
                numbers,
                min,
                max,
            },
            output_path: output.as_deref(),
            view: &view,
            top,
            all_pairs,
        }),
        Commands::Report {
            inputs,
            config,
            numbers,
            min,
            max,
            top,
            output,
        } => commands::report::run(commands::report::ReportCommandConfig {
            inputs: &inputs,
            range: commands::RangeArgs {
                config_path: config.as_deref(),
                numbers,
                min,
                max,
            },
            output_path: output.as_deref(),
            top,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
