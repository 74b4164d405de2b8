//! YANG compiler command-line interface

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use yangc::cli::output::{self, ColorChoice};
use yangc::cli::{entries, validate};

/// YANG compiler command-line tool
#[derive(Parser)]
#[command(name = "yangc")]
#[command(author, version, about = "YANG module validation and type resolution", long_about = None)]
struct Cli {
    /// Verbose output. Repeat for more (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    /// Registry options file (JSON)
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and process YANG modules, reporting every error
    Validate {
        /// YANG files or directories of YANG files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the entry tree of a module as JSON
    Entries {
        /// YANG files or directories of YANG files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Module to print
        #[arg(short, long)]
        module: String,

        /// Pretty-print output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    output::setup_colors(cli.color);

    let result = match cli.command {
        Commands::Validate { paths } => validate::validate(validate::ValidateConfig {
            paths,
            options: cli.options,
        }),
        Commands::Entries {
            paths,
            module,
            pretty,
        } => entries::entries(entries::EntriesConfig {
            paths,
            module,
            pretty,
            options: cli.options,
            output_file: cli.output,
        })
        .map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", output::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
