//! giftbank CLI — batch frontend for GIFT exam files.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "giftbank", version, about = "GIFT exam file parser, validator, and exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every question in a GIFT file
    Validate {
        /// Path to the .gift file
        #[arg(long)]
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the questions in a GIFT file
    List {
        /// Path to the .gift file
        #[arg(long)]
        file: PathBuf,
    },

    /// Show exam statistics and the export gate status
    Stats {
        /// Path to the .gift file
        #[arg(long)]
        file: PathBuf,
    },

    /// Re-serialize a GIFT file in canonical form
    Export {
        /// Path to the source .gift file
        #[arg(long)]
        file: PathBuf,

        /// Destination path for the canonical output
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("giftbank_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { file, format } => commands::validate::execute(file, format),
        Commands::List { file } => commands::list::execute(file),
        Commands::Stats { file } => commands::stats::execute(file),
        Commands::Export { file, output } => commands::export::execute(file, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
