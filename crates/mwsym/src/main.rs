//! mwsym - symbol tools for CodeWarrior-built PowerPC binaries
//!
//! Usage:
//!   mwsym demangle <SYMBOLS>...     Demangle symbols (or stdin lines)
//!   mwsym symbols <MAP>             List a symbol map with demangled names
//!   mwsym report <MAP> --heat <F>   Build a ranked function-heat report

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "mwsym")]
#[command(about = "Symbol tools for CodeWarrior-built PowerPC binaries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Demangle symbols given as arguments, or stdin lines when none given
    Demangle {
        /// Mangled symbol names
        symbols: Vec<String>,

        /// Print `raw -> demangled` instead of the bare result
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the symbols of a map file with demangled names
    Symbols {
        /// Path to the linker map file
        map: PathBuf,

        /// Also show the raw mangled name in a trailing column
        #[arg(short, long)]
        raw: bool,
    },
    /// Build a ranked per-function heat report from a collected dump
    Report {
        /// Path to the linker map file
        map: PathBuf,

        /// Heat dump: `address frame count` per line
        #[arg(long)]
        heat: PathBuf,

        /// Optional splits file classifying addresses into source files
        #[arg(long)]
        splits: Option<PathBuf>,

        /// Region to bucket by, as TITLE:START:END with hex addresses.
        /// May repeat; defaults to one region spanning everything.
        #[arg(long)]
        region: Vec<String>,

        /// Emit JSON instead of the aligned text table
        #[arg(long)]
        json: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demangle { symbols, verbose } => {
            commands::handle_demangle_command(&symbols, verbose)
        }
        Commands::Symbols { map, raw } => commands::handle_symbols_command(&map, raw),
        Commands::Report {
            map,
            heat,
            splits,
            region,
            json,
            output,
        } => commands::handle_report_command(
            &map,
            &heat,
            splits.as_deref(),
            &region,
            json,
            output.as_deref(),
        ),
    }
}
