use clap::{Parser, Subcommand};

pub mod check;
pub mod common;
pub mod run;
pub use check::*;
pub use common::*;
pub use run::*;

#[derive(Parser)]
#[command(
    name = "harvest",
    version,
    about = "Extract per-test runtimes from experiment result files and rewrite them as results.csv"
)]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `run` with the built-in layout
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Collect values, print one line per test, write results.csv files
    Run(RunArgs),
    /// Compare existing results.csv files with their output.csv inputs
    Check(CheckArgs),
    Version,
}
