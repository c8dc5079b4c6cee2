//! Run command arguments.

use std::path::PathBuf;

use clap::Parser;

use super::{HeaderStyleArg, LayoutArgs, OutputFormat};

#[derive(Parser, Clone, Debug, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Header row layout of the written results files
    #[arg(long, value_enum)]
    pub header_style: Option<HeaderStyleArg>,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this path
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Collect and report only; leave results files untouched
    #[arg(long)]
    pub no_emit: bool,

    /// Skip the summary line on stderr
    #[arg(short, long)]
    pub quiet: bool,
}
