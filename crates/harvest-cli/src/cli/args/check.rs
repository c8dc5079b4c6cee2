//! Check command arguments.

use clap::Parser;

use super::{HeaderStyleArg, LayoutArgs, OutputFormat};

#[derive(Parser, Clone, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Header row layout the results files were written with
    #[arg(long, value_enum)]
    pub header_style: Option<HeaderStyleArg>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
