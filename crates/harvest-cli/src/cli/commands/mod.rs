use super::args::*;
use harvest_core::{ProgressEvent, ProgressSink};
use std::sync::Arc;

pub mod check;
pub mod run;

use crate::exit_codes::EXIT_SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        None => run::run(RunArgs::default()).await,
        Some(Command::Run(args)) => run::run(args).await,
        Some(Command::Check(args)) => check::run(args).await,
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}

/// Progress goes to the log only; stdout is reserved for the report.
pub(crate) fn log_progress_sink() -> ProgressSink {
    Arc::new(|ev: ProgressEvent| {
        tracing::debug!(phase = ev.phase, "{}/{}", ev.done, ev.total);
    })
}
