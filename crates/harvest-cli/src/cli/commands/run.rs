use super::log_progress_sink;
use crate::cli::args::{OutputFormat, RunArgs};
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Context;
use harvest_core::report;
use harvest_core::Harvester;

pub async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let mut cfg = args.layout.resolve()?;
    if let Some(style) = args.header_style {
        cfg.header.style = style.into();
    }
    let harvester = Harvester::from_config(&cfg)?;
    tracing::info!(
        experiment = %cfg.layout.experiment_dir().display(),
        tests = cfg.layout.count,
        parallel = cfg.parallel,
        "harvest run"
    );

    // 1. Collect
    let harvest = harvester.collect_all(Some(log_progress_sink())).await?;

    // 2. Report
    let stdout = std::io::stdout();
    let written = match args.format {
        OutputFormat::Text => report::write_text(&harvest, stdout.lock()),
        OutputFormat::Json => report::write_json(&harvest, stdout.lock()),
    };
    written.context("failed to write report to stdout")?;
    if let Some(out) = &args.out {
        report::write_json_file(&harvest, out)
            .with_context(|| format!("failed to write report: {}", out.display()))?;
    }

    // 3. Emit
    if args.no_emit {
        tracing::info!("--no-emit: results files left untouched");
    } else {
        harvester
            .emit_all(&harvest, Some(log_progress_sink()))
            .await?;
    }

    if !args.quiet {
        report::print_summary(&harvest);
    }
    Ok(EXIT_SUCCESS)
}
