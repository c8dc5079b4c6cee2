use super::log_progress_sink;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::exit_codes::{EXIT_MISMATCH, EXIT_SUCCESS};
use harvest_core::{CheckOutcome, Harvester, TestCheck};

pub async fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let mut cfg = args.layout.resolve()?;
    if let Some(style) = args.header_style {
        cfg.header.style = style.into();
    }
    let harvester = Harvester::from_config(&cfg)?;
    let checks = harvester.check_all(Some(log_progress_sink())).await?;
    let failing = checks.iter().filter(|c| !c.outcome.is_match()).count();

    match args.format {
        OutputFormat::Text => {
            for check in &checks {
                println!("{}", format_check(check, &cfg.layout.output_file));
            }
            eprintln!("{}/{} tests match", checks.len() - failing, checks.len());
        }
        OutputFormat::Json => {
            let v = serde_json::json!({
                "experiment": cfg.layout.experiment,
                "failing": failing,
                "tests": checks,
            });
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
    }

    Ok(if failing == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_MISMATCH
    })
}

fn format_check(check: &TestCheck, output_file: &str) -> String {
    let name = check.index.dir_name();
    match &check.outcome {
        CheckOutcome::Match { count } => format!("{}: ok ({} values)", name, count),
        CheckOutcome::CountMismatch { expected, actual } => format!(
            "{}: count mismatch (expected {}, found {})",
            name, expected, actual
        ),
        CheckOutcome::ValueMismatch {
            row,
            expected,
            actual,
        } => format!(
            "{}: value mismatch at row {} (expected {:?}, found {:?})",
            name,
            row + 1,
            expected,
            actual
        ),
        CheckOutcome::MissingOutput => format!("{}: missing {}", name, output_file),
    }
}
