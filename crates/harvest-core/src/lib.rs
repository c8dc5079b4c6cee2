pub mod check;
pub mod config;
pub mod dialect;
pub mod emit;
pub mod errors;
pub mod extract;
pub mod layout;
pub mod model;
pub mod report;
pub mod runner;

// Convenience re-exports
pub use check::{check_test, read_results, CheckOutcome, TestCheck};
pub use config::HarvestConfig;
pub use dialect::{Dialect, LineTerminator};
pub use emit::{emit_test, write_results, HeaderConfig, HeaderStyle};
pub use errors::HarvestError;
pub use extract::{collect_test, extract_values, ExtractRule};
pub use layout::{Layout, TestIndex};
pub use model::{Harvest, TestValues, Value};
pub use runner::{Harvester, ProgressEvent, ProgressSink};
