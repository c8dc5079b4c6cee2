//! Exit codes of the `harvest` binary. Part of the public contract for scripts
//! that chain harvesting with further analysis.

use harvest_core::HarvestError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_MISMATCH: i32 = 1; // `check` found stale or missing results
pub const EXIT_CONFIG_ERROR: i32 = 2; // Bad config file or flag values
pub const EXIT_IO_ERROR: i32 = 3; // Input/output file could not be read, parsed or written

/// Map a fatal error to its exit code. Harvest errors carry their own code,
/// any other I/O failure in the chain (stdout, `--out`) is an I/O error, and
/// the rest is treated as a configuration problem.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<HarvestError>() {
        return e.exit_code();
    }
    if err.chain().any(|cause| cause.is::<std::io::Error>()) {
        return EXIT_IO_ERROR;
    }
    EXIT_CONFIG_ERROR
}
