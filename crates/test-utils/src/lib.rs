//! Shared helpers for the `wcc` integration tests: in-memory fetcher and
//! mailer, builders, and a unified-diff applier.

pub mod builders;
pub mod fakes;
pub mod patch;

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Route checker logs into the test harness.
///
/// Output is only shown for failing tests. The filter comes from the same
/// `WCC_LOG` variable the binary reads, e.g. `WCC_LOG=wcc=debug`, and
/// defaults to `info` so the per-site outcome lines show up.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(wcc::logging::LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        fmt().with_env_filter(filter).with_test_writer().init();
    });
}
