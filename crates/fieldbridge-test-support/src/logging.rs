//! Subscriber setup for test runs.

use std::sync::Once;

use fieldbridge_telemetry::{LogFormat, LoggingConfig, init_logging};

static INIT: Once = Once::new();

/// Install a pretty subscriber at `trace` for the marshaling engine and `debug` for catalog loading, once per process.
///
/// Later calls are no-ops; an already-installed global subscriber is left in place.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: "fieldbridge_core=trace,fieldbridge_config=debug",
            format: LogFormat::Pretty,
        };
        let _ = init_logging(&config);
    });
}
