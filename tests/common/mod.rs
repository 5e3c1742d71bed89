//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use proptest::test_runner::Config as ProptestConfig;

static INIT_LOGGING: Once = Once::new();

/// Environment variable overriding the number of proptest cases.
const PROPTEST_CASES_ENV: &str = "DATASTREAM_PROPTEST_CASES";

/// Initialize test logging with trace-level output.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .try_init();
    });
}

/// Build a proptest configuration running `cases` cases, unless overridden from the environment.
#[must_use]
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    let cases = std::env::var(PROPTEST_CASES_ENV)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(cases);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
