/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Test helpers. Requires the `test-util` feature.

use std::env;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

const VERBOSE_TEST_LOGS: &str = "VERBOSE_TEST_LOGS";

/// Trace-level output for the model loader and trait crates only.
const COALMINE_TRACE: &str = "coalmine_model=trace,coalmine_traits=trace";

/// Keeps the test log subscriber installed until dropped.
#[derive(Debug)]
pub struct LogCaptureGuard(#[allow(dead_code)] Option<DefaultGuard>);

/// Shows model loading logs in test output when `VERBOSE_TEST_LOGS` is set.
///
/// `1` or `true` enables trace output for the coalmine crates. Any other value
/// is read as an env filter directive such as `coalmine_model=debug`. An
/// unparsable directive is reported on stderr and logging stays off.
#[must_use]
pub fn show_test_logs() -> LogCaptureGuard {
    let Some(directive) = env::var(VERBOSE_TEST_LOGS).ok() else {
        return LogCaptureGuard(None);
    };
    let directive = match directive.as_str() {
        "1" | "true" => COALMINE_TRACE,
        other => other,
    };
    let filter = match EnvFilter::try_new(directive) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("ignoring {VERBOSE_TEST_LOGS}={directive:?}: {err}");
            return LogCaptureGuard(None);
        }
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .finish();
    LogCaptureGuard(Some(tracing::subscriber::set_default(subscriber)))
}
