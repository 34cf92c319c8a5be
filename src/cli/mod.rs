// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for cubitcmd

pub mod reporter;

pub use reporter::{PlanSummary, Reporter};

/// Install the tracing subscriber used by the CLI.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug output for
/// this crate when `verbose` is on.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "warn,cubitcmd=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
