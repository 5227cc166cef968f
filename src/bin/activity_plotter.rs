// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive chart viewer over the activity database.

use activity_tracker::{
    config::Config,
    plotter::{run_session, Prompter},
    AppState,
};
use anyhow::Context;
use std::io;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Human-readable logs on stderr so they stay out of the prompts
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::open(config).context("Failed to open database")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    run_session(&state.db, &mut prompter).await
}
