// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity-Tracker: log runs and rides, derive pace, and chart progress.
//!
//! This crate provides the HTTP API for user and activity records, the
//! dataset pipeline behind the charts, and the interactive plotting CLI.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod plotter;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SqliteDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SqliteDb,
}

impl AppState {
    /// Open the configured database and wrap it with the config.
    pub fn open(config: Config) -> Result<Self, error::AppError> {
        let db = if config.uses_in_memory_db() {
            SqliteDb::open_in_memory()?
        } else {
            SqliteDb::open(&config.database_path)?
        };
        Ok(Self { config, db })
    }
}
