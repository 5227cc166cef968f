// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod stats;
pub mod user;

pub use activity::{Activity, ActivityCreate, ActivityUpdate, Category};
pub use stats::WeeklyBucket;
pub use user::{User, UserCreate, UserPublic, UserUpdate};
