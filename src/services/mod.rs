// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - activity data pipeline.

pub mod charts;
pub mod dataset;
pub mod pace;
pub mod projection;
pub mod report;
pub mod validation;
pub mod weekly;

pub use charts::{build_chart, ChartError, ChartKind, ChartSeries};
pub use dataset::{build, Dataset, DatasetRow};
pub use pace::{pace_float, pace_from_duration, Pace};
pub use projection::{project, Record};
pub use report::{load_dataset, no_data_message, DateRange};
pub use validation::{validate_activity_create, validate_activity_update, ValidationReport};
pub use weekly::aggregate_weekly;
