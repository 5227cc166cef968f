// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chart series built from an activity dataset.
//!
//! These are the plotted values only; drawing them is left to the consumer.

use crate::models::activity::columns;
use crate::services::dataset::Dataset;
use crate::services::weekly::aggregate_weekly;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The charts the plotter knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    PaceVsDate,
    PaceVsDistance,
    PaceVsElevation,
    PaceVsEffort,
    WeeklyDistance,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::PaceVsDate,
        ChartKind::PaceVsDistance,
        ChartKind::PaceVsElevation,
        ChartKind::PaceVsEffort,
        ChartKind::WeeklyDistance,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::PaceVsDate => "pace-vs-date",
            ChartKind::PaceVsDistance => "pace-vs-distance",
            ChartKind::PaceVsElevation => "pace-vs-elevation",
            ChartKind::PaceVsEffort => "pace-vs-effort",
            ChartKind::WeeklyDistance => "weekly-distance",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::PaceVsDate => "Pace vs Date",
            ChartKind::PaceVsDistance => "Pace vs Distance",
            ChartKind::PaceVsElevation => "Pace vs Elevation",
            ChartKind::PaceVsEffort => "Pace vs Perceived Effort",
            ChartKind::WeeklyDistance => "Weekly Distance vs Date",
        }
    }

    fn axis_labels(&self) -> (&'static str, &'static str) {
        const PACE: &str = "Pace (min/km)";
        match self {
            ChartKind::PaceVsDate => ("Date", PACE),
            ChartKind::PaceVsDistance => ("Distance (km)", PACE),
            ChartKind::PaceVsElevation => ("Elevation (m)", PACE),
            ChartKind::PaceVsEffort => ("Perceived Effort (1 (very easy) to 10 (very hard))", PACE),
            ChartKind::WeeklyDistance => ("Date", "Total Distance (km)"),
        }
    }

    /// Whether a linear trendline is fitted through the points.
    fn has_trendline(&self) -> bool {
        matches!(self, ChartKind::PaceVsDistance | ChartKind::PaceVsElevation)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| format!("unknown chart '{s}'"))
    }
}

/// X coordinate of a chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartX {
    Date(#[serde(with = "crate::time_utils::slash_date")] NaiveDate),
    Number(f64),
}

impl fmt::Display for ChartX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartX::Date(d) => write!(f, "{}", d.format(crate::time_utils::DATE_FORMAT)),
            ChartX::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: ChartX,
    pub y: f64,
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
}

impl Trendline {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
    pub trendline: Option<Trendline>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("No data available to plot {0}")]
    NoData(ChartKind),
}

/// Build the series for `kind` from a dataset.
pub fn build_chart(kind: ChartKind, dataset: &Dataset) -> Result<ChartSeries, ChartError> {
    let points: Vec<ChartPoint> = match kind {
        ChartKind::PaceVsDate => dataset
            .rows
            .iter()
            .filter_map(|row| {
                row.date.map(|d| ChartPoint {
                    x: ChartX::Date(d),
                    y: row.pace_numeric,
                })
            })
            .collect(),
        ChartKind::PaceVsDistance => pace_against(dataset, columns::DISTANCE_KM),
        ChartKind::PaceVsElevation => pace_against(dataset, columns::ELEVATION_M),
        ChartKind::PaceVsEffort => pace_against(dataset, columns::PERCEIVED_EFFORT),
        ChartKind::WeeklyDistance => aggregate_weekly(dataset, columns::DATE, columns::DISTANCE_KM)
            .into_iter()
            .map(|bucket| ChartPoint {
                x: ChartX::Date(bucket.week_end),
                y: bucket.total,
            })
            .collect(),
    };

    if points.is_empty() {
        return Err(ChartError::NoData(kind));
    }

    let trendline = if kind.has_trendline() {
        linear_fit(&points)
    } else {
        None
    };
    let (x_label, y_label) = kind.axis_labels();

    Ok(ChartSeries {
        kind,
        title: kind.title(),
        x_label,
        y_label,
        points,
        trendline,
    })
}

/// Pace against a numeric column; rows without that column are dropped.
fn pace_against(dataset: &Dataset, field: &str) -> Vec<ChartPoint> {
    dataset
        .rows
        .iter()
        .filter_map(|row| {
            row.numeric(field).map(|x| ChartPoint {
                x: ChartX::Number(x),
                y: row.pace_numeric,
            })
        })
        .collect()
}

/// Fit a straight line through numeric points. Needs two distinct x values.
pub fn linear_fit(points: &[ChartPoint]) -> Option<Trendline> {
    let xy: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|p| match p.x {
            ChartX::Number(x) => Some((x, p.y)),
            ChartX::Date(_) => None,
        })
        .collect();
    if xy.len() < 2 {
        return None;
    }

    let n = xy.len() as f64;
    let mean_x = xy.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = xy.iter().map(|(_, y)| y).sum::<f64>() / n;
    let sxx: f64 = xy.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = xy.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();

    let slope = sxy / sxx;
    Some(Trendline {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
