// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names shared by storage rows, keyed records and datasets.
pub mod columns {
    pub const ID: &str = "id";
    pub const USER_ID: &str = "user_id";
    pub const DATE: &str = "date";
    pub const TIME_OF_DAY: &str = "time_of_day";
    pub const CATEGORY: &str = "category";
    pub const SUBTYPE: &str = "subtype";
    pub const DURATION: &str = "duration";
    pub const DISTANCE_KM: &str = "distance_km";
    pub const PERCEIVED_EFFORT: &str = "perceived_effort";
    pub const ELEVATION_M: &str = "elevation_m";
    /// Derived, never stored
    pub const PACE: &str = "pace";
    /// Derived, never stored
    pub const PACE_NUMERIC: &str = "pace_numeric";
}

/// Kind of exercise session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Run,
    Ride,
}

impl Category {
    /// Every accepted category, in display order.
    pub const ALL: [Category; 2] = [Category::Run, Category::Ride];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Run => "run",
            Category::Ride => "ride",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Stored activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Assigned by storage on creation
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Date (`YYYY/MM/DD`)
    pub date: String,
    /// Start time (`HH:MM`)
    pub time_of_day: String,
    pub category: Category,
    /// Free-form label, e.g. "trail"
    pub subtype: String,
    /// Moving time (`HH:MM:SS`)
    pub duration: String,
    pub distance_km: f64,
    /// 1 (very easy) to 10 (very hard)
    pub perceived_effort: i64,
    /// Elevation gain in meters, if recorded
    pub elevation_m: Option<i64>,
}

/// Payload for creating an activity (id is assigned by storage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCreate {
    pub user_id: i64,
    pub date: String,
    pub time_of_day: String,
    pub category: Category,
    pub subtype: String,
    pub duration: String,
    pub distance_km: f64,
    pub perceived_effort: i64,
    #[serde(default)]
    pub elevation_m: Option<i64>,
}

impl ActivityCreate {
    /// Attach a storage-assigned id.
    pub fn into_activity(self, id: i64) -> Activity {
        Activity {
            id,
            user_id: self.user_id,
            date: self.date,
            time_of_day: self.time_of_day,
            category: self.category,
            subtype: self.subtype,
            duration: self.duration,
            distance_km: self.distance_km,
            perceived_effort: self.perceived_effort,
            elevation_m: self.elevation_m,
        }
    }
}

/// Partial update of an activity. Only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityUpdate {
    pub user_id: Option<i64>,
    pub date: Option<String>,
    pub time_of_day: Option<String>,
    pub category: Option<Category>,
    pub subtype: Option<String>,
    pub duration: Option<String>,
    pub distance_km: Option<f64>,
    pub perceived_effort: Option<i64>,
    /// `Some(None)` clears a recorded elevation; `None` leaves it alone
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub elevation_m: Option<Option<i64>>,
}

/// Mark a key that was present in the payload, even when its value is null.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ActivityUpdate {
    /// Apply the supplied fields to a stored activity. The id never changes.
    pub fn apply_to(self, activity: &mut Activity) {
        if let Some(user_id) = self.user_id {
            activity.user_id = user_id;
        }
        if let Some(date) = self.date {
            activity.date = date;
        }
        if let Some(time_of_day) = self.time_of_day {
            activity.time_of_day = time_of_day;
        }
        if let Some(category) = self.category {
            activity.category = category;
        }
        if let Some(subtype) = self.subtype {
            activity.subtype = subtype;
        }
        if let Some(duration) = self.duration {
            activity.duration = duration;
        }
        if let Some(distance_km) = self.distance_km {
            activity.distance_km = distance_km;
        }
        if let Some(perceived_effort) = self.perceived_effort {
            activity.perceived_effort = perceived_effort;
        }
        if let Some(elevation_m) = self.elevation_m {
            activity.elevation_m = elevation_m;
        }
    }
}
