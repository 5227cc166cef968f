// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite storage with typed operations.
//!
//! Provides high-level operations for:
//! - Users (`user_table`)
//! - Activities (`activity_table`)
//! - Raw activity rows for building datasets
//!
//! The handle is cheap to clone and is passed explicitly to whoever needs
//! storage. Each operation takes the connection for the duration of one
//! closure on a blocking worker thread and releases it on return.

use crate::error::AppError;
use crate::models::{Activity, ActivityCreate, ActivityUpdate, Category, User, UserCreate, UserUpdate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS user_table (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    email   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS activity_table (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id          INTEGER NOT NULL REFERENCES user_table(user_id) ON DELETE CASCADE,
    date             TEXT NOT NULL,
    time_of_day      TEXT NOT NULL,
    category         TEXT NOT NULL CHECK (category IN ('run', 'ride')),
    subtype          TEXT NOT NULL,
    duration         TEXT NOT NULL,
    distance_km      REAL NOT NULL,
    perceived_effort INTEGER NOT NULL,
    elevation_m      INTEGER
);

CREATE INDEX IF NOT EXISTS idx_activity_user_date ON activity_table (user_id, date);
";

const ACTIVITY_COLUMNS: &str = "id, user_id, date, time_of_day, category, subtype, duration, \
                                distance_km, perceived_effort, elevation_m";

/// Positional rows plus the column names they line up with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// SQLite database handle.
#[derive(Clone)]
pub struct SqliteDb {
    conn: Arc<Mutex<Connection>>,
}

fn db_err(e: rusqlite::Error) -> AppError {
    AppError::Database(e.to_string())
}

impl SqliteDb {
    /// Open (or create) a database file and make sure the tables exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            AppError::Database(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let db = Self::from_connection(conn)?;
        tracing::info!(path = %path.display(), "Opened SQLite database");
        Ok(db)
    }

    /// Open a private in-memory database (tests, throwaway runs).
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, AppError> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(db_err)?;
        conn.execute_batch(SCHEMA).map_err(db_err)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `task` with exclusive use of the connection.
    async fn execute<F, T>(&self, task: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            task(&mut guard)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Database task failed: {}", e)))?
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user and return it with its assigned id.
    pub async fn create_user(&self, user: UserCreate) -> Result<User, AppError> {
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO user_table (name, email) VALUES (?1, ?2)",
                params![user.name, user.email],
            )
            .map_err(db_err)?;
            let user_id = conn.last_insert_rowid();
            tracing::info!(user_id, "Created user");
            Ok(User {
                user_id,
                name: user.name,
                email: user.email,
            })
        })
        .await
    }

    /// List users ordered by id.
    pub async fn list_users(&self, offset: u32, limit: u32) -> Result<Vec<User>, AppError> {
        self.execute(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT user_id, name, email FROM user_table
                     ORDER BY user_id LIMIT ?1 OFFSET ?2",
                )
                .map_err(db_err)?;
            let users = stmt
                .query_map(params![limit, offset], row_to_user)
                .map_err(db_err)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(db_err)?;
            Ok(users)
        })
        .await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.execute(move |conn| fetch_user(conn, user_id)).await
    }

    /// Apply a partial update. Returns `None` if the user does not exist.
    pub async fn update_user(
        &self,
        user_id: i64,
        update: UserUpdate,
    ) -> Result<Option<User>, AppError> {
        self.execute(move |conn| {
            let tx = conn.transaction().map_err(db_err)?;
            let Some(mut user) = fetch_user(&tx, user_id)? else {
                return Ok(None);
            };
            update.apply_to(&mut user);
            tx.execute(
                "UPDATE user_table SET name = ?1, email = ?2 WHERE user_id = ?3",
                params![user.name, user.email, user_id],
            )
            .map_err(db_err)?;
            tx.commit().map_err(db_err)?;
            Ok(Some(user))
        })
        .await
    }

    /// Delete a user and, through the foreign key, their activities.
    /// Returns `false` if there was no such user.
    pub async fn delete_user(&self, user_id: i64) -> Result<bool, AppError> {
        self.execute(move |conn| {
            let deleted = conn
                .execute("DELETE FROM user_table WHERE user_id = ?1", params![user_id])
                .map_err(db_err)?;
            if deleted > 0 {
                tracing::info!(user_id, "Deleted user");
            }
            Ok(deleted > 0)
        })
        .await
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Store a validated activity and return it with its assigned id.
    pub async fn create_activity(&self, activity: ActivityCreate) -> Result<Activity, AppError> {
        self.execute(move |conn| {
            ensure_user_exists(conn, activity.user_id)?;
            conn.execute(
                "INSERT INTO activity_table
                     (user_id, date, time_of_day, category, subtype, duration,
                      distance_km, perceived_effort, elevation_m)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    activity.user_id,
                    activity.date,
                    activity.time_of_day,
                    activity.category,
                    activity.subtype,
                    activity.duration,
                    activity.distance_km,
                    activity.perceived_effort,
                    activity.elevation_m,
                ],
            )
            .map_err(db_err)?;
            let id = conn.last_insert_rowid();
            tracing::info!(id, user_id = activity.user_id, "Created activity");
            Ok(activity.into_activity(id))
        })
        .await
    }

    /// List activities ordered by id.
    pub async fn list_activities(&self, offset: u32, limit: u32) -> Result<Vec<Activity>, AppError> {
        self.execute(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {ACTIVITY_COLUMNS} FROM activity_table ORDER BY id LIMIT ?1 OFFSET ?2"
                ))
                .map_err(db_err)?;
            let activities = stmt
                .query_map(params![limit, offset], row_to_activity)
                .map_err(db_err)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(db_err)?;
            Ok(activities)
        })
        .await
    }

    pub async fn get_activity(&self, id: i64) -> Result<Option<Activity>, AppError> {
        self.execute(move |conn| fetch_activity(conn, id)).await
    }

    /// Apply a validated partial update. Returns `None` if the activity does
    /// not exist.
    pub async fn update_activity(
        &self,
        id: i64,
        update: ActivityUpdate,
    ) -> Result<Option<Activity>, AppError> {
        self.execute(move |conn| {
            let tx = conn.transaction().map_err(db_err)?;
            let Some(mut activity) = fetch_activity(&tx, id)? else {
                return Ok(None);
            };
            if let Some(user_id) = update.user_id {
                ensure_user_exists(&tx, user_id)?;
            }
            update.apply_to(&mut activity);
            tx.execute(
                "UPDATE activity_table
                 SET user_id = ?1, date = ?2, time_of_day = ?3, category = ?4, subtype = ?5,
                     duration = ?6, distance_km = ?7, perceived_effort = ?8, elevation_m = ?9
                 WHERE id = ?10",
                params![
                    activity.user_id,
                    activity.date,
                    activity.time_of_day,
                    activity.category,
                    activity.subtype,
                    activity.duration,
                    activity.distance_km,
                    activity.perceived_effort,
                    activity.elevation_m,
                    id,
                ],
            )
            .map_err(db_err)?;
            tx.commit().map_err(db_err)?;
            Ok(Some(activity))
        })
        .await
    }

    /// Returns `false` if there was no such activity.
    pub async fn delete_activity(&self, id: i64) -> Result<bool, AppError> {
        self.execute(move |conn| {
            let deleted = conn
                .execute("DELETE FROM activity_table WHERE id = ?1", params![id])
                .map_err(db_err)?;
            Ok(deleted > 0)
        })
        .await
    }

    // ─── Dataset Queries ─────────────────────────────────────────

    /// Raw activity rows for one user with `start < date < end`, ordered by
    /// date then id. Bounds are `YYYY/MM/DD` text, which sorts correctly.
    pub async fn select_activity_rows(
        &self,
        user_id: i64,
        start: &str,
        end: &str,
    ) -> Result<QueryRows, AppError> {
        let start = start.to_string();
        let end = end.to_string();
        self.execute(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {ACTIVITY_COLUMNS} FROM activity_table
                     WHERE user_id = ?1 AND date > ?2 AND date < ?3
                     ORDER BY date, id"
                ))
                .map_err(db_err)?;
            let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
            let width = columns.len();
            let rows = stmt
                .query_map(params![user_id, start, end], |row| {
                    (0..width)
                        .map(|i| row.get_ref(i).map(json_value))
                        .collect::<rusqlite::Result<Vec<_>>>()
                })
                .map_err(db_err)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(db_err)?;
            tracing::debug!(user_id, rows = rows.len(), "Selected activity rows");
            Ok(QueryRows { columns, rows })
        })
        .await
    }
}

fn fetch_user(conn: &Connection, user_id: i64) -> Result<Option<User>, AppError> {
    conn.query_row(
        "SELECT user_id, name, email FROM user_table WHERE user_id = ?1",
        params![user_id],
        row_to_user,
    )
    .optional()
    .map_err(db_err)
}

fn fetch_activity(conn: &Connection, id: i64) -> Result<Option<Activity>, AppError> {
    conn.query_row(
        &format!("SELECT {ACTIVITY_COLUMNS} FROM activity_table WHERE id = ?1"),
        params![id],
        row_to_activity,
    )
    .optional()
    .map_err(db_err)
}

fn ensure_user_exists(conn: &Connection, user_id: i64) -> Result<(), AppError> {
    if fetch_user(conn, user_id)?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", user_id)));
    }
    Ok(())
}

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
    })
}

fn row_to_activity(row: &Row) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: row.get("date")?,
        time_of_day: row.get("time_of_day")?,
        category: row.get("category")?,
        subtype: row.get("subtype")?,
        duration: row.get("duration")?,
        distance_km: row.get("distance_km")?,
        perceived_effort: row.get("perceived_effort")?,
        elevation_m: row.get("elevation_m")?,
    })
}

fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Value::from(f),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}
