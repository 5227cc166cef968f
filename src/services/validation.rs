// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Field-level validation of incoming activity records.
//!
//! Rules are an ordered list of `(field, check)` pairs shared by the create
//! and update paths. Every rule runs, so a caller gets all field errors at
//! once instead of one per request.

use crate::error::DataError;
use crate::models::{ActivityCreate, ActivityUpdate, Category};
use crate::time_utils::{is_valid_date, is_valid_time_of_day, parse_duration_secs, split_duration};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A failure of a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub error: DataError,
}

/// Every field failure found in one record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Format of data incorrect: {}", describe(.errors))]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({})", e.field, e.error))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationReport {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Names of the failing fields, in rule order.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn error_for(&self, field: &str) -> Option<&DataError> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.error)
    }
}

impl From<validator::ValidationErrors> for ValidationReport {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| FieldError {
                    field: field.to_string(),
                    error: DataError::Format(match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("{field} failed '{}' check", err.code),
                    }),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        Self { errors: fields }
    }
}

/// Whether absent fields are an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

type Check = fn(&Value) -> Result<(), DataError>;

struct Rule {
    field: &'static str,
    required: bool,
    check: Check,
}

const ACTIVITY_RULES: &[Rule] = &[
    Rule { field: "user_id", required: true, check: check_user_id },
    Rule { field: "date", required: true, check: check_date },
    Rule { field: "time_of_day", required: true, check: check_time_of_day },
    Rule { field: "category", required: true, check: check_category },
    Rule { field: "subtype", required: true, check: check_subtype },
    Rule { field: "duration", required: true, check: check_duration },
    Rule { field: "distance_km", required: true, check: check_distance },
    Rule { field: "perceived_effort", required: true, check: check_perceived_effort },
    Rule { field: "elevation_m", required: false, check: check_elevation },
];

/// Validate a create payload and convert it into a typed record.
pub fn validate_activity_create(
    payload: &Map<String, Value>,
) -> Result<ActivityCreate, ValidationReport> {
    run_rules(payload, Mode::Create)?;
    into_typed(payload)
}

/// Validate a partial update payload and convert it into a typed patch.
pub fn validate_activity_update(
    payload: &Map<String, Value>,
) -> Result<ActivityUpdate, ValidationReport> {
    run_rules(payload, Mode::Update)?;
    into_typed(payload)
}

fn run_rules(payload: &Map<String, Value>, mode: Mode) -> Result<(), ValidationReport> {
    let errors: Vec<FieldError> = ACTIVITY_RULES
        .iter()
        .filter_map(|rule| {
            let outcome = match payload.get(rule.field) {
                Some(value) => (rule.check)(value),
                None if rule.required && mode == Mode::Create => Err(DataError::Missing(
                    format!("{} is required", rule.field),
                )),
                None => Ok(()),
            };
            outcome.err().map(|error| FieldError {
                field: rule.field.to_string(),
                error,
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport { errors })
    }
}

/// Integer fields; whole-number floats such as `5.0` are accepted for them.
const INTEGER_FIELDS: [&str; 3] = ["user_id", "perceived_effort", "elevation_m"];

/// An integer, or a float with no fractional part that fits in an `i64`.
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0)
            .map(|f| f as i64)
    })
}

fn into_typed<T: DeserializeOwned>(payload: &Map<String, Value>) -> Result<T, ValidationReport> {
    let mut payload = payload.clone();
    for field in INTEGER_FIELDS {
        if let Some(value) = payload.get_mut(field) {
            if let Some(n) = whole_number(value) {
                *value = Value::from(n);
            }
        }
    }
    serde_json::from_value(Value::Object(payload)).map_err(|e| ValidationReport {
        errors: vec![FieldError {
            field: "body".to_string(),
            error: DataError::Format(e.to_string()),
        }],
    })
}

fn check_user_id(value: &Value) -> Result<(), DataError> {
    whole_number(value)
        .map(|_| ())
        .ok_or_else(|| DataError::Format("user_id must be an integer".to_string()))
}

fn check_date(value: &Value) -> Result<(), DataError> {
    match value.as_str() {
        Some(text) if is_valid_date(text) => Ok(()),
        _ => Err(DataError::Format(
            "date does not match format 'YYYY/MM/DD'".to_string(),
        )),
    }
}

fn check_time_of_day(value: &Value) -> Result<(), DataError> {
    match value.as_str() {
        Some(text) if is_valid_time_of_day(text) => Ok(()),
        _ => Err(DataError::Format(
            "time_of_day does not match format 'HH:MM'".to_string(),
        )),
    }
}

fn check_category(value: &Value) -> Result<(), DataError> {
    match value.as_str().map(str::parse::<Category>) {
        Some(Ok(_)) => Ok(()),
        _ => {
            let allowed: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
            Err(DataError::Enum(format!(
                "category not in allowed set [{}]",
                allowed.join(", ")
            )))
        }
    }
}

fn check_subtype(value: &Value) -> Result<(), DataError> {
    value
        .as_str()
        .map(|_| ())
        .ok_or_else(|| DataError::Format("subtype must be a string".to_string()))
}

fn check_duration(value: &Value) -> Result<(), DataError> {
    let text = value.as_str().ok_or_else(|| {
        DataError::Format("duration does not match HH:MM:SS".to_string())
    })?;
    let [_, minutes, seconds] = split_duration(text)?;
    if minutes > 59 || seconds > 59 {
        return Err(DataError::Range(
            "duration minutes and seconds must be in range 0 - 59".to_string(),
        ));
    }
    parse_duration_secs(text).map(|_| ())
}

fn check_distance(value: &Value) -> Result<(), DataError> {
    let distance = value
        .as_f64()
        .ok_or_else(|| DataError::Format("distance_km must be a number".to_string()))?;
    if distance > 0.0 {
        Ok(())
    } else {
        Err(DataError::Range(
            "distance_km must be greater than 0".to_string(),
        ))
    }
}

fn check_perceived_effort(value: &Value) -> Result<(), DataError> {
    let effort = whole_number(value).ok_or_else(|| {
        DataError::Format("perceived_effort not a valid number in the range 1 - 10".to_string())
    })?;
    if (1..=10).contains(&effort) {
        Ok(())
    } else {
        Err(DataError::Range(
            "perceived_effort not in range 1 - 10".to_string(),
        ))
    }
}

fn check_elevation(value: &Value) -> Result<(), DataError> {
    if value.is_null() || whole_number(value).is_some() {
        Ok(())
    } else {
        Err(DataError::Format(
            "elevation_m must be an integer or null".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn valid_activity() -> Map<String, Value> {
        payload(json!({
            "user_id": 1,
            "date": "2025/03/04",
            "time_of_day": "17:30",
            "category": "run",
            "subtype": "trail",
            "duration": "00:30:00",
            "distance_km": 5,
            "perceived_effort": 5,
            "elevation_m": 5
        }))
    }

    #[test]
    fn test_valid_create_converts_to_typed() {
        let created = validate_activity_create(&valid_activity()).unwrap();
        assert_eq!(created.category, Category::Run);
        assert_eq!(created.distance_km, 5.0);
        assert_eq!(created.elevation_m, Some(5));
    }

    #[test]
    fn test_elevation_is_optional_on_create() {
        let mut body = valid_activity();
        body.remove("elevation_m");
        assert_eq!(validate_activity_create(&body).unwrap().elevation_m, None);

        body.insert("elevation_m".to_string(), Value::Null);
        assert_eq!(validate_activity_create(&body).unwrap().elevation_m, None);
    }

    #[test]
    fn test_unknown_category_is_enum_error() {
        let mut body = valid_activity();
        body.insert("category".to_string(), json!("running"));

        let report = validate_activity_create(&body).unwrap_err();
        assert_eq!(report.fields(), vec!["category"]);
        assert!(matches!(report.error_for("category"), Some(DataError::Enum(_))));
    }

    #[test]
    fn test_collects_every_failing_field() {
        let mut body = valid_activity();
        body.insert("date".to_string(), json!("25 March 25"));
        body.insert("time_of_day".to_string(), json!("7.30pm"));
        body.insert("category".to_string(), json!("running"));
        body.insert("duration".to_string(), json!("30mins 5secs"));
        body.insert("perceived_effort".to_string(), json!(100));

        let report = validate_activity_create(&body).unwrap_err();
        assert_eq!(
            report.fields(),
            vec!["date", "time_of_day", "category", "duration", "perceived_effort"]
        );
        assert!(matches!(report.error_for("perceived_effort"), Some(DataError::Range(_))));
        assert!(report.to_string().starts_with("Format of data incorrect:"));
    }

    #[test]
    fn test_create_requires_fields() {
        let body = payload(json!({ "user_id": 1, "date": "2025/03/04" }));
        let report = validate_activity_create(&body).unwrap_err();
        assert_eq!(
            report.fields(),
            vec![
                "time_of_day",
                "category",
                "subtype",
                "duration",
                "distance_km",
                "perceived_effort"
            ]
        );
        assert!(matches!(report.error_for("subtype"), Some(DataError::Missing(_))));
    }

    #[test]
    fn test_update_only_checks_supplied_fields() {
        let body = payload(json!({ "subtype": "road" }));
        let update = validate_activity_update(&body).unwrap();
        assert_eq!(update.subtype.as_deref(), Some("road"));
        assert_eq!(update.date, None);
    }

    #[test]
    fn test_update_rejects_wrong_types() {
        let body = payload(json!({
            "date": 2025,
            "time_of_day": "5pm",
            "duration": 15,
            "category": "running",
            "perceived_effort": 100
        }));
        let report = validate_activity_update(&body).unwrap_err();
        assert_eq!(
            report.fields(),
            vec!["date", "time_of_day", "category", "duration", "perceived_effort"]
        );
    }

    #[test]
    fn test_duration_components_range_checked() {
        let mut body = valid_activity();
        body.insert("duration".to_string(), json!("01:75:00"));
        let report = validate_activity_create(&body).unwrap_err();
        assert!(matches!(report.error_for("duration"), Some(DataError::Range(_))));

        // Large hour counts are fine
        body.insert("duration".to_string(), json!("30:00:00"));
        assert!(validate_activity_create(&body).is_ok());

        // ...until the total no longer fits in seconds
        body.insert("duration".to_string(), json!("9999999999999999:00:00"));
        let report = validate_activity_create(&body).unwrap_err();
        assert!(matches!(report.error_for("duration"), Some(DataError::Range(_))));
    }

    #[test]
    fn test_distance_must_be_positive() {
        let mut body = valid_activity();
        body.insert("distance_km".to_string(), json!(0));
        let report = validate_activity_create(&body).unwrap_err();
        assert!(matches!(report.error_for("distance_km"), Some(DataError::Range(_))));

        body.insert("distance_km".to_string(), json!("five"));
        let report = validate_activity_create(&body).unwrap_err();
        assert!(matches!(report.error_for("distance_km"), Some(DataError::Format(_))));
    }

    #[test]
    fn test_whole_number_floats_count_as_integers() {
        let mut body = valid_activity();
        body.insert("perceived_effort".to_string(), json!(5.0));
        body.insert("elevation_m".to_string(), json!(120.0));
        let created = validate_activity_create(&body).unwrap();
        assert_eq!(created.perceived_effort, 5);
        assert_eq!(created.elevation_m, Some(120));

        body.insert("perceived_effort".to_string(), json!(5.5));
        let report = validate_activity_create(&body).unwrap_err();
        assert_eq!(report.fields(), vec!["perceived_effort"]);
        assert!(matches!(report.error_for("perceived_effort"), Some(DataError::Format(_))));

        body.insert("perceived_effort".to_string(), json!(11.0));
        let report = validate_activity_create(&body).unwrap_err();
        assert!(matches!(report.error_for("perceived_effort"), Some(DataError::Range(_))));
    }

    #[test]
    fn test_update_null_elevation_is_kept_as_clear() {
        let body = payload(json!({ "elevation_m": null }));
        let update = validate_activity_update(&body).unwrap();
        assert_eq!(update.elevation_m, Some(None));

        let update = validate_activity_update(&payload(json!({ "elevation_m": 7.0 }))).unwrap();
        assert_eq!(update.elevation_m, Some(Some(7)));
    }

    #[test]
    fn test_effort_non_numeric_is_format_error() {
        let mut body = valid_activity();
        body.insert("perceived_effort".to_string(), json!("hard"));
        let report = validate_activity_create(&body).unwrap_err();
        assert!(matches!(report.error_for("perceived_effort"), Some(DataError::Format(_))));
    }
}
