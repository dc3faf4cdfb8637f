use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{errors::AppError, store::ActivityDuration};

/// Body of `POST /activities` and `PUT /activities`. Every field is kept as a
/// raw JSON value so that a wrong type is reported as a missing field instead
/// of a deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ActivityPayload {
    #[validate(required, custom(function = "identifier_field"))]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub activity_id: Option<Value>,
    #[validate(required, custom(function = "text_field"))]
    pub activity_type: Option<Value>,
    #[validate(required, custom(function = "duration_field"))]
    pub activity_duration: Option<Value>,
}

/// Body of `DELETE /activities/{activity_id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RemovalPayload {
    #[validate(required, custom(function = "identifier_field"))]
    pub user_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: String,
    pub activity_type: String,
    pub activity_duration: ActivityDuration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityUpsert {
    pub activity_id: String,
    pub activity: NewActivity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRemoval {
    pub user_id: String,
    pub activity_id: String,
}

const PAYLOAD_FIELDS: [&str; 4] = ["user_id", "activity_id", "activity_type", "activity_duration"];

pub fn validate_create(payload: &ActivityPayload) -> Result<NewActivity, AppError> {
    let missing = missing_fields(payload.validate());
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }
    new_activity(payload)
}

/// Same checks as [`validate_create`] plus a mandatory `activity_id`.
pub fn validate_upsert(payload: &ActivityPayload) -> Result<ActivityUpsert, AppError> {
    let mut missing = missing_fields(payload.validate());
    let activity_id = payload.activity_id.as_ref().and_then(identifier);
    if activity_id.is_none() {
        missing.push("activity_id");
        missing.sort_by_key(|field| PAYLOAD_FIELDS.iter().position(|f| f == field));
    }
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    Ok(ActivityUpsert {
        activity_id: activity_id.ok_or_else(|| AppError::missing("activity_id"))?,
        activity: new_activity(payload)?,
    })
}

pub fn validate_delete(
    payload: &RemovalPayload,
    url_activity_id: &str,
) -> Result<ActivityRemoval, AppError> {
    let mut missing = missing_fields(payload.validate());
    let activity_id = plain_identifier(url_activity_id);
    if activity_id.is_none() {
        missing.push("activity_id");
    }
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    Ok(ActivityRemoval {
        user_id: required(&payload.user_id, "user_id", identifier)?,
        activity_id: activity_id.ok_or_else(|| AppError::missing("activity_id"))?,
    })
}

fn new_activity(payload: &ActivityPayload) -> Result<NewActivity, AppError> {
    Ok(NewActivity {
        user_id: required(&payload.user_id, "user_id", identifier)?,
        activity_type: required(&payload.activity_type, "activity_type", text)?,
        activity_duration: required(
            &payload.activity_duration,
            "activity_duration",
            ActivityDuration::from_value,
        )?,
    })
}

fn required<T>(
    value: &Option<Value>,
    field: &'static str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Result<T, AppError> {
    value
        .as_ref()
        .and_then(convert)
        .ok_or_else(|| AppError::missing(field))
}

fn missing_fields(result: Result<(), ValidationErrors>) -> Vec<&'static str> {
    let Err(errors) = result else {
        return Vec::new();
    };
    let field_errors = errors.field_errors();
    PAYLOAD_FIELDS
        .into_iter()
        .filter(|field| field_errors.contains_key(*field))
        .collect()
}

/// Non empty string, or a number that loosely typed clients send as an id.
/// Ids are compared byte for byte with the stored ones and with the
/// `/{user_id}` path segment, so surrounding whitespace is refused rather
/// than trimmed away.
fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => plain_identifier(text),
        _ => None,
    }
}

fn plain_identifier(text: &str) -> Option<String> {
    (!text.is_empty() && text.trim() == text).then(|| text.to_owned())
}

fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn identifier_field(value: &Value) -> Result<(), ValidationError> {
    identifier(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("empty"))
}

fn text_field(value: &Value) -> Result<(), ValidationError> {
    text(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("empty"))
}

fn duration_field(value: &Value) -> Result<(), ValidationError> {
    ActivityDuration::from_value(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("not_positive_number"))
}
