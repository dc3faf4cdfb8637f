use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(rename = "userName", default)]
    pub user_name: String,
    // Legacy seed records may omit the list entirely.
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl User {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            activities: Vec::new(),
        }
    }

    pub fn with_activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self
    }
}

/// `id` and `activity_submitted` are optional only so that seed records
/// written before they were tracked still load. Everything created through
/// the mutator carries both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub activity_type: String,
    pub activity_duration: ActivityDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_submitted: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn new(
        id: String,
        activity_type: String,
        activity_duration: ActivityDuration,
        activity_submitted: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            activity_type,
            activity_duration,
            activity_submitted: Some(activity_submitted),
        }
    }

    pub fn has_id(&self, activity_id: &str) -> bool {
        self.id.as_deref() == Some(activity_id)
    }
}

/// Duration as the caller sent it. The unit is a client convention, the
/// service only guarantees the value is a positive number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityDuration(Number);

impl ActivityDuration {
    /// Accepts a JSON number or a numeric string, rejecting anything that is
    /// not strictly positive.
    pub fn from_value(value: &Value) -> Option<Self> {
        let number = match value {
            Value::Number(number) => number.clone(),
            Value::String(text) => text.trim().parse::<Number>().ok()?,
            _ => return None,
        };
        Self::positive(number)
    }

    pub fn positive(number: Number) -> Option<Self> {
        match number.as_f64() {
            Some(value) if value.is_finite() && value > 0.0 => Some(Self(number)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }

    /// Stored values bypass [`Self::from_value`], so the seed loader checks
    /// them again with this.
    pub fn is_positive(&self) -> bool {
        Self::positive(self.0.clone()).is_some()
    }
}

impl From<u32> for ActivityDuration {
    fn from(value: u32) -> Self {
        Self(Number::from(value))
    }
}
