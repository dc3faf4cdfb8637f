use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::store::{Activity, ActivityDuration, User};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub user_id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub data: Vec<ActivityView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityView {
    pub id: String,
    pub activity_type: String,
    pub activity_duration: ActivityDuration,
    pub activity_submitted: DateTime<Utc>,
}

pub fn map_users(users: &[User]) -> Vec<UserView> {
    users.iter().map(map_user).collect()
}

pub fn map_user(user: &User) -> UserView {
    UserView {
        user_id: user.user_id.clone(),
        user_name: user.user_name.clone(),
        data: user
            .activities
            .iter()
            .enumerate()
            .map(|(position, activity)| map_activity(&user.user_id, position, activity))
            .collect(),
    }
}

/// Fills `id` and `activity_submitted` for records seeded before they were
/// tracked. The defaults only live in the response, so they are derived from
/// the record's owner and position to keep repeated reads identical.
///
/// A defaulted id is tied to `position`: deleting an earlier activity of the
/// same user shifts the record and changes the id it is reported under. The
/// id is never stored either, so a `PUT /activities` carrying it finds no
/// match and inserts a new activity instead of updating the legacy one.
pub fn map_activity(user_id: &str, position: usize, activity: &Activity) -> ActivityView {
    ActivityView {
        id: activity
            .id
            .clone()
            .unwrap_or_else(|| default_id(user_id, position)),
        activity_type: activity.activity_type.clone(),
        activity_duration: activity.activity_duration.clone(),
        activity_submitted: activity
            .activity_submitted
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    }
}

/// View of a record the mutator just wrote, which always carries both
/// fields. `None` means the record was not produced by the mutator.
pub fn map_written(activity: &Activity) -> Option<ActivityView> {
    Some(ActivityView {
        id: activity.id.clone()?,
        activity_type: activity.activity_type.clone(),
        activity_duration: activity.activity_duration.clone(),
        activity_submitted: activity.activity_submitted?,
    })
}

fn default_id(user_id: &str, position: usize) -> String {
    Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("{user_id}/{position}").as_bytes(),
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn legacy_user() -> User {
        serde_json::from_value(json!({
            "user_id": "u1",
            "userName": "Ann",
            "activities": [
                {"activity_type": "run", "activity_duration": 10},
                {
                    "id": "a2",
                    "activity_type": "swim",
                    "activity_duration": 25,
                    "activity_submitted": "2024-05-01T12:30:00Z"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn wire_shape_uses_data_for_activities() {
        let value = serde_json::to_value(map_user(&legacy_user())).unwrap();

        assert_eq!(value["user_id"], json!("u1"));
        assert_eq!(value["userName"], json!("Ann"));
        assert_eq!(value["data"][1]["id"], json!("a2"));
        assert_eq!(value["data"][1]["activity_duration"], json!(25));
        assert_eq!(
            value["data"][1]["activity_submitted"],
            json!("2024-05-01T12:30:00Z")
        );
    }

    #[test]
    fn legacy_records_get_defaults_in_the_response_only() {
        let user = legacy_user();
        let view = map_user(&user);

        assert!(!view.data[0].id.is_empty());
        assert_eq!(view.data[0].activity_submitted, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(user.activities[0].id, None);
        assert_eq!(user.activities[0].activity_submitted, None);
    }

    #[test]
    fn defaults_are_stable_across_reads() {
        let user = legacy_user();
        assert_eq!(map_user(&user), map_user(&user));
        assert_ne!(default_id("u1", 0), default_id("u1", 1));
        assert_ne!(default_id("u1", 0), default_id("u2", 0));
    }

    #[test]
    fn written_records_map_without_defaults() {
        let user = legacy_user();
        assert!(map_written(&user.activities[0]).is_none());

        let view = map_written(&user.activities[1]).unwrap();
        assert_eq!(view.id, "a2");
    }

    #[test]
    fn maps_every_user() {
        let users = vec![legacy_user(), User::new("u2", "Bob")];
        let views = map_users(&users);
        assert_eq!(views.len(), 2);
        assert!(views[1].data.is_empty());
    }
}
