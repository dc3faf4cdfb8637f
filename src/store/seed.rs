use std::{fs::File, io::BufReader, path::Path};

use serde_json::Value;

use crate::errors::AppError;

use super::{models::User, record_store::RecordStore};

/// Loads the initial users from a JSON document holding an array of users.
/// The store is only read once at startup, nothing is ever written back.
pub fn load_seed(path: impl AsRef<Path>) -> Result<RecordStore, AppError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        tracing::warn!("no seed file configured, starting with an empty store");
        return Ok(RecordStore::default());
    }

    let file = File::open(path).map_err(|e| {
        AppError::custom_internal(&format!("cannot open seed file {}: {e}", path.display()))
    })?;
    let document: Value = serde_json::from_reader(BufReader::new(file))?;
    let store = parse_seed(document)?;

    tracing::info!(path = %path.display(), users = store.len(), "seed loaded");
    Ok(store)
}

pub fn parse_seed(document: Value) -> Result<RecordStore, AppError> {
    if !document.is_array() {
        return Err(AppError::StoreShape(
            "the seed must be an array of users".into(),
        ));
    }
    let users: Vec<User> = serde_json::from_value(document)?;
    RecordStore::new(users)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn loads_users_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"user_id":"u1","userName":"Ann","activities":[]}},{{"user_id":"u2","userName":"Bob"}}]"#
        )
        .unwrap();

        let store = load_seed(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find_user("u1").unwrap().user_name, "Ann");
    }

    #[test]
    fn empty_path_gives_empty_store() {
        assert!(load_seed("").unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_seed(dir.path().join("nope.json"));
        assert!(matches!(result, Err(AppError::Unexpected(_))));
    }

    #[test]
    fn non_array_documents_are_shape_errors() {
        for document in [json!({"users": []}), json!("users"), json!(null)] {
            assert!(matches!(
                parse_seed(document),
                Err(AppError::StoreShape(_))
            ));
        }
    }

    #[test]
    fn malformed_users_are_shape_errors() {
        let result = parse_seed(json!([{"userName": "no id"}]));
        assert!(matches!(result, Err(AppError::StoreShape(_))));

        let result = parse_seed(json!([{"user_id": "u1", "activities": [{"activity_type": "run"}]}]));
        assert!(matches!(result, Err(AppError::StoreShape(_))));
    }

    fn user_with(activities: Value) -> Value {
        json!([{"user_id": "u1", "userName": "Ann", "activities": activities}])
    }

    #[test]
    fn duplicated_activity_ids_are_shape_errors() {
        let result = parse_seed(user_with(json!([
            {"id": "a1", "activity_type": "run", "activity_duration": 10},
            {"id": "a1", "activity_type": "swim", "activity_duration": 20}
        ])));
        assert!(matches!(result, Err(AppError::StoreShape(_))));
    }

    #[test]
    fn empty_activity_type_is_a_shape_error() {
        let result = parse_seed(user_with(json!([
            {"id": "a1", "activity_type": "", "activity_duration": 10}
        ])));
        assert!(matches!(result, Err(AppError::StoreShape(_))));
    }

    #[test]
    fn non_positive_durations_are_shape_errors() {
        for duration in [json!(0), json!(-4), json!(-0.5)] {
            let result = parse_seed(user_with(json!([
                {"id": "a1", "activity_type": "run", "activity_duration": duration}
            ])));
            assert!(
                matches!(result, Err(AppError::StoreShape(_))),
                "{duration} should be rejected"
            );
        }
    }

    #[test]
    fn legacy_activities_without_ids_still_load() {
        let store = parse_seed(user_with(json!([
            {"activity_type": "run", "activity_duration": 10},
            {"activity_type": "swim", "activity_duration": 20}
        ])))
        .unwrap();
        assert_eq!(store.find_user("u1").unwrap().activities.len(), 2);
    }
}
