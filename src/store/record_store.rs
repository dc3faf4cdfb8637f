use std::collections::HashSet;

use crate::errors::AppError;

use super::models::{Activity, User};

/// In-memory holder of every user and their activities for the lifetime of
/// the process. Lookups return `None` instead of an error, callers decide how
/// absence is reported.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordStore {
    users: Vec<User>,
}

impl RecordStore {
    /// Builds the store from the seed, refusing two users with the same id
    /// and any activity the mutator itself could never have written.
    pub fn new(users: Vec<User>) -> Result<Self, AppError> {
        let mut seen = HashSet::with_capacity(users.len());
        for user in &users {
            if !seen.insert(user.user_id.as_str()) {
                return Err(AppError::StoreShape(format!(
                    "duplicated user_id {}",
                    user.user_id
                )));
            }
            check_activities(user)?;
        }
        Ok(Self { users })
    }

    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    pub fn find_user_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.user_id == user_id)
    }

    pub fn list_users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn check_activities(user: &User) -> Result<(), AppError> {
    let mut ids = HashSet::with_capacity(user.activities.len());
    for (position, activity) in user.activities.iter().enumerate() {
        if let Some(id) = activity.id.as_deref() {
            if !ids.insert(id) {
                return Err(AppError::StoreShape(format!(
                    "duplicated activity id {id} for user {}",
                    user.user_id
                )));
            }
        }
        if activity.activity_type.is_empty() {
            return Err(AppError::StoreShape(format!(
                "empty activity_type at position {position} for user {}",
                user.user_id
            )));
        }
        if !activity.activity_duration.is_positive() {
            return Err(AppError::StoreShape(format!(
                "non-positive activity_duration at position {position} for user {}",
                user.user_id
            )));
        }
    }
    Ok(())
}

// Mutation primitives. Higher level operations only ever compose these.
impl User {
    /// Position and record of the activity whose stored id matches exactly.
    pub fn find_activity(&self, activity_id: &str) -> Option<(usize, &Activity)> {
        self.activities
            .iter()
            .enumerate()
            .find(|(_, a)| a.has_id(activity_id))
    }

    pub fn append_activity(&mut self, activity: Activity) -> &Activity {
        self.activities.push(activity);
        &self.activities[self.activities.len() - 1]
    }

    /// Swaps the activity at `index` in place, returning the previous record.
    pub fn replace_activity(&mut self, index: usize, activity: Activity) -> Option<Activity> {
        self.activities
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, activity))
    }

    /// Removes the activity at `index`, keeping the order of the rest.
    pub fn remove_activity(&mut self, index: usize) -> Option<Activity> {
        (index < self.activities.len()).then(|| self.activities.remove(index))
    }
}
