use mockable::Clock;

use crate::{
    errors::AppError,
    store::{Activity, RecordStore, User},
};

use super::{
    ports::IdGenerator,
    validator::{ActivityRemoval, ActivityUpsert, NewActivity},
};

const MAX_ID_ATTEMPTS: usize = 8;

/// Applies create, upsert and delete to a [`RecordStore`]. Each call is a
/// single lookup-then-mutate sequence, the caller must hold exclusive access
/// to the store for its whole duration.
pub struct ActivityMutator<'a> {
    ids: &'a dyn IdGenerator,
    clock: &'a dyn Clock,
}

impl<'a> ActivityMutator<'a> {
    pub fn new(ids: &'a dyn IdGenerator, clock: &'a dyn Clock) -> Self {
        Self { ids, clock }
    }

    pub fn create(
        &self,
        store: &mut RecordStore,
        input: NewActivity,
    ) -> Result<Activity, AppError> {
        let user = store
            .find_user_mut(&input.user_id)
            .ok_or(AppError::UserNotFound)?;
        self.insert(user, input)
    }

    /// Updates the activity when `activity_id` is already stored for the user
    /// and inserts a brand new one otherwise. There is no insert-only
    /// endpoint, so both branches live behind `PUT /activities`.
    pub fn upsert(
        &self,
        store: &mut RecordStore,
        input: ActivityUpsert,
    ) -> Result<Activity, AppError> {
        let ActivityUpsert {
            activity_id,
            activity,
        } = input;
        let user = store
            .find_user_mut(&activity.user_id)
            .ok_or(AppError::UserNotFound)?;

        let position = user.find_activity(&activity_id).map(|(index, _)| index);
        let Some(index) = position else {
            tracing::debug!(
                user_id = %user.user_id,
                activity_id = %activity_id,
                "activity not stored yet, inserting"
            );
            return self.insert(user, activity);
        };

        let updated = Activity::new(
            activity_id,
            activity.activity_type,
            activity.activity_duration,
            self.clock.utc(),
        );
        user.replace_activity(index, updated.clone())
            .ok_or_else(|| AppError::custom_internal("activity vanished while updating"))?;

        tracing::info!(
            user_id = %user.user_id,
            activity_id = ?updated.id,
            "activity updated"
        );
        Ok(updated)
    }

    pub fn delete(&self, store: &mut RecordStore, input: ActivityRemoval) -> Result<(), AppError> {
        let user = store
            .find_user_mut(&input.user_id)
            .ok_or(AppError::UserNotFound)?;
        let index = user
            .find_activity(&input.activity_id)
            .map(|(index, _)| index)
            .ok_or(AppError::ActivityNotFound)?;
        user.remove_activity(index)
            .ok_or_else(|| AppError::custom_internal("activity vanished while deleting"))?;

        tracing::info!(
            user_id = %input.user_id,
            activity_id = %input.activity_id,
            "activity deleted"
        );
        Ok(())
    }

    fn insert(&self, user: &mut User, input: NewActivity) -> Result<Activity, AppError> {
        let activity = Activity::new(
            self.fresh_id(user)?,
            input.activity_type,
            input.activity_duration,
            self.clock.utc(),
        );
        user.append_activity(activity.clone());

        tracing::info!(
            user_id = %user.user_id,
            activity_id = ?activity.id,
            "activity created"
        );
        Ok(activity)
    }

    fn fresh_id(&self, user: &User) -> Result<String, AppError> {
        (0..MAX_ID_ATTEMPTS)
            .map(|_| self.ids.generate())
            .find(|id| !id.is_empty() && user.find_activity(id).is_none())
            .ok_or_else(|| AppError::custom_internal("could not generate a unique activity id"))
    }
}
