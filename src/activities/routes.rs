use axum::{
    extract::Path,
    routing::{delete, get},
    Router,
};

use crate::{
    errors::AppError,
    service::{AppJson, AppResult, Envelope},
    state::AppState,
    store::Activity,
};

use super::{
    mapper::{map_user, map_users, map_written, ActivityView, UserView},
    validator::{
        validate_create, validate_delete, validate_upsert, ActivityPayload, RemovalPayload,
    },
};

pub const DELETED: &str = "Activity deleted successfully";

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(greeting))
        .route(
            "/activities",
            get(list_activities)
                .post(create_activity)
                .put(upsert_activity),
        )
        .route("/activities/{activity_id}", delete(delete_activity))
        .route("/{user_id}", get(get_user))
        .with_state(state)
}

async fn greeting() -> &'static str {
    "Hello world!"
}

pub async fn list_activities(state: AppState) -> AppResult<Vec<UserView>> {
    let store = state.read_store().await;
    Envelope::response(map_users(store.list_users()))
}

pub async fn get_user(state: AppState, Path(user_id): Path<String>) -> AppResult<UserView> {
    let store = state.read_store().await;
    store
        .find_user(&user_id)
        .map(map_user)
        .map(Envelope::ok)
        .ok_or(AppError::UserNotFound)
}

pub async fn create_activity(
    state: AppState,
    AppJson(payload): AppJson<ActivityPayload>,
) -> AppResult<ActivityView> {
    let input = validate_create(&payload)?;

    let mut store = state.write_store().await;
    let created = state.mutator().create(&mut store, input)?;
    written_response(&created)
}

pub async fn upsert_activity(
    state: AppState,
    AppJson(payload): AppJson<ActivityPayload>,
) -> AppResult<ActivityView> {
    let input = validate_upsert(&payload)?;

    let mut store = state.write_store().await;
    let written = state.mutator().upsert(&mut store, input)?;
    written_response(&written)
}

pub async fn delete_activity(
    state: AppState,
    Path(activity_id): Path<String>,
    AppJson(payload): AppJson<RemovalPayload>,
) -> AppResult<String> {
    let input = validate_delete(&payload, &activity_id)?;

    let mut store = state.write_store().await;
    state.mutator().delete(&mut store, input)?;
    Envelope::response(DELETED.to_owned())
}

fn written_response(activity: &Activity) -> AppResult<ActivityView> {
    map_written(activity)
        .map(Envelope::ok)
        .ok_or_else(|| AppError::custom_internal("written activity lacks id or timestamp"))
}
