use axum::extract::{FromRequestParts, State};
use mockable::{Clock, DefaultClock};
use std::{ops::Deref, sync::Arc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    activities::{ActivityMutator, IdGenerator, UuidGenerator},
    store::RecordStore,
};

/// Everything a request handler needs. The store sits behind a single lock
/// because the runtime is multi-threaded and create/upsert/delete are
/// read-modify-write sequences.
pub struct App {
    store: RwLock<RecordStore>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock + Send + Sync>,
}

impl App {
    pub fn new(store: RecordStore) -> Self {
        Self::with_collaborators(store, Box::new(UuidGenerator), Box::new(DefaultClock))
    }

    pub fn with_collaborators(
        store: RecordStore,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            ids,
            clock,
        }
    }

    pub async fn read_store(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.store.read().await
    }

    pub async fn write_store(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.store.write().await
    }

    pub fn mutator(&self) -> ActivityMutator<'_> {
        ActivityMutator::new(self.ids.as_ref(), self.clock.as_ref())
    }
}

#[derive(Clone, FromRequestParts)]
#[from_request(via(State))]
pub struct AppState(pub Arc<App>);

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        AppState(Arc::new(App::new(store)))
    }

    pub fn from_app(app: App) -> Self {
        AppState(Arc::new(app))
    }
}

impl Deref for AppState {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
