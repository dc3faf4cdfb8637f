mod models;
mod record_store;
mod seed;

pub use models::{Activity, ActivityDuration, User};
pub use record_store::RecordStore;
pub use seed::{load_seed, parse_seed};
