mod mapper;
mod mutator;
mod ports;
mod routes;
mod validator;

pub use mapper::{map_activity, map_user, map_users, map_written, ActivityView, UserView};
pub use mutator::ActivityMutator;
pub use ports::{IdGenerator, UuidGenerator};
pub use routes::{routes, DELETED};
pub use validator::{
    validate_create, validate_delete, validate_upsert, ActivityPayload, ActivityRemoval,
    ActivityUpsert, NewActivity, RemovalPayload,
};
