mod responses;
mod router;
mod service;
mod tests;

pub use responses::{AppJson, AppResult, Envelope};
pub use router::get_router;
pub use service::{shutdown_signal, HttpService};
pub use tests::StubService;
