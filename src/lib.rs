pub mod activities;
pub mod config;
pub mod errors;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

use config::ServiceConfig;
use errors::AppError;
use service::HttpService;
use state::AppState;
use store::load_seed;

/// Loads the seed, then serves HTTP until Ctrl-C or SIGTERM.
pub fn run(config: ServiceConfig) -> Result<(), AppError> {
    let store = load_seed(&config.seed_path)?;
    let state = AppState::new(store);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.worker_threads.max(1))
        .build()?
        .block_on(HttpService::new(config, state).run())?;
    Ok(())
}
