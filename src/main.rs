use std::process::ExitCode;

use activity_ledger::{config::ServiceConfig, telemetry::init_tracing};

fn main() -> ExitCode {
    menva::read_default_file();
    let config = ServiceConfig::from_env_prefixed();
    let _sentry = init_tracing(&config.env, config.sentry_dsn());

    match activity_ledger::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "service stopped");
            ExitCode::FAILURE
        }
    }
}
