use sentry_tracing::EventFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::Env;

/// Installs the global subscriber. The returned guard flushes Sentry on drop
/// and must live as long as the process.
pub fn init_tracing(env: &Env, sentry_dsn: Option<&str>) -> Option<sentry::ClientInitGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match env {
        Env::Production => tracing_subscriber::fmt::layer()
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        Env::Development | Env::Test => tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed(),
    };

    let registry = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let Some(dsn) = sentry_dsn else {
        registry.init();
        return None;
    };

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(env.to_string().into()),
            debug: matches!(env, Env::Development | Env::Test),
            ..Default::default()
        },
    ));

    let sentry_layer = sentry_tracing::layer().event_filter(|md| match *md.level() {
        tracing::Level::ERROR | tracing::Level::WARN => EventFilter::Event,
        _ => EventFilter::Ignore,
    });

    registry.with(sentry_layer).init();
    Some(guard)
}
