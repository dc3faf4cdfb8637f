use axum::{
    response::{IntoResponse, Response},
    Router,
};
use http::{
    header::{AUTHORIZATION, CONTENT_TYPE, COOKIE},
    HeaderValue, Request,
};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestId, RequestId},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    timeout::TimeoutLayer,
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit, ServiceBuilderExt,
};
use tracing::Level;

use crate::{config::ServiceConfig, errors::AppError};

pub fn get_router<S>(config: &ServiceConfig, state: S, routes: Router<S>) -> Router
where
    S: Send + Sync + Clone + 'static,
{
    let sensitive_headers: Arc<[_]> = vec![AUTHORIZATION, COOKIE].into();
    let middleware = ServiceBuilder::new()
        .layer(SetSensitiveRequestHeadersLayer::from_shared(
            sensitive_headers.clone(),
        ))
        .set_x_request_id(MyMakeRequestId::default())
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new())
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                )
                .on_failure(DefaultOnFailure::new().level(Level::WARN)),
        )
        .sensitive_response_headers(sensitive_headers)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors_layer(config))
        .compression()
        .propagate_x_request_id()
        // Set a `Content-Type` if there isn't one already.
        .insert_response_header_if_not_present(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

    Router::new()
        .merge(routes)
        .fallback(error_404)
        .layer(middleware)
        .with_state(state)
}

fn cors_layer(config: &ServiceConfig) -> CorsLayer {
    let origins = config.allowed_origins();
    let allow_origin = if origins.allows_any() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.to_headers())
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[derive(Clone, Default)]
struct MyMakeRequestId {
    counter: Arc<AtomicU64>,
}

impl MakeRequestId for MyMakeRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        self.counter
            .fetch_add(1, Ordering::SeqCst)
            .to_string()
            .parse()
            .ok()
            .map(RequestId::new)
    }
}

async fn error_404() -> Response {
    AppError::NotFound.into_response()
}
