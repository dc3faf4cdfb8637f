use std::{convert::Infallible, net::SocketAddr};

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{header::CONTENT_TYPE, Method, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;

use crate::{config::ServiceConfig, state::AppState};

use super::HttpService;

/// Runs the full router in process, no socket involved.
pub struct StubService {
    router: Router,
    state: AppState,
}

impl StubService {
    pub fn new(state: AppState) -> Self {
        let router = HttpService::new(ServiceConfig::stub(), state.clone()).router();
        Self { router, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn request(&self, req: Request<Body>) -> Response<Body> {
        let result: Result<_, Infallible> = self
            .router
            .clone()
            .layer(MockConnectInfo(SocketAddr::from(([0, 0, 0, 0], 8000))))
            .oneshot(req)
            .await;
        match result {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Self::build(Method::GET, uri, Body::empty()))
            .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: &Value) -> Response<Body> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request parts are valid");
        self.request(req).await
    }

    fn build(method: Method, uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .expect("request parts are valid")
    }

    pub async fn deserialize_response<T: for<'a> Deserialize<'a>>(response: Response<Body>) -> T {
        let body = response
            .into_body()
            .collect()
            .await
            .expect("body can be collected")
            .to_bytes();
        serde_json::from_slice(&body).expect("body is valid json")
    }

    pub async fn text_response(response: Response<Body>) -> String {
        let body = response
            .into_body()
            .collect()
            .await
            .expect("body can be collected")
            .to_bytes();
        String::from_utf8_lossy(&body).into_owned()
    }
}
