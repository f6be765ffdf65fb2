//! A fake branch lookup API and CDN.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use treeloader_platform::Mutex;

#[derive(Clone, Debug)]
struct Route {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct OriginState {
    routes: HashMap<String, Route>,
    hits: Vec<String>,
}

/// Path-keyed responses plus a log of every path requested.
///
/// Paths are matched exactly as sent, percent-encoding included. Anything
/// without a route answers 404 with an empty body.
#[derive(Clone, Debug, Default)]
pub struct MockOrigin {
    state: Arc<Mutex<OriginState>>,
}

impl MockOrigin {
    pub const API_ROOT: &'static str = "/api/";
    pub const CDN_ROOT: &'static str = "/cdn/gh/";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of a branch lookup.
    #[must_use]
    pub fn branch_path(owner: &str, repository: &str, branch: &str) -> String {
        format!("/api/repos/{owner}/{repository}/branches/{branch}")
    }

    /// Path of a file pinned at `sha`.
    #[must_use]
    pub fn cdn_path(owner: &str, repository: &str, sha: &str, file: &str) -> String {
        format!("/cdn/gh/{owner}/{repository}@{sha}/{file}")
    }

    /// Answer a branch lookup with `sha`.
    #[must_use]
    pub fn branch(self, owner: &str, repository: &str, branch: &str, sha: &str) -> Self {
        let body = json!({ "name": branch, "commit": { "sha": sha } }).to_string();
        self.route(
            Self::branch_path(owner, repository, branch),
            StatusCode::OK,
            "application/json",
            body,
        )
    }

    /// Answer a branch lookup with a failure `message`.
    #[must_use]
    pub fn branch_failure(
        self,
        owner: &str,
        repository: &str,
        branch: &str,
        status: StatusCode,
        message: &str,
    ) -> Self {
        let body = json!({ "message": message }).to_string();
        self.route(
            Self::branch_path(owner, repository, branch),
            status,
            "application/json",
            body,
        )
    }

    /// Serve `body` at `path`.
    #[must_use]
    pub fn file(self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.route(path.into(), StatusCode::OK, "text/plain", body.into())
    }

    /// Serve `body` at `path` after `delay`.
    #[must_use]
    pub fn delayed_file(
        self,
        path: impl Into<String>,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        let path = path.into();
        let origin = self.file(path.clone(), body);
        if let Some(route) = origin.state.lock().routes.get_mut(&path) {
            route.delay = Some(delay);
        }
        origin
    }

    /// Answer `path` with `status` and an empty body.
    #[must_use]
    pub fn status(self, path: impl Into<String>, status: StatusCode) -> Self {
        self.route(path.into(), status, "text/plain", String::new())
    }

    fn route(self, path: String, status: StatusCode, content_type: &'static str, body: String) -> Self {
        self.state.lock().routes.insert(
            path,
            Route {
                status,
                content_type,
                body,
                delay: None,
            },
        );
        self
    }

    /// Every path requested so far, in arrival order.
    #[must_use]
    pub fn hits(&self) -> Vec<String> {
        self.state.lock().hits.clone()
    }

    /// How many times `path` was requested.
    #[must_use]
    pub fn hit_count(&self, path: &str) -> usize {
        self.state.lock().hits.iter().filter(|hit| *hit == path).count()
    }

    pub fn router(&self) -> Router {
        Router::new().fallback(serve).with_state(self.clone())
    }

    fn record(&self, path: &str) -> Option<Route> {
        let mut state = self.state.lock();
        state.hits.push(path.to_string());
        state.routes.get(path).cloned()
    }
}

async fn serve(State(origin): State<MockOrigin>, uri: Uri) -> Response {
    let Some(route) = origin.record(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }
    (
        route.status,
        [(header::CONTENT_TYPE, route.content_type)],
        route.body,
    )
        .into_response()
}
