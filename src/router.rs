//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. The router also carries
//! the application's shared state and hands a copy of it to every request.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::Extensions;
use http_body_util::Full;
use matchit::Router as MatchitRouter;
use tracing::{Instrument, info, info_span};

use crate::handler::{Handler, SharedEndpoint};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve),
/// or drive it directly with [`Router::handle`]. Each [`Router::on`] call
/// returns `self` so registrations chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<SharedEndpoint>>,
    state: Extensions,
}

enum Route {
    Found(SharedEndpoint, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), state: Extensions::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax, catch-alls `{*name}`:
    ///
    /// ```rust
    /// # use signup::{Method, Request, Response, Router};
    /// # async fn list(_: Request) -> Response { Response::text("") }
    /// # async fn signup(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/activities",                       list)
    ///     .on(Method::Post, "/activities/{activity_name}/signup", signup);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_endpoint())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Attach shared state, reachable from handlers via
    /// [`Request::state`](crate::Request::state). One value per type; a second
    /// call with the same type replaces the first.
    pub fn with_state<S: Clone + Send + Sync + 'static>(mut self, state: S) -> Self {
        self.state.insert(state);
        self
    }

    /// Routes one request and produces its response.
    ///
    /// Unknown paths get a 404. A known path under a method it is not
    /// registered for (including methods outside [`Method`]) gets a 405 with
    /// an `Allow` header. Request bodies are not read.
    pub async fn handle<B>(&self, req: http::Request<B>) -> http::Response<Full<Bytes>> {
        let span = info_span!("request", method = %req.method(), path = %req.uri().path());
        async move {
            let started = Instant::now();
            let res = self.respond(req).await;
            info!(
                status = res.status.as_u16(),
                latency_us = started.elapsed().as_micros() as u64,
                "request completed"
            );
            res.into_inner()
        }
        .instrument(span)
        .await
    }

    async fn respond<B>(&self, req: http::Request<B>) -> Response {
        let (parts, _) = req.into_parts();
        let method = Method::try_from(&parts.method).ok();

        match self.lookup(method, parts.uri.path()) {
            Route::Found(endpoint, params) => {
                let req = Request::new(parts.uri, params, self.state.clone());
                endpoint.call(req).await
            }
            Route::MethodNotAllowed(allowed) => {
                let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .detail(Status::MethodNotAllowed.reason())
            }
            Route::NotFound => Response::detail(Status::NotFound, Status::NotFound.reason()),
        }
    }

    fn lookup(&self, method: Option<Method>, path: &str) -> Route {
        let matched = method
            .and_then(|m| self.routes.get(&m))
            .and_then(|tree| tree.at(path).ok());
        if let Some(matched) = matched {
            let endpoint = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), percent_decode(v)))
                .collect();
            return Route::Found(endpoint, params);
        }

        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| *m)
            .collect();
        if allowed.is_empty() {
            return Route::NotFound;
        }
        allowed.sort_by_key(|m| m.as_str());
        Route::MethodNotAllowed(allowed)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// Percent-decodes a path segment. Sequences that do not decode to UTF-8 are
/// left as written.
fn percent_decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_owned())
}
