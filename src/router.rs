//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Outcome of a route lookup.
pub(crate) enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    /// The path exists, but not under the requested method.
    MethodNotAllowed,
    NotFound,
}

/// The application router over shared state `S`.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve)
/// together with the state. Each registration returns `self` so calls chain.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
}

impl<S: Send + Sync + 'static> Router<S> {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if the path is malformed or conflicts with an existing route.
    /// Routes are registered at startup, so this surfaces immediately.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup<S> {
        let method = method.route_as();
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }

        let elsewhere = self.routes.iter()
            .any(|(m, tree)| *m != method && tree.at(path).is_ok());
        if elsewhere { Lookup::MethodNotAllowed } else { Lookup::NotFound }
    }

    /// Routes one fully-buffered request and runs its handler.
    ///
    /// This is what the server calls for every request; it is public so the
    /// whole application can be exercised without a socket.
    pub async fn handle(&self, state: Arc<S>, req: http::Request<Bytes>) -> Response {
        let Ok(method) = Method::try_from(req.method()) else {
            return Status::MethodNotAllowed.into_response();
        };

        match self.lookup(method, req.uri().path()) {
            Lookup::Found(handler, params) => {
                handler.call(Request::new(method, req, params), state).await
            }
            Lookup::MethodNotAllowed => Status::MethodNotAllowed.into_response(),
            Lookup::NotFound => Status::NotFound.into_response(),
        }
    }
}

impl<S: Send + Sync + 'static> Default for Router<S> {
    fn default() -> Self { Self::new() }
}
