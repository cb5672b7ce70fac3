//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler; [`Router::handle`] runs one request through the tree and the
//! middleware in [`crate::middleware`].

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::Instrument;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{cors::Cors, trace};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    cors: Option<Cors>,
}

enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    WrongMethod,
    Missing,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), cors: None }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust
    /// # use postboard::{Method, Request, Response, Router};
    /// # async fn update_post(_: Request) -> Response { Response::text("") }
    /// # async fn list_posts(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get, "/api/posts",      list_posts)
    ///     .on(Method::Put, "/api/posts/{id}", update_post);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are static, so this is a startup bug.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Attach CORS headers to every response and answer `OPTIONS` preflights.
    pub fn with_cors(mut self, cors: Cors) -> Self {
        self.cors = Some(cors);
        self
    }

    /// Routes one request to its handler and returns the finished response.
    ///
    /// Unknown paths get `404`, known paths under another method get `405`.
    pub async fn handle(&self, req: Request) -> Response {
        let span = tracing::info_span!("request", method = %req.method(), path = %req.path());
        trace::timed(self.route(req)).instrument(span).await
    }

    /// Finishes a response produced outside the routing table, e.g. the
    /// server's answer to a method it cannot parse.
    pub(crate) fn finalize(&self, mut res: Response) -> Response {
        if let Some(cors) = &self.cors {
            cors.apply(&mut res);
        }
        res
    }

    async fn route(&self, mut req: Request) -> Response {
        let res = match self.lookup(req.method(), req.path()) {
            Lookup::Found(handler, params) => {
                req.params = params;
                handler.call(req).await
            }
            Lookup::WrongMethod if req.method() == Method::Options => match &self.cors {
                Some(cors) => cors.preflight(&req),
                None => Response::status(Status::MethodNotAllowed),
            },
            Lookup::WrongMethod => Response::status(Status::MethodNotAllowed),
            Lookup::Missing => Response::status(Status::NotFound),
        };
        self.finalize(res)
    }

    fn lookup(&self, method: Method, path: &str) -> Lookup {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }
        if self.routes.values().any(|tree| tree.at(path).is_ok()) {
            Lookup::WrongMethod
        } else {
            Lookup::Missing
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
