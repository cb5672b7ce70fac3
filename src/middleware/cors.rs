//! Cross-origin resource sharing.
//!
//! The frontend page calls the backend API from another origin, so the
//! backend answers preflights and tags every response. There is no
//! credential support: the allowed origin is a single value, `*` by default.

use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

const DEFAULT_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const DEFAULT_HEADERS: &str = "content-type";

/// CORS policy attached with [`Router::with_cors`](crate::Router::with_cors).
#[derive(Debug, Clone)]
pub struct Cors {
    allow_origin: String,
    allow_methods: String,
    max_age_secs: u32,
}

impl Cors {
    /// Any origin, the methods this service routes, one day preflight cache.
    pub fn permissive() -> Self {
        Self {
            allow_origin: "*".to_owned(),
            allow_methods: DEFAULT_METHODS.to_owned(),
            max_age_secs: 86_400,
        }
    }

    /// Restrict responses to a single origin.
    pub fn allow_origin(mut self, origin: &str) -> Self {
        self.allow_origin = origin.to_owned();
        self
    }

    pub(crate) fn apply(&self, res: &mut Response) {
        res.set_header("access-control-allow-origin", &self.allow_origin);
        if self.allow_origin != "*" {
            res.set_header("vary", "origin");
        }
    }

    /// `204 No Content` preflight answer. Requested headers are echoed back.
    pub(crate) fn preflight(&self, req: &Request) -> Response {
        let headers = req
            .header("access-control-request-headers")
            .unwrap_or(DEFAULT_HEADERS);
        Response::builder()
            .status(Status::NoContent)
            .header("access-control-allow-methods", &self.allow_methods)
            .header("access-control-allow-headers", headers)
            .header("access-control-max-age", &self.max_age_secs.to_string())
            .no_body()
    }
}

impl Default for Cors {
    fn default() -> Self {
        Self::permissive()
    }
}
