//! Error types.
//!
//! Two families live here:
//!
//! - [`ApiError`]: request-local failures of the post API. Every variant maps
//!   to a 4xx status and is rendered as a JSON `{"error": ...}` body.
//! - [`Error`]: infrastructure failures that stop a service from running at
//!   all: binding a port, reading configuration, installing the subscriber.

use serde::Serialize;

use crate::config::ConfigError;
use crate::flash::FlashMessage;
use crate::post::PostId;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

/// A rejected API request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Missing JSON body")]
    MissingBody,

    #[error("Invalid JSON body: {0}")]
    MalformedBody(String),

    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Field(s) must not be empty: {}", .0.join(", "))]
    EmptyFields(Vec<&'static str>),

    #[error("Invalid sort field '{0}'. Use 'title' or 'content'.")]
    InvalidSortField(String),

    #[error("Invalid sort direction '{0}'. Use 'asc' or 'desc'.")]
    InvalidDirection(String),

    #[error("Post with id {0} not found.")]
    NotFound(PostId),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::NotFound,
            _ => Status::BadRequest,
        }
    }

    /// Renders the error as `{"error": ...}`, plus a `flashes` array when
    /// the caller carries one.
    pub fn respond(&self, flashes: Option<Vec<FlashMessage>>) -> Response {
        let body = ErrorBody { error: self.to_string(), flashes };
        (self.status(), Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.respond(None)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    flashes: Option<Vec<FlashMessage>>,
}

/// The error type returned by the services' fallible startup and serving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("tracing setup: {0}")]
    Telemetry(Box<dyn std::error::Error + Send + Sync + 'static>),
}
