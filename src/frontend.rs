//! The frontend's ingestion endpoint.
//!
//! A separate, initially empty post list that only accepts creations. It
//! validates exactly like the backend's create but keeps no flashes and
//! shares nothing with the backend [`Blog`](crate::api::Blog).

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::ApiError;
use crate::handler::locked;
use crate::health;
use crate::method::Method;
use crate::post::{self, Post, PostFields};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;

/// Posts submitted through the frontend.
#[derive(Debug, Default)]
pub struct Submissions {
    posts: Vec<Post>,
}

pub type SharedSubmissions = Arc<Mutex<Submissions>>;

impl Submissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedSubmissions {
        Arc::new(Mutex::new(self))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn create(&mut self, fields: Option<PostFields>) -> Result<Post, ApiError> {
        let post = post::draft(&self.posts, fields)?;
        debug!(id = post.id, "submission accepted");
        self.posts.push(post.clone());
        Ok(post)
    }
}

/// Routes for the frontend service.
pub fn router(submissions: SharedSubmissions) -> Router {
    Router::new()
        .on(Method::Post, "/api/posts", locked(&submissions, submit_post))
        .on(Method::Get, "/healthz", health::liveness)
        .on(Method::Get, "/readyz", health::readiness)
}

fn submit_post(submissions: &mut Submissions, req: &Request) -> Response {
    let created = PostFields::for_create(req.body()).and_then(|fields| submissions.create(fields));
    match created {
        Ok(post) => (Status::Created, Json(post)).into_response(),
        Err(e) => e.into_response(),
    }
}
