//! The backend JSON API over a [`PostStore`].
//!
//! | Method | Path | Answer |
//! |---|---|---|
//! | GET | `/api/posts?sort=&direction=` | `{posts, flashes}` |
//! | POST | `/api/posts` | `201` post + `flashes` |
//! | PUT | `/api/posts/{id}` | post + `flashes` |
//! | DELETE | `/api/posts/{id}` | `{message, flashes}` |
//! | GET | `/api/posts/search?title=&content=` | `{matches, flashes}` |
//!
//! Errors answer `{error, flashes}` with a 400 or 404.
//!
//! Flashes emitted by a mutation are echoed in its own response and also
//! queued in the [`FlashLog`]. Reads (listing and search) drain the whole log,
//! so a listing right after a create shows the create's message once.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::flash::{FlashLog, FlashMessage, Reported};
use crate::handler::locked;
use crate::health;
use crate::method::Method;
use crate::post::{Post, PostFields, PostId};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::PostStore;

/// Backend state: the posts and the flashes waiting for the next read.
#[derive(Debug, Default)]
pub struct Blog {
    store: PostStore,
    flashes: FlashLog,
}

pub type SharedBlog = Arc<Mutex<Blog>>;

impl Blog {
    pub fn new(store: PostStore) -> Self {
        Self { store, flashes: FlashLog::new() }
    }

    pub fn shared(self) -> SharedBlog {
        Arc::new(Mutex::new(self))
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn pending_flashes(&self) -> &[FlashMessage] {
        self.flashes.pending()
    }

    /// Queues a mutation's flashes and hands back the ones it emitted.
    fn settle_write<T>(&mut self, reported: Reported<T>) -> (T, Vec<FlashMessage>) {
        self.flashes.extend(reported.flashes.iter().cloned());
        (reported.outcome, reported.flashes)
    }

    /// Queues a read's flashes, then drains everything pending.
    fn settle_read<T>(&mut self, reported: Reported<T>) -> (T, Vec<FlashMessage>) {
        self.flashes.extend(reported.flashes);
        (reported.outcome, self.flashes.drain_all())
    }
}

/// Routes for the backend service, health probes included.
pub fn router(blog: SharedBlog) -> Router {
    Router::new()
        .on(Method::Get, "/api/posts", locked(&blog, list_posts))
        .on(Method::Post, "/api/posts", locked(&blog, create_post))
        .on(Method::Get, "/api/posts/search", locked(&blog, search_posts))
        .on(Method::Put, "/api/posts/{id}", locked(&blog, update_post))
        .on(Method::Delete, "/api/posts/{id}", locked(&blog, delete_post))
        .on(Method::Get, "/healthz", health::liveness)
        .on(Method::Get, "/readyz", health::readiness)
}

// ── Response bodies ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Listing {
    posts: Vec<Post>,
    flashes: Vec<FlashMessage>,
}

#[derive(Serialize)]
struct Matches {
    matches: Vec<Post>,
    flashes: Vec<FlashMessage>,
}

#[derive(Serialize)]
struct Deleted {
    message: String,
    flashes: Vec<FlashMessage>,
}

#[derive(Serialize)]
struct Flashed<T> {
    #[serde(flatten)]
    value: T,
    flashes: Vec<FlashMessage>,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

fn list_posts(blog: &mut Blog, req: &Request) -> Response {
    let reported = blog.store.list(req.query("sort"), req.query("direction"));
    match blog.settle_read(reported) {
        (Ok(posts), flashes) => Json(Listing { posts, flashes }).into_response(),
        (Err(e), flashes) => e.respond(Some(flashes)),
    }
}

fn create_post(blog: &mut Blog, req: &Request) -> Response {
    let fields = match PostFields::for_create(req.body()) {
        Ok(fields) => fields,
        Err(e) => return e.respond(Some(Vec::new())),
    };
    let reported = blog.store.create(fields);
    match blog.settle_write(reported) {
        (Ok(post), flashes) => (Status::Created, Json(Flashed { value: post, flashes })).into_response(),
        (Err(e), flashes) => e.respond(Some(flashes)),
    }
}

fn update_post(blog: &mut Blog, req: &Request) -> Response {
    let Some(id) = path_id(req) else {
        return Status::NotFound.into_response();
    };
    let fields = match PostFields::for_update(req.body()) {
        Ok(fields) => fields,
        Err(e) => return e.respond(Some(Vec::new())),
    };
    let reported = blog.store.update(id, fields);
    match blog.settle_write(reported) {
        (Ok(post), flashes) => Json(Flashed { value: post, flashes }).into_response(),
        (Err(e), flashes) => e.respond(Some(flashes)),
    }
}

fn delete_post(blog: &mut Blog, req: &Request) -> Response {
    let Some(id) = path_id(req) else {
        return Status::NotFound.into_response();
    };
    let reported = blog.store.delete(id);
    match blog.settle_write(reported) {
        (Ok(message), flashes) => Json(Deleted { message, flashes }).into_response(),
        (Err(e), flashes) => e.respond(Some(flashes)),
    }
}

fn search_posts(blog: &mut Blog, req: &Request) -> Response {
    let reported = blog.store.search(req.query("title"), req.query("content"));
    let (matches, flashes) = blog.settle_read(reported);
    Json(Matches { matches, flashes }).into_response()
}

/// The `{id}` segment as a post id. Only plain digits qualify; anything
/// else is treated like an unknown route.
fn path_id(req: &Request) -> Option<PostId> {
    req.param("id")
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
}
