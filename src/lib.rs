//! # postboard
//!
//! An in-memory blog post API with flash messages, plus the tiny frontend
//! service that feeds it, on a minimal hyper-based HTTP layer.
//!
//! ## The services
//!
//! - **Backend** ([`api`]): list (optionally sorted), create, update, delete
//!   and search posts. Every answer carries the pending flash messages.
//! - **Frontend** ([`frontend`]): an independent list that only accepts new
//!   posts.
//!
//! Both keep everything in memory behind a mutex; restarting a service resets
//! it to its initial posts.
//!
//! ## The HTTP layer
//!
//! - Radix-tree routing, one tree per method, via [`matchit`]
//! - hyper with HTTP/1.1 and HTTP/2 auto-negotiation
//! - CORS and per-request tracing in [`middleware`]
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use postboard::{api, Blog, PostStore, Server, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), postboard::Error> {
//!     let settings = Settings::load()?;
//!     let app = api::router(Blog::new(PostStore::seeded()).shared());
//!     Server::bind(settings.backend_addr()?).serve(app).await
//! }
//! ```
//!
//! Handlers can also be exercised without a socket:
//!
//! ```rust
//! use postboard::{api, Blog, Method, PostStore, Request};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let app = api::router(Blog::new(PostStore::seeded()).shared());
//! let res = app.handle(Request::new(Method::Get, "/api/posts?sort=title")).await;
//! assert_eq!(res.status_code(), 200);
//! # }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod flash;
pub mod frontend;
pub mod health;
pub mod middleware;
pub mod post;
pub mod store;
pub mod telemetry;

pub use api::Blog;
pub use config::{ConfigError, Settings};
pub use error::{ApiError, Error};
pub use flash::{Category, FlashLog, FlashMessage, Reported};
pub use frontend::Submissions;
pub use handler::{Handler, locked};
pub use method::{Method, UnknownMethod};
pub use post::{Post, PostFields, PostId};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::{Direction, PostStore, SortField};
