//! The post API service.
//!
//! Run with:
//!   RUST_LOG=info cargo run --bin postboard-backend
//!
//! Try:
//!   curl 'http://localhost:5002/api/posts?sort=title&direction=desc'
//!   curl -X POST http://localhost:5002/api/posts \
//!        -H 'content-type: application/json' \
//!        -d '{"title":"Hello","content":"World"}'
//!   curl 'http://localhost:5002/api/posts/search?title=hello'
//!   curl -X DELETE http://localhost:5002/api/posts/3

use postboard::middleware::cors::Cors;
use postboard::{Blog, Error, PostStore, Server, Settings, api, telemetry};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init()?;

    let settings = Settings::load()?;
    let store = if settings.seed { PostStore::seeded() } else { PostStore::new() };

    let mut app = api::router(Blog::new(store).shared());
    if settings.cors {
        app = app.with_cors(Cors::permissive().allow_origin(&settings.cors_origin));
    }

    Server::bind(settings.backend_addr()?).serve(app).await
}
