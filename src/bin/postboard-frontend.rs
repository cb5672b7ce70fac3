//! The frontend ingestion service.
//!
//! Run with:
//!   RUST_LOG=info cargo run --bin postboard-frontend
//!
//! Try:
//!   curl -X POST http://localhost:5001/api/posts \
//!        -H 'content-type: application/json' \
//!        -d '{"title":"Hello","content":"World"}'

use postboard::{Error, Server, Settings, Submissions, frontend, telemetry};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init()?;

    let settings = Settings::load()?;
    let app = frontend::router(Submissions::new().shared());

    Server::bind(settings.frontend_addr()?).serve(app).await
}
