//! Per-request completion logging.
//!
//! The router opens a `request` span carrying method and path; this records
//! status and latency inside it once the handler is done.

use std::future::Future;
use std::time::Instant;

use tracing::{info, warn};

use crate::response::Response;

pub(crate) async fn timed<F>(fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let started = Instant::now();
    let res = fut.await;
    let latency_us = started.elapsed().as_micros() as u64;
    let status = res.status_code();
    if status >= 500 {
        warn!(status, latency_us, "request failed");
    } else {
        info!(status, latency_us, "request finished");
    }
    res
}
