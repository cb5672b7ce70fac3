//! Liveness and readiness probes.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | Liveness | `/healthz` | Is the process alive? |
//! | Readiness | `/readyz` | Can it serve traffic? |
//!
//! Both services keep everything in memory, so once the listener is up there
//! is nothing further to wait for and both probes answer unconditionally.

use crate::Request;

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> &'static str {
    "ok"
}

/// Always `200 OK` with body `"ready"`.
pub async fn readiness(_req: Request) -> &'static str {
    "ready"
}
