//! Middleware layer.
//!
//! Cross-cutting concerns the [`Router`](crate::Router) applies around every
//! request:
//!
//! - [`cors`]: CORS response headers and `OPTIONS` preflight answers
//! - `trace`: one completion event per request with status and latency

pub mod cors;
pub(crate) mod trace;
