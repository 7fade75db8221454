//! Observability for the catalog service.
//!
//! This crate provides:
//! - `RequestId` - per-request identifier echoed in `X-Request-ID`
//! - `LogConfig` / `init_tracing` - the process-wide `tracing` subscriber

mod logging;
mod request_id;

pub use logging::*;
pub use request_id::RequestId;
