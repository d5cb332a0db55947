//! Product Makers Infrastructure Library
//!
//! Shared infrastructure for the Product Makers binaries:
//! - Telemetry initialization
//! - Error reporting
//! - Tracing-backed notifications

#[cfg(feature = "observability-basic")]
pub mod telemetry;

pub mod error;
pub mod notify;

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, DEFAULT_FILTER};

pub use error::{report_error, ErrorResponse};
pub use notify::TracingNotifier;
