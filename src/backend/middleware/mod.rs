//! Middleware Module
//!
//! HTTP middleware applied to every route.
//!
//! - **`logging`** - one log line per request, leveled by response status

pub mod logging;

pub use logging::log_requests;
