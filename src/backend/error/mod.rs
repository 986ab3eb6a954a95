//! Backend Error Module
//!
//! Request-level failures and the rendering boundary that turns every failure
//! into a result-shaped HTTP response.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError
//! ├── conversion.rs - IntoResponse impls, rejection mapping, panic handler
//! └── fault.rs      - Repository error translation for services
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

/// Service-layer fault adapters
pub mod fault;

pub use conversion::{handle_panic, not_found};
pub use fault::{conflict_or_fault, fault};
pub use types::BackendError;
