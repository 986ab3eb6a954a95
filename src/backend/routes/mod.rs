//! Route Configuration Module
//!
//! - **`router`** - router creation and shared layers
//! - **`api_routes`** - the `/api` endpoints

/// Router creation
pub mod router;

/// `/api` endpoints
pub mod api_routes;

pub use router::{apply_layers, create_router};
