//! Server Module
//!
//! - **`state`** - `AppState` and service extraction
//! - **`config`** - store startup from `AppConfig`
//! - **`init`** - application assembly

pub mod config;
pub mod init;
pub mod state;

pub use config::{load_store, StartupError};
pub use init::create_app;
pub use state::AppState;
