//! Vehicle Registry Library
//!
//! Exposes the auth, vehicle and routing modules for use by the server
//! binary and the integration tests.

pub mod auth;
pub mod config;
pub mod db;
pub mod middleware;
pub mod router;
pub mod vehicles;

pub use config::AppConfig;
pub use router::{build_router, AppState};
