//! Authentication Module
//! Credential login, JWT issuance and role-based access checks

pub mod admin_store;
pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod policy;

pub use admin_store::{AdminStore, Authenticator};
pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::{require_policy, AccessGuard};
pub use policy::{Operation, Policy};
