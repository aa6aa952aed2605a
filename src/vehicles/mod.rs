//! Vehicle Directory
//! Validated CRUD and filtered listing of vehicle records

pub mod api;
pub mod models;
pub mod store;
pub mod validation;

pub use api::VehicleState;
pub use models::{Vehicle, VehicleFilter};
pub use store::{VehicleDirectory, VehicleStore};
