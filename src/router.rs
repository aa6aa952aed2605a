//! Router construction: public routes, login, and the policy-guarded
//! vehicle routes.

use crate::auth::{
    api as auth_api, require_policy, AccessGuard, AuthState, Authenticator, JwtHandler,
    Operation, Policy,
};
use crate::middleware::request_logging;
use crate::vehicles::{api as vehicle_api, VehicleDirectory, VehicleState};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Collaborators the API is composed from
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<dyn Authenticator>,
    pub directory: Arc<dyn VehicleDirectory>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AppState {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        directory: Arc<dyn VehicleDirectory>,
        jwt_handler: Arc<JwtHandler>,
    ) -> Self {
        Self {
            authenticator,
            directory,
            jwt_handler,
        }
    }

    fn guard(&self, policy: Policy) -> AccessGuard {
        AccessGuard::new(self.jwt_handler.clone(), policy)
    }
}

/// Build the application router.
///
/// Routes are grouped by access policy; each group carries its own guard
/// layer so authentication and role checks run before any extractor.
pub fn build_router(state: AppState) -> Router {
    let vehicle_state = VehicleState::new(state.directory.clone());

    let read_routes = Router::new()
        .route("/veiculos", get(vehicle_api::list_vehicles))
        .route("/veiculos/:id", get(vehicle_api::get_vehicle))
        .route_layer(middleware::from_fn_with_state(
            state.guard(Operation::ListVehicles.policy()),
            require_policy,
        ))
        .with_state(vehicle_state.clone());

    let editor_routes = Router::new()
        .route("/veiculos", post(vehicle_api::create_vehicle))
        .route("/veiculos/:id", put(vehicle_api::update_vehicle))
        .route_layer(middleware::from_fn_with_state(
            state.guard(Operation::CreateVehicle.policy()),
            require_policy,
        ))
        .with_state(vehicle_state.clone());

    let admin_routes = Router::new()
        .route("/veiculos/:id", delete(vehicle_api::delete_vehicle))
        .route_layer(middleware::from_fn_with_state(
            state.guard(Operation::DeleteVehicle.policy()),
            require_policy,
        ))
        .with_state(vehicle_state);

    let auth_router = Router::new()
        .route("/auth/login", post(auth_api::login))
        .route_layer(middleware::from_fn_with_state(
            state.guard(Operation::Login.policy()),
            require_policy,
        ))
        .with_state(AuthState::new(
            state.authenticator.clone(),
            state.jwt_handler.clone(),
        ));

    let public_routes = Router::new()
        .route("/", get(home))
        .route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(auth_router)
        .merge(read_routes)
        .merge(editor_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_logging))
                .layer(CorsLayer::permissive()),
        )
}

async fn home() -> Json<Value> {
    Json(json!({ "name": "vehicle-registry", "version": "v1" }))
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_groups_share_policies() {
        // Each guard group above is keyed by one operation; its siblings
        // must resolve to the same policy.
        assert_eq!(
            Operation::ListVehicles.policy(),
            Operation::GetVehicle.policy()
        );
        assert_eq!(
            Operation::CreateVehicle.policy(),
            Operation::UpdateVehicle.policy()
        );
        assert_ne!(
            Operation::DeleteVehicle.policy(),
            Operation::UpdateVehicle.policy()
        );
    }
}
