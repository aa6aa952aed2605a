//! Vehicle API Endpoints
//! CRUD handlers for `/veiculos`; access checks run in the route layer

use crate::auth::models::Claims;
use crate::vehicles::{
    models::{ListQuery, Vehicle},
    store::VehicleDirectory,
    validation::{validate_vehicle, FieldErrors},
};
use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{Datelike, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared vehicle state
#[derive(Clone)]
pub struct VehicleState {
    pub directory: Arc<dyn VehicleDirectory>,
}

impl VehicleState {
    pub fn new(directory: Arc<dyn VehicleDirectory>) -> Self {
        Self { directory }
    }
}

fn internal(e: anyhow::Error) -> VehicleApiError {
    error!("Vehicle storage failure: {:#}", e);
    VehicleApiError::InternalError
}

/// Create vehicle - POST /veiculos (Adm or Editor)
pub async fn create_vehicle(
    State(state): State<VehicleState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<Vehicle>,
) -> Result<Response, VehicleApiError> {
    validate_vehicle(&payload, Utc::now().year()).map_err(VehicleApiError::Validation)?;

    let created = state.directory.create(&payload).map_err(internal)?;
    info!("✅ Vehicle {} created by {}", created.id, claims.sub);

    let location = format!("/veiculos/{}", created.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)).into_response())
}

/// List vehicles - GET /veiculos (any authenticated caller)
pub async fn list_vehicles(
    State(state): State<VehicleState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Vehicle>>, VehicleApiError> {
    let vehicles = state
        .directory
        .list(query.page(), &query.filter())
        .map_err(internal)?;
    Ok(Json(vehicles))
}

/// Get vehicle - GET /veiculos/:id (any authenticated caller)
pub async fn get_vehicle(
    State(state): State<VehicleState>,
    Path(id): Path<i64>,
) -> Result<Json<Vehicle>, VehicleApiError> {
    state
        .directory
        .get(id)
        .map_err(internal)?
        .map(Json)
        .ok_or(VehicleApiError::NotFound)
}

/// Replace vehicle - PUT /veiculos/:id (Adm or Editor)
///
/// Only the path/body id match is checked; field rules are not re-run.
pub async fn update_vehicle(
    State(state): State<VehicleState>,
    Path(id): Path<i64>,
    Json(payload): Json<Vehicle>,
) -> Result<StatusCode, VehicleApiError> {
    if id != payload.id {
        warn!("Update rejected: path id {} != body id {}", id, payload.id);
        return Err(VehicleApiError::IdMismatch);
    }

    if !state.directory.update(&payload).map_err(internal)? {
        return Err(VehicleApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Delete vehicle - DELETE /veiculos/:id (Adm only)
pub async fn delete_vehicle(
    State(state): State<VehicleState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<StatusCode, VehicleApiError> {
    if !state.directory.delete(id).map_err(internal)? {
        return Err(VehicleApiError::NotFound);
    }

    info!("Vehicle {} deleted by {}", id, claims.sub);
    Ok(StatusCode::NO_CONTENT)
}

/// Vehicle API errors
#[derive(Debug)]
pub enum VehicleApiError {
    Validation(FieldErrors),
    NotFound,
    IdMismatch,
    InternalError,
}

impl IntoResponse for VehicleApiError {
    fn into_response(self) -> Response {
        match self {
            VehicleApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "title": "One or more validation errors occurred.",
                    "status": StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                    "errors": errors,
                })),
            )
                .into_response(),
            VehicleApiError::NotFound => (StatusCode::NOT_FOUND, "Vehicle not found").into_response(),
            VehicleApiError::IdMismatch => (
                StatusCode::BAD_REQUEST,
                "Path id does not match body id",
            )
                .into_response(),
            VehicleApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use crate::vehicles::models::VehicleFilter;
    use parking_lot::Mutex;

    /// Records calls so tests can assert the store was never touched.
    #[derive(Default)]
    struct RecordingDirectory {
        calls: Mutex<Vec<&'static str>>,
    }

    impl VehicleDirectory for RecordingDirectory {
        fn create(&self, vehicle: &Vehicle) -> anyhow::Result<Vehicle> {
            self.calls.lock().push("create");
            Ok(Vehicle {
                id: 7,
                ..vehicle.clone()
            })
        }
        fn list(&self, _page: i64, _filter: &VehicleFilter) -> anyhow::Result<Vec<Vehicle>> {
            self.calls.lock().push("list");
            Ok(Vec::new())
        }
        fn get(&self, _id: i64) -> anyhow::Result<Option<Vehicle>> {
            self.calls.lock().push("get");
            Ok(None)
        }
        fn update(&self, _vehicle: &Vehicle) -> anyhow::Result<bool> {
            self.calls.lock().push("update");
            Ok(true)
        }
        fn delete(&self, _id: i64) -> anyhow::Result<bool> {
            self.calls.lock().push("delete");
            Ok(false)
        }
    }

    fn claims() -> Claims {
        Claims {
            sub: "adm@teste.com".to_string(),
            role: Role::Adm,
            iss: "vehicle-registry".to_string(),
            aud: "vehicle-registry-clients".to_string(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn vehicle(id: i64, name: &str, brand: &str, year: i32) -> Vehicle {
        Vehicle {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            year,
        }
    }

    #[tokio::test]
    async fn test_create_sets_location() {
        let directory = Arc::new(RecordingDirectory::default());
        let state = VehicleState::new(directory.clone());

        let response = create_vehicle(
            State(state),
            Extension(claims()),
            Json(vehicle(0, "Uno", "Fiat", 2010)),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[LOCATION], "/veiculos/7");
        assert_eq!(*directory.calls.lock(), vec!["create"]);
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let directory = Arc::new(RecordingDirectory::default());
        let state = VehicleState::new(directory.clone());

        let err = create_vehicle(
            State(state),
            Extension(claims()),
            Json(vehicle(0, "", "", 1800)),
        )
        .await
        .unwrap_err();

        match err {
            VehicleApiError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(directory.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_update_id_mismatch_is_a_no_op() {
        let directory = Arc::new(RecordingDirectory::default());
        let state = VehicleState::new(directory.clone());

        let err = update_vehicle(State(state), Path(5), Json(vehicle(7, "Uno", "Fiat", 2010)))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert!(directory.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_update_skips_field_validation() {
        let directory = Arc::new(RecordingDirectory::default());
        let state = VehicleState::new(directory.clone());

        let status = update_vehicle(State(state), Path(5), Json(vehicle(5, "", "", 1800)))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(*directory.calls.lock(), vec!["update"]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let state = VehicleState::new(Arc::new(RecordingDirectory::default()));
        let err = delete_vehicle(State(state), Extension(claims()), Path(5))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            VehicleApiError::Validation(FieldErrors::new())
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            VehicleApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            VehicleApiError::IdMismatch.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            VehicleApiError::InternalError.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
