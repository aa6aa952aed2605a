//! Authentication API Endpoints
//! Exchange administrator credentials for a signed token

use crate::auth::{
    admin_store::Authenticator,
    jwt::JwtHandler,
    models::{LoginRequest, LoginResponse},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<dyn Authenticator>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(authenticator: Arc<dyn Authenticator>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            authenticator,
            jwt_handler,
        }
    }
}

/// Login endpoint - POST /auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", payload.email);

    let admin = state
        .authenticator
        .login(&payload.email, &payload.password)
        .map_err(|e| {
            error!("Credential lookup failed: {:#}", e);
            AuthApiError::InternalError
        })?
        .ok_or_else(|| {
            warn!("❌ Failed login attempt: {}", payload.email);
            AuthApiError::InvalidCredentials
        })?;

    let issued = state.jwt_handler.generate_token(&admin).map_err(|e| {
        error!("Token generation failed: {:#}", e);
        AuthApiError::InternalError
    })?;

    info!("✅ Login successful: {} ({})", admin.email, admin.role);

    Ok(Json(LoginResponse {
        access_token: issued.token,
        expires: issued.expires,
        role: issued.role,
    }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}
