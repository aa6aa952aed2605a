//! Authentication Middleware
//! Verify the bearer token and enforce the route's access policy

use crate::auth::{
    jwt::JwtHandler,
    policy::{Access, Policy},
};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// State for one guarded group of routes
#[derive(Clone)]
pub struct AccessGuard {
    pub jwt_handler: Arc<JwtHandler>,
    pub policy: Policy,
}

impl AccessGuard {
    pub fn new(jwt_handler: Arc<JwtHandler>, policy: Policy) -> Self {
        Self {
            jwt_handler,
            policy,
        }
    }
}

/// Pull the raw token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidFormat)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return Err(AuthError::InvalidFormat);
    }
    Ok(token)
}

/// Route-layer middleware: 401 without a valid token, 403 when the role
/// falls outside the policy, otherwise the claims are attached to the
/// request and the handler runs.
pub async fn require_policy(
    State(guard): State<AccessGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = if guard.policy.requires_token() {
        let token = extract_bearer(req.headers())?;
        let claims = guard.jwt_handler.validate_token(token).map_err(|e| {
            debug!("Rejected token: {}", e);
            AuthError::InvalidToken
        })?;
        Some(claims)
    } else {
        None
    };

    match guard.policy.check(claims.as_ref().map(|c| &c.role)) {
        Access::Granted => {}
        Access::Unauthenticated => return Err(AuthError::MissingToken),
        Access::Forbidden => {
            debug!(
                "Forbidden: role {:?} not permitted by {:?}",
                claims.as_ref().map(|c| c.role.as_str()),
                guard.policy
            );
            return Err(AuthError::Forbidden);
        }
    }

    if let Some(claims) = claims {
        req.extensions_mut().insert(claims);
    }

    Ok(next.run(req).await)
}

/// Auth error types
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidFormat,
    InvalidToken,
    Forbidden,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
            AuthError::InvalidFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid authorization format. Use: Bearer {token}",
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "Insufficient permissions"),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token_valid() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Ok("abc.def.ghi"));

        let headers = headers_with("bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_token_rejections() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            extract_bearer(&headers_with("abc.def.ghi")),
            Err(AuthError::InvalidFormat)
        );
        assert_eq!(
            extract_bearer(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidFormat)
        );
        assert_eq!(
            extract_bearer(&headers_with("Bearer ")),
            Err(AuthError::InvalidFormat)
        );
    }

    #[test]
    fn test_auth_error_responses() {
        assert_eq!(
            AuthError::MissingToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidFormat.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
