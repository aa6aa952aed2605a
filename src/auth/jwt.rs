//! JWT Token Handler
//! Issue and verify HS256 tokens carrying the administrator's role

use crate::auth::models::{Administrator, Claims, Role};
use crate::config::JwtSettings;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use tracing::debug;

/// A freshly signed token together with the facts returned to the client
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires: DateTime<Utc>,
    pub role: Role,
}

/// Why a presented token was not accepted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("token rejected: {0}")]
    Rejected(&'static str),
}

/// JWT Handler for token operations
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl JwtHandler {
    pub fn new(settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.audience]);
        validation.set_required_spec_claims(&["sub", "iss", "aud", "exp"]);
        // Expiry is checked against the caller-supplied clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(settings.key.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.key.as_bytes()),
            validation,
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            lifetime: Duration::minutes(settings.expires_minutes),
        }
    }

    /// Generate a token for an authenticated administrator
    pub fn generate_token(&self, admin: &Administrator) -> Result<IssuedToken> {
        self.generate_token_at(admin, Utc::now())
    }

    /// Generate a token as if issued at `now`
    pub fn generate_token_at(
        &self,
        admin: &Administrator,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken> {
        // Claims carry whole seconds; `expires` must be the same instant as `exp`.
        let now = now.trunc_subsecs(0);
        let expires = now
            .checked_add_signed(self.lifetime)
            .context("Invalid expiry timestamp")?;

        let claims = Claims {
            sub: admin.email.clone(),
            role: admin.role.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        debug!(
            "Generating JWT for {} ({}), expires at {}",
            admin.email, admin.role, expires
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to generate JWT")?;

        Ok(IssuedToken {
            token,
            expires,
            role: admin.role.clone(),
        })
    }

    /// Validate a token against the current time
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Validate signature, issuer and audience, then require `now < exp`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::Rejected("bad signature"),
                ErrorKind::InvalidIssuer => TokenError::Rejected("issuer mismatch"),
                ErrorKind::InvalidAudience => TokenError::Rejected("audience mismatch"),
                ErrorKind::InvalidAlgorithm => TokenError::Rejected("unexpected algorithm"),
                ErrorKind::MissingRequiredClaim(_) => TokenError::Rejected("missing claim"),
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            },
        )?;

        if now.timestamp() >= decoded.claims.exp {
            return Err(TokenError::Expired);
        }

        debug!("Validated JWT for {}", decoded.claims.sub);

        Ok(decoded.claims)
    }
}
