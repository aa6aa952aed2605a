//! Runtime configuration loaded from the environment.

use anyhow::{bail, Context, Result};
use std::env;

const DEV_JWT_KEY: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Token signing and validation settings.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// Symmetric HMAC key shared by issuer and verifier.
    pub key: String,
    pub issuer: String,
    pub audience: String,
    /// Token lifetime in minutes.
    pub expires_minutes: i64,
}

/// Credentials of the administrator inserted when the store is empty.
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub email: String,
    pub password: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub bind_addr: String,
    pub jwt: JwtSettings,
    pub default_admin: DefaultAdmin,
}

impl AppConfig {
    /// Read settings from the process environment; `.env` is loaded by `main`.
    pub fn from_env() -> Result<Self> {
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./vehicle_registry.db".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let key = env::var("JWT_KEY").unwrap_or_else(|_| {
            tracing::warn!("⚠️  JWT_KEY not set, using development key");
            DEV_JWT_KEY.to_string()
        });
        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "vehicle-registry".to_string());
        let audience =
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| "vehicle-registry-clients".to_string());
        let expires_minutes = match env::var("JWT_EXPIRES_MINUTES") {
            Ok(raw) => parse_expires_minutes(&raw)?,
            Err(_) => 60,
        };

        let default_admin = DefaultAdmin {
            email: env::var("DEFAULT_ADMIN_EMAIL").unwrap_or_else(|_| "adm@teste.com".to_string()),
            password: env::var("DEFAULT_ADMIN_PASSWORD").unwrap_or_else(|_| "123456".to_string()),
        };

        Ok(Self {
            database_path,
            bind_addr,
            jwt: JwtSettings {
                key,
                issuer,
                audience,
                expires_minutes,
            },
            default_admin,
        })
    }
}

fn parse_expires_minutes(raw: &str) -> Result<i64> {
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid JWT_EXPIRES_MINUTES: {raw:?}"))?;
    if minutes <= 0 {
        bail!("JWT_EXPIRES_MINUTES must be positive, got {minutes}");
    }
    Ok(minutes)
}
