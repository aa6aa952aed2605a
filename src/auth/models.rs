//! Authentication Models
//! Administrator records, roles, token claims and login payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrator account as stored in the credential store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Administrator {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Administrator role.
///
/// The store keeps roles as free text; anything other than the two
/// well-known roles is carried verbatim in `Other` and never grants a
/// role-restricted operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Adm,
    Editor,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Adm => "Adm",
            Role::Editor => "Editor",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Adm" => Role::Adm,
            "Editor" => Role::Editor,
            _ => Role::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // administrator email
    pub role: Role,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64, // expiration, unix seconds
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(alias = "senha", alias = "secret")]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires: DateTime<Utc>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Adm).unwrap(), r#""Adm""#);
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), r#""Editor""#);

        let other: Role = serde_json::from_str(r#""Auditor""#).unwrap();
        assert_eq!(other, Role::Other("Auditor".to_string()));
        assert_eq!(serde_json::to_string(&other).unwrap(), r#""Auditor""#);
    }

    #[test]
    fn test_role_parsing_is_case_sensitive() {
        assert_eq!(Role::from("Adm"), Role::Adm);
        assert_eq!(Role::from("adm"), Role::Other("adm".to_string()));
        assert_eq!(Role::from("EDITOR"), Role::Other("EDITOR".to_string()));
    }

    #[test]
    fn test_login_request_accepts_aliases() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"adm@teste.com","senha":"123456"}"#).unwrap();
        assert_eq!(req.password, "123456");

        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"adm@teste.com","password":"abc"}"#).unwrap();
        assert_eq!(req.password, "abc");
    }
}
