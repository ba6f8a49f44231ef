use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Access/refresh pair issued by the token endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Credentials attached to a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    access: String,
}

impl Credentials {
    pub fn bearer(access: impl Into<String>) -> Self {
        Self {
            access: access.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.access
    }
}

impl From<&AuthTokens> for Credentials {
    fn from(tokens: &AuthTokens) -> Self {
        Credentials::bearer(tokens.access.clone())
    }
}
