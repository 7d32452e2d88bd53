//! Values that upstream middleware places on a request.
//!
//! Authentication and CSRF middleware are not part of hxpage. They insert
//! these types into the request's extensions and the page context reads
//! them back by type.

use serde::{Deserialize, Serialize};

/// The authenticated user for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Whether the user may access administrative pages
    #[serde(default)]
    pub admin: bool,
}

impl AuthUser {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            admin: false,
        }
    }

    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }
}

/// Anti-forgery token issued for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsrfToken(pub String);

impl CsrfToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
