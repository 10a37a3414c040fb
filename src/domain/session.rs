//! Session identity and the authorization gate.
//!
//! A [`Session`] is an explicit value resolved once per request and passed
//! into every service call; there is no ambient current-user state. The
//! per-session state machine is:
//!
//! `Anonymous --login--> Authenticated (admin or not) --logout--> Anonymous`
//!
//! Authorization checks go through [`Session::require`], which is the single
//! guard applied at the start of each use case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Access level required by a use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Any authenticated user
    User,
    /// Admin-flagged users only
    Admin,
}

/// Authenticated context attached to a sequence of requests from one client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Per-request session state.
#[derive(Debug, Clone, Default)]
pub enum Session {
    /// No identity established
    #[default]
    Anonymous,
    /// Identity established by a successful login
    Authenticated(SessionIdentity),
}

impl Session {
    /// Get the identity if authenticated.
    pub fn identity(&self) -> Option<&SessionIdentity> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(identity) => Some(identity),
        }
    }

    /// Check whether any identity is established.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Check whether the session carries admin privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Authenticated(identity) if identity.is_admin)
    }

    /// Authorization guard: fail with `Unauthenticated` when anonymous,
    /// and with `Forbidden` when a non-admin asks for admin access.
    pub fn require(&self, level: AccessLevel) -> AppResult<&SessionIdentity> {
        let identity = self.identity().ok_or(AppError::Unauthenticated)?;
        match level {
            AccessLevel::User => Ok(identity),
            AccessLevel::Admin if identity.is_admin => Ok(identity),
            AccessLevel::Admin => Err(AppError::Forbidden),
        }
    }
}

/// Opaque server-side session token carried by clients.
///
/// The token is random and carries no claims; all identity fields live in
/// the server-side session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
