//! Authentication service - the credential gate and session lifecycle.
//!
//! Login failures are uniform: a missing account and a wrong password both
//! surface as `InvalidCredentials`, and verification work is performed in
//! both cases so response timing does not leak which one happened.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::is_valid_level;
use crate::domain::{AccessLevel, Password, Session, SessionIdentity, SessionToken, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionStore, UserRepository};

/// Syntactically valid Argon2 hash that verifies nothing; used to equalize
/// the work done for unknown emails.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$MTIzNDU2Nzg5MDEyMzQ1Ng$GpZ3sK/oz9OHjJYdOMjUW5qlVkIwDAg3q9kXkR0c8dM";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user account
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        level: String,
    ) -> AppResult<User>;

    /// Verify credentials and establish a session
    async fn login(&self, email: String, password: String) -> AppResult<(SessionToken, User)>;

    /// Clear a session unconditionally
    async fn logout(&self, token: &SessionToken);

    /// Resolve an opaque token to its session state
    async fn resolve(&self, token: &SessionToken) -> Session;

    /// Update the caller's own profile (name, level) and refresh the
    /// session's cached name
    async fn update_profile(
        &self,
        token: Option<&SessionToken>,
        session: &Session,
        name: String,
        level: String,
    ) -> AppResult<User>;
}

/// Concrete implementation of AuthService
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    sessions: Arc<SessionStore>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<SessionStore>) -> Self {
        Self { users, sessions }
    }
}

fn check_level(level: &str) -> AppResult<()> {
    if is_valid_level(level) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Level must be one of: {}",
            crate::config::VALID_LEVELS.join(", ")
        )))
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        level: String,
    ) -> AppResult<User> {
        check_level(&level)?;

        // Fast-path duplicate check; the unique constraint backstops the race
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self.users.create(name, email, password_hash, level).await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<(SessionToken, User)> {
        let user = self.users.find_by_email(&email).await?;

        let stored_hash = user
            .as_ref()
            .map_or(DUMMY_HASH, |u| u.password_hash.as_str());
        let password_valid = Password::from_hash(stored_hash.to_string()).verify(&password);

        let Some(user) = user else {
            return Err(AppError::InvalidCredentials);
        };
        if !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let identity = SessionIdentity {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        };
        let token = self.sessions.insert(identity).await;

        tracing::info!(user_id = user.id, "user logged in");
        Ok((token, user))
    }

    async fn logout(&self, token: &SessionToken) {
        self.sessions.remove(token).await;
    }

    async fn resolve(&self, token: &SessionToken) -> Session {
        self.sessions.resolve(token).await
    }

    async fn update_profile(
        &self,
        token: Option<&SessionToken>,
        session: &Session,
        name: String,
        level: String,
    ) -> AppResult<User> {
        let identity = session.require(AccessLevel::User)?;
        check_level(&level)?;

        let user = self
            .users
            .update_profile(identity.user_id, name, level)
            .await?;

        // Keep the session's cached display name in sync
        if let Some(token) = token {
            self.sessions.refresh_name(token, &user.name).await;
        }

        Ok(user)
    }
}
