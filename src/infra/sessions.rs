//! Server-side session store.
//!
//! Sessions are held in process memory, keyed by an opaque random token.
//! Clients only ever see the token; every identity field stays on the
//! server, so a session can be revoked or refreshed without touching the
//! client. Entries expire after the configured TTL or on explicit logout.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::{Session, SessionIdentity, SessionToken};

struct StoredSession {
    identity: SessionIdentity,
    expires_at: DateTime<Utc>,
}

/// In-memory session store with TTL-based expiry.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionToken, StoredSession>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl_hours`.
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Establish a new session for an identity, returning its token.
    pub async fn insert(&self, identity: SessionIdentity) -> SessionToken {
        let token = SessionToken::generate();
        let stored = StoredSession {
            identity,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().await.insert(token, stored);
        token
    }

    /// Resolve a token to a session. Unknown or expired tokens resolve to
    /// `Anonymous`; expired entries are dropped on the way out.
    pub async fn resolve(&self, token: &SessionToken) -> Session {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(stored) if stored.expires_at > Utc::now() => {
                    return Session::Authenticated(stored.identity.clone());
                }
                Some(_) => {}
                None => return Session::Anonymous,
            }
        }

        // Expired: evict under the write lock
        self.sessions.write().await.remove(token);
        Session::Anonymous
    }

    /// Remove a session unconditionally (logout).
    pub async fn remove(&self, token: &SessionToken) {
        self.sessions.write().await.remove(token);
    }

    /// Refresh the cached display name of a live session, if any.
    pub async fn refresh_name(&self, token: &SessionToken, name: &str) {
        if let Some(stored) = self.sessions.write().await.get_mut(token) {
            stored.identity.name = name.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> SessionIdentity {
        SessionIdentity {
            user_id: 1,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_insert_and_resolve() {
        let store = SessionStore::new(1);
        let token = store.insert(identity()).await;

        let session = store.resolve(&token).await;
        assert!(session.is_authenticated());
        assert_eq!(session.identity().unwrap().user_id, 1);
    }

    #[tokio::test]
    async fn test_unknown_token_is_anonymous() {
        let store = SessionStore::new(1);
        let session = store.resolve(&SessionToken::generate()).await;
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_remove_clears_session() {
        let store = SessionStore::new(1);
        let token = store.insert(identity()).await;

        store.remove(&token).await;
        assert!(!store.resolve(&token).await.is_authenticated());
    }

    #[tokio::test]
    async fn test_expired_session_resolves_anonymous() {
        // Zero TTL: the session is already past its expiry
        let store = SessionStore::new(0);
        let token = store.insert(identity()).await;

        assert!(!store.resolve(&token).await.is_authenticated());
    }

    #[tokio::test]
    async fn test_refresh_name_updates_identity() {
        let store = SessionStore::new(1);
        let token = store.insert(identity()).await;

        store.refresh_name(&token, "Renamed").await;
        let session = store.resolve(&token).await;
        assert_eq!(session.identity().unwrap().name, "Renamed");
    }
}
