use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

/// Custom error type for session operations
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no active session")]
    NoSession,

    #[error("session refresh failed: {0}")]
    RefreshFailed(String),
}

/// The authenticated identity the engine acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

/// Access to the host application's authentication state.
///
/// Preference writes are gated on the session matching the target user, and
/// a permission-denied write triggers one `refresh_session` before the
/// single retry.
#[async_trait]
pub trait SessionProviderTrait: Send + Sync {
    async fn get_session(&self) -> Option<Session>;

    async fn refresh_session(&self) -> Result<(), AuthError>;
}

/// Session provider backed by state the host sets explicitly.
///
/// Desktop shells authenticate out-of-band and hand the resulting identity
/// to the engine through this provider.
pub struct StaticSessionProvider {
    session: RwLock<Option<Session>>,
}

impl StaticSessionProvider {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            session: RwLock::new(Some(Session {
                user_id: user_id.into(),
            })),
        }
    }

    /// Creates a provider with no active session.
    pub fn anonymous() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    pub fn set_session(&self, user_id: impl Into<String>) {
        *self.session.write().unwrap() = Some(Session {
            user_id: user_id.into(),
        });
    }

    pub fn clear_session(&self) {
        *self.session.write().unwrap() = None;
    }
}

#[async_trait]
impl SessionProviderTrait for StaticSessionProvider {
    async fn get_session(&self) -> Option<Session> {
        self.session.read().unwrap().clone()
    }

    async fn refresh_session(&self) -> Result<(), AuthError> {
        if self.session.read().unwrap().is_some() {
            Ok(())
        } else {
            Err(AuthError::NoSession)
        }
    }
}
