use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::models::Session;

/// In-process map of live wizard sessions.
///
/// Sessions are independent of each other and are never written anywhere
/// else; restarting the process discards them. The lock is held only for the
/// duration of a closure passed to [`SessionStore::update`], never across an
/// external call.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Starts a new session at `home`. Idle sessions past the TTL are swept first.
    pub async fn create(&self) -> Session {
        let session = Session::new();
        let mut sessions = self.sessions.write().await;

        let swept = sweep_expired(&mut sessions, self.ttl);
        if swept > 0 {
            info!("Expired {swept} idle session(s)");
        }

        sessions.insert(session.id, session.clone());
        debug!("Session {} created ({} live)", session.id, sessions.len());
        session
    }

    /// Returns a copy of the session. A read does not count as activity; handlers
    /// acting on a step go through [`SessionStore::update`].
    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| session_not_found(id))
    }

    /// Runs `f` against the session under the write lock and returns its result.
    ///
    /// `f` must leave the session untouched when it returns an error.
    pub async fn update<T, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Session) -> Result<T, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        session.touch();
        f(session)
    }

    /// Ends a session. Returns `false` if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

/// Drops sessions whose last activity is older than `ttl`. Returns how many were removed.
fn sweep_expired(sessions: &mut HashMap<Uuid, Session>, ttl: Duration) -> usize {
    let Ok(ttl) = chrono::Duration::from_std(ttl) else {
        return 0;
    };
    let cutoff = Utc::now() - ttl;
    let before = sessions.len();
    sessions.retain(|_, s| s.last_active_at >= cutoff);
    before - sessions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::models::Step;

    #[tokio::test]
    async fn test_create_then_get() {
        let store = SessionStore::new(Duration::from_secs(3600));
        let session = store.create().await;

        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.id, session.id);
        assert_eq!(fetched.step, Step::Home);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new(Duration::from_secs(3600));
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(3600));
        let a = store.create().await;
        let b = store.create().await;

        store
            .update(a.id, |s| {
                s.step = Step::Form;
                s.contract_data.party1 = Some("Acme".to_string());
                Ok(())
            })
            .await
            .unwrap();

        let b = store.get(b.id).await.unwrap();
        assert_eq!(b.step, Step::Home);
        assert!(b.contract_data.party1.is_none());
    }

    #[tokio::test]
    async fn test_remove_discards_session() {
        let store = SessionStore::new(Duration::from_secs(3600));
        let session = store.create().await;

        assert!(store.remove(session.id).await);
        assert!(!store.remove(session.id).await);
        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn test_sweep_drops_only_idle_sessions() {
        let mut sessions = HashMap::new();
        let fresh = Session::new();
        let mut stale = Session::new();
        stale.last_active_at = Utc::now() - chrono::Duration::hours(3);
        sessions.insert(fresh.id, fresh.clone());
        sessions.insert(stale.id, stale.clone());

        let removed = sweep_expired(&mut sessions, Duration::from_secs(2 * 3600));
        assert_eq!(removed, 1);
        assert!(sessions.contains_key(&fresh.id));
        assert!(!sessions.contains_key(&stale.id));
    }
}
