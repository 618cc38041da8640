//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Process-wide registry of live connections
//!
//! Each session registers its cancellation token on start and unregisters on
//! teardown; a shutdown pass cancels everything still registered. Sessions
//! own their sockets and buffers, so the registry never closes anything
//! itself — cancelling a token wakes the owning task, which exits through
//! its normal teardown. Unregister is idempotent, so session-initiated
//! teardown and shutdown cleanup can race without double-releasing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Tracked set of live sessions, keyed by session id.
///
/// All operations take a single lock with strictly bounded critical
/// sections; the lock is never held across an await point.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<Uuid, CancellationToken>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a session. Callers register each session exactly once.
    pub fn register(&self, session_id: Uuid, token: CancellationToken) {
        self.lock().insert(session_id, token);
        tracing::debug!("Registered session {}", session_id);
    }

    /// Stop tracking a session; no-op when the session is not registered
    /// (it may already have been drained by a concurrent cleanup pass).
    pub fn unregister(&self, session_id: Uuid) {
        if self.lock().remove(&session_id).is_some() {
            tracing::debug!("Unregistered session {}", session_id);
        }
    }

    /// Cancel every currently registered session and clear the registry.
    /// The set is snapshotted and cleared under the lock; tokens are
    /// cancelled outside it. A session registered after the snapshot is not
    /// part of this pass and remains responsible for its own teardown.
    /// Returns the number of sessions cancelled.
    pub fn cleanup_all(&self) -> usize {
        let drained: Vec<(Uuid, CancellationToken)> = self.lock().drain().collect();
        for (session_id, token) in &drained {
            tracing::info!("Closing session {}", session_id);
            token.cancel();
        }
        drained.len()
    }

    /// Number of currently registered sessions
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no session is registered
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Ids of all currently registered sessions
    pub fn active_sessions(&self) -> Vec<Uuid> {
        self.lock().keys().copied().collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, CancellationToken>> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registration handle tying a session's registry entry to its task scope.
/// Dropping the guard unregisters the session, so every exit path — normal
/// return, error, or forced cancellation — releases the entry exactly once.
#[derive(Debug)]
pub struct SessionGuard {
    registry: Arc<ConnectionRegistry>,
    session_id: Uuid,
}

impl SessionGuard {
    /// Register the session and hand back the guard that unregisters it
    pub fn register(
        registry: Arc<ConnectionRegistry>,
        session_id: Uuid,
        token: CancellationToken,
    ) -> Self {
        registry.register(session_id, token);
        Self {
            registry,
            session_id,
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.unregister(self.session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_unregister() {
        let registry = ConnectionRegistry::new();
        let id = Uuid::new_v4();

        registry.register(id, CancellationToken::new());
        assert_eq!(registry.len(), 1);
        assert!(registry.active_sessions().contains(&id));

        registry.unregister(id);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister_unknown_session_is_noop() {
        let registry = ConnectionRegistry::new();
        registry.unregister(Uuid::new_v4());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_cleanup_releases_remaining_sessions() {
        let registry = ConnectionRegistry::new();

        let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            registry.register(*id, CancellationToken::new());
        }
        for id in &ids[..3] {
            registry.unregister(*id);
        }

        assert_eq!(registry.cleanup_all(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_cleanup_cancels_tokens() {
        let registry = ConnectionRegistry::new();
        let token = CancellationToken::new();

        registry.register(Uuid::new_v4(), token.clone());
        registry.cleanup_all();

        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cleanup_on_empty_registry() {
        let registry = ConnectionRegistry::new();
        assert_eq!(registry.cleanup_all(), 0);
    }

    #[test]
    fn test_guard_unregisters_on_drop() {
        let registry = Arc::new(ConnectionRegistry::new());
        let id = Uuid::new_v4();

        {
            let _guard =
                SessionGuard::register(Arc::clone(&registry), id, CancellationToken::new());
            assert_eq!(registry.len(), 1);
        }

        assert!(registry.is_empty());
    }

    #[test]
    fn test_guard_drop_after_cleanup_is_noop() {
        let registry = Arc::new(ConnectionRegistry::new());
        let guard = SessionGuard::register(
            Arc::clone(&registry),
            Uuid::new_v4(),
            CancellationToken::new(),
        );

        assert_eq!(registry.cleanup_all(), 1);
        drop(guard);

        assert!(registry.is_empty());
        assert_eq!(registry.cleanup_all(), 0);
    }
}
