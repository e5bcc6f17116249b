//! In-process session token store.
//!
//! Tokens are 32 random bytes, hex-encoded, mapping to exactly one
//! [`SessionIdentity`]. Logout revokes the presented token only; other
//! sessions of the same account stay valid.

use std::collections::HashMap;
use std::sync::Arc;

use rand::RngCore;
use tokio::sync::RwLock;

use super::SessionIdentity;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionIdentity>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token bound to `identity`.
    pub async fn issue(&self, identity: SessionIdentity) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.inner.write().await.insert(token.clone(), identity);
        token
    }

    pub async fn resolve(&self, token: &str) -> Option<SessionIdentity> {
        self.inner.read().await.get(token).cloned()
    }

    /// Removes the token; returns whether it existed.
    pub async fn revoke(&self, token: &str) -> bool {
        self.inner.write().await.remove(token).is_some()
    }
}
