//! Session middleware configuration.
//!
//! Sessions live in memory alongside the carts they point to; both are lost
//! on restart. The session store is bounded the same way the cart registry
//! is: at most `capacity` records, each dropped after the idle timeout.

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::config::{CartConfig, StorefrontConfig};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "cornershop_session";

/// In-memory session store with capacity and idle eviction.
#[derive(Debug, Clone)]
pub struct SessionCache {
    sessions: Cache<Id, Record>,
}

impl SessionCache {
    #[must_use]
    pub fn new(config: CartConfig) -> Self {
        let sessions = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_idle(config.idle_timeout)
            .build();
        Self { sessions }
    }

    /// Number of stored sessions. Approximate until pending maintenance has run.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run pending evictions now.
    pub async fn sync(&self) {
        self.sessions.run_pending_tasks().await;
    }
}

#[async_trait]
impl SessionStore for SessionCache {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        loop {
            let entry = self.sessions.entry(record.id).or_insert(record.clone()).await;
            if entry.is_fresh() {
                return Ok(());
            }
            // Id collision
            record.id = Id::default();
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.sessions.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self.sessions.get(session_id).await {
            Some(record) if record.expiry_date > OffsetDateTime::now_utc() => Ok(Some(record)),
            Some(_) => {
                self.sessions.invalidate(session_id).await;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.sessions.invalidate(session_id).await;
        Ok(())
    }
}

/// Create the session layer over a [`SessionCache`].
///
/// Session inactivity expiry matches the cart idle timeout so a live cookie
/// never outlives its cart by much.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<SessionCache> {
    let expiry_secs = i64::try_from(config.carts.idle_timeout.as_secs()).unwrap_or(i64::MAX);

    SessionManagerLayer::new(SessionCache::new(config.carts))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(expiry_secs),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
