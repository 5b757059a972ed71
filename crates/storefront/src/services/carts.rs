//! Registry of live carts.
//!
//! Each session carries a [`CartKey`]; the registry maps it to a
//! [`CartStore`]. Carts idle for longer than the configured timeout are
//! evicted, as are the least recently used carts once capacity is reached.

use std::fmt;
use std::sync::Arc;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CartConfig;
use crate::store::CartStore;

/// Opaque per-session cart identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartKey(Uuid);

impl CartKey {
    /// Generate a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// In-memory cart stores keyed by session.
#[derive(Clone)]
pub struct CartRegistry {
    carts: Cache<CartKey, Arc<CartStore>>,
}

impl CartRegistry {
    #[must_use]
    pub fn new(config: CartConfig) -> Self {
        let carts = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_idle(config.idle_timeout)
            .build();
        Self { carts }
    }

    /// Return the cart for `key`, creating it when missing or expired.
    ///
    /// A `None` key always yields a brand-new cart under a new key.
    pub async fn open(&self, key: Option<CartKey>) -> (CartKey, Arc<CartStore>) {
        let key = key.unwrap_or_else(CartKey::generate);
        let store = self
            .carts
            .get_with(key, async {
                tracing::debug!(cart = %key, "Creating cart");
                Arc::new(CartStore::new())
            })
            .await;
        (key, store)
    }

    /// Look up an existing cart without creating one.
    pub async fn peek(&self, key: CartKey) -> Option<Arc<CartStore>> {
        self.carts.get(&key).await
    }

    /// Number of carts currently held. Approximate until pending
    /// maintenance has run.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.carts.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
