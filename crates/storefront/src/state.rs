//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::services::{CartRegistry, ContactService};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is the only way handlers
/// reach the catalog and the cart registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    carts: CartRegistry,
    contact: ContactService,
}

impl AppState {
    /// Create application state, loading the catalog named by the config.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let catalog = Catalog::load(path)?;
                tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
                catalog
            }
            None => Catalog::seeded(),
        };

        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an already-built catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let carts = CartRegistry::new(config.carts);
        let contact = ContactService::new(config.simulation.contact_delay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
                contact,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart registry.
    #[must_use]
    pub fn carts(&self) -> &CartRegistry {
        &self.inner.carts
    }

    /// Get a reference to the contact service.
    #[must_use]
    pub fn contact(&self) -> &ContactService {
        &self.inner.contact
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_defaults_to_seeded_catalog() {
        let state = AppState::new(StorefrontConfig::default()).unwrap();
        assert_eq!(state.catalog().len(), Catalog::seeded().len());
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let config = StorefrontConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            ..StorefrontConfig::default()
        };
        let result = AppState::new(config);
        assert!(matches!(result, Err(StateError::Catalog(CatalogError::Io { .. }))));
    }
}
