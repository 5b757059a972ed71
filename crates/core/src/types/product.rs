//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable product.
///
/// Products are immutable once loaded into a catalog; carts hold them by
/// shared reference rather than copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image URI.
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    /// Informational only; does not block adding to a cart.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f32,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Case-insensitive substring match over name or description.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
