//! Read-only product catalog.
//!
//! The catalog is built once at startup, either from the built-in seed data
//! or from a JSON file, and shared by every request. Products are held as
//! `Arc<Product>` so carts can reference them without copying.

mod filter;
mod seed;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use cornershop_core::{Product, ProductId};

pub use filter::ProductFilter;

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
    #[error("product {id} is priced in {found}, expected {expected} like the rest of the catalog")]
    MixedCurrency {
        id: ProductId,
        expected: &'static str,
        found: &'static str,
    },
}

/// The static set of purchasable products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
}

impl Catalog {
    /// The built-in catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            products: seed::products().into_iter().map(Arc::new).collect(),
        }
    }

    /// Build a catalog from product records, validating ids, names and prices.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if two products share an id, a name is blank,
    /// a price is negative, or prices are not all in one currency.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        let currency = products
            .first()
            .map(|p| p.price.currency_code)
            .unwrap_or_default();
        for product in &products {
            if product.price.currency_code != currency {
                return Err(CatalogError::MixedCurrency {
                    id: product.id,
                    expected: currency.code(),
                    found: product.price.currency_code.code(),
                });
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on malformed JSON or invalid products.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_products(serde_json::from_str(json)?)
    }

    /// Load a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<Arc<Product>> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    #[must_use]
    pub fn list_featured(&self) -> Vec<Arc<Product>> {
        self.products.iter().filter(|p| p.featured).cloned().collect()
    }

    #[must_use]
    pub fn list_by_category(&self, category: &str) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn list_categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter(|p| seen.insert(p.category.as_str()))
            .map(|p| p.category.clone())
            .collect()
    }

    /// Highest price in the catalog; zero when empty.
    #[must_use]
    pub fn max_price(&self) -> Decimal {
        self.products
            .iter()
            .map(|p| p.price.amount)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Up to `limit` other products from the same category.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cornershop_core::{CurrencyCode, Price};

    use super::*;

    fn product(id: i32, category: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents, CurrencyCode::USD),
            image: "/placeholder.svg".to_string(),
            category: category.to_string(),
            featured: id % 2 == 0,
            in_stock: true,
            rating: 4.0,
        }
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.list_categories(),
            vec!["electronics", "furniture", "accessories", "kitchen", "fitness"]
        );
        assert_eq!(catalog.max_price(), Decimal::new(19999, 2));
        assert_eq!(catalog.list_featured().len(), 4);
        assert_eq!(catalog.list_by_category("electronics").len(), 4);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::seeded();
        let headphones = catalog.find_by_id(ProductId::new(1)).unwrap();
        assert_eq!(headphones.name, "Wireless Bluetooth Headphones");
        assert!(catalog.find_by_id(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_related_excludes_self() {
        let catalog = Catalog::from_products(vec![
            product(1, "a", 100),
            product(2, "a", 100),
            product(3, "b", 100),
            product(4, "a", 100),
        ])
        .unwrap();
        let first = catalog.find_by_id(ProductId::new(1)).unwrap();

        let related: Vec<_> = catalog.related(&first, 5).iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(related, vec![2, 4]);
        assert_eq!(catalog.related(&first, 1).len(), 1);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Catalog::from_products(vec![product(1, "a", 100), product(1, "b", 200)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == ProductId::new(1)));
    }

    #[test]
    fn test_rejects_negative_price() {
        let err = Catalog::from_products(vec![product(5, "a", -1)]).unwrap_err();
        assert!(matches!(err, CatalogError::NegativePrice(_)));
    }

    #[test]
    fn test_rejects_mixed_currencies() {
        let mut pounds = product(2, "a", 1000);
        pounds.price = Price::from_cents(1000, CurrencyCode::GBP);

        let err = Catalog::from_products(vec![product(1, "a", 1000), pounds]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MixedCurrency { id, expected: "USD", found: "GBP" }
                if id == ProductId::new(2)
        ));
    }

    #[test]
    fn test_single_foreign_currency_is_fine() {
        let json = r#"[
            {"id": 1, "name": "Kettle", "description": "", "price": {"amount": "10.00", "currency_code": "GBP"},
             "image": "/k.png", "category": "kitchen"},
            {"id": 2, "name": "Teapot", "description": "", "price": {"amount": "10.00", "currency_code": "GBP"},
             "image": "/t.png", "category": "kitchen"}
        ]"#;
        assert_eq!(Catalog::from_json_str(json).unwrap().len(), 2);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"id": 10, "name": "Mug", "description": "Ceramic", "price": {"amount": "12.99"},
             "image": "/mug.png", "category": "kitchen", "featured": true, "rating": 4.2}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.list_featured().len(), 1);
        assert!(Catalog::from_json_str("{").is_err());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_products(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.max_price(), Decimal::ZERO);
        assert!(catalog.list_categories().is_empty());
    }
}
