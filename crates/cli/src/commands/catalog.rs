//! Catalog inspection commands.
//!
//! Every command works on the built-in catalog unless a JSON catalog file is
//! given, the same file format the storefront reads from
//! `CORNERSHOP_CATALOG_PATH`.

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use cornershop_core::{Product, ProductId};
use cornershop_storefront::catalog::{Catalog, CatalogError, ProductFilter};

/// Errors from catalog commands.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: CatalogError,
    },

    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Listing options for `catalog list`.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub featured: bool,
}

impl ListOptions {
    fn filter(&self) -> ProductFilter {
        ProductFilter::new()
            .with_category(self.category.clone())
            .with_price_range(self.min_price, self.max_price)
            .with_search(self.search.clone())
    }
}

/// Load the catalog from `file`, or the built-in one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid catalog.
pub async fn open(file: Option<&Path>) -> Result<Catalog, CatalogCommandError> {
    let Some(path) = file else {
        return Ok(Catalog::seeded());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogCommandError::Read {
            path: path.display().to_string(),
            source,
        })?;

    Catalog::from_json_str(&json).map_err(|source| CatalogCommandError::Invalid {
        path: path.display().to_string(),
        source,
    })
}

/// Products matching `options`, in catalog order.
#[must_use]
pub fn select(catalog: &Catalog, options: &ListOptions) -> Vec<Arc<Product>> {
    options
        .filter()
        .apply(catalog.products())
        .into_iter()
        .filter(|p| !options.featured || p.featured)
        .collect()
}

fn summary(product: &Product) -> String {
    format!(
        "{:>4}  {:<32} {:>10}  {}{}",
        product.id,
        product.name,
        product.price.display(),
        product.category,
        if product.featured { "  *" } else { "" },
    )
}

/// `catalog list`
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn list(file: Option<&Path>, options: &ListOptions) -> Result<(), CatalogCommandError> {
    let catalog = open(file).await?;
    let products = select(&catalog, options);

    for product in &products {
        info!("{}", summary(product));
    }
    info!("{} of {} products", products.len(), catalog.len());
    Ok(())
}

/// `catalog categories`
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn categories(file: Option<&Path>) -> Result<(), CatalogCommandError> {
    let catalog = open(file).await?;

    for category in catalog.list_categories() {
        let count = catalog.list_by_category(&category).len();
        info!("{category} ({count})");
    }
    Ok(())
}

/// `catalog show`
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or has no such product.
pub async fn show(file: Option<&Path>, id: ProductId) -> Result<(), CatalogCommandError> {
    let catalog = open(file).await?;
    let product = catalog
        .find_by_id(id)
        .ok_or(CatalogCommandError::NotFound(id))?;

    info!("{}", summary(&product));
    info!("  {}", product.description);
    info!(
        "  rating {:.1}, {}",
        product.rating,
        if product.in_stock { "in stock" } else { "out of stock" }
    );

    let related = catalog.related(&product, 4);
    if !related.is_empty() {
        info!("  related:");
        for other in &related {
            info!("  {}", summary(other));
        }
    }
    Ok(())
}

/// `catalog check`
///
/// # Errors
///
/// Returns an error if the file is unreadable or fails validation.
pub async fn check(path: &Path) -> Result<(), CatalogCommandError> {
    let catalog = open(Some(path)).await?;

    info!(
        products = catalog.len(),
        categories = catalog.list_categories().len(),
        featured = catalog.list_featured().len(),
        max_price = %catalog.max_price(),
        "Catalog is valid"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(products: &[Arc<Product>]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[tokio::test]
    async fn test_open_defaults_to_builtin_catalog() {
        let catalog = open(None).await.unwrap();
        assert_eq!(catalog.len(), 8);
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let err = open(Some(Path::new("/definitely/not/here.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogCommandError::Read { .. }));
    }

    #[test]
    fn test_select_by_category_and_price() {
        let catalog = Catalog::seeded();
        let options = ListOptions {
            category: Some("electronics".to_string()),
            max_price: Some(Decimal::new(9000, 2)),
            ..ListOptions::default()
        };
        assert_eq!(ids(&select(&catalog, &options)), vec![2, 5, 7]);
    }

    #[test]
    fn test_select_featured_only() {
        let catalog = Catalog::seeded();
        let options = ListOptions {
            featured: true,
            ..ListOptions::default()
        };
        assert_eq!(ids(&select(&catalog, &options)), vec![1, 2, 5, 8]);
    }

    #[test]
    fn test_select_search_is_case_insensitive() {
        let catalog = Catalog::seeded();
        let options = ListOptions {
            search: Some("WATCH".to_string()),
            ..ListOptions::default()
        };
        assert_eq!(ids(&select(&catalog, &options)), vec![2]);
    }
}
