//! Product route handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cornershop_core::{Product, ProductId};

use crate::catalog::ProductFilter;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Number of related products shown on a detail page.
const RELATED_LIMIT: usize = 4;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub price_amount: Decimal,
    pub image: String,
    pub category: String,
    pub featured: bool,
    pub in_stock: bool,
    pub rating: f32,
    pub url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            price_amount: product.price.amount,
            image: product.image.clone(),
            category: product.category.clone(),
            featured: product.featured,
            in_stock: product.in_stock,
            rating: product.rating,
            url: format!("/products/{}", product.id),
        }
    }
}

/// Category link data.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub url: String,
    pub active: bool,
}

impl CategoryView {
    pub(crate) fn new(name: &str, active: bool) -> Self {
        Self {
            name: name.to_string(),
            url: listing_url(Some(name)),
            active,
        }
    }
}

/// Product listing query parameters.
///
/// Prices arrive as strings so malformed bounds produce a readable 400.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub q: Option<String>,
}

/// Active filter echo.
#[derive(Debug, Serialize)]
pub struct FilterView {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub active: bool,
}

/// Product listing page data.
#[derive(Debug, Serialize)]
pub struct ProductsIndex {
    pub products: Vec<ProductView>,
    pub total: usize,
    pub categories: Vec<CategoryView>,
    pub filters: FilterView,
    /// Upper end of the price slider.
    pub max_price: Decimal,
    /// Listing URL reflecting the active category.
    pub url: String,
}

/// Product detail page data.
#[derive(Debug, Serialize)]
pub struct ProductShow {
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
}

/// Build the listing URL for an optional category.
pub(crate) fn listing_url(category: Option<&str>) -> String {
    match category {
        Some(category) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("category", category)
                .finish();
            format!("/products?{query}")
        }
        None => "/products".to_string(),
    }
}

fn parse_price(field: &str, raw: Option<&str>) -> Result<Option<Decimal>> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let amount = Decimal::from_str(raw)
        .map_err(|_| AppError::BadRequest(format!("{field} must be a number")))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::BadRequest(format!("{field} cannot be negative")));
    }
    Ok(Some(amount))
}

impl ListingQuery {
    fn to_filter(&self) -> Result<ProductFilter> {
        Ok(ProductFilter::new()
            .with_category(self.category.clone())
            .with_price_range(
                parse_price("min_price", self.min_price.as_deref())?,
                parse_price("max_price", self.max_price.as_deref())?,
            )
            .with_search(self.q.clone()))
    }
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ProductsIndex>> {
    let filter = query.to_filter()?;
    let catalog = state.catalog();

    let products: Vec<ProductView> = filter
        .apply(catalog.products())
        .iter()
        .map(|p| ProductView::from(p.as_ref()))
        .collect();

    let categories = catalog
        .list_categories()
        .iter()
        .map(|name| CategoryView::new(name, filter.category() == Some(name.as_str())))
        .collect();

    Ok(Json(ProductsIndex {
        total: products.len(),
        products,
        categories,
        filters: FilterView {
            category: filter.category().map(str::to_string),
            min_price: filter.min_price(),
            max_price: filter.max_price(),
            search: filter.search().map(str::to_string),
            active: filter.is_active(catalog.max_price()),
        },
        max_price: catalog.max_price(),
        url: listing_url(filter.category()),
    }))
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductShow>> {
    let catalog = state.catalog();
    let product = catalog
        .find_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let related_products = catalog
        .related(&product, RELATED_LIMIT)
        .iter()
        .map(|p| ProductView::from(p.as_ref()))
        .collect();

    Ok(Json(ProductShow {
        product: ProductView::from(product.as_ref()),
        related_products,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_encodes_category() {
        assert_eq!(listing_url(None), "/products");
        assert_eq!(listing_url(Some("kitchen")), "/products?category=kitchen");
        assert_eq!(
            listing_url(Some("home & garden")),
            "/products?category=home+%26+garden"
        );
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("min_price", None).unwrap(), None);
        assert_eq!(parse_price("min_price", Some(" ")).unwrap(), None);
        assert_eq!(
            parse_price("min_price", Some("12.5")).unwrap(),
            Some(Decimal::new(125, 1))
        );
        assert!(matches!(
            parse_price("max_price", Some("cheap")),
            Err(AppError::BadRequest(_))
        ));
        assert!(parse_price("max_price", Some("-3")).is_err());
    }

    #[test]
    fn test_query_to_filter() {
        let query = ListingQuery {
            category: Some("electronics".to_string()),
            min_price: Some("10".to_string()),
            max_price: None,
            q: Some(String::new()),
        };
        let filter = query.to_filter().unwrap();
        assert_eq!(filter.category(), Some("electronics"));
        assert_eq!(filter.min_price(), Some(Decimal::new(10, 0)));
        assert_eq!(filter.search(), None);
    }
}
