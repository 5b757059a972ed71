//! Predicate filter over catalog products.

use std::sync::Arc;

use rust_decimal::Decimal;

use cornershop_core::Product;

/// Category, price-range and text filter for the product listing.
///
/// Constraints combine with AND. The text search matches name OR description,
/// case-insensitively. Unset constraints match everything, and blank strings
/// count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    category: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    search: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = non_blank(category);
        self
    }

    /// Inclusive price bounds.
    #[must_use]
    pub const fn with_price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = non_blank(search);
        self
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub const fn min_price(&self) -> Option<Decimal> {
        self.min_price
    }

    #[must_use]
    pub const fn max_price(&self) -> Option<Decimal> {
        self.max_price
    }

    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Select `category`, or deselect it if it is already the active one.
    pub fn toggle_category(&mut self, category: &str) {
        if self.category.as_deref() == Some(category) {
            self.category = None;
        } else {
            self.category = non_blank(Some(category.to_string()));
        }
    }

    /// Drop every constraint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any constraint narrows the listing.
    ///
    /// Price bounds that cover `0..=catalog_max` do not count.
    #[must_use]
    pub fn is_active(&self, catalog_max: Decimal) -> bool {
        self.category.is_some()
            || self.search.is_some()
            || self.min_price.is_some_and(|min| min > Decimal::ZERO)
            || self.max_price.is_some_and(|max| max < catalog_max)
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let price = product.price.amount;

        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
            && self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
            && self
                .search
                .as_deref()
                .is_none_or(|term| product.mentions(&term.to_lowercase()))
    }

    /// Products that pass the filter, in their original order.
    pub fn apply<'a, I>(&self, products: I) -> Vec<Arc<Product>>
    where
        I: IntoIterator<Item = &'a Arc<Product>>,
    {
        products
            .into_iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn names(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn dollars(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let catalog = Catalog::seeded();
        let filter = ProductFilter::new();
        assert_eq!(filter.apply(catalog.products()).len(), catalog.len());
        assert!(!filter.is_active(catalog.max_price()));
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::seeded();
        let filter = ProductFilter::new().with_category(Some("kitchen".to_string()));
        assert_eq!(
            names(&filter.apply(catalog.products())),
            vec!["Bamboo Cutting Board Set"]
        );
    }

    #[test]
    fn test_blank_category_is_ignored() {
        let filter = ProductFilter::new().with_category(Some("  ".to_string()));
        assert_eq!(filter.category(), None);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = Catalog::seeded();
        let filter = ProductFilter::new()
            .with_price_range(Some(Decimal::new(2499, 2)), Some(Decimal::new(4299, 2)));
        assert_eq!(
            names(&filter.apply(catalog.products())),
            vec![
                "Stainless Steel Water Bottle",
                "Wireless Charging Pad",
                "Bamboo Cutting Board Set"
            ]
        );
    }

    #[test]
    fn test_search_matches_name_or_description_case_insensitive() {
        let catalog = Catalog::seeded();

        let by_name = ProductFilter::new().with_search(Some("YOGA".to_string()));
        assert_eq!(names(&by_name.apply(catalog.products())), vec!["Premium Yoga Mat"]);

        let by_description = ProductFilter::new().with_search(Some("lumbar".to_string()));
        assert_eq!(
            names(&by_description.apply(catalog.products())),
            vec!["Ergonomic Office Chair"]
        );
    }

    #[test]
    fn test_constraints_combine_with_and() {
        let catalog = Catalog::seeded();
        let filter = ProductFilter::new()
            .with_category(Some("electronics".to_string()))
            .with_price_range(None, Some(dollars(90)))
            .with_search(Some("wireless".to_string()));

        assert_eq!(
            names(&filter.apply(catalog.products())),
            vec!["Wireless Charging Pad"]
        );
        assert!(filter.is_active(catalog.max_price()));
    }

    #[test]
    fn test_toggle_category() {
        let mut filter = ProductFilter::new();
        filter.toggle_category("fitness");
        assert_eq!(filter.category(), Some("fitness"));

        filter.toggle_category("kitchen");
        assert_eq!(filter.category(), Some("kitchen"));

        filter.toggle_category("kitchen");
        assert_eq!(filter.category(), None);
    }

    #[test]
    fn test_full_price_range_is_not_active() {
        let catalog = Catalog::seeded();
        let mut filter =
            ProductFilter::new().with_price_range(Some(Decimal::ZERO), Some(catalog.max_price()));
        assert!(!filter.is_active(catalog.max_price()));

        filter = filter.with_search(Some("mat".to_string()));
        assert!(filter.is_active(catalog.max_price()));

        filter.clear();
        assert_eq!(filter, ProductFilter::default());
    }
}
