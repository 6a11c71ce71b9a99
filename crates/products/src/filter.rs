//! Filter pipeline: stable subsetting of a product list by active criteria.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

use crate::product::Product;

/// Active filter constraints. `None` means the dimension is not constrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub max_price: Option<f64>,
    pub category: Option<String>,
    pub min_rating: Option<f64>,
}

impl ValueObject for FilterCriteria {}

impl FilterCriteria {
    /// Criteria that keep every product.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_unset(&self) -> bool {
        self.max_price.is_none() && self.category.is_none() && self.min_rating.is_none()
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    /// Whether `product` satisfies every active constraint.
    pub fn matches(&self, product: &Product) -> bool {
        self.within_price(product) && self.in_category(product) && self.meets_rating(product)
    }

    fn within_price(&self, product: &Product) -> bool {
        self.max_price.is_none_or(|max| product.price <= max)
    }

    // Exact, case-sensitive.
    fn in_category(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
    }

    fn meets_rating(&self, product: &Product) -> bool {
        self.min_rating.is_none_or(|min| product.rating.rate >= min)
    }
}

/// Keep the products that satisfy `criteria`, preserving input order.
///
/// Works on owned products, references, or catalog entries alike; the input
/// slice is only read.
pub fn filter_products<T>(products: &[T], criteria: &FilterCriteria) -> Vec<T>
where
    T: Borrow<Product> + Clone,
{
    if criteria.is_unset() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|p| criteria.matches((*p).borrow()))
        .cloned()
        .collect()
}
