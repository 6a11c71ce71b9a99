use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ProductId, ValueObject};

/// Customer rating summary attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score in `[0, 5]`.
    pub rate: f64,
    /// Number of submitted ratings.
    pub count: u64,
}

impl ValueObject for Rating {}

impl Rating {
    pub const MAX_RATE: f64 = 5.0;

    pub fn new(rate: f64, count: u64) -> Self {
        Self { rate, count }
    }
}

/// A catalog entry as served by the remote catalog (read-only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    /// URL of the display image. Never dereferenced here.
    pub image: String,
    pub rating: Rating,
}

impl Product {
    /// Check the per-product invariants (price and rating bounds).
    pub fn validate(&self) -> DomainResult<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(format!(
                "product {}: price must be a non-negative number, got {}",
                self.id, self.price
            )));
        }

        let rate = self.rating.rate;
        if !rate.is_finite() || !(0.0..=Rating::MAX_RATE).contains(&rate) {
            return Err(DomainError::validation(format!(
                "product {}: rating must be within [0, 5], got {}",
                self.id, rate
            )));
        }

        Ok(())
    }
}

/// The full product list from one successful fetch.
///
/// Immutable once built. Cloning shares the same allocation, so derived views
/// always point at the elements that were fetched.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog, enforcing per-product invariants and id uniqueness.
    ///
    /// Response order is preserved.
    pub fn new(mut products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &mut products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(DomainError::duplicate(format!("product id {}", product.id)));
            }
            // Adding +0.0 folds -0.0 into 0.0 and leaves every other value alone.
            product.price += 0.0;
            product.rating.rate += 0.0;
        }

        Ok(Self {
            products: products.into(),
        })
    }

    pub fn empty() -> Self {
        Self {
            products: Arc::from(Vec::new()),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Products paired with their position, for building index-based views.
    pub fn entries(&self) -> Vec<CatalogEntry<'_>> {
        self.products
            .iter()
            .enumerate()
            .map(|(index, product)| CatalogEntry { index, product })
            .collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Whether two handles share the same underlying list.
    pub fn ptr_eq(&self, other: &Catalog) -> bool {
        Arc::ptr_eq(&self.products, &other.products)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

/// A product together with its position in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry<'a> {
    pub index: usize,
    pub product: &'a Product,
}

impl std::borrow::Borrow<Product> for CatalogEntry<'_> {
    fn borrow(&self) -> &Product {
        self.product
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn product(id: u64, title: &str, price: f64, category: &str, rate: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price,
            category: category.to_string(),
            description: format!("{title} description"),
            image: format!("https://example.test/img/{id}.jpg"),
            rating: Rating::new(rate, 10),
        }
    }

    /// The two-product list used throughout the pipeline tests.
    pub fn pair() -> Vec<Product> {
        vec![
            product(1, "B", 10.0, "x", 4.5),
            product(2, "A", 5.0, "y", 2.0),
        ]
    }

    pub fn ids<P: std::borrow::Borrow<Product>>(products: &[P]) -> Vec<u64> {
        products.iter().map(|p| p.borrow().id.get()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn decodes_catalog_payload() {
        let payload = r#"[{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }]"#;

        let products: Vec<Product> = serde_json::from_str(payload).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].rating, Rating::new(3.9, 120));

        let catalog = Catalog::new(products).unwrap();
        assert_eq!(catalog.categories(), vec!["men's clothing"]);
    }

    #[test]
    fn catalog_preserves_response_order() {
        let catalog = Catalog::new(vec![
            product(3, "c", 1.0, "x", 1.0),
            product(1, "a", 1.0, "x", 1.0),
            product(2, "b", 1.0, "x", 1.0),
        ])
        .unwrap();

        assert_eq!(ids(catalog.products()), vec![3, 1, 2]);
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let err = Catalog::new(vec![
            product(1, "a", 1.0, "x", 1.0),
            product(1, "b", 2.0, "y", 2.0),
        ])
        .unwrap_err();

        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[test]
    fn catalog_rejects_negative_price() {
        let err = Catalog::new(vec![product(1, "a", -0.01, "x", 1.0)]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("price")));
    }

    #[test]
    fn catalog_rejects_out_of_range_rating() {
        let err = Catalog::new(vec![product(1, "a", 1.0, "x", 5.1)]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("rating")));

        let err = Catalog::new(vec![product(2, "b", 1.0, "x", f64::NAN)]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn zero_price_and_bounds_are_valid() {
        let catalog = Catalog::new(vec![
            product(1, "free", 0.0, "x", 0.0),
            product(2, "top", 1.0, "x", 5.0),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn negative_zero_amounts_are_stored_as_zero() {
        let catalog = Catalog::new(vec![product(1, "free", -0.0, "x", -0.0)]).unwrap();
        let stored = &catalog.products()[0];
        assert!(stored.price.is_sign_positive());
        assert!(stored.rating.rate.is_sign_positive());
        assert_eq!(stored.price.to_string(), "0");
    }

    #[test]
    fn clones_share_storage() {
        let catalog = Catalog::new(pair()).unwrap();
        let other = catalog.clone();
        assert!(catalog.ptr_eq(&other));
        assert!(!catalog.ptr_eq(&Catalog::new(pair()).unwrap()));
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let catalog = Catalog::new(vec![
            product(1, "a", 1.0, "jewelery", 1.0),
            product(2, "b", 1.0, "electronics", 1.0),
            product(3, "c", 1.0, "jewelery", 1.0),
        ])
        .unwrap();

        assert_eq!(catalog.categories(), vec!["jewelery", "electronics"]);
    }

    #[test]
    fn entries_carry_catalog_positions() {
        let catalog = Catalog::new(pair()).unwrap();
        let entries = catalog.entries();
        assert_eq!(entries[1].index, 1);
        assert_eq!(entries[1].product.title, "A");
    }
}
