//! Sort pipeline: stable re-ordering of a product list by one key.
//!
//! Sorting always produces a new sequence. The source list is borrowed
//! immutably, so the catalog the filter reads from can never be reordered
//! underneath it.

use core::cmp::Ordering;
use core::str::FromStr;
use std::borrow::Borrow;

use feruca::{Collator, Locale, Tailoring};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, ValueObject};

use crate::product::Product;

/// Comparison field and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "title_asc")]
    TitleAscending,
    #[serde(rename = "title_desc")]
    TitleDescending,
    #[serde(rename = "price_asc")]
    PriceAscending,
    #[serde(rename = "price_desc")]
    PriceDescending,
    #[serde(rename = "rating_asc", alias = "rating-asc")]
    RatingAscending,
    #[serde(rename = "rating_desc")]
    RatingDescending,
}

impl ValueObject for SortKey {}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::TitleAscending,
        SortKey::TitleDescending,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
        SortKey::RatingAscending,
        SortKey::RatingDescending,
    ];

    /// Wire/control value of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::TitleAscending => "title_asc",
            SortKey::TitleDescending => "title_desc",
            SortKey::PriceAscending => "price_asc",
            SortKey::PriceDescending => "price_desc",
            SortKey::RatingAscending => "rating_asc",
            SortKey::RatingDescending => "rating_desc",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::TitleAscending => "Title (A-Z)",
            SortKey::TitleDescending => "Title (Z-A)",
            SortKey::PriceAscending => "Price (Low to High)",
            SortKey::PriceDescending => "Price (High to Low)",
            SortKey::RatingAscending => "Rating (Low to High)",
            SortKey::RatingDescending => "Rating (High to Low)",
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(
            self,
            SortKey::TitleDescending | SortKey::PriceDescending | SortKey::RatingDescending
        )
    }

    /// Compare two products under this key.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        self.compare_with(&mut title_collator(), a, b)
    }

    fn compare_with(&self, collator: &mut Collator, a: &Product, b: &Product) -> Ordering {
        let ascending = match self {
            SortKey::TitleAscending | SortKey::TitleDescending => {
                collator.collate(a.title.as_str(), b.title.as_str())
            }
            SortKey::PriceAscending | SortKey::PriceDescending => compare_amounts(a.price, b.price),
            SortKey::RatingAscending | SortKey::RatingDescending => {
                compare_amounts(a.rating.rate, b.rating.rate)
            }
        };

        if self.is_descending() {
            ascending.reverse()
        } else {
            ascending
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "title_asc" => Ok(SortKey::TitleAscending),
            "title_desc" => Ok(SortKey::TitleDescending),
            "price_asc" => Ok(SortKey::PriceAscending),
            "price_desc" => Ok(SortKey::PriceDescending),
            // The legacy select used a hyphen for this one option.
            "rating_asc" | "rating-asc" => Ok(SortKey::RatingAscending),
            "rating_desc" => Ok(SortKey::RatingDescending),
            other => Err(DomainError::validation(format!("unknown sort key: {other:?}"))),
        }
    }
}

/// CLDR root collator. Punctuation and spaces are not ignored.
fn title_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Locale-aware title ordering (Unicode Collation Algorithm, CLDR root).
///
/// Strings that collate equal are split by code point, so only identical
/// titles compare `Equal`.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    title_collator().collate(a, b)
}

/// `-0.0` and `0.0` are the same amount.
fn compare_amounts(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

/// Return a new, stably sorted sequence.
///
/// `None` stands for an unrecognized selection and yields the input order.
pub fn sort_products<T>(products: &[T], key: Option<SortKey>) -> Vec<T>
where
    T: Borrow<Product> + Clone,
{
    let mut sorted = products.to_vec();
    if let Some(key) = key {
        let mut collator = title_collator();
        // `sort_by` is stable: equal elements keep their input order.
        sorted.sort_by(|a, b| key.compare_with(&mut collator, a.borrow(), b.borrow()));
    }
    sorted
}
