//! Products domain module.
//!
//! The catalog model and the pure filter/sort pipeline over it. Deterministic
//! logic only (no IO, no HTTP, no rendering).

pub mod filter;
pub mod input;
pub mod product;
pub mod sort;

pub use filter::{FilterCriteria, filter_products};
pub use product::{Catalog, CatalogEntry, Product, Rating};
pub use sort::{SortKey, compare_titles, sort_products};
