//! `storefront-client`
//!
//! **Responsibility:** the product listing view.
//!
//! This crate provides:
//! - Configuration of the catalog endpoint
//! - A one-shot catalog fetcher over HTTP
//! - The view state controller (selections, recomputation, snapshot publishing)
//! - A plain-text renderer for the resulting views

pub mod config;
pub mod controller;
pub mod fetcher;
pub mod render;
pub mod status;

pub use config::ClientConfig;
pub use controller::{CatalogView, ProductListView, ViewController};
pub use fetcher::{CatalogSource, FetchError, HttpCatalogSource, StaticCatalogSource};
pub use render::TextRenderer;
pub use status::FetchStatus;
