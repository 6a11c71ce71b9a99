//! View state: selections, the fetched catalog, and derived views.
//!
//! Every update replaces one input and synchronously recomputes the whole
//! view from the catalog. The resulting snapshot is published on a bus so
//! renderers can redraw without polling.

use std::sync::Arc;

use chrono::Utc;

use storefront_events::{EventBus, InMemoryEventBus, Subscription};
use storefront_products::input::{parse_category, parse_price, parse_rating_bucket, parse_sort_key};
use storefront_products::{Catalog, FilterCriteria, Product, SortKey, filter_products, sort_products};

use crate::fetcher::{CatalogSource, FetchError};
use crate::status::FetchStatus;

/// Immutable snapshot of everything a renderer needs.
///
/// `filtered` and `sorted` hold positions into `catalog`; the products
/// themselves are shared, never copied.
#[derive(Debug, Clone)]
pub struct CatalogView {
    revision: u64,
    status: FetchStatus,
    catalog: Catalog,
    criteria: FilterCriteria,
    sort_key: Option<SortKey>,
    filtered: Vec<usize>,
    sorted: Vec<usize>,
}

impl CatalogView {
    fn compute(
        revision: u64,
        status: FetchStatus,
        catalog: Catalog,
        criteria: FilterCriteria,
        sort_key: Option<SortKey>,
    ) -> Self {
        let (filtered, sorted) = {
            let entries = catalog.entries();
            let filtered = filter_products(&entries, &criteria);
            let sorted = sort_products(&filtered, sort_key);
            (
                filtered.iter().map(|e| e.index).collect(),
                sorted.iter().map(|e| e.index).collect(),
            )
        };

        Self {
            revision,
            status,
            catalog,
            criteria,
            sort_key,
            filtered,
            sorted,
        }
    }

    /// Monotonic counter, bumped on every recomputation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// The full, unfiltered catalog in response order.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    /// Products matching the criteria, in catalog order.
    pub fn filtered(&self) -> impl Iterator<Item = &Product> + '_ {
        self.filtered.iter().filter_map(|&i| self.catalog.get(i))
    }

    /// The filtered products ordered by the sort key.
    pub fn sorted(&self) -> impl Iterator<Item = &Product> + '_ {
        self.sorted.iter().filter_map(|&i| self.catalog.get(i))
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn sorted_len(&self) -> usize {
        self.sorted.len()
    }
}

/// Owner of the authoritative view state.
#[derive(Debug)]
pub struct ViewController {
    status: FetchStatus,
    catalog: Catalog,
    criteria: FilterCriteria,
    sort_key: Option<SortKey>,
    view: Arc<CatalogView>,
    bus: InMemoryEventBus<Arc<CatalogView>>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    /// Empty catalog, pending fetch, no filters, title A-Z.
    pub fn new() -> Self {
        let status = FetchStatus::Pending;
        let catalog = Catalog::empty();
        let criteria = FilterCriteria::unset();
        let sort_key = Some(SortKey::default());
        let view = Arc::new(CatalogView::compute(
            0,
            status.clone(),
            catalog.clone(),
            criteria.clone(),
            sort_key,
        ));

        Self {
            status,
            catalog,
            criteria,
            sort_key,
            view,
            bus: InMemoryEventBus::new(),
        }
    }

    /// Receive snapshots produced from now on.
    ///
    /// A subscriber that never reads keeps only the newest
    /// [`storefront_events::DEFAULT_BACKLOG`] of them.
    pub fn subscribe(&self) -> Subscription<Arc<CatalogView>> {
        self.bus.subscribe()
    }

    /// The current snapshot.
    pub fn view(&self) -> Arc<CatalogView> {
        Arc::clone(&self.view)
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn set_max_price(&mut self, max_price: Option<f64>) {
        self.criteria.max_price = max_price;
        self.recompute();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.criteria.category = category;
        self.recompute();
    }

    pub fn set_min_rating(&mut self, min_rating: Option<f64>) {
        self.criteria.min_rating = min_rating;
        self.recompute();
    }

    /// `None` keeps catalog order (an unrecognized selection).
    pub fn set_sort_key(&mut self, sort_key: Option<SortKey>) {
        self.sort_key = sort_key;
        self.recompute();
    }

    /// Raw value of the price input.
    pub fn price_input(&mut self, raw: &str) {
        let value = parse_price(raw);
        if value.is_none() && !raw.trim().is_empty() {
            tracing::debug!(raw, "price filter is not a finite number, clearing it");
        }
        self.set_max_price(value);
    }

    /// Raw value of the category select.
    pub fn category_input(&mut self, raw: &str) {
        self.set_category(parse_category(raw));
    }

    /// Raw value of the rating bucket select.
    pub fn rating_input(&mut self, raw: &str) {
        let value = parse_rating_bucket(raw);
        if value.is_none() && !raw.is_empty() {
            tracing::debug!(raw, "rating bucket has no lower bound; not filtering on rating");
        }
        self.set_min_rating(value);
    }

    /// Raw value of the sort select.
    pub fn sort_input(&mut self, raw: &str) {
        let key = parse_sort_key(raw);
        if key.is_none() {
            tracing::debug!(raw, "unrecognized sort key; keeping catalog order");
        }
        self.set_sort_key(key);
    }

    /// Install a freshly fetched catalog. Clears all filter criteria.
    pub fn catalog_loaded(&mut self, catalog: Catalog) {
        self.status = FetchStatus::Loaded {
            fetched_at: Utc::now(),
        };
        self.catalog = catalog;
        self.criteria = FilterCriteria::unset();
        self.recompute();
    }

    /// Record a failed fetch. The catalog keeps its last good contents.
    pub fn catalog_failed(&mut self, error: &FetchError) {
        tracing::warn!(error = %error, "catalog fetch failed");
        self.status = FetchStatus::Failed {
            reason: error.to_string(),
        };
        self.recompute();
    }

    /// Apply the outcome of a fetch.
    pub fn apply_fetch(&mut self, outcome: Result<Catalog, FetchError>) {
        match outcome {
            Ok(catalog) => self.catalog_loaded(catalog),
            Err(error) => self.catalog_failed(&error),
        }
    }

    fn recompute(&mut self) {
        let view = Arc::new(CatalogView::compute(
            self.view.revision() + 1,
            self.status.clone(),
            self.catalog.clone(),
            self.criteria.clone(),
            self.sort_key,
        ));

        tracing::debug!(
            revision = view.revision(),
            catalog = view.catalog().len(),
            filtered = view.filtered_len(),
            sort = ?view.sort_key(),
            "view recomputed"
        );

        self.view = Arc::clone(&view);
        if let Err(err) = self.bus.publish(view) {
            tracing::error!(?err, "failed to publish view update");
        }
    }
}

/// A product listing bound to its catalog source.
///
/// The source is read exactly once, by the first `initialize` call.
#[derive(Debug)]
pub struct ProductListView<S> {
    source: S,
    controller: ViewController,
    initialized: bool,
}

impl<S: CatalogSource> ProductListView<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            controller: ViewController::new(),
            initialized: false,
        }
    }

    /// Fetch the catalog and record the outcome. Later calls do nothing.
    pub async fn initialize(&mut self) {
        if self.initialized {
            tracing::debug!(origin = self.source.origin(), "catalog already fetched; skipping");
            return;
        }
        self.initialized = true;

        let outcome = self.source.fetch().await;
        self.controller.apply_fetch(outcome);
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ViewController {
        &mut self.controller
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> Arc<CatalogView> {
        self.controller.view()
    }
}
