//! Application state for one mounted view.
//!
//! All view state lives in [`AppState`] and only changes through its named
//! operations. The derived category set and visible list are recomputed by
//! those operations whenever one of their inputs changes.

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::aggregates::{category_set, visible_products, Cart, Product};
use crate::domain::events::Intent;
use crate::domain::value_objects::{CategoryFilter, ProductId, SortOrder};
use crate::loader::LoadOutcome;
use crate::IntentError;

/// Catalog fetch lifecycle. `Loaded` and `Failed` are terminal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug)]
pub struct AppState {
    products: Vec<Product>,
    categories: Vec<CategoryFilter>,
    visible: Vec<Product>,
    category: CategoryFilter,
    sort: SortOrder,
    cart: Cart,
    status: LoadStatus,
    settled_at: Option<DateTime<Utc>>,
    liveness: CancellationToken,
}

impl AppState {
    /// State of a freshly mounted view: loading, nothing fetched yet.
    pub fn mount() -> Self {
        let cart = Cart::new();
        debug!(cart_id = %cart.id(), "view mounted");
        Self {
            products: vec![],
            categories: category_set(&[]),
            visible: vec![],
            category: CategoryFilter::All,
            sort: SortOrder::default(),
            cart,
            status: LoadStatus::Loading,
            settled_at: None,
            liveness: CancellationToken::new(),
        }
    }

    /// Token to hand to the fetch started for this mount.
    pub fn liveness(&self) -> CancellationToken { self.liveness.clone() }

    /// Tear the view down. Later fetch results are ignored.
    pub fn unmount(&self) {
        debug!(cart_id = %self.cart.id(), cart_created_at = %self.cart.created_at(), "view torn down");
        self.liveness.cancel();
    }

    pub fn is_mounted(&self) -> bool { !self.liveness.is_cancelled() }

    pub fn products(&self) -> &[Product] { &self.products }
    pub fn categories(&self) -> &[CategoryFilter] { &self.categories }
    pub fn visible(&self) -> &[Product] { &self.visible }
    pub fn category(&self) -> &CategoryFilter { &self.category }
    pub fn sort(&self) -> SortOrder { self.sort }
    pub fn cart(&self) -> &Cart { &self.cart }
    pub fn status(&self) -> &LoadStatus { &self.status }
    pub fn settled_at(&self) -> Option<DateTime<Utc>> { self.settled_at }
    pub fn is_loading(&self) -> bool { self.status == LoadStatus::Loading }

    /// Error message, empty unless the load failed.
    pub fn error(&self) -> &str {
        match &self.status { LoadStatus::Failed(message) => message, _ => "" }
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        debug!(%category, "category selected");
        self.category = category;
        self.refresh_visible();
    }

    pub fn select_sort(&mut self, sort: SortOrder) {
        debug!(%sort, "sort selected");
        self.sort = sort;
        self.refresh_visible();
    }

    pub fn add_to_cart(&mut self, product: Product) {
        let product_id = product.id();
        self.cart.add(product);
        debug!(%product_id, size = self.cart.size(), updated_at = %self.cart.updated_at(), "added to cart");
    }

    /// Removes every cart entry with `id`.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        let removed = self.cart.remove(id);
        debug!(product_id = %id, removed, updated_at = %self.cart.updated_at(), "removed from cart");
    }

    /// Apply the result of the catalog fetch. Returns whether anything changed:
    /// nothing is applied after unmount or once a terminal status is reached.
    pub fn load_settled(&mut self, outcome: LoadOutcome) -> bool {
        if !self.is_mounted() {
            debug!("load settled after unmount, ignoring");
            return false;
        }
        if !self.is_loading() {
            debug!(status = ?self.status, "load already settled, ignoring");
            return false;
        }

        match outcome {
            Ok(products) => {
                self.products = products;
                self.categories = category_set(&self.products);
                self.refresh_visible();
                self.status = LoadStatus::Loaded;
            }
            Err(error) => {
                self.status = LoadStatus::Failed(error.to_string());
            }
        }
        let settled_at = Utc::now();
        self.settled_at = Some(settled_at);
        info!(status = ?self.status, products = self.products.len(), %settled_at, "load settled");
        true
    }

    /// Apply a user intent from the view.
    ///
    /// # Errors
    ///
    /// Rejects adding a product that is not currently visible and selecting a
    /// category that is not in the category set.
    pub fn apply(&mut self, intent: Intent) -> Result<(), IntentError> {
        match intent {
            Intent::SelectCategory(category) => {
                if !self.categories.contains(&category) {
                    return Err(IntentError::UnknownCategory(category.label().to_string()));
                }
                self.select_category(category);
            }
            Intent::SelectSort(sort) => self.select_sort(sort),
            Intent::AddToCart(id) => {
                let product = self.visible.iter().find(|p| p.id() == id).cloned().ok_or(IntentError::ProductNotVisible(id))?;
                self.add_to_cart(product);
            }
            Intent::RemoveFromCart(id) => self.remove_from_cart(id),
        }
        Ok(())
    }

    fn refresh_visible(&mut self) {
        self.visible = visible_products(&self.products, &self.category, self.sort);
    }
}
