//! Catalog Browser
//!
//! Terminal client for a remote product catalog.
//!
//! ## Features
//! - One-shot catalog fetch with advisory cancellation
//! - Category filter and price sort over the loaded catalog
//! - In-memory shopping cart
//! - Plain-text view driven by line commands

pub mod config;
pub mod domain;
pub mod loader;
pub mod state;
pub mod view;

use thiserror::Error;

pub use domain::aggregates::{category_set, visible_products, Cart, Product, Rating};
pub use domain::events::Intent;
pub use domain::value_objects::{CategoryFilter, Price, ProductId, SortOrder};
pub use loader::{CatalogLoader, CatalogSource, HttpCatalogSource, LoadOutcome};
pub use state::{AppState, LoadStatus};

/// Catalog endpoint used when `CATALOG_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com/products";

// =============================================================================
// Error Types
// =============================================================================

/// The one failure the browser knows about: the catalog could not be loaded.
/// Its `Display` text is what the view shows in place of the product grid.
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("failed to fetch catalog: HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to fetch catalog: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed catalog response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An intent the current view state cannot honour
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error("no visible product with id {0}")]
    ProductNotVisible(ProductId),

    /// Guards free-text `category` commands; a selector offering only the
    /// category set never produces it.
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, CatalogLoadError>;
