//! Product Aggregate
//!
//! Products are read-only snapshots of what the remote catalog returned; the
//! browser never mutates them.

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{Price, ProductId};

/// Only the shape is checked: `image` is kept as the URI reference the API
/// sent, relative or absolute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    price: Price,
    category: String,
    image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rating: Option<Rating>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating { pub rate: f64, pub count: u32 }

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, price: Price, category: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id, title: title.into(), price, category: category.into(), image: image.into(),
            description: None, rating: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn id(&self) -> ProductId { self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn price(&self) -> Price { self.price }
    pub fn category(&self) -> &str { &self.category }
    pub fn image(&self) -> &str { &self.image }
    pub fn description(&self) -> &str { self.description.as_deref().unwrap_or_default() }
    pub fn rating(&self) -> Option<Rating> { self.rating }
}
