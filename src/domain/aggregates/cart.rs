//! Cart Aggregate
//!
//! An ordered sequence of product snapshots. Adding the same product twice
//! yields two entries; removal drops every entry with the given id.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::aggregates::Product;
use crate::domain::value_objects::ProductId;

#[derive(Clone, Debug)]
pub struct Cart {
    id: Uuid,
    entries: Vec<Product>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4(), entries: vec![], created_at: now, updated_at: now }
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn entries(&self) -> &[Product] { &self.entries }
    pub fn size(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn contains(&self, id: ProductId) -> bool { self.entries.iter().any(|p| p.id() == id) }

    pub fn add(&mut self, product: Product) {
        self.entries.push(product);
        self.touch();
    }

    /// Removes all entries with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: ProductId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|p| p.id() != id);
        let removed = before - self.entries.len();
        if removed > 0 { self.touch(); }
        removed
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

impl Default for Cart { fn default() -> Self { Self::new() } }
