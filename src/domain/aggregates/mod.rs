//! Aggregates module
pub mod product;
pub mod cart;
pub mod catalog;

pub use product::{Product, Rating};
pub use cart::Cart;
pub use catalog::{category_set, visible_products};
