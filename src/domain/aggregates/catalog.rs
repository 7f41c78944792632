//! Filter/sort over a loaded catalog
//!
//! Both functions are pure: callers re-invoke them whenever the product list,
//! the selected category or the sort order changes.

use crate::domain::aggregates::Product;
use crate::domain::value_objects::{CategoryFilter, SortOrder, ALL_CATEGORIES};

/// Distinct categories in first-occurrence order, with the `all` sentinel first.
pub fn category_set(products: &[Product]) -> Vec<CategoryFilter> {
    let mut set = vec![CategoryFilter::All];
    for p in products {
        if p.category() == ALL_CATEGORIES { continue; }
        if !set.iter().any(|c| c.label() == p.category()) {
            set.push(CategoryFilter::Named(p.category().to_string()));
        }
    }
    set
}

/// Products matching `category`, ordered by price. Equal prices keep their
/// catalog order.
pub fn visible_products(products: &[Product], category: &CategoryFilter, sort: SortOrder) -> Vec<Product> {
    let mut visible: Vec<Product> = products.iter().filter(|p| category.matches(p.category())).cloned().collect();
    // sort_by is stable
    match sort {
        SortOrder::Ascending => visible.sort_by(|a, b| a.price().cmp(&b.price())),
        SortOrder::Descending => visible.sort_by(|a, b| b.price().cmp(&a.price())),
    }
    visible
}
