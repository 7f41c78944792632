//! User intents emitted by the view
use crate::domain::value_objects::{CategoryFilter, ProductId, SortOrder};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    SelectCategory(CategoryFilter),
    SelectSort(SortOrder),
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
}
