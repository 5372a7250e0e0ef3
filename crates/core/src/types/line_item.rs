//! A single product entry in the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ItemId, Price};

/// One product entry in the cart with its quantity.
///
/// Field names match the persisted JSON layout
/// (`{"id","name","price","image","quantity"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier within the cart.
    pub id: ItemId,
    /// Product display name.
    pub name: String,
    /// Unit price captured when the item was first added.
    pub price: Price,
    /// Image path or URL.
    pub image: String,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with quantity 1.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}
