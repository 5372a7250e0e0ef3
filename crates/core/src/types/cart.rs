//! The cart collection and its state transitions.
//!
//! `CartState` keeps line items in insertion order and guarantees that ids are
//! unique and every stored quantity is at least 1. All transitions are pure;
//! persistence and rendering live in the widget crate.

use rust_decimal::Decimal;

use super::{ItemId, LineItem};

/// Result of adding an item to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1.
    Inserted,
    /// An existing line item's quantity was bumped.
    Incremented { quantity: u32 },
}

/// Result of a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Quantity went up.
    Incremented { quantity: u32 },
    /// Quantity went down and the item is still in the cart.
    Decremented { quantity: u32 },
    /// Quantity would have reached zero, so the item was removed.
    Removed,
    /// No item with that id is in the cart.
    NotFound,
}

impl QuantityChange {
    /// Whether the cart changed.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Counts of repairs made while normalizing stored items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Repairs {
    /// Entries dropped for a zero quantity or empty fields.
    pub dropped: usize,
    /// Entries folded into an earlier entry with the same id.
    pub merged: usize,
}

impl Repairs {
    /// Whether any repair happened.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.dropped > 0 || self.merged > 0
    }
}

/// Ordered, id-keyed collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored items, restoring the invariants.
    ///
    /// Items with a zero quantity or an empty name/image are dropped; a
    /// repeated id is merged into its first occurrence by summing quantities.
    #[must_use]
    pub fn from_stored(stored: impl IntoIterator<Item = LineItem>) -> (Self, Repairs) {
        let mut cart = Self::new();
        let mut repairs = Repairs::default();

        for item in stored {
            if item.quantity == 0 || item.name.trim().is_empty() || item.image.trim().is_empty() {
                repairs.dropped += 1;
                continue;
            }
            if let Some(existing) = cart.get_mut(&item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                repairs.merged += 1;
                continue;
            }
            cart.items.push(item);
        }

        (cart, repairs)
    }

    /// Line items in cart order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn get_mut(&mut self, id: &ItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of unit price times quantity over all items, saturating at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, |total, line| {
                total.checked_add(line).unwrap_or(Decimal::MAX)
            })
    }

    /// Add an item: bump the quantity of a matching id by one, or append the
    /// item with quantity 1.
    ///
    /// The stored unit price of an existing item is kept as is.
    pub fn add(&mut self, item: LineItem) -> AddOutcome {
        if let Some(existing) = self.get_mut(&item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: existing.quantity,
            };
        }
        self.items.push(LineItem { quantity: 1, ..item });
        AddOutcome::Inserted
    }

    /// Increase an item's quantity by one.
    pub fn increment(&mut self, id: &ItemId) -> QuantityChange {
        match self.get_mut(id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                QuantityChange::Incremented {
                    quantity: item.quantity,
                }
            }
            None => QuantityChange::NotFound,
        }
    }

    /// Decrease an item's quantity by one, removing it instead of storing zero.
    pub fn decrement(&mut self, id: &ItemId) -> QuantityChange {
        let Some(position) = self.items.iter().position(|item| &item.id == id) else {
            return QuantityChange::NotFound;
        };
        match self.items.get_mut(position) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                QuantityChange::Decremented {
                    quantity: item.quantity,
                }
            }
            _ => {
                self.items.remove(position);
                QuantityChange::Removed
            }
        }
    }

    /// Remove an item, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<LineItem> {
        let position = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(position))
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
