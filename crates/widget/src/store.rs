//! The cart store: in-memory cart state mirrored to client storage.
//!
//! `CartStore` is the single source of truth for one page. It loads once,
//! applies every mutation to [`CartState`], and writes the whole cart back
//! under its key after each change that actually modified something.
//!
//! Stored data is never trusted. [`decode_cart`] accepts the current array
//! layout as well as the older layouts the storefront scripts wrote, repairs
//! what it can, and anything unreadable loads as an empty cart.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;
use tranquil_trails_core::{
    AddOutcome, AddRejection, CartState, ItemId, LineItem, Price, ProductInput, QuantityChange,
};

use crate::error::Result;
use crate::storage::KeyValueStore;

/// A stored entry, in any of the layouts ever written.
#[derive(Debug, Deserialize)]
struct StoredLine {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default, alias = "img")]
    image: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Top-level stored layout: an ordered array, or an object keyed by id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCart {
    List(Vec<StoredLine>),
    Keyed(IndexMap<String, StoredLine>),
}

/// Decode a stored cart.
///
/// Prices are rounded to cents. Entries whose id cannot be resolved or whose
/// price is not a valid [`Price`] are dropped; the rest go through
/// [`CartState::from_stored`].
///
/// # Errors
///
/// Returns an error if `raw` is not JSON in one of the known layouts.
pub fn decode_cart(raw: &str) -> std::result::Result<CartState, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(CartState::new());
    }

    let stored: StoredCart = serde_json::from_str(raw)?;
    let entries: Vec<(Option<String>, StoredLine)> = match stored {
        StoredCart::List(lines) => lines.into_iter().map(|line| (None, line)).collect(),
        StoredCart::Keyed(map) => map.into_iter().map(|(key, line)| (Some(key), line)).collect(),
    };

    let mut unusable = 0usize;
    let mut items = Vec::with_capacity(entries.len());
    for (key, line) in entries {
        let Ok(price) = Price::new(line.price) else {
            unusable += 1;
            continue;
        };
        let id = line
            .id
            .as_deref()
            .or(key.as_deref())
            .map_or_else(|| ItemId::from_display_name(&line.name), ItemId::parse);
        let Ok(id) = id else {
            unusable += 1;
            continue;
        };
        items.push(LineItem {
            id,
            name: line.name.trim().to_string(),
            price,
            image: line.image,
            quantity: line.quantity,
        });
    }

    let (state, repairs) = CartState::from_stored(items);
    if unusable > 0 || repairs.any() {
        tracing::warn!(
            dropped = unusable + repairs.dropped,
            merged = repairs.merged,
            "Repaired stored cart"
        );
    }
    Ok(state)
}

/// Encode a cart in the current stored layout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_cart(state: &CartState) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string(state.items())
}

/// Read the cart under `key`, falling back to an empty cart.
fn read_cart<S: KeyValueStore>(storage: &S, key: &str) -> CartState {
    match storage.get_item(key) {
        Ok(None) => CartState::new(),
        Ok(Some(raw)) => decode_cart(&raw).unwrap_or_else(|e| {
            tracing::error!(key, error = %e, "Stored cart is corrupt, starting empty");
            CartState::new()
        }),
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to read stored cart, starting empty");
            CartState::new()
        }
    }
}

/// Cart state bound to a storage backend and key.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    state: CartState,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart stored under `key`.
    ///
    /// Missing, unreadable or malformed data yields an empty cart.
    #[instrument(skip(storage))]
    pub fn load(storage: S, key: &str) -> Self {
        let state = read_cart(&storage, key);
        tracing::debug!(items = state.len(), "Loaded cart");
        Self {
            storage,
            key: key.to_string(),
            state,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns the [`AddRejection`] when the product fields are incomplete or
    /// the price is invalid. The cart is left untouched in that case.
    #[instrument(skip(self))]
    pub fn add(&mut self, input: &ProductInput) -> std::result::Result<AddOutcome, AddRejection> {
        let item = input.validate()?;
        let id = item.id.clone();
        let outcome = self.state.add(item);
        tracing::info!(%id, ?outcome, "Added to cart");
        self.persist_or_log();
        Ok(outcome)
    }

    /// Increase an item's quantity by one. Absent ids are a no-op.
    #[instrument(skip(self))]
    pub fn increment(&mut self, id: &ItemId) -> QuantityChange {
        let change = self.state.increment(id);
        self.after_change(change)
    }

    /// Decrease an item's quantity by one, removing it at zero.
    #[instrument(skip(self))]
    pub fn decrement(&mut self, id: &ItemId) -> QuantityChange {
        let change = self.state.decrement(id);
        self.after_change(change)
    }

    /// Remove an item entirely.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &ItemId) -> Option<LineItem> {
        let removed = self.state.remove(id);
        if removed.is_some() {
            self.persist_or_log();
        }
        removed
    }

    /// Empty the cart. Returns how many line items were removed.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> usize {
        let count = self.state.len();
        self.state.clear();
        self.persist_or_log();
        count
    }

    /// Write the whole cart under the current key.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized or written.
    pub fn persist(&mut self) -> Result<()> {
        let json = encode_cart(&self.state)?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }

    /// Point the store at a different key and load what is stored there.
    ///
    /// Used when a sign-in changes the identity the cart is scoped to.
    #[instrument(skip(self))]
    pub fn switch_key(&mut self, key: &str) {
        if self.key == key {
            return;
        }
        self.key = key.to_string();
        self.state = read_cart(&self.storage, key);
    }

    fn after_change(&mut self, change: QuantityChange) -> QuantityChange {
        if change.is_change() {
            self.persist_or_log();
        } else {
            tracing::debug!("No such item; nothing to change");
        }
        change
    }

    fn persist_or_log(&mut self) {
        if let Err(e) = self.persist() {
            tracing::error!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}
