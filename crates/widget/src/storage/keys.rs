//! Storage key resolution.

use tranquil_trails_core::UserIdentity;

use super::KeyValueStore;
use crate::config::StorageKeys;

/// The key the cart lives under.
///
/// With identity scoping enabled and someone signed in, the base key gets a
/// `:<identity>` suffix so two identities on one browser never share a cart.
/// Guests always use the base key.
#[must_use]
pub fn resolve_cart_key(keys: &StorageKeys, identity: Option<&UserIdentity>) -> String {
    match identity {
        Some(identity) if keys.scope_by_identity => format!("{}:{identity}", keys.cart),
        _ => keys.cart.clone(),
    }
}

/// Read the signed-in identity, treating unreadable or blank values as absent.
pub fn read_identity<S: KeyValueStore>(store: &S, keys: &StorageKeys) -> Option<UserIdentity> {
    match store.get_item(&keys.identity) {
        Ok(value) => value.and_then(|v| UserIdentity::parse(&v).ok()),
        Err(e) => {
            tracing::warn!(key = %keys.identity, error = %e, "Failed to read identity");
            None
        }
    }
}
