//! Checkout gate.
//!
//! Checkout is refused for an empty cart, sends guests to the login page
//! (remembering where they were), and otherwise hands over to the payment
//! step, which is out of scope for the widget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tranquil_trails_core::{CartState, LoginState};
use url::form_urlencoded;

use crate::config::StorageKeys;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Shown when checkout is attempted with nothing in the cart.
pub const EMPTY_CART_MESSAGE: &str = "Your bag is empty!";

/// Shown before a guest is sent to the login page.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to complete your purchase.";

/// Shown when a signed-in shopper proceeds.
pub const PROCEED_MESSAGE: &str = "Proceeding to payment...";

/// What a checkout request should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutDecision {
    /// Refuse with a blocking message; nothing else happens.
    Blocked { message: &'static str },
    /// Send the shopper to the login page.
    RedirectToLogin { url: String },
    /// Continue to payment.
    ProceedToPayment,
}

/// Decide what checkout should do.
///
/// `return_to` is where the shopper should land after signing in.
#[must_use]
pub fn evaluate(
    cart: &CartState,
    login: LoginState,
    login_path: &str,
    return_to: &str,
) -> CheckoutDecision {
    if cart.is_empty() {
        return CheckoutDecision::Blocked {
            message: EMPTY_CART_MESSAGE,
        };
    }
    if !login.is_logged_in() {
        return CheckoutDecision::RedirectToLogin {
            url: login_url(login_path, return_to),
        };
    }
    CheckoutDecision::ProceedToPayment
}

/// The login URL with the post-login destination as a `next` parameter.
#[must_use]
pub fn login_url(login_path: &str, return_to: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", return_to)
        .finish();
    let separator = if login_path.contains('?') { '&' } else { '?' };
    format!("{login_path}{separator}{query}")
}

/// A checkout interrupted by the login redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCheckout {
    /// Page to return to once signed in.
    pub return_to: String,
    /// When the redirect happened.
    pub recorded_at: DateTime<Utc>,
}

impl PendingCheckout {
    /// Record a pending checkout at the current time.
    #[must_use]
    pub fn new(return_to: impl Into<String>) -> Self {
        Self {
            return_to: return_to.into(),
            recorded_at: Utc::now(),
        }
    }

    /// Store this entry, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be serialized or written.
    pub fn save<S: KeyValueStore>(&self, store: &mut S, keys: &StorageKeys) -> Result<()> {
        let json = serde_json::to_string(self)?;
        store.set_item(&keys.pending_checkout, &json)?;
        Ok(())
    }

    /// Remove and return the stored entry, if any.
    ///
    /// An unreadable entry is discarded and reported as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or written.
    pub fn take<S: KeyValueStore>(store: &mut S, keys: &StorageKeys) -> Result<Option<Self>> {
        let Some(raw) = store.get_item(&keys.pending_checkout)? else {
            return Ok(None);
        };
        store.remove_item(&keys.pending_checkout)?;
        match serde_json::from_str(&raw) {
            Ok(pending) => Ok(Some(pending)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed pending checkout");
                Ok(None)
            }
        }
    }
}
