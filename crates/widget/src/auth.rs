//! Client-side login state.
//!
//! The login page records who signed in with a flag under the auth key and,
//! for cart scoping, the identity under the identity key. Nothing here
//! authenticates anyone; it only reflects what the page was told.

use tranquil_trails_core::{LoginState, UserIdentity};

use crate::config::StorageKeys;
use crate::error::Result;
use crate::host::{PageHost, classes, targets};
use crate::storage::KeyValueStore;

/// Shown after the logout control is used.
pub const LOGOUT_MESSAGE: &str = "You have been logged out.";

/// Read the login flag. Unreadable storage counts as a guest.
pub fn read_login_state<S: KeyValueStore>(store: &S, keys: &StorageKeys) -> LoginState {
    match store.get_item(&keys.auth) {
        Ok(flag) => LoginState::from_flag(flag.as_deref()),
        Err(e) => {
            tracing::warn!(key = %keys.auth, error = %e, "Failed to read login flag");
            LoginState::Guest
        }
    }
}

/// Record a sign-in.
///
/// # Errors
///
/// Returns an error if storage cannot be written.
pub fn login<S: KeyValueStore>(
    store: &mut S,
    keys: &StorageKeys,
    identity: &UserIdentity,
    admin: bool,
) -> Result<LoginState> {
    let state = if admin {
        LoginState::Admin
    } else {
        LoginState::Customer
    };
    if let Some(flag) = state.flag() {
        store.set_item(&keys.auth, flag)?;
    }
    store.set_item(&keys.identity, identity.as_str())?;
    tracing::info!(%identity, %state, "Signed in");
    Ok(state)
}

/// Forget the sign-in.
///
/// # Errors
///
/// Returns an error if storage cannot be written.
pub fn logout<S: KeyValueStore>(store: &mut S, keys: &StorageKeys) -> Result<()> {
    store.remove_item(&keys.auth)?;
    store.remove_item(&keys.identity)?;
    tracing::info!("Signed out");
    Ok(())
}

/// Adjust page chrome for the login state.
///
/// Signed-in shoppers get a logout control in place of the login link;
/// admins additionally see the product form and admin links.
pub fn apply_login_ui<H: PageHost>(host: &mut H, state: LoginState) {
    if !state.is_logged_in() {
        return;
    }
    host.set_text(targets::AUTH_BTN, "Logout");
    host.set_attr(targets::AUTH_BTN, "href", "#");
    host.set_class(targets::AUTH_BTN, classes::LOGOUT_MODE, true);

    if state.is_admin() {
        host.set_style(targets::ADMIN_FORM, "display", "flex");
        host.set_style_by_class(classes::ADMIN_LINK, "display", "block");
    }
}
