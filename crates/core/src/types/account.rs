//! Login state as recorded in client storage.
//!
//! The storefront's login page writes a single flag: the admin marker
//! `"true"` for staff, any other value for a signed-in shopper, and nothing
//! at all for a guest.

use serde::{Deserialize, Serialize};

/// The value written to the login flag for administrators.
pub const ADMIN_MARKER: &str = "true";

/// The value written to the login flag for regular shoppers.
pub const CUSTOMER_MARKER: &str = "false";

/// Who is using the page, as far as the client knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoginState {
    /// No login flag present.
    #[default]
    Guest,
    /// Logged in as a regular shopper.
    Customer,
    /// Logged in with the admin marker.
    Admin,
}

impl LoginState {
    /// Interpret a stored login flag.
    ///
    /// Presence alone means logged in; only the exact admin marker grants
    /// admin features.
    #[must_use]
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            None => Self::Guest,
            Some(ADMIN_MARKER) => Self::Admin,
            Some(_) => Self::Customer,
        }
    }

    /// The flag value to store for this state, or `None` for a guest.
    #[must_use]
    pub const fn flag(&self) -> Option<&'static str> {
        match self {
            Self::Guest => None,
            Self::Customer => Some(CUSTOMER_MARKER),
            Self::Admin => Some(ADMIN_MARKER),
        }
    }

    /// Whether any login flag is present.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        !matches!(self, Self::Guest)
    }

    /// Whether admin-only UI should be revealed.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for LoginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}
