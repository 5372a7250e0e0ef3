//! Newtype string IDs for type-safe references.
//!
//! Use the `define_string_id!` macro to create ID wrappers that prevent
//! accidentally mixing an item identifier with a user identity.

use thiserror::Error;

/// Errors that can occur when constructing an ID.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input was empty or whitespace only.
    #[error("id cannot be empty")]
    Empty,
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()` that trims and rejects empty input, `as_str()`, `into_inner()`
/// - `Display`, `FromStr` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use tranquil_trails_core::define_string_id;
/// define_string_id!(SkuId);
/// define_string_id!(ShopperId);
///
/// let sku = SkuId::parse("sku1").unwrap();
/// let shopper = ShopperId::parse("sku1").unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: SkuId = shopper;
/// # let _ = (sku, shopper);
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an ID, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Empty` if nothing remains after trimming.
            pub fn parse(value: &str) -> ::core::result::Result<Self, $crate::types::id::IdError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::id::IdError::Empty);
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(ItemId);
define_string_id!(UserIdentity);

impl ItemId {
    /// Derive an item id from a product's display name.
    ///
    /// Used when a trigger carries no explicit `data-id`: the name is
    /// lowercased and every run of non-alphanumeric characters collapses to
    /// a single `-`, so `"Yoga Mat (Cork)"` becomes `"yoga-mat-cork"`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Empty`] if the name contains no alphanumerics.
    pub fn from_display_name(name: &str) -> Result<Self, IdError> {
        let mut slug = String::with_capacity(name.len());
        let mut pending_dash = false;
        for c in name.chars() {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_dash = true;
            }
        }
        Self::parse(&slug)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let id = ItemId::parse("  sku1 ").unwrap();
        assert_eq!(id.as_str(), "sku1");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ItemId::parse(""), Err(IdError::Empty));
        assert_eq!(UserIdentity::parse("   "), Err(IdError::Empty));
    }

    #[test]
    fn test_from_display_name() {
        let id = ItemId::from_display_name("Yoga Mat (Cork)").unwrap();
        assert_eq!(id.as_str(), "yoga-mat-cork");

        let id = ItemId::from_display_name("  --Trail  Boots--").unwrap();
        assert_eq!(id.as_str(), "trail-boots");
    }

    #[test]
    fn test_from_display_name_no_alphanumerics() {
        assert!(ItemId::from_display_name("***").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id = ItemId::parse("sku1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sku1\"");
        let parsed: ItemId = serde_json::from_str("\"sku1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
