//! Product fields as read from a trigger element.
//!
//! Product cards expose their fields as string attributes. Any of them may be
//! missing or malformed; [`ProductInput::validate`] turns them into a
//! [`LineItem`] or says why the add must be ignored.

use thiserror::Error;

use super::id::IdError;
use super::{ItemId, LineItem, Price, PriceError};

/// Why an add request was ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddRejection {
    /// No display name was supplied.
    #[error("product name is missing")]
    MissingName,
    /// No price was supplied.
    #[error("product price is missing")]
    MissingPrice,
    /// No image reference was supplied.
    #[error("product image is missing")]
    MissingImage,
    /// The price was present but not a positive number.
    #[error("invalid product price: {0}")]
    InvalidPrice(#[from] PriceError),
    /// Neither the explicit id nor the name produced a usable identifier.
    #[error("invalid product id: {0}")]
    InvalidId(#[from] IdError),
}

/// Raw product fields collected from element attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ProductInput {
    /// Convenience constructor with every field present.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            price: Some(price.into()),
            image: Some(image.into()),
        }
    }

    /// Validate the fields into a quantity-1 line item.
    ///
    /// The identifier is the explicit id when one is present, otherwise it is
    /// derived from the display name with [`ItemId::from_display_name`].
    ///
    /// # Errors
    ///
    /// Returns an [`AddRejection`] if a required field is missing or empty,
    /// or if the price is not a positive number.
    pub fn validate(&self) -> Result<LineItem, AddRejection> {
        let name = non_empty(self.name.as_deref()).ok_or(AddRejection::MissingName)?;
        let price = non_empty(self.price.as_deref()).ok_or(AddRejection::MissingPrice)?;
        let image = non_empty(self.image.as_deref()).ok_or(AddRejection::MissingImage)?;

        let price = Price::parse(price)?;
        let id = match non_empty(self.id.as_deref()) {
            Some(explicit) => ItemId::parse(explicit)?,
            None => ItemId::from_display_name(name)?,
        };

        Ok(LineItem::new(id, name, price, image))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
