//! Admin-only product form.
//!
//! Lets a signed-in admin put a new product card at the front of the product
//! slider. The card is page-local: it disappears on reload, and adding it to
//! the cart goes through the normal delegated handlers.

use thiserror::Error;
use tranquil_trails_core::{AddRejection, LineItem, LoginState, ProductInput};

use crate::dom::{Document, NodeId};
use crate::host::{PageHost, targets};
use crate::views::display_image;

/// Shown once a card has been added.
pub const PRODUCT_ADDED_MESSAGE: &str = "Product Added!";

/// Why the admin form did nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminFormError {
    /// The page is not signed in as an admin.
    #[error("admin login required")]
    NotAdmin,
    /// The page has no product slider to add to.
    #[error("page has no product slider")]
    NoSlider,
    /// A form field is missing or invalid.
    #[error("invalid product: {0}")]
    Invalid(#[from] AddRejection),
}

/// Read the admin form and prepend a matching product card.
///
/// # Errors
///
/// Returns [`AdminFormError`] if the page is not in admin mode, has no
/// slider, or the form fields do not describe a product.
pub fn add_product_from_form(
    doc: &mut Document,
    login: LoginState,
    static_base: &str,
) -> Result<(NodeId, LineItem), AdminFormError> {
    if !login.is_admin() {
        return Err(AdminFormError::NotAdmin);
    }
    let slider = doc.by_id(targets::PRODUCT_SLIDER).ok_or(AdminFormError::NoSlider)?;

    let input = ProductInput {
        id: None,
        name: doc.value(targets::ADMIN_NAME).map(String::from),
        price: doc.value(targets::ADMIN_PRICE).map(String::from),
        image: doc.value(targets::ADMIN_IMAGE).map(String::from),
    };
    let item = input.validate()?;

    let image = display_image(&item.image, static_base);
    let price = item.price.to_string();
    let (card, ..) = doc.prepend_product_card(slider, &item.name, &price, &image);
    doc.alert(PRODUCT_ADDED_MESSAGE);
    tracing::info!(id = %item.id, "Admin added product card");
    Ok((card, item))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::classes;

    fn filled_form() -> Document {
        let mut doc = Document::storefront("/shop/");
        doc.set_value(targets::ADMIN_NAME, "Hammock");
        doc.set_value(targets::ADMIN_PRICE, "59.5");
        doc.set_value(targets::ADMIN_IMAGE, "hammock.jpg");
        doc
    }

    #[test]
    fn test_admin_adds_card_first() {
        let mut doc = filled_form();
        let slider = doc.by_id(targets::PRODUCT_SLIDER).unwrap();
        doc.add_product_card(slider, None, "Lantern", "20", "lantern.png", "camp");

        let (card, item) = add_product_from_form(&mut doc, LoginState::Admin, "/static/").unwrap();
        assert_eq!(item.id.as_str(), "hammock");

        let cards = doc.by_class(classes::PRODUCT_CARD);
        assert_eq!(cards.first(), Some(&card));
        let el = doc.element(card).unwrap();
        assert_eq!(el.data("name"), Some("Hammock"));
        assert_eq!(el.data("price"), Some("59.50"));
        assert_eq!(el.data("img"), Some("/static/hammock.jpg"));
        assert_eq!(doc.alerts(), [PRODUCT_ADDED_MESSAGE]);
    }

    #[test]
    fn test_card_price_matches_cart_price() {
        let mut doc = filled_form();
        doc.set_value(targets::ADMIN_PRICE, "0.005");

        let (card, item) = add_product_from_form(&mut doc, LoginState::Admin, "/static/").unwrap();
        assert_eq!(item.price.amount(), rust_decimal::Decimal::new(1, 2));
        assert_eq!(doc.element(card).unwrap().data("price"), Some("0.01"));
    }

    #[test]
    fn test_requires_admin() {
        let mut doc = filled_form();
        assert_eq!(
            add_product_from_form(&mut doc, LoginState::Customer, "/static/"),
            Err(AdminFormError::NotAdmin)
        );
        assert!(doc.by_class(classes::PRODUCT_CARD).is_empty());
    }

    #[test]
    fn test_incomplete_form() {
        let mut doc = filled_form();
        doc.set_value(targets::ADMIN_PRICE, "");
        assert_eq!(
            add_product_from_form(&mut doc, LoginState::Admin, "/static/"),
            Err(AdminFormError::Invalid(AddRejection::MissingPrice))
        );
        assert!(doc.alerts().is_empty());
    }
}
