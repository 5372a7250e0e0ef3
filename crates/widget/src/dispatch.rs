//! Delegated click recognition.
//!
//! A single document-level handler receives every click. [`classify`] walks
//! up from the clicked element to the nearest control it knows and says what
//! the click means, so controls rendered after load (cart rows, admin-added
//! cards) work without binding anything to them.

use tranquil_trails_core::{ItemId, ProductInput};

use crate::dom::{Document, Element, NodeId};
use crate::filter::ALL;
use crate::host::{classes, targets};

/// What a click asks the widget to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Add one unit of a product; "buy now" also opens the sidebar.
    AddToCart { product: ProductInput, buy_now: bool },
    Increment { id: ItemId },
    Decrement { id: ItemId },
    Remove { id: ItemId },
    OpenSidebar,
    CloseSidebar,
    Checkout,
    ClearCart,
    /// Category filter button.
    Filter { button: NodeId, category: String },
    Logout,
    /// Submit the admin product form.
    AdminAddProduct,
}

const ADD_TRIGGERS: [&str; 3] = [classes::ADD_TO_CART, classes::ADD, classes::BUY_NOW];

const CLASS_CONTROLS: [&str; 7] = [
    classes::ADD_TO_CART,
    classes::ADD,
    classes::BUY_NOW,
    classes::QTY_BTN,
    classes::REMOVE_ITEM,
    classes::CHECKOUT,
    classes::CLEAR_CART,
];

const ID_CONTROLS: [&str; 4] = [
    targets::CART_LINK,
    targets::CLOSE_CART,
    targets::AUTH_BTN,
    targets::ADMIN_SUBMIT,
];

fn is_control(el: &Element) -> bool {
    CLASS_CONTROLS.iter().any(|class| el.has_class(class))
        || el.has_class(classes::FILTER_BTN)
        || el.id.as_deref().is_some_and(|id| ID_CONTROLS.contains(&id))
}

/// Interpret a click on `target`.
///
/// Returns `None` for clicks that hit no known control or hit a control
/// lacking the data it needs.
#[must_use]
pub fn classify(doc: &Document, target: NodeId) -> Option<ClickAction> {
    let node = doc.closest(target, is_control)?;
    let el = doc.element(node)?;

    if ADD_TRIGGERS.iter().any(|class| el.has_class(class)) {
        return Some(ClickAction::AddToCart {
            product: product_fields(doc, node),
            buy_now: el.has_class(classes::BUY_NOW),
        });
    }
    if el.has_class(classes::QTY_BTN) {
        let id = item_id(el)?;
        return match el.data("action")? {
            "increment" => Some(ClickAction::Increment { id }),
            "decrement" => Some(ClickAction::Decrement { id }),
            _ => None,
        };
    }
    if el.has_class(classes::REMOVE_ITEM) {
        return Some(ClickAction::Remove { id: item_id(el)? });
    }
    if el.has_class(classes::CHECKOUT) {
        return Some(ClickAction::Checkout);
    }
    if el.has_class(classes::CLEAR_CART) {
        return Some(ClickAction::ClearCart);
    }
    if el.has_class(classes::FILTER_BTN) {
        return Some(ClickAction::Filter {
            button: node,
            category: el.data("filter").unwrap_or(ALL).to_string(),
        });
    }

    match el.id.as_deref()? {
        targets::CART_LINK => Some(ClickAction::OpenSidebar),
        targets::CLOSE_CART => Some(ClickAction::CloseSidebar),
        targets::AUTH_BTN if el.has_class(classes::LOGOUT_MODE) => Some(ClickAction::Logout),
        targets::ADMIN_SUBMIT => Some(ClickAction::AdminAddProduct),
        _ => None,
    }
}

fn item_id(el: &Element) -> Option<ItemId> {
    el.data("id").and_then(|id| ItemId::parse(id).ok())
}

/// Product fields from the trigger, falling back to its card or slide.
fn product_fields(doc: &Document, trigger: NodeId) -> ProductInput {
    let button = doc.element(trigger);
    let card = doc
        .closest(trigger, |el| {
            el.has_class(classes::PRODUCT_CARD) || el.has_class(classes::SLIDE)
        })
        .and_then(|node| doc.element(node));
    let sources = [button, card];

    ProductInput {
        id: first_data(sources, &["id"]),
        name: first_data(sources, &["name"]),
        price: first_data(sources, &["price"]),
        image: first_data(sources, &["image", "img"]),
    }
}

fn first_data(sources: [Option<&Element>; 2], names: &[&str]) -> Option<String> {
    sources
        .into_iter()
        .flatten()
        .find_map(|el| names.iter().find_map(|name| el.data(name)))
        .map(String::from)
}
