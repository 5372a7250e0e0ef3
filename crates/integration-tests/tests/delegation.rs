//! Integration tests for delegated clicks.
//!
//! Views are re-rendered after every change, so these tests always look
//! controls up again after a click, the way a shopper would find them on
//! the refreshed page.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use tranquil_trails_core::{AddOutcome, ItemId, QuantityChange, UserIdentity};
use tranquil_trails_integration_tests::PageLoad;
use tranquil_trails_widget::admin::{AdminFormError, PRODUCT_ADDED_MESSAGE};
use tranquil_trails_widget::checkout::CheckoutDecision;
use tranquil_trails_widget::filter::HIDE_DELAY;
use tranquil_trails_widget::host::{classes, targets};
use tranquil_trails_widget::widget::CLEAR_CONFIRM_MESSAGE;
use tranquil_trails_widget::{ClickOutcome, Document, Element, MemoryStore, NodeId};

fn shop() -> PageLoad<MemoryStore> {
    PageLoad::storefront(MemoryStore::new(), "/shop/").unwrap()
}

/// The quantity button for `action` inside the container with id `within`.
fn qty_button(doc: &Document, within: &str, action: &str) -> NodeId {
    let container = doc.by_id(within).unwrap();
    doc.by_class(classes::QTY_BTN)
        .into_iter()
        .find(|node| {
            doc.contains(container, *node)
                && doc.element(*node).unwrap().data("action") == Some(action)
        })
        .unwrap()
}

/// The "add to cart" button of a product card.
fn add_button(doc: &Document, card: NodeId) -> NodeId {
    doc.by_class(classes::ADD_TO_CART)
        .into_iter()
        .find(|node| doc.contains(card, *node))
        .unwrap()
}

// =============================================================================
// Cart Controls
// =============================================================================

#[test]
fn test_sidebar_controls_work_after_rerender() {
    let mut page = shop();
    let body = page.doc.body();
    let (_, add, _) =
        page.doc
            .add_product_card(body, Some("tent-2p"), "Two Person Tent", "189.99", "tent.jpg", "camp");

    assert_eq!(
        page.widget.handle_click(&mut page.doc, add),
        ClickOutcome::Added(AddOutcome::Inserted)
    );

    for expected in 2..=4 {
        let plus = qty_button(&page.doc, targets::CART_ITEMS, "increment");
        assert_eq!(
            page.widget.handle_click(&mut page.doc, plus),
            ClickOutcome::Quantity(QuantityChange::Incremented { quantity: expected })
        );
    }
    assert_eq!(page.text(targets::CART_COUNT), "4");
    assert_eq!(page.text(targets::TOTAL_PRICE), "759.96");

    let minus = qty_button(&page.doc, targets::CART_ITEMS, "decrement");
    assert_eq!(
        page.widget.handle_click(&mut page.doc, minus),
        ClickOutcome::Quantity(QuantityChange::Decremented { quantity: 3 })
    );
    assert!(page.widget.sidebar_open());
}

#[test]
fn test_cart_page_controls_share_the_cart() {
    let mut page = shop();
    let body = page.doc.body();
    let (_, add, _) =
        page.doc
            .add_product_card(body, None, "Trail Mix", "4.50", "mix.jpg", "snacks");
    page.widget.handle_click(&mut page.doc, add);

    let plus = qty_button(&page.doc, targets::CART_PAGE, "increment");
    page.widget.handle_click(&mut page.doc, plus);
    assert_eq!(page.text(targets::CART_COUNT), "2");
    assert_eq!(page.text(targets::TOTAL_PRICE), "9.00");
    assert!(page.text(targets::CART_PAGE).contains("$9.00"));

    let minus = qty_button(&page.doc, targets::CART_PAGE, "decrement");
    page.widget.handle_click(&mut page.doc, minus);
    let minus = qty_button(&page.doc, targets::CART_PAGE, "decrement");
    assert_eq!(
        page.widget.handle_click(&mut page.doc, minus),
        ClickOutcome::Quantity(QuantityChange::Removed)
    );
    assert!(page.text(targets::CART_PAGE).contains("Your Cart is Empty"));
    assert_eq!(page.text(targets::CART_ITEMS), "Your cart is empty");
}

#[test]
fn test_clear_and_checkout_buttons() {
    let mut page = shop();
    let body = page.doc.body();
    let (_, add, _) = page
        .doc
        .add_product_card(body, None, "Camp Mug", "12.00", "mug.jpg", "kitchen");
    page.widget.handle_click(&mut page.doc, add);

    let sidebar = page.doc.by_id(targets::SIDEBAR).unwrap();
    let find = |doc: &Document, class: &str| {
        doc.by_class(class)
            .into_iter()
            .find(|node| doc.contains(sidebar, *node))
            .unwrap()
    };

    let checkout = find(&page.doc, classes::CHECKOUT);
    assert!(matches!(
        page.widget.handle_click(&mut page.doc, checkout),
        ClickOutcome::Checkout(CheckoutDecision::RedirectToLogin { .. })
    ));

    page.doc.set_confirm_answer(false);
    let clear = find(&page.doc, classes::CLEAR_CART);
    assert_eq!(
        page.widget.handle_click(&mut page.doc, clear),
        ClickOutcome::Cleared(None)
    );
    assert_eq!(page.widget.cart().len(), 1);

    page.doc.set_confirm_answer(true);
    assert_eq!(
        page.widget.handle_click(&mut page.doc, clear),
        ClickOutcome::Cleared(Some(1))
    );
    assert!(page.widget.cart().is_empty());
    assert_eq!(page.doc.confirm_prompts().len(), 2);
    assert_eq!(page.doc.confirm_prompts()[0], CLEAR_CONFIRM_MESSAGE);
}

#[test]
fn test_card_without_price_is_rejected() {
    let mut page = shop();
    let body = page.doc.body();
    let card = page.doc.append(
        body,
        Element::new("div")
            .with_class(classes::PRODUCT_CARD)
            .with_attr("data-name", "Mystery Box")
            .with_attr("data-img", "box.jpg"),
    );
    let button = page
        .doc
        .append(card, Element::new("button").with_class(classes::ADD_TO_CART));

    assert!(matches!(
        page.widget.handle_click(&mut page.doc, button),
        ClickOutcome::Rejected(_)
    ));
    assert!(page.widget.cart().is_empty());
    assert!(page.leave().is_empty());
}

// =============================================================================
// Sidebar
// =============================================================================

#[test]
fn test_sidebar_open_and_close() {
    let mut page = shop();
    let link = page.doc.by_id(targets::CART_LINK).unwrap();
    assert_eq!(
        page.widget.handle_click(&mut page.doc, link),
        ClickOutcome::Sidebar(true)
    );

    // Clicks inside the sidebar keep it open.
    let list = page.doc.by_id(targets::CART_ITEMS).unwrap();
    page.widget.handle_click(&mut page.doc, list);
    assert!(page.widget.sidebar_open());

    let close = page.doc.by_id(targets::CLOSE_CART).unwrap();
    assert_eq!(
        page.widget.handle_click(&mut page.doc, close),
        ClickOutcome::Sidebar(false)
    );
    let sidebar = page.doc.by_id(targets::SIDEBAR).unwrap();
    assert!(!page.doc.element(sidebar).unwrap().has_class(classes::OPEN));
}

// =============================================================================
// Filter
// =============================================================================

#[test]
fn test_filter_hides_other_categories_after_fade() {
    let mut page = shop();
    let body = page.doc.body();
    let (tent, ..) = page
        .doc
        .add_product_card(body, None, "Tent", "150", "tent.jpg", "camp");
    let (mug, ..) = page
        .doc
        .add_product_card(body, None, "Mug", "12", "mug.jpg", "kitchen");
    let button = page.doc.append(
        body,
        Element::new("button")
            .with_class(classes::FILTER_BTN)
            .with_attr("data-filter", "camp"),
    );

    let outcome = page.widget.handle_click(&mut page.doc, button);
    assert!(matches!(outcome, ClickOutcome::Filtered(f) if f.shown == 1 && f.hidden == 1));

    let style = |doc: &Document, node: NodeId, property: &str| {
        doc.element(node).unwrap().style(property).map(String::from)
    };
    assert_eq!(style(&page.doc, mug, "opacity").as_deref(), Some("0"));
    assert_ne!(style(&page.doc, mug, "display").as_deref(), Some("none"));

    page.doc.advance(HIDE_DELAY + Duration::from_millis(1));
    assert_eq!(style(&page.doc, mug, "display").as_deref(), Some("none"));
    assert_eq!(style(&page.doc, tent, "opacity").as_deref(), Some("1"));
    assert!(page.doc.element(button).unwrap().has_class(classes::ACTIVE));
}

// =============================================================================
// Admin Product Form
// =============================================================================

#[test]
fn test_admin_card_can_be_added_to_cart() {
    let mut page = shop();
    let admin = UserIdentity::parse("owner@example.com").unwrap();
    page.widget.login(&mut page.doc, &admin, true).unwrap();

    page.doc.set_value(targets::ADMIN_NAME, "Camping Hammock");
    page.doc.set_value(targets::ADMIN_PRICE, "59.5");
    page.doc.set_value(targets::ADMIN_IMAGE, "hammock.jpg");
    let submit = page.doc.by_id(targets::ADMIN_SUBMIT).unwrap();

    let expected = ItemId::parse("camping-hammock").unwrap();
    assert_eq!(
        page.widget.handle_click(&mut page.doc, submit),
        ClickOutcome::ProductCard(Ok(expected.clone()))
    );
    assert_eq!(page.doc.alerts(), [PRODUCT_ADDED_MESSAGE]);

    let slider = page.doc.by_id(targets::PRODUCT_SLIDER).unwrap();
    let card = page.doc.element(slider).unwrap().children()[0];
    let add = add_button(&page.doc, card);
    assert_eq!(
        page.widget.handle_click(&mut page.doc, add),
        ClickOutcome::Added(AddOutcome::Inserted)
    );

    let item = page.widget.cart().get(&expected).unwrap();
    assert_eq!(item.name, "Camping Hammock");
    assert_eq!(item.price.to_string(), "59.50");
}

#[test]
fn test_guest_cannot_use_admin_form() {
    let mut page = shop();
    page.doc.set_value(targets::ADMIN_NAME, "Hammock");
    page.doc.set_value(targets::ADMIN_PRICE, "59.5");
    page.doc.set_value(targets::ADMIN_IMAGE, "hammock.jpg");
    let submit = page.doc.by_id(targets::ADMIN_SUBMIT).unwrap();

    assert_eq!(
        page.widget.handle_click(&mut page.doc, submit),
        ClickOutcome::ProductCard(Err(AdminFormError::NotAdmin))
    );
    let slider = page.doc.by_id(targets::PRODUCT_SLIDER).unwrap();
    assert!(page.doc.element(slider).unwrap().children().is_empty());
    assert!(page.doc.alerts().is_empty());
}
