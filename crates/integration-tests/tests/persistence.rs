//! Integration tests for cart persistence across page loads.
//!
//! These tests move one storage backend between several simulated page
//! loads and check that every page sees the same cart.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use tranquil_trails_core::{ItemId, ProductInput, QuantityChange};
use tranquil_trails_integration_tests::{PageLoad, stored_json};
use tranquil_trails_widget::host::targets;
use tranquil_trails_widget::{FileStore, MemoryStore};

fn mat() -> ProductInput {
    ProductInput::new("cork-yoga-mat", "Cork Yoga Mat", "499.00", "products/cork-mat.jpg")
}

fn mug() -> ProductInput {
    ProductInput::new("camp-mug", "Enamel Camp Mug", "12.00", "mug.jpg")
}

fn id(value: &str) -> ItemId {
    ItemId::parse(value).unwrap()
}

// =============================================================================
// Page Loads
// =============================================================================

#[test]
fn test_cart_survives_page_loads_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut page = PageLoad::storefront(FileStore::open(&path).unwrap(), "/shop/").unwrap();
    page.widget.add(&mut page.doc, &mat()).unwrap();
    page.widget.add(&mut page.doc, &mug()).unwrap();
    page.widget.add(&mut page.doc, &mat()).unwrap();
    drop(page.leave());

    let page = PageLoad::storefront(FileStore::open(&path).unwrap(), "/cart/").unwrap();
    let items = page.widget.cart().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, id("cork-yoga-mat"));
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[1].id, id("camp-mug"));

    assert_eq!(page.text(targets::CART_COUNT), "3");
    assert_eq!(page.text(targets::TOTAL_PRICE), "1010.00");
    assert!(page.text(targets::CART_PAGE).contains("$1010.00"));
}

#[test]
fn test_gallery_page_shows_stored_count() {
    let mut page = PageLoad::storefront(MemoryStore::new(), "/shop/").unwrap();
    page.widget.add(&mut page.doc, &mug()).unwrap();
    page.widget.add(&mut page.doc, &mug()).unwrap();

    let mut gallery = PageLoad::gallery(page.leave(), "/gallery/").unwrap();
    assert_eq!(gallery.text(targets::CART_COUNT), "2");
    assert_eq!(gallery.text(targets::CART_ITEMS), "");

    gallery.widget.increment(&mut gallery.doc, &id("camp-mug"));
    assert_eq!(gallery.text(targets::CART_COUNT), "3");

    let page = PageLoad::storefront(gallery.leave(), "/shop/").unwrap();
    assert_eq!(page.widget.cart().total_quantity(), 3);
}

#[test]
fn test_noop_changes_do_not_write() {
    let mut page = PageLoad::storefront(MemoryStore::new(), "/shop/").unwrap();
    assert_eq!(
        page.widget.increment(&mut page.doc, &id("missing")),
        QuantityChange::NotFound
    );
    assert!(page.widget.remove(&mut page.doc, &id("missing")).is_none());
    assert!(page.leave().is_empty());
}

#[test]
fn test_stored_layout_is_an_array_of_items() {
    let mut page = PageLoad::storefront(MemoryStore::new(), "/shop/").unwrap();
    page.widget.add(&mut page.doc, &mug()).unwrap();
    let storage = page.leave();

    let json = stored_json(storage.get("cart").unwrap()).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], "camp-mug");
    assert_eq!(entries[0]["name"], "Enamel Camp Mug");
    assert_eq!(entries[0]["price"], 12.0);
    assert_eq!(entries[0]["image"], "mug.jpg");
    assert_eq!(entries[0]["quantity"], 1);
}

// =============================================================================
// Stored Data Tolerance
// =============================================================================

#[test]
fn test_keyed_legacy_layout_loads_and_is_rewritten() {
    let legacy = r#"{
        "cork-yoga-mat": {"name": "Cork Yoga Mat", "price": 499, "img": "mat.jpg", "quantity": 2},
        "camp-mug": {"name": "Enamel Camp Mug", "price": 12.5}
    }"#;
    let storage = MemoryStore::new().with_item("cart", legacy);

    let mut page = PageLoad::storefront(storage, "/cart/").unwrap();
    let items = page.widget.cart().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, id("cork-yoga-mat"));
    assert_eq!(items[0].image, "mat.jpg");
    assert_eq!(items[1].quantity, 1);
    assert_eq!(page.text(targets::CART_COUNT), "3");

    page.widget.increment(&mut page.doc, &id("camp-mug"));
    let storage = page.leave();
    let json = stored_json(storage.get("cart").unwrap()).unwrap();
    assert!(json.is_array());
    assert_eq!(json[1]["quantity"], 2);
}

#[test]
fn test_name_only_entries_are_merged() {
    let legacy = r#"[
        {"name": "Trail Mix", "price": 4.5, "image": "mix.jpg", "quantity": 1},
        {"name": "Trail Mix", "price": 4.5, "image": "mix.jpg", "quantity": 2},
        {"name": "Broken", "price": 0, "image": "x.jpg"}
    ]"#;
    let storage = MemoryStore::new().with_item("cart", legacy);

    let page = PageLoad::storefront(storage, "/cart/").unwrap();
    let items = page.widget.cart().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
    assert_eq!(page.text(targets::CART_COUNT), "3");
}

#[test]
fn test_out_of_range_prices_are_dropped_on_mount() {
    let stored = r#"[
        {"id": "vault", "name": "Vault", "price": 1e25, "image": "v.jpg", "quantity": 100000},
        {"id": "camp-mug", "name": "Enamel Camp Mug", "price": 12, "image": "mug.jpg", "quantity": 1}
    ]"#;
    let storage = MemoryStore::new().with_item("cart", stored);

    let page = PageLoad::storefront(storage, "/cart/").unwrap();
    assert_eq!(page.widget.cart().len(), 1);
    assert_eq!(page.text(targets::CART_COUNT), "1");
    assert_eq!(page.text(targets::TOTAL_PRICE), "12.00");
}

#[test]
fn test_long_decimal_price_survives_reload() {
    let mut page = PageLoad::storefront(MemoryStore::new(), "/shop/").unwrap();
    let long = ProductInput::new("rope", "Climbing Rope", "19.123456789012345678", "rope.jpg");
    page.widget.add(&mut page.doc, &long).unwrap();
    page.widget.add(&mut page.doc, &long).unwrap();
    let before = page.widget.cart().clone();

    let page = PageLoad::storefront(page.leave(), "/shop/").unwrap();
    assert_eq!(page.widget.cart(), &before);
    assert_eq!(page.text(targets::TOTAL_PRICE), "38.24");
}

#[test]
fn test_corrupt_cart_loads_empty_until_changed() {
    let storage = MemoryStore::new().with_item("cart", "{not json");

    let mut page = PageLoad::storefront(storage, "/shop/").unwrap();
    assert!(page.widget.cart().is_empty());
    assert_eq!(page.text(targets::CART_ITEMS), "Your cart is empty");
    assert!(page.text(targets::CART_PAGE).contains("Your Cart is Empty"));

    page.widget.add(&mut page.doc, &mug()).unwrap();
    let storage = page.leave();
    assert!(stored_json(storage.get("cart").unwrap()).unwrap().is_array());
}

// =============================================================================
// Property Tests
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Inc(usize),
    Dec(usize),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize).prop_map(Op::Add),
        (0..3usize).prop_map(Op::Inc),
        (0..3usize).prop_map(Op::Dec),
        (0..3usize).prop_map(Op::Remove),
    ]
}

fn catalog() -> [ProductInput; 3] {
    [
        mat(),
        mug(),
        ProductInput::new("trail-mix", "Trail Mix", "4.50", "products/trail-mix.jpg"),
    ]
}

proptest! {
    #[test]
    fn prop_reload_sees_same_cart(ops in proptest::collection::vec(op(), 0..40)) {
        let products = catalog();
        let mut page = PageLoad::storefront(MemoryStore::new(), "/shop/").unwrap();

        for op in ops {
            match op {
                Op::Add(i) => {
                    page.widget.add(&mut page.doc, &products[i]).unwrap();
                }
                Op::Inc(i) => {
                    let target = id(products[i].id.as_deref().unwrap());
                    page.widget.increment(&mut page.doc, &target);
                }
                Op::Dec(i) => {
                    let target = id(products[i].id.as_deref().unwrap());
                    page.widget.decrement(&mut page.doc, &target);
                }
                Op::Remove(i) => {
                    let target = id(products[i].id.as_deref().unwrap());
                    page.widget.remove(&mut page.doc, &target);
                }
            }
        }

        let before = page.widget.cart().clone();
        let badge = page.text(targets::CART_COUNT);
        let reloaded = PageLoad::storefront(page.leave(), "/shop/").unwrap();

        prop_assert_eq!(reloaded.widget.cart(), &before);
        prop_assert_eq!(reloaded.text(targets::CART_COUNT), badge);
        prop_assert!(reloaded.widget.cart().items().iter().all(|item| item.quantity >= 1));
    }
}
