//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! trails-cart add --sku trail-mix
//! trails-cart inc trail-mix
//! trails-cart show --view page
//! trails-cart checkout
//! ```

use tranquil_trails_core::{ItemId, ProductInput, QuantityChange};
use tranquil_trails_widget::checkout::CheckoutDecision;
use tranquil_trails_widget::host::targets;
use tranquil_trails_widget::views::CartView;
use tranquil_trails_widget::widget::CLEAR_CONFIRM_MESSAGE;

use super::{CliError, Session, Settings, ask};
use crate::View;

/// Add one unit of a product.
///
/// A product with incomplete fields is reported and otherwise ignored.
///
/// # Errors
///
/// Returns an error if the storage file cannot be opened.
pub fn add(settings: &Settings, product: &ProductInput) -> Result<(), CliError> {
    let mut session = Session::open(settings)?;
    match session.widget.add(&mut session.doc, product) {
        Ok(outcome) => tracing::info!(?outcome, "Cart updated"),
        Err(rejection) => tracing::warn!(%rejection, "Product not added"),
    }
    session.print_messages();
    Ok(())
}

/// Increase an item's quantity.
///
/// # Errors
///
/// Returns an error if the id is blank or storage cannot be opened.
pub fn increment(settings: &Settings, id: &str) -> Result<(), CliError> {
    let id = ItemId::parse(id)?;
    let mut session = Session::open(settings)?;
    let change = session.widget.increment(&mut session.doc, &id);
    report_change(&id, change);
    Ok(())
}

/// Decrease an item's quantity, removing it at zero.
///
/// # Errors
///
/// Returns an error if the id is blank or storage cannot be opened.
pub fn decrement(settings: &Settings, id: &str) -> Result<(), CliError> {
    let id = ItemId::parse(id)?;
    let mut session = Session::open(settings)?;
    let change = session.widget.decrement(&mut session.doc, &id);
    report_change(&id, change);
    Ok(())
}

/// Remove an item.
///
/// # Errors
///
/// Returns an error if the id is blank or storage cannot be opened.
pub fn remove(settings: &Settings, id: &str) -> Result<(), CliError> {
    let id = ItemId::parse(id)?;
    let mut session = Session::open(settings)?;
    match session.widget.remove(&mut session.doc, &id) {
        Some(item) => tracing::info!(%id, name = %item.name, "Removed from cart"),
        None => tracing::warn!(%id, "Not in cart"),
    }
    Ok(())
}

/// Empty the cart, asking on the terminal unless `yes` is set.
///
/// # Errors
///
/// Returns an error if storage cannot be opened or the prompt fails.
pub fn clear(settings: &Settings, yes: bool) -> Result<(), CliError> {
    let mut session = Session::open(settings)?;
    let answer = yes || !settings.widget.confirm_clear || ask(CLEAR_CONFIRM_MESSAGE)?;
    session.doc.set_confirm_answer(answer);

    match session.widget.clear(&mut session.doc) {
        Some(count) => tracing::info!(count, "Cart cleared"),
        None => tracing::info!("Cart left as is"),
    }
    Ok(())
}

/// Print one of the cart views.
///
/// # Errors
///
/// Returns an error if storage cannot be opened or the views fail to render.
#[allow(clippy::print_stdout)]
pub fn show(settings: &Settings, view: View, html: bool) -> Result<(), CliError> {
    let session = Session::open(settings)?;
    let doc = &session.doc;

    if html {
        let target = match view {
            View::Badge => targets::CART_COUNT,
            View::Sidebar => targets::CART_ITEMS,
            View::Page => targets::CART_PAGE,
        };
        let markup = doc
            .by_id(target)
            .and_then(|node| doc.element(node))
            .map(|el| el.inner_html.clone().unwrap_or_else(|| el.text.clone()))
            .unwrap_or_default();
        println!("{}", markup.trim());
        return Ok(());
    }

    let cart = CartView::new(session.widget.cart(), &settings.widget);
    match view {
        View::Badge => println!("{}", cart.item_count),
        View::Sidebar | View::Page if cart.items.is_empty() => {
            let message = if matches!(view, View::Page) {
                "Your Cart is Empty"
            } else {
                "Your cart is empty"
            };
            println!("{message}");
        }
        View::Sidebar => {
            for item in &cart.items {
                println!("{:>3} x {} ({}) @ {}", item.quantity, item.name, item.id, item.price);
            }
            println!("Subtotal: {}", cart.subtotal);
        }
        View::Page => {
            for item in &cart.items {
                println!(
                    "{:<24} {:>10} x{:<3} {:>10}",
                    item.name, item.price, item.quantity, item.line_total_display
                );
            }
            println!("Total: {}", cart.subtotal_display);
        }
    }
    Ok(())
}

/// Run the checkout gate.
///
/// # Errors
///
/// Returns an error if storage cannot be opened.
pub fn checkout(settings: &Settings) -> Result<(), CliError> {
    let mut session = Session::open(settings)?;
    let decision = session.widget.checkout(&mut session.doc);
    if let CheckoutDecision::RedirectToLogin { url } = &decision {
        tracing::info!(%url, "Sign in required");
    }
    session.print_messages();
    Ok(())
}

fn report_change(id: &ItemId, change: QuantityChange) {
    match change {
        QuantityChange::Incremented { quantity } | QuantityChange::Decremented { quantity } => {
            tracing::info!(%id, quantity, "Quantity updated");
        }
        QuantityChange::Removed => tracing::info!(%id, "Removed from cart"),
        QuantityChange::NotFound => tracing::warn!(%id, "Not in cart"),
    }
}
