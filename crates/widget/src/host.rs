//! The page a widget writes into.
//!
//! `PageHost` is the narrow set of side effects the cart needs from a page:
//! write text or markup into an element by id, flip classes and styles, and
//! the browser's modal/navigation primitives. Every element write reports
//! whether the target existed, because not every page hosts every view and a
//! missing container is skipped rather than treated as an error.

use std::time::Duration;

/// Element ids the widget looks for.
pub mod targets {
    /// Badge showing the total item count.
    pub const CART_COUNT: &str = "cart-count";
    /// Sidebar list container.
    pub const CART_ITEMS: &str = "cart-items-list";
    /// Sidebar subtotal.
    pub const TOTAL_PRICE: &str = "total-price";
    /// Dedicated cart page container.
    pub const CART_PAGE: &str = "cart-page-container";
    /// Sliding cart sidebar.
    pub const SIDEBAR: &str = "cartSidebar";
    /// Cart icon in the header; opens the sidebar.
    pub const CART_LINK: &str = "cart-link";
    /// Close control inside the sidebar.
    pub const CLOSE_CART: &str = "closeCart";
    /// Log in / log out button.
    pub const AUTH_BTN: &str = "authBtn";
    /// Admin-only product form.
    pub const ADMIN_FORM: &str = "adminForm";
    /// Admin form: product name input.
    pub const ADMIN_NAME: &str = "pName";
    /// Admin form: product price input.
    pub const ADMIN_PRICE: &str = "pPrice";
    /// Admin form: product image input.
    pub const ADMIN_IMAGE: &str = "pImg";
    /// Admin form: submit control.
    pub const ADMIN_SUBMIT: &str = "addProductBtn";
    /// Container holding the product cards.
    pub const PRODUCT_SLIDER: &str = "proSlider";
}

/// Class names the widget reads or writes.
pub mod classes {
    /// "Add to cart" trigger.
    pub const ADD_TO_CART: &str = "add-to-cart-btn";
    /// Compact "add" trigger used on some listings.
    pub const ADD: &str = "add-btn";
    /// "Buy now" trigger.
    pub const BUY_NOW: &str = "buy-now-btn";
    /// Product card carrying product data attributes.
    pub const PRODUCT_CARD: &str = "pro-card";
    /// Carousel slide carrying product data attributes.
    pub const SLIDE: &str = "slide";
    /// Quantity stepper button rendered in cart views.
    pub const QTY_BTN: &str = "qty-btn";
    /// Remove control rendered in cart views.
    pub const REMOVE_ITEM: &str = "remove-item";
    /// Checkout trigger.
    pub const CHECKOUT: &str = "checkout-btn";
    /// Empty-the-cart trigger.
    pub const CLEAR_CART: &str = "clear-cart-btn";
    /// Category filter button.
    pub const FILTER_BTN: &str = "filter-btn";
    /// Admin-only navigation link.
    pub const ADMIN_LINK: &str = "admin-link";
    /// Sidebar visible.
    pub const OPEN: &str = "open";
    /// Active filter button.
    pub const ACTIVE: &str = "active";
    /// Brief wiggle on the cart icon after a change.
    pub const CART_SHAKE: &str = "cart-shake";
    /// Auth button acting as a logout control.
    pub const LOGOUT_MODE: &str = "logout-mode";
}

/// Side effects a page offers to the widget.
pub trait PageHost {
    /// Replace the text of element `target`. Returns `false` if absent.
    fn set_text(&mut self, target: &str, text: &str) -> bool;

    /// Replace the markup inside element `target`. Returns `false` if absent.
    fn set_html(&mut self, target: &str, html: &str) -> bool;

    /// Add or remove `class` on element `target`. Returns `false` if absent.
    fn set_class(&mut self, target: &str, class: &str, enabled: bool) -> bool;

    /// Set an attribute on element `target`. Returns `false` if absent.
    fn set_attr(&mut self, target: &str, name: &str, value: &str) -> bool;

    /// Set an inline style on element `target`. Returns `false` if absent.
    fn set_style(&mut self, target: &str, property: &str, value: &str) -> bool;

    /// Set an inline style on every element with `class`; returns how many.
    fn set_style_by_class(&mut self, class: &str, property: &str, value: &str) -> usize;

    /// Flip `class` on element `target` after `delay`. Fire-and-forget.
    fn schedule_class(&mut self, delay: Duration, target: &str, class: &str, enabled: bool);

    /// Show a transient notification that dismisses itself after `ttl`.
    fn show_toast(&mut self, message: &str, ttl: Duration);

    /// Show a blocking message.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Full-page navigation to `url`.
    fn navigate(&mut self, url: &str);

    /// Reload the current page.
    fn reload(&mut self);

    /// Path of the current page, used as the post-login destination.
    fn location(&self) -> String;
}
