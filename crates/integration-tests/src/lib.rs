//! Integration tests for the Tranquil Trails cart widget.
//!
//! Each test drives one or more simulated page loads against a shared
//! storage backend, the way a shopper moves between storefront pages.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tranquil-trails-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - Cart survives page loads and legacy layouts load
//! - `checkout_flow` - Checkout gate, sign-in and resume
//! - `delegation` - Clicks on re-rendered controls

#![cfg_attr(not(test), forbid(unsafe_code))]

use tranquil_trails_widget::{
    CartWidget, Document, KeyValueStore, PageKind, WidgetConfig, WidgetError,
};

/// One page load: a freshly mounted widget on a fresh document.
pub struct PageLoad<S> {
    pub widget: CartWidget<S>,
    pub doc: Document,
}

impl<S: KeyValueStore> PageLoad<S> {
    /// Mount the widget on a storefront page (with the cart page container)
    /// at `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if the first render fails.
    pub fn storefront(storage: S, location: &str) -> Result<Self, WidgetError> {
        Self::mount(
            storage,
            Document::storefront(location).with_cart_page(),
            WidgetConfig::default(),
            PageKind::Storefront,
        )
    }

    /// Mount the widget on a gallery page, which only carries the badge.
    ///
    /// # Errors
    ///
    /// Returns an error if the first render fails.
    pub fn gallery(storage: S, location: &str) -> Result<Self, WidgetError> {
        Self::mount(
            storage,
            Document::storefront(location),
            WidgetConfig::default(),
            PageKind::Gallery,
        )
    }

    /// Mount the widget on `doc` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the first render fails.
    pub fn mount(
        storage: S,
        mut doc: Document,
        config: WidgetConfig,
        page: PageKind,
    ) -> Result<Self, WidgetError> {
        let mut widget = CartWidget::load(storage, config, page);
        widget.mount(&mut doc)?;
        Ok(Self { widget, doc })
    }

    /// Text of the element with `id`, or an empty string.
    #[must_use]
    pub fn text(&self, id: &str) -> String {
        self.doc
            .by_id(id)
            .map(|node| self.doc.text_content(node))
            .unwrap_or_default()
    }

    /// Leave the page, handing the storage to the next load.
    #[must_use]
    pub fn leave(self) -> S {
        self.widget.into_storage()
    }
}

/// Parse a stored cart value into raw JSON for assertions.
///
/// # Errors
///
/// Returns an error if the value is not JSON.
pub fn stored_json(raw: &str) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(raw)
}
