//! Cart views: badge, sidebar list and full cart page.
//!
//! Each view is a pure projection of the cart. Prices are formatted once
//! into the view structs so the templates only print strings.

use askama::Template;
use tranquil_trails_core::{CartState, CurrencyCode, LineItem, format_amount};

use crate::config::WidgetConfig;
use crate::error::Result;
use crate::host::{PageHost, targets};
use crate::widget::PageKind;

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Unit price with currency symbol.
    pub price: String,
    /// Line total as a bare two-decimal amount.
    pub line_total: String,
    /// Line total with currency symbol.
    pub line_total_display: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Bare two-decimal subtotal, as written into `total-price`.
    pub subtotal: String,
    /// Subtotal with currency symbol.
    pub subtotal_display: String,
    pub item_count: u64,
}

impl CartView {
    /// Build the view for `cart`.
    #[must_use]
    pub fn new(cart: &CartState, config: &WidgetConfig) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, config))
                .collect(),
            subtotal: format_amount(cart.subtotal()),
            subtotal_display: config.currency.format(cart.subtotal()),
            item_count: cart.total_quantity(),
        }
    }

    /// The view of an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_amount(rust_decimal::Decimal::ZERO),
            subtotal_display: currency.format(rust_decimal::Decimal::ZERO),
            item_count: 0,
        }
    }
}

impl CartItemView {
    fn new(item: &LineItem, config: &WidgetConfig) -> Self {
        let line_total = item.line_total();
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: display_image(&item.image, &config.static_base),
            quantity: item.quantity,
            price: config.currency.format(item.price.amount()),
            line_total: format_amount(line_total),
            line_total_display: config.currency.format(line_total),
        }
    }
}

/// Resolve an image reference for display.
///
/// Absolute URLs, root-relative paths and data URIs are used as is;
/// anything else is taken to be relative to `static_base`.
#[must_use]
pub fn display_image(image: &str, static_base: &str) -> String {
    let is_absolute = image.starts_with("http")
        || image.starts_with('/')
        || image.starts_with("data:")
        || image.starts_with(static_base);
    if is_absolute {
        image.to_string()
    } else {
        format!("{static_base}{image}")
    }
}

/// Sidebar list fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct SidebarTemplate<'a> {
    pub cart: &'a CartView,
}

/// Full cart page fragment.
#[derive(Template)]
#[template(path = "cart/page.html")]
pub struct CartPageTemplate<'a> {
    pub cart: &'a CartView,
}

/// Which views a render pass actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub badge: bool,
    pub sidebar: bool,
    pub page: bool,
}

/// Write the badge count.
pub fn render_badge<H: PageHost>(host: &mut H, cart: &CartState) -> bool {
    host.set_text(targets::CART_COUNT, &cart.total_quantity().to_string())
}

/// Write the sidebar list and subtotal.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_sidebar<H: PageHost>(host: &mut H, view: &CartView) -> Result<bool> {
    let html = SidebarTemplate { cart: view }.render()?;
    let written = host.set_html(targets::CART_ITEMS, &html);
    host.set_text(targets::TOTAL_PRICE, &view.subtotal);
    Ok(written)
}

/// Write the full cart page.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_page<H: PageHost>(host: &mut H, view: &CartView) -> Result<bool> {
    let html = CartPageTemplate { cart: view }.render()?;
    Ok(host.set_html(targets::CART_PAGE, &html))
}

/// Re-render every view the page hosts.
///
/// Gallery pages only carry the badge; containers missing from the page are
/// skipped.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn render_all<H: PageHost>(
    host: &mut H,
    cart: &CartState,
    config: &WidgetConfig,
    page: PageKind,
) -> Result<RenderReport> {
    let badge = render_badge(host, cart);
    if page == PageKind::Gallery {
        return Ok(RenderReport {
            badge,
            ..RenderReport::default()
        });
    }

    let view = CartView::new(cart, config);
    Ok(RenderReport {
        badge,
        sidebar: render_sidebar(host, &view)?,
        page: render_page(host, &view)?,
    })
}
