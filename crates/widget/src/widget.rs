//! The cart widget: store, views and page chrome wired together.
//!
//! `CartWidget` is what a page instantiates once at load. It owns the cart
//! store and sidebar state, re-renders after every change, and turns
//! delegated clicks into cart operations.

use std::time::Duration;

use tracing::instrument;
use tranquil_trails_core::{
    AddOutcome, AddRejection, CartState, ItemId, LineItem, LoginState, ProductInput,
    QuantityChange, UserIdentity,
};

use crate::admin::{AdminFormError, add_product_from_form};
use crate::auth::{self, LOGOUT_MESSAGE, apply_login_ui, read_login_state};
use crate::checkout::{
    CheckoutDecision, LOGIN_REQUIRED_MESSAGE, PROCEED_MESSAGE, PendingCheckout, evaluate,
};
use crate::config::WidgetConfig;
use crate::dispatch::{ClickAction, classify};
use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::filter::{FilterOutcome, apply_filter};
use crate::host::{PageHost, classes, targets};
use crate::sidebar::SidebarToggle;
use crate::storage::{KeyValueStore, read_identity, resolve_cart_key};
use crate::store::CartStore;
use crate::views::{RenderReport, render_all};

/// Confirmation asked before emptying the cart.
pub const CLEAR_CONFIRM_MESSAGE: &str = "Empty your shopping bag?";

/// How long the cart icon wiggles after a change.
pub const SHAKE_DURATION: Duration = Duration::from_millis(400);

/// The kind of page hosting the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageKind {
    /// Full storefront chrome: badge, sidebar, toasts, optional cart page.
    #[default]
    Storefront,
    /// Gallery pages only show the badge.
    Gallery,
}

/// What a delegated click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not a widget control.
    Ignored,
    Added(AddOutcome),
    /// An add trigger with unusable product data.
    Rejected(AddRejection),
    Quantity(QuantityChange),
    Removed(Option<LineItem>),
    /// `None` when the shopper declined the confirmation.
    Cleared(Option<usize>),
    /// Sidebar is now open (`true`) or closed.
    Sidebar(bool),
    Checkout(CheckoutDecision),
    Filtered(FilterOutcome),
    LoggedOut,
    ProductCard(std::result::Result<ItemId, AdminFormError>),
}

/// A cart widget mounted on one page.
#[derive(Debug)]
pub struct CartWidget<S> {
    store: CartStore<S>,
    config: WidgetConfig,
    page: PageKind,
    sidebar: SidebarToggle,
    login: LoginState,
}

impl<S: KeyValueStore> CartWidget<S> {
    /// Read login state and load the cart for the signed-in identity.
    #[instrument(skip(storage, config))]
    pub fn load(storage: S, config: WidgetConfig, page: PageKind) -> Self {
        let login = read_login_state(&storage, &config.keys);
        let identity = read_identity(&storage, &config.keys);
        let key = resolve_cart_key(&config.keys, identity.as_ref());
        tracing::debug!(%login, key = %key, "Mounting cart widget");
        let store = CartStore::load(storage, &key);
        Self {
            store,
            config,
            page,
            sidebar: SidebarToggle::new(),
            login,
        }
    }

    /// First paint: login chrome and every view.
    ///
    /// # Errors
    ///
    /// Returns an error if a view template fails to render.
    pub fn mount<H: PageHost>(&mut self, host: &mut H) -> Result<RenderReport> {
        apply_login_ui(host, self.login);
        self.render(host)
    }

    /// Re-render every view the page hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if a view template fails to render.
    pub fn render<H: PageHost>(&self, host: &mut H) -> Result<RenderReport> {
        render_all(host, self.store.state(), &self.config, self.page)
    }

    #[must_use]
    pub const fn cart(&self) -> &CartState {
        self.store.state()
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub const fn page(&self) -> PageKind {
        self.page
    }

    #[must_use]
    pub const fn login_state(&self) -> LoginState {
        self.login
    }

    #[must_use]
    pub const fn sidebar_open(&self) -> bool {
        self.sidebar.is_open()
    }

    #[must_use]
    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }

    /// Add one unit of a product.
    ///
    /// On storefront pages this also opens the sidebar and shows a toast.
    ///
    /// # Errors
    ///
    /// Returns the [`AddRejection`] for incomplete product data; nothing
    /// else happens in that case.
    #[instrument(skip(self, host))]
    pub fn add<H: PageHost>(
        &mut self,
        host: &mut H,
        input: &ProductInput,
    ) -> std::result::Result<AddOutcome, AddRejection> {
        let outcome = self.store.add(input).inspect_err(|rejection| {
            tracing::debug!(%rejection, "Ignoring add");
        })?;
        self.after_change(host);

        if self.page == PageKind::Storefront {
            self.sidebar.open(host);
            let name = input.name.as_deref().map_or("", str::trim);
            host.show_toast(&format!("{name} added to cart"), self.config.toast_ttl);
        }
        Ok(outcome)
    }

    #[instrument(skip(self, host))]
    pub fn increment<H: PageHost>(&mut self, host: &mut H, id: &ItemId) -> QuantityChange {
        let change = self.store.increment(id);
        if change.is_change() {
            self.after_change(host);
        }
        change
    }

    #[instrument(skip(self, host))]
    pub fn decrement<H: PageHost>(&mut self, host: &mut H, id: &ItemId) -> QuantityChange {
        let change = self.store.decrement(id);
        if change.is_change() {
            self.after_change(host);
        }
        change
    }

    #[instrument(skip(self, host))]
    pub fn remove<H: PageHost>(&mut self, host: &mut H, id: &ItemId) -> Option<LineItem> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            self.after_change(host);
        }
        removed
    }

    /// Empty the cart, asking first when configured to.
    ///
    /// Returns the number of line items removed, or `None` if declined.
    #[instrument(skip(self, host))]
    pub fn clear<H: PageHost>(&mut self, host: &mut H) -> Option<usize> {
        if self.config.confirm_clear && !host.confirm(CLEAR_CONFIRM_MESSAGE) {
            tracing::debug!("Clear declined");
            return None;
        }
        let removed = self.store.clear();
        self.after_change(host);
        Some(removed)
    }

    /// Run the checkout gate and carry out its decision.
    #[instrument(skip(self, host))]
    pub fn checkout<H: PageHost>(&mut self, host: &mut H) -> CheckoutDecision {
        let login = read_login_state(self.store.storage(), &self.config.keys);
        let return_to = host.location();
        let decision = evaluate(self.store.state(), login, &self.config.login_path, &return_to);

        match &decision {
            CheckoutDecision::Blocked { message } => host.alert(message),
            CheckoutDecision::RedirectToLogin { url } => {
                host.alert(LOGIN_REQUIRED_MESSAGE);
                if let Err(e) =
                    PendingCheckout::new(return_to).save(self.store.storage_mut(), &self.config.keys)
                {
                    tracing::warn!(error = %e, "Failed to record pending checkout");
                }
                host.navigate(url);
            }
            CheckoutDecision::ProceedToPayment => host.alert(PROCEED_MESSAGE),
        }
        tracing::info!(?decision, "Checkout requested");
        decision
    }

    /// Sign in, switch to the identity's cart and resume an interrupted
    /// checkout if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the sign-in cannot be stored or a view fails to
    /// render. A pending checkout that cannot be cleared is logged and left
    /// alone.
    #[instrument(skip(self, host))]
    pub fn login<H: PageHost>(
        &mut self,
        host: &mut H,
        identity: &UserIdentity,
        admin: bool,
    ) -> Result<LoginState> {
        let keys = &self.config.keys;
        self.login = auth::login(self.store.storage_mut(), keys, identity, admin)?;
        self.store.switch_key(&resolve_cart_key(keys, Some(identity)));

        apply_login_ui(host, self.login);
        self.render(host)?;

        match PendingCheckout::take(self.store.storage_mut(), &self.config.keys) {
            Ok(Some(pending)) => {
                tracing::info!(return_to = %pending.return_to, "Resuming checkout after sign-in");
                host.navigate(&pending.return_to);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to resume pending checkout"),
        }
        Ok(self.login)
    }

    /// Sign out and reload the page.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    #[instrument(skip(self, host))]
    pub fn logout<H: PageHost>(&mut self, host: &mut H) -> Result<()> {
        auth::logout(self.store.storage_mut(), &self.config.keys)?;
        self.login = LoginState::Guest;
        self.store.switch_key(&resolve_cart_key(&self.config.keys, None));
        host.alert(LOGOUT_MESSAGE);
        host.reload();
        Ok(())
    }

    /// Handle a click anywhere on the page.
    ///
    /// The outside-click rule for the sidebar is applied before the click's
    /// own action, so a control that opens the sidebar leaves it open.
    #[instrument(skip(self, doc))]
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> ClickOutcome {
        let action = classify(doc, target);
        if self.page == PageKind::Storefront {
            self.sidebar.handle_outside_click(doc, target);
        }
        let Some(action) = action else {
            return ClickOutcome::Ignored;
        };
        tracing::debug!(?action, "Recognized click");

        match action {
            ClickAction::AddToCart { product, buy_now } => match self.add(doc, &product) {
                Ok(outcome) => {
                    if buy_now && self.page == PageKind::Storefront {
                        self.sidebar.open(doc);
                    }
                    ClickOutcome::Added(outcome)
                }
                Err(rejection) => ClickOutcome::Rejected(rejection),
            },
            ClickAction::Increment { id } => ClickOutcome::Quantity(self.increment(doc, &id)),
            ClickAction::Decrement { id } => ClickOutcome::Quantity(self.decrement(doc, &id)),
            ClickAction::Remove { id } => ClickOutcome::Removed(self.remove(doc, &id)),
            ClickAction::OpenSidebar => ClickOutcome::Sidebar(self.sidebar.open(doc)),
            ClickAction::CloseSidebar => {
                self.sidebar.close(doc);
                ClickOutcome::Sidebar(false)
            }
            ClickAction::Checkout => ClickOutcome::Checkout(self.checkout(doc)),
            ClickAction::ClearCart => ClickOutcome::Cleared(self.clear(doc)),
            ClickAction::Filter { button, category } => {
                ClickOutcome::Filtered(apply_filter(doc, button, &category))
            }
            ClickAction::Logout => {
                if let Err(e) = self.logout(doc) {
                    tracing::error!(error = %e, "Logout failed");
                }
                ClickOutcome::LoggedOut
            }
            ClickAction::AdminAddProduct => ClickOutcome::ProductCard(
                add_product_from_form(doc, self.login, &self.config.static_base)
                    .map(|(_, item)| item.id),
            ),
        }
    }

    /// Re-render and wiggle the cart icon.
    fn after_change<H: PageHost>(&self, host: &mut H) {
        if let Err(e) = self.render(host) {
            tracing::error!(error = %e, "Failed to render cart");
        }
        if host.set_class(targets::CART_LINK, classes::CART_SHAKE, true) {
            host.schedule_class(SHAKE_DURATION, targets::CART_LINK, classes::CART_SHAKE, false);
        }
    }
}
