//! In-memory document model.
//!
//! A small element tree with just enough behaviour for the cart: lookup by id
//! and class, ancestor walks for click delegation, markup replacement (the
//! views' HTML is parsed back into elements so rendered controls can be
//! clicked), inline styles, and a virtual clock driving fire-and-forget
//! timers and toasts. It implements [`PageHost`], which makes it the page
//! used by tests and by the CLI.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::host::{PageHost, classes, targets};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img", "input", "link", "meta", "source"];

/// Handle to an element in a [`Document`].
///
/// Slots of removed elements are reused; a handle kept from before the
/// removal no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// One element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    /// Direct text, whitespace-collapsed.
    pub text: String,
    /// Markup last written with `set_html`, if any.
    pub inner_html: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    detached: bool,
    generation: u32,
}

impl Element {
    /// Create a detached element.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// A `data-*` attribute, treating empty values as absent.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&str> {
        self.attr(&format!("data-{name}")).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A notification currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Duration,
}

#[derive(Debug, Clone)]
enum TimerAction {
    Class { node: NodeId, class: String, enabled: bool },
    Style { node: NodeId, property: String, value: String },
}

impl TimerAction {
    const fn node(&self) -> NodeId {
        match self {
            Self::Class { node, .. } | Self::Style { node, .. } => *node,
        }
    }
}

#[derive(Debug, Clone)]
struct Timer {
    due: Duration,
    seq: u64,
    action: TimerAction,
}

/// An element tree plus the page-level state a browser would keep.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    free: Vec<usize>,
    location: String,
    clock: Duration,
    timers: Vec<Timer>,
    next_seq: u64,
    toasts: Vec<Toast>,
    alerts: Vec<String>,
    navigations: Vec<String>,
    reloads: usize,
    confirm_answer: bool,
    confirm_prompts: Vec<String>,
}

impl Document {
    /// An empty page at `location` with only a `<body>`.
    #[must_use]
    pub fn new(location: &str) -> Self {
        Self {
            nodes: vec![Element::new("body")],
            free: Vec::new(),
            location: location.to_string(),
            clock: Duration::ZERO,
            timers: Vec::new(),
            next_seq: 0,
            toasts: Vec::new(),
            alerts: Vec::new(),
            navigations: Vec::new(),
            reloads: 0,
            confirm_answer: true,
            confirm_prompts: Vec::new(),
        }
    }

    /// A storefront page: header with cart icon and badge, auth button,
    /// admin-only controls, and the cart sidebar with list, subtotal,
    /// checkout and clear controls.
    #[must_use]
    pub fn storefront(location: &str) -> Self {
        let mut doc = Self::new(location);
        let body = doc.body();

        let header = doc.append(body, Element::new("header"));
        let link = doc.append(
            header,
            Element::new("a").with_id(targets::CART_LINK).with_attr("href", "/cart/"),
        );
        doc.append(link, Element::new("span").with_id(targets::CART_COUNT).with_text("0"));
        doc.append(
            header,
            Element::new("a")
                .with_id(targets::AUTH_BTN)
                .with_attr("href", "/login/")
                .with_text("Log In"),
        );
        let admin_link = doc.append(
            header,
            Element::new("a").with_class(classes::ADMIN_LINK).with_attr("href", "/admin-dashboard/"),
        );
        doc.hide(admin_link);
        let admin_form = doc.append(body, Element::new("form").with_id(targets::ADMIN_FORM));
        for input in [targets::ADMIN_NAME, targets::ADMIN_PRICE, targets::ADMIN_IMAGE] {
            doc.append(admin_form, Element::new("input").with_id(input).with_attr("value", ""));
        }
        doc.append(
            admin_form,
            Element::new("button").with_id(targets::ADMIN_SUBMIT).with_text("Add Product"),
        );
        doc.hide(admin_form);
        doc.append(body, Element::new("div").with_id(targets::PRODUCT_SLIDER));

        let sidebar = doc.append(body, Element::new("aside").with_id(targets::SIDEBAR));
        doc.append(sidebar, Element::new("button").with_id(targets::CLOSE_CART).with_text("×"));
        doc.append(sidebar, Element::new("ul").with_id(targets::CART_ITEMS));
        doc.append(sidebar, Element::new("span").with_id(targets::TOTAL_PRICE).with_text("0.00"));
        doc.append(
            sidebar,
            Element::new("button").with_class(classes::CHECKOUT).with_text("Checkout"),
        );
        doc.append(
            sidebar,
            Element::new("button").with_class(classes::CLEAR_CART).with_text("Clear"),
        );
        doc
    }

    /// Add the dedicated cart page container to the body.
    #[must_use]
    pub fn with_cart_page(mut self) -> Self {
        let body = self.body();
        self.append(body, Element::new("div").with_id(targets::CART_PAGE));
        self
    }

    /// Append a product card with "add to cart" and "buy now" buttons.
    ///
    /// Returns `(card, add_button, buy_button)`.
    pub fn add_product_card(
        &mut self,
        parent: NodeId,
        id: Option<&str>,
        name: &str,
        price: &str,
        image: &str,
        category: &str,
    ) -> (NodeId, NodeId, NodeId) {
        let mut card = Element::new("div")
            .with_class(classes::PRODUCT_CARD)
            .with_attr("data-name", name)
            .with_attr("data-price", price)
            .with_attr("data-img", image)
            .with_attr("data-category", category);
        if let Some(id) = id {
            card = card.with_attr("data-id", id);
        }
        let card = self.append(parent, card);
        self.fill_product_card(card, name)
    }

    /// Insert a product card as the first child of `parent`.
    ///
    /// Returns `(card, add_button, buy_button)`.
    pub fn prepend_product_card(
        &mut self,
        parent: NodeId,
        name: &str,
        price: &str,
        image: &str,
    ) -> (NodeId, NodeId, NodeId) {
        let card = Element::new("div")
            .with_class(classes::PRODUCT_CARD)
            .with_attr("data-name", name)
            .with_attr("data-price", price)
            .with_attr("data-img", image);
        let card = self.append(parent, card);
        if let Some(el) = self.element_mut(parent) {
            el.children.retain(|child| *child != card);
            el.children.insert(0, card);
        }
        self.fill_product_card(card, name)
    }

    fn fill_product_card(&mut self, card: NodeId, name: &str) -> (NodeId, NodeId, NodeId) {
        let info = self.append(card, Element::new("div").with_class("pro-info"));
        self.append(info, Element::new("h4").with_text(name));
        let add = self.append(
            info,
            Element::new("button").with_class(classes::ADD_TO_CART).with_text("Add to Cart"),
        );
        let buy = self.append(
            info,
            Element::new("button").with_class(classes::BUY_NOW).with_text("Buy Now"),
        );
        (card, add, buy)
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: 0,
        }
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let index = self.free.pop().unwrap_or(self.nodes.len());
        let generation = self
            .nodes
            .get(index)
            .map_or(0, |old| old.generation.wrapping_add(1));
        element.parent = Some(parent);
        element.children.clear();
        element.detached = false;
        element.generation = generation;
        match self.nodes.get_mut(index) {
            Some(slot) => *slot = element,
            None => self.nodes.push(element),
        }

        let id = NodeId { index, generation };
        if let Some(parent) = self.element_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        live(&self.nodes, node)
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes
            .get_mut(node.index)
            .filter(|el| !el.detached && el.generation == node.generation)
    }

    /// Attached elements in document order.
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.body()];
        while let Some(node) = stack.pop() {
            let Some(el) = self.element(node) else {
                continue;
            };
            order.push(node);
            stack.extend(el.children.iter().rev().copied());
        }
        order
    }

    /// First element with the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|node| self.element(*node).and_then(|el| el.id.as_deref()) == Some(id))
    }

    /// Every element carrying `class`, in document order.
    #[must_use]
    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|node| self.element(*node).is_some_and(|el| el.has_class(class)))
            .collect()
    }

    /// Nearest element, starting at `node` itself, that satisfies `pred`.
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let el = self.element(id)?;
            if pred(el) {
                return Some(id);
            }
            current = el.parent;
        }
        None
    }

    /// Whether `node` is `ancestor` or inside it.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.closest(node, |_| true).is_some()
            && std::iter::successors(Some(node), |id| self.element(*id).and_then(Element::parent))
                .any(|id| id == ancestor)
    }

    /// Set the `value` of the form control with the given id.
    pub fn set_value(&mut self, id: &str, value: &str) -> bool {
        let Some(el) = self.by_id(id).and_then(|node| self.element_mut(node)) else {
            return false;
        };
        el.attrs.insert("value".to_string(), value.to_string());
        true
    }

    /// Current `value` of the form control with the given id.
    #[must_use]
    pub fn value(&self, id: &str) -> Option<&str> {
        self.by_id(id)
            .and_then(|node| self.element(node))
            .and_then(|el| el.attr("value"))
    }

    /// Text of `node` and all of its descendants, space separated.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(node, &mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, node: NodeId, parts: &mut Vec<String>) {
        let Some(el) = self.element(node) else {
            return;
        };
        if !el.text.is_empty() {
            parts.push(el.text.clone());
        }
        for child in &el.children {
            self.collect_text(*child, parts);
        }
    }

    fn hide(&mut self, node: NodeId) {
        if let Some(el) = self.element_mut(node) {
            el.styles.insert("display".to_string(), "none".to_string());
        }
    }

    /// Remove every descendant of `node` and free their slots, along with
    /// any timers that target them.
    fn release_children(&mut self, node: NodeId) {
        let Some(el) = self.element_mut(node) else {
            return;
        };
        let mut stack = std::mem::take(&mut el.children);
        let released = stack.len();
        while let Some(child) = stack.pop() {
            if let Some(el) = self.element_mut(child) {
                stack.append(&mut el.children);
                *el = Element {
                    detached: true,
                    generation: el.generation,
                    ..Element::default()
                };
                self.free.push(child.index);
            }
        }
        if released > 0 {
            let nodes = &self.nodes;
            self.timers.retain(|timer| live(nodes, timer.action.node()).is_some());
        }
    }

    /// Replace the children of `node` with elements parsed from `html`.
    pub fn replace_html(&mut self, node: NodeId, html: &str) {
        self.release_children(node);
        if let Some(el) = self.element_mut(node) {
            el.text.clear();
            el.inner_html = Some(html.to_string());
        }
        self.parse_into(node, html);
    }

    fn parse_into(&mut self, root: NodeId, html: &str) {
        let mut stack = vec![root];
        let mut rest = html;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("<!--") {
                rest = after.split_once("-->").map_or("", |(_, tail)| tail);
            } else if let Some(after) = rest.strip_prefix("</") {
                let (name, tail) = after.split_once('>').unwrap_or((after, ""));
                let name = name.trim().to_ascii_lowercase();
                while stack.len() > 1 {
                    let popped = stack.pop();
                    if popped
                        .and_then(|id| self.element(id))
                        .is_some_and(|el| el.tag == name)
                    {
                        break;
                    }
                }
                rest = tail;
            } else if rest.starts_with('<')
                && rest.chars().nth(1).is_some_and(|c| c.is_ascii_alphabetic())
            {
                let (source, tail) = rest
                    .get(1..)
                    .and_then(|s| s.split_once('>'))
                    .unwrap_or((rest, ""));
                let self_closing = source.trim_end().ends_with('/');
                let element = parse_tag(source.trim_end().trim_end_matches('/'));
                let is_void = VOID_ELEMENTS.contains(&element.tag.as_str());
                let parent = stack.last().copied().unwrap_or(root);
                let node = self.append(parent, element);
                if !self_closing && !is_void {
                    stack.push(node);
                }
                rest = tail;
            } else {
                let end = rest
                    .char_indices()
                    .skip(1)
                    .find(|(_, c)| *c == '<')
                    .map_or(rest.len(), |(i, _)| i);
                let (raw, tail) = rest.split_at(end);
                let text = collapse_whitespace(&unescape(raw));
                if !text.is_empty() {
                    let parent = stack.last().copied().unwrap_or(root);
                    if let Some(el) = self.element_mut(parent) {
                        if !el.text.is_empty() {
                            el.text.push(' ');
                        }
                        el.text.push_str(&text);
                    }
                }
                rest = tail;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Timers and page-level state
    // -------------------------------------------------------------------------

    fn push_timer(&mut self, delay: Duration, action: TimerAction) {
        self.timers.push(Timer {
            due: self.clock + delay,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Schedule an inline style change on `node`.
    pub fn schedule_style(&mut self, delay: Duration, node: NodeId, property: &str, value: &str) {
        self.push_timer(
            delay,
            TimerAction::Style {
                node,
                property: property.to_string(),
                value: value.to_string(),
            },
        );
    }

    /// Move the virtual clock forward, firing due timers in order and
    /// dismissing expired toasts. Returns the number of timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.clock + by;
        let mut fired = 0;
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= until)
                .min_by_key(|(_, t)| (t.due, t.seq))
                .map(|(index, _)| index);
            let Some(index) = next else {
                break;
            };
            let timer = self.timers.swap_remove(index);
            self.clock = timer.due;
            self.apply(timer.action);
            fired += 1;
        }
        self.clock = until;
        let now = self.clock;
        self.toasts.retain(|toast| toast.expires_at > now);
        fired
    }

    fn apply(&mut self, action: TimerAction) {
        match action {
            TimerAction::Class {
                node,
                class,
                enabled,
            } => {
                if let Some(el) = self.element_mut(node) {
                    if enabled {
                        el.classes.insert(class);
                    } else {
                        el.classes.remove(&class);
                    }
                }
            }
            TimerAction::Style {
                node,
                property,
                value,
            } => {
                if let Some(el) = self.element_mut(node) {
                    el.styles.insert(property, value);
                }
            }
        }
    }

    /// Timers not yet fired.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock
    }

    /// Toasts currently on screen.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Every blocking message shown so far.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Every navigation requested so far.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Number of reloads requested.
    #[must_use]
    pub const fn reloads(&self) -> usize {
        self.reloads
    }

    /// Answer given to future confirmation prompts.
    pub fn set_confirm_answer(&mut self, answer: bool) {
        self.confirm_answer = answer;
    }

    /// Every confirmation prompt shown so far.
    #[must_use]
    pub fn confirm_prompts(&self) -> &[String] {
        &self.confirm_prompts
    }
}

impl PageHost for Document {
    fn set_text(&mut self, target: &str, text: &str) -> bool {
        let Some(node) = self.by_id(target) else {
            return false;
        };
        self.release_children(node);
        if let Some(el) = self.element_mut(node) {
            el.text = text.to_string();
            el.inner_html = None;
        }
        true
    }

    fn set_html(&mut self, target: &str, html: &str) -> bool {
        let Some(node) = self.by_id(target) else {
            return false;
        };
        self.replace_html(node, html);
        true
    }

    fn set_class(&mut self, target: &str, class: &str, enabled: bool) -> bool {
        let Some(el) = self.by_id(target).and_then(|node| self.element_mut(node)) else {
            return false;
        };
        if enabled {
            el.classes.insert(class.to_string());
        } else {
            el.classes.remove(class);
        }
        true
    }

    fn set_attr(&mut self, target: &str, name: &str, value: &str) -> bool {
        let Some(el) = self.by_id(target).and_then(|node| self.element_mut(node)) else {
            return false;
        };
        el.attrs.insert(name.to_string(), value.to_string());
        true
    }

    fn set_style(&mut self, target: &str, property: &str, value: &str) -> bool {
        let Some(el) = self.by_id(target).and_then(|node| self.element_mut(node)) else {
            return false;
        };
        el.styles.insert(property.to_string(), value.to_string());
        true
    }

    fn set_style_by_class(&mut self, class: &str, property: &str, value: &str) -> usize {
        let nodes = self.by_class(class);
        for node in &nodes {
            if let Some(el) = self.element_mut(*node) {
                el.styles.insert(property.to_string(), value.to_string());
            }
        }
        nodes.len()
    }

    fn schedule_class(&mut self, delay: Duration, target: &str, class: &str, enabled: bool) {
        if let Some(node) = self.by_id(target) {
            self.push_timer(
                delay,
                TimerAction::Class {
                    node,
                    class: class.to_string(),
                    enabled,
                },
            );
        }
    }

    fn show_toast(&mut self, message: &str, ttl: Duration) {
        self.toasts.push(Toast {
            message: message.to_string(),
            expires_at: self.clock + ttl,
        });
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirm_prompts.push(message.to_string());
        self.confirm_answer
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
        self.location = url.to_string();
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

// =============================================================================
// Markup helpers
// =============================================================================

/// Build an element from the inside of a start tag (`li class="x" data-id="1"`).
fn live(nodes: &[Element], node: NodeId) -> Option<&Element> {
    nodes
        .get(node.index)
        .filter(|el| !el.detached && el.generation == node.generation)
}

fn parse_tag(source: &str) -> Element {
    let source = source.trim();
    let name_end = source.find(char::is_whitespace).unwrap_or(source.len());
    let (name, mut rest) = source.split_at(name_end);
    let mut element = Element::new(name);

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let key_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let (key, tail) = rest.split_at(key_end);
        let key = key.to_ascii_lowercase();
        let tail = tail.trim_start();

        let (value, tail) = if let Some(after_eq) = tail.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let inner = after_eq.get(1..).unwrap_or("");
                    inner.split_once(quote).unwrap_or((inner, ""))
                }
                _ => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    after_eq.split_at(end)
                }
            }
        } else {
            ("", tail)
        };
        rest = tail;

        if key.is_empty() {
            // Stray `=` or quote; skip a character to make progress.
            rest = rest.get(1..).unwrap_or("");
            continue;
        }
        let value = unescape(value);
        match key.as_str() {
            "id" => element.id = Some(value),
            "class" => element.classes.extend(value.split_whitespace().map(String::from)),
            "style" => {
                for declaration in value.split(';') {
                    if let Some((property, val)) = declaration.split_once(':') {
                        element
                            .styles
                            .insert(property.trim().to_string(), val.trim().to_string());
                    }
                }
            }
            _ => {
                element.attrs.insert(key, value);
            }
        }
    }
    element
}

/// Decode the character references the templates emit.
fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('&') {
        let (before, after) = rest.split_at(start);
        out.push_str(before);
        let decoded = after.get(1..).and_then(|body| {
            let (entity, tail) = body.split_once(';')?;
            let c = match entity {
                "amp" => '&',
                "lt" => '<',
                "gt" => '>',
                "quot" => '"',
                "apos" => '\'',
                "nbsp" => '\u{a0}',
                _ => {
                    let code = entity.strip_prefix('#')?;
                    let value = match code.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                        None => code.parse().ok()?,
                    };
                    char::from_u32(value)?
                }
            };
            Some((c, tail))
        });
        match decoded {
            Some((c, tail)) => {
                out.push(c);
                rest = tail;
            }
            None => {
                out.push('&');
                rest = after.get(1..).unwrap_or("");
            }
        }
    }
    out.push_str(rest);
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_skeleton() {
        let doc = Document::storefront("/shop/");
        for id in [
            targets::CART_LINK,
            targets::CART_COUNT,
            targets::SIDEBAR,
            targets::CART_ITEMS,
            targets::TOTAL_PRICE,
            targets::CLOSE_CART,
            targets::AUTH_BTN,
            targets::ADMIN_FORM,
        ] {
            assert!(doc.by_id(id).is_some(), "missing #{id}");
        }
        assert!(doc.by_id(targets::CART_PAGE).is_none());
        assert!(doc.with_cart_page().by_id(targets::CART_PAGE).is_some());
    }

    #[test]
    fn test_closest_and_contains() {
        let mut doc = Document::new("/");
        let body = doc.body();
        let (card, add, _) = doc.add_product_card(body, Some("sku1"), "Mat", "499", "mat.png", "yoga");

        let found = doc.closest(add, |el| el.has_class(classes::PRODUCT_CARD));
        assert_eq!(found, Some(card));
        assert!(doc.contains(card, add));
        assert!(doc.contains(add, add));
        assert!(!doc.contains(add, card));
        assert_eq!(doc.element(card).unwrap().data("id"), Some("sku1"));
    }

    #[test]
    fn test_replace_html_builds_elements() {
        let mut doc = Document::storefront("/");
        let html = r#"
            <li class="cart-item" data-id="a&#38;b">
                <img src="/static/x.png" alt="X">
                <h4>Tea &#60;Set&#62;</h4>
                <button class="qty-btn" data-action="increment" data-id="a&#38;b">+</button>
            </li>
            <!-- trailing comment -->
        "#;
        assert!(doc.set_html(targets::CART_ITEMS, html));

        let buttons = doc.by_class(classes::QTY_BTN);
        assert_eq!(buttons.len(), 1);
        let button = doc.element(buttons[0]).unwrap();
        assert_eq!(button.data("id"), Some("a&b"));
        assert_eq!(button.text, "+");

        let list = doc.by_id(targets::CART_ITEMS).unwrap();
        assert!(doc.text_content(list).contains("Tea <Set>"));
        let img = doc.walk().into_iter().find(|n| doc.element(*n).unwrap().tag == "img");
        assert_eq!(doc.element(img.unwrap()).unwrap().attr("src"), Some("/static/x.png"));
    }

    #[test]
    fn test_replacing_html_detaches_old_nodes() {
        let mut doc = Document::storefront("/");
        doc.set_html(targets::CART_ITEMS, r#"<li class="cart-item">A</li>"#);
        let old = doc.by_class("cart-item");
        doc.set_html(targets::CART_ITEMS, r#"<li class="cart-item">B</li>"#);

        assert!(doc.element(old[0]).is_none());
        let current = doc.by_class("cart-item");
        assert_eq!(current.len(), 1);
        assert_eq!(doc.element(current[0]).unwrap().text, "B");
    }

    #[test]
    fn test_rerendering_reuses_released_slots() {
        let mut doc = Document::storefront("/");
        let rows = r#"<li class="cart-item"><img src="a.png"><span>A</span></li>
            <li class="cart-item"><img src="b.png"><span>B</span></li>"#;
        doc.set_html(targets::CART_ITEMS, rows);
        let stale = doc.by_class("cart-item")[0];
        let allocated = doc.nodes.len();

        for _ in 0..200 {
            doc.set_html(targets::CART_ITEMS, rows);
        }
        assert_eq!(doc.nodes.len(), allocated);
        assert_eq!(doc.by_class("cart-item").len(), 2);
        assert!(doc.element(stale).is_none());

        doc.set_html(targets::CART_ITEMS, "");
        assert_eq!(doc.free.len(), 6);
        assert!(doc.by_class("cart-item").is_empty());
    }

    #[test]
    fn test_released_nodes_drop_their_timers() {
        let mut doc = Document::storefront("/");
        doc.set_html(targets::CART_ITEMS, r#"<li class="cart-item">A</li>"#);
        let row = doc.by_class("cart-item")[0];
        doc.schedule_style(Duration::from_millis(10), row, "opacity", "0");
        let list = doc.by_id(targets::CART_ITEMS).unwrap();
        doc.schedule_style(Duration::from_millis(10), list, "opacity", "1");

        doc.set_html(targets::CART_ITEMS, r#"<li class="cart-item">B</li>"#);
        assert_eq!(doc.pending_timers(), 1);
        assert_eq!(doc.advance(Duration::from_millis(20)), 1);
        let fresh = doc.by_class("cart-item")[0];
        assert_eq!(doc.element(fresh).unwrap().style("opacity"), None);
    }

    #[test]
    fn test_missing_targets_report_false() {
        let mut doc = Document::new("/gallery/");
        assert!(!doc.set_text(targets::CART_COUNT, "3"));
        assert!(!doc.set_html(targets::CART_ITEMS, "<li></li>"));
        assert!(!doc.set_class(targets::SIDEBAR, classes::OPEN, true));
    }

    #[test]
    fn test_timers_fire_in_order() {
        let mut doc = Document::storefront("/");
        let link = doc.by_id(targets::CART_LINK).unwrap();

        doc.set_class(targets::CART_LINK, classes::CART_SHAKE, true);
        doc.schedule_class(Duration::from_millis(400), targets::CART_LINK, classes::CART_SHAKE, false);
        doc.schedule_style(Duration::from_millis(10), link, "opacity", "1");

        assert_eq!(doc.advance(Duration::from_millis(100)), 1);
        assert_eq!(doc.element(link).unwrap().style("opacity"), Some("1"));
        assert!(doc.element(link).unwrap().has_class(classes::CART_SHAKE));

        assert_eq!(doc.advance(Duration::from_millis(300)), 1);
        assert!(!doc.element(link).unwrap().has_class(classes::CART_SHAKE));
        assert_eq!(doc.pending_timers(), 0);
    }

    #[test]
    fn test_toasts_expire() {
        let mut doc = Document::new("/");
        doc.show_toast("Mat added to cart", Duration::from_millis(2500));
        doc.advance(Duration::from_millis(2499));
        assert_eq!(doc.toasts().len(), 1);
        doc.advance(Duration::from_millis(1));
        assert!(doc.toasts().is_empty());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a &amp; b &#60;c&#x3E; &bogus; &"), "a & b <c> &bogus; &");
    }
}
