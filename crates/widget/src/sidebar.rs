//! Cart sidebar visibility.

use crate::dom::{Document, NodeId};
use crate::host::{PageHost, classes, targets};

/// Open/closed state of the cart sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarToggle {
    open: bool,
}

impl SidebarToggle {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Show the sidebar. Returns `false` if the page has none.
    pub fn open<H: PageHost>(&mut self, host: &mut H) -> bool {
        let present = host.set_class(targets::SIDEBAR, classes::OPEN, true);
        self.open = present;
        present
    }

    /// Hide the sidebar.
    pub fn close<H: PageHost>(&mut self, host: &mut H) {
        host.set_class(targets::SIDEBAR, classes::OPEN, false);
        self.open = false;
    }

    /// Close the sidebar if `target` lies outside both the sidebar and the
    /// cart icon. Returns whether it closed.
    pub fn handle_outside_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        if !self.open {
            return false;
        }
        let Some(sidebar) = doc.by_id(targets::SIDEBAR) else {
            return false;
        };
        let on_icon = doc
            .by_id(targets::CART_LINK)
            .is_some_and(|link| doc.contains(link, target));
        if doc.contains(sidebar, target) || on_icon {
            return false;
        }
        self.close(doc);
        true
    }
}
