//! Category filter for product cards.
//!
//! Cards fade rather than pop: a shown card is laid out first and faded in a
//! tick later, a hidden card fades out and is removed from layout once the
//! transition has run.

use std::time::Duration;

use crate::dom::{Document, NodeId};
use crate::host::classes;

/// Filter value matching every card.
pub const ALL: &str = "all";

/// Delay between laying a card out and fading it in.
pub const SHOW_DELAY: Duration = Duration::from_millis(10);

/// Fade-out time before a card leaves the layout.
pub const HIDE_DELAY: Duration = Duration::from_millis(400);

/// Cards affected by one filter click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub shown: usize,
    pub hidden: usize,
}

/// Apply `category` from filter `button` to every product card.
pub fn apply_filter(doc: &mut Document, button: NodeId, category: &str) -> FilterOutcome {
    for other in doc.by_class(classes::FILTER_BTN) {
        if let Some(el) = doc.element_mut(other) {
            el.classes.remove(classes::ACTIVE);
        }
    }
    if let Some(el) = doc.element_mut(button) {
        el.classes.insert(classes::ACTIVE.to_string());
    }

    let mut outcome = FilterOutcome::default();
    for card in doc.by_class(classes::PRODUCT_CARD) {
        let matches = category == ALL
            || doc
                .element(card)
                .and_then(|el| el.attr("data-category"))
                .is_some_and(|c| c == category);
        let Some(el) = doc.element_mut(card) else {
            continue;
        };
        if matches {
            el.styles.insert("display".to_string(), "flex".to_string());
            doc.schedule_style(SHOW_DELAY, card, "opacity", "1");
            outcome.shown += 1;
        } else {
            el.styles.insert("opacity".to_string(), "0".to_string());
            doc.schedule_style(HIDE_DELAY, card, "display", "none");
            outcome.hidden += 1;
        }
    }
    tracing::debug!(category, shown = outcome.shown, hidden = outcome.hidden, "Applied filter");
    outcome
}
