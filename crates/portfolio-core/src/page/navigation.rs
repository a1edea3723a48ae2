use super::{Page, PageEffect, ScrollBehavior, ScrollBlock};
use crate::document::PageDocument;
use tracing::{debug, trace};

/// Scroll offset past which the navbar switches to its compact style.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

impl Page {
    pub(super) fn update_navbar(&self, doc: &mut PageDocument, scroll_y: f64) {
        let Some(navbar) = doc.element_by_id("navbar") else {
            return;
        };
        if scroll_y > NAVBAR_SCROLL_THRESHOLD {
            doc.add_class(navbar, "scrolled");
        } else {
            doc.remove_class(navbar, "scrolled");
        }
        trace!(scroll_y, "Navbar style updated");
    }

    pub(super) fn handle_anchor_clicked(
        &self,
        doc: &PageDocument,
        href: &str,
        effects: &mut Vec<PageEffect>,
    ) {
        let Some(fragment) = href.strip_prefix('#') else {
            return;
        };
        effects.push(PageEffect::PreventDefault);
        if fragment.is_empty() {
            return;
        }
        match doc.element_by_id(fragment) {
            Some(target) => {
                debug!(href, "Scrolling to anchor");
                effects.push(PageEffect::ScrollIntoView {
                    target,
                    behavior: ScrollBehavior::Smooth,
                    block: ScrollBlock::Start,
                });
            }
            None => debug!(href, "Anchor target not on page"),
        }
    }
}
