use super::Viewport;
use crate::document::{ElementId, PageDocument};
use tracing::debug;

const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_BOTTOM_MARGIN: f64 = 50.0;

/// Adds `visible` to each `.fade-in` element the first time enough of it
/// scrolls into view. The class is never taken away again.
#[derive(Debug, Clone, Default)]
pub(super) struct RevealObserver {
    targets: Vec<ElementId>,
}

impl RevealObserver {
    pub(super) fn observe(doc: &PageDocument) -> Self {
        Self {
            targets: doc.elements_with_class("fade-in"),
        }
    }

    pub(super) fn pending(&self) -> usize {
        self.targets.len()
    }

    pub(super) fn update(&mut self, doc: &mut PageDocument, viewport: Viewport) {
        self.targets.retain(|&target| {
            let Some(rect) = doc.get(target).and_then(|element| element.layout) else {
                return true;
            };
            let ratio = viewport.intersection_ratio(rect, REVEAL_BOTTOM_MARGIN);
            if ratio > 0.0 && ratio >= REVEAL_THRESHOLD {
                doc.add_class(target, "visible");
                debug!(?target, ratio, "Revealed element");
                false
            } else {
                true
            }
        });
    }
}
