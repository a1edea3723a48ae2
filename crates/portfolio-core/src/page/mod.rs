//! Interactive behavior of the portfolio page.
//!
//! [`Page`] is a reducer over [`PageEvent`]s. It mutates the document
//! directly and returns [`PageEffect`]s for everything that needs the event
//! loop: timers, animation frames, scrolling and the file picker. The host
//! runs each effect and feeds follow-up events back in.

mod contact;
mod counters;
mod navigation;
mod profile;
mod reveal;

pub use contact::{FORM_MESSAGE_HIDE_DELAY, SUBMIT_DELAY};
pub use counters::{COUNTER_DURATION, COUNTER_STAGGER, FRAME_INTERVAL};
pub use profile::{PROFILE_IMAGE_ALT, SelectedFile, preview_data_url};

use crate::document::{ElementId, PageDocument, Rect};
use contact::FormDefaults;
use counters::{CounterAnimation, StatsTrigger};
use reveal::RevealObserver;
use std::time::Duration;
use tracing::debug;

/// Input delivered by the host's event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Scrolled { scroll_y: f64, viewport_height: f64 },
    AnchorClicked { href: String },
    CounterStart { counter: usize },
    AnimationFrame { counter: usize },
    CounterSettle { counter: usize },
    ProfileImageClicked,
    ProfileImageChosen(Option<SelectedFile>),
    ContactSubmitted,
    ContactSettled { name: String },
    HideFormMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
}

/// Work the host performs on the page's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEffect {
    PreventDefault,
    ScrollIntoView {
        target: ElementId,
        behavior: ScrollBehavior,
        block: ScrollBlock,
    },
    Schedule {
        delay: Duration,
        event: PageEvent,
    },
    RequestAnimationFrame(PageEvent),
    OpenFilePicker {
        accept: &'static str,
    },
    ResetForm {
        form: ElementId,
    },
}

#[derive(Debug, Clone)]
pub struct Page {
    reveal: RevealObserver,
    stats: StatsTrigger,
    counters: Vec<CounterAnimation>,
    form_defaults: FormDefaults,
}

impl Page {
    /// Wire the page up: observe every `.fade-in` element and the stats grid,
    /// and remember the contact form's initial values.
    pub fn new(doc: &PageDocument) -> Self {
        let page = Self {
            reveal: RevealObserver::observe(doc),
            stats: StatsTrigger::observe(doc),
            counters: Vec::new(),
            form_defaults: FormDefaults::capture(doc),
        };
        debug!(
            reveal_targets = page.reveal.pending(),
            stats = page.stats.is_armed(),
            "Page behaviors wired"
        );
        page
    }

    pub fn handle(&mut self, doc: &mut PageDocument, event: PageEvent) -> Vec<PageEffect> {
        let mut effects = Vec::new();
        match event {
            PageEvent::Scrolled {
                scroll_y,
                viewport_height,
            } => self.handle_scrolled(doc, scroll_y, viewport_height, &mut effects),
            PageEvent::AnchorClicked { href } => {
                self.handle_anchor_clicked(doc, &href, &mut effects)
            }
            PageEvent::CounterStart { counter } | PageEvent::AnimationFrame { counter } => {
                self.handle_counter_frame(doc, counter, &mut effects)
            }
            PageEvent::CounterSettle { counter } => self.handle_counter_settle(doc, counter),
            PageEvent::ProfileImageClicked => self.handle_profile_clicked(doc, &mut effects),
            PageEvent::ProfileImageChosen(file) => self.handle_profile_chosen(doc, file),
            PageEvent::ContactSubmitted => self.handle_contact_submitted(doc, &mut effects),
            PageEvent::ContactSettled { name } => {
                self.handle_contact_settled(doc, &name, &mut effects)
            }
            PageEvent::HideFormMessage => self.handle_hide_form_message(doc),
        }
        effects
    }

    fn handle_scrolled(
        &mut self,
        doc: &mut PageDocument,
        scroll_y: f64,
        viewport_height: f64,
        effects: &mut Vec<PageEffect>,
    ) {
        self.update_navbar(doc, scroll_y);
        let viewport = Viewport {
            top: scroll_y,
            height: viewport_height,
        };
        self.reveal.update(doc, viewport);
        if let Some(grid) = self.stats.check(doc, viewport) {
            self.start_counters(doc, grid, effects);
        }
    }
}

/// Visible slice of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Viewport {
    pub top: f64,
    pub height: f64,
}

impl Viewport {
    /// Share of `rect` inside the viewport after shrinking its bottom edge by
    /// `bottom_margin`. Zero-height boxes count as fully visible when they
    /// sit inside it.
    pub(crate) fn intersection_ratio(&self, rect: Rect, bottom_margin: f64) -> f64 {
        let top = self.top;
        let bottom = self.top + self.height - bottom_margin;
        if bottom <= top {
            return 0.0;
        }
        if rect.height <= 0.0 {
            return if rect.top >= top && rect.top <= bottom {
                1.0
            } else {
                0.0
            };
        }
        let visible = (rect.bottom().min(bottom) - rect.top.max(top)).max(0.0);
        (visible / rect.height).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_accounts_for_bottom_margin() {
        let viewport = Viewport {
            top: 0.0,
            height: 800.0,
        };
        assert_eq!(viewport.intersection_ratio(Rect::new(100.0, 200.0), 0.0), 1.0);
        assert_eq!(viewport.intersection_ratio(Rect::new(700.0, 100.0), 50.0), 0.5);
        assert_eq!(viewport.intersection_ratio(Rect::new(900.0, 100.0), 0.0), 0.0);
        assert_eq!(viewport.intersection_ratio(Rect::new(760.0, 0.0), 50.0), 0.0);
    }
}
