use super::{Page, PageEffect, PageEvent, Viewport};
use crate::document::{ElementId, PageDocument};
use std::time::Duration;
use tracing::{debug, warn};

pub const COUNTER_DURATION: Duration = Duration::from_millis(2500);
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Delay added per stat card so the counters start one after another.
pub const COUNTER_STAGGER: Duration = Duration::from_millis(200);
const SETTLE_DELAY: Duration = Duration::from_millis(200);
const STATS_THRESHOLD: f64 = 0.3;

/// Fires once when the stats grid is sufficiently visible.
#[derive(Debug, Clone, Default)]
pub(super) struct StatsTrigger {
    grid: Option<ElementId>,
}

impl StatsTrigger {
    pub(super) fn observe(doc: &PageDocument) -> Self {
        Self {
            grid: doc.elements_with_class("stats-grid").into_iter().next(),
        }
    }

    pub(super) fn is_armed(&self) -> bool {
        self.grid.is_some()
    }

    /// Returns the grid, and disarms, the first time it crosses the threshold.
    pub(super) fn check(&mut self, doc: &PageDocument, viewport: Viewport) -> Option<ElementId> {
        let grid = self.grid?;
        let rect = doc.get(grid)?.layout?;
        let ratio = viewport.intersection_ratio(rect, 0.0);
        if ratio > 0.0 && ratio >= STATS_THRESHOLD {
            self.grid = None;
            Some(grid)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct CounterAnimation {
    element: ElementId,
    target: i64,
    suffix: String,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    fn new(element: ElementId, target: i64, suffix: String) -> Self {
        let frames = COUNTER_DURATION.as_secs_f64() / FRAME_INTERVAL.as_secs_f64();
        Self {
            element,
            target,
            suffix,
            increment: target as f64 / frames,
            current: 0.0,
        }
    }
}

impl Page {
    pub(super) fn start_counters(
        &mut self,
        doc: &mut PageDocument,
        grid: ElementId,
        effects: &mut Vec<PageEffect>,
    ) {
        for element in doc.descendants_with_class(grid, "stat-number") {
            let Some(number) = doc.get(element) else {
                continue;
            };
            let Some(target) = number.attr("data-target").and_then(parse_leading_int) else {
                warn!(?element, "Stat counter has no numeric data-target; skipping");
                continue;
            };
            let suffix = number.attr("data-suffix").unwrap_or_default().to_string();
            let slot = doc
                .parent(element)
                .and_then(|card| doc.index_in_parent(card))
                .unwrap_or(0);

            doc.replace_text(element, "0");
            let counter = self.counters.len();
            self.counters
                .push(CounterAnimation::new(element, target, suffix));
            effects.push(PageEffect::Schedule {
                delay: COUNTER_STAGGER * slot as u32,
                event: PageEvent::CounterStart { counter },
            });
        }
        debug!(counters = self.counters.len(), "Stats grid visible; counters started");
    }

    pub(super) fn handle_counter_frame(
        &mut self,
        doc: &mut PageDocument,
        counter: usize,
        effects: &mut Vec<PageEffect>,
    ) {
        let Some(anim) = self.counters.get_mut(counter) else {
            return;
        };
        anim.current += anim.increment;
        if anim.current < anim.target as f64 {
            let text = format!("{}{}", anim.current.floor() as i64, anim.suffix);
            doc.replace_text(anim.element, &text);
            effects.push(PageEffect::RequestAnimationFrame(PageEvent::AnimationFrame {
                counter,
            }));
        } else {
            let text = format!("{}{}", anim.target, anim.suffix);
            doc.replace_text(anim.element, &text);
            doc.set_style(anim.element, "transform", "scale(1.1)");
            effects.push(PageEffect::Schedule {
                delay: SETTLE_DELAY,
                event: PageEvent::CounterSettle { counter },
            });
        }
    }

    pub(super) fn handle_counter_settle(&mut self, doc: &mut PageDocument, counter: usize) {
        if let Some(anim) = self.counters.get(counter) {
            doc.set_style(anim.element, "transform", "scale(1)");
        }
    }
}

/// Integer prefix of `raw` (after leading whitespace), e.g. `"150+"` → 150.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let digits_start = usize::from(trimmed.starts_with(['-', '+']));
    let end = trimmed[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |idx| idx + digits_start);
    if end == digits_start {
        return None;
    }
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Element, Rect};

    fn stats_page(cards: &[(&str, Option<&str>)]) -> PageDocument {
        let mut doc = PageDocument::new();
        let mut grid = Element::new("div");
        grid.attributes
            .insert("class".to_string(), "stats-grid".to_string());
        let grid = doc.append(doc.body(), grid);
        doc.set_layout(grid, Rect::new(1000.0, 300.0));
        for (target, suffix) in cards {
            let card = doc.append(grid, Element::new("div"));
            let mut number = Element::new("span");
            number
                .attributes
                .insert("class".to_string(), "stat-number".to_string());
            number
                .attributes
                .insert("data-target".to_string(), target.to_string());
            if let Some(suffix) = suffix {
                number
                    .attributes
                    .insert("data-suffix".to_string(), suffix.to_string());
            }
            doc.append(card, number);
        }
        doc
    }

    fn texts(doc: &PageDocument) -> Vec<String> {
        doc.elements_with_class("stat-number")
            .into_iter()
            .filter_map(|id| doc.get(id).map(|e| e.text.clone()))
            .collect()
    }

    fn scroll_to_stats(page: &mut Page, doc: &mut PageDocument) -> Vec<PageEffect> {
        page.handle(
            doc,
            PageEvent::Scrolled {
                scroll_y: 500.0,
                viewport_height: 800.0,
            },
        )
    }

    #[test]
    fn counters_start_staggered_once() {
        let mut doc = stats_page(&[("50", Some("+")), ("120", None)]);
        let mut page = Page::new(&doc);

        let effects = scroll_to_stats(&mut page, &mut doc);
        assert_eq!(
            effects,
            vec![
                PageEffect::Schedule {
                    delay: Duration::ZERO,
                    event: PageEvent::CounterStart { counter: 0 },
                },
                PageEffect::Schedule {
                    delay: Duration::from_millis(200),
                    event: PageEvent::CounterStart { counter: 1 },
                },
            ]
        );
        assert_eq!(texts(&doc), vec!["0", "0"]);

        assert!(scroll_to_stats(&mut page, &mut doc).is_empty());
    }

    #[test]
    fn grid_below_threshold_does_not_fire() {
        let mut doc = stats_page(&[("10", None)]);
        let mut page = Page::new(&doc);
        // Only 60px of 300px visible: 20%.
        let effects = page.handle(
            &mut doc,
            PageEvent::Scrolled {
                scroll_y: 260.0,
                viewport_height: 800.0,
            },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn counter_runs_to_target_and_settles() {
        let mut doc = stats_page(&[("150", Some("+"))]);
        let mut page = Page::new(&doc);
        scroll_to_stats(&mut page, &mut doc);

        let mut event = PageEvent::CounterStart { counter: 0 };
        let mut frames = 0;
        let settle = loop {
            let effects = page.handle(&mut doc, event.clone());
            match effects.as_slice() {
                [PageEffect::RequestAnimationFrame(next)] => {
                    frames += 1;
                    let text = texts(&doc)[0].clone();
                    assert!(text.ends_with('+'));
                    event = next.clone();
                }
                [PageEffect::Schedule { delay, event }] => {
                    assert_eq!(*delay, Duration::from_millis(200));
                    break event.clone();
                }
                other => panic!("unexpected effects: {other:?}"),
            }
        };

        assert!((150..=160).contains(&frames), "ran {frames} frames");
        assert_eq!(texts(&doc), vec!["150+"]);
        let number = doc.elements_with_class("stat-number")[0];
        assert_eq!(
            doc.get(number).and_then(|e| e.style("transform")),
            Some("scale(1.1)")
        );

        page.handle(&mut doc, settle);
        assert_eq!(
            doc.get(number).and_then(|e| e.style("transform")),
            Some("scale(1)")
        );
    }

    #[test]
    fn unparsable_target_is_skipped() {
        let mut doc = stats_page(&[("lots", None), ("7", Some("k"))]);
        let mut page = Page::new(&doc);
        let effects = scroll_to_stats(&mut page, &mut doc);
        assert_eq!(effects.len(), 1);
        assert_eq!(texts(&doc), vec![String::new(), "0".to_string()]);
    }

    #[test]
    fn leading_integer_parsing() {
        assert_eq!(parse_leading_int("150"), Some(150));
        assert_eq!(parse_leading_int("  98%"), Some(98));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("+"), None);
    }
}
