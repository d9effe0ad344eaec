// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ownership of the tracked set, the scroll cursor and the pending-pass gate.
//!
//! A [`StickyCoordinator`] is created once at startup and handed to every
//! callback that needs it. The backend drives it through three entry points:
//!
//! ```text
//!   stylesheet text ──► ingest_stylesheet() ──► scan ─► plan ─► tracked
//!
//!   scroll event ─────► on_scroll() ──► true? ──► schedule one refresh
//!                                                        │
//!                 ┌──────────────────────────────────────┘
//!                 ▼
//!   refresh tick ─────► run_pending() ──► transition/apply per record
//! ```
//!
//! Scroll notifications that arrive while a pass is pending only move the
//! cursor, so a pass always evaluates the most recent offset and runs at most
//! once per scheduled refresh.

use alloc::vec::Vec;

use crate::apply::{apply, transition};
use crate::config::StickyConfig;
use crate::css::sticky_rules;
use crate::feature::native_support;
use crate::host::DocumentHost;
use crate::planner::plan;
use crate::trace::{
    ElementTrackedEvent, PassBeginEvent, PassEndEvent, RuleMatchedEvent, ScrollEvent, Tracer,
    TransitionEvent,
};
use crate::track::TrackedElement;

/// Scroll-driven coordinator for all tracked elements of one document.
///
/// # Usage
///
/// ```rust,ignore
/// let mut coordinator = StickyCoordinator::new(StickyConfig::web());
/// coordinator.ingest_stylesheet(&mut host, css_text, &mut Tracer::none());
///
/// // On every scroll notification:
/// if coordinator.on_scroll(&host, &mut Tracer::none()) {
///     schedule_refresh(move || coordinator.run_pending(&mut host, &mut Tracer::none()));
/// }
/// ```
#[derive(Debug)]
pub struct StickyCoordinator<E> {
    config: StickyConfig,
    tracked: Vec<TrackedElement<E>>,
    last_known_scroll_top: f64,
    pending: bool,
    passes: u64,
}

impl<E: Clone> StickyCoordinator<E> {
    /// Creates a coordinator with nothing tracked.
    #[must_use]
    pub fn new(config: StickyConfig) -> Self {
        Self {
            config,
            tracked: Vec::new(),
            last_known_scroll_top: 0.0,
            pending: false,
            passes: 0,
        }
    }

    /// Creates a coordinator unless the host positions sticky elements
    /// itself.
    ///
    /// `accepts` is the check handed to [`native_support`]. When it accepts
    /// any spelling this returns `None`, and the caller should register no
    /// listeners and leave the document alone.
    #[must_use]
    pub fn unless_native(config: StickyConfig, accepts: impl FnMut(&str) -> bool) -> Option<Self> {
        native_support(accepts).is_none().then(|| Self::new(config))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StickyConfig {
        &self.config
    }

    /// Returns the tracked records in the order they were added.
    #[must_use]
    pub fn tracked(&self) -> &[TrackedElement<E>] {
        &self.tracked
    }

    /// Returns the most recent scroll offset.
    #[must_use]
    pub fn last_known_scroll_top(&self) -> f64 {
        self.last_known_scroll_top
    }

    /// Returns `true` if a pass has been requested but has not run yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the number of passes run so far.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Scans `css` for sticky rules and starts tracking every element they
    /// select.
    ///
    /// Returns the number of newly tracked elements. Rules whose selector is
    /// the configured sentinel, or which match nothing, add nothing.
    pub fn ingest_stylesheet<H>(&mut self, host: &mut H, css: &str, tracer: &mut Tracer<'_>) -> usize
    where
        H: DocumentHost<Element = E>,
    {
        let before = self.tracked.len();

        for rule in sticky_rules(css, self.config.sentinel_selector) {
            let elements = host.query_selector_all(&rule.selector);
            tracer.rule_matched(&RuleMatchedEvent {
                selector: &rule.selector,
                top: rule.top,
                matches: elements.len(),
            });

            for element in elements {
                let record = plan(host, element, &rule);
                tracer.element_tracked(&ElementTrackedEvent {
                    index: self.tracked.len(),
                    start: record.start(),
                    end: record.end(),
                });
                self.tracked.push(record);
            }
        }

        self.tracked.len() - before
    }

    /// Records the document's current scroll offset.
    ///
    /// Returns `true` if the caller must schedule exactly one call to
    /// [`run_pending`](Self::run_pending); `false` if a pass is already
    /// pending and will pick up the new offset.
    pub fn on_scroll<H>(&mut self, host: &H, tracer: &mut Tracer<'_>) -> bool
    where
        H: DocumentHost<Element = E>,
    {
        self.last_known_scroll_top = host.scroll_top();
        let scheduled = !self.pending;
        self.pending = true;
        tracer.scroll(&ScrollEvent {
            scroll_top: self.last_known_scroll_top,
            scheduled,
        });
        scheduled
    }

    /// Runs one applicator pass against the last known scroll offset and
    /// clears the pending flag.
    ///
    /// Returns the number of records whose placement changed.
    pub fn run_pending<H>(&mut self, host: &mut H, tracer: &mut Tracer<'_>) -> u32
    where
        H: DocumentHost<Element = E>,
    {
        let cursor = self.last_known_scroll_top;
        self.pending = false;
        let pass_index = self.passes;
        self.passes += 1;

        tracer.pass_begin(&PassBeginEvent {
            pass_index,
            scroll_top: cursor,
            tracked: self.tracked.len(),
        });

        let mut transitions = 0;
        for (index, record) in self.tracked.iter_mut().enumerate() {
            let from = record.state();
            let t = transition(from, cursor, record.start(), record.end());
            if apply(host, record, t, &self.config) {
                transitions += 1;
                tracer.transition(&TransitionEvent {
                    pass_index,
                    index,
                    from,
                    to: record.state(),
                    scroll_top: cursor,
                });
            }
        }

        tracer.pass_end(&PassEndEvent {
            pass_index,
            transitions,
        });
        transitions
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::testing::{FakeHost, FakeId};
    use crate::track::StickyState;

    const NAV_CSS: &str = "#nav { position: sticky; top: 10px; }";

    fn nav_page() -> (FakeHost, FakeId) {
        let mut host = FakeHost::new();
        let parent = host.add(None, Rect::new(0.0, 0.0, 800.0, 500.0));
        let nav = host.add(Some(parent), Rect::new(0.0, 50.0, 200.0, 90.0));
        host.bind("#nav", &[nav]);
        (host, nav)
    }

    fn scroll(c: &mut StickyCoordinator<FakeId>, host: &mut FakeHost, y: f64) {
        host.scroll_to(y);
        if c.on_scroll(host, &mut Tracer::none()) {
            c.run_pending(host, &mut Tracer::none());
        }
    }

    #[test]
    fn end_to_end_nav_example() {
        let (mut host, nav) = nav_page();
        let mut c = StickyCoordinator::new(StickyConfig::web());
        assert_eq!(c.ingest_stylesheet(&mut host, NAV_CSS, &mut Tracer::none()), 1);

        let record = &c.tracked()[0];
        assert_eq!((record.start(), record.end()), (40.0, 450.0));

        scroll(&mut c, &mut host, 100.0);
        assert_eq!(c.tracked()[0].state(), StickyState::Fixed);
        assert_eq!(
            host.style(nav),
            Some("position:fixed;top:10px;width:200px;height:40px;")
        );

        scroll(&mut c, &mut host, 460.0);
        assert_eq!(c.tracked()[0].state(), StickyState::Released);
        assert_eq!(
            host.style(nav),
            Some("position:absolute;top:470px;width:200px;height:40px;left:0px;")
        );

        scroll(&mut c, &mut host, 20.0);
        assert_eq!(c.tracked()[0].state(), StickyState::Free);
        assert_eq!(host.style(nav), None, "original inline style restored exactly");
    }

    #[test]
    fn fixes_exactly_once_while_inside_range() {
        let (mut host, _) = nav_page();
        let mut c = StickyCoordinator::new(StickyConfig::web());
        c.ingest_stylesheet(&mut host, NAV_CSS, &mut Tracer::none());

        scroll(&mut c, &mut host, 0.0);
        assert_eq!(host.style_writes, 0);
        scroll(&mut c, &mut host, 100.0);
        scroll(&mut c, &mut host, 200.0);
        scroll(&mut c, &mut host, 449.0);
        assert_eq!(host.style_writes, 1, "only the FREE to FIXED edge writes");
    }

    #[test]
    fn scroll_burst_coalesces_into_one_pass() {
        let (mut host, nav) = nav_page();
        let mut c = StickyCoordinator::new(StickyConfig::web());
        c.ingest_stylesheet(&mut host, NAV_CSS, &mut Tracer::none());

        let mut scheduled = 0;
        for y in [5.0, 60.0, 300.0, 20.0] {
            host.scroll_to(y);
            if c.on_scroll(&host, &mut Tracer::none()) {
                scheduled += 1;
            }
        }
        assert_eq!(scheduled, 1, "only the first notification schedules");
        assert!(c.is_pending());
        assert_eq!(c.last_known_scroll_top(), 20.0);

        assert_eq!(c.run_pending(&mut host, &mut Tracer::none()), 0);
        assert_eq!(c.passes(), 1);
        assert!(!c.is_pending());
        assert_eq!(host.style(nav), None, "stale offsets inside the range are discarded");

        host.scroll_to(100.0);
        assert!(c.on_scroll(&host, &mut Tracer::none()), "gate reopens after a pass");
    }

    #[test]
    fn native_support_yields_no_coordinator() {
        let mut tried = 0;
        let c = StickyCoordinator::<FakeId>::unless_native(StickyConfig::web(), |value| {
            tried += 1;
            value == "-webkit-sticky"
        });
        assert!(c.is_none(), "a native spelling disables emulation");
        assert_eq!(tried, 2);
    }

    #[test]
    fn missing_support_yields_idle_coordinator() {
        let c = StickyCoordinator::<FakeId>::unless_native(StickyConfig::web(), |_| false)
            .expect("no spelling accepted");
        assert!(c.tracked().is_empty());
        assert!(!c.is_pending());
        assert_eq!(c.passes(), 0);
        assert_eq!(c.config().marker_class, "stuck");
    }

    #[test]
    fn sentinel_rule_never_tracks() {
        let (mut host, nav) = nav_page();
        host.bind("#modernizr", &[nav]);
        let mut c = StickyCoordinator::new(StickyConfig::web());

        let css = "#modernizr { position: sticky; top: 10px; }";
        assert_eq!(c.ingest_stylesheet(&mut host, css, &mut Tracer::none()), 0);
        assert!(c.tracked().is_empty());
    }

    #[test]
    fn unmatched_and_non_sticky_rules_are_skipped() {
        let (mut host, _) = nav_page();
        let mut c = StickyCoordinator::new(StickyConfig::web());

        let css = ".missing { position: sticky; }\n#nav { position: relative; }";
        assert_eq!(c.ingest_stylesheet(&mut host, css, &mut Tracer::none()), 0);
    }

    #[test]
    fn selector_matching_many_elements_tracks_each() {
        let mut host = FakeHost::new();
        let body = host.add_body(Rect::new(0.0, 0.0, 800.0, 2000.0));
        let a = host.add(Some(body), Rect::new(0.0, 100.0, 800.0, 120.0));
        let b = host.add(Some(body), Rect::new(0.0, 900.0, 800.0, 920.0));
        host.bind("h2", &[a, b]);

        let mut c = StickyCoordinator::new(StickyConfig::web());
        let css = "/* headings */ h2 { position: -webkit-sticky; }";
        assert_eq!(c.ingest_stylesheet(&mut host, css, &mut Tracer::none()), 2);
        assert_eq!(c.tracked()[0].start(), 100.0, "missing top means zero offset");
        assert_eq!(c.tracked()[1].end(), 2000.0 - 20.0);
    }

    #[test]
    fn later_stylesheets_append() {
        let (mut host, _) = nav_page();
        let extra = host.add(None, Rect::new(0.0, 600.0, 100.0, 650.0));
        host.bind(".late", &[extra]);
        let mut c = StickyCoordinator::new(StickyConfig::web());

        c.ingest_stylesheet(&mut host, NAV_CSS, &mut Tracer::none());
        c.ingest_stylesheet(&mut host, ".late{position:sticky}", &mut Tracer::none());
        assert_eq!(c.tracked().len(), 1, "unterminated position is not sticky");

        c.ingest_stylesheet(&mut host, ".late{position:sticky;top:5px}", &mut Tracer::none());
        assert_eq!(c.tracked().len(), 2);
        assert_eq!(c.tracked()[1].start(), 600.0, "unterminated top counts as zero");
        assert_eq!(c.tracked()[0].start(), 40.0, "earlier records are untouched");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn pass_emits_transition_events() {
        use alloc::vec::Vec;

        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Transitions(Vec<(StickyState, StickyState)>);
        impl TraceSink for Transitions {
            fn on_transition(&mut self, e: &TransitionEvent) {
                self.0.push((e.from, e.to));
            }
        }

        let (mut host, _) = nav_page();
        let mut c = StickyCoordinator::new(StickyConfig::web());
        c.ingest_stylesheet(&mut host, NAV_CSS, &mut Tracer::none());

        let mut sink = Transitions::default();
        host.scroll_to(100.0);
        c.on_scroll(&host, &mut Tracer::none());
        c.run_pending(&mut host, &mut Tracer::new(&mut sink));
        assert_eq!(sink.0, [(StickyState::Free, StickyState::Fixed)]);
    }
}
