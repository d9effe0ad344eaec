// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event as an
//! owned [`RecordedEvent`], copying borrowed strings (selectors, hrefs) so
//! the recording outlives the stylesheet text it came from.

use stickfill_core::track::StickyState;
use stickfill_core::trace::{
    ElementTrackedEvent, PassBeginEvent, PassEndEvent, RuleMatchedEvent, ScrollEvent,
    StyleSource, StylesheetEvent, StylesheetOutcome, TraceSink, TransitionEvent,
};

/// Owned form of [`StyleSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedSource {
    /// The `index`-th inline `<style>` element.
    Inline(usize),
    /// A linked stylesheet by `href`.
    Linked(String),
}

impl From<StyleSource<'_>> for RecordedSource {
    fn from(source: StyleSource<'_>) -> Self {
        match source {
            StyleSource::Inline { index } => Self::Inline(index),
            StyleSource::Linked { href } => Self::Linked(href.to_owned()),
        }
    }
}

/// A recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A stylesheet was scanned or failed to load.
    Stylesheet {
        /// Where it came from.
        source: RecordedSource,
        /// What happened to it.
        outcome: StylesheetOutcome,
    },
    /// A sticky rule was found.
    RuleMatched {
        /// Rule selector.
        selector: String,
        /// Declared `top` offset.
        top: i32,
        /// Number of matching elements.
        matches: usize,
    },
    /// See [`ElementTrackedEvent`].
    ElementTracked(ElementTrackedEvent),
    /// See [`ScrollEvent`].
    Scroll(ScrollEvent),
    /// See [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// See [`PassEndEvent`].
    PassEnd(PassEndEvent),
    /// See [`TransitionEvent`].
    Transition(TransitionEvent),
}

/// A [`TraceSink`] that keeps every event in order.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Placement changes of record `index`, in order.
    pub fn transitions_of(&self, index: usize) -> impl Iterator<Item = (StickyState, StickyState)> + '_ {
        self.events.iter().filter_map(move |e| match e {
            RecordedEvent::Transition(t) if t.index == index => Some((t.from, t.to)),
            _ => None,
        })
    }
}

impl TraceSink for RecorderSink {
    fn on_stylesheet(&mut self, e: &StylesheetEvent<'_>) {
        self.events.push(RecordedEvent::Stylesheet {
            source: e.source.into(),
            outcome: e.outcome,
        });
    }

    fn on_rule_matched(&mut self, e: &RuleMatchedEvent<'_>) {
        self.events.push(RecordedEvent::RuleMatched {
            selector: e.selector.to_owned(),
            top: e.top,
            matches: e.matches,
        });
    }

    fn on_element_tracked(&mut self, e: &ElementTrackedEvent) {
        self.events.push(RecordedEvent::ElementTracked(*e));
    }

    fn on_scroll(&mut self, e: &ScrollEvent) {
        self.events.push(RecordedEvent::Scroll(*e));
    }

    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.events.push(RecordedEvent::PassBegin(*e));
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.events.push(RecordedEvent::PassEnd(*e));
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.events.push(RecordedEvent::Transition(*e));
    }
}
