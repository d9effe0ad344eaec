// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for scanning and scroll handling.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! coordinator calls at each stage. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::track::StickyState;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Where a stylesheet's text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleSource<'a> {
    /// The `index`-th inline `<style>` element.
    Inline {
        /// Position among the document's `<style>` elements.
        index: usize,
    },
    /// A linked stylesheet.
    Linked {
        /// The link's `href`.
        href: &'a str,
    },
}

/// Outcome of reading one stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StylesheetOutcome {
    /// The text was scanned and `tracked` elements were added.
    Scanned {
        /// Number of newly tracked elements.
        tracked: usize,
    },
    /// The text could not be obtained; nothing was scanned.
    Failed,
}

/// Emitted once per stylesheet source.
#[derive(Clone, Copy, Debug)]
pub struct StylesheetEvent<'a> {
    /// Where the text came from.
    pub source: StyleSource<'a>,
    /// What happened to it.
    pub outcome: StylesheetOutcome,
}

/// Emitted for every sticky rule found by the scanner.
#[derive(Clone, Copy, Debug)]
pub struct RuleMatchedEvent<'a> {
    /// Rule selector.
    pub selector: &'a str,
    /// Declared `top` offset in pixels.
    pub top: i32,
    /// Number of elements the selector resolved to.
    pub matches: usize,
}

/// Emitted when an element starts being tracked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementTrackedEvent {
    /// Index of the record in the coordinator.
    pub index: usize,
    /// Start threshold in pixels.
    pub start: f64,
    /// End threshold in pixels.
    pub end: f64,
}

/// Emitted on every scroll notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    /// Scroll offset read from the document.
    pub scroll_top: f64,
    /// `true` if this notification scheduled a pass, `false` if it was
    /// coalesced into one already pending.
    pub scheduled: bool,
}

/// Marks the beginning of an applicator pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Cursor value the pass evaluates against.
    pub scroll_top: f64,
    /// Number of records walked.
    pub tracked: usize,
}

/// Marks the end of an applicator pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassEndEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Number of records whose placement changed.
    pub transitions: u32,
}

/// Emitted when a record changes placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionEvent {
    /// Pass in which the change happened.
    pub pass_index: u64,
    /// Index of the record in the coordinator.
    pub index: usize,
    /// Placement before.
    pub from: StickyState,
    /// Placement after.
    pub to: StickyState,
    /// Cursor value that triggered it.
    pub scroll_top: f64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the coordinator.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called once per stylesheet source.
    fn on_stylesheet(&mut self, e: &StylesheetEvent<'_>) {
        _ = e;
    }

    /// Called for every sticky rule found.
    fn on_rule_matched(&mut self, e: &RuleMatchedEvent<'_>) {
        _ = e;
    }

    /// Called when an element starts being tracked.
    fn on_element_tracked(&mut self, e: &ElementTrackedEvent) {
        _ = e;
    }

    /// Called on every scroll notification.
    fn on_scroll(&mut self, e: &ScrollEvent) {
        _ = e;
    }

    /// Called at the beginning of an applicator pass.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called at the end of an applicator pass.
    fn on_pass_end(&mut self, e: &PassEndEvent) {
        _ = e;
    }

    /// Called when a record changes placement.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! emit {
    ($self:ident, $method:ident, $e:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`StylesheetEvent`].
    #[inline]
    pub fn stylesheet(&mut self, e: &StylesheetEvent<'_>) {
        emit!(self, on_stylesheet, e);
    }

    /// Emits a [`RuleMatchedEvent`].
    #[inline]
    pub fn rule_matched(&mut self, e: &RuleMatchedEvent<'_>) {
        emit!(self, on_rule_matched, e);
    }

    /// Emits an [`ElementTrackedEvent`].
    #[inline]
    pub fn element_tracked(&mut self, e: &ElementTrackedEvent) {
        emit!(self, on_element_tracked, e);
    }

    /// Emits a [`ScrollEvent`].
    #[inline]
    pub fn scroll(&mut self, e: &ScrollEvent) {
        emit!(self, on_scroll, e);
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        emit!(self, on_pass_begin, e);
    }

    /// Emits a [`PassEndEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEndEvent) {
        emit!(self, on_pass_end, e);
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        emit!(self, on_transition, e);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transition() -> TransitionEvent {
        TransitionEvent {
            pass_index: 3,
            index: 0,
            from: StickyState::Free,
            to: StickyState::Fixed,
            scroll_top: 100.0,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_transition(&sample_transition());
        sink.on_scroll(&ScrollEvent {
            scroll_top: 0.0,
            scheduled: true,
        });
        sink.on_stylesheet(&StylesheetEvent {
            source: StyleSource::Linked { href: "a.css" },
            outcome: StylesheetOutcome::Failed,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.transition(&sample_transition());
        tracer.pass_end(&PassEndEvent {
            pass_index: 3,
            transitions: 1,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            passes: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_transition(&mut self, e: &TransitionEvent) {
                self.passes.push(e.pass_index);
            }
        }

        let mut sink = RecordingSink { passes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.transition(&sample_transition());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.passes, &[3]);
    }
}
