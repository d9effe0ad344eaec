// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use stickfill_core::trace::{
    ElementTrackedEvent, PassBeginEvent, PassEndEvent, RuleMatchedEvent, ScrollEvent,
    StyleSource, StylesheetEvent, StylesheetOutcome, TraceSink, TransitionEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_stylesheet(&mut self, e: &StylesheetEvent<'_>) {
        let _ = match e.source {
            StyleSource::Inline { index } => write!(self.writer, "[sheet] inline={index}"),
            StyleSource::Linked { href } => write!(self.writer, "[sheet] href={href}"),
        };
        let _ = match e.outcome {
            StylesheetOutcome::Scanned { tracked } => writeln!(self.writer, " tracked={tracked}"),
            StylesheetOutcome::Failed => writeln!(self.writer, " failed"),
        };
    }

    fn on_rule_matched(&mut self, e: &RuleMatchedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[rule] selector={:?} top={}px matches={}",
            e.selector, e.top, e.matches
        );
    }

    fn on_element_tracked(&mut self, e: &ElementTrackedEvent) {
        let _ = writeln!(
            self.writer,
            "[track] index={} start={:.1} end={:.1}",
            e.index, e.start, e.end
        );
    }

    fn on_scroll(&mut self, e: &ScrollEvent) {
        let _ = writeln!(
            self.writer,
            "[scroll] top={:.1}{}",
            e.scroll_top,
            if e.scheduled { " scheduled" } else { " coalesced" }
        );
    }

    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] pass={} top={:.1} tracked={}",
            e.pass_index, e.scroll_top, e.tracked
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] pass={} transitions={}",
            e.pass_index, e.transitions
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[transition] pass={} index={} {:?}->{:?} top={:.1}",
            e.pass_index, e.index, e.from, e.to, e.scroll_top
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickfill_core::track::StickyState;

    #[test]
    fn pretty_print_transition() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_transition(&TransitionEvent {
            pass_index: 3,
            index: 0,
            from: StickyState::Free,
            to: StickyState::Fixed,
            scroll_top: 100.0,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "[transition] pass=3 index=0 Free->Fixed top=100.0\n");
    }

    #[test]
    fn pretty_print_failed_sheet() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_stylesheet(&StylesheetEvent {
            source: StyleSource::Linked { href: "missing.css" },
            outcome: StylesheetOutcome::Failed,
        });
        sink.on_scroll(&ScrollEvent {
            scroll_top: 12.0,
            scheduled: false,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[sheet] href=missing.css failed"), "got: {output}");
        assert!(output.contains("[scroll] top=12.0 coalesced"), "got: {output}");
    }
}
