// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace output to the browser console.

use alloc::format;
use alloc::string::String;

use stickfill_core::trace::{
    ElementTrackedEvent, PassBeginEvent, PassEndEvent, RuleMatchedEvent, ScrollEvent,
    StyleSource, StylesheetEvent, StylesheetOutcome, TraceSink, TransitionEvent,
};
use wasm_bindgen::JsValue;

/// Writes one `console.debug` line per trace event.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    fn emit(line: &str) {
        web_sys::console::debug_1(&JsValue::from_str(line));
    }
}

fn source_label(source: StyleSource<'_>) -> String {
    match source {
        StyleSource::Inline { index } => format!("<style>#{index}"),
        StyleSource::Linked { href } => format!("<link href={href}>"),
    }
}

impl TraceSink for ConsoleSink {
    fn on_stylesheet(&mut self, e: &StylesheetEvent<'_>) {
        let source = source_label(e.source);
        let line = match e.outcome {
            StylesheetOutcome::Scanned { tracked } => {
                format!("[stickfill] sheet {source} tracked={tracked}")
            }
            StylesheetOutcome::Failed => format!("[stickfill] sheet {source} failed"),
        };
        Self::emit(&line);
    }

    fn on_rule_matched(&mut self, e: &RuleMatchedEvent<'_>) {
        Self::emit(&format!(
            "[stickfill] rule {:?} top={} matches={}",
            e.selector, e.top, e.matches
        ));
    }

    fn on_element_tracked(&mut self, e: &ElementTrackedEvent) {
        Self::emit(&format!(
            "[stickfill] track #{} start={} end={}",
            e.index, e.start, e.end
        ));
    }

    fn on_scroll(&mut self, e: &ScrollEvent) {
        let how = if e.scheduled { "scheduled" } else { "coalesced" };
        Self::emit(&format!("[stickfill] scroll top={} {how}", e.scroll_top));
    }

    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        Self::emit(&format!(
            "[stickfill] pass {} begin top={} tracked={}",
            e.pass_index, e.scroll_top, e.tracked
        ));
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        Self::emit(&format!(
            "[stickfill] pass {} end transitions={}",
            e.pass_index, e.transitions
        ));
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        Self::emit(&format!(
            "[stickfill] #{} {:?} -> {:?} at top={}",
            e.index, e.from, e.to, e.scroll_top
        ));
    }
}
