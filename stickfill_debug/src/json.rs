// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export`] writes the events collected by a
//! [`RecorderSink`](super::recorder::RecorderSink) as a JSON array, one
//! object per event, each tagged with an `"event"` name.

use std::io::{self, Write};

use serde_json::{Value, json};

use stickfill_core::trace::StylesheetOutcome;
use stickfill_core::track::StickyState;

use crate::recorder::{RecordedEvent, RecordedSource};

/// Writes `events` as a pretty-printed JSON array.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events.iter().map(to_value).collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

fn state_name(state: StickyState) -> &'static str {
    match state {
        StickyState::Free => "free",
        StickyState::Fixed => "fixed",
        StickyState::Released => "released",
    }
}

fn to_value(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Stylesheet { source, outcome } => {
            let source = match source {
                RecordedSource::Inline(index) => json!({ "inline": index }),
                RecordedSource::Linked(href) => json!({ "href": href }),
            };
            let tracked = match outcome {
                StylesheetOutcome::Scanned { tracked } => json!(tracked),
                StylesheetOutcome::Failed => Value::Null,
            };
            json!({
                "event": "stylesheet",
                "source": source,
                "ok": tracked.is_number(),
                "tracked": tracked,
            })
        }
        RecordedEvent::RuleMatched {
            selector,
            top,
            matches,
        } => json!({
            "event": "rule_matched",
            "selector": selector,
            "top": top,
            "matches": matches,
        }),
        RecordedEvent::ElementTracked(e) => json!({
            "event": "element_tracked",
            "index": e.index,
            "start": e.start,
            "end": e.end,
        }),
        RecordedEvent::Scroll(e) => json!({
            "event": "scroll",
            "scroll_top": e.scroll_top,
            "scheduled": e.scheduled,
        }),
        RecordedEvent::PassBegin(e) => json!({
            "event": "pass_begin",
            "pass": e.pass_index,
            "scroll_top": e.scroll_top,
            "tracked": e.tracked,
        }),
        RecordedEvent::PassEnd(e) => json!({
            "event": "pass_end",
            "pass": e.pass_index,
            "transitions": e.transitions,
        }),
        RecordedEvent::Transition(e) => json!({
            "event": "transition",
            "pass": e.pass_index,
            "index": e.index,
            "from": state_name(e.from),
            "to": state_name(e.to),
            "scroll_top": e.scroll_top,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use stickfill_core::trace::{
        PassBeginEvent, PassEndEvent, StyleSource, StylesheetEvent, TraceSink, TransitionEvent,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_stylesheet(&StylesheetEvent {
            source: StyleSource::Inline { index: 0 },
            outcome: StylesheetOutcome::Scanned { tracked: 1 },
        });
        rec.on_pass_begin(&PassBeginEvent {
            pass_index: 0,
            scroll_top: 100.0,
            tracked: 1,
        });
        rec.on_transition(&TransitionEvent {
            pass_index: 0,
            index: 0,
            from: StickyState::Free,
            to: StickyState::Fixed,
            scroll_top: 100.0,
        });
        rec.on_pass_end(&PassEndEvent {
            pass_index: 0,
            transitions: 1,
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 4);

        assert_eq!(parsed[0]["event"], "stylesheet");
        assert_eq!(parsed[0]["source"]["inline"], 0);
        assert_eq!(parsed[0]["ok"], true);
        assert_eq!(parsed[0]["tracked"], 1);

        assert_eq!(parsed[2]["event"], "transition");
        assert_eq!(parsed[2]["from"], "free");
        assert_eq!(parsed[2]["to"], "fixed");

        assert_eq!(parsed[3]["event"], "pass_end");
        assert_eq!(parsed[3]["transitions"], 1);
    }

    #[test]
    fn failed_sheet_has_no_count() {
        let mut rec = RecorderSink::new();
        rec.on_stylesheet(&StylesheetEvent {
            source: StyleSource::Linked { href: "x.css" },
            outcome: StylesheetOutcome::Failed,
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["source"]["href"], "x.css");
        assert_eq!(parsed[0]["ok"], false);
        assert!(parsed[0]["tracked"].is_null());
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
