// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll-driven placement state machine.
//!
//! [`transition`] is the pure decision table; [`apply`] performs the matching
//! document mutation on one record.
//!
//! | current    | cursor `c`          | next       |
//! |------------|---------------------|------------|
//! | `Free`     | `start < c < end`   | `Fixed`    |
//! | `Fixed`    | `c < start`         | `Free`     |
//! | `Fixed`    | `c > end`           | `Released` |
//! | `Released` | `start < c < end`   | `Fixed`    |
//! | `Released` | `c <= start`        | `Free`     |
//!
//! Every other combination keeps the current placement. The comparisons are
//! strict on entry and on exit, so a cursor resting exactly on a threshold
//! never flips an element back and forth.

use crate::config::{SpacerMode, StickyConfig};
use crate::host::DocumentHost;
use crate::style::{StyleText, px};
use crate::track::{StickyState, TrackedElement};

/// What the applicator should do with one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Leave the element alone.
    Stay,
    /// Pin the element to the viewport.
    Fix,
    /// Return the element to normal flow.
    Restore,
    /// Anchor the element at its current document position.
    Release,
}

impl Transition {
    /// Placement after the transition, given the placement before.
    #[must_use]
    pub const fn target(self, from: StickyState) -> StickyState {
        match self {
            Self::Stay => from,
            Self::Fix => StickyState::Fixed,
            Self::Restore => StickyState::Free,
            Self::Release => StickyState::Released,
        }
    }
}

/// Decides the transition for a record in `state` at scroll offset `cursor`.
#[must_use]
pub fn transition(state: StickyState, cursor: f64, start: f64, end: f64) -> Transition {
    let inside = start < cursor && cursor < end;
    match state {
        StickyState::Free if inside => Transition::Fix,
        StickyState::Fixed if cursor < start => Transition::Restore,
        StickyState::Fixed if cursor > end => Transition::Release,
        StickyState::Released if inside => Transition::Fix,
        StickyState::Released if cursor <= start => Transition::Restore,
        _ => Transition::Stay,
    }
}

/// Applies `t` to `record`, mutating the document through `host`.
///
/// Returns `true` if the record's placement changed.
pub fn apply<H: DocumentHost>(
    host: &mut H,
    record: &mut TrackedElement<H::Element>,
    t: Transition,
    config: &StickyConfig,
) -> bool {
    let element = &record.element;
    match t {
        Transition::Stay => return false,
        Transition::Fix => {
            if config.spacer == SpacerMode::Inserted
                && !record.spacer_attached
                && let Some(spacer) = &record.spacer_node
            {
                host.insert_before(spacer, element);
                record.spacer_attached = true;
            }
            host.set_style_attribute(element, Some(&record.fixed_style));
            host.toggle_class(element, config.marker_class, true);
        }
        Transition::Restore => {
            if record.spacer_attached
                && let Some(spacer) = &record.spacer_node
            {
                host.detach(spacer);
                record.spacer_attached = false;
            }
            host.set_style_attribute(element, record.original_style.as_deref());
            if record.state == StickyState::Fixed {
                host.toggle_class(element, config.marker_class, false);
            }
        }
        Transition::Release => {
            // Measured while still pinned, so this is where the element is
            // on screen right now.
            let at = host.document_offset(element);
            let mut released = StyleText::parse(&record.fixed_style);
            released.set("position", "absolute");
            released.set("top", &px(at.y));
            released.set("left", &px(at.x));
            host.set_style_attribute(element, Some(&alloc::format!("{released}")));
            host.toggle_class(element, config.marker_class, false);
        }
    }
    record.state = t.target(record.state);
    true
}
