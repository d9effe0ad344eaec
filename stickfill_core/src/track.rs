// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element tracking records.

use alloc::string::String;

use crate::style::px;

/// Placement of a tracked element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StickyState {
    /// In normal flow with its original inline style.
    #[default]
    Free,
    /// Pinned to the viewport at its declared `top`.
    Fixed,
    /// Scrolled past the end of its parent and anchored at the document
    /// position it had reached.
    Released,
}

/// Placeholder that keeps an element's height in flow while it is pinned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacer {
    /// Height of the tracked element at scan time.
    pub height: f64,
}

impl Spacer {
    /// Inline style for the placeholder block.
    #[must_use]
    pub fn style_text(&self) -> String {
        alloc::format!("position:static;display:block;height:{};", px(self.height))
    }
}

/// A sticky element and everything needed to move it between placements.
///
/// Thresholds and style texts are computed once, when the element is first
/// tracked. Later reflow (late images, font swaps) is not observed, so the
/// thresholds can go stale.
#[derive(Clone, Debug)]
pub struct TrackedElement<E> {
    pub(crate) element: E,
    pub(crate) parent: Option<E>,
    pub(crate) spacer: Spacer,
    pub(crate) spacer_node: Option<E>,
    pub(crate) spacer_attached: bool,
    pub(crate) start: f64,
    pub(crate) end: f64,
    pub(crate) original_style: Option<String>,
    pub(crate) fixed_style: String,
    pub(crate) state: StickyState,
}

impl<E> TrackedElement<E> {
    /// Returns the tracked element.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Returns the parent whose bottom edge bounds the pinned range.
    #[must_use]
    pub fn parent(&self) -> Option<&E> {
        self.parent.as_ref()
    }

    /// Returns the spacer description.
    #[must_use]
    pub fn spacer(&self) -> Spacer {
        self.spacer
    }

    /// Returns the spacer node, if the host could build one.
    #[must_use]
    pub fn spacer_node(&self) -> Option<&E> {
        self.spacer_node.as_ref()
    }

    /// Scroll offset above which the element pins.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Scroll offset beyond which the element is released.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Inline style restored when the element returns to normal flow.
    #[must_use]
    pub fn original_style(&self) -> Option<&str> {
        self.original_style.as_deref()
    }

    /// Inline style applied while pinned.
    #[must_use]
    pub fn fixed_style(&self) -> &str {
        &self.fixed_style
    }

    /// Returns the current placement.
    #[must_use]
    pub fn state(&self) -> StickyState {
        self.state
    }
}
