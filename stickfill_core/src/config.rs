// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emulation settings.

use crate::css::SENTINEL_SELECTOR;

/// What to do with the per-element spacer while an element is out of flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpacerMode {
    /// Build the spacer but never attach it.
    ///
    /// Content below a pinned element moves up by the element's height while
    /// it is pinned.
    #[default]
    Detached,
    /// Insert the spacer before the element while it is pinned or released,
    /// and remove it when the element returns to normal flow.
    Inserted,
}

/// Configuration for the [`StickyCoordinator`](crate::coordinator::StickyCoordinator).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StickyConfig {
    /// Class added to an element while it is pinned.
    pub marker_class: &'static str,
    /// Selector whose rules are never tracked.
    pub sentinel_selector: &'static str,
    /// Delay for the timer fallback when refresh-synchronized scheduling is
    /// unavailable, in milliseconds.
    pub fallback_delay_ms: i32,
    /// Spacer handling.
    pub spacer: SpacerMode,
}

impl StickyConfig {
    /// Default configuration for browsers.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            marker_class: "stuck",
            sentinel_selector: SENTINEL_SELECTOR,
            fallback_delay_ms: 15,
            spacer: SpacerMode::Detached,
        }
    }
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self::web()
    }
}
