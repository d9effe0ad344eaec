// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule scanning and scroll-driven state machine for `position: sticky`
//! emulation.
//!
//! `stickfill_core` holds everything about the emulation that does not need a
//! browser. It is `no_std` compatible (with `alloc`) and talks to the
//! rendering environment only through the [`DocumentHost`](host::DocumentHost)
//! trait, so the whole pipeline can run against an in-memory document in
//! tests.
//!
//! # Architecture
//!
//! ```text
//!   stylesheet text
//!       │
//!       ▼
//!   css::sticky_rules() ──► host.query_selector_all() ──► planner::plan()
//!                                                              │
//!                 ┌────────────────────────────────────────────┘
//!                 ▼
//!   StickyCoordinator.tracked ◄── on_scroll() / run_pending()
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   apply::transition() ──► apply::apply() ──► host style/class mutation
//! ```
//!
//! **[`css`]**: Textual rule scanner. Finds `selector { … }` blocks that
//! declare a sticky position and reads their `top` offset.
//!
//! **[`planner`]**: Measures a matched element and its parent once and builds
//! its [`TrackedElement`](track::TrackedElement), with the start and end
//! thresholds and the pinned style text.
//!
//! **[`coordinator`]**: Owns the tracked set, the last known scroll offset and
//! the pending-pass gate that coalesces bursts of scroll events.
//!
//! **[`apply`]**: The `Free` / `Fixed` / `Released` transition table and the
//! mutations it drives.
//!
//! **[`host`]**: The [`DocumentHost`](host::DocumentHost) capability trait.
//!
//! **[`feature`]**: Native-support probing across vendor spellings.
//!
//! **[`style`]**, **[`geometry`]**: Inline style editing and document offset
//! arithmetic.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with a
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod apply;
pub mod config;
pub mod coordinator;
pub mod css;
pub mod feature;
pub mod geometry;
pub mod host;
pub mod planner;
pub mod style;
pub mod trace;
pub mod track;

#[cfg(test)]
mod testing;
