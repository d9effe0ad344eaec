// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-relative offset arithmetic.
//!
//! Layout engines report element boxes relative to the viewport. Converting to
//! document coordinates adds the page scroll and subtracts the root border
//! (`clientTop` / `clientLeft`), matching what the host's own layout would
//! report for an element in normal flow.

use kurbo::{Point, Rect, Vec2};

/// Converts a viewport-relative bounding box into a document-relative origin.
///
/// A missing box (no layout information) is treated as sitting at the
/// viewport origin, so the result degrades to `page_scroll - client_border`.
#[must_use]
pub fn page_offset(client_rect: Option<Rect>, page_scroll: Vec2, client_border: Vec2) -> Point {
    let origin = client_rect.map_or(Point::ZERO, |r| r.origin());
    origin + page_scroll - client_border
}

/// Scroll offset at which an element reaches its sticky `top`.
#[must_use]
pub fn start_threshold(element_top: f64, top: f64) -> f64 {
    element_top - top
}

/// Scroll offset at which a pinned element would overrun its parent's bottom
/// edge.
#[must_use]
pub fn end_threshold(parent_top: f64, parent_height: f64, element_height: f64, top: f64) -> f64 {
    parent_top + parent_height - element_height - top
}
