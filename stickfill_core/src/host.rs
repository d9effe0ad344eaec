// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for document integrations.
//!
//! The emulation logic in this crate never touches a DOM directly. Everything
//! it needs from the rendering environment goes through [`DocumentHost`]:
//!
//! - **Selection**: resolving selectors and walking to an element's parent.
//! - **Layout queries**: bounding boxes, layout sizes, page scroll and root
//!   border widths. Offsets are combined by [`DocumentHost::document_offset`]
//!   using [`geometry::page_offset`](crate::geometry::page_offset).
//! - **Mutation**: rewriting the inline `style` attribute, toggling the marker
//!   class and (optionally) inserting a spacer node.
//!
//! # Crate boundaries
//!
//! `stickfill_core` owns rule scanning, threshold planning and the state
//! machine. Backend crates (for example `stickfill_web`) implement this trait
//! over a live document and own event wiring, scheduling and stylesheet
//! fetching.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::geometry;

/// Layout queries and style mutation over a host document.
///
/// Both the browser backend and in-memory test doubles implement this trait,
/// so threshold planning and state transitions can be exercised without a
/// rendering environment.
pub trait DocumentHost {
    /// Handle to an element. Cloning must be cheap and must refer to the same
    /// node.
    type Element: Clone;

    /// Returns every element matching `selector`, in document order.
    ///
    /// Invalid selectors yield an empty list.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Returns the layout parent of `element`, if it has one.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Returns `true` if `element` is the document body.
    ///
    /// The body reports its offset directly instead of through its bounding
    /// box.
    fn is_body(&self, element: &Self::Element) -> bool;

    /// Returns `true` if `element` is connected to the document. Disconnected
    /// nodes have no meaningful offset.
    fn is_attached(&self, element: &Self::Element) -> bool {
        _ = element;
        true
    }

    /// Returns `offsetLeft` / `offsetTop`.
    fn offset_origin(&self, element: &Self::Element) -> Point;

    /// Returns `offsetWidth` / `offsetHeight`.
    fn offset_size(&self, element: &Self::Element) -> Size;

    /// Returns the viewport-relative bounding box, or `None` if the host
    /// cannot report one.
    fn bounding_client_rect(&self, element: &Self::Element) -> Option<Rect>;

    /// Returns the page scroll offset (`pageXOffset` / `pageYOffset`, falling
    /// back to the root element's scroll position).
    fn page_scroll(&self) -> Vec2;

    /// Returns the root border widths (`clientLeft` / `clientTop` of the root
    /// element, falling back to the body).
    fn client_border(&self) -> Vec2;

    /// Returns the vertical scroll offset reported by the root element, or by
    /// the body when the root reports zero.
    fn scroll_top(&self) -> f64;

    /// Returns the element's inline `style` attribute.
    fn style_attribute(&self, element: &Self::Element) -> Option<String>;

    /// Replaces the element's inline `style` attribute. `None` removes it.
    fn set_style_attribute(&mut self, element: &Self::Element, style: Option<&str>);

    /// Adds or removes `class` on the element.
    fn toggle_class(&mut self, element: &Self::Element, class: &str, on: bool);

    /// Builds a detached block element carrying `style` as its inline style.
    ///
    /// Returns `None` if the host cannot create nodes.
    fn create_spacer(&mut self, style: &str) -> Option<Self::Element>;

    /// Inserts `node` immediately before `reference`.
    fn insert_before(&mut self, node: &Self::Element, reference: &Self::Element);

    /// Removes `node` from its parent, if attached.
    fn detach(&mut self, node: &Self::Element);

    /// Returns the document-relative origin of `element`.
    ///
    /// Detached elements report the origin.
    fn document_offset(&self, element: &Self::Element) -> Point {
        if !self.is_attached(element) {
            return Point::ZERO;
        }
        if self.is_body(element) {
            return self.offset_origin(element);
        }
        geometry::page_offset(
            self.bounding_client_rect(element),
            self.page_scroll(),
            self.client_border(),
        )
    }
}
