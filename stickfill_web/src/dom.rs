// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`DocumentHost`] over a live browser document.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use stickfill_core::host::DocumentHost;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement, Node, Window};

/// Layout queries and style mutation against a [`Document`].
pub struct DomHost {
    window: Window,
    document: Document,
}

impl core::fmt::Debug for DomHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomHost")
            .field("document", &"Document")
            .finish_non_exhaustive()
    }
}

impl DomHost {
    /// Creates a host for the window's document.
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// Returns the window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Returns the document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn root_and_body(&self) -> (Option<Element>, Option<HtmlElement>) {
        (self.document.document_element(), self.document.body())
    }
}

fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

/// First non-zero of `values`, or zero.
fn first_nonzero(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().find(|v| *v != 0.0).unwrap_or(0.0)
}

impl DocumentHost for DomHost {
    type Element = Element;

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i)?.dyn_into::<Element>().ok())
            .collect()
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn is_body(&self, element: &Element) -> bool {
        self.document
            .body()
            .is_some_and(|body| body.unchecked_ref::<Element>() == element)
    }

    fn is_attached(&self, element: &Element) -> bool {
        element.is_connected()
    }

    fn offset_origin(&self, element: &Element) -> Point {
        as_html(element).map_or(Point::ZERO, |el| {
            Point::new(f64::from(el.offset_left()), f64::from(el.offset_top()))
        })
    }

    fn offset_size(&self, element: &Element) -> Size {
        as_html(element).map_or(Size::ZERO, |el| {
            Size::new(f64::from(el.offset_width()), f64::from(el.offset_height()))
        })
    }

    fn bounding_client_rect(&self, element: &Element) -> Option<Rect> {
        let r = element.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    fn page_scroll(&self) -> Vec2 {
        let root = self.document.document_element();
        let x = first_nonzero([
            self.window.page_x_offset().unwrap_or(0.0),
            root.as_ref().map_or(0.0, |r| f64::from(r.scroll_left())),
        ]);
        let y = first_nonzero([
            self.window.page_y_offset().unwrap_or(0.0),
            root.as_ref().map_or(0.0, |r| f64::from(r.scroll_top())),
        ]);
        Vec2::new(x, y)
    }

    fn client_border(&self) -> Vec2 {
        let (root, body) = self.root_and_body();
        let root = root.as_ref();
        let body = body.as_ref();
        Vec2::new(
            first_nonzero([
                root.map_or(0.0, |r| f64::from(r.client_left())),
                body.map_or(0.0, |b| f64::from(b.client_left())),
            ]),
            first_nonzero([
                root.map_or(0.0, |r| f64::from(r.client_top())),
                body.map_or(0.0, |b| f64::from(b.client_top())),
            ]),
        )
    }

    fn scroll_top(&self) -> f64 {
        let (root, body) = self.root_and_body();
        first_nonzero([
            root.map_or(0.0, |r| f64::from(r.scroll_top())),
            body.map_or(0.0, |b| f64::from(b.scroll_top())),
        ])
    }

    fn style_attribute(&self, element: &Element) -> Option<String> {
        element.get_attribute("style")
    }

    fn set_style_attribute(&mut self, element: &Element, style: Option<&str>) {
        _ = match style {
            Some(style) => element.set_attribute("style", style),
            None => element.remove_attribute("style"),
        };
    }

    fn toggle_class(&mut self, element: &Element, class: &str, on: bool) {
        let list = element.class_list();
        if on {
            _ = list.add_1(class);
        } else {
            _ = list.remove_1(class);
        }
    }

    fn create_spacer(&mut self, style: &str) -> Option<Element> {
        let span = self.document.create_element("span").ok()?;
        span.set_attribute("style", style).ok()?;
        Some(span)
    }

    fn insert_before(&mut self, node: &Element, reference: &Element) {
        let reference: &Node = reference;
        if let Some(parent) = reference.parent_node() {
            _ = parent.insert_before(node, Some(reference));
        }
    }

    fn detach(&mut self, node: &Element) {
        node.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::first_nonzero;

    #[test]
    fn first_nonzero_prefers_earlier_values() {
        assert_eq!(first_nonzero([0.0, 12.0, 4.0]), 12.0);
        assert_eq!(first_nonzero([3.0, 12.0]), 3.0);
        assert_eq!(first_nonzero([0.0, 0.0]), 0.0);
    }
}
