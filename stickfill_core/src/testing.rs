// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`DocumentHost`] for unit tests.
//!
//! Elements are laid out at fixed document rectangles. Bounding boxes follow
//! the inline style the emulation writes: `position:fixed` elements sit at
//! their `top` in the viewport and `position:absolute` elements at their
//! `top` / `left` in the document.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::host::DocumentHost;
use crate::style::StyleText;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FakeId(usize);

#[derive(Debug)]
struct Node {
    parent: Option<FakeId>,
    rect: Rect,
    style: Option<String>,
    classes: Vec<String>,
    attached: bool,
    body: bool,
    before: Option<FakeId>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    nodes: Vec<Node>,
    selectors: Vec<(String, Vec<FakeId>)>,
    scroll_y: f64,
    border: f64,
    pub(crate) style_writes: usize,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds an attached element at the given document rectangle.
    pub(crate) fn add(&mut self, parent: Option<FakeId>, rect: Rect) -> FakeId {
        self.push(Node {
            parent,
            rect,
            style: None,
            classes: Vec::new(),
            attached: true,
            body: false,
            before: None,
        })
    }

    pub(crate) fn add_body(&mut self, rect: Rect) -> FakeId {
        let id = self.add(None, rect);
        self.nodes[id.0].body = true;
        id
    }

    /// Makes `selector` resolve to `ids`.
    pub(crate) fn bind(&mut self, selector: &str, ids: &[FakeId]) {
        self.selectors.push((selector.into(), ids.to_vec()));
    }

    pub(crate) fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub(crate) fn set_client_border(&mut self, border: f64) {
        self.border = border;
    }

    pub(crate) fn set_style(&mut self, id: FakeId, style: Option<&str>) {
        self.nodes[id.0].style = style.map(String::from);
    }

    pub(crate) fn style(&self, id: FakeId) -> Option<&str> {
        self.nodes[id.0].style.as_deref()
    }

    pub(crate) fn has_class(&self, id: FakeId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    pub(crate) fn is_attached_node(&self, id: FakeId) -> bool {
        self.nodes[id.0].attached
    }

    /// Returns the node `id` was inserted before, if it is attached that way.
    pub(crate) fn inserted_before(&self, id: FakeId) -> Option<FakeId> {
        let node = &self.nodes[id.0];
        node.attached.then_some(node.before).flatten()
    }

    fn push(&mut self, node: Node) -> FakeId {
        self.nodes.push(node);
        FakeId(self.nodes.len() - 1)
    }

    fn styled_px(style: &StyleText, name: &str) -> Option<f64> {
        style.get(name)?.strip_suffix("px")?.parse().ok()
    }
}

impl DocumentHost for FakeHost {
    type Element = FakeId;

    fn query_selector_all(&self, selector: &str) -> Vec<FakeId> {
        self.selectors
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, ids)| ids.clone())
            .unwrap_or_default()
    }

    fn parent(&self, element: &FakeId) -> Option<FakeId> {
        self.nodes[element.0].parent
    }

    fn is_body(&self, element: &FakeId) -> bool {
        self.nodes[element.0].body
    }

    fn is_attached(&self, element: &FakeId) -> bool {
        self.nodes[element.0].attached
    }

    fn offset_origin(&self, element: &FakeId) -> Point {
        self.nodes[element.0].rect.origin()
    }

    fn offset_size(&self, element: &FakeId) -> Size {
        self.nodes[element.0].rect.size()
    }

    fn bounding_client_rect(&self, element: &FakeId) -> Option<Rect> {
        let node = &self.nodes[element.0];
        let scroll = Vec2::new(0.0, self.scroll_y);
        let Some(style) = node.style.as_deref().map(StyleText::parse) else {
            return Some(node.rect - scroll);
        };

        let size = node.rect.size();
        let origin = match style.get("position") {
            Some("fixed") => Point::new(
                node.rect.x0,
                Self::styled_px(&style, "top").unwrap_or(node.rect.y0),
            ),
            Some("absolute") => Point::new(
                Self::styled_px(&style, "left").unwrap_or(node.rect.x0),
                Self::styled_px(&style, "top").unwrap_or(node.rect.y0),
            ) - scroll,
            _ => node.rect.origin() - scroll,
        };
        Some(Rect::from_origin_size(origin, size))
    }

    fn page_scroll(&self) -> Vec2 {
        Vec2::new(0.0, self.scroll_y)
    }

    fn client_border(&self) -> Vec2 {
        Vec2::new(self.border, self.border)
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_y
    }

    fn style_attribute(&self, element: &FakeId) -> Option<String> {
        self.nodes[element.0].style.clone()
    }

    fn set_style_attribute(&mut self, element: &FakeId, style: Option<&str>) {
        self.style_writes += 1;
        self.set_style(*element, style);
    }

    fn toggle_class(&mut self, element: &FakeId, class: &str, on: bool) {
        let classes = &mut self.nodes[element.0].classes;
        classes.retain(|c| c != class);
        if on {
            classes.push(class.into());
        }
    }

    fn create_spacer(&mut self, style: &str) -> Option<FakeId> {
        Some(self.push(Node {
            parent: None,
            rect: Rect::ZERO,
            style: Some(style.into()),
            classes: Vec::new(),
            attached: false,
            body: false,
            before: None,
        }))
    }

    fn insert_before(&mut self, node: &FakeId, reference: &FakeId) {
        let parent = self.nodes[reference.0].parent;
        let n = &mut self.nodes[node.0];
        n.attached = true;
        n.parent = parent;
        n.before = Some(*reference);
    }

    fn detach(&mut self, node: &FakeId) {
        let n = &mut self.nodes[node.0];
        n.attached = false;
        n.before = None;
    }
}
