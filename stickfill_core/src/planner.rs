// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold and style planning for newly matched elements.

use alloc::string::ToString;

use crate::css::StickyRule;
use crate::geometry::{end_threshold, start_threshold};
use crate::host::DocumentHost;
use crate::style::{StyleText, px};
use crate::track::{Spacer, StickyState, TrackedElement};

/// Builds the tracking record for `element` matched by `rule`.
///
/// The element and its parent are measured once, here. The pinned style is
/// the rule's declarations with `position` rewritten to `fixed` plus an
/// explicit pixel width and height, so the element keeps its box when it
/// leaves normal flow.
///
/// Apart from building a detached spacer node, the document is not touched.
pub fn plan<H: DocumentHost>(
    host: &mut H,
    element: H::Element,
    rule: &StickyRule,
) -> TrackedElement<H::Element> {
    let top = f64::from(rule.top);
    let size = host.offset_size(&element);
    let element_top = host.document_offset(&element).y;

    let parent = host.parent(&element);
    let (parent_top, parent_height) = parent.as_ref().map_or((0.0, 0.0), |p| {
        (host.document_offset(p).y, host.offset_size(p).height)
    });

    let mut fixed = StyleText::parse(&rule.declarations);
    fixed.set("position", "fixed");
    fixed.set("width", &px(size.width));
    fixed.set("height", &px(size.height));

    let spacer = Spacer {
        height: size.height,
    };
    let spacer_node = host.create_spacer(&spacer.style_text());
    let original_style = host.style_attribute(&element);

    TrackedElement {
        start: start_threshold(element_top, top),
        end: end_threshold(parent_top, parent_height, size.height, top),
        element,
        parent,
        spacer,
        spacer_node,
        spacer_attached: false,
        original_style,
        fixed_style: fixed.to_string(),
        state: StickyState::Free,
    }
}
