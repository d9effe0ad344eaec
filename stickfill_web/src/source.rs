// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gathering stylesheet text from the document.
//!
//! Inline `<style>` text is read synchronously. Linked sheets are fetched
//! with a plain GET of their `href`; relative URLs resolve against the
//! document base the same way the browser resolves them for the link itself.

use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Response, Window};

/// Text of every `<style>` element, in document order.
///
/// Elements with no text content yield an empty string so that indices stay
/// aligned with the document.
#[must_use]
pub fn inline_styles(document: &Document) -> Vec<String> {
    let Ok(list) = document.query_selector_all("style") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|node| node.text_content().unwrap_or_default())
        .collect()
}

/// `href` of every `<link>` whose `rel` attribute is exactly `stylesheet`.
///
/// Links without an `href` are skipped.
#[must_use]
pub fn stylesheet_links(document: &Document) -> Vec<String> {
    let Ok(list) = document.query_selector_all("link") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i)?.dyn_into::<web_sys::Element>().ok())
        .filter(|link| is_stylesheet_rel(link.get_attribute("rel").as_deref()))
        .filter_map(|link| link.get_attribute("href"))
        .collect()
}

/// Case-sensitive, untrimmed match on the `rel` attribute.
fn is_stylesheet_rel(rel: Option<&str>) -> bool {
    rel == Some("stylesheet")
}

/// Fetches `href` and returns the response body as text.
///
/// Fails on network errors, non-2xx statuses, and bodies that are not text.
pub async fn fetch_text(window: &Window, href: &str) -> Result<String, JsValue> {
    let response = JsFuture::from(window.fetch_with_str(href)).await?;
    let response: Response = response.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_f64(f64::from(response.status())));
    }
    let body = JsFuture::from(response.text()?).await?;
    body.as_string()
        .ok_or_else(|| JsValue::from_str("stylesheet body is not text"))
}
