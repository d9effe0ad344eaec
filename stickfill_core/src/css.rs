// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Textual scanning of stylesheet text for `position: sticky` rules.
//!
//! This is deliberately not a CSS parser. Text is normalized with
//! [`normalize`] and then split into `selector { declarations }` blocks by
//! [`scan`], which looks for the next `{` and the next `}` after it. The
//! following are known and accepted limitations:
//!
//! - **No nesting.** The first `}` closes a block, so the inner rules of
//!   `@media` and `@supports` blocks surface with the at-rule prelude as
//!   their "selector". Such selectors fail to resolve and are skipped.
//! - **No at-rule awareness.** At-rules are treated like any other prelude.
//! - **No string literals.** Braces or semicolons inside quoted strings are
//!   treated as structure.
//! - **Line comments.** `//` is stripped to the end of its line, which also
//!   truncates values such as `url(http://…)`.
//!
//! Matching is textual as well. [`CssRule::is_sticky`] looks for
//! `position:` followed by `sticky` and a terminating `;`.
//! [`CssRule::top_offset`] reads the integer prefix after the first `top:`.

use alloc::string::String;
use alloc::vec::Vec;

/// Selector used by feature-detection tooling for its own sticky test rule.
///
/// Rules scoped to it never produce tracked elements.
pub const SENTINEL_SELECTOR: &str = "#modernizr";

/// Strips comments and line breaks so rule blocks can be matched on a single
/// line.
///
/// Block comments (`/* … */`) are removed when they are closed; an unclosed
/// `/*` is kept verbatim. Line comments (`// …`) are removed up to, but not
/// including, the line terminator. Finally every `\n` and `\r` is dropped.
#[must_use]
pub fn normalize(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;

    while !rest.is_empty() {
        if let Some(body) = rest.strip_prefix("/*")
            && let Some(close) = body.find("*/")
        {
            rest = &body[close + 2..];
            continue;
        }
        if rest.starts_with("//") {
            let eol = rest.find(['\n', '\r']).unwrap_or(rest.len());
            rest = &rest[eol..];
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next()
            && c != '\n'
            && c != '\r'
        {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// One `selector { declarations }` block found by [`scan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CssRule<'a> {
    /// Selector text with surrounding whitespace trimmed.
    pub selector: &'a str,
    /// Raw text between the braces.
    pub declarations: &'a str,
}

impl CssRule<'_> {
    /// Returns `true` if the declarations set `position` to a sticky value.
    ///
    /// The check is case-insensitive and matches prefixed spellings such as
    /// `-webkit-sticky`. The declaration must be terminated by `;`.
    #[must_use]
    pub fn is_sticky(&self) -> bool {
        let Some(at) = find_ignore_ascii_case(self.declarations, "position:") else {
            return false;
        };
        let value = &self.declarations[at + "position:".len()..];
        find_ignore_ascii_case(value, "sticky")
            .is_some_and(|s| value[s + "sticky".len()..].contains(';'))
    }

    /// Returns the declared `top` offset in pixels.
    ///
    /// Reads the leading integer of the first `top:` value that is followed by
    /// a `;`. Absent or unparsable values yield `0`.
    #[must_use]
    pub fn top_offset(&self) -> i32 {
        let Some(at) = find_ignore_ascii_case(self.declarations, "top:") else {
            return 0;
        };
        let value = &self.declarations[at + "top:".len()..];
        value
            .find(';')
            .and_then(|end| parse_int_prefix(&value[..end]))
            .unwrap_or(0)
    }
}

/// Iterator over the rule blocks of normalized CSS text.
///
/// Created by [`scan`].
#[derive(Clone, Debug)]
pub struct Rules<'a> {
    rest: &'a str,
}

/// Scans normalized CSS text for rule blocks.
///
/// The input should already have been passed through [`normalize`].
#[must_use]
pub fn scan(css: &str) -> Rules<'_> {
    Rules { rest: css }
}

impl<'a> Iterator for Rules<'a> {
    type Item = CssRule<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let open = self.rest.find('{')?;
        let body = &self.rest[open + 1..];
        let close = body.find('}')?;

        let rule = CssRule {
            selector: self.rest[..open].trim(),
            declarations: &body[..close],
        };
        // Runs of closing braces are swallowed with the block.
        self.rest = body[close..].trim_start_matches('}');
        Some(rule)
    }
}

/// A sticky rule extracted from a stylesheet, ready for selector resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StickyRule {
    /// Selector to resolve against the document.
    pub selector: String,
    /// Declaration text of the rule.
    pub declarations: String,
    /// Declared `top` offset in pixels.
    pub top: i32,
}

/// Normalizes `css` and returns every sticky rule whose selector is not
/// `sentinel`.
#[must_use]
pub fn sticky_rules(css: &str, sentinel: &str) -> Vec<StickyRule> {
    let normalized = normalize(css);
    scan(&normalized)
        .filter(|rule| rule.is_sticky() && rule.selector != sentinel)
        .map(|rule| StickyRule {
            selector: rule.selector.into(),
            declarations: rule.declarations.into(),
            top: rule.top_offset(),
        })
        .collect()
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
///
/// `needle` must be ASCII, which keeps every match on a char boundary.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

/// Parses the integer prefix of `text` the way `parseInt` does for decimal
/// input: leading whitespace, an optional sign, then digits.
fn parse_int_prefix(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i32 = 0;
    let mut any = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        any = true;
        value = value.saturating_mul(10).saturating_add(i32::from(b - b'0'));
    }

    any.then_some(if negative { -value } else { value })
}
