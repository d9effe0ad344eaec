// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing of inline `style` attribute text.
//!
//! [`StyleText`] is a flat list of `name:value` declarations. It is only as
//! smart as the emulation needs: segments are split on `;` and then on the
//! first `:`, so values containing `;` (inside strings or `url()`) are not
//! preserved.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A single `name:value` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, trimmed.
    pub name: String,
    /// Property value, trimmed.
    pub value: String,
}

/// An ordered list of inline style declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleText {
    declarations: Vec<Declaration>,
}

impl StyleText {
    /// Parses declaration text such as `position: sticky; top: 10px`.
    ///
    /// Segments without a `:` or with an empty name are dropped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let declarations = text
            .split(';')
            .filter_map(|segment| {
                let (name, value) = segment.split_once(':')?;
                let name = name.trim();
                (!name.is_empty()).then(|| Declaration {
                    name: name.into(),
                    value: value.trim().into(),
                })
            })
            .collect();
        Self { declarations }
    }

    /// Returns the declarations in source order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Returns the value of the last declaration of `name`, if any.
    ///
    /// Names are compared ASCII case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.value.as_str())
    }

    /// Sets `name` to `value`.
    ///
    /// Every existing declaration of `name` is rewritten in place; if there is
    /// none, a declaration is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut found = false;
        for d in &mut self.declarations {
            if d.name.eq_ignore_ascii_case(name) {
                d.value = value.into();
                found = true;
            }
        }
        if !found {
            self.declarations.push(Declaration {
                name: name.into(),
                value: value.into(),
            });
        }
    }
}

impl fmt::Display for StyleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.declarations {
            write!(f, "{}:{};", d.name, d.value)?;
        }
        Ok(())
    }
}

/// Formats a pixel length, e.g. `120px` or `10.5px`.
#[must_use]
pub fn px(value: f64) -> String {
    alloc::format!("{value}px")
}
