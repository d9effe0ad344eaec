// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native support detection.
//!
//! Emulation only activates when none of the known spellings of the sticky
//! position value is accepted by the host's style engine.

/// Spellings of the sticky position value, tried in order.
pub const STICKY_SPELLINGS: [&str; 5] = [
    "sticky",
    "-webkit-sticky",
    "-ms-sticky",
    "-moz-sticky",
    "-o-sticky",
];

/// Returns the first spelling accepted by `accepts`, or `None` if the host
/// needs emulation.
///
/// `accepts` should assign the value to a scratch element's `position` and
/// report whether it read back non-empty. Probing stops at the first success.
pub fn native_support(mut accepts: impl FnMut(&str) -> bool) -> Option<&'static str> {
    STICKY_SPELLINGS.into_iter().find(|value| accepts(value))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn unsupported_host_tries_every_spelling() {
        let mut tried = Vec::new();
        let found = native_support(|v| {
            tried.push(String::from(v));
            false
        });
        assert_eq!(found, None);
        assert_eq!(tried, STICKY_SPELLINGS);
    }

    #[test]
    fn probing_stops_at_first_accepted_spelling() {
        let mut tried = 0;
        let found = native_support(|v| {
            tried += 1;
            v == "-webkit-sticky"
        });
        assert_eq!(found, Some("-webkit-sticky"));
        assert_eq!(tried, 2);
    }
}
