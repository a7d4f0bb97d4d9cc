// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Debug size accounting: checks that a packet routine moved exactly the bytes it declared.
//!
//! A window is opened with [`SizeAccounting::start`], every byte appended to or extracted from the
//! stream is counted against it, and [`SizeAccounting::finish`] checks the count reached zero.
//! Windows do not nest: starting a new one discards any open one.
//!
//! Without the `size-accounting` feature all of this compiles to nothing and `finish` always
//! succeeds.

use crate::error::EmptyResult;

#[cfg(feature = "size-accounting")]
use crate::error::StreamError;

#[cfg(feature = "size-accounting")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    expected_remaining: i64,
    context: &'static str,
}

/// The accounting state carried by a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeAccounting {
    #[cfg(feature = "size-accounting")]
    window: Option<Window>,
}

#[cfg(feature = "size-accounting")]
fn signed_len(len: usize) -> i64 {
    use std::convert::TryFrom;
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[cfg(feature = "size-accounting")]
impl SizeAccounting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window expecting `expected` bytes, replacing any open window.
    pub fn start(&mut self, expected: usize, context: &'static str) {
        if let Some(old) = self.window {
            tracing::warn!(
                context = old.context,
                remainder = old.expected_remaining,
                replaced_by = context,
                "discarding unclosed size accounting window"
            );
        }
        self.window = Some(Window {
            expected_remaining: signed_len(expected),
            context,
        });
    }

    /// Count `len` bytes against the open window, if any.
    pub fn record(&mut self, len: usize) {
        if let Some(window) = self.window.as_mut() {
            window.expected_remaining = window.expected_remaining.saturating_sub(signed_len(len));
        }
    }

    /// Close the window, checking that exactly the expected number of bytes was moved.
    ///
    /// The window is closed whether or not the check passes.
    pub fn finish(&mut self, context: &'static str) -> EmptyResult {
        let window = match self.window.take() {
            Some(window) => window,
            None => {
                tracing::warn!(context, "size accounting window closed but never opened");
                return Err(StreamError::WindowNotOpen { context });
            }
        };
        if window.expected_remaining != 0 {
            tracing::warn!(
                context,
                remainder = window.expected_remaining,
                "stream did not move the expected size"
            );
            return Err(StreamError::SizeMismatch {
                context,
                remainder: window.expected_remaining,
            });
        }
        Ok(())
    }

    /// Is a window currently open?
    pub fn is_open(&self) -> bool {
        self.window.is_some()
    }

    /// The label of the open window, if any.
    pub fn context(&self) -> Option<&'static str> {
        self.window.map(|w| w.context)
    }

    /// Bytes still expected by the open window: negative once it has been exceeded.
    pub fn expected_remaining(&self) -> Option<i64> {
        self.window.map(|w| w.expected_remaining)
    }
}

#[cfg(not(feature = "size-accounting"))]
impl SizeAccounting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window expecting `expected` bytes.
    ///
    /// Does nothing: built without the `size-accounting` feature.
    pub fn start(&mut self, _expected: usize, _context: &'static str) {}

    /// Count `len` bytes against the open window. Does nothing without `size-accounting`.
    pub fn record(&mut self, _len: usize) {}

    /// Close the window. Always succeeds without `size-accounting`.
    pub fn finish(&mut self, _context: &'static str) -> EmptyResult {
        Ok(())
    }

    /// Is a window currently open? Never, without `size-accounting`.
    pub fn is_open(&self) -> bool {
        false
    }

    /// The label of the open window: always `None` without `size-accounting`.
    pub fn context(&self) -> Option<&'static str> {
        None
    }

    /// Bytes still expected by the open window: always `None` without `size-accounting`.
    pub fn expected_remaining(&self) -> Option<i64> {
        None
    }
}


#[cfg(all(test, feature = "size-accounting"))]
mod tests {
    use super::*;

    #[test]
    fn exact() {
        let mut acct = SizeAccounting::new();
        acct.start(5, "exact");
        assert_eq!(acct.context(), Some("exact"));
        acct.record(1);
        acct.record(4);
        assert_eq!(acct.expected_remaining(), Some(0));
        assert!(acct.finish("exact").is_ok());
        assert!(!acct.is_open());
    }

    #[test]
    fn under_and_over() {
        let mut acct = SizeAccounting::new();
        acct.start(8, "under");
        acct.record(3);
        assert_eq!(
            acct.finish("under"),
            Err(StreamError::SizeMismatch {
                context: "under",
                remainder: 5
            })
        );

        acct.start(2, "over");
        acct.record(3);
        assert_eq!(acct.finish("over").unwrap_err().remainder(), Some(-1));
    }

    #[test]
    fn unmatched_end() {
        let mut acct = SizeAccounting::new();
        assert_eq!(
            acct.finish("nothing"),
            Err(StreamError::WindowNotOpen { context: "nothing" })
        );

        acct.start(0, "twice");
        assert!(acct.finish("twice").is_ok());
        assert!(acct.finish("twice").is_err());
    }

    #[test]
    fn restart_replaces() {
        let mut acct = SizeAccounting::new();
        acct.start(10, "first");
        acct.record(4);
        acct.start(2, "second");
        assert_eq!(acct.expected_remaining(), Some(2));
        acct.record(2);
        assert!(acct.finish("second").is_ok());
    }

    #[test]
    fn recording_without_window_is_ignored() {
        let mut acct = SizeAccounting::new();
        acct.record(100);
        assert_eq!(acct.expected_remaining(), None);
    }
}
