// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! A cursor over a caller-owned, fixed-size byte buffer.

use crate::{
    accounting::SizeAccounting,
    constants::UNLABELED_CONTEXT,
    dump::HexDump,
    error::{EmptyResult, StreamError, StreamResult},
    size::StreamValue,
};
use std::ops::Range;

/// A read/write position over a borrowed byte buffer.
///
/// Appends and extracts are bounds checked and all-or-nothing: a call that would move past the
/// end of the buffer returns `StreamError::BufferOverflow` and changes nothing.
/// The stream never allocates, frees, or zeroes the buffer it wraps.
///
/// ```
/// use packet_stream::Stream;
/// let mut storage = [0u8; 16];
/// let mut stream = Stream::new(&mut storage);
/// stream.debug_start(5, "build_hello");
/// stream.write(&1u8).unwrap();
/// stream.write(&0xdead_beef_u32).unwrap();
/// assert!(stream.debug_end("build_hello").is_ok());
/// assert_eq!(stream.position(), 5);
/// assert_eq!(stream.remaining(), 11);
/// ```
#[derive(Debug)]
pub struct Stream<'a> {
    buffer: &'a mut [u8],
    position: usize,
    accounting: SizeAccounting,
}

impl<'a> Stream<'a> {
    /// Bind a stream to `buffer`, positioned at its start.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            accounting: SizeAccounting::new(),
        }
    }

    /// Re-bind an existing stream to `buffer`, clearing position and any accounting window.
    ///
    /// The previously wrapped buffer is released untouched.
    pub fn init_in_place(&mut self, buffer: &'a mut [u8]) {
        *self = Self::new(buffer);
    }

    /// Total size of the wrapped buffer.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes written or consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes still available to append or extract.
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.position)
    }

    /// Move the position back to the start of the buffer. Contents are unchanged.
    pub fn reset_position(&mut self) {
        self.position = 0;
    }

    /// Move the position forward by `offset` without copying or accounting for any bytes.
    ///
    /// This is unchecked: the position may pass the end of the buffer, after which
    /// `remaining()` is zero and every append or extract fails with `BufferOverflow`.
    /// Debug builds assert that it stays in bounds.
    pub fn advance(&mut self, offset: usize) {
        debug_assert!(
            self.position.saturating_add(offset) <= self.capacity(),
            "advanced stream past capacity {} (position {}, offset {})",
            self.capacity(),
            self.position,
            offset
        );
        self.position = self.position.saturating_add(offset);
    }

    /// The whole buffer, from offset 0.
    pub fn base(&self) -> &[u8] {
        &*self.buffer
    }

    /// The whole buffer, from offset 0, for direct manipulation.
    pub fn base_mut(&mut self) -> &mut [u8] {
        &mut *self.buffer
    }

    /// The unconsumed part of the buffer, starting at the current position.
    ///
    /// Nothing is consumed: reconcile the position afterward with `advance` if needed.
    pub fn current(&self) -> &[u8] {
        self.buffer.get(self.position..).unwrap_or(&[])
    }

    /// Mutable view of the unconsumed part of the buffer.
    pub fn current_mut(&mut self) -> &mut [u8] {
        match self.buffer.get_mut(self.position..) {
            Some(rest) => rest,
            None => &mut [],
        }
    }

    /// Give back the wrapped buffer.
    pub fn into_inner(self) -> &'a mut [u8] {
        self.buffer
    }

    /// Check that `len` more bytes fit, returning the range they occupy.
    fn check_remaining(&self, len: usize) -> StreamResult<Range<usize>> {
        match self.position.checked_add(len) {
            Some(end) if end <= self.capacity() => Ok(self.position..end),
            _ => {
                let context = self.accounting.context().unwrap_or(UNLABELED_CONTEXT);
                tracing::warn!(
                    context,
                    capacity = self.capacity(),
                    position = self.position,
                    requested = len,
                    "stream overflow"
                );
                Err(StreamError::BufferOverflow {
                    context,
                    capacity: self.capacity(),
                    position: self.position,
                    requested: len,
                })
            }
        }
    }

    pub(crate) fn consume(&mut self, len: usize) {
        self.position += len;
        self.accounting.record(len);
    }

    /// Copy `data` into the buffer at the current position and move past it.
    pub fn append(&mut self, data: &[u8]) -> EmptyResult {
        let span = self.check_remaining(data.len())?;
        self.buffer[span].copy_from_slice(data);
        self.consume(data.len());
        Ok(())
    }

    /// Fill `dst` from the buffer at the current position and move past the copied bytes.
    ///
    /// On failure `dst` is left untouched.
    pub fn extract(&mut self, dst: &mut [u8]) -> EmptyResult {
        let span = self.check_remaining(dst.len())?;
        dst.copy_from_slice(&self.buffer[span]);
        self.consume(dst.len());
        Ok(())
    }

    /// Append a fixed-size value, using its size as the length.
    pub fn write<T: StreamValue>(&mut self, value: &T) -> EmptyResult {
        let len = T::stream_size();
        let span = self.check_remaining(len)?;
        value.write_to(&mut self.buffer[span]);
        self.consume(len);
        Ok(())
    }

    /// Extract a fixed-size value, using its size as the length.
    pub fn read<T: StreamValue>(&mut self) -> StreamResult<T> {
        let len = T::stream_size();
        let span = self.check_remaining(len)?;
        let value = T::read_from(&self.buffer[span]);
        self.consume(len);
        Ok(value)
    }

    /// Open a size accounting window expecting `expected` bytes to be appended or extracted.
    ///
    /// `context` names the operation in diagnostics: usually the calling routine.
    /// Any window already open is discarded. See also [`stream_debug_start!`](crate::stream_debug_start).
    pub fn debug_start(&mut self, expected: usize, context: &'static str) {
        self.accounting.start(expected, context);
    }

    /// Close the accounting window.
    ///
    /// Fails with `SizeMismatch` if the bytes moved since `debug_start` differ from the expected
    /// count, or `WindowNotOpen` if there is no open window. The window is closed either way.
    pub fn debug_end(&mut self, context: &'static str) -> EmptyResult {
        self.accounting.finish(context)
    }

    /// The accounting state, for inspection.
    pub fn accounting(&self) -> &SizeAccounting {
        &self.accounting
    }

    /// Run `f` inside an accounting window expecting `expected` bytes.
    ///
    /// An error from `f` takes precedence over a size mismatch.
    pub fn accounted<T, F>(
        &mut self,
        expected: usize,
        context: &'static str,
        f: F,
    ) -> StreamResult<T>
    where
        F: FnOnce(&mut Self) -> StreamResult<T>,
    {
        self.debug_start(expected, context);
        let result = f(&mut *self);
        let closed = self.debug_end(context);
        let value = result?;
        closed?;
        Ok(value)
    }

    /// Render the whole buffer and the unconsumed remainder.
    pub fn hex_dump(&self) -> (HexDump<'_>, HexDump<'_>) {
        (
            HexDump::new("Stream Total : ", self.base()),
            HexDump::new("Stream Current : ", self.current()),
        )
    }

    /// Emit the whole buffer and the unconsumed remainder as debug-level log events.
    pub fn dump(&self) {
        let (total, current) = self.hex_dump();
        tracing::debug!(position = self.position, "{}", total);
        tracing::debug!(position = self.position, "{}", current);
    }
}

/// Open an accounting window labeled with the caller's module path and line.
///
/// ```
/// use packet_stream::{stream_debug_end, stream_debug_start, Stream};
/// let mut storage = [0u8; 4];
/// let mut stream = Stream::new(&mut storage);
/// stream_debug_start!(stream, 2);
/// stream.write(&7u16).unwrap();
/// assert!(stream_debug_end!(stream).is_ok());
/// ```
#[macro_export]
macro_rules! stream_debug_start {
    ($stream:expr, $size:expr) => {
        $stream.debug_start($size, concat!(module_path!(), ":", line!()))
    };
}

/// Close an accounting window, labeled with the caller's module path and line.
#[macro_export]
macro_rules! stream_debug_end {
    ($stream:expr) => {
        $stream.debug_end(concat!(module_path!(), ":", line!()))
    };
}
