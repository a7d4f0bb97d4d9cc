// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

use thiserror::Error;

/// Error type returned by stream operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("could not allocate storage for the stream structure")]
    AllocationError,
    #[error("stream overflow in '{context}': {requested} bytes requested at position {position}, but capacity is {capacity}")]
    BufferOverflow {
        context: &'static str,
        capacity: usize,
        position: usize,
        requested: usize,
    },
    #[error("stream did not move the expected size in '{context}': remainder = {remainder}")]
    SizeMismatch { context: &'static str, remainder: i64 },
    #[error("debug_end called in '{context}' without a matching debug_start")]
    WindowNotOpen { context: &'static str },
}

impl StreamError {
    /// Is this a `BufferOverflow`?
    pub fn is_overflow(&self) -> bool {
        matches!(self, StreamError::BufferOverflow { .. })
    }

    /// The signed remainder carried by a `SizeMismatch`.
    ///
    /// Positive means too few bytes were moved, negative means too many.
    pub fn remainder(&self) -> Option<i64> {
        match self {
            StreamError::SizeMismatch { remainder, .. } => Some(*remainder),
            _ => None,
        }
    }
}

pub type StreamResult<T> = std::result::Result<T, StreamError>;

/// Shorthand for operations that only succeed or fail.
pub type EmptyResult = StreamResult<()>;
