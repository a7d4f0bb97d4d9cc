// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Heap-allocated streams, for callers that need the stream structure to outlive a stack frame.

use crate::{
    error::{StreamError, StreamResult},
    stream::Stream,
};
use std::{
    convert::TryFrom,
    ops::{Deref, DerefMut},
};

/// An owned, heap-allocated `Stream`.
///
/// Owns only the stream structure: the wrapped buffer is still borrowed from the caller,
/// and dropping the handle leaves it untouched.
// One-element array so the box can come from a fallibly reserved Vec.
#[derive(Debug)]
pub struct StreamHandle<'a>(Box<[Stream<'a>; 1]>);

impl<'a> Deref for StreamHandle<'a> {
    type Target = Stream<'a>;
    fn deref(&self) -> &Self::Target {
        &self.0[0]
    }
}

impl<'a> DerefMut for StreamHandle<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0[0]
    }
}

impl<'a> Stream<'a> {
    /// Allocate a stream bound to `buffer`, positioned at its start.
    ///
    /// Returns `StreamError::AllocationError` rather than aborting if the structure cannot be
    /// allocated.
    pub fn create(buffer: &'a mut [u8]) -> StreamResult<StreamHandle<'a>> {
        let mut slot = Vec::new();
        if slot.try_reserve_exact(1).is_err() {
            tracing::error!(
                capacity = buffer.len(),
                "cannot allocate enough space for a stream"
            );
            return Err(StreamError::AllocationError);
        }
        slot.push(Stream::new(buffer));
        let boxed = Box::<[Stream<'a>; 1]>::try_from(slot.into_boxed_slice())
            .map_err(|_| StreamError::AllocationError)?;
        Ok(StreamHandle(boxed))
    }

    /// Release a heap-allocated stream and clear the caller's handle to it.
    ///
    /// The wrapped buffer is neither freed nor altered. Calling this on an empty handle does nothing.
    pub fn destroy(handle: &mut Option<StreamHandle<'a>>) {
        handle.take();
    }
}
