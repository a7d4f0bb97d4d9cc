// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Traits describing values with a fixed size that can be copied into or out of a stream.

/// Trait for things that always take the same amount of space in a stream.
pub trait ConstantStreamSize {
    /// Get the number of bytes this type occupies in a stream.
    fn stream_size() -> usize
    where
        Self: Sized,
    {
        std::mem::size_of::<Self>()
    }
}

/// Trait for fixed-size values that can be written to and read from a stream as raw bytes.
///
/// The bytes are the value's in-memory (native-endian) representation: no conversion is done.
pub trait StreamValue: ConstantStreamSize + Sized {
    /// Copy this value into `dst`.
    ///
    /// Only called with a slice exactly `Self::stream_size()` bytes long.
    fn write_to(&self, dst: &mut [u8]);

    /// Rebuild a value from `src`.
    ///
    /// Only called with a slice exactly `Self::stream_size()` bytes long.
    fn read_from(src: &[u8]) -> Self;
}
