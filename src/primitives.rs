// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

use crate::size::{ConstantStreamSize, StreamValue};

macro_rules! stream_primitive {
    ($t:ty) => {
        impl ConstantStreamSize for $t {}

        impl StreamValue for $t {
            fn write_to(&self, dst: &mut [u8]) {
                dst.copy_from_slice(&self.to_ne_bytes());
            }

            fn read_from(src: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(src);
                <$t>::from_ne_bytes(raw)
            }
        }
    };
}

stream_primitive!(u8);
stream_primitive!(i8);
stream_primitive!(u16);
stream_primitive!(i16);
stream_primitive!(u32);
stream_primitive!(i32);
stream_primitive!(u64);
stream_primitive!(i64);
stream_primitive!(u128);
stream_primitive!(i128);
stream_primitive!(f32);
stream_primitive!(f64);

impl ConstantStreamSize for bool {}

impl StreamValue for bool {
    fn write_to(&self, dst: &mut [u8]) {
        dst[0] = u8::from(*self);
    }

    /// Any nonzero byte reads back as `true`.
    fn read_from(src: &[u8]) -> Self {
        src[0] != 0
    }
}

impl<const N: usize> ConstantStreamSize for [u8; N] {}

impl<const N: usize> StreamValue for [u8; N] {
    fn write_to(&self, dst: &mut [u8]) {
        dst.copy_from_slice(self);
    }

    fn read_from(src: &[u8]) -> Self {
        let mut raw = [0u8; N];
        raw.copy_from_slice(src);
        raw
    }
}
