// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! `bytes` trait implementations, so existing `Buf`/`BufMut` codecs can run over a `Stream`.
//!
//! These follow the `bytes` contracts, which panic rather than fail when a caller moves past the
//! end: check `remaining()` first, or use the inherent checked methods instead.
//! Bytes moved through these traits count toward an open accounting window.
//!
//! Note that the inherent `Stream::advance` (unchecked, not accounted) shadows `Buf::advance` in
//! method-call syntax: call `Buf::advance(&mut stream, n)` to consume bytes through the trait.

use crate::stream::Stream;
use bytes::{buf::UninitSlice, Buf, BufMut};

impl Buf for Stream<'_> {
    fn remaining(&self) -> usize {
        Stream::remaining(self)
    }

    fn chunk(&self) -> &[u8] {
        self.current()
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= Stream::remaining(self),
            "cannot advance past end of stream: {} requested, {} remaining",
            cnt,
            Stream::remaining(self)
        );
        self.consume(cnt);
    }
}

unsafe impl BufMut for Stream<'_> {
    fn remaining_mut(&self) -> usize {
        Stream::remaining(self)
    }

    fn chunk_mut(&mut self) -> &mut UninitSlice {
        UninitSlice::new(self.current_mut())
    }

    unsafe fn advance_mut(&mut self, cnt: usize) {
        assert!(
            cnt <= Stream::remaining(self),
            "cannot write past end of stream: {} requested, {} remaining",
            cnt,
            Stream::remaining(self)
        );
        self.consume(cnt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn bufmut_big_endian_codec() {
        let mut storage = [0u8; 8];
        let mut stream = Stream::new(&mut storage);
        stream.put_u16(0x0102);
        stream.put_u32(0x0304_0506);
        stream.put_slice(&hex!("07 08"));
        assert_eq!(stream.position(), 8);
        assert_eq!(BufMut::remaining_mut(&stream), 0);
        assert_eq!(stream.base(), &hex!("01 02 03 04 05 06 07 08"));
    }

    #[test]
    fn buf_reads_and_consumes() {
        let mut storage = hex!("00 2a ff ff ff fe");
        let mut stream = Stream::new(&mut storage);
        assert_eq!(stream.get_u16(), 42);
        assert_eq!(stream.get_i32(), -2);
        assert!(!stream.has_remaining());
    }

    #[test]
    fn trait_advance_consumes() {
        let mut storage = hex!("01 02 03");
        let mut stream = Stream::new(&mut storage);
        Buf::advance(&mut stream, 2);
        assert_eq!(stream.chunk(), &hex!("03"));
    }

    #[test]
    #[should_panic]
    fn bufmut_overflow_panics() {
        let mut storage = [0u8; 2];
        let mut stream = Stream::new(&mut storage);
        stream.put_u32(1);
    }

    #[cfg(feature = "size-accounting")]
    #[test]
    fn trait_moves_are_accounted() {
        let mut storage = [0u8; 6];
        let mut stream = Stream::new(&mut storage);
        stream.debug_start(6, "encode_pair");
        stream.put_u16(1);
        stream.put_u32(2);
        assert!(stream.debug_end("encode_pair").is_ok());

        stream.reset_position();
        stream.debug_start(6, "decode_pair");
        assert_eq!(stream.get_u16(), 1);
        assert_eq!(
            stream.debug_end("decode_pair").unwrap_err().remainder(),
            Some(4)
        );
    }
}
